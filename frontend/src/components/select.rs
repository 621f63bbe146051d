use std::rc::Rc;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

/// Properties for the dropdown component.

#[derive(Properties, PartialEq)]
pub struct SelectProps {
    pub label: AttrValue,
    pub options: Rc<Vec<String>>,
    pub selected: Option<String>,
    pub onchange: Callback<String>,
}

/// A labelled dropdown that reports the chosen option.

#[function_component(Select)]
pub fn select(props: &SelectProps) -> Html {
    let onchange = {
        let callback = props.onchange.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                callback.emit(select.value());
            }
        })
    };

    html! {
        <div class="select">
            <label>{props.label.clone()}</label>
            <select {onchange}>
                { for props.options.iter().map(|option| html! {
                    <option value={option.clone()} selected={props.selected.as_ref() == Some(option)}>{option}</option>
                })}
            </select>
        </div>
    }
}
