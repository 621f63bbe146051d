use crate::components::select::Select;
use crate::util::{use_put, Fetch};
use common::models::{ComparisonRequest, ComparisonResponse};
use std::rc::Rc;
use yew::prelude::*;

/// How a missing average is shown in the table.
const MISSING: &str = "nan";

fn cell(value: Option<f64>) -> String {
    value.map_or(MISSING.to_string(), |v| format!("{:.2}", v))
}

/// Whether there is a second type to pick at all. Without one only the warning
/// is shown.

fn offers_choice(data: &ComparisonResponse) -> bool {
    !data.candidates.is_empty()
}

/// Two dropdowns picking disaster types A and B, and a table of their average
/// impacts side by side.

#[function_component(ComparisonTable)]
pub fn comparison_table() -> Html {
    let request = use_state_eq(ComparisonRequest::default);
    let fetch = use_put::<ComparisonRequest, ComparisonResponse>("comparison".to_string(), (*request).clone());
    let shown = use_mut_ref(|| None::<Rc<ComparisonResponse>>);

    match &fetch {
        Fetch::Ready(data) => *shown.borrow_mut() = Some(data.clone()),
        Fetch::Failed => return html! {
            <h3 class="plot-message">{"an error occurred - please try refreshing"}</h3>
        },
        Fetch::Loading => {},
    }

    let Some(data) = shown.borrow().clone() else {
        return html! { <div class="loader-wrapper" style="display: flex"><div class="loader"/></div> };
    };

    let pick_a = {
        let request = request.clone();
        Callback::from(move |a: String| {
            // keep B unless it would now be the same type
            let b = request.disaster_b.clone().filter(|b| *b != a);
            request.set(ComparisonRequest { disaster_a: Some(a), disaster_b: b });
        })
    };
    let pick_b = {
        let request = request.clone();
        Callback::from(move |b: String| {
            request.set(ComparisonRequest { disaster_a: request.disaster_a.clone(), disaster_b: Some(b) });
        })
    };

    if !offers_choice(&data) {
        return html! {
            <div class="comparison">
                if let Some(warning) = &data.warning {
                    <h3 class="plot-message">{warning}</h3>
                }
            </div>
        };
    }

    let a_name = data.disaster_a.clone().unwrap_or_default();
    let b_name = data.disaster_b.clone().unwrap_or_default();

    html! {
        <div class="comparison">
            <Select
                label="Select Disaster A"
                options={Rc::new(data.disaster_types.clone())}
                selected={data.disaster_a.clone()}
                onchange={pick_a}
            />
            <Select
                label="Select Disaster B"
                options={Rc::new(data.candidates.clone())}
                selected={data.disaster_b.clone()}
                onchange={pick_b}
            />
            if let Some(warning) = &data.warning {
                <h3 class="plot-message">{warning}</h3>
            } else {
                <table class="comparison-table">
                    <thead>
                        <tr><th>{a_name}</th><th>{"Average Impact"}</th><th>{b_name}</th></tr>
                    </thead>
                    <tbody>
                        { for data.rows.iter().map(|row| html! {
                            <tr><td>{cell(row.a)}</td><td>{&row.label}</td><td>{cell(row.b)}</td></tr>
                        })}
                    </tbody>
                </table>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_averages_read_nan() {
        assert_eq!(cell(None), "nan");
        assert_eq!(cell(Some(2.0 / 3.0)), "0.67");
    }

    #[test]
    fn single_type_offers_no_dropdowns() {
        let lonely = ComparisonResponse {
            disaster_types: vec!["Flood".into()],
            warning: Some("Not enough disaster types available for comparison.".into()),
            ..Default::default()
        };
        assert!(!offers_choice(&lonely));

        let pair = ComparisonResponse {
            disaster_types: vec!["Flood".into(), "Storm".into()],
            disaster_a: Some("Flood".into()),
            candidates: vec!["Storm".into()],
            disaster_b: Some("Storm".into()),
            ..Default::default()
        };
        assert!(offers_choice(&pair));
    }
}
