use crate::util::{use_put, Fetch};
use common::models::{RecordsRequest, RecordsResponse};
use yew::prelude::*;

/// How many rows the table asks for at a time.
const PAGE_ROWS: usize = 500;

#[derive(Properties, PartialEq)]
pub struct RecordTableProps {

    /// Restrict the rows to one country; `None` shows every record.

    #[prop_or_default]
    pub country: Option<String>,
}

/// A scrollable table of the flattened disaster records, a page at a time.

#[function_component(RecordTable)]
pub fn record_table(props: &RecordTableProps) -> Html {
    let offset = use_state_eq(|| 0usize);

    {
        let offset = offset.clone();
        use_effect_with(props.country.clone(), move |_| {
            offset.set(0);
            || {}
        });
    }

    let request = RecordsRequest {
        country: props.country.clone(),
        offset: Some(*offset),
        limit: Some(PAGE_ROWS),
    };
    let fetch = use_put::<RecordsRequest, RecordsResponse>("records".to_string(), request);

    let data = match fetch {
        Fetch::Loading => return html! {
            <div class="loader-wrapper" style="display: flex"><div class="loader"/></div>
        },
        Fetch::Failed => return html! {
            <h3 class="plot-message">{"an error occurred - please try refreshing"}</h3>
        },
        Fetch::Ready(data) => data,
    };

    let first = if data.total == 0 { 0 } else { *offset + 1 };
    let last = *offset + data.rows.len();
    let prev = {
        let offset = offset.clone();
        Callback::from(move |_| offset.set(offset.saturating_sub(PAGE_ROWS)))
    };
    let next = {
        let offset = offset.clone();
        Callback::from(move |_| offset.set(*offset + PAGE_ROWS))
    };

    html! {
        <div class="record-table">
            <div class="table-controls">
                <span>{format!("records {} to {} of {}", first, last, data.total)}</span>
                <button class="button" onclick={prev} disabled={*offset == 0}>{"previous"}</button>
                <button class="button" onclick={next} disabled={last >= data.total}>{"next"}</button>
            </div>
            <div class="table-scroll">
                <table>
                    <thead>
                        <tr>{ for data.columns.iter().map(|c| html! { <th>{c}</th> }) }</tr>
                    </thead>
                    <tbody>
                        { for data.rows.iter().map(|row| html! {
                            <tr>{ for row.iter().map(|cell| html! { <td>{cell}</td> }) }</tr>
                        })}
                    </tbody>
                </table>
            </div>
        </div>
    }
}
