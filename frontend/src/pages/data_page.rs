use crate::components::pie_engine::PieEngine;
use crate::components::plot::Plot;
use crate::components::record_table::RecordTable;
use crate::components::select::Select;
use crate::components::trend_engine::TrendEngine;
use crate::pages::NO_RECORDS;
use crate::State;
use common::models::{DistributionRequest, TrendRequest};
use yew::prelude::*;

/// The raw disaster table with its overview charts.

#[function_component(DataPage)]
pub fn data_page() -> Html {
    html! {
        <div class="page">
            <h1>{"📊 EM-DAT Disaster Data"}</h1>
            <p>
                {"Data of this site were from "}
                <a href="https://www.emdat.be/" target="_blank">{"EM-DAT The International Disaster Database"}</a>
                {". Disaster data were being visualized to provide more understanding about disasters to the public."}
            </p>
            <RecordTable />

            <h2>{"🥧 Disaster Type Distribution"}</h2>
            <Plot<PieEngine, DistributionRequest> uri={"distribution".to_string()} request={DistributionRequest::default()} />

            <h2>{"📈 Disaster Trend Line Graph"}</h2>
            <TrendSection />
        </div>
    }
}

#[derive(Clone, PartialEq, Default)]
struct TrendChoice {
    start_year: Option<String>,
    end_year: Option<String>,
    disaster_type: Option<String>,
}

/// Start year, end year and disaster type dropdowns over the trend line.
/// Unpicked dropdowns default to the first year, the last year and the first
/// type.

#[function_component(TrendSection)]
fn trend_section() -> Html {
    let state = use_context::<State>();
    let choice = use_state_eq(TrendChoice::default);

    let Some(state) = state else { return html! {} };
    let (Some(first_year), Some(last_year), Some(first_type)) =
        (state.years.first(), state.years.last(), state.disaster_types.first())
    else {
        return html! { <h3 class="plot-message">{NO_RECORDS}</h3> };
    };

    let start_year = choice.start_year.clone().unwrap_or_else(|| first_year.clone());
    let end_year = choice.end_year.clone().unwrap_or_else(|| last_year.clone());
    let disaster_type = choice.disaster_type.clone().unwrap_or_else(|| first_type.clone());

    let pick = |set: fn(&mut TrendChoice, String)| {
        let choice = choice.clone();
        Callback::from(move |value: String| {
            let mut next = (*choice).clone();
            set(&mut next, value);
            choice.set(next);
        })
    };

    let request = match (start_year.parse::<i32>(), end_year.parse::<i32>()) {
        (Ok(start_year), Ok(end_year)) => Some(TrendRequest { start_year, end_year, disaster_type: disaster_type.clone() }),
        _ => None,
    };

    html! {
        <div class="section">
            <div class="selects">
                <Select label="Select Start Year" options={state.years.clone()} selected={Some(start_year)}
                    onchange={pick(|c, v| c.start_year = Some(v))} />
                <Select label="Select End Year" options={state.years.clone()} selected={Some(end_year)}
                    onchange={pick(|c, v| c.end_year = Some(v))} />
                <Select label="Select Disaster Type" options={state.disaster_types.clone()} selected={Some(disaster_type)}
                    onchange={pick(|c, v| c.disaster_type = Some(v))} />
            </div>
            if let Some(request) = request {
                <Plot<TrendEngine, TrendRequest> uri={"trend".to_string()} {request} />
            } else {
                <h3 class="plot-message">{NO_RECORDS}</h3>
            }
        </div>
    }
}
