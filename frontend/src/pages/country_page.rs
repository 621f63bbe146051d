use crate::components::pie_engine::{PieColours, PieEngine};
use crate::components::plot::Plot;
use crate::components::record_table::RecordTable;
use crate::components::select::Select;
use crate::components::world_map::WorldMap;
use crate::pages::NO_RECORDS;
use crate::State;
use common::models::{DistributionRequest, ALL_COUNTRIES};
use yew::prelude::*;

/// The table filtered by country, a country's disaster type pie and the world map.

#[function_component(CountryPage)]
pub fn country_page() -> Html {
    html! {
        <div class="page">
            <h1>{"🗺️ Country-Wise Disaster Info"}</h1>
            <CountryTable />

            <h2>{"🌍 Disaster Types by Country"}</h2>
            <CountryPie />

            <h2>{"🌍 Disaster Distribution by Country"}</h2>
            <MapSection />
        </div>
    }
}

#[function_component(CountryTable)]
fn country_table() -> Html {
    let state = use_context::<State>();
    let selected = use_state_eq(|| ALL_COUNTRIES.to_string());
    let choices = use_memo(state.clone(), |state| {
        let mut choices = vec![ALL_COUNTRIES.to_string()];
        if let Some(state) = state {
            choices.extend(state.countries.iter().cloned());
        }
        choices
    });

    let onchange = {
        let selected = selected.clone();
        Callback::from(move |country: String| selected.set(country))
    };
    let country = Some((*selected).clone()).filter(|c| c != ALL_COUNTRIES);

    html! {
        <div class="section">
            <Select label="Select Country:" options={choices.clone()} selected={Some((*selected).clone())} {onchange} />
            <RecordTable {country} />
        </div>
    }
}

#[function_component(CountryPie)]
fn country_pie() -> Html {
    let state = use_context::<State>();
    let selected = use_state_eq(|| None::<String>);

    let Some(state) = state else { return html! {} };
    let Some(first) = state.countries.first() else {
        return html! { <h3 class="plot-message">{NO_RECORDS}</h3> };
    };
    let country = (*selected).clone().unwrap_or_else(|| first.clone());

    let onchange = {
        let selected = selected.clone();
        Callback::from(move |country: String| selected.set(Some(country)))
    };
    let request = DistributionRequest { country: Some(country.clone()) };

    html! {
        <div class="section">
            <Select label="Select a Country" options={state.countries.clone()} selected={Some(country)} {onchange} />
            <Plot<PieEngine, DistributionRequest> uri={"distribution".to_string()} {request} extra={PieColours::Paired} />
        </div>
    }
}

#[function_component(MapSection)]
fn map_section() -> Html {
    let state = use_context::<State>();
    let selected = use_state_eq(|| None::<String>);

    let Some(state) = state else { return html! {} };
    let Some(first) = state.disaster_types.first() else {
        return html! { <h3 class="plot-message">{NO_RECORDS}</h3> };
    };
    let disaster_type = (*selected).clone().unwrap_or_else(|| first.clone());

    let onchange = {
        let selected = selected.clone();
        Callback::from(move |t: String| selected.set(Some(t)))
    };

    html! {
        <div class="section">
            <Select label="Select Disaster Type" options={state.disaster_types.clone()} selected={Some(disaster_type.clone())} {onchange} />
            <WorldMap {disaster_type} />
        </div>
    }
}
