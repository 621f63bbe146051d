use crate::components::comparison_table::ComparisonTable;
use crate::components::impact_engine::ImpactEngine;
use crate::components::plot::Plot;
use crate::components::select::Select;
use common::models::ImpactMetric;
use yew::prelude::*;

/// Impact totals per disaster type, and the average impact comparison.

#[function_component(ImpactPage)]
pub fn impact_page() -> Html {
    let metric = use_state_eq(|| ImpactMetric::TotalDeaths);
    let labels = use_memo((), |_| ImpactMetric::ALL.iter().map(|m| m.label().to_string()).collect::<Vec<String>>());

    let onchange = {
        let metric = metric.clone();
        Callback::from(move |label: String| {
            if let Some(m) = ImpactMetric::ALL.iter().find(|m| m.label() == label) {
                metric.set(*m);
            }
        })
    };

    html! {
        <div class="page">
            <h1>{"💥 Disaster Impact"}</h1>
            <p>{"Different types of disaster causes different impacts. Graph below shows which disaster had caused fatality accumulated from 1900 - then."}</p>

            <h2>{"☠️ Impact of Different Disaster"}</h2>
            <Select label="Select Impact Metric" options={labels.clone()} selected={Some(metric.label().to_string())} {onchange} />
            <Plot<ImpactEngine, ()> uri={format!("impact/{}", *metric)} request={()} />

            <h2>{"⚖️ Disaster Average Impact Comparison"}</h2>
            <ComparisonTable />
        </div>
    }
}
