use crate::components::map_engine::{MapEngine, World, WorldShapes};
use crate::components::plot::Plot;
use crate::util::{use_get, use_put, Fetch};
use common::models::{MapRequest, MapResponse};
use yew::prelude::*;

/// Where the country outlines are served from, alongside the app itself.
const WORLD_SHAPES: &str = "/countries.geojson";

#[derive(Properties, PartialEq)]
pub struct WorldMapProps {
    pub disaster_type: String,
}

/// The choropleth of one disaster type. Falls back to a ranked table of
/// countries if the outlines can't be fetched.

#[function_component(WorldMap)]
pub fn world_map(props: &WorldMapProps) -> Html {
    let shapes = use_get::<WorldShapes>(WORLD_SHAPES);
    let request = MapRequest { disaster_type: props.disaster_type.clone() };

    match shapes {
        Fetch::Loading => html! {
            <div class="plot">
                <div class="loader-wrapper" style="display: flex"><div class="loader"/></div>
            </div>
        },
        Fetch::Ready(shapes) => html! {
            <Plot<MapEngine, MapRequest> uri={"map".to_string()} {request} extra={World(Some(shapes))} />
        },
        Fetch::Failed => html! { <CountryCounts {request} /> },
    }
}

#[derive(Properties, PartialEq)]
struct CountryCountsProps {
    request: MapRequest,
}

#[function_component(CountryCounts)]
fn country_counts(props: &CountryCountsProps) -> Html {
    let fetch = use_put::<MapRequest, MapResponse>("map".to_string(), props.request.clone());

    let data = match fetch {
        Fetch::Loading => return html! {
            <div class="loader-wrapper" style="display: flex"><div class="loader"/></div>
        },
        Fetch::Failed => return html! {
            <h3 class="plot-message">{"an error occurred - please try refreshing"}</h3>
        },
        Fetch::Ready(data) => data,
    };

    if let Some(warning) = &data.warning {
        return html! { <h3 class="plot-message">{warning}</h3> };
    }

    let mut counts = data.counts.clone();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.iso.cmp(&b.iso)));

    html! {
        <div class="country-counts">
            <h3>{&data.title}</h3>
            <div class="table-scroll">
                <table>
                    <thead><tr><th>{"Country"}</th><th>{"Number of Disasters"}</th></tr></thead>
                    <tbody>
                        { for counts.iter().map(|c| html! { <tr><td>{&c.iso}</td><td>{c.count}</td></tr> }) }
                    </tbody>
                </table>
            </div>
        </div>
    }
}
