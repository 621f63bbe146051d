use common::models::OptionsResponse;
use components::navbar::*;
use pages::country_page::CountryPage;
use pages::data_page::DataPage;
use pages::error_page::error_page;
use pages::impact_page::ImpactPage;
use std::rc::Rc;
use util::{use_get, Fetch};
use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod pages;
mod util;

/// The dropdown choices shared by every page, fetched once when the app starts.

#[derive(Clone, Debug, PartialEq)]
pub struct State {
    pub years: Rc<Vec<String>>,
    pub disaster_types: Rc<Vec<String>>,
    pub countries: Rc<Vec<String>>,
}

impl From<&OptionsResponse> for State {
    fn from(options: &OptionsResponse) -> Self {
        State {
            years: Rc::new(options.years.iter().map(|y| y.to_string()).collect()),
            disaster_types: Rc::new(options.disaster_types.clone()),
            countries: Rc::new(options.countries.clone()),
        }
    }
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! {
            <DataPage />
        },
        Route::Impact => html! {
            <ImpactPage />
        },
        Route::Countries => html! {
            <CountryPage />
        },
        Route::NotFound => html! {
            <NotFoundPage />
        },
    }
}

/// Shown for any path outside the three sections.

#[function_component(NotFoundPage)]
fn not_found_page() -> Html {
    let Some(navigator) = use_navigator() else {return error_page()};
    let onclick = Callback::from(move |_| navigator.push(&Route::Home));

    html! {
        <div class="error-page">
            <h1>{ "404 not found" }</h1>
            <button class="button" {onclick}>{ format!("back to {}", Route::Home.label()) }</button>
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    let options = use_get::<OptionsResponse>("/api/options");

    let state = match options {
        Fetch::Loading => return html! {
            <div class="loader-wrapper" style="display: flex"><div class="loader"/></div>
        },
        Fetch::Failed => return error_page(),
        Fetch::Ready(options) => State::from(options.as_ref()),
    };

    html! {
        <ContextProvider<State> context={state}>
            <BrowserRouter>
                <div class="app">
                    <Navbar />
                    <div class="content">
                        <Switch<Route> render={switch} />
                    </div>
                </div>
            </BrowserRouter>
        </ContextProvider<State>>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Trace));
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
