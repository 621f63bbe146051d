use yew::prelude::*;
use yew_router::prelude::*;

/// A route enum containing all the routes in the app.

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {

    /// The route to the home page, the raw disaster data and its overview charts.

    #[at("/")]
    Home,

    /// The route to the impact analysis page.

    #[at("/impact")]
    Impact,

    /// The route to the per-country page.

    #[at("/countries")]
    Countries,

    /// The route to the 404 not found page.

    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {

    /// The sections listed in the navigation sidebar, in order.

    pub const SECTIONS: [Route; 3] = [Route::Home, Route::Impact, Route::Countries];

    pub fn label(&self) -> &'static str {
        match self {
            Route::Home => "📊 Disaster Data",
            Route::Impact => "💥 Disaster Impact",
            Route::Countries => "🗺️ Country-Wise Disaster Info",
            Route::NotFound => "Not Found",
        }
    }
}

/// A sidebar that lets the user pick one of the dashboard's sections.

#[function_component(Navbar)]
pub fn navbar() -> Html {
    let current = use_route::<Route>().unwrap_or(Route::NotFound);

    html! {
        <div class="navbar">
            <h2 class="navbar-title">{"Navigation"}</h2>
            { for Route::SECTIONS.iter().map(|route| html! {
                <div class="navbar-item">
                    <Link<Route> to={route.clone()}>
                        <button class={if *route == current {"button highlight"} else {"button"}}>{route.label()}</button>
                    </Link<Route>>
                </div>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_map_to_paths() {
        assert_eq!(Route::recognize("/"), Some(Route::Home));
        assert_eq!(Route::recognize("/impact"), Some(Route::Impact));
        assert_eq!(Route::recognize("/countries"), Some(Route::Countries));
        assert_eq!(Route::recognize("/elsewhere"), Some(Route::NotFound));
        assert_eq!(Route::Countries.to_path(), "/countries");
    }

    #[test]
    fn sections_carry_their_icons() {
        let labels: Vec<&str> = Route::SECTIONS.iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["📊 Disaster Data", "💥 Disaster Impact", "🗺️ Country-Wise Disaster Info"]);
    }
}
