use yew::prelude::*;

/// Shown when the app can't start at all, usually because the dropdown
/// choices couldn't be fetched. Rendered outside the router.

pub fn error_page() -> Html {
    html! {
        <div class="error-page">
            <h2>{ "the disaster data couldn't be loaded" }</h2>
            <p>{ "the server may still be starting up - try refreshing the page in a moment" }</p>
        </div>
    }
}
