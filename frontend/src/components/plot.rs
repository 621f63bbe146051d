use crate::util::{use_put, Fetch};
use plotters::style::RGBColor;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::cmp::max;
use std::error::Error;
use std::rc::Rc;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;
use yew_hooks::prelude::use_window_size;

pub struct PlotError;

impl<E: Error> From<E> for PlotError {
    fn from(_: E) -> Self {
        PlotError
    }
}

/// Bold grid line colour.
pub const BOLD_LINE: &str = "97948f";

/// Light grid line colour.
pub const LIGHT_LINE: &str = "67635c";

/// Decodes a six digit hex colour like `97948f`.

pub fn colour(hex_colour: &str) -> Result<RGBColor, PlotError> {
    let rgb = hex::decode(hex_colour)?;
    match rgb[..] {
        [r, g, b] => Ok(RGBColor(r, g, b)),
        _ => Err(PlotError),
    }
}

/// Axis label font size for a canvas of the given pixel width.

pub fn label_size(canvas_width: f64, dpr: f64) -> u32 {
    let size = (canvas_width.sqrt() / 2.5) as u32;
    max((size as f64 * (1.0 + (dpr * 0.1))) as u32, (8.0 * dpr) as u32)
}

/// Describes a valid plottable engine when implemented.

pub trait Plottable {

    /// The response this engine draws.

    type Data: DeserializeOwned + 'static;

    /// Extra properties the engine needs beyond its data, passed through the
    /// plot component.

    type Extra: PartialEq + Clone + Default + 'static;

    /// Returns a new plot engine.

    fn new() -> Self;

    /// Sets the dynamic properties for this engine. These may need to be reset on rerender.

    fn set_props(&mut self, window_width: f64, extra: Self::Extra);

    /// Loads data into the engine.

    fn load_data(&mut self, data: Rc<Self::Data>);

    /// A message to show instead of the plot, if the data came with one.

    fn warning(&self) -> Option<String>;

    /// Whether the engine is empty of data.

    fn is_empty(&self) -> bool;

    /// Returns a sane calculated width for the plot.

    fn get_width(&self) -> u32;

    /// Returns a sane calculated height for the plot.

    fn get_height(&self) -> u32;

    /// Draws the plot on the given canvas element using plotters.

    fn redraw(&mut self, canvas: HtmlCanvasElement) -> Result<(), PlotError>;
}

/// Properties for the plot component.

#[derive(Properties, PartialEq)]
pub struct PlotProps<Q, X>
    where
        Q: PartialEq,
        X: PartialEq + Default,
{

    /// The api endpoint the plot data is requested from, relative to `/api/`.

    pub uri: String,

    /// The widget selections sent as the request body.

    pub request: Q,

    /// Extra engine properties.

    #[prop_or_default]
    pub extra: X,
}

/// A flexible plot component that requests data and hands it to a plot engine
/// to render.
///
/// A new request is made whenever the uri or request body changes; until it
/// arrives the previous plot stays up, faded. If the request fails (or drawing
/// fails) the plot enters a fail state and the page will need to be refreshed.

#[function_component(Plot)]
pub fn plot<P, Q>(props: &PlotProps<Q, <P as Plottable>::Extra>) -> Html
    where
        P: Plottable + 'static,
        Q: Serialize + PartialEq + Clone + 'static,
{
    let fetch = use_put::<Q, P::Data>(props.uri.clone(), props.request.clone());
    let failed = use_state_eq(|| false);
    let canvas = use_node_ref();
    let window_size = use_window_size();
    let engine: Rc<RefCell<P>> = use_mut_ref(P::new);

    {
        let engine = engine.clone();
        let canvas = canvas.clone();
        let failed = failed.clone();
        use_effect(move || {
            if !*failed {
                if let Ok(mut eng) = engine.try_borrow_mut() {
                    if !eng.is_empty() && eng.warning().is_none() {
                        if let Some(canvas) = canvas.cast::<HtmlCanvasElement>() {
                            if eng.redraw(canvas).is_err() {
                                failed.set(true);
                            }
                        }
                    }
                }
            }
            || {}
        });
    }

    let Ok(mut eng) = engine.try_borrow_mut() else {
        return html! { <div class="plot"><h3 class="plot-message">{"an error occurred - please try refreshing"}</h3></div> };
    };
    eng.set_props(window_size.0, props.extra.clone());
    if let Fetch::Ready(data) = &fetch {
        eng.load_data(data.clone());
    }

    let mut canvas_style = "display: none".to_string();
    let mut message = None;
    let mut loader_style = "display: none";

    match (&fetch, *failed) {
        (Fetch::Failed, _) | (_, true) => {
            message = Some("an error occurred - please try refreshing".to_string());
        },
        (Fetch::Loading, _) if eng.is_empty() => {
            loader_style = "display: flex";
        },
        (fetch, _) => {
            if let Fetch::Loading = fetch {
                loader_style = "display: flex";
            }
            if let Some(warning) = eng.warning() {
                message = Some(warning);
            } else if eng.is_empty() {
                message = Some("no results found".to_string());
            } else {
                let canvas_opacity = if let Fetch::Loading = fetch {"0.25"} else {"1"};
                canvas_style = format!("opacity: {}; width: {}px; height: {}px", canvas_opacity, eng.get_width(), eng.get_height());
            }
        },
    }

    html! {
        <div class="plot">
            <div class="loader-wrapper" style={loader_style}>
                <div class="loader"/>
            </div>
            if let Some(message) = message {
                <h3 class="plot-message">{message}</h3>
            }
            <canvas class="canvas" style={canvas_style} ref={canvas} />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_hex_colours() {
        assert!(matches!(colour("97948f"), Ok(RGBColor(0x97, 0x94, 0x8f))));
        assert!(colour("9794").is_err());
        assert!(colour("zz0000").is_err());
    }

    #[test]
    fn label_size_has_a_floor() {
        assert_eq!(label_size(0.0, 2.0), 16);
        assert!(label_size(1600.0, 1.0) >= 16);
    }
}
