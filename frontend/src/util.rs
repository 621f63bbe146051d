use anyhow::bail;
use anyhow::Result;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

pub async fn put<T>(uri: &str, body: T) -> Result<Response>
    where T: Serialize
{
    let req = Request::put(uri)
        .header("Content-Type", "application/json")
        .json(&body)?;

    let resp = req.send().await?;

    if !resp.ok() {
        bail!("request to {} failed with status {}", uri, resp.status());
    };

    Ok(resp)
}

pub async fn get(uri: &str) -> Result<Response> {
    let resp = Request::get(uri).send().await?;

    if !resp.ok() {
        bail!("request to {} failed with status {}", uri, resp.status());
    };

    Ok(resp)
}

/// The state of a data request made by one of the views.

pub enum Fetch<R> {
    Loading,
    Ready(Rc<R>),
    Failed,
}

impl<R> Clone for Fetch<R> {
    fn clone(&self) -> Self {
        match self {
            Fetch::Loading => Fetch::Loading,
            Fetch::Ready(data) => Fetch::Ready(data.clone()),
            Fetch::Failed => Fetch::Failed,
        }
    }
}

/// Requests `api/{uri}` with the given body whenever either of them changes.
///
/// Responses to superseded requests are dropped, so a slow answer can't
/// overwrite the view the user has since asked for.

#[hook]
pub fn use_put<Q, R>(uri: String, request: Q) -> Fetch<R>
    where
        Q: Serialize + PartialEq + Clone + 'static,
        R: DeserializeOwned + 'static,
{
    let state = use_state(|| Fetch::Loading);
    let generation = use_mut_ref(|| 0u32);

    {
        let state = state.clone();
        use_effect_with((uri, request), move |(uri, request)| {
            *generation.borrow_mut() += 1;
            let current = *generation.borrow();
            let uri = format!("/api/{}", uri);
            let request = request.clone();

            state.set(Fetch::Loading);
            spawn_local(async move {
                let result = async {
                    let resp = put(&uri, request).await?;
                    Ok::<R, anyhow::Error>(resp.json::<R>().await?)
                }.await;

                if *generation.borrow() != current {
                    return;
                }
                state.set(match result {
                    Ok(data) => Fetch::Ready(Rc::new(data)),
                    Err(e) => {
                        log::error!("{}", e);
                        Fetch::Failed
                    }
                });
            });

            || {}
        });
    }

    (*state).clone()
}

/// Requests `uri` once, when the component is first rendered.

#[hook]
pub fn use_get<R>(uri: &'static str) -> Fetch<R>
    where R: DeserializeOwned + 'static
{
    let state = use_state(|| Fetch::Loading);

    {
        let state = state.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let result = async { Ok::<R, anyhow::Error>(get(uri).await?.json::<R>().await?) }.await;
                state.set(match result {
                    Ok(data) => Fetch::Ready(Rc::new(data)),
                    Err(e) => {
                        log::warn!("{}", e);
                        Fetch::Failed
                    }
                });
            });

            || {}
        });
    }

    (*state).clone()
}
