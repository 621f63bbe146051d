use anyhow::{bail, Context};
use axum::{
    routing::{get, put},
    Router,
};
use clap::Parser;
use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use crate::handlers::*;
use crate::loader::Dataset;

mod error;
mod handlers;
mod loader;
mod views;

#[cfg(test)]
mod fixtures;

#[derive(Parser, Debug)]
#[clap(name = "backend", about = "em-dat disaster dashboard backend")]
struct Opt {
    #[clap(short = 'l', long = "log", default_value = "debug")]
    log_level: String,

    #[clap(short = 'a', long = "addr", default_value = "::1")]
    addr: String,

    #[clap(short = 'p', long = "port", default_value = "8080")]
    port: u16,

    #[clap(long = "static-dir", default_value = "./dist")]
    static_dir: String,

    /// Connection string of the document store holding the disaster records.
    #[clap(long = "mongo-uri", env = "MONGO_URI", hide_env_values = true)]
    mongo_uri: Option<String>,

    #[clap(long = "database", default_value = "test_db")]
    database: String,

    #[clap(long = "collection", default_value = "emdat_test1")]
    collection: String,

    /// Load records from a json export of the collection instead of the document store.
    #[clap(long = "data-file")]
    data_file: Option<PathBuf>,
}

/// State shared by every handler: the disaster table, loaded once at startup.

#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
}

/// Builds the json api. Every view renderer gets one route.

pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api/options", get(options))
        .route("/api/records", put(records))
        .route("/api/distribution", put(distribution))
        .route("/api/trend", put(trend))
        .route("/api/impact/{metric}", put(impact))
        .route("/api/comparison", put(comparison))
        .route("/api/map", put(map))
        .with_state(state)
}

async fn load_dataset(opt: &Opt) -> anyhow::Result<Dataset> {
    if let Some(path) = &opt.data_file {
        log::info!("loading records from {}", path.display());
        return loader::load_file(path)
            .await
            .with_context(|| format!("couldn't load {}", path.display()));
    }

    let Some(uri) = &opt.mongo_uri else {
        bail!("MONGO_URI must be set, or pass --data-file");
    };
    log::info!("loading records from {}.{}", opt.database, opt.collection);
    loader::load_collection(uri, &opt.database, &opt.collection)
        .await
        .context("couldn't load records from the document store")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let opt = Opt::parse();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", format!("{},hyper=info,mio=info", opt.log_level))
    }
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let dataset = load_dataset(&opt).await?;
    log::info!("loaded {} records with {} columns", dataset.len(), dataset.columns.len());

    let state = AppState { dataset: Arc::new(dataset) };
    let index_path = PathBuf::from(&opt.static_dir).join("index.html");
    let app = api_router(state)
        .fallback_service(ServeDir::new(&opt.static_dir).not_found_service(ServeFile::new(index_path)))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    let mut port = opt.port;
    if let Ok(port_env) = std::env::var("PORT") {
        port = port_env.parse::<u16>().context("PORT must be a port number")?;
    }

    let sock_addr = SocketAddr::from((
        IpAddr::from_str(opt.addr.as_str()).unwrap_or(IpAddr::V6(Ipv6Addr::LOCALHOST)),
        port,
    ));

    log::info!("listening on http://{}", sock_addr);

    let listener = tokio::net::TcpListener::bind(&sock_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
