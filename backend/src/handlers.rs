use crate::error::AppError;
use crate::loader::Dataset;
use crate::views;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use common::models::*;
use std::str::FromStr;

/// Runs a view over the shared table on the blocking pool, since the table
/// views walk every record.

async fn render<T, F>(state: AppState, view: F) -> Result<Json<T>, AppError>
    where
        F: FnOnce(&Dataset) -> T + Send + 'static,
        T: Send + 'static,
{
    let dataset = state.dataset.clone();
    Ok(Json(tokio::task::spawn_blocking(move || view(dataset.as_ref())).await?))
}

/// Return the years, disaster types and countries the dropdowns offer.

pub async fn options(State(state): State<AppState>) -> Result<Json<OptionsResponse>, AppError> {
    render(state, views::options).await
}

/// Return the flattened table, optionally filtered to one country.

pub async fn records(
    State(state): State<AppState>,
    Json(payload): Json<RecordsRequest>,
) -> Result<Json<RecordsResponse>, AppError> {
    render(state, move |dataset| views::records(dataset, &payload)).await
}

/// Return the disaster type pie for the whole table or one country.

pub async fn distribution(
    State(state): State<AppState>,
    Json(payload): Json<DistributionRequest>,
) -> Result<Json<DistributionResponse>, AppError> {
    render(state, move |dataset| views::type_distribution(dataset, &payload)).await
}

/// Return yearly counts of one disaster type within a year range.

pub async fn trend(
    State(state): State<AppState>,
    Json(payload): Json<TrendRequest>,
) -> Result<Json<TrendResponse>, AppError> {
    render(state, move |dataset| views::trend(dataset, &payload)).await
}

/// Return the per-type totals of the impact metric named in the path.

pub async fn impact(
    State(state): State<AppState>,
    Path(metric): Path<String>,
) -> Result<Json<ImpactResponse>, AppError> {
    let metric = ImpactMetric::from_str(metric.as_str())?;
    render(state, move |dataset| views::impact_totals(dataset, metric)).await
}

/// Return the average impact comparison of two disaster types.

pub async fn comparison(
    State(state): State<AppState>,
    Json(payload): Json<ComparisonRequest>,
) -> Result<Json<ComparisonResponse>, AppError> {
    render(state, move |dataset| views::comparison(dataset, &payload)).await
}

/// Return per-country counts of one disaster type for the world map.

pub async fn map(
    State(state): State<AppState>,
    Json(payload): Json<MapRequest>,
) -> Result<Json<MapResponse>, AppError> {
    render(state, move |dataset| views::world_map(dataset, &payload)).await
}
