use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::assets::{self, AssetId};
use crate::dataset::{self, Dataset};
use crate::filter::{self, ALL_COUNTRIES, ALL_FUELS, Dimension, Selection};
use crate::map;
use crate::table::{self, TableRow};

/// Startup settings for the explorer. Paths follow the original convention
/// of data and images sitting next to the application.
pub struct Config {
    pub data_path: PathBuf,
    pub asset_dir: PathBuf,
    pub bind_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_path: PathBuf::from("global_power_plant_database.csv"),
            asset_dir: PathBuf::from("."),
            bind_addr: "127.0.0.1:3000".to_string(),
        }
    }
}

pub struct AppState {
    dataset: Arc<Dataset>,
    fuel_colors: BTreeMap<String, String>,
    asset_dir: PathBuf,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, asset_dir: PathBuf) -> Self {
        AppState {
            fuel_colors: map::fuel_colors(&dataset),
            dataset,
            asset_dir,
        }
    }
}

#[derive(Deserialize)]
struct FilterQuery {
    country: Option<String>,
    fuel: Option<String>,
}

impl FilterQuery {
    fn selections(&self) -> (Selection, Selection) {
        (
            Selection::from_param(self.country.as_deref(), ALL_COUNTRIES),
            Selection::from_param(self.fuel.as_deref(), ALL_FUELS),
        )
    }
}

#[derive(Serialize)]
struct OptionsResponse {
    all_countries: &'static str,
    all_fuels: &'static str,
    countries: Vec<String>,
    fuels: Vec<String>,
}

#[derive(Serialize)]
struct PlantsResponse {
    count: usize,
    rows: Vec<TableRow>,
}

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    // Process-wide cached load; fatal if the file is missing or unparseable.
    let dataset = dataset::shared(&config.data_path)?;

    let state = Arc::new(AppState::new(dataset, config.asset_dir.clone()));
    let app = router(state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    log::info!("listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/api/options", get(get_options))
        .route("/api/plants", get(get_plants))
        .route("/api/map", get(get_map))
        .route("/api/assets", get(get_asset_manifest))
        .route("/assets/:name", get(get_asset))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn serve_index() -> Html<&'static str> {
    Html(include_str!("./static/index.html"))
}

async fn get_options(State(state): State<Arc<AppState>>) -> Json<OptionsResponse> {
    Json(OptionsResponse {
        all_countries: ALL_COUNTRIES,
        all_fuels: ALL_FUELS,
        countries: filter::options_for(&state.dataset, Dimension::Country),
        fuels: filter::options_for(&state.dataset, Dimension::Fuel),
    })
}

async fn get_plants(
    Query(params): Query<FilterQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<PlantsResponse> {
    let (country, fuel) = params.selections();
    let subset = filter::apply(&state.dataset, &country, &fuel);
    Json(PlantsResponse {
        count: subset.len(),
        rows: table::render(&subset),
    })
}

async fn get_map(
    Query(params): Query<FilterQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let (country, fuel) = params.selections();
    let subset = filter::apply(&state.dataset, &country, &fuel);
    Json(map::render(&subset, &state.fuel_colors))
}

async fn get_asset_manifest(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(assets::manifest(&state.asset_dir))
}

async fn get_asset(Path(name): Path<String>, State(state): State<Arc<AppState>>) -> Response {
    // Only the fixed catalog is served; everything else is a 404, which also
    // keeps arbitrary paths out of the asset directory.
    let Some(id) = AssetId::from_file_name(&name) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match assets::try_load_asset(&id.path_in(&state.asset_dir)) {
        Some(asset) => ([(header::CONTENT_TYPE, asset.content_type)], asset.bytes).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
