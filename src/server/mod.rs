//! HTTP API
//!
//! Thin presentation layer over the aggregation pipeline. Every request
//! rebuilds the asset set from scratch: two sequential upstream calls
//! (prices, then metadata), then pure in-memory computation. No state is
//! shared between requests.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::aggregator::{is_normalized, Aggregator};
use crate::error::FeedError;
use crate::partition::partition;
use crate::sampler::sample_distinct;
use crate::sources::{MetadataSource, PriceSource};
use crate::types::{CoinAsset, SAMPLE_SIZE};

/// Shared handler state: the two upstream adapters and the join logic.
pub struct AppState {
    pub prices: Box<dyn PriceSource>,
    pub metadata: Box<dyn MetadataSource>,
    pub aggregator: Aggregator,
}

/// Create the API router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Text renderings
        .route("/", get(get_sample_text))
        .route("/boxes", get(get_boxes_text))
        // JSON box endpoints
        .route("/api/boxes/1", get(get_box1_json))
        .route("/api/boxes/2", get(get_box2_json))
        // State
        .with_state(state)
        // CORS for browser clients
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Run the whole per-request pipeline: prices, then metadata, then join.
async fn fetch_assets(state: &AppState) -> Result<Vec<CoinAsset>, FeedError> {
    let raw_prices = state.prices.fetch_prices().await?;
    let metadata = state.metadata.fetch_metadata().await?;
    state.aggregator.build(&raw_prices, &metadata)
}

fn error_response(err: FeedError) -> (StatusCode, String) {
    tracing::error!(error = %err, "Request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Failed to build coin assets: {err}"),
    )
}

// ─────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────

/// GET / - random 10-asset sample, plain text
async fn get_sample_text(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let assets = match fetch_assets(&state).await {
        Ok(assets) => assets,
        Err(err) => return Err(error_response(err)),
    };
    let sampled = sample_distinct(&assets, SAMPLE_SIZE).map_err(error_response)?;

    let mut body = render_assets(&sampled, None);
    if is_normalized(&sampled) {
        body.push_str("The probabilities sum to approximately 1.\n");
    } else {
        body.push_str("Error: the probabilities do not sum to approximately 1.\n");
    }
    Ok(body)
}

/// GET /boxes - both boxes, plain text
async fn get_boxes_text(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let assets = match fetch_assets(&state).await {
        Ok(assets) => assets,
        Err(err) => return Err(error_response(err)),
    };
    let (box1, box2) = partition(&assets).map_err(error_response)?;

    let mut body = render_assets(&box1, Some("Box 1"));
    body.push_str(&render_assets(&box2, Some("Box 2")));
    Ok(body)
}

/// GET /api/boxes/1 - Box 1 as a JSON array
async fn get_box1_json(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (box1, _) = fetch_boxes(&state).await?;
    Ok::<_, (StatusCode, String)>(Json(box1))
}

/// GET /api/boxes/2 - Box 2 as a JSON array
async fn get_box2_json(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (_, box2) = fetch_boxes(&state).await?;
    Ok::<_, (StatusCode, String)>(Json(box2))
}

async fn fetch_boxes(
    state: &AppState,
) -> Result<(Vec<CoinAsset>, Vec<CoinAsset>), (StatusCode, String)> {
    let assets = fetch_assets(state).await.map_err(error_response)?;
    partition(&assets).map_err(error_response)
}

// ─────────────────────────────────────────────────────────────────
// Text rendering
// ─────────────────────────────────────────────────────────────────

/// Render one asset block per entry, `---`-separated, optionally prefixed
/// with a box label on the name line.
fn render_assets(assets: &[CoinAsset], label: Option<&str>) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for asset in assets {
        match label {
            Some(label) => {
                let _ = writeln!(out, "{} - Name: {}", label, asset.name);
            }
            None => {
                let _ = writeln!(out, "Name: {}", asset.name);
            }
        }
        let _ = writeln!(out, "Symbol: {}", asset.pair_symbol);
        let _ = writeln!(out, "Icon: {}", asset.icon);
        let _ = writeln!(out, "Gain: {:.8}%", asset.gain * 100.0);
        let _ = writeln!(out, "Probability: {:.8}%", asset.probability * 100.0);
        let _ = writeln!(out, "Ratio: {:.8}", asset.ratio);
        out.push_str("---\n");
    }
    out
}
