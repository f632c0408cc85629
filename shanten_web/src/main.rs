use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use shanten_core::{
    chitoi_shanten, furo_chance_shanten, kokushi_shanten, parse_tiles, regular_shanten, shanten,
    Furo, Hand, ShantenError, ShantenOptions, ShantenResult, Tile,
};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr: SocketAddr = std::env::var("SHANTEN_WEB_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;
    let app = router();

    tracing::info!(%addr, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}

fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/shanten", post(union_shanten))
        .route("/api/regular", post(regular))
        .route("/api/chitoi", post(chitoi))
        .route("/api/kokushi", post(kokushi))
        .route("/api/furo_chance", post(furo_chance))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "ok"
}

/// Either `"123m456p"` or `["1m", "2m", ...]`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TilesField {
    Text(String),
    List(Vec<Tile>),
}

impl TilesField {
    fn into_tiles(self) -> Result<Vec<Tile>, ShantenError> {
        match self {
            TilesField::Text(text) => parse_tiles(&text),
            TilesField::List(tiles) => Ok(tiles),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShantenRequest {
    tiles: TilesField,
    #[serde(default)]
    furo: Vec<Furo>,
    chance_tile: Option<Tile>,
    #[serde(flatten)]
    options: ShantenOptions,
}

impl ShantenRequest {
    fn into_parts(self) -> Result<(Hand, Option<Tile>, ShantenOptions), ApiError> {
        let hand = Hand::new(self.tiles.into_tiles()?, self.furo)?;
        Ok((hand, self.chance_tile, self.options))
    }
}

type ApiResult = Result<Json<ShantenResult>, ApiError>;

async fn union_shanten(Json(req): Json<ShantenRequest>) -> ApiResult {
    let (hand, _, opts) = req.into_parts()?;
    Ok(Json(shanten(&hand, &opts)?))
}

async fn regular(Json(req): Json<ShantenRequest>) -> ApiResult {
    let (hand, _, opts) = req.into_parts()?;
    Ok(Json(regular_shanten(&hand, &opts)?))
}

async fn chitoi(Json(req): Json<ShantenRequest>) -> ApiResult {
    let (hand, _, opts) = req.into_parts()?;
    Ok(Json(chitoi_shanten(&hand, &opts)?))
}

async fn kokushi(Json(req): Json<ShantenRequest>) -> ApiResult {
    let (hand, _, opts) = req.into_parts()?;
    Ok(Json(kokushi_shanten(&hand, &opts)?))
}

async fn furo_chance(Json(req): Json<ShantenRequest>) -> ApiResult {
    let (hand, chance, opts) = req.into_parts()?;
    let chance = chance.ok_or_else(|| ApiError("chanceTile is required".to_string()))?;
    Ok(Json(furo_chance_shanten(&hand, chance, &opts)?))
}

struct ApiError(String);

impl From<ShantenError> for ApiError {
    fn from(err: ShantenError) -> Self {
        ApiError(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self.0, "rejected request");
        (StatusCode::BAD_REQUEST, self.0).into_response()
    }
}
