use std::{error::Error, sync::Arc};

use axum::{
    Router,
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use http::header;
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use common::config::{Config, ServiceConfig};

use crate::{
    error::CartError,
    model::{ChannelContext, Persistable},
    persister::CartPersister,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to config file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: String,
}

pub fn initialize_executable() -> Result<Config, Box<dyn Error + Send + Sync>> {
    let args = Args::parse();
    println!("Loading config from: {}", args.config);
    let config = Config::load(&args.config)?;

    Ok(config)
}

pub fn initialize_tracing(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[derive(Clone)]
pub struct AppState<C: Persistable + 'static> {
    pub persister: Arc<CartPersister<C>>,
}

#[derive(Deserialize)]
pub struct SaveCartRequest<C> {
    pub context: ChannelContext,
    pub cart: C,
}

#[derive(Deserialize)]
pub struct ReplaceTokenRequest {
    pub new_token: Option<String>,
}

#[derive(Serialize)]
pub struct ReplaceTokenResponse {
    pub token: String,
}

pub async fn load_cart<C>(
    State(state): State<AppState<C>>,
    Path(token): Path<String>,
) -> Response
where
    C: Persistable + 'static,
{
    match state.persister.load(&token, &ChannelContext::default()).await {
        Ok(cart) => (StatusCode::OK, Json(cart)).into_response(),
        Err(e @ CartError::TokenNotFound { .. }) => {
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load cart");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

pub async fn save_cart<C>(
    State(state): State<AppState<C>>,
    Json(request): Json<SaveCartRequest<C>>,
) -> Response
where
    C: Persistable + 'static,
{
    match state.persister.save(request.cart, &request.context).await {
        Ok(cart) => {
            tracing::info!("Successfully saved cart with token: {}", cart.token());
            (StatusCode::OK, Json(cart)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to save cart");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

pub async fn delete_cart<C>(
    State(state): State<AppState<C>>,
    Path(token): Path<String>,
) -> Response
where
    C: Persistable + 'static,
{
    match state
        .persister
        .delete(&token, &ChannelContext::default())
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete cart");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

pub async fn replace_cart_token<C>(
    State(state): State<AppState<C>>,
    Path(token): Path<String>,
    Json(request): Json<ReplaceTokenRequest>,
) -> Response
where
    C: Persistable + 'static,
{
    let new_token = request
        .new_token
        .unwrap_or_else(|| Uuid::new_v4().simple().to_string());

    match state
        .persister
        .replace(&token, &new_token, &ChannelContext::default())
        .await
    {
        Ok(()) => (StatusCode::OK, Json(ReplaceTokenResponse { token: new_token })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to replace cart token");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK").into_response()
}

pub fn build_router<C>(persister: Arc<CartPersister<C>>) -> Router
where
    C: Persistable + 'static,
{
    let state = AppState { persister };

    Router::new()
        .route("/cart/{token}", get(load_cart::<C>).delete(delete_cart::<C>))
        .route("/cart", put(save_cart::<C>))
        .route("/cart/{token}/replace", post(replace_cart_token::<C>))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(
                    "http://localhost:5173"
                        .parse::<header::HeaderValue>()
                        .unwrap(),
                )
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn run_service<C>(
    config: ServiceConfig,
    persister: Arc<CartPersister<C>>,
) -> Result<(), Box<dyn Error + Send + Sync>>
where
    C: Persistable + 'static,
{
    let app = build_router(persister);

    tracing::info!("Starting cart service at {}", config.server_address);
    let listener = tokio::net::TcpListener::bind(&config.server_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
