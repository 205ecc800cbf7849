mod extract;
mod handlers;

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::HeaderValue,
    routing::{delete, get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::API;
use crate::auth::AdminSecret;
use crate::config::Config;
use crate::error::Error;
use crate::server::handlers::{admin, places};

pub type DynAPI = Arc<dyn API + Send + Sync>;

pub fn router(api: DynAPI, admin_secret: AdminSecret) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/places", get(places::find_all).post(places::create))
        .route("/api/places/saved", get(places::find_saved))
        .route(
            "/api/places/:id",
            get(places::find).put(places::update).delete(places::delete),
        )
        .route("/api/places/:id/save", patch(places::save))
        .route("/api/places/:id/unsave", patch(places::unsave))
        .route("/api/admin/places", post(admin::create))
        .route("/api/admin/places/:id", delete(admin::delete))
        .layer(Extension(api))
        .layer(Extension(admin_secret))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, config: Config) -> Result<(), Error> {
    let api = Arc::new(api) as DynAPI;

    let origin = config.cors_origin.parse::<HeaderValue>().map_err(|_| {
        Error::config_error(format!("invalid CORS_ORIGIN '{}'", config.cors_origin))
    })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router(api, config.admin_secret.clone())
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = config.addr()?;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn root() -> &'static str {
    "City Explorer API is running"
}
