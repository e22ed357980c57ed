use std::process::ExitCode;

use axum::{Router, middleware::from_fn_with_state};
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use admin_session_axum::{AdminAuth, admin_session_router, require_admin};

mod facilities;
mod server;

use crate::facilities::{AppState, FacilityStore};
use crate::server::spawn_http_server;

fn app(state: AppState) -> Router {
    let moderation =
        facilities::admin_router().route_layer(from_fn_with_state(state.auth.clone(), require_admin));

    Router::new()
        .nest("/api", facilities::public_router())
        .nest("/api/admin", admin_session_router().merge(moderation))
        .with_state(state)
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,admin_session=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let auth = match AdminAuth::from_env() {
        Ok(auth) => auth,
        Err(e) => {
            tracing::error!("Cannot start without admin session configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);

    let state = AppState {
        auth,
        facilities: FacilityStore::seeded(),
    };

    match spawn_http_server(port, app(state)).await {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(e)) => {
            tracing::error!("Server error: {e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("Server task failed: {e}");
            ExitCode::FAILURE
        }
    }
}
