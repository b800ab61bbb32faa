//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::middleware::secret_auth_middleware;
use crate::server::routes::{add_user, find_user, health_handler, verify_user};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub deps: Arc<ServerDeps>,
}

/// Build the Axum application router
///
/// Privileged endpoints (addUser, findUser) sit behind the shared-secret
/// middleware; verifyUser and the health check are public. An unmatched
/// method on a matched path answers 405 before any auth runs.
pub fn build_app(deps: Arc<ServerDeps>, api_secret: String) -> Router {
    let app_state = AxumAppState { deps };

    let protected = Router::new()
        .route("/addUser", put(add_user))
        .route("/findUser", post(find_user))
        .route_layer(middleware::from_fn(move |req, next| {
            secret_auth_middleware(api_secret.clone(), req, next)
        }));

    Router::new()
        .merge(protected)
        .route("/verifyUser", post(verify_user))
        .route("/health", get(health_handler))
        .layer(Extension(app_state))
        .layer(TraceLayer::new_for_http())
}
