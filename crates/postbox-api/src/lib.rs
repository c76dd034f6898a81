pub mod auth;
pub mod error;
#[cfg(feature = "messaging")]
pub mod messages;
pub mod middleware;
pub mod profile;
pub mod session;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::auth::AppState;
use crate::middleware::require_session;

/// All routes, with state applied. Transport layers (CORS, tracing) are
/// added by the server binary.
pub fn router(state: AppState) -> Router {
    let public_routes: Router<AppState> = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    let protected_routes: Router<AppState> = Router::new().route("/profile", get(profile::profile));

    #[cfg(feature = "messaging")]
    let protected_routes = protected_routes.route("/send_message", post(messages::send_message));

    let protected_routes = protected_routes.layer(axum_middleware::from_fn_with_state(
        state.clone(),
        require_session,
    ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
