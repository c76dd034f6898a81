use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use tracing::debug;

use postbox_types::models::User;

use crate::auth::AppState;
use crate::error::ApiError;
use crate::session::SESSION_COOKIE_NAME;

/// Resolve the session cookie to a registered user and attach it to the request
/// as an `Extension<User>`.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let value = jar
        .get(SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
        .ok_or(ApiError::Unauthenticated)?;

    let username = state.sessions.resolve(&value).ok_or(ApiError::Unauthenticated)?;

    let Some(row) = state.db.get_user_by_username(&username)? else {
        debug!(username = %username, "Session names an unknown user");
        return Err(ApiError::Unauthenticated);
    };

    req.extensions_mut().insert(User {
        username: row.username,
        full_name: row.full_name,
    });
    Ok(next.run(req).await)
}
