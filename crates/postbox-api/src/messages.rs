use axum::{Extension, Json, extract::State, response::IntoResponse};
use tracing::{debug, warn};
use uuid::Uuid;

use postbox_types::api::{SendMessageRequest, StatusMessage};
use postbox_types::models::User;

use crate::auth::AppState;
use crate::error::ApiError;

/// Store a message for its recipient. Recipients need not be registered;
/// there is no read endpoint, so the store is write-only over HTTP.
pub async fn send_message(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(req): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.sender != user.username {
        warn!(
            username = %user.username,
            claimed_sender = %req.sender,
            "Rejected message sent on behalf of another user"
        );
        return Err(ApiError::Forbidden);
    }

    let message_id = Uuid::new_v4();
    state
        .db
        .insert_message(&message_id.to_string(), &req.sender, &req.recipient, &req.text)?;

    debug!(%message_id, recipient = %req.recipient, "Message stored");

    Ok(Json(StatusMessage::new("Message sent successfully")))
}
