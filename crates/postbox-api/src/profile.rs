use axum::{Extension, Json, response::IntoResponse};

use postbox_types::api::ProfileResponse;
use postbox_types::models::User;

pub async fn profile(Extension(user): Extension<User>) -> impl IntoResponse {
    Json(ProfileResponse {
        full_name: user.full_name,
    })
}
