use serde::{Deserialize, Serialize};

/// A registered user as seen by request handlers.
/// Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub full_name: Option<String>,
}
