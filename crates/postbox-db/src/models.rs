//! Database row types. Kept separate from postbox-types so the
//! storage layer never leaks into the wire format.

#[derive(Debug, Clone)]
pub struct UserRow {
    pub username: String,
    pub full_name: Option<String>,
    pub password_hash: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct MessageRow {
    pub id: String,
    pub sender: String,
    pub recipient: String,
    pub text: String,
    pub created_at: String,
}
