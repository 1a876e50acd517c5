use serde::Deserialize;

/// Input for account creation. `password` is the plaintext; only its
/// digest is ever stored.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
}
