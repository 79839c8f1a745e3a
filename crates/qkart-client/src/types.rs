//! Request and response bodies for the storefront REST API that are not
//! shared domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body of `POST /auth/login` and `POST /auth/register`.
#[derive(Serialize)]
pub(crate) struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Successful `POST /auth/login` response.
///
/// ```json
/// { "success": true, "token": "eyJ...", "username": "crio-user", "balance": 5000 }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    pub token: String,
    pub username: String,
    #[serde(default)]
    pub balance: Option<Decimal>,
}

/// Error envelope: `{ "success": false, "message": "..." }`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiMessage {
    pub message: String,
}
