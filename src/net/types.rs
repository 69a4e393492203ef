//! Wire types shared with the storefront API.
//!
//! The API is Express/Mongo-shaped: user objects carry `_id` and camelCase
//! flags, so serde renames keep the Rust side idiomatic while matching the
//! JSON the server actually emits.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// An authenticated storefront user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Opaque unique identifier assigned by the server.
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    /// Display name shown in the account header.
    pub name: String,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
}

/// Successful authentication outcome: the issued token plus the identity
/// it belongs to. Persisted as one unit so a reload can restore the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionGrant {
    pub token: String,
    pub user: UserIdentity,
}

/// Body for `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body for `POST /auth/register`.
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub name: &'a str,
}

/// Error envelope the API returns on non-2xx auth responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}
