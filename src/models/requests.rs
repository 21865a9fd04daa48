//! Request DTOs for the user API
//!
//! Defines the structure of incoming HTTP request bodies. Every field is
//! optional at the wire level so malformed bodies surface as validation
//! failures instead of deserialization errors.

use serde::Deserialize;

/// Returns the field's value when it is present and non-empty
fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Request body for account creation (POST /api/user/register)
///
/// # Fields
/// - `email`: Account identifier
/// - `first_name` / `last_name`: Display names, camelCase on the wire
/// - `password_hash`: Pre-hashed credential, snake_case on the wire
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(default, rename = "lastName")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub password_hash: Option<String>,
}

impl RegisterRequest {
    /// Returns all four fields when every one is present and non-empty
    ///
    /// # Returns
    /// `Some((email, first_name, last_name, password_hash))` when the body
    /// is complete, `None` when any required field is missing or empty.
    pub fn fields(&self) -> Option<(&str, &str, &str, &str)> {
        match (
            non_empty(&self.email),
            non_empty(&self.first_name),
            non_empty(&self.last_name),
            non_empty(&self.password_hash),
        ) {
            (Some(email), Some(first_name), Some(last_name), Some(password_hash)) => {
                Some((email, first_name, last_name, password_hash))
            }
            _ => None,
        }
    }
}

/// Request body for login (POST /api/user/login)
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Returns the credential pair when both fields are present and non-empty
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (non_empty(&self.email), non_empty(&self.password)) {
            (Some(email), Some(password)) => Some((email, password)),
            _ => None,
        }
    }
}
