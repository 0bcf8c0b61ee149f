use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use crate::error::ApiError;
use crate::settings::Settings;

/// Checks the admin token on mutating routes; accepted either as a Bearer
/// header or as a `?token=` query parameter.
pub fn verify_token(
    settings: &Settings,
    auth: Option<Authorization<Bearer>>,
    query_token: Option<&str>,
) -> Result<(), ApiError> {
    let provided_token = auth
        .map(|a| a.token().to_string())
        .or_else(|| query_token.map(|s| s.to_string()));
    match provided_token {
        Some(token) if token == settings.admin_token => Ok(()),
        _ => Err(ApiError::Unauthorized(
            "Invalid authentication token".into(),
        )),
    }
}
