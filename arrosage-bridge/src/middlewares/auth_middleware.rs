use axum::extract::Request;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::errors::ApiError;

/// Presence gate only: the credential itself is not verified.
pub async fn require_authorization(req: Request, next: Next) -> Result<Response, ApiError> {
    let present = req
        .headers()
        .get(header::AUTHORIZATION)
        .is_some_and(|value| !value.is_empty());

    if !present {
        return Err(ApiError::MissingAuthorization);
    }

    Ok(next.run(req).await)
}
