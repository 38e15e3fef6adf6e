use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

/// Raw `x-teacher-id` header value, injected for ownership-gated handlers.
/// Presence-checked only; the workflow performs the actual ownership check.
#[derive(Clone, Debug)]
pub struct ActingTeacherId(pub String);

/// Middleware for mutating classroom routes: rejects requests without a
/// non-empty `x-teacher-id` header before the workflow runs.
pub async fn require_teacher_header(mut request: Request, next: Next) -> Result<Response, Response> {
    let header = request
        .headers()
        .get("x-teacher-id")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    let Some(value) = header else {
        return Err(ApiError::bad_request(
            "The x-teacher-id header must be provided for this operation",
        )
        .into_response());
    };

    if value.trim().is_empty() {
        return Err(
            ApiError::bad_request("The x-teacher-id header must be a non-empty string")
                .into_response(),
        );
    }

    request
        .extensions_mut()
        .insert(ActingTeacherId(value));

    Ok(next.run(request).await)
}
