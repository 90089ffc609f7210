//! Gateway header middleware
//!
//! `extract_caller` runs on every request: if the gateway forwarded a
//! recognized role header it attaches a [`CurrentCaller`] extension and
//! moves on. Requests without (or with an unknown) role still proceed so
//! public routes keep working; `require_staff` is what actually rejects.

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};

use crate::auth::{CallerRole, CurrentCaller};
use crate::utils::AppError;

/// Header carrying the gateway-asserted role (`admin` | `super_admin`)
pub const ROLE_HEADER: &str = "x-caller-role";
/// Optional header carrying the caller's display name
pub const NAME_HEADER: &str = "x-caller-name";

/// Parse gateway identity headers into a request extension.
///
/// Never fails the request itself.
pub async fn extract_caller(mut req: Request, next: Next) -> Response {
    let role = req
        .headers()
        .get(ROLE_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(CallerRole::parse);

    if let Some(role) = role {
        let name = req
            .headers()
            .get(NAME_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|n| !n.is_empty())
            .map(String::from);

        req.extensions_mut().insert(CurrentCaller { name, role });
    }

    next.run(req).await
}

/// Staff middleware - requires an asserted staff role
///
/// # Errors
///
/// Returns 401 when no recognized role header was forwarded
pub async fn require_staff(req: Request, next: Next) -> Result<Response, AppError> {
    let caller = req
        .extensions()
        .get::<CurrentCaller>()
        .ok_or(AppError::unauthorized())?;

    if !caller.role.is_staff() {
        tracing::warn!(
            role = caller.role.as_str(),
            path = %req.uri().path(),
            "staff access denied"
        );
        return Err(AppError::forbidden("Staff role required"));
    }

    Ok(next.run(req).await)
}
