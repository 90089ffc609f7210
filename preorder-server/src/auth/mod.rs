//! Caller identity consumed from the access gateway.
//!
//! Authentication and session issuance live outside this service. The
//! gateway terminates the session and forwards the caller's role (and
//! optionally a display name) as request headers; this module parses them
//! into a [`CurrentCaller`] extension and gates staff-only routes. No
//! token verification happens here.

mod middleware;

pub use middleware::{extract_caller, require_staff};

/// Roles the access gateway may assert for a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallerRole {
    Admin,
    SuperAdmin,
}

impl CallerRole {
    /// Parse the gateway's role header value
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Self::Admin),
            "super_admin" => Some(Self::SuperAdmin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Both roles carry the staff capability today
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }
}

/// Authenticated caller as asserted by the access gateway
#[derive(Debug, Clone)]
pub struct CurrentCaller {
    pub name: Option<String>,
    pub role: CallerRole,
}
