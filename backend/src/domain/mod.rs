//! Domain primitives, services and ports.
//!
//! Purpose: Define strongly typed account and dashboard types used by the
//! inbound adapters and persistence layers, the services that operate on
//! them, and the ports those services depend on. Invariants and
//! serialisation contracts are documented on each type.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: API error payload and its stable identifier.
//! - `UserAccount`: persisted account keyed by email.
//! - `PlainPassword`: validated secret awaiting hashing.
//! - `AdminProvisioningService`: promotes or creates administrators.
//! - `DashboardOverview`: statistics and notifications for the dashboard.

pub mod admin_provisioning;
pub mod credentials;
pub mod dashboard;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::admin_provisioning::{
    AdminProvisioningService, PendingAdmin, ProvisionError, ProvisionStep,
};
pub use self::credentials::{PASSWORD_MIN_LENGTH, PasswordValidationError, PlainPassword};
pub use self::dashboard::{
    ConversionRate, ConvertedLeads, DashboardOverview, DashboardStats, InvoicesAwaiting,
    Notification, ProjectsProgress, relative_label,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;
pub use self::user::{
    EMAIL_MAX, EmailAddress, PasswordHash, Role, RoleSet, UserAccount, UserId,
    UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use crm_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::invalid_request("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
