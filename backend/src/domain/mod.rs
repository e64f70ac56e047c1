//! Domain primitives, validators and services.
//!
//! Purpose: hold the portable rules of the product independent of HTTP and
//! of the hosted backend. Validators are pure; the barcode lookup service
//! talks to the outside world only through [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - TraceId (alias to `trace_id::TraceId`): request correlation id.

pub mod appointment;
pub mod auth;
pub mod barcode;
pub mod barcode_lookup;
pub mod calendar;
pub mod client;
pub mod deadline;
pub mod enums;
pub mod error;
pub mod formatting;
pub mod money;
pub mod pet;
pub mod ports;
pub mod print;
pub mod rate_limit;
pub mod records;
pub mod services;
pub mod session;
pub mod trace_id;
pub mod transaction;
pub mod validation;

pub use self::auth::{AuthenticatedUser, BearerToken, UserId};
pub use self::barcode::{Barcode, BarcodeError, ProductDetails, ProductSource};
pub use self::barcode_lookup::BarcodeLookupService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::money::Cents;
pub use self::rate_limit::{RateLimitDecision, SlidingWindowRateLimiter};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use pawdesk::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::unauthorized("missing bearer token"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
