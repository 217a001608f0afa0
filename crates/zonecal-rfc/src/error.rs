use thiserror::Error;
use zonecal_core::error::CoreError;

/// Calendar construction and rendering errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Invalid {kind}: `{value}`. Input must be one of the following: {allowed}")]
    InvalidValue {
        kind: &'static str,
        value: String,
        allowed: String,
    },

    #[error("Invalid organizer `{0}`: expected `Name <email>` or an email address")]
    InvalidOrganizer(String),

    #[error("Organizer name is empty")]
    EmptyOrganizerName,

    #[error("Priority {0} is out of range (0-9)")]
    PriorityOutOfRange(u8),

    #[error("Custom attribute key `{0}` has to start with `X-`")]
    InvalidCustomAttribute(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Timezone resolution failed for {tzid}: {reason}")]
    TimezoneResolution { tzid: String, reason: String },

    #[error(transparent)]
    CoreError(#[from] CoreError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
