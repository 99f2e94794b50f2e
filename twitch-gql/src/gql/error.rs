//! Validation failures raised before a request ever reaches the transport.

/// The largest number of identifiers a bulk lookup accepts in one request.
pub const MAX_BULK_IDENTIFIERS: usize = 100;

/// An argument was rejected locally, without any network traffic.
///
/// Every public operation returns [`eyre::Result`]; these errors are wrapped in the returned
/// [`eyre::Report`] and can be recovered with [`eyre::Report::downcast_ref`]. Errors produced by
/// the transport are never converted into this type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The operation needs a signed-in identity but no bearer token has been set.
    #[error("bearer token has not been set")]
    TokenNotSet,
    /// A bulk lookup was handed more identifiers than the endpoint accepts.
    #[error("too many arguments: got {given}, at most {max} are allowed")]
    TooManyArguments { given: usize, max: usize },
    /// A required argument was missing or empty.
    #[error("invalid argument: {0} must not be empty")]
    InvalidArgument(&'static str),
}

/// Rejects identifier lists longer than [`MAX_BULK_IDENTIFIERS`].
pub(crate) fn check_bulk_len(given: usize) -> Result<(), QueryError> {
    if given > MAX_BULK_IDENTIFIERS {
        return Err(QueryError::TooManyArguments {
            given,
            max: MAX_BULK_IDENTIFIERS,
        });
    }
    Ok(())
}

/// Rejects an empty subject ID.
pub(crate) fn check_subject_id(id: &str) -> Result<(), QueryError> {
    if id.is_empty() {
        return Err(QueryError::InvalidArgument("subject id"));
    }
    Ok(())
}
