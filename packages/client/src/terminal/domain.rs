//! Reconnection decisions for the terminal client.
//!
//! Pure functions so the policy can be tested without a server.

use crate::error::ClientError;

/// Check if the client should exit immediately based on the error type.
///
/// # Arguments
///
/// * `error` - The client error to check
///
/// # Returns
///
/// `true` if retrying cannot help (the server refused us, or our own
/// configuration is unusable), `false` otherwise
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(
        error,
        ClientError::Rejected(_) | ClientError::InvalidConfig(_)
    )
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
///
/// # Returns
///
/// `true` if reconnection should be attempted, `false` otherwise
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}
