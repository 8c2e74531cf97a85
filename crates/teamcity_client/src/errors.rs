//! Error types for build feature operations.
//!
//! This module defines the errors raised while validating build feature options
//! and while reconstructing typed options from the property bag received from
//! the TeamCity server.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur while building, encoding or decoding build features.
///
/// Validation variants are returned by the feature constructors. Malformed-input
/// variants are returned by the reverse property mapping and by JSON decoding.
/// Every error is terminal for the operation that raised it.
///
/// ## Examples
///
/// ```rust
/// use teamcity_client::{Error, FeaturePullRequests, PullRequestsGithubOptions};
///
/// let options = PullRequestsGithubOptions::new_token("", "ANY");
/// match FeaturePullRequests::new_github(options, "") {
///     Err(Error::MissingAccessToken) => {}
///     other => panic!("unexpected result: {:?}", other.map(|_| ())),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The options did not specify an authentication type.
    #[error("AuthenticationType is required")]
    MissingAuthenticationType,

    /// The options specified an authentication type other than `password` or `token`.
    #[error("invalid AuthenticationType '{0}', must be 'password' or 'token'")]
    InvalidAuthenticationType(String),

    /// Password authentication was selected without both a username and a password.
    #[error("username/password required for auth type 'password'")]
    MissingCredentials,

    /// Token authentication was selected without an access token.
    #[error("access token required for auth type 'token'")]
    MissingAccessToken,

    /// A property required to reconstruct typed options was absent.
    ///
    /// The contained string is the missing property key.
    #[error("Properties do not have '{0}' key")]
    MissingProperty(String),

    /// The JSON payload could not be parsed into a build feature.
    #[error("Failed to deserialize build feature: {0}")]
    Deserialization(#[from] serde_json::Error),
}
