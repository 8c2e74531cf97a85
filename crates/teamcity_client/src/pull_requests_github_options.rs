//! GitHub options for the pull requests build feature.
//!
//! This module contains the typed configuration of the GitHub provider of the
//! `pullRequests` build feature and its mapping to and from the property bag.
//!
//! Secrets (`password`, `access_token`) are written under `secure:` keys. The
//! server never returns those values, so options rebuilt from a received bag
//! always have empty secrets.

use std::fmt;
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use tracing::warn;

use crate::{Error, FeatureOptions, Properties};

#[cfg(test)]
#[path = "pull_requests_github_options_tests.rs"]
mod tests;

pub(crate) const PROVIDER_TYPE_KEY: &str = "providerType";
const AUTHENTICATION_TYPE_KEY: &str = "authenticationType";
const FILTER_AUTHOR_ROLE_KEY: &str = "filterAuthorRole";
const FILTER_SOURCE_BRANCH_KEY: &str = "filterSourceBranch";
const FILTER_TARGET_BRANCH_KEY: &str = "filterTargetBranch";
const SERVER_URL_KEY: &str = "serverUrl";
const USERNAME_KEY: &str = "username";
const PASSWORD_KEY: &str = "secure:password";
const ACCESS_TOKEN_KEY: &str = "secure:accessToken";

/// Provider discriminator written for GitHub options.
pub const GITHUB_PROVIDER_TYPE: &str = "github";

/// How the pull requests feature authenticates against GitHub.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthenticationType {
    /// Username and password
    Password,
    /// Personal access token
    Token,
}

impl AuthenticationType {
    /// Wire value of this authentication type.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthenticationType::Password => "password",
            AuthenticationType::Token => "token",
        }
    }
}

impl fmt::Display for AuthenticationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthenticationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "password" => Ok(AuthenticationType::Password),
            "token" => Ok(AuthenticationType::Token),
            "" => Err(Error::MissingAuthenticationType),
            other => Err(Error::InvalidAuthenticationType(other.to_string())),
        }
    }
}

/// Parameters of the GitHub provider for the pull requests build feature.
///
/// The authentication type is kept as its wire string so options received from
/// the server, or assembled by hand, can carry values that feature construction
/// will reject.
///
/// # Examples
///
/// ```rust
/// use teamcity_client::{FeatureOptions, PullRequestsGithubOptions};
///
/// let options = PullRequestsGithubOptions::new_password("octocat", "hunter2", "MEMBER");
/// let props = options.properties();
///
/// assert_eq!(props.get("authenticationType"), Some("password"));
/// assert_eq!(props.get("username"), Some("octocat"));
/// assert_eq!(props.get("secure:password"), Some("hunter2"));
/// assert_eq!(props.get("secure:accessToken"), None);
/// ```
#[derive(Clone, Debug)]
pub struct PullRequestsGithubOptions {
    /// Either `password` or `token`
    pub authentication_type: String,

    /// Required when authenticating with `password`
    pub username: String,

    /// Required when authenticating with `password`
    pub password: SecretString,

    /// Required when authenticating with `token`
    pub access_token: SecretString,

    /// Only pull requests from authors with this role are monitored
    pub filter_author_role: String,

    /// Source branch filter rules
    ///
    /// Sent to the server as a single newline-separated value, the server's own
    /// rule separator; a rule containing `\n` reads back as several rules.
    pub filter_source_branch: Vec<String>,

    /// Target branch filter rules, encoded like `filter_source_branch`
    pub filter_target_branch: Vec<String>,

    /// GitHub API URL; empty means github.com
    pub server_url: String,
}

impl PullRequestsGithubOptions {
    /// Options authenticating with a username and password.
    ///
    /// No validation is performed here; it happens when the feature is built.
    pub fn new_password(
        username: impl Into<String>,
        password: impl Into<String>,
        filter_author_role: impl Into<String>,
    ) -> Self {
        Self {
            authentication_type: AuthenticationType::Password.to_string(),
            username: username.into(),
            password: SecretString::from(password.into()),
            ..Self::blank(filter_author_role.into())
        }
    }

    /// Options authenticating with a personal access token.
    ///
    /// No validation is performed here; it happens when the feature is built.
    pub fn new_token(
        access_token: impl Into<String>,
        filter_author_role: impl Into<String>,
    ) -> Self {
        Self {
            authentication_type: AuthenticationType::Token.to_string(),
            access_token: SecretString::from(access_token.into()),
            ..Self::blank(filter_author_role.into())
        }
    }

    fn blank(filter_author_role: String) -> Self {
        Self {
            authentication_type: String::new(),
            username: String::new(),
            password: SecretString::from(String::new()),
            access_token: SecretString::from(String::new()),
            filter_author_role,
            filter_source_branch: Vec::new(),
            filter_target_branch: Vec::new(),
            server_url: String::new(),
        }
    }

    /// Point the feature at a GitHub Enterprise API URL.
    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = server_url.into();
        self
    }

    /// Check that the credentials required by the authentication type are present.
    ///
    /// # Errors
    ///
    /// - `Error::MissingAuthenticationType` if no authentication type is set
    /// - `Error::InvalidAuthenticationType` if it is neither `password` nor `token`
    /// - `Error::MissingCredentials` if `password` is selected without username and password
    /// - `Error::MissingAccessToken` if `token` is selected without an access token
    pub fn validate(&self) -> Result<AuthenticationType, Error> {
        let auth_type = self
            .authentication_type
            .parse::<AuthenticationType>()
            .inspect_err(|e| {
                warn!(
                    authentication_type = %self.authentication_type,
                    error = %e,
                    "Rejected pull request options"
                )
            })?;

        match auth_type {
            AuthenticationType::Password
                if self.username.is_empty() || self.password.expose_secret().is_empty() =>
            {
                warn!("Rejected pull request options: username or password is empty");
                Err(Error::MissingCredentials)
            }
            AuthenticationType::Token if self.access_token.expose_secret().is_empty() => {
                warn!("Rejected pull request options: access token is empty");
                Err(Error::MissingAccessToken)
            }
            _ => Ok(auth_type),
        }
    }

    /// Rebuild options from a property bag received from the server.
    ///
    /// The username is recovered for `password` authentication. Password and
    /// access token are never recovered: the server does not return `secure:`
    /// values, so they are always empty in the result.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingProperty` if the bag has no `authenticationType`.
    pub fn from_properties(props: &Properties) -> Result<Self, Error> {
        let auth_type = props
            .get(AUTHENTICATION_TYPE_KEY)
            .ok_or_else(|| Error::MissingProperty(AUTHENTICATION_TYPE_KEY.to_string()))?;

        let mut out = Self::blank(String::new());
        out.authentication_type = auth_type.to_string();

        if auth_type == AuthenticationType::Password.as_str() {
            out.username = props.get(USERNAME_KEY).unwrap_or_default().to_string();
        }

        if let Some(role) = props.get(FILTER_AUTHOR_ROLE_KEY) {
            out.filter_author_role = role.to_string();
        }
        if let Some(url) = props.get(SERVER_URL_KEY) {
            out.server_url = url.to_string();
        }
        out.filter_source_branch = split_rules(props.get(FILTER_SOURCE_BRANCH_KEY));
        out.filter_target_branch = split_rules(props.get(FILTER_TARGET_BRANCH_KEY));

        Ok(out)
    }
}

impl FeatureOptions for PullRequestsGithubOptions {
    fn properties(&self) -> Properties {
        let mut props = Properties::empty();

        props.add_or_replace_value(PROVIDER_TYPE_KEY, GITHUB_PROVIDER_TYPE);
        props.add_or_replace_value(AUTHENTICATION_TYPE_KEY, self.authentication_type.as_str());
        props.add_or_replace_value(FILTER_AUTHOR_ROLE_KEY, self.filter_author_role.as_str());

        if !self.server_url.is_empty() {
            props.add_or_replace_value(SERVER_URL_KEY, self.server_url.as_str());
        }

        match self.authentication_type.parse::<AuthenticationType>() {
            Ok(AuthenticationType::Password) => {
                props.add_or_replace_value(USERNAME_KEY, self.username.as_str());
                props.add_or_replace_value(PASSWORD_KEY, self.password.expose_secret());
            }
            Ok(AuthenticationType::Token) => {
                props.add_or_replace_value(ACCESS_TOKEN_KEY, self.access_token.expose_secret());
            }
            Err(_) => {}
        }

        if !self.filter_source_branch.is_empty() {
            props.add_or_replace_value(
                FILTER_SOURCE_BRANCH_KEY,
                self.filter_source_branch.join("\n"),
            );
        }
        if !self.filter_target_branch.is_empty() {
            props.add_or_replace_value(
                FILTER_TARGET_BRANCH_KEY,
                self.filter_target_branch.join("\n"),
            );
        }

        props
    }
}

/// Split a newline-separated branch filter into its rules.
///
/// Rules are kept verbatim, so a list written by `properties()` reads back
/// unchanged unless a rule itself contains a line break.
fn split_rules(value: Option<&str>) -> Vec<String> {
    match value {
        Some(value) => value.split('\n').map(str::to_string).collect(),
        None => Vec::new(),
    }
}
