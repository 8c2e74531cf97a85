//! Pull requests build feature.
//!
//! The `pullRequests` feature makes TeamCity monitor pull requests on a VCS
//! hosting service and build their branches. This module provides the feature
//! wrapper, [`FeaturePullRequests`], and the union of provider options it can
//! carry.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, warn};

use crate::build_feature::{encode_envelope, vcs_root_scope, VCS_ROOT_ID_KEY};
use crate::pull_requests_github_options::{GITHUB_PROVIDER_TYPE, PROVIDER_TYPE_KEY};
use crate::{
    BuildFeature, BuildFeatureJson, Error, FeatureOptions, Properties, PullRequestsGithubOptions,
};

#[cfg(test)]
#[path = "feature_pull_requests_tests.rs"]
mod tests;

/// Type discriminator of the pull requests build feature.
pub const PULL_REQUESTS_FEATURE_TYPE: &str = "pullRequests";

/// Provider-specific options of the pull requests feature.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum PullRequestsOptions {
    /// GitHub provider
    Github(PullRequestsGithubOptions),
}

impl PullRequestsOptions {
    /// Rebuild provider options from a property bag received from the server.
    ///
    /// # Errors
    ///
    /// Propagates the provider's reverse-mapping error, e.g. a missing
    /// `authenticationType`.
    pub fn from_properties(props: &Properties) -> Result<Self, Error> {
        match props.get(PROVIDER_TYPE_KEY) {
            None | Some(GITHUB_PROVIDER_TYPE) => {}
            Some(other) => warn!(
                provider_type = other,
                "Unrecognised pull request provider, reading options as GitHub"
            ),
        }

        PullRequestsGithubOptions::from_properties(props).map(PullRequestsOptions::Github)
    }
}

impl FeatureOptions for PullRequestsOptions {
    fn properties(&self) -> Properties {
        match self {
            PullRequestsOptions::Github(options) => options.properties(),
        }
    }
}

impl From<PullRequestsGithubOptions> for PullRequestsOptions {
    fn from(options: PullRequestsGithubOptions) -> Self {
        PullRequestsOptions::Github(options)
    }
}

/// Pull requests build feature attached to a build configuration.
///
/// The flattened `properties` are computed from the options when the feature is
/// built or decoded. Mutating the options afterwards does not update them.
///
/// # Examples
///
/// ```rust
/// use teamcity_client::{BuildFeature, FeaturePullRequests, PullRequestsGithubOptions};
///
/// let options = PullRequestsGithubOptions::new_password("octocat", "hunter2", "MEMBER");
/// let feature = FeaturePullRequests::new_github(options, "")?;
///
/// // An empty VCS root scope applies the feature to all VCS roots
/// assert_eq!(feature.vcs_root_id(), None);
/// assert!(!feature.disabled());
/// # Ok::<(), teamcity_client::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct FeaturePullRequests {
    id: String,
    vcs_root_id: Option<String>,
    disabled: bool,
    build_type_id: String,
    options: PullRequestsOptions,
    properties: Properties,
}

impl FeaturePullRequests {
    /// Build a GitHub pull requests feature, validating the options.
    ///
    /// `vcs_root_id` is optional: an empty value applies the feature to all VCS
    /// roots of the build configuration.
    ///
    /// # Errors
    ///
    /// Returns the validation error of [`PullRequestsGithubOptions::validate`].
    pub fn new_github(
        options: PullRequestsGithubOptions,
        vcs_root_id: &str,
    ) -> Result<Self, Error> {
        let auth_type = options.validate()?;

        let feature = Self {
            id: String::new(),
            vcs_root_id: vcs_root_scope(vcs_root_id),
            disabled: false,
            build_type_id: String::new(),
            properties: options.properties(),
            options: options.into(),
        };

        debug!(
            authentication_type = %auth_type,
            vcs_root_id = ?feature.vcs_root_id,
            "Created GitHub pull requests feature"
        );
        Ok(feature)
    }

    /// Typed provider options.
    pub fn options(&self) -> &PullRequestsOptions {
        &self.options
    }
}

impl BuildFeature for FeaturePullRequests {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, value: String) {
        self.id = value;
    }

    fn feature_type(&self) -> &'static str {
        PULL_REQUESTS_FEATURE_TYPE
    }

    fn vcs_root_id(&self) -> Option<&str> {
        self.vcs_root_id.as_deref()
    }

    fn set_vcs_root_id(&mut self, value: String) {
        self.vcs_root_id = vcs_root_scope(&value);
    }

    fn disabled(&self) -> bool {
        self.disabled
    }

    fn set_disabled(&mut self, value: bool) {
        self.disabled = value;
    }

    fn build_type_id(&self) -> &str {
        &self.build_type_id
    }

    fn set_build_type_id(&mut self, value: String) {
        self.build_type_id = value;
    }

    fn properties(&self) -> &Properties {
        &self.properties
    }
}

impl Serialize for FeaturePullRequests {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode_envelope(
            &self.id,
            self.disabled,
            &self.properties,
            self.vcs_root_id.as_deref(),
            PULL_REQUESTS_FEATURE_TYPE,
        )
        .serialize(serializer)
    }
}

impl TryFrom<BuildFeatureJson> for FeaturePullRequests {
    type Error = Error;

    fn try_from(envelope: BuildFeatureJson) -> Result<Self, Self::Error> {
        if envelope.feature_type != PULL_REQUESTS_FEATURE_TYPE {
            warn!(
                feature_type = %envelope.feature_type,
                "Decoding build feature of unexpected type as pull requests"
            );
        }

        let mut properties = envelope.properties;
        let options = PullRequestsOptions::from_properties(&properties)?;
        let vcs_root_id = properties
            .remove(VCS_ROOT_ID_KEY)
            .as_deref()
            .and_then(vcs_root_scope);

        debug!(id = %envelope.id, vcs_root_id = ?vcs_root_id, "Decoded pull requests feature");

        Ok(Self {
            id: envelope.id,
            vcs_root_id,
            disabled: envelope.disabled.unwrap_or(false),
            build_type_id: String::new(),
            options,
            properties,
        })
    }
}

impl<'de> Deserialize<'de> for FeaturePullRequests {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let envelope = BuildFeatureJson::deserialize(deserializer)?;
        Self::try_from(envelope).map_err(de::Error::custom)
    }
}
