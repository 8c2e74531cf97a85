//! SSH agent build feature.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, warn};

use crate::build_feature::{encode_envelope, vcs_root_scope, VCS_ROOT_ID_KEY};
use crate::{BuildFeature, BuildFeatureJson, Error, FeatureOptions, Properties, SshAgentOptions};

#[cfg(test)]
#[path = "feature_ssh_agent_tests.rs"]
mod tests;

/// Type discriminator of the SSH agent build feature.
pub const SSH_AGENT_FEATURE_TYPE: &str = "ssh-agent-build-feature";

/// SSH agent build feature attached to a build configuration.
///
/// # Examples
///
/// ```rust
/// use teamcity_client::{BuildFeature, FeatureSshAgent, SshAgentOptions};
///
/// let feature = FeatureSshAgent::new(SshAgentOptions::new("deploy-key"));
///
/// assert_eq!(feature.feature_type(), "ssh-agent-build-feature");
/// assert_eq!(feature.properties().get("teamcitySshKey"), Some("deploy-key"));
/// ```
#[derive(Clone, Debug)]
pub struct FeatureSshAgent {
    id: String,
    vcs_root_id: Option<String>,
    disabled: bool,
    build_type_id: String,
    options: SshAgentOptions,
    properties: Properties,
}

impl FeatureSshAgent {
    /// Build an SSH agent feature. The options need no validation.
    pub fn new(options: SshAgentOptions) -> Self {
        debug!(ssh_key = %options.ssh_key, "Created SSH agent feature");
        Self {
            id: String::new(),
            vcs_root_id: None,
            disabled: false,
            build_type_id: String::new(),
            properties: options.properties(),
            options,
        }
    }

    /// Typed options.
    pub fn options(&self) -> &SshAgentOptions {
        &self.options
    }
}

impl BuildFeature for FeatureSshAgent {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, value: String) {
        self.id = value;
    }

    fn feature_type(&self) -> &'static str {
        SSH_AGENT_FEATURE_TYPE
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

impl Serialize for FeatureSshAgent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode_envelope(
            &self.id,
            self.disabled,
            &self.properties,
            self.vcs_root_id.as_deref(),
            SSH_AGENT_FEATURE_TYPE,
        )
        .serialize(serializer)
    }
}

impl TryFrom<BuildFeatureJson> for FeatureSshAgent {
    type Error = Error;

    fn try_from(envelope: BuildFeatureJson) -> Result<Self, Self::Error> {
        if envelope.feature_type != SSH_AGENT_FEATURE_TYPE {
            warn!(
                feature_type = %envelope.feature_type,
                "Decoding build feature of unexpected type as SSH agent"
            );
        }

        let mut properties = envelope.properties;
        let options = SshAgentOptions::from_properties(&properties)?;
        let vcs_root_id = properties
            .remove(VCS_ROOT_ID_KEY)
            .as_deref()
            .and_then(vcs_root_scope);

        debug!(id = %envelope.id, "Decoded SSH agent feature");

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

impl<'de> Deserialize<'de> for FeatureSshAgent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let envelope = BuildFeatureJson::deserialize(deserializer)?;
        Self::try_from(envelope).map_err(de::Error::custom)
    }
}
