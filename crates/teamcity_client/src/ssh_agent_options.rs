//! Options for the SSH agent build feature.

use crate::{Error, FeatureOptions, Properties};

#[cfg(test)]
#[path = "ssh_agent_options_tests.rs"]
mod tests;

const SSH_KEY_KEY: &str = "teamcitySshKey";

/// Parameters of the SSH agent build feature.
///
/// The feature loads an SSH key uploaded to the project into an SSH agent for
/// the duration of the build. The key itself never travels through this type,
/// only the name it was uploaded under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SshAgentOptions {
    /// Name of the uploaded SSH key
    pub ssh_key: String,
}

impl SshAgentOptions {
    /// Options loading the uploaded key named `ssh_key`.
    pub fn new(ssh_key: impl Into<String>) -> Self {
        Self {
            ssh_key: ssh_key.into(),
        }
    }

    /// Rebuild options from a property bag received from the server.
    ///
    /// A missing key name is tolerated and yields empty options.
    pub fn from_properties(props: &Properties) -> Result<Self, Error> {
        Ok(Self {
            ssh_key: props.get(SSH_KEY_KEY).unwrap_or_default().to_string(),
        })
    }
}

impl FeatureOptions for SshAgentOptions {
    fn properties(&self) -> Properties {
        let mut props = Properties::empty();
        props.add_or_replace_value(SSH_KEY_KEY, self.ssh_key.as_str());
        props
    }
}
