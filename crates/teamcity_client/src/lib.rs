//! Typed client-side model for TeamCity build features.
//!
//! This crate provides strongly-typed configuration for a subset of TeamCity's
//! build features (pull-request integration and SSH agent key injection), the
//! mapping between that configuration and the generic property bag used on the
//! wire, and the JSON envelope the REST API expects for build features.
//!
//! The HTTP transport used to talk to the server is not part of this crate.
//!
//! # Examples
//!
//! ```rust
//! use teamcity_client::{BuildFeature, FeaturePullRequests, PullRequestsGithubOptions};
//!
//! let options = PullRequestsGithubOptions::new_token("ghp_abc123", "ANY");
//! let feature = FeaturePullRequests::new_github(options, "vcs1")?;
//!
//! assert_eq!(feature.feature_type(), "pullRequests");
//! assert_eq!(feature.vcs_root_id(), Some("vcs1"));
//!
//! let json = serde_json::to_string(&feature)?;
//! assert!(json.contains("\"vcsRootId\""));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod errors;
pub use errors::Error;

pub mod build_feature;
pub use build_feature::{BuildFeature, BuildFeatureJson, FeatureOptions};

pub mod properties;
pub use properties::{Properties, Property};

pub mod pull_requests_github_options;
pub use pull_requests_github_options::{AuthenticationType, PullRequestsGithubOptions};

pub mod ssh_agent_options;
pub use ssh_agent_options::SshAgentOptions;

pub mod feature_pull_requests;
pub use feature_pull_requests::{FeaturePullRequests, PullRequestsOptions};

pub mod feature_ssh_agent;
pub use feature_ssh_agent::FeatureSshAgent;
