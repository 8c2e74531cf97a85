//! Shared build feature types.
//!
//! Every build feature is exchanged with the TeamCity server using the same JSON
//! envelope, [`BuildFeatureJson`]. The concrete feature wrappers implement
//! [`BuildFeature`] and own a typed options value implementing [`FeatureOptions`].

use serde::{Deserialize, Deserializer, Serialize};

use crate::Properties;

#[cfg(test)]
#[path = "build_feature_tests.rs"]
mod tests;

/// Property key carrying the VCS root a feature is scoped to.
pub const VCS_ROOT_ID_KEY: &str = "vcsRootId";

/// JSON envelope for a build feature as represented by the TeamCity REST API.
///
/// This is a passive structural type; the feature wrappers decide what goes in
/// it when encoding and how to interpret it when decoding.
///
/// # Examples
///
/// ```rust
/// use teamcity_client::BuildFeatureJson;
///
/// let envelope: BuildFeatureJson = serde_json::from_str(
///     r#"{"id": "BUILD_EXT_1", "type": "pullRequests", "properties": {}}"#,
/// )?;
///
/// assert_eq!(envelope.id, "BUILD_EXT_1");
/// assert_eq!(envelope.disabled, None);
/// assert!(!envelope.inherited);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildFeatureJson {
    /// Feature instance identifier (empty for creation)
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub id: String,

    /// Whether the feature is disabled; absent means enabled
    #[serde(default)]
    pub disabled: Option<bool>,

    /// Feature parameters
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: Properties,

    /// Whether the feature is inherited from a template
    #[serde(default, deserialize_with = "null_as_default")]
    pub inherited: bool,

    /// Feature kind discriminator, e.g. `pullRequests`
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub feature_type: String,
}

/// Capability shared by all build feature option types: flattening into the
/// generic property bag sent to the server.
pub trait FeatureOptions {
    /// Produce the property bag representing these options.
    ///
    /// This mapping is total; it never fails.
    fn properties(&self) -> Properties;
}

/// Common accessors of a build feature attached to a build configuration.
///
/// This is the seam a registry dispatching on the `type` discriminator works
/// against.
pub trait BuildFeature {
    /// Feature instance identifier.
    fn id(&self) -> &str;

    /// Set the feature instance identifier.
    fn set_id(&mut self, value: String);

    /// Constant discriminator identifying the feature kind to the server.
    fn feature_type(&self) -> &'static str;

    /// VCS root the feature is scoped to, `None` when it applies to all roots.
    fn vcs_root_id(&self) -> Option<&str>;

    /// Scope the feature to a VCS root. An empty value clears the scope.
    fn set_vcs_root_id(&mut self, value: String);

    /// Whether the feature is disabled.
    fn disabled(&self) -> bool;

    /// Enable or disable the feature.
    fn set_disabled(&mut self, value: bool);

    /// Build configuration owning this feature.
    fn build_type_id(&self) -> &str;

    /// Set the build configuration owning this feature.
    fn set_build_type_id(&mut self, value: String);

    /// Flattened parameters of the feature, excluding the VCS root scope.
    ///
    /// The scope is only written as `vcsRootId` when the feature is serialized.
    /// Decoding moves a received `vcsRootId` out of the bag into
    /// [`BuildFeature::vcs_root_id`], so it never appears here.
    fn properties(&self) -> &Properties;
}

/// Decode a JSON `null` the same way as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Build the envelope for a feature about to be sent to the server.
///
/// The VCS root scope is written into a copy of `properties`; the caller's bag
/// is left untouched so repeated encoding produces identical output.
pub(crate) fn encode_envelope(
    id: &str,
    disabled: bool,
    properties: &Properties,
    vcs_root_id: Option<&str>,
    feature_type: &str,
) -> BuildFeatureJson {
    let mut properties = properties.clone();
    if let Some(vcs_root_id) = vcs_root_id {
        properties.add_or_replace_value(VCS_ROOT_ID_KEY, vcs_root_id);
    }

    BuildFeatureJson {
        id: id.to_string(),
        disabled: Some(disabled),
        properties,
        inherited: false,
        feature_type: feature_type.to_string(),
    }
}

/// Normalise an optional VCS root scope: empty means "all VCS roots".
pub(crate) fn vcs_root_scope(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
