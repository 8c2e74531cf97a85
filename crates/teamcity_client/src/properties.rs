//! TeamCity property bag types.
//!
//! TeamCity represents the parameters of build features, VCS roots and other
//! configurable entities as an ordered list of name/value pairs. This module
//! provides that bag together with its wire representation:
//!
//! ```json
//! { "count": 2, "property": [ { "name": "a", "value": "1" }, { "name": "b", "value": "2" } ] }
//! ```
//!
//! Keys prefixed with [`SECURE_PREFIX`] are stored encrypted by the server and
//! are never returned in plaintext once set.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[cfg(test)]
#[path = "properties_tests.rs"]
mod tests;

/// Prefix marking a property the server stores encrypted.
pub const SECURE_PREFIX: &str = "secure:";

/// A single name/value pair in a [`Properties`] bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Property key
    pub name: String,

    /// Property value
    #[serde(default)]
    pub value: String,
}

impl Property {
    /// Create a new property.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Whether the server stores this property encrypted.
    pub fn is_secure(&self) -> bool {
        self.name.starts_with(SECURE_PREFIX)
    }
}

/// Ordered collection of uniquely-named properties.
///
/// Insertion order is preserved and names are unique: adding a property whose
/// name already exists replaces the value in place.
///
/// # Examples
///
/// ```rust
/// use teamcity_client::{Properties, Property};
///
/// let mut props = Properties::new(vec![
///     Property::new("providerType", "github"),
///     Property::new("authenticationType", "token"),
/// ]);
///
/// props.add_or_replace_value("authenticationType", "password");
///
/// assert_eq!(props.len(), 2);
/// assert_eq!(props.get("authenticationType"), Some("password"));
/// assert_eq!(props.get("username"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    items: Vec<Property>,
}

impl Properties {
    /// Create a bag from a sequence of properties.
    ///
    /// Later items with a duplicate name replace the value of the earlier one.
    pub fn new(items: impl IntoIterator<Item = Property>) -> Self {
        let mut props = Self::empty();
        for item in items {
            props.add_or_replace_value(item.name, item.value);
        }
        props
    }

    /// Create an empty bag.
    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    /// Look up the value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// Whether a property named `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|p| p.name == name)
    }

    /// Set `name` to `value`, replacing the existing value if the name is present.
    pub fn add_or_replace_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.items.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.value = value,
            None => self.items.push(Property { name, value }),
        }
    }

    /// Remove the property named `name`, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.items.iter().position(|p| p.name == name)?;
        Some(self.items.remove(index).value)
    }

    /// The properties in insertion order.
    pub fn items(&self) -> &[Property] {
        &self.items
    }

    /// Consume the bag, returning its properties in insertion order.
    pub fn into_items(self) -> Vec<Property> {
        self.items
    }

    /// Iterate over the properties in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.items.iter()
    }

    /// Number of properties in the bag.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the bag has no properties.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Properties {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<Property> for Properties {
    fn from_iter<T: IntoIterator<Item = Property>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// Wire shape of [`Properties`].
///
/// The server sends `count` alongside the list but it is derived data, so it is
/// recomputed on encode and ignored on decode.
#[derive(Serialize, Deserialize)]
struct PropertiesJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    count: Option<usize>,

    #[serde(rename = "property", default, skip_serializing_if = "Vec::is_empty")]
    items: Vec<Property>,
}

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = PropertiesJson {
            count: (!self.items.is_empty()).then_some(self.items.len()),
            items: self.items.clone(),
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = PropertiesJson::deserialize(deserializer)?;
        Ok(Self::new(wire.items))
    }
}
