//! Normalizer configuration.

use crate::inspect::PRIMITIVE_PROPERTY_PREFERENCE;
use resdoc_canonical::{TypeName, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid configuration JSON.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value failed validation.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
    /// A `key=value` mapping could not be read.
    #[error("invalid mapping `{0}`, expected NAME=TYPE")]
    Mapping(String),
}

/// Maps relationship/included property names to their canonical type.
///
/// Keys are relationship names as they appear after serialization (`author`,
/// `comments`); values are canonical type names (`user`, `comment`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipTypeMap(BTreeMap<String, TypeName>);

impl RelationshipTypeMap {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mapping.
    pub fn insert(&mut self, name: impl Into<String>, resource_type: impl Into<TypeName>) {
        self.0.insert(name.into(), resource_type.into());
    }

    /// Mapped type for a name.
    pub fn get(&self, name: &str) -> Option<&TypeName> {
        self.0.get(name)
    }

    /// True when there are no mappings.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parses a `name=type` pair.
    pub fn parse_entry(entry: &str) -> Result<(String, TypeName), ConfigError> {
        let (name, resource_type) = entry
            .split_once('=')
            .ok_or_else(|| ConfigError::Mapping(entry.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ConfigError::Mapping(entry.to_string()));
        }
        Ok((name.to_string(), TypeName::parse(resource_type.trim())?))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        for resource_type in self.0.values() {
            TypeName::parse(resource_type.as_str())?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<TypeName>> FromIterator<(K, V)> for RelationshipTypeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, resource_type)| (name.into(), resource_type.into()))
                .collect(),
        )
    }
}

impl Extend<(String, TypeName)> for RelationshipTypeMap {
    fn extend<I: IntoIterator<Item = (String, TypeName)>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

fn default_preference() -> Vec<String> {
    PRIMITIVE_PROPERTY_PREFERENCE
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Settings shared by every normalization pass of a `Normalizer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Type corrections for relationships and included resources.
    #[serde(default)]
    pub relationship_types: RelationshipTypeMap,
    /// Overrides the request URL as the base of relationship links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Field names tried, in order, when storing coerced primitives.
    #[serde(default = "default_preference")]
    pub primitive_property_preference: Vec<String>,
    /// Extra `singular → plural` pairs for the inflector.
    #[serde(default)]
    pub irregular_inflections: BTreeMap<String, String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            relationship_types: RelationshipTypeMap::default(),
            base_url: None,
            primitive_property_preference: default_preference(),
            irregular_inflections: BTreeMap::new(),
        }
    }
}

impl NormalizerConfig {
    /// Parses and validates configuration JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads configuration from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Checks mapped type names and the property preference list.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.relationship_types.validate()?;
        if let Some(empty) = self
            .primitive_property_preference
            .iter()
            .find(|name| name.trim().is_empty())
        {
            return Err(ValidationError::PatternMismatch {
                field: "primitive_property_preference",
                value: empty.clone(),
            });
        }
        Ok(())
    }
}
