use crate::identifiers::{ResourceId, TypeName};
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Reference to a resource by type and id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    /// Resource type.
    #[serde(rename = "type")]
    pub resource_type: TypeName,
    /// Resource id.
    pub id: ResourceId,
}

impl ResourceIdentifier {
    /// Creates an identifier from its parts.
    pub fn new(resource_type: impl Into<TypeName>, id: impl Into<ResourceId>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    fn key(&self) -> String {
        format!("{}/{}", self.resource_type, self.id)
    }
}

/// Relationship linkage: empty to-one, to-one, or to-many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Linkage {
    /// An absent to-one relationship (`null`).
    Null,
    /// A to-one relationship.
    One(ResourceIdentifier),
    /// A to-many relationship.
    Many(Vec<ResourceIdentifier>),
}

impl Linkage {
    /// Iterates over every identifier in the linkage.
    pub fn identifiers(&self) -> Box<dyn Iterator<Item = &ResourceIdentifier> + '_> {
        match self {
            Linkage::Null => Box::new(std::iter::empty()),
            Linkage::One(identifier) => Box::new(std::iter::once(identifier)),
            Linkage::Many(identifiers) => Box::new(identifiers.iter()),
        }
    }

    /// Mutable counterpart of [`Linkage::identifiers`].
    pub fn identifiers_mut(&mut self) -> Box<dyn Iterator<Item = &mut ResourceIdentifier> + '_> {
        match self {
            Linkage::Null => Box::new(std::iter::empty()),
            Linkage::One(identifier) => Box::new(std::iter::once(identifier)),
            Linkage::Many(identifiers) => Box::new(identifiers.iter_mut()),
        }
    }
}

/// Navigation links attached to a relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipLinks {
    /// URL of the relationship itself.
    #[serde(rename = "self")]
    pub self_link: String,
    /// URL of the related resource(s).
    pub related: String,
}

/// One named relationship of a resource object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Linkage data.
    pub data: Linkage,
    /// Optional navigation links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<RelationshipLinks>,
}

impl Relationship {
    /// Creates a relationship without links.
    pub fn new(data: Linkage) -> Self {
        Self { data, links: None }
    }
}

/// Relationships keyed by relationship name.
pub type Relationships = BTreeMap<String, Relationship>;

/// A typed, identified resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject {
    /// Resource type.
    #[serde(rename = "type")]
    pub resource_type: TypeName,
    /// Resource id.
    pub id: ResourceId,
    /// Plain fields.
    #[serde(default)]
    pub attributes: Map<String, Value>,
    /// Relationships, present only for types that declare them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Relationships>,
}

impl ResourceObject {
    /// Identifier of this resource.
    pub fn identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier {
            resource_type: self.resource_type.clone(),
            id: self.id.clone(),
        }
    }
}

/// Primary data of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    /// A single resource.
    One(Box<ResourceObject>),
    /// An ordered collection of resources.
    Many(Vec<ResourceObject>),
}

impl PrimaryData {
    /// Iterates over every primary resource.
    pub fn resources(&self) -> Box<dyn Iterator<Item = &ResourceObject> + '_> {
        match self {
            PrimaryData::One(resource) => Box::new(std::iter::once(&**resource)),
            PrimaryData::Many(resources) => Box::new(resources.iter()),
        }
    }

    /// Returns the single resource, if this is not a collection.
    pub fn as_one(&self) -> Option<&ResourceObject> {
        match self {
            PrimaryData::One(resource) => Some(&**resource),
            PrimaryData::Many(_) => None,
        }
    }

    /// Returns the collection, if this is one.
    pub fn as_many(&self) -> Option<&[ResourceObject]> {
        match self {
            PrimaryData::One(_) => None,
            PrimaryData::Many(resources) => Some(resources),
        }
    }
}

/// Canonical document: primary data plus side-loaded resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Primary data.
    pub data: PrimaryData,
    /// Side-loaded related resources. `None` rather than an empty list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<ResourceObject>>,
}

impl Document {
    /// Document with a single primary resource.
    pub fn single(resource: ResourceObject, included: Option<Vec<ResourceObject>>) -> Self {
        Self {
            data: PrimaryData::One(Box::new(resource)),
            included,
        }
    }

    /// Document with a collection as primary data.
    pub fn collection(resources: Vec<ResourceObject>, included: Option<Vec<ResourceObject>>) -> Self {
        Self {
            data: PrimaryData::Many(resources),
            included,
        }
    }

    /// Included resources, or an empty slice.
    pub fn included(&self) -> &[ResourceObject] {
        self.included.as_deref().unwrap_or(&[])
    }

    /// Checks document invariants.
    ///
    /// Type and id are validated against their patterns for every resource. A
    /// linkage is dangling when it targets a type that appears among the
    /// included resources but not with that id; linkages to types that are
    /// never side-loaded are resolvable by reference and accepted.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let resources: Vec<&ResourceObject> =
            self.data.resources().chain(self.included().iter()).collect();

        for resource in &resources {
            if let Err(err) = TypeName::parse(resource.resource_type.as_str()) {
                errors.push(err);
            }
            if let Err(err) = ResourceId::parse(resource.id.as_str()) {
                errors.push(err);
            }
        }

        let present: BTreeSet<ResourceIdentifier> =
            resources.iter().map(|r| r.identifier()).collect();
        let included_types: BTreeSet<&TypeName> =
            self.included().iter().map(|r| &r.resource_type).collect();

        for resource in &resources {
            let Some(relationships) = &resource.relationships else {
                continue;
            };
            for (name, relationship) in relationships {
                for target in relationship.data.identifiers() {
                    if included_types.contains(&target.resource_type) && !present.contains(target) {
                        errors.push(ValidationError::DanglingLinkage {
                            owner: resource.identifier().key(),
                            relationship: name.clone(),
                            target: target.key(),
                        });
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
