// SPDX-License-Identifier: MIT OR Apache-2.0
//! Registry of node and bridge variants.
//!
//! Concrete kinds are registered explicitly up front. Tools list them from
//! here when offering "Add ..." actions.

use crate::error::{Result, WebError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default variant id for nodes
pub const DEFAULT_NODE_VARIANT: &str = "poi_node";

/// Default variant id for bridges
pub const DEFAULT_BRIDGE_VARIANT: &str = "junction";

/// What a variant creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariantKind {
    /// Leaf node
    Node,
    /// Junction bridge
    Bridge,
}

/// Variant definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Unique variant identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Description
    pub description: String,
    /// Kind of vertex
    pub kind: VariantKind,
}

impl Variant {
    /// Create a variant definition
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: VariantKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            kind,
        }
    }
}

/// Registry of available variants
#[derive(Debug, Clone, Default)]
pub struct VariantRegistry {
    variants: IndexMap<String, Variant>,
}

impl VariantRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in variants
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        registry.register(Variant::new(
            DEFAULT_NODE_VARIANT,
            "Point Of Interest Node",
            VariantKind::Node,
            "Stop bound to a single point of interest",
        ));
        registry.register(Variant::new(
            "waypoint",
            "Waypoint",
            VariantKind::Node,
            "Intermediate stop, usually left unassigned",
        ));
        registry.register(Variant::new(
            DEFAULT_BRIDGE_VARIANT,
            "Junction",
            VariantKind::Bridge,
            "Plain junction fanning out to nearby stops",
        ));
        registry.register(Variant::new(
            "portal",
            "Portal",
            VariantKind::Bridge,
            "Junction joining stops that are far apart in the world",
        ));

        registry
    }

    /// Register a variant, replacing any previous one with the same id
    pub fn register(&mut self, variant: Variant) {
        self.variants.insert(variant.id.clone(), variant);
    }

    /// Get a variant by ID
    pub fn get(&self, id: &str) -> Option<&Variant> {
        self.variants.get(id)
    }

    /// Get all registered variants
    pub fn variants(&self) -> impl Iterator<Item = &Variant> {
        self.variants.values()
    }

    /// Get variants of one kind
    pub fn variants_of(&self, kind: VariantKind) -> impl Iterator<Item = &Variant> {
        self.variants.values().filter(move |v| v.kind == kind)
    }

    /// Resolve a variant id, checking its kind
    pub fn resolve(&self, id: &str, kind: VariantKind) -> Result<&Variant> {
        self.get(id)
            .filter(|v| v.kind == kind)
            .ok_or_else(|| WebError::UnknownVariant {
                id: id.to_string(),
                kind,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_defaults() {
        let registry = VariantRegistry::builtin();
        assert!(registry.resolve(DEFAULT_NODE_VARIANT, VariantKind::Node).is_ok());
        assert!(registry.resolve(DEFAULT_BRIDGE_VARIANT, VariantKind::Bridge).is_ok());
        assert_eq!(registry.variants_of(VariantKind::Node).count(), 2);
        assert_eq!(registry.variants_of(VariantKind::Bridge).count(), 2);
    }

    #[test]
    fn test_resolve_rejects_wrong_kind() {
        let registry = VariantRegistry::builtin();
        let err = registry.resolve("portal", VariantKind::Node).unwrap_err();
        assert_eq!(
            err,
            WebError::UnknownVariant {
                id: "portal".to_string(),
                kind: VariantKind::Node,
            }
        );
        assert!(registry.resolve("teleporter", VariantKind::Bridge).is_err());
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = VariantRegistry::new();
        registry.register(Variant::new("stop", "Stop", VariantKind::Node, "first"));
        registry.register(Variant::new("stop", "Stop", VariantKind::Node, "second"));
        assert_eq!(registry.variants().count(), 1);
        assert_eq!(registry.get("stop").map(|v| v.description.as_str()), Some("second"));
    }
}
