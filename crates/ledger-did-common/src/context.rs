//! JSON-LD `@context` handling
//! <https://www.w3.org/TR/did-core/#json-ld>

use serde::{Deserialize, Serialize};

/// Ordered set of JSON-LD context identifiers.
///
/// Insertion order is kept and a value that is already present is not added twice.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct ContextSet(Vec<String>);

impl ContextSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `ctx` unless it is already present.
    /// Returns `true` if the set changed.
    pub fn insert(&mut self, ctx: impl Into<String>) -> bool {
        let ctx = ctx.into();
        if self.contains(&ctx) {
            false
        } else {
            self.0.push(ctx);
            true
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn contains(&self, ctx: &str) -> bool {
        self.0.iter().any(|c| c == ctx)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for ContextSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = ContextSet::new();
        for ctx in iter {
            set.insert(ctx);
        }
        set
    }
}

/// Anything that carries its own `@context`.
///
/// Documents, services and verification methods all share the same add/clear rules,
/// implementors only expose where their [`ContextSet`] lives.
pub trait Contextual {
    fn context(&self) -> &ContextSet;

    fn context_mut(&mut self) -> &mut ContextSet;

    /// Add a context identifier, ignoring duplicates
    fn add_context(&mut self, ctx: &str) -> bool {
        self.context_mut().insert(ctx)
    }

    /// Drop every context; the `@context` field is then omitted on output
    fn remove_context(&mut self) {
        self.context_mut().clear();
    }

    fn contexts(&self) -> &[String] {
        self.context().as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Document, service::Service, verification_method::VerificationMethod};

    const DID_V1: &str = "https://www.w3.org/ns/did/v1";
    const ED25519_2020: &str = "https://w3id.org/security/suites/ed25519-2020/v1";

    #[test]
    fn insert_is_idempotent_and_ordered() {
        let mut set = ContextSet::new();
        assert!(set.insert(DID_V1));
        assert!(set.insert(ED25519_2020));
        assert!(!set.insert(DID_V1));
        assert_eq!(set.as_slice(), [DID_V1, ED25519_2020]);
    }

    #[test]
    fn from_iter_deduplicates() {
        let set: ContextSet = [DID_V1, ED25519_2020, DID_V1].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![DID_V1, ED25519_2020]);
    }

    #[test]
    fn document_add_twice_then_clear() {
        let mut doc = Document {
            id: "did:example:1".to_string(),
            ..Default::default()
        };
        doc.add_context(DID_V1);
        doc.add_context(DID_V1);
        assert_eq!(doc.contexts(), [DID_V1]);

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["@context"], serde_json::json!([DID_V1]));

        doc.remove_context();
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("@context").is_none());
    }

    #[test]
    fn same_contract_for_service_and_method() {
        let mut service = Service::default();
        let mut vm = VerificationMethod::default();

        // One generic helper drives every owner type
        fn tag<T: Contextual>(owner: &mut T) {
            owner.add_context(DID_V1);
            owner.add_context(DID_V1);
        }
        tag(&mut service);
        tag(&mut vm);

        assert_eq!(service.contexts(), [DID_V1]);
        assert_eq!(vm.contexts(), [DID_V1]);

        service.remove_context();
        vm.remove_context();
        assert!(service.context().is_empty());
        assert!(vm.context().is_empty());
    }
}
