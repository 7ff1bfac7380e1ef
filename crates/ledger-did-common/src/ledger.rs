//! DID records as stored on the ledger
//!
//! These mirror the JSON the ledger node returns for a DID Document query. They are
//! input only; see [`crate::convert`] for turning them into a [`crate::Document`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct LedgerDidDoc {
    pub id: String,
    pub controller: Vec<String>,
    pub verification_method: Vec<LedgerVerificationMethod>,
    pub authentication: Vec<LedgerVerificationRelationship>,
    pub assertion_method: Vec<LedgerVerificationRelationship>,
    pub capability_invocation: Vec<LedgerVerificationRelationship>,
    pub capability_delegation: Vec<LedgerVerificationRelationship>,
    pub key_agreement: Vec<LedgerVerificationRelationship>,
    pub service: Vec<LedgerService>,
    pub also_known_as: Vec<String>,
}

/// Key record: the material is opaque until the type tag says how to read it
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct LedgerVerificationMethod {
    pub id: String,
    pub verification_method_type: String,
    pub controller: String,
    pub verification_material: String,
}

/// Either a reference to a method defined elsewhere or an embedded key record.
/// A non-empty `verification_method_id` always wins.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct LedgerVerificationRelationship {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_method_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_method: Option<LedgerVerificationMethod>,
}

impl LedgerVerificationRelationship {
    pub fn reference(id: impl Into<String>) -> Self {
        Self {
            verification_method_id: Some(id.into()),
            verification_method: None,
        }
    }

    pub fn embedded(vm: LedgerVerificationMethod) -> Self {
        Self {
            verification_method_id: None,
            verification_method: Some(vm),
        }
    }

    /// The reference id, if one is set and non-empty
    pub fn reference_id(&self) -> Option<&str> {
        self.verification_method_id
            .as_deref()
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct LedgerService {
    pub id: String,
    pub service_type: String,
    pub service_endpoint: Vec<String>,
    pub accept: Vec<String>,
    pub routing_keys: Vec<String>,
}
