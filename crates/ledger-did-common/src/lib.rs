/*!
*   DID Document Definition
*
*   Ledger records arrive in the node's own shape (see [`ledger`]) and are
*   converted into a W3C [`Document`] by the [`convert::DocumentConverter`].
*/

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    service::Service,
    verification_method::{VerificationMethod, VerificationRelationship},
};

pub mod context;
pub mod convert;
pub mod ledger;
pub mod service;
pub mod verification_method;

pub use context::{ContextSet, Contextual};
pub use convert::{ConversionOptions, DocumentConverter, UnknownKeyTypePolicy};
pub use verification_method::{PublicKey, VerificationMethodType};

/// Errors raised while converting a ledger record into a [`Document`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// Verification material for a JWK suite is not valid JSON
    #[error("Malformed key material in verification method ({id}): {reason}")]
    MalformedKeyMaterial { id: String, reason: String },

    /// Verification method type is outside the registered suites
    #[error("Unsupported key type ({type_}) in verification method ({id})")]
    UnsupportedKeyType { id: String, type_: String },

    /// Relationship entry carries neither a reference nor an embedded method
    #[error("Verification relationship entry ({index}) has no reference and no embedded method")]
    EmptyRelationship { index: usize },
}

/// A [DID Document]
///
/// [DID Document]: https://www.w3.org/TR/did-core/
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(rename = "@context")]
    #[serde(skip_serializing_if = "ContextSet::is_empty", default)]
    pub context: ContextSet,

    /// DID Subject Identifier
    /// <https://www.w3.org/TR/did-core/#did-subject>
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub id: String,

    /// https://www.w3.org/TR/did-core/#did-controller
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub controller: Vec<String>,

    /// https://www.w3.org/TR/did-core/#verification-methods
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub verification_method: Vec<VerificationMethod>,

    /// https://www.w3.org/TR/did-core/#authentication
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub authentication: Option<Vec<VerificationRelationship>>,

    /// https://www.w3.org/TR/did-core/#assertion
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub assertion_method: Option<Vec<VerificationRelationship>>,

    /// https://www.w3.org/TR/did-core/#capability-invocation
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub capability_invocation: Option<Vec<VerificationRelationship>>,

    /// https://www.w3.org/TR/did-core/#capability-delegation
    ///
    /// Emitted under the key the ledger resolver has always used.
    #[serde(rename = "capability_delegation", alias = "capabilityDelegation")]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub capability_delegation: Option<Vec<VerificationRelationship>>,

    /// https://www.w3.org/TR/did-core/#key-agreement
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub key_agreement: Option<Vec<VerificationRelationship>>,

    /// Set of Services
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub service: Vec<Service>,

    /// https://www.w3.org/TR/did-core/#also-known-as
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub also_known_as: Vec<String>,
}

impl Contextual for Document {
    fn context(&self) -> &ContextSet {
        &self.context
    }

    fn context_mut(&mut self) -> &mut ContextSet {
        &mut self.context
    }
}

impl Document {
    /// Returns the verification method with the given full id, if defined in this document
    pub fn verification_method_by_id(&self, id: &str) -> Option<&VerificationMethod> {
        self.verification_method.iter().find(|vm| vm.id == id)
    }

    /// Returns a reference to the first service with the given id, if it exists
    /// id: the fragment text after the `#` in the full service id
    pub fn find_service(&self, id: &str) -> Option<&Service> {
        let suffix = ["#", id].concat();
        self.service.iter().find(|s| s.id.ends_with(&suffix))
    }

    /// Iterates over every relationship field that is present, paired with its JSON name
    pub fn relationships(&self) -> impl Iterator<Item = (&'static str, &[VerificationRelationship])> {
        [
            ("authentication", &self.authentication),
            ("assertionMethod", &self.assertion_method),
            ("capabilityInvocation", &self.capability_invocation),
            ("capability_delegation", &self.capability_delegation),
            ("keyAgreement", &self.key_agreement),
        ]
        .into_iter()
        .filter_map(|(name, rel)| rel.as_deref().map(|rel| (name, rel)))
    }
}
