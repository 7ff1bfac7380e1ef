//! Ledger record to DID Document conversion
//!
//! Example: converting with the default (passthrough) policy:
//! ```rust
//! use ledger_did_common::{Document, ledger::LedgerDidDoc};
//!
//! let record = LedgerDidDoc {
//!     id: "did:canow:testnet:1234".to_string(),
//!     ..Default::default()
//! };
//! let doc = Document::try_from(&record).unwrap();
//! assert_eq!(doc.id, "did:canow:testnet:1234");
//! ```
//!
//! Example: rejecting unregistered key types:
//! ```rust
//! use ledger_did_common::{ConversionOptions, DocumentConverter, UnknownKeyTypePolicy};
//!
//! let converter = DocumentConverter::new(ConversionOptions {
//!     unknown_key_type: UnknownKeyTypePolicy::Reject,
//! });
//! ```

use serde_json::Value;
use tracing::{Level, event};

use crate::{
    Document, DocumentError,
    ledger::{LedgerDidDoc, LedgerService, LedgerVerificationMethod, LedgerVerificationRelationship},
    service::Service,
    verification_method::{
        PublicKey, VerificationMethod, VerificationMethodType, VerificationRelationship,
    },
};

/// What to do with a verification method whose type tag is not a registered suite
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownKeyTypePolicy {
    /// Keep id/type/controller and emit no key material
    #[default]
    Passthrough,
    /// Fail the conversion with [`DocumentError::UnsupportedKeyType`]
    Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionOptions {
    pub unknown_key_type: UnknownKeyTypePolicy,
}

/// Stateless converter; one instance can be shared across threads
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentConverter {
    options: ConversionOptions,
}

impl DocumentConverter {
    pub fn new(options: ConversionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Builds the full document. `@context` is left empty; the caller decides which
    /// contexts apply.
    pub fn convert(&self, record: &LedgerDidDoc) -> Result<Document, DocumentError> {
        event!(Level::DEBUG, "converting DID record ({})", record.id);

        let verification_method = record
            .verification_method
            .iter()
            .map(|vm| self.verification_method(vm))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Document {
            id: record.id.clone(),
            controller: record.controller.clone(),
            verification_method,
            authentication: self.relationships(&record.authentication)?,
            assertion_method: self.relationships(&record.assertion_method)?,
            capability_invocation: self.relationships(&record.capability_invocation)?,
            capability_delegation: self.relationships(&record.capability_delegation)?,
            key_agreement: self.relationships(&record.key_agreement)?,
            service: record.service.iter().map(Service::from).collect(),
            also_known_as: record.also_known_as.clone(),
            ..Default::default()
        })
    }

    /// Encodes the key material according to the method's type tag
    pub fn verification_method(
        &self,
        vm: &LedgerVerificationMethod,
    ) -> Result<VerificationMethod, DocumentError> {
        let public_key = match VerificationMethodType::from_type_tag(&vm.verification_method_type)
        {
            Some(VerificationMethodType::Ed25519VerificationKey2020) => {
                Some(PublicKey::Multibase(vm.verification_material.clone()))
            }
            Some(VerificationMethodType::Ed25519VerificationKey2018) => {
                Some(PublicKey::Base58(vm.verification_material.clone()))
            }
            Some(VerificationMethodType::JsonWebKey2020) => {
                let jwk: Value = serde_json::from_str(&vm.verification_material).map_err(|err| {
                    event!(
                        Level::WARN,
                        "verification method ({}) has malformed JWK material: {err}",
                        vm.id
                    );
                    DocumentError::MalformedKeyMaterial {
                        id: vm.id.clone(),
                        reason: err.to_string(),
                    }
                })?;
                if jwk.is_null() {
                    // JSON `null` carries no key, so the method has no material field
                    event!(
                        Level::WARN,
                        "verification method ({}) has null JWK material, emitting without key material",
                        vm.id
                    );
                    None
                } else {
                    Some(PublicKey::Jwk(jwk))
                }
            }
            None => match self.options.unknown_key_type {
                UnknownKeyTypePolicy::Passthrough => {
                    event!(
                        Level::WARN,
                        "verification method ({}) has unregistered type ({}), emitting without key material",
                        vm.id,
                        vm.verification_method_type
                    );
                    None
                }
                UnknownKeyTypePolicy::Reject => {
                    return Err(DocumentError::UnsupportedKeyType {
                        id: vm.id.clone(),
                        type_: vm.verification_method_type.clone(),
                    });
                }
            },
        };

        Ok(VerificationMethod {
            id: vm.id.clone(),
            type_: vm.verification_method_type.clone(),
            controller: vm.controller.clone(),
            public_key,
            ..Default::default()
        })
    }

    /// Converts one relationship list. `None` when the ledger had no entries, so the
    /// field is left out of the document entirely.
    pub fn relationships(
        &self,
        entries: &[LedgerVerificationRelationship],
    ) -> Result<Option<Vec<VerificationRelationship>>, DocumentError> {
        if entries.is_empty() {
            return Ok(None);
        }

        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| match (entry.reference_id(), &entry.verification_method) {
                (Some(id), _) => Ok(VerificationRelationship::Reference(id.to_string())),
                (None, Some(vm)) => Ok(VerificationRelationship::Embedded(Box::new(
                    self.verification_method(vm)?,
                ))),
                (None, None) => Err(DocumentError::EmptyRelationship { index }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

impl TryFrom<&LedgerDidDoc> for Document {
    type Error = DocumentError;

    fn try_from(record: &LedgerDidDoc) -> Result<Self, Self::Error> {
        DocumentConverter::default().convert(record)
    }
}

impl TryFrom<&LedgerVerificationMethod> for VerificationMethod {
    type Error = DocumentError;

    fn try_from(vm: &LedgerVerificationMethod) -> Result<Self, Self::Error> {
        DocumentConverter::default().verification_method(vm)
    }
}

impl From<&LedgerService> for Service {
    fn from(service: &LedgerService) -> Self {
        Service {
            id: service.id.clone(),
            type_: service.service_type.clone(),
            service_endpoint: service.service_endpoint.clone(),
            accept: service.accept.clone(),
            routing_keys: service.routing_keys.clone(),
            ..Default::default()
        }
    }
}
