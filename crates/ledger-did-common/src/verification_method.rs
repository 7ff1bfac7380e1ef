//! DID Verification Method Definition
//! <https://www.w3.org/TR/did-core/#verification-methods>

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::{ContextSet, Contextual};

/// Verification method suites the ledger registers key material for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationMethodType {
    /// Material is a multibase string
    Ed25519VerificationKey2020,
    /// Material is a base58 string
    Ed25519VerificationKey2018,
    /// Material is a JSON encoded JWK
    JsonWebKey2020,
}

impl VerificationMethodType {
    pub const ALL: [VerificationMethodType; 3] = [
        VerificationMethodType::Ed25519VerificationKey2020,
        VerificationMethodType::Ed25519VerificationKey2018,
        VerificationMethodType::JsonWebKey2020,
    ];

    /// Matches a ledger type tag against the registered suites.
    /// Returns `None` for anything else.
    pub fn from_type_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == tag)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationMethodType::Ed25519VerificationKey2020 => "Ed25519VerificationKey2020",
            VerificationMethodType::Ed25519VerificationKey2018 => "Ed25519VerificationKey2018",
            VerificationMethodType::JsonWebKey2020 => "JsonWebKey2020",
        }
    }
}

impl fmt::Display for VerificationMethodType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Public key material, exactly one encoding per method
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum PublicKey {
    #[serde(rename = "publicKeyMultibase")]
    Multibase(String),

    #[serde(rename = "publicKeyBase58")]
    Base58(String),

    #[serde(rename = "publicKeyJwk")]
    Jwk(Value),
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    #[serde(rename = "@context")]
    #[serde(skip_serializing_if = "ContextSet::is_empty", default)]
    pub context: ContextSet,

    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub id: String,

    #[serde(rename = "type")]
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub type_: String,

    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub controller: String,

    /// `None` when the method type carries no material we know how to encode
    #[serde(flatten)]
    pub public_key: Option<PublicKey>,
}

impl VerificationMethod {
    /// The registered suite for this method, if it is one
    pub fn method_type(&self) -> Option<VerificationMethodType> {
        VerificationMethodType::from_type_tag(&self.type_)
    }

    pub fn public_key_multibase(&self) -> Option<&str> {
        match &self.public_key {
            Some(PublicKey::Multibase(key)) => Some(key),
            _ => None,
        }
    }

    pub fn public_key_base58(&self) -> Option<&str> {
        match &self.public_key {
            Some(PublicKey::Base58(key)) => Some(key),
            _ => None,
        }
    }

    pub fn public_key_jwk(&self) -> Option<&Value> {
        match &self.public_key {
            Some(PublicKey::Jwk(jwk)) => Some(jwk),
            _ => None,
        }
    }
}

impl Contextual for VerificationMethod {
    fn context(&self) -> &ContextSet {
        &self.context
    }

    fn context_mut(&mut self) -> &mut ContextSet {
        &mut self.context
    }
}

/// https://www.w3.org/TR/did-core/#verification-relationships
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum VerificationRelationship {
    /// Reference to a Verification Method, possibly in another document
    Reference(String),
    /// Embedded Verification Method
    Embedded(Box<VerificationMethod>),
}

impl VerificationRelationship {
    /// Returns the id of the verification-method
    pub fn id(&self) -> &str {
        match self {
            VerificationRelationship::Reference(id) => id,
            VerificationRelationship::Embedded(vm) => &vm.id,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, VerificationRelationship::Reference(_))
    }
}
