//! Decides which JSON-LD contexts a resolved document carries.
//!
//! Conversion never sets `@context`; this module applies the contexts that the
//! document's verification method suites and services need.

use ledger_did_common::{
    Contextual, Document, VerificationMethodType, verification_method::VerificationRelationship,
};

pub const DID_V1_CONTEXT: &str = "https://www.w3.org/ns/did/v1";
pub const ED25519_2020_CONTEXT: &str = "https://w3id.org/security/suites/ed25519-2020/v1";
pub const ED25519_2018_CONTEXT: &str = "https://w3id.org/security/suites/ed25519-2018/v1";
pub const JWS_2020_CONTEXT: &str = "https://w3id.org/security/suites/jws-2020/v1";
pub const LINKED_DOMAINS_CONTEXT: &str =
    "https://identity.foundation/.well-known/did-configuration/v1";

pub const LINKED_DOMAINS_SERVICE: &str = "LinkedDomains";

/// The security suite context for a verification method type
pub fn suite_context(method_type: VerificationMethodType) -> &'static str {
    match method_type {
        VerificationMethodType::Ed25519VerificationKey2020 => ED25519_2020_CONTEXT,
        VerificationMethodType::Ed25519VerificationKey2018 => ED25519_2018_CONTEXT,
        VerificationMethodType::JsonWebKey2020 => JWS_2020_CONTEXT,
    }
}

/// Adds the DID core context, then one context per suite used by the document's
/// verification methods (in order of first use, top-level methods before those embedded
/// in relationships), then the linked-domains context if a `LinkedDomains` service is
/// present.
pub fn apply_json_ld_contexts(doc: &mut Document) {
    doc.add_context(DID_V1_CONTEXT);

    let embedded = doc.relationships().flat_map(|(_, rels)| {
        rels.iter().filter_map(|rel| match rel {
            VerificationRelationship::Embedded(vm) => Some(&**vm),
            VerificationRelationship::Reference(_) => None,
        })
    });
    let suites: Vec<&'static str> = doc
        .verification_method
        .iter()
        .chain(embedded)
        .filter_map(|vm| vm.method_type())
        .map(suite_context)
        .collect();
    for ctx in suites {
        doc.add_context(ctx);
    }

    if doc
        .service
        .iter()
        .any(|service| service.type_ == LINKED_DOMAINS_SERVICE)
    {
        doc.add_context(LINKED_DOMAINS_CONTEXT);
    }
}

/// Removes `@context` from the document, its verification methods (including embedded
/// ones) and its services, for plain `application/did+json` output.
pub fn strip_json_ld_contexts(doc: &mut Document) {
    doc.remove_context();
    for vm in &mut doc.verification_method {
        vm.remove_context();
    }
    for service in &mut doc.service {
        service.remove_context();
    }
    for rels in [
        &mut doc.authentication,
        &mut doc.assertion_method,
        &mut doc.capability_invocation,
        &mut doc.capability_delegation,
        &mut doc.key_agreement,
    ]
    .into_iter()
    .flatten()
    {
        for rel in rels {
            if let VerificationRelationship::Embedded(vm) = rel {
                vm.remove_context();
            }
        }
    }
}
