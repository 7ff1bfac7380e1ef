/*!
 * Ledger DID resolution.
 *
 * Fetches a raw DID record from a ledger source, converts it with
 * [`DocumentConverter`] and decides which JSON-LD contexts the result carries.
 *
 * Ledger access is pluggable: implement [`LedgerSource`] (sync) or
 * [`AsyncLedgerSource`] (async). Every [`LedgerSource`] is automatically an
 * [`AsyncLedgerSource`] via blanket impl, so the resolver only needs
 * `Box<dyn AsyncLedgerSource>`.
 *
 * # Return Convention
 *
 * Sources return `Result<Option<LedgerDidDoc>, ResolverError>`:
 * - `Ok(None)`: the ledger has no record for this DID
 * - `Ok(Some(record))`: record found
 * - `Err(e)`: the ledger could not be queried
 */

use std::future::Future;
use std::pin::Pin;

use ledger_did_common::{Document, DocumentConverter, ledger::LedgerDidDoc};
use tracing::{Level, event};

pub mod config;
pub mod emitter;
pub mod errors;
pub mod json_ld;
pub mod logging;
pub mod memory;

pub use config::{ResolverConfig, ResolverConfigBuilder};
pub use emitter::{DocumentEmitter, JsonEmitter, ValueEmitter};
pub use errors::ResolverError;
pub use memory::MemoryLedger;

/// Result type alias for ledger source lookups.
pub type LedgerLookup = Result<Option<LedgerDidDoc>, ResolverError>;

/// Synchronous ledger source for records that need no IO (tests, fixtures, local state).
pub trait LedgerSource: Send + Sync {
    /// Human-readable name for this source (e.g., `"MemoryLedger"`).
    fn name(&self) -> &str;

    /// Look up the raw record for `did`.
    fn fetch(&self, did: &str) -> LedgerLookup;
}

/// Asynchronous ledger source, e.g. a node's REST or gRPC API.
///
/// This trait is dyn-compatible: the resolver stores sources as
/// `Box<dyn AsyncLedgerSource>`.
pub trait AsyncLedgerSource: Send + Sync {
    /// Human-readable name for this source.
    fn name(&self) -> &str;

    /// Look up the raw record for `did`.
    fn fetch<'a>(&'a self, did: &'a str) -> Pin<Box<dyn Future<Output = LedgerLookup> + Send + 'a>>;
}

/// Every sync [`LedgerSource`] is automatically an [`AsyncLedgerSource`].
impl<T: LedgerSource> AsyncLedgerSource for T {
    fn name(&self) -> &str {
        LedgerSource::name(self)
    }

    fn fetch<'a>(&'a self, did: &'a str) -> Pin<Box<dyn Future<Output = LedgerLookup> + Send + 'a>> {
        Box::pin(std::future::ready(LedgerSource::fetch(self, did)))
    }
}

/// Resolves DIDs against a single ledger source.
///
/// Holds no mutable state; concurrent `resolve` calls are independent.
pub struct LedgerDIDResolver {
    source: Box<dyn AsyncLedgerSource>,
    converter: DocumentConverter,
    json_ld: bool,
}

impl LedgerDIDResolver {
    pub fn new(source: Box<dyn AsyncLedgerSource>, config: &ResolverConfig) -> Self {
        event!(
            Level::DEBUG,
            "ledger resolver using source ({}) json_ld({})",
            source.name(),
            config.json_ld
        );
        Self {
            source,
            converter: DocumentConverter::new(config.conversion_options()),
            json_ld: config.json_ld,
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Fetch and convert the document for `did`
    pub async fn resolve(&self, did: &str) -> Result<Document, ResolverError> {
        let record = self
            .source
            .fetch(did)
            .await?
            .ok_or_else(|| ResolverError::NotFound(did.to_string()))?;

        let mut doc = self.converter.convert(&record).inspect_err(|err| {
            event!(Level::WARN, "did({did}) conversion failed: {err}");
        })?;

        if self.json_ld {
            json_ld::apply_json_ld_contexts(&mut doc);
        } else {
            json_ld::strip_json_ld_contexts(&mut doc);
        }

        event!(Level::DEBUG, "did({did}) resolved");
        Ok(doc)
    }

    /// Resolve and hand the document to `emitter`
    pub async fn resolve_with<E: DocumentEmitter>(
        &self,
        did: &str,
        emitter: &E,
    ) -> Result<E::Output, ResolverError> {
        let doc = self.resolve(did).await?;
        emitter.emit(&doc)
    }

    /// Resolve straight to the serialized JSON text
    pub async fn resolve_json(&self, did: &str, pretty: bool) -> Result<String, ResolverError> {
        self.resolve_with(did, &JsonEmitter { pretty }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_did_common::ledger::{LedgerVerificationMethod, LedgerVerificationRelationship};

    const DID: &str = "did:canow:testnet:1234";

    struct FailingLedger;

    impl LedgerSource for FailingLedger {
        fn name(&self) -> &str {
            "FailingLedger"
        }

        fn fetch(&self, _did: &str) -> LedgerLookup {
            Err(ResolverError::Source("node unreachable".to_string()))
        }
    }

    fn ledger() -> MemoryLedger {
        let mut ledger = MemoryLedger::new();
        ledger.insert(LedgerDidDoc {
            id: DID.to_string(),
            verification_method: vec![LedgerVerificationMethod {
                id: format!("{DID}#key-1"),
                verification_method_type: "Ed25519VerificationKey2020".to_string(),
                controller: DID.to_string(),
                verification_material: "zMK".to_string(),
            }],
            authentication: vec![LedgerVerificationRelationship::reference(format!(
                "{DID}#key-1"
            ))],
            ..Default::default()
        });
        ledger
    }

    #[tokio::test]
    async fn resolves_from_sync_source() {
        let resolver = LedgerDIDResolver::new(
            Box::new(ledger()),
            &ResolverConfigBuilder::default().build(),
        );
        assert_eq!(resolver.source_name(), "MemoryLedger");
        let doc = resolver.resolve(DID).await.unwrap();
        assert_eq!(doc.id, DID);
        assert_eq!(
            doc.context.as_slice(),
            [
                json_ld::DID_V1_CONTEXT,
                json_ld::ED25519_2020_CONTEXT
            ]
        );
    }

    #[tokio::test]
    async fn plain_json_has_no_context() {
        let resolver = LedgerDIDResolver::new(
            Box::new(ledger()),
            &ResolverConfigBuilder::default().with_json_ld(false).build(),
        );
        let doc = resolver.resolve(DID).await.unwrap();
        assert!(doc.context.is_empty());
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let resolver = LedgerDIDResolver::new(
            Box::new(ledger()),
            &ResolverConfigBuilder::default().build(),
        );
        let err = resolver.resolve("did:canow:testnet:unknown").await.unwrap_err();
        assert!(matches!(err, ResolverError::NotFound(did) if did == "did:canow:testnet:unknown"));
    }

    #[tokio::test]
    async fn source_errors_propagate() {
        let resolver = LedgerDIDResolver::new(
            Box::new(FailingLedger),
            &ResolverConfigBuilder::default().build(),
        );
        assert!(matches!(
            resolver.resolve(DID).await,
            Err(ResolverError::Source(_))
        ));
    }

    #[tokio::test]
    async fn sources_compose_as_trait_objects() {
        let sources: Vec<Box<dyn AsyncLedgerSource>> =
            vec![Box::new(FailingLedger), Box::new(ledger())];

        let mut found = None;
        for source in &sources {
            if let Ok(Some(record)) = source.fetch(DID).await {
                found = Some(record);
                break;
            }
        }
        assert_eq!(found.map(|r| r.id), Some(DID.to_string()));
    }

    #[tokio::test]
    async fn resolve_json_emits_compact_text() {
        let resolver = LedgerDIDResolver::new(
            Box::new(ledger()),
            &ResolverConfigBuilder::default().with_json_ld(false).build(),
        );
        let text = resolver.resolve_json(DID, false).await.unwrap();
        assert!(text.starts_with(r#"{"id":"did:canow:testnet:1234""#));
        assert!(!text.contains("@context"));
    }
}
