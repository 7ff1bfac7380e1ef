//! Error types for ledger DID resolution.

use ledger_did_common::DocumentError;

/// Error type for resolver failures.
///
/// Distinct from [`DocumentError`] which covers converting a record that was found.
/// `ResolverError` adds the failures around it: missing records, the ledger source,
/// configuration and emission.
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    /// The ledger holds no record for this DID.
    #[error("DID not found: {0}")]
    NotFound(String),

    /// The ledger record could not be converted.
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// The ledger source failed to answer.
    #[error("Ledger source error: {0}")]
    Source(String),

    /// Configuration could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// The document could not be serialized.
    #[error("Emit error: {0}")]
    Emit(String),
}
