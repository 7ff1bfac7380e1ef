/*!
 * In-memory ledger source.
 *
 * Holds raw ledger records keyed by DID. Useful for local testing, fixtures and
 * for fronting records that were fetched by some other means.
 */

use ahash::AHashMap as HashMap;
use ledger_did_common::ledger::LedgerDidDoc;
use tracing::{Level, event};

use crate::{LedgerLookup, LedgerSource, errors::ResolverError};

#[derive(Clone, Debug, Default)]
pub struct MemoryLedger {
    records: HashMap<String, LedgerDidDoc>,
}

impl MemoryLedger {
    /// Create a new, empty ledger
    pub fn new() -> Self {
        MemoryLedger {
            records: HashMap::new(),
        }
    }

    /// Insert a record, keyed by its own id. Returns the record it replaced, if any.
    pub fn insert(&mut self, record: LedgerDidDoc) -> Option<LedgerDidDoc> {
        self.records.insert(record.id.clone(), record)
    }

    /// Insert a record from its ledger JSON form
    /// `record`: A string representation of a ledger DID record
    pub fn insert_from_string(&mut self, record: &str) -> Result<(), ResolverError> {
        let record: LedgerDidDoc = serde_json::from_str(record).map_err(|err| {
            ResolverError::Source(format!("Couldn't parse ledger record: {err}"))
        })?;
        event!(Level::DEBUG, "memory ledger: inserted record ({})", record.id);
        self.insert(record);
        Ok(())
    }

    pub fn remove(&mut self, did: &str) -> Option<LedgerDidDoc> {
        self.records.remove(did)
    }

    pub fn get(&self, did: &str) -> Option<&LedgerDidDoc> {
        self.records.get(did)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<LedgerDidDoc> for MemoryLedger {
    fn from_iter<I: IntoIterator<Item = LedgerDidDoc>>(iter: I) -> Self {
        let mut ledger = MemoryLedger::new();
        for record in iter {
            ledger.insert(record);
        }
        ledger
    }
}

impl LedgerSource for MemoryLedger {
    fn name(&self) -> &str {
        "MemoryLedger"
    }

    fn fetch(&self, did: &str) -> LedgerLookup {
        Ok(self.records.get(did).cloned())
    }
}
