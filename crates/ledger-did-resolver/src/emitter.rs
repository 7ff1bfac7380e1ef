//! Hands resolved documents to whatever serves them.

use ledger_did_common::Document;
use serde_json::Value;

use crate::errors::ResolverError;

/// Turns a resolved [`Document`] into the representation a transport serves
pub trait DocumentEmitter {
    type Output;

    fn emit(&self, doc: &Document) -> Result<Self::Output, ResolverError>;
}

/// Emits the `application/did+json` / `application/did+ld+json` text form
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEmitter {
    pub pretty: bool,
}

impl JsonEmitter {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl DocumentEmitter for JsonEmitter {
    type Output = String;

    fn emit(&self, doc: &Document) -> Result<String, ResolverError> {
        let result = if self.pretty {
            serde_json::to_string_pretty(doc)
        } else {
            serde_json::to_string(doc)
        };
        result.map_err(|err| ResolverError::Emit(format!("did({}): {err}", doc.id)))
    }
}

/// Emits a [`serde_json::Value`], for callers that embed the document in a larger response
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueEmitter;

impl DocumentEmitter for ValueEmitter {
    type Output = Value;

    fn emit(&self, doc: &Document) -> Result<Value, ResolverError> {
        serde_json::to_value(doc)
            .map_err(|err| ResolverError::Emit(format!("did({}): {err}", doc.id)))
    }
}
