//! https://www.w3.org/TR/did-core/#services

use serde::{Deserialize, Serialize};

use crate::context::{ContextSet, Contextual};

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(rename = "@context")]
    #[serde(skip_serializing_if = "ContextSet::is_empty", default)]
    pub context: ContextSet,

    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub id: String,

    #[serde(rename = "type")]
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub type_: String,

    /// serviceEndpoint URIs
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub service_endpoint: Vec<String>,

    /// Accepted media-type profiles, e.g. `didcomm/v2`
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub accept: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub routing_keys: Vec<String>,
}

impl Contextual for Service {
    fn context(&self) -> &ContextSet {
        &self.context
    }

    fn context_mut(&mut self) -> &mut ContextSet {
        &mut self.context
    }
}
