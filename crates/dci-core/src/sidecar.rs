//! Metadata record Deno keeps next to each cached file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// `{"headers":{},"url":"..."}`; field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataSidecar {
    /// Response headers of the original fetch. Always empty for injected files.
    pub headers: BTreeMap<String, String>,
    pub url: String,
}

impl MetadataSidecar {
    pub fn for_url(url: &str) -> Self {
        Self {
            headers: BTreeMap::new(),
            url: url.to_string(),
        }
    }

    /// Compact JSON, as Deno reads it.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
