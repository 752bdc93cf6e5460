//! Payload - 不透明なエンコード済みデータ
//!
//! memo・search attribute・query 引数・header はすべて Payload で運ばれる。
//! 中身の解釈は metadata の `encoding`（と search attribute の場合は `type`）で決まる。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// metadata key: payload のエンコーディング名
pub const METADATA_ENCODING: &str = "encoding";

/// metadata key: search attribute の値の型名
pub const METADATA_TYPE: &str = "type";

pub const ENCODING_NULL: &str = "binary/null";
pub const ENCODING_JSON: &str = "json/plain";

/// Opaque encoded value plus the metadata describing how to read it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, Vec<u8>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<u8>,
}

impl Payload {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            metadata: HashMap::new(),
            data,
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// metadata の値を UTF-8 文字列として取得（不正な UTF-8 は None）
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .and_then(|v| std::str::from_utf8(v).ok())
    }

    pub fn encoding(&self) -> Option<&str> {
        self.metadata_str(METADATA_ENCODING)
    }
}
