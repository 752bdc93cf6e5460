//! JsonPayloadConverter - デフォルトの PayloadConverter
//!
//! # 対応エンコーディング
//! - `binary/null`: JSON null（data は空）
//! - `json/plain`: serde_json でそのまま

use crate::domain::Payload;
use crate::domain::payload::{ENCODING_JSON, ENCODING_NULL, METADATA_ENCODING};
use crate::error::ConvertError;
use crate::ports::PayloadConverter;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPayloadConverter;

impl JsonPayloadConverter {
    pub fn new() -> Self {
        Self
    }
}

impl PayloadConverter for JsonPayloadConverter {
    fn to_value(&self, payload: &Payload) -> Result<serde_json::Value, ConvertError> {
        match payload.encoding() {
            None => Err(ConvertError::MissingEncoding),
            Some(ENCODING_NULL) => Ok(serde_json::Value::Null),
            Some(ENCODING_JSON) => serde_json::from_slice(&payload.data)
                .map_err(|e| ConvertError::Decode(e.to_string())),
            Some(other) => Err(ConvertError::UnknownEncoding(other.to_string())),
        }
    }

    fn to_payload(&self, value: &serde_json::Value) -> Result<Payload, ConvertError> {
        if value.is_null() {
            return Ok(Payload::default().with_metadata(METADATA_ENCODING, ENCODING_NULL));
        }
        let data = serde_json::to_vec(value).map_err(|e| ConvertError::Encode(e.to_string()))?;
        Ok(Payload::new(data).with_metadata(METADATA_ENCODING, ENCODING_JSON))
    }
}
