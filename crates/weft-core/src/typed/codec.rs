//! DataConverter - Payload と型付きの値の相互変換
//!
//! # デシリアライズフロー
//! 1. （async の場合のみ）PayloadCodec で payload を復号
//! 2. PayloadConverter で serde_json::Value に変換
//! 3. serde_json で T にデシリアライズ
//!
//! # 学習ポイント
//! - trait object（`Arc<dyn PayloadConverter>`）の上にジェネリックなメソッドを載せる
//! - Arc による安価な clone（memo の全エントリで同じ converter を共有する）

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;

use crate::domain::Payload;
use crate::error::ConvertError;
use crate::impls::JsonPayloadConverter;
use crate::ports::{PayloadCodec, PayloadConverter, SerializationContext};

/// DataConverter は converter と（任意の）codec の組
///
/// # 使用例
/// ```ignore
/// let dc = DataConverter::default();
/// let payload = dc.to_payload(&"hello")?;
/// let s: String = dc.to_value(&payload)?;
/// ```
#[derive(Clone)]
pub struct DataConverter {
    payload_converter: Arc<dyn PayloadConverter>,
    payload_codec: Option<Arc<dyn PayloadCodec>>,
}

impl DataConverter {
    pub fn new(converter: impl PayloadConverter + 'static) -> Self {
        Self::from_arc(Arc::new(converter))
    }

    pub fn from_arc(converter: Arc<dyn PayloadConverter>) -> Self {
        Self {
            payload_converter: converter,
            payload_codec: None,
        }
    }

    pub fn with_codec(mut self, codec: impl PayloadCodec + 'static) -> Self {
        self.payload_codec = Some(Arc::new(codec));
        self
    }

    pub fn payload_converter(&self) -> &Arc<dyn PayloadConverter> {
        &self.payload_converter
    }

    pub fn payload_codec(&self) -> Option<&Arc<dyn PayloadCodec>> {
        self.payload_codec.as_ref()
    }

    /// Decode one payload into `T` (codec is not applied).
    pub fn to_value<T: DeserializeOwned>(&self, payload: &Payload) -> Result<T, ConvertError> {
        let value = self.payload_converter.to_value(payload)?;
        serde_json::from_value(value).map_err(|e| ConvertError::Decode(e.to_string()))
    }

    pub fn to_payload<T: Serialize + ?Sized>(&self, value: &T) -> Result<Payload, ConvertError> {
        let value = serde_json::to_value(value).map_err(|e| ConvertError::Encode(e.to_string()))?;
        self.payload_converter.to_payload(&value)
    }

    pub async fn encode_payloads(&self, payloads: Vec<Payload>) -> Result<Vec<Payload>, ConvertError> {
        match &self.payload_codec {
            Some(codec) => codec.encode(payloads).await,
            None => Ok(payloads),
        }
    }

    pub async fn decode_payloads(&self, payloads: Vec<Payload>) -> Result<Vec<Payload>, ConvertError> {
        match &self.payload_codec {
            Some(codec) => codec.decode(payloads).await,
            None => Ok(payloads),
        }
    }

    /// Return a converter specialized to `context`.
    ///
    /// Parts that report `Ok(None)` from `with_context` are shared with `self`.
    pub fn with_serialization_context(
        &self,
        context: &SerializationContext,
    ) -> Result<Self, ConvertError> {
        let payload_converter = self
            .payload_converter
            .with_context(context)?
            .unwrap_or_else(|| Arc::clone(&self.payload_converter));

        let payload_codec = match &self.payload_codec {
            Some(codec) => Some(codec.with_context(context)?.unwrap_or_else(|| Arc::clone(codec))),
            None => None,
        };

        Ok(Self {
            payload_converter,
            payload_codec,
        })
    }
}

impl Default for DataConverter {
    fn default() -> Self {
        Self::new(JsonPayloadConverter::new())
    }
}

impl fmt::Debug for DataConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataConverter")
            .field("has_codec", &self.payload_codec.is_some())
            .finish()
    }
}
