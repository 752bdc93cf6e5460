//! EncodedRawValue - 未デコードの値のハンドル
//!
//! memo の各エントリはこの型で返す。デコードは呼び出しのたびに行い、
//! 結果はキャッシュしない（同じ payload を別の型として読みたい呼び出し元がいるため）。

use serde::de::DeserializeOwned;

use super::codec::DataConverter;
use crate::domain::Payload;
use crate::error::ConvertError;

#[derive(Debug, Clone)]
pub struct EncodedRawValue {
    converter: DataConverter,
    payload: Payload,
}

impl EncodedRawValue {
    pub fn new(converter: DataConverter, payload: Payload) -> Self {
        Self { converter, payload }
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn converter(&self) -> &DataConverter {
        &self.converter
    }

    /// Decode to `T` without running the payload codec.
    pub fn to_value<T: DeserializeOwned>(&self) -> Result<T, ConvertError> {
        self.converter.to_value(&self.payload)
    }

    /// Run the payload codec (if any), then decode to `T`.
    pub async fn to_value_async<T: DeserializeOwned>(&self) -> Result<T, ConvertError> {
        let mut decoded = self
            .converter
            .decode_payloads(vec![self.payload.clone()])
            .await?;
        let payload = decoded
            .pop()
            .filter(|_| decoded.is_empty())
            .ok_or_else(|| ConvertError::Codec("codec must return exactly one payload".to_string()))?;
        self.converter.to_value(&payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::PayloadCodec;
    use async_trait::async_trait;

    #[test]
    fn same_entry_decodes_to_different_types() {
        let dc = DataConverter::default();
        let value = EncodedRawValue::new(dc.clone(), dc.to_payload(&42).unwrap());

        assert_eq!(value.to_value::<i64>().unwrap(), 42);
        assert_eq!(value.to_value::<f64>().unwrap(), 42.0);
        assert_eq!(
            value.to_value::<serde_json::Value>().unwrap(),
            serde_json::json!(42)
        );
    }

    #[test]
    fn failed_decode_does_not_poison_handle() {
        let dc = DataConverter::default();
        let value = EncodedRawValue::new(dc.clone(), dc.to_payload("hello").unwrap());

        assert!(value.to_value::<i64>().is_err());
        assert_eq!(value.to_value::<String>().unwrap(), "hello");
    }

    /// data の各バイトを反転するだけの codec
    struct InvertCodec;

    fn invert(payloads: Vec<Payload>) -> Vec<Payload> {
        payloads
            .into_iter()
            .map(|mut p| {
                p.data.iter_mut().for_each(|b| *b = !*b);
                p
            })
            .collect()
    }

    #[async_trait]
    impl PayloadCodec for InvertCodec {
        async fn encode(&self, payloads: Vec<Payload>) -> Result<Vec<Payload>, ConvertError> {
            Ok(invert(payloads))
        }

        async fn decode(&self, payloads: Vec<Payload>) -> Result<Vec<Payload>, ConvertError> {
            Ok(invert(payloads))
        }
    }

    #[tokio::test]
    async fn async_decode_runs_codec_first() {
        let dc = DataConverter::default().with_codec(InvertCodec);
        let plain = dc.to_payload("secret").unwrap();
        let encoded = dc.encode_payloads(vec![plain]).await.unwrap().remove(0);

        let value = EncodedRawValue::new(dc, encoded);
        assert!(value.to_value::<String>().is_err());
        assert_eq!(value.to_value_async::<String>().await.unwrap(), "secret");
    }

    struct DroppingCodec;

    #[async_trait]
    impl PayloadCodec for DroppingCodec {
        async fn encode(&self, payloads: Vec<Payload>) -> Result<Vec<Payload>, ConvertError> {
            Ok(payloads)
        }

        async fn decode(&self, _payloads: Vec<Payload>) -> Result<Vec<Payload>, ConvertError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn codec_returning_wrong_count_is_an_error() {
        let dc = DataConverter::default().with_codec(DroppingCodec);
        let value = EncodedRawValue::new(dc.clone(), dc.to_payload(&1).unwrap());
        let err = value.to_value_async::<i64>().await.unwrap_err();
        assert!(matches!(err, ConvertError::Codec(_)));
    }
}
