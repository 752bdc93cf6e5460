//! PayloadCodec port - Payload のバイト列変換（暗号化・圧縮など）
//!
//! codec は converter の外側で動く。decode は「codec → converter」の順。
//! リモートの鍵サービスを呼ぶ実装もあるので async にしている。

use async_trait::async_trait;
use std::sync::Arc;

use super::converter::SerializationContext;
use crate::domain::Payload;
use crate::error::ConvertError;

#[async_trait]
pub trait PayloadCodec: Send + Sync {
    async fn encode(&self, payloads: Vec<Payload>) -> Result<Vec<Payload>, ConvertError>;

    async fn decode(&self, payloads: Vec<Payload>) -> Result<Vec<Payload>, ConvertError>;

    /// `PayloadConverter::with_context` と同じ契約（`Ok(None)` ならそのまま再利用）
    fn with_context(
        &self,
        context: &SerializationContext,
    ) -> Result<Option<Arc<dyn PayloadCodec>>, ConvertError> {
        let _ = context;
        Ok(None)
    }
}
