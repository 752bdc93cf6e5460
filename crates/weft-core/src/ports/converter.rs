//! PayloadConverter port - Payload と値の相互変換
//!
//! # 学習ポイント
//! - Object-safe trait（ジェネリックメソッドを持たない）
//! - 型付きの decode は `typed::DataConverter` 側で serde_json::Value 経由で行う
//!   （`typed::handler` の DynHandler と同じ type erasure パターン）

use std::sync::Arc;

use crate::domain::{Payload, WorkflowId};
use crate::error::ConvertError;

/// SerializationContext はコンバーターをワークフロー単位に特化させる情報
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SerializationContext {
    pub namespace: String,
    pub workflow_id: WorkflowId,
}

/// PayloadConverter は Payload <-> serde_json::Value を変換する
///
/// # Thread Safety
/// - `Send + Sync` を要求（複数スレッドから共有される）
pub trait PayloadConverter: Send + Sync {
    fn to_value(&self, payload: &Payload) -> Result<serde_json::Value, ConvertError>;

    fn to_payload(&self, value: &serde_json::Value) -> Result<Payload, ConvertError>;

    /// Specialize this converter to a workflow context.
    ///
    /// `Ok(None)` means the converter does not depend on context and can be
    /// reused as-is.
    fn with_context(
        &self,
        context: &SerializationContext,
    ) -> Result<Option<Arc<dyn PayloadConverter>>, ConvertError> {
        let _ = context;
        Ok(None)
    }
}
