//! ClientOptions - クライアント側の設定とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - serde による設定ファイル読み込み（`#[serde(default)]`）

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::workflow_execution::WorkflowExecution;
use crate::domain::WorkflowExecutionInfo;
use crate::error::BuildError;
use crate::typed::DataConverter;

pub const DEFAULT_NAMESPACE: &str = "default";

/// ファイルから読む設定（すべて省略可能）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub namespace: String,

    /// false の場合、DataConverter はすでに context 付きとみなす
    pub context_aware: bool,

    /// tracing の EnvFilter 文字列（RUST_LOG が優先）
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            context_aware: true,
            log_filter: "info".to_string(),
        }
    }
}

/// ClientOptions は取得済みレコードをファサードに包むための設定
///
/// # 使用例
/// ```ignore
/// let options = ClientOptions::builder()
///     .namespace("billing")
///     .data_converter(my_converter)
///     .build()?;
/// let exec = options.wrap_execution(raw);
/// ```
#[derive(Debug, Clone)]
pub struct ClientOptions {
    namespace: String,
    data_converter: DataConverter,
    context_aware: bool,
}

impl ClientOptions {
    pub fn builder() -> ClientOptionsBuilder {
        ClientOptionsBuilder::new()
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn data_converter(&self) -> &DataConverter {
        &self.data_converter
    }

    pub fn context_aware(&self) -> bool {
        self.context_aware
    }

    /// Wrap a fetched record. Nothing is decoded here.
    pub fn wrap_execution(&self, raw: impl Into<Arc<WorkflowExecutionInfo>>) -> WorkflowExecution {
        let namespace = self.context_aware.then(|| self.namespace.clone());
        WorkflowExecution::new(raw.into(), self.data_converter.clone(), namespace)
    }
}

pub struct ClientOptionsBuilder {
    namespace: String,
    data_converter: Option<DataConverter>,
    context_aware: bool,
}

impl ClientOptionsBuilder {
    pub fn new() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            data_converter: None,
            context_aware: true,
        }
    }

    /// ClientConfig の値で初期化
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new()
            .namespace(config.namespace.clone())
            .context_aware(config.context_aware)
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn data_converter(mut self, data_converter: DataConverter) -> Self {
        self.data_converter = Some(data_converter);
        self
    }

    pub fn context_aware(mut self, context_aware: bool) -> Self {
        self.context_aware = context_aware;
        self
    }

    /// # 検証
    /// - namespace が空（空白のみ含む）なら BuildError::EmptyNamespace
    pub fn build(self) -> Result<ClientOptions, BuildError> {
        if self.namespace.trim().is_empty() {
            return Err(BuildError::EmptyNamespace);
        }
        Ok(ClientOptions {
            namespace: self.namespace,
            data_converter: self.data_converter.unwrap_or_default(),
            context_aware: self.context_aware,
        })
    }
}

impl Default for ClientOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RunId, WorkflowId};
    use chrono::Utc;
    use rstest::rstest;

    fn raw() -> WorkflowExecutionInfo {
        WorkflowExecutionInfo::new(
            WorkflowId::new("wf"),
            RunId::new("9b2d3c1e-7a44-4f0b-8e5d-2c6a1f0b7e93"),
            "T",
            "q",
            Utc::now(),
        )
    }

    #[test]
    fn defaults_build() {
        let options = ClientOptions::builder().build().unwrap();
        assert_eq!(options.namespace(), DEFAULT_NAMESPACE);
        assert!(options.context_aware());
        assert!(options.data_converter().payload_codec().is_none());
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank("   ")]
    fn empty_namespace_is_rejected(#[case] namespace: &str) {
        let result = ClientOptions::builder().namespace(namespace).build();
        let err = result.unwrap_err();
        assert_eq!(err, crate::BuildError::EmptyNamespace);
        assert_eq!(err.to_string(), "namespace must not be empty");
    }

    #[test]
    fn wrap_passes_namespace_only_when_context_aware() {
        let aware = ClientOptions::builder().namespace("billing").build().unwrap();
        assert_eq!(aware.wrap_execution(raw()).namespace(), Some("billing"));

        let plain = ClientOptions::builder()
            .namespace("billing")
            .context_aware(false)
            .build()
            .unwrap();
        assert_eq!(plain.wrap_execution(raw()).namespace(), None);
    }

    #[test]
    fn config_fills_missing_fields_with_defaults() {
        let config: ClientConfig = serde_json::from_str(r#"{"namespace":"billing"}"#).unwrap();
        assert_eq!(config.namespace, "billing");
        assert!(config.context_aware);
        assert_eq!(config.log_filter, "info");

        let options = ClientOptionsBuilder::from_config(&config).build().unwrap();
        assert_eq!(options.namespace(), "billing");
    }
}
