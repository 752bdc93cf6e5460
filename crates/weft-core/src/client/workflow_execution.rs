//! WorkflowExecution - 取得済み実行レコードのデコード用ファサード
//!
//! # 設計
//! - スカラー値（時刻・状態・ID など）はレコードをそのまま返すだけ
//! - memo と search attribute は最初にアクセスされたときだけデコードしてキャッシュ
//!
//! memo は converter に context を付与する（副作用がありうる）ので `LockedOnce`、
//! search attribute は純粋な計算なので `RacyOnce` を使う。

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{RunId, WorkflowExecutionInfo, WorkflowExecutionStatus, WorkflowId};
use crate::error::ConvertError;
use crate::lazy::{LockedOnce, RacyOnce};
use crate::ports::SerializationContext;
use crate::typed::{DataConverter, EncodedRawValue, SearchAttributeCollection};

/// Decoded memo: one lazily-decodable handle per key.
pub type Memo = HashMap<String, EncodedRawValue>;

/// Representation of a workflow execution.
///
/// # 使用例
/// ```ignore
/// let exec = WorkflowExecution::new(raw, DataConverter::default(), Some("default".into()));
/// println!("{} {:?}", exec.id(), exec.status());
/// let customer: String = exec.memo()?["customer"].to_value()?;
/// ```
#[derive(Debug)]
pub struct WorkflowExecution {
    raw: Arc<WorkflowExecutionInfo>,
    data_converter: DataConverter,
    namespace: Option<String>,
    memo: LockedOnce<Memo, ConvertError>,
    search_attributes: RacyOnce<Arc<SearchAttributeCollection>>,
}

impl WorkflowExecution {
    /// Wrap a fetched record.
    ///
    /// With `namespace` set, the converter is bound to a workflow-scoped
    /// `SerializationContext` the first time the memo is read. Without it the
    /// converter is assumed to be context specific already.
    pub fn new(
        raw: Arc<WorkflowExecutionInfo>,
        data_converter: DataConverter,
        namespace: Option<String>,
    ) -> Self {
        Self {
            raw,
            data_converter,
            namespace,
            memo: LockedOnce::new(),
            search_attributes: RacyOnce::new(),
        }
    }

    /// When the workflow was closed, if closed.
    pub fn close_time(&self) -> Option<DateTime<Utc>> {
        self.raw.close_time
    }

    /// When the workflow run started or should start.
    pub fn execution_time(&self) -> Option<DateTime<Utc>> {
        self.raw.execution_time
    }

    /// Number of events in history.
    pub fn history_length(&self) -> u64 {
        self.raw.history_length
    }

    pub fn id(&self) -> &WorkflowId {
        &self.raw.execution.workflow_id
    }

    /// Parent workflow ID if this was started as a child.
    pub fn parent_id(&self) -> Option<&WorkflowId> {
        self.raw.parent_execution.as_ref().map(|p| &p.workflow_id)
    }

    /// Parent run ID if this was started as a child.
    pub fn parent_run_id(&self) -> Option<&RunId> {
        self.raw.parent_execution.as_ref().map(|p| &p.run_id)
    }

    pub fn run_id(&self) -> &RunId {
        &self.raw.execution.run_id
    }

    /// When the workflow was created.
    pub fn start_time(&self) -> DateTime<Utc> {
        self.raw.start_time
    }

    pub fn status(&self) -> WorkflowExecutionStatus {
        self.raw.status
    }

    pub fn task_queue(&self) -> &str {
        &self.raw.task_queue
    }

    pub fn workflow_type(&self) -> &str {
        &self.raw.workflow_type.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn raw_info(&self) -> &WorkflowExecutionInfo {
        &self.raw
    }

    /// Memo handles, created on first access.
    ///
    /// Concurrent first calls block until one of them has built the map. A
    /// context-binding failure is returned to all of them and on every later
    /// call.
    pub fn memo(&self) -> Result<&Memo, ConvertError> {
        self.memo.get_or_init(|| self.build_memo())
    }

    /// Search attributes, converted on first access.
    ///
    /// Never touches the data converter. Every call on the same instance
    /// returns the same `Arc`.
    pub fn typed_search_attributes(&self) -> Arc<SearchAttributeCollection> {
        let collection = self.search_attributes.get_or_publish(|| {
            match &self.raw.search_attributes {
                Some(raw) if !raw.indexed_fields.is_empty() => {
                    Arc::new(SearchAttributeCollection::from_raw(raw))
                }
                _ => SearchAttributeCollection::empty(),
            }
        });
        Arc::clone(collection)
    }

    fn build_memo(&self) -> Result<Memo, ConvertError> {
        let Some(raw_memo) = &self.raw.memo else {
            return Ok(Memo::new());
        };

        let converter = match &self.namespace {
            Some(namespace) => {
                let context = SerializationContext {
                    namespace: namespace.clone(),
                    workflow_id: self.id().clone(),
                };
                self.data_converter.with_serialization_context(&context)?
            }
            None => self.data_converter.clone(),
        };

        tracing::debug!(
            workflow_id = %self.id(),
            entries = raw_memo.fields.len(),
            context_bound = self.namespace.is_some(),
            "materialized memo handles"
        );

        Ok(raw_memo
            .fields
            .iter()
            .map(|(key, payload)| {
                (
                    key.clone(),
                    EncodedRawValue::new(converter.clone(), payload.clone()),
                )
            })
            .collect())
    }
}
