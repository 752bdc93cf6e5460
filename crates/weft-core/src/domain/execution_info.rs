//! Raw execution record as reported by the orchestration service.
//!
//! This module only defines the "shape" of a fetched record. Nothing here
//! decodes payloads; see `client::WorkflowExecution` for the decoding facade.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::ids::{RunId, WorkflowId};
use super::payload::Payload;
use super::state::WorkflowExecutionStatus;

/// workflow_id + run_id の組
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkflowExecutionRef {
    pub workflow_id: WorkflowId,
    pub run_id: RunId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowType {
    pub name: String,
}

/// User memo, each value encoded by the application's data converter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMemo {
    #[serde(default)]
    pub fields: HashMap<String, Payload>,
}

/// Search attributes, each value self-describing via its `type` metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSearchAttributes {
    #[serde(default)]
    pub indexed_fields: HashMap<String, Payload>,
}

/// One workflow run as seen by a client.
///
/// Immutable once fetched. `start_time` is always set by the service;
/// `execution_time` only differs from it for delayed or cron starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowExecutionInfo {
    pub execution: WorkflowExecutionRef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_execution: Option<WorkflowExecutionRef>,

    #[serde(default)]
    pub status: WorkflowExecutionStatus,

    pub start_time: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub history_length: u64,

    pub task_queue: String,

    #[serde(rename = "type")]
    pub workflow_type: WorkflowType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<RawMemo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_attributes: Option<RawSearchAttributes>,
}

impl WorkflowExecutionInfo {
    /// 最低限のフィールドで作成（残りは with_* で埋める）
    pub fn new(
        workflow_id: WorkflowId,
        run_id: RunId,
        workflow_type: impl Into<String>,
        task_queue: impl Into<String>,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            execution: WorkflowExecutionRef {
                workflow_id,
                run_id,
            },
            parent_execution: None,
            status: WorkflowExecutionStatus::Running,
            start_time,
            close_time: None,
            execution_time: None,
            history_length: 0,
            task_queue: task_queue.into(),
            workflow_type: WorkflowType {
                name: workflow_type.into(),
            },
            memo: None,
            search_attributes: None,
        }
    }

    pub fn with_parent(mut self, workflow_id: WorkflowId, run_id: RunId) -> Self {
        self.parent_execution = Some(WorkflowExecutionRef {
            workflow_id,
            run_id,
        });
        self
    }

    pub fn with_status(mut self, status: WorkflowExecutionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_close_time(mut self, close_time: DateTime<Utc>) -> Self {
        self.close_time = Some(close_time);
        self
    }

    pub fn with_execution_time(mut self, execution_time: DateTime<Utc>) -> Self {
        self.execution_time = Some(execution_time);
        self
    }

    pub fn with_history_length(mut self, history_length: u64) -> Self {
        self.history_length = history_length;
        self
    }

    pub fn with_memo_field(mut self, key: impl Into<String>, payload: Payload) -> Self {
        self.memo
            .get_or_insert_with(RawMemo::default)
            .fields
            .insert(key.into(), payload);
        self
    }

    pub fn with_search_attributes(mut self, search_attributes: RawSearchAttributes) -> Self {
        self.search_attributes = Some(search_attributes);
        self
    }
}
