//! State - ワークフロー実行の状態

use serde::{Deserialize, Serialize};

/// WorkflowExecutionStatus はサーバーが報告する実行状態
///
/// SCREAMING_SNAKE_CASE でシリアライズ（RUNNING / COMPLETED / ...）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowExecutionStatus {
    #[default]
    Unspecified,
    Running,
    Completed,
    Failed,
    Canceled,
    Terminated,
    ContinuedAsNew,
    TimedOut,
}

impl WorkflowExecutionStatus {
    /// Running と Unspecified 以外はすべて終了状態
    pub fn is_closed(&self) -> bool {
        !matches!(self, Self::Unspecified | Self::Running)
    }
}
