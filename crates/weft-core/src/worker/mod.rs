//! Worker - 実行中ワークフローへの inbound 呼び出し

pub mod query;

pub use self::query::{HandleQueryInput, WorkflowQueryDefinition};
