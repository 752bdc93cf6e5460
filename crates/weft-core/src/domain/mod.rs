//! Domain model (IDs, payloads, raw execution records, ...).
//!
//! ここにある型はサーバーから取得したままの「生データ」です。
//! デコードは `typed` / `client` 側で行います。

pub mod execution_info;
pub mod ids;
pub mod payload;
pub mod state;

pub use self::execution_info::{
    RawMemo, RawSearchAttributes, WorkflowExecutionInfo, WorkflowExecutionRef, WorkflowType,
};
pub use self::ids::{QueryId, RunId, WorkflowId};
pub use self::payload::Payload;
pub use self::state::WorkflowExecutionStatus;
