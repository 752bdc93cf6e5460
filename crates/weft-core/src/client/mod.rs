//! Client - 取得済みワークフロー実行の読み取り側
//!
//! # 主要コンポーネント
//! - **WorkflowExecution**: 実行レコードのファサード（memo / search attribute を遅延デコード）
//! - **ClientOptions**: namespace と DataConverter の設定、レコードのラップ

pub mod options;
pub mod workflow_execution;

pub use self::options::{ClientConfig, ClientOptions, ClientOptionsBuilder, DEFAULT_NAMESPACE};
pub use crate::error::BuildError;
pub use self::workflow_execution::{Memo, WorkflowExecution};
