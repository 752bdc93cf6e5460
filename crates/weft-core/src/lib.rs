//! weft-core
//!
//! Client-side view of workflow executions and the worker-side query input.
//!
//! # モジュール構成
//! - **domain**: 生データ（ids, payload, execution_info, state）
//! - **ports**: 差し替え可能な境界（PayloadConverter, PayloadCodec）
//! - **impls**: ports のデフォルト実装（JsonPayloadConverter）
//! - **typed**: 型付き API（DataConverter, EncodedRawValue, SearchAttributeCollection）
//! - **lazy**: 一度だけ計算するセル（LockedOnce, RacyOnce）
//! - **client**: WorkflowExecution ファサードと ClientOptions
//! - **worker**: HandleQueryInput
//! - **error**: エラー型

pub mod client;
pub mod domain;
pub mod error;
pub mod impls;
pub mod lazy;
pub mod ports;
pub mod typed;
pub mod worker;

pub use self::client::{ClientOptions, WorkflowExecution};
pub use self::error::{BuildError, ConvertError, QueryArgError, SearchAttributeError};
pub use self::typed::{DataConverter, EncodedRawValue, SearchAttributeCollection};
pub use self::worker::HandleQueryInput;
