//! Impls - ports のデフォルト実装
//!
//! # 含まれる実装
//! - **JsonPayloadConverter**: `binary/null` と `json/plain` を扱う標準コンバーター

pub mod json_converter;

pub use self::json_converter::JsonPayloadConverter;
