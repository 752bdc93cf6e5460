//! Errors - payload 変換と設定構築のエラー型
//!
//! 変換エラーは `Clone` にしておく。memo の遅延計算が失敗したとき、
//! 同じ失敗を待機中の全呼び出し元に返す必要があるため。

use thiserror::Error;

/// ConvertError は Payload と値の相互変換で起きるエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("payload has no encoding metadata")]
    MissingEncoding,

    #[error("unknown payload encoding: {0}")]
    UnknownEncoding(String),

    #[error("json decode: {0}")]
    Decode(String),

    #[error("json encode: {0}")]
    Encode(String),

    #[error("serialization context rejected: {0}")]
    Context(String),

    #[error("payload codec: {0}")]
    Codec(String),
}

/// SearchAttributeError は search attribute の解釈エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchAttributeError {
    #[error("search attribute '{0}' has no type metadata")]
    MissingType(String),

    #[error("search attribute '{name}' has unknown type '{value_type}'")]
    UnknownType { name: String, value_type: String },

    #[error("search attribute '{name}' has unsupported encoding '{encoding}'")]
    UnsupportedEncoding { name: String, encoding: String },

    #[error("search attribute '{name}' is malformed: {reason}")]
    Malformed { name: String, reason: String },
}

/// QueryArgError は query 引数の取り出しエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryArgError {
    #[error("query argument {index} missing (only {len} supplied)")]
    MissingArg { index: usize, len: usize },

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// BuildError は ClientOptions 構築時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("namespace must not be empty")]
    EmptyNamespace,
}
