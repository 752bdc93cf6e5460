//! Typed - 不透明な Payload を型付きの値として扱う層
//!
//! # 二層構造
//! - **表層（Typed）**: `DataConverter::to_value::<T>()`, `SearchAttributeKey<K>` - 型安全
//! - **内部（Dyn）**: `PayloadConverter` trait - object-safe, serde_json::Value 経由

pub mod codec;
pub mod memo;
pub mod search_attributes;

// 主要な型を再エクスポート
pub use self::codec::DataConverter;
pub use self::memo::EncodedRawValue;
pub use self::search_attributes::{
    IndexedValueType, SearchAttributeCollection, SearchAttributeCollectionBuilder,
    SearchAttributeKey, SearchAttributeValue,
};
