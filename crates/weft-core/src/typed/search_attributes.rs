//! Typed search attributes.
//!
//! Search attribute は memo と違い、アプリの DataConverter を通さない。
//! 各 payload は `type` metadata で自分の型を名乗り、中身は常に `json/plain`。
//!
//! ## Phantom Type パターン
//! `SearchAttributeKey<K>` の `K` はマーカー型（`kind::Keyword` など）で、
//! キーから取り出せる値の型をコンパイル時に決めます。
//!
//! ```ignore
//! let region = KeywordKey::new("region");
//! let v: Option<&String> = collection.get(&region);
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, OnceLock};

use crate::domain::RawSearchAttributes;
use crate::domain::payload::{ENCODING_JSON, METADATA_ENCODING, METADATA_TYPE, Payload};
use crate::error::SearchAttributeError;

/// Value type declared in a search attribute's `type` metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexedValueType {
    Text,
    Keyword,
    Int,
    Double,
    Bool,
    Datetime,
    Duration,
    KeywordList,
}

impl IndexedValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Keyword => "Keyword",
            Self::Int => "Int",
            Self::Double => "Double",
            Self::Bool => "Bool",
            Self::Datetime => "Datetime",
            Self::Duration => "Duration",
            Self::KeywordList => "KeywordList",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let ty = match name {
            "Text" => Self::Text,
            "Keyword" => Self::Keyword,
            "Int" => Self::Int,
            "Double" => Self::Double,
            "Bool" => Self::Bool,
            "Datetime" => Self::Datetime,
            "Duration" => Self::Duration,
            "KeywordList" => Self::KeywordList,
            _ => return None,
        };
        Some(ty)
    }
}

impl fmt::Display for IndexedValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A decoded search attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchAttributeValue {
    Text(String),
    Keyword(String),
    Int(i64),
    Double(f64),
    Bool(bool),
    Datetime(DateTime<Utc>),
    Duration(std::time::Duration),
    KeywordList(Vec<String>),
}

impl SearchAttributeValue {
    pub fn value_type(&self) -> IndexedValueType {
        match self {
            Self::Text(_) => IndexedValueType::Text,
            Self::Keyword(_) => IndexedValueType::Keyword,
            Self::Int(_) => IndexedValueType::Int,
            Self::Double(_) => IndexedValueType::Double,
            Self::Bool(_) => IndexedValueType::Bool,
            Self::Datetime(_) => IndexedValueType::Datetime,
            Self::Duration(_) => IndexedValueType::Duration,
            Self::KeywordList(_) => IndexedValueType::KeywordList,
        }
    }
}

pub mod kind {
    //! Marker types for `SearchAttributeKey<K>`.

    use super::{IndexedValueType, SearchAttributeValue};
    use chrono::{DateTime, Utc};

    /// AttributeKind はマーカー型と値の型を対応付ける
    pub trait AttributeKind: Send + Sync + 'static {
        type Value: Clone + Send + Sync;

        const TYPE: IndexedValueType;

        fn wrap(value: Self::Value) -> SearchAttributeValue;

        fn unwrap(value: &SearchAttributeValue) -> Option<&Self::Value>;
    }

    macro_rules! attribute_kind {
        ($marker:ident, $value:ty) => {
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub enum $marker {}

            impl AttributeKind for $marker {
                type Value = $value;

                const TYPE: IndexedValueType = IndexedValueType::$marker;

                fn wrap(value: Self::Value) -> SearchAttributeValue {
                    SearchAttributeValue::$marker(value)
                }

                fn unwrap(value: &SearchAttributeValue) -> Option<&Self::Value> {
                    match value {
                        SearchAttributeValue::$marker(v) => Some(v),
                        _ => None,
                    }
                }
            }
        };
    }

    attribute_kind!(Text, String);
    attribute_kind!(Keyword, String);
    attribute_kind!(Int, i64);
    attribute_kind!(Double, f64);
    attribute_kind!(Bool, bool);
    attribute_kind!(Datetime, DateTime<Utc>);
    attribute_kind!(Duration, std::time::Duration);
    attribute_kind!(KeywordList, Vec<String>);
}

use self::kind::AttributeKind;

/// Name of a search attribute together with its value type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchAttributeKey<K: AttributeKind> {
    name: String,
    _marker: PhantomData<K>,
}

impl<K: AttributeKind> SearchAttributeKey<K> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> IndexedValueType {
        K::TYPE
    }
}

macro_rules! key_constructor {
    ($fn_name:ident, $marker:ident) => {
        impl SearchAttributeKey<kind::$marker> {
            pub fn $fn_name(name: impl Into<String>) -> Self {
                Self::new(name)
            }
        }
    };
}

key_constructor!(text, Text);
key_constructor!(keyword, Keyword);
key_constructor!(int, Int);
key_constructor!(double, Double);
key_constructor!(bool, Bool);
key_constructor!(datetime, Datetime);
key_constructor!(duration, Duration);
key_constructor!(keyword_list, KeywordList);

pub type TextKey = SearchAttributeKey<kind::Text>;
pub type KeywordKey = SearchAttributeKey<kind::Keyword>;
pub type IntKey = SearchAttributeKey<kind::Int>;
pub type DoubleKey = SearchAttributeKey<kind::Double>;
pub type BoolKey = SearchAttributeKey<kind::Bool>;
pub type DatetimeKey = SearchAttributeKey<kind::Datetime>;
pub type DurationKey = SearchAttributeKey<kind::Duration>;
pub type KeywordListKey = SearchAttributeKey<kind::KeywordList>;

/// Read-only typed view over a workflow's search attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchAttributeCollection {
    values: BTreeMap<String, SearchAttributeValue>,
}

static EMPTY: OnceLock<Arc<SearchAttributeCollection>> = OnceLock::new();

impl SearchAttributeCollection {
    /// Shared empty collection (the same `Arc` every time).
    pub fn empty() -> Arc<Self> {
        Arc::clone(EMPTY.get_or_init(|| Arc::new(Self::default())))
    }

    pub fn builder() -> SearchAttributeCollectionBuilder {
        SearchAttributeCollectionBuilder::default()
    }

    pub fn to_builder(&self) -> SearchAttributeCollectionBuilder {
        SearchAttributeCollectionBuilder {
            values: self.values.clone(),
        }
    }

    /// Build from raw attributes, skipping entries that cannot be decoded.
    pub fn from_raw(raw: &RawSearchAttributes) -> Self {
        let mut values = BTreeMap::new();
        for (name, payload) in &raw.indexed_fields {
            match decode_entry(name, payload) {
                Ok(value) => {
                    values.insert(name.clone(), value);
                }
                Err(e) => tracing::warn!(error = %e, "skipping search attribute"),
            }
        }
        Self { values }
    }

    /// Like `from_raw`, but fails on the first entry that cannot be decoded.
    pub fn try_from_raw(raw: &RawSearchAttributes) -> Result<Self, SearchAttributeError> {
        let values = raw
            .indexed_fields
            .iter()
            .map(|(name, payload)| Ok((name.clone(), decode_entry(name, payload)?)))
            .collect::<Result<BTreeMap<_, _>, SearchAttributeError>>()?;
        Ok(Self { values })
    }

    /// Encode back into the raw wire shape.
    pub fn to_raw(&self) -> Result<RawSearchAttributes, SearchAttributeError> {
        let indexed_fields = self
            .values
            .iter()
            .map(|(name, value)| Ok((name.clone(), encode_entry(name, value)?)))
            .collect::<Result<_, SearchAttributeError>>()?;
        Ok(RawSearchAttributes { indexed_fields })
    }

    /// Typed lookup. `None` when absent or stored with a different type.
    pub fn get<K: AttributeKind>(&self, key: &SearchAttributeKey<K>) -> Option<&K::Value> {
        self.values.get(key.name()).and_then(K::unwrap)
    }

    pub fn get_untyped(&self, name: &str) -> Option<&SearchAttributeValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 名前順でイテレート
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SearchAttributeValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchAttributeCollectionBuilder {
    values: BTreeMap<String, SearchAttributeValue>,
}

impl SearchAttributeCollectionBuilder {
    /// Set (or overwrite) a value.
    pub fn set<K: AttributeKind>(mut self, key: &SearchAttributeKey<K>, value: K::Value) -> Self {
        self.values.insert(key.name().to_string(), K::wrap(value));
        self
    }

    pub fn unset(mut self, name: &str) -> Self {
        self.values.remove(name);
        self
    }

    pub fn build(self) -> SearchAttributeCollection {
        SearchAttributeCollection {
            values: self.values,
        }
    }
}

fn decode_entry(name: &str, payload: &Payload) -> Result<SearchAttributeValue, SearchAttributeError> {
    let type_name = payload
        .metadata_str(METADATA_TYPE)
        .ok_or_else(|| SearchAttributeError::MissingType(name.to_string()))?;
    let value_type =
        IndexedValueType::from_name(type_name).ok_or_else(|| SearchAttributeError::UnknownType {
            name: name.to_string(),
            value_type: type_name.to_string(),
        })?;

    match payload.encoding() {
        Some(ENCODING_JSON) => {}
        other => {
            return Err(SearchAttributeError::UnsupportedEncoding {
                name: name.to_string(),
                encoding: other.unwrap_or_default().to_string(),
            });
        }
    }

    let data = &payload.data;
    let value = match value_type {
        IndexedValueType::Text => SearchAttributeValue::Text(from_json(name, data)?),
        IndexedValueType::Keyword => SearchAttributeValue::Keyword(from_json(name, data)?),
        IndexedValueType::Int => SearchAttributeValue::Int(from_json(name, data)?),
        IndexedValueType::Double => SearchAttributeValue::Double(from_json(name, data)?),
        IndexedValueType::Bool => SearchAttributeValue::Bool(from_json(name, data)?),
        IndexedValueType::Datetime => SearchAttributeValue::Datetime(from_json(name, data)?),
        IndexedValueType::Duration => SearchAttributeValue::Duration(from_json(name, data)?),
        IndexedValueType::KeywordList => SearchAttributeValue::KeywordList(from_json(name, data)?),
    };
    Ok(value)
}

fn encode_entry(name: &str, value: &SearchAttributeValue) -> Result<Payload, SearchAttributeError> {
    let data = match value {
        SearchAttributeValue::Text(v) | SearchAttributeValue::Keyword(v) => to_json(name, v)?,
        SearchAttributeValue::Int(v) => to_json(name, v)?,
        // JSON has no NaN or infinity; serde_json would write `null`
        SearchAttributeValue::Double(v) if !v.is_finite() => {
            return Err(SearchAttributeError::Malformed {
                name: name.to_string(),
                reason: format!("double value {v} is not finite"),
            });
        }
        SearchAttributeValue::Double(v) => to_json(name, v)?,
        SearchAttributeValue::Bool(v) => to_json(name, v)?,
        SearchAttributeValue::Datetime(v) => to_json(name, v)?,
        SearchAttributeValue::Duration(v) => to_json(name, v)?,
        SearchAttributeValue::KeywordList(v) => to_json(name, v)?,
    };
    Ok(Payload::new(data)
        .with_metadata(METADATA_ENCODING, ENCODING_JSON)
        .with_metadata(METADATA_TYPE, value.value_type().as_str()))
}

fn from_json<T: DeserializeOwned>(name: &str, data: &[u8]) -> Result<T, SearchAttributeError> {
    serde_json::from_slice(data).map_err(|e| SearchAttributeError::Malformed {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

fn to_json<T: Serialize + ?Sized>(name: &str, value: &T) -> Result<Vec<u8>, SearchAttributeError> {
    serde_json::to_vec(value).map_err(|e| SearchAttributeError::Malformed {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
