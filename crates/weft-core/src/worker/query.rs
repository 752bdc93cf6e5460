//! Inbound query の受け渡しデータ
//!
//! dispatcher が作り、handler を呼ぶ側が一度だけ消費する“運搬用”データ。
//! 引数と header はデコードせずに運ぶ。

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{Payload, QueryId};
use crate::error::QueryArgError;
use crate::typed::DataConverter;

/// Registered query handler's definition (validated elsewhere).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowQueryDefinition {
    name: Option<String>,
    description: Option<String>,
}

impl WorkflowQueryDefinition {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: None,
        }
    }

    /// 名前を持たない、どの query 名でも受ける定義
    pub fn dynamic() -> Self {
        Self {
            name: None,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_dynamic(&self) -> bool {
        self.name.is_none()
    }
}

/// Input for handling one query.
///
/// `headers: None` means nothing was propagated, which is not the same as an
/// empty map.
#[derive(Debug, Clone)]
pub struct HandleQueryInput {
    id: QueryId,
    query: String,
    definition: Arc<WorkflowQueryDefinition>,
    args: Vec<Payload>,
    headers: Option<HashMap<String, Payload>>,
}

impl HandleQueryInput {
    pub fn new(
        id: QueryId,
        query: impl Into<String>,
        definition: Arc<WorkflowQueryDefinition>,
        args: Vec<Payload>,
        headers: Option<HashMap<String, Payload>>,
    ) -> Self {
        Self {
            id,
            query: query.into(),
            definition,
            args,
            headers,
        }
    }

    pub fn id(&self) -> &QueryId {
        &self.id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn definition(&self) -> &Arc<WorkflowQueryDefinition> {
        &self.definition
    }

    pub fn args(&self) -> &[Payload] {
        &self.args
    }

    pub fn headers(&self) -> Option<&HashMap<String, Payload>> {
        self.headers.as_ref()
    }

    /// Decode the argument at `index` with `converter`.
    pub fn decode_arg<T: DeserializeOwned>(
        &self,
        index: usize,
        converter: &DataConverter,
    ) -> Result<T, QueryArgError> {
        let payload = self.args.get(index).ok_or(QueryArgError::MissingArg {
            index,
            len: self.args.len(),
        })?;
        Ok(converter.to_value(payload)?)
    }
}
