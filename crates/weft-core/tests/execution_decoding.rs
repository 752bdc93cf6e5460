use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use weft_core::client::{ClientOptions, WorkflowExecution};
use weft_core::domain::{Payload, RunId, WorkflowExecutionInfo, WorkflowId};
use weft_core::impls::JsonPayloadConverter;
use weft_core::ports::{PayloadConverter, SerializationContext};
use weft_core::typed::search_attributes::KeywordKey;
use weft_core::{ConvertError, DataConverter, SearchAttributeCollection};

fn record() -> WorkflowExecutionInfo {
    WorkflowExecutionInfo::new(
        WorkflowId::new("order-42"),
        RunId::new("5d2ae6f4-8c8b-4f5e-9c3e-0d1b2a3c4d5e"),
        "OrderWorkflow",
        "orders",
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
    )
}

/// すべての payload を拒否する converter（search attribute が converter を使わないことの確認用）
struct RejectEverything;

impl PayloadConverter for RejectEverything {
    fn to_value(&self, _payload: &Payload) -> Result<serde_json::Value, ConvertError> {
        Err(ConvertError::Decode("rejected".to_string()))
    }

    fn to_payload(&self, _value: &serde_json::Value) -> Result<Payload, ConvertError> {
        Err(ConvertError::Encode("rejected".to_string()))
    }

    fn with_context(
        &self,
        _context: &SerializationContext,
    ) -> Result<Option<Arc<dyn PayloadConverter>>, ConvertError> {
        Err(ConvertError::Context("rejected".to_string()))
    }
}

/// with_context を遅くして、同時アクセスが確実に重なるようにする
struct SlowBinder {
    binds: Arc<AtomicUsize>,
}

impl PayloadConverter for SlowBinder {
    fn to_value(&self, payload: &Payload) -> Result<serde_json::Value, ConvertError> {
        JsonPayloadConverter.to_value(payload)
    }

    fn to_payload(&self, value: &serde_json::Value) -> Result<Payload, ConvertError> {
        JsonPayloadConverter.to_payload(value)
    }

    fn with_context(
        &self,
        _context: &SerializationContext,
    ) -> Result<Option<Arc<dyn PayloadConverter>>, ConvertError> {
        self.binds.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(25));
        Ok(Some(Arc::new(JsonPayloadConverter)))
    }
}

#[test]
fn memo_entries_decode_on_demand() {
    let dc = DataConverter::default();
    let raw = record()
        .with_memo_field("a", dc.to_payload("hello").unwrap())
        .with_memo_field("b", dc.to_payload(&42).unwrap());
    let exec = WorkflowExecution::new(Arc::new(raw), dc, None);

    let memo = exec.memo().unwrap();
    assert_eq!(memo["a"].to_value::<String>().unwrap(), "hello");
    assert_eq!(memo["b"].to_value::<i64>().unwrap(), 42);
    assert!(matches!(
        memo["a"].to_value::<i64>(),
        Err(ConvertError::Decode(_))
    ));
    // 失敗した後でも同じエントリは読める
    assert_eq!(memo["a"].to_value::<String>().unwrap(), "hello");
}

#[test]
fn concurrent_memo_access_binds_once() {
    const THREADS: usize = 16;

    let binds = Arc::new(AtomicUsize::new(0));
    let json = DataConverter::default();
    let raw = record()
        .with_memo_field("a", json.to_payload("x").unwrap())
        .with_memo_field("b", json.to_payload(&1).unwrap())
        .with_memo_field("c", json.to_payload(&true).unwrap());
    let options = ClientOptions::builder()
        .namespace("billing")
        .data_converter(DataConverter::new(SlowBinder {
            binds: binds.clone(),
        }))
        .build()
        .unwrap();
    let exec = options.wrap_execution(raw);
    let barrier = Barrier::new(THREADS);

    let key_sets: Vec<HashSet<String>> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    exec.memo().unwrap().keys().cloned().collect::<HashSet<_>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(binds.load(Ordering::SeqCst), 1);
    let expected: HashSet<String> = ["a", "b", "c"].into_iter().map(String::from).collect();
    assert!(key_sets.iter().all(|keys| *keys == expected));
}

#[test]
fn memo_without_raw_memo_is_stably_empty() {
    let exec = WorkflowExecution::new(
        Arc::new(record()),
        DataConverter::new(RejectEverything),
        Some("ns".to_string()),
    );
    let first = exec.memo().unwrap();
    let second = exec.memo().unwrap();
    assert!(first.is_empty());
    assert_eq!(first.len(), second.len());
    assert!(std::ptr::eq(first, second));
}

#[test]
fn search_attributes_never_touch_the_converter() {
    let sa = SearchAttributeCollection::builder()
        .set(&KeywordKey::new("region"), "us-east".to_string())
        .build()
        .to_raw()
        .unwrap();
    let exec = WorkflowExecution::new(
        Arc::new(record().with_search_attributes(sa)),
        DataConverter::new(RejectEverything),
        Some("ns".to_string()),
    );

    let typed = exec.typed_search_attributes();
    assert_eq!(
        typed.get(&KeywordKey::new("region")).map(String::as_str),
        Some("us-east")
    );
    assert!(Arc::ptr_eq(&typed, &exec.typed_search_attributes()));
}

#[test]
fn search_attributes_publish_one_instance_under_contention() {
    const THREADS: usize = 8;

    let sa = SearchAttributeCollection::builder()
        .set(&KeywordKey::new("region"), "eu".to_string())
        .build()
        .to_raw()
        .unwrap();
    let exec = WorkflowExecution::new(
        Arc::new(record().with_search_attributes(sa)),
        DataConverter::default(),
        None,
    );
    let barrier = Barrier::new(THREADS);

    let seen: Vec<Arc<SearchAttributeCollection>> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    exec.typed_search_attributes()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let settled = exec.typed_search_attributes();
    assert!(seen.iter().all(|sa| Arc::ptr_eq(sa, &settled)));
}

#[test]
fn nullable_times_stay_null() {
    let exec = WorkflowExecution::new(Arc::new(record()), DataConverter::default(), None);
    assert_eq!(exec.close_time(), None);
    assert_eq!(exec.execution_time(), None);
    assert_eq!(
        exec.start_time(),
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    );
}

#[test]
fn record_loaded_from_json_decodes_memo() {
    let json = serde_json::json!({
        "execution": { "workflow_id": "wf-json", "run_id": "c9bf9e57-1685-4c89-bafb-ff5af830be8a" },
        "parent_execution": { "workflow_id": "wf-parent", "run_id": "0f8fad5b-d9cb-469f-a165-70867728950e" },
        "status": "COMPLETED",
        "start_time": "2024-01-01T00:00:00Z",
        "close_time": "2024-01-01T00:05:00Z",
        "history_length": 11,
        "task_queue": "default",
        "type": { "name": "Greeter" },
        "memo": { "fields": {
            "owner": {
                "metadata": { "encoding": b"json/plain".to_vec() },
                "data": b"\"alice\"".to_vec()
            }
        } }
    });
    let raw: WorkflowExecutionInfo = serde_json::from_value(json).unwrap();
    let exec = ClientOptions::builder().build().unwrap().wrap_execution(raw);

    assert_eq!(exec.run_id().as_str(), "c9bf9e57-1685-4c89-bafb-ff5af830be8a");
    assert_eq!(exec.parent_id().map(|id| id.as_str()), Some("wf-parent"));
    assert_eq!(
        exec.parent_run_id().map(|id| id.as_str()),
        Some("0f8fad5b-d9cb-469f-a165-70867728950e")
    );
    assert_eq!(exec.history_length(), 11);
    assert!(exec.close_time().is_some());
    assert_eq!(
        exec.memo().unwrap()["owner"].to_value::<String>().unwrap(),
        "alice"
    );
}
