use weft_core::WorkflowExecution;
use weft_core::typed::SearchAttributeValue;

pub fn print_execution(exec: &WorkflowExecution) {
    println!("\n=== Workflow Execution ===");
    println!("  {:<16} {}", "Workflow ID", exec.id());
    println!("  {:<16} {}", "Run ID", exec.run_id());
    println!("  {:<16} {}", "Type", exec.workflow_type());
    println!("  {:<16} {}", "Task Queue", exec.task_queue());
    println!("  {:<16} {:?}", "Status", exec.status());
    println!("  {:<16} {}", "Started", exec.start_time().to_rfc3339());
    println!("  {:<16} {}", "Execution Time", or_dash(exec.execution_time().map(|t| t.to_rfc3339())));
    println!("  {:<16} {}", "Closed", or_dash(exec.close_time().map(|t| t.to_rfc3339())));
    println!("  {:<16} {}", "History Length", exec.history_length());
    if let Some(parent) = exec.parent_id() {
        println!(
            "  {:<16} {} ({})",
            "Parent",
            parent,
            or_dash(exec.parent_run_id().map(ToString::to_string))
        );
    }
}

pub fn print_memo(exec: &WorkflowExecution) {
    println!("\n[Memo]");
    let memo = match exec.memo() {
        Ok(memo) => memo,
        Err(e) => {
            println!("  (memo unavailable: {e})");
            return;
        }
    };
    if memo.is_empty() {
        println!("  (No memo)");
        return;
    }

    let mut keys: Vec<&String> = memo.keys().collect();
    keys.sort();
    for key in keys {
        match memo[key].to_value::<serde_json::Value>() {
            Ok(value) => println!("  {:<20} {}", key, value),
            Err(e) => println!("  {:<20} <undecodable: {e}>", key),
        }
    }
}

pub fn print_search_attributes(exec: &WorkflowExecution) {
    println!("\n[Search Attributes]");
    let sa = exec.typed_search_attributes();
    if sa.is_empty() {
        println!("  (No search attributes)");
        return;
    }
    println!("  {:<20} {:<12} {}", "Name", "Type", "Value");
    for (name, value) in sa.iter() {
        println!("  {:<20} {:<12} {}", name, value.value_type(), display_value(value));
    }
}

fn display_value(value: &SearchAttributeValue) -> String {
    match value {
        SearchAttributeValue::Text(s) | SearchAttributeValue::Keyword(s) => s.clone(),
        SearchAttributeValue::Int(v) => v.to_string(),
        SearchAttributeValue::Double(v) => v.to_string(),
        SearchAttributeValue::Bool(v) => v.to_string(),
        SearchAttributeValue::Datetime(v) => v.to_rfc3339(),
        SearchAttributeValue::Duration(v) => format!("{v:?}"),
        SearchAttributeValue::KeywordList(v) => v.join(", "),
    }
}

fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}
