//! Test fixtures and factory functions for creating test data.

use serde_json::json;
use uuid::Uuid;

/// A legal-looking FEN for test positions. The scheduler never parses
/// it; any distinct string will do.
pub fn unique_fen() -> String {
    format!(
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b kq - {} 3",
        &Uuid::new_v4().to_string()[..8]
    )
}

/// Create a record-attempt request body.
pub fn record_attempt_request(
    item_id: Uuid,
    was_correct: bool,
    attempt_number: i32,
) -> serde_json::Value {
    json!({
        "item_id": item_id,
        "attempt_number": attempt_number,
        "was_correct": was_correct,
        "response_time_ms": 2000
    })
}

/// Create an enqueue-deviation request body.
pub fn enqueue_request(deviation_id: Uuid) -> serde_json::Value {
    json!({ "deviation_id": deviation_id })
}

/// Create an account register request body.
pub fn register_request(name: Option<&str>) -> serde_json::Value {
    match name {
        Some(n) => json!({ "name": n }),
        None => json!({}),
    }
}

/// Create an update config request body.
pub fn update_config_request(
    algorithm_type: Option<&str>,
    max_daily_reviews: Option<i32>,
) -> serde_json::Value {
    let mut obj = serde_json::Map::new();
    if let Some(a) = algorithm_type {
        obj.insert("algorithm_type".to_string(), json!(a));
    }
    if let Some(n) = max_daily_reviews {
        obj.insert("max_daily_reviews".to_string(), json!(n));
    }
    serde_json::Value::Object(obj)
}
