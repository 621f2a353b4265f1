use super::types::{AnimationRequest, AnimationsResponse};
use serde_json::Value;

pub fn normalize_payload(request: &AnimationRequest, payload: Value) -> AnimationsResponse {
    let animations = if request.is_search() {
        extract_search_results(payload)
    } else {
        extract_popular_results(payload)
    };

    AnimationsResponse { animations }
}

/// Search responses wrap the list as `{ data: { results: { data: [...] } } }`.
pub fn extract_search_results(payload: Value) -> Vec<Value> {
    match take_envelope_list(payload) {
        Some(list) => list,
        None => {
            tracing::debug!("Search envelope missing data.results.data, returning no animations");
            Vec::new()
        }
    }
}

/// Popular listings come either as a bare array (featured resource) or in the search envelope.
pub fn extract_popular_results(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(list) => list,
        other => take_envelope_list(other).unwrap_or_else(|| {
            tracing::debug!("Popular payload is neither a list nor an envelope, returning no animations");
            Vec::new()
        }),
    }
}

fn take_envelope_list(mut payload: Value) -> Option<Vec<Value>> {
    match payload.pointer_mut("/data/results/data").map(Value::take) {
        Some(Value::Array(list)) => Some(list),
        _ => None,
    }
}
