use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_ANIMATION_TYPE: &str = "animation";

/// Which upstream listing a request targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationRequest {
    Search { query: String, kind: String },
    Popular { kind: String },
}

impl AnimationRequest {
    /// Builds a request from raw query pairs. The first `q` and `type` win;
    /// missing or empty values fall back to the defaults instead of rejecting.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let query = first_value(pairs, "q");
        let kind = match first_value(pairs, "type") {
            "" => DEFAULT_ANIMATION_TYPE,
            kind => kind,
        }
        .to_string();

        if query.is_empty() {
            AnimationRequest::Popular { kind }
        } else {
            AnimationRequest::Search { query: query.to_string(), kind }
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            AnimationRequest::Search { kind, .. } | AnimationRequest::Popular { kind } => kind,
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(self, AnimationRequest::Search { .. })
    }

    pub fn cache_key(&self) -> String {
        match self {
            AnimationRequest::Search { query, kind } => format!("search:{}:{}", kind, query),
            AnimationRequest::Popular { kind } => format!("popular:{}", kind),
        }
    }
}

fn first_value<'a>(pairs: &'a [(String, String)], name: &str) -> &'a str {
    pairs
        .iter()
        .find(|(key, _)| key.as_str() == name)
        .map(|(_, value)| value.as_str())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnimationsResponse {
    pub animations: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
