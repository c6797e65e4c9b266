//! Per-submission trace context
//!
//! Every form submission, seed request or JSON API call gets a fresh root
//! context in the server. The services hand a child of it to each store
//! call, so all log lines of one submission share a `trace_id` while the
//! `span_id` tells the model call, the store query and the inserts apart.

use std::fmt;

use uuid::Uuid;

/// Log correlation ids for one pipeline run. Never sent to the model or
/// the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// Shared by every step of the submission
    pub trace_id: String,
    /// Unique to this step
    pub span_id: String,
    /// `span_id` of the step that issued this one; `None` for the submission itself
    pub parent_id: Option<String>,
}

impl TraceContext {
    /// Context for a new user submission.
    pub fn new_root() -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string(),
            span_id: Uuid::new_v4().to_string(),
            parent_id: None,
        }
    }

    /// Context for a store call made on behalf of this submission.
    pub fn new_child(&self) -> Self {
        Self {
            trace_id: self.trace_id.clone(),
            span_id: Uuid::new_v4().to_string(),
            parent_id: Some(self.span_id.clone()),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// `trace_id/span_id`, the form used in server log lines.
impl fmt::Display for TraceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.trace_id, self.span_id)
    }
}
