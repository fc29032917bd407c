use serde::{Deserialize, Serialize};

use crate::domain::value_objects::severity::Severity;

/// A prioritized maintenance suggestion derived from session history.
/// Deduplicated by `(category, text)` within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Severity,
    pub category: String,
    pub text: String,
}
