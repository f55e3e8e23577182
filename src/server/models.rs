//! Request bodies.

use serde::{Deserialize, Serialize};

/// Body of `POST /predict`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictRequest {
    /// Missing and `null` both count as empty.
    #[serde(default)]
    pub job_description: Option<String>,
}
