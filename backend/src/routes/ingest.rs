use serde::{Deserialize, Serialize};

/// Successful CSV ingestion summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    pub message: String,
    /// Number of readings stored from the upload.
    pub records: usize,
}

impl IngestResponse {
    pub fn new(records: usize) -> Self {
        Self {
            message: "Records processed successfully!".to_string(),
            records,
        }
    }
}

/// Route function name constant for CSV ingestion
pub const POST_DATA: &str = "ingest_data";
