use serde::{Deserialize, Serialize};

use crate::models::RunReport;
use crate::payload::DecodeSummary;
use crate::segments::SegmentTiming;

/// Full analyse av én kjøring slik den leveres til CLI / Python.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunAnalysis {
    pub run_id: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub model_number: Option<String>,
    pub decode: DecodeSummary,
    pub report: RunReport,
    pub segments: Vec<SegmentTiming>,
}
