//! Recovered prefill: the recovery compiler's output contract.

use serde::{Deserialize, Serialize};

use super::job::{JobDraft, JobFamily};

/// An editable draft reconstructed from a deployed job's pipeline. Produced
/// only by the recovery compiler and consumed only by the edit form; it is
/// never sent back to the wire without going through the deployment payload
/// compiler first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveredJobPrefill {
    pub project_hash: String,
    pub job_family: JobFamily,
    pub source_job_id: u64,
    pub pipeline_cid: Option<String>,
    pub project_name_hint: Option<String>,
    pub form_values: JobDraft,
}
