//! WASM entry points for browser use.

use wasm_bindgen::prelude::*;

use crate::cost;
use crate::deploy;
use crate::error::RecoveryError;
use crate::model::{ClosedJob, JobDraft};
use crate::recover::{build_recovered_job_prefill, RecoveryInput};

/// Recover an editable draft from a pipeline JSON and the on-chain job
/// record. Returns `{status: "success", prefill}` or
/// `{status: "errors", errors: [...]}`.
#[wasm_bindgen]
pub fn recover_job(pipeline_json: &str, closed_job_json: &str, pipeline_cid: Option<String>) -> JsValue {
    let result = recover_job_inner(pipeline_json, closed_job_json, pipeline_cid);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn recover_job_inner(
    pipeline_json: &str,
    closed_job_json: &str,
    pipeline_cid: Option<String>,
) -> RecoverResult {
    let pipeline = match serde_json::from_str::<serde_json::Value>(pipeline_json) {
        Ok(v) => v,
        Err(e) => {
            return RecoverResult::Errors {
                errors: vec![ErrorDto::parse(format!("Failed to parse pipeline JSON: {}", e))],
            };
        }
    };
    let closed_job = match serde_json::from_str::<ClosedJob>(closed_job_json) {
        Ok(j) => j,
        Err(e) => {
            return RecoverResult::Errors {
                errors: vec![ErrorDto::parse(format!(
                    "Failed to parse closed job JSON: {}",
                    e
                ))],
            };
        }
    };

    match build_recovered_job_prefill(RecoveryInput {
        closed_job: &closed_job,
        pipeline: &pipeline,
        pipeline_cid,
    }) {
        Ok(prefill) => RecoverResult::Success {
            prefill: Box::new(prefill),
        },
        Err(e) => RecoverResult::Errors {
            errors: vec![ErrorDto::from(e)],
        },
    }
}

/// Compile a validated draft job into the backend wire payload. Returns
/// `{status: "success", payload}` or `{status: "errors", errors: [...]}`.
#[wasm_bindgen]
pub fn compile_deployment(draft_json: &str) -> JsValue {
    let result = compile_deployment_inner(draft_json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn compile_deployment_inner(draft_json: &str) -> CompileResult {
    let draft = match serde_json::from_str::<JobDraft>(draft_json) {
        Ok(d) => d,
        Err(e) => {
            return CompileResult::Errors {
                errors: vec![ErrorDto::parse(format!(
                    "Failed to parse draft job JSON: {}",
                    e
                ))],
            };
        }
    };
    CompileResult::Success {
        payload: Box::new(deploy::format_deployment_payload(&draft)),
    }
}

/// Total cost of a draft job; `null` when the draft does not parse.
#[wasm_bindgen]
pub fn estimate_job_cost(draft_json: &str) -> JsValue {
    match serde_json::from_str::<JobDraft>(draft_json) {
        Ok(draft) => JsValue::from_f64(cost::job_cost(&draft)),
        Err(_) => JsValue::NULL,
    }
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(serde::Serialize)]
struct ErrorDto {
    code: String,
    message: String,
}

impl ErrorDto {
    fn parse(message: String) -> Self {
        ErrorDto {
            code: "P001".into(),
            message,
        }
    }
}

impl From<RecoveryError> for ErrorDto {
    fn from(e: RecoveryError) -> Self {
        ErrorDto {
            code: e.code().into(),
            message: e.to_string(),
        }
    }
}

#[derive(serde::Serialize)]
#[serde(tag = "status")]
enum RecoverResult {
    #[serde(rename = "success")]
    Success {
        prefill: Box<crate::model::RecoveredJobPrefill>,
    },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ErrorDto> },
}

#[derive(serde::Serialize)]
#[serde(tag = "status")]
enum CompileResult {
    #[serde(rename = "success")]
    Success {
        payload: Box<deploy::DeploymentPayload>,
    },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ErrorDto> },
}
