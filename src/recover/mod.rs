//! Recovery phase: raw pipeline JSON + on-chain job → `RecoveredJobPrefill`.
//!
//! Recovery never guesses: a structurally required but absent element is a
//! typed hard failure, while cosmetic gaps fall back to deterministic
//! defaults.

pub mod common;
pub mod generic;
pub mod native;
pub mod service;

use serde_json::Value;

use crate::catalog;
use crate::error::RecoveryError;
use crate::model::{
    ClosedJob, JobDeployment, JobDraft, JobFamily, JobSpecification, RecoveredJobPrefill,
};
use crate::normalize::get_key;
use crate::plugins::normalize_plugins;

/// Everything recovery consumes. The pipeline is the backend's stored
/// description of the deployed job; the closed job is its on-chain record.
#[derive(Debug, Clone)]
pub struct RecoveryInput<'a> {
    pub closed_job: &'a ClosedJob,
    pub pipeline: &'a Value,
    pub pipeline_cid: Option<String>,
}

/// Rebuild an editable draft from a deployed (often closed) job.
pub fn build_recovered_job_prefill(
    input: RecoveryInput<'_>,
) -> Result<RecoveredJobPrefill, RecoveryError> {
    let job = input.closed_job;
    let pipeline = input.pipeline;

    // 1. Structural checks
    if !pipeline.is_object() {
        return Err(RecoveryError::MalformedPipeline(
            "pipeline payload is not an object".into(),
        ));
    }
    let specs = get_key(pipeline, "DEEPLOY_SPECS")
        .filter(|s| s.is_object())
        .ok_or_else(|| {
            RecoveryError::MalformedPipeline("pipeline has no DEEPLOY_SPECS block".into())
        })?;
    let resource = catalog::resource_for_job_type(job.job_type)
        .ok_or(RecoveryError::UnsupportedJobType(job.job_type))?;

    // 2. Common defaults
    let prefill = common::common_prefill(job, pipeline, specs, resource);

    // 3. Decode plugins; a prefill is meaningless with zero plugin configs
    let plugins = normalize_plugins(pipeline);
    if plugins.is_empty() {
        return Err(RecoveryError::MissingPluginConfiguration(
            "pipeline carries no decodable plugin instances".into(),
        ));
    }

    // 4. Family dispatch
    let deployment = match resource.family() {
        JobFamily::Generic => JobDeployment::Generic(generic::deployment(&plugins, &prefill)?),
        JobFamily::Native => {
            JobDeployment::Native(native::deployment(pipeline, specs, &plugins, &prefill))
        }
        JobFamily::Service => {
            JobDeployment::Service(service::deployment(&plugins, specs, &prefill)?)
        }
    };

    // 5. Assemble
    let specification = JobSpecification {
        family: resource.family(),
        target_nodes_count: prefill.target_nodes_count,
        job_tags: prefill.job_tags.clone(),
        nodes_countries: prefill.nodes_countries.clone(),
        resource_type_name: resource.name().to_string(),
        gpu_type_name: prefill.gpu_type_name.clone(),
    };
    Ok(RecoveredJobPrefill {
        project_hash: job.project_hash.clone(),
        job_family: resource.family(),
        source_job_id: job.id,
        pipeline_cid: input.pipeline_cid,
        project_name_hint: job.project_name.clone(),
        form_values: JobDraft {
            specification,
            payment_months_count: 1,
            target_nodes: prefill.target_nodes,
            spare_nodes: prefill.spare_nodes,
            allow_replication_in_the_wild: prefill.allow_replication_in_the_wild,
            deployment,
        },
    })
}
