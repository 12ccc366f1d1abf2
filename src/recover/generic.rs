//! Generic-family prefill: exactly one app-runner plugin backs the job.

use crate::catalog::is_app_runner_signature;
use crate::error::RecoveryError;
use crate::model::GenericJobDeployment;
use crate::plugins::{format_generic_plugin, required_plugin_config, NormalizedPlugin};

use super::common::CommonPrefill;

pub fn deployment(
    plugins: &[NormalizedPlugin],
    prefill: &CommonPrefill,
) -> Result<GenericJobDeployment, RecoveryError> {
    let config = required_plugin_config(
        plugins,
        "generic job has no app-runner plugin",
        is_app_runner_signature,
    )?;
    Ok(GenericJobDeployment {
        job_alias: prefill.job_alias.clone(),
        app: format_generic_plugin(config),
    })
}
