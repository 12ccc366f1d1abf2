//! Native-family prefill: every decoded plugin becomes a form entry.

use serde_json::Value;

use crate::model::{NativeJobDeployment, PipelineInputType};
use crate::normalize::{get_key, non_empty_string_at};
use crate::plugins::{classify_plugin, key_value_entries, NormalizedPlugin};

use super::common::CommonPrefill;

/// Upper bound on plugin instances an edit form will take back.
const MAX_PLUGINS: usize = 5;

pub fn deployment(
    pipeline: &Value,
    specs: &Value,
    plugins: &[NormalizedPlugin],
    prefill: &CommonPrefill,
) -> NativeJobDeployment {
    let form_plugins = plugins
        .iter()
        .flat_map(|p| {
            p.instances
                .iter()
                .map(|config| classify_plugin(&p.signature, config))
        })
        .take(MAX_PLUGINS)
        .collect();

    NativeJobDeployment {
        job_alias: prefill.job_alias.clone(),
        plugins: form_plugins,
        pipeline_input_type: PipelineInputType::resolve(get_key(pipeline, "PIPELINE_INPUT_TYPE")),
        pipeline_input_uri: non_empty_string_at(pipeline, "PIPELINE_INPUT_URI"),
        pipeline_params: key_value_entries(specs, "job_config"),
    }
}
