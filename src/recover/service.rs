//! Service-family prefill: resolve the deployed image back to a catalog
//! service and refill its declared inputs.

use serde_json::Value;

use crate::catalog::{is_app_runner_signature, service_for_image};
use crate::error::RecoveryError;
use crate::model::{KeyValue, ServiceJobDeployment};
use crate::normalize::{get_key, string_at, to_string_value};
use crate::plugins::{required_plugin_config, tunneling_of, NormalizedPlugin};

use super::common::CommonPrefill;

pub fn deployment(
    plugins: &[NormalizedPlugin],
    specs: &Value,
    prefill: &CommonPrefill,
) -> Result<ServiceJobDeployment, RecoveryError> {
    let config = required_plugin_config(
        plugins,
        "service job has no app-runner plugin",
        is_app_runner_signature,
    )?;

    // A foreign image is unrecoverable: the form can only edit catalog
    // services.
    let image = string_at(config, "IMAGE");
    let service =
        service_for_image(&image).ok_or_else(|| RecoveryError::UnknownServiceImage(image))?;

    // Declared inputs refill from the deployed ENV, else their defaults.
    let env = get_key(config, "ENV");
    let inputs = service
        .inputs
        .iter()
        .map(|input| {
            let deployed = env
                .and_then(|e| get_key(e, input.key))
                .map(|v| to_string_value(Some(v)))
                .filter(|v| !v.is_empty());
            KeyValue::new(input.key, deployed.unwrap_or_else(|| input.default_value.to_string()))
        })
        .collect();

    Ok(ServiceJobDeployment {
        job_alias: prefill.job_alias.clone(),
        service_name: service.service.to_string(),
        inputs,
        service_replica: service_replica(specs),
        tunneling: tunneling_of(config),
    })
}

fn service_replica(specs: &Value) -> u32 {
    match get_key(specs, "service_replica") {
        Some(Value::Number(n)) => n.as_u64().map(|r| r as u32).filter(|r| *r >= 1).unwrap_or(1),
        Some(Value::String(s)) => s.trim().parse().ok().filter(|r| *r >= 1).unwrap_or(1),
        _ => 1,
    }
}
