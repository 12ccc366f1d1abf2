//! Native job payload: in-process plugins with node resource requirements
//! taken from the worker catalog tier.

use serde_json::{Map, Value};

use crate::catalog::{self, data, ContainerOrWorkerType};
use crate::model::{JobDraft, NativeJobDeployment, NativePlugin, Plugin};

use super::{
    deployment_nonce, generic, merge_custom_params, resolve_target_nodes, DeploymentPayload,
    PluginPayload,
};

pub fn format_native_job_payload(
    draft: &JobDraft,
    deployment: &NativeJobDeployment,
) -> DeploymentPayload {
    let tier = catalog::native_type(&draft.specification.resource_type_name)
        .unwrap_or(&data::NATIVE_WORKER_TYPES[0]);
    let (target_nodes, target_nodes_count) = resolve_target_nodes(draft);

    let primary = deployment
        .plugins
        .iter()
        .find_map(|p| match p {
            Plugin::Native(native) => Some(native),
            Plugin::Generic(_) => None,
        });

    let mut app_params = Map::new();
    app_params.insert("NODE_RES_REQ".into(), node_res_req(tier));
    if let Some(primary) = primary {
        // Custom params of the primary plugin ride inside app_params
        // whenever there are any.
        merge_custom_params(&mut app_params, &primary.custom_params);
    }

    let mut pipeline_params = Map::new();
    for entry in &deployment.pipeline_params {
        pipeline_params.insert(entry.key.clone(), Value::String(entry.value.clone()));
    }

    DeploymentPayload {
        app_alias: deployment.job_alias.clone(),
        plugin_signature: primary
            .map(|p| p.signature.clone())
            .unwrap_or_else(|| data::DEFAULT_NATIVE_SIGNATURE.into()),
        nonce: deployment_nonce(),
        target_nodes,
        target_nodes_count,
        app_params,
        pipeline_input_type: deployment.pipeline_input_type.wire_value().into(),
        pipeline_input_uri: deployment.pipeline_input_uri.clone(),
        pipeline_params,
        chainstore_response: false,
        service_replica: None,
        plugins: secondary_plugins(primary, &deployment.plugins),
    }
}

fn node_res_req(tier: &ContainerOrWorkerType) -> Value {
    let mut req = Map::new();
    req.insert("cpu_cores".into(), Value::from(tier.cores));
    req.insert("ram_gb".into(), Value::from(tier.memory_gb));
    req.insert("storage_gb".into(), Value::from(tier.storage_gb));
    Value::Object(req)
}

/// Every plugin other than the primary becomes a `{signature, params}`
/// block of its own.
fn secondary_plugins(
    primary: Option<&NativePlugin>,
    plugins: &[Plugin],
) -> Vec<PluginPayload> {
    plugins
        .iter()
        .filter(|p| match (primary, *p) {
            (Some(primary), Plugin::Native(native)) => !std::ptr::eq(primary, native),
            _ => true,
        })
        .map(|p| match p {
            Plugin::Native(native) => {
                let mut params = Map::new();
                merge_custom_params(&mut params, &native.custom_params);
                PluginPayload {
                    signature: native.signature.clone(),
                    params,
                }
            }
            Plugin::Generic(app) => PluginPayload {
                signature: generic::plugin_signature(app).into(),
                params: generic::app_params(app, None),
            },
        })
        .collect()
}
