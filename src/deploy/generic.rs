//! Generic job payload: containerized/worker app on the cloudflare tunnel.

use serde_json::{Map, Value};

use crate::catalog::{self, data::GENERIC_CONTAINER_TYPES, ContainerOrWorkerType};
use crate::model::{
    GenericJobDeployment, GenericPlugin, JobDraft, PluginDeploymentType, Visibility,
};

use super::{
    deployment_nonce, dynamic_env_to_map, file_volumes_to_list, insert_tunnel_params,
    key_values_to_map, merge_custom_params, resolve_target_nodes, DeploymentPayload,
};

pub const GENERIC_TUNNEL_ENGINE: &str = "cloudflare";
pub const GENERIC_TUNNEL_TOKEN_KEY: &str = "CLOUDFLARE_TOKEN";

pub fn format_generic_job_payload(
    draft: &JobDraft,
    deployment: &GenericJobDeployment,
) -> DeploymentPayload {
    let tier = catalog::generic_type(&draft.specification.resource_type_name)
        .unwrap_or(&GENERIC_CONTAINER_TYPES[0]);
    let (target_nodes, target_nodes_count) = resolve_target_nodes(draft);

    DeploymentPayload {
        app_alias: deployment.job_alias.clone(),
        plugin_signature: plugin_signature(&deployment.app).into(),
        nonce: deployment_nonce(),
        target_nodes,
        target_nodes_count,
        app_params: app_params(&deployment.app, Some(tier)),
        pipeline_input_type: "void".into(),
        pipeline_input_uri: None,
        pipeline_params: Map::new(),
        chainstore_response: true,
        service_replica: None,
        plugins: Vec::new(),
    }
}

pub(crate) fn plugin_signature(app: &GenericPlugin) -> &'static str {
    match app.deployment_type {
        PluginDeploymentType::Container(_) => "CONTAINER_APP_RUNNER",
        PluginDeploymentType::Worker(_) => "WORKER_APP_RUNNER",
    }
}

/// The `app_params` block of a generic plugin. `tier` is `None` for
/// secondary plugins of native jobs, which carry no container resources of
/// their own.
pub(crate) fn app_params(
    app: &GenericPlugin,
    tier: Option<&ContainerOrWorkerType>,
) -> Map<String, Value> {
    let mut params = Map::new();

    match &app.deployment_type {
        PluginDeploymentType::Container(container) => {
            params.insert(
                "IMAGE".into(),
                Value::String(container.container_image.clone()),
            );
            let mut cr_data = Map::new();
            cr_data.insert(
                "SERVER".into(),
                Value::String(container.container_registry.clone()),
            );
            // Credentials ride only for private registries.
            if container.cr_visibility == Visibility::Private {
                cr_data.insert(
                    "USERNAME".into(),
                    Value::String(container.cr_username.clone().unwrap_or_default()),
                );
                cr_data.insert(
                    "PASSWORD".into(),
                    Value::String(container.cr_password.clone().unwrap_or_default()),
                );
            }
            params.insert("CR_DATA".into(), Value::Object(cr_data));
        }
        PluginDeploymentType::Worker(worker) => {
            params.insert("IMAGE".into(), Value::String(worker.worker_image.clone()));
            let mut vcs_data = Map::new();
            vcs_data.insert(
                "REPO_URL".into(),
                Value::String(worker.repository_url.clone()),
            );
            if let Some(username) = &worker.repository_username {
                vcs_data.insert("USERNAME".into(), Value::String(username.clone()));
            }
            if let Some(token) = &worker.repository_access_token {
                vcs_data.insert("TOKEN".into(), Value::String(token.clone()));
            }
            params.insert("VCS_DATA".into(), Value::Object(vcs_data));
            params.insert(
                "BUILD_AND_RUN_COMMANDS".into(),
                Value::Array(
                    worker
                        .worker_commands
                        .iter()
                        .map(|c| Value::String(c.clone()))
                        .collect(),
                ),
            );
        }
    }

    if let Some(tier) = tier {
        params.insert(
            "CONTAINER_RESOURCES".into(),
            container_resources(tier, app.port),
        );
    }
    if let Some(port) = app.port {
        params.insert("PORT".into(), Value::from(port));
    }
    insert_tunnel_params(
        &mut params,
        GENERIC_TUNNEL_ENGINE,
        GENERIC_TUNNEL_TOKEN_KEY,
        &app.tunneling,
    );
    params.insert("VOLUMES".into(), key_values_to_map(&app.volumes));
    if !app.file_volumes.is_empty() {
        params.insert("FILE_VOLUMES".into(), file_volumes_to_list(&app.file_volumes));
    }
    params.insert("ENV".into(), key_values_to_map(&app.env_vars));
    params.insert("DYNAMIC_ENV".into(), dynamic_env_to_map(&app.dynamic_env_vars));
    // Policies are Titlecase in the model, lowercase on the wire.
    params.insert(
        "RESTART_POLICY".into(),
        Value::String(app.restart_policy.wire_value().into()),
    );
    params.insert(
        "IMAGE_PULL_POLICY".into(),
        Value::String(app.image_pull_policy.wire_value().into()),
    );
    merge_custom_params(&mut params, &app.custom_params);
    params
}

fn container_resources(tier: &ContainerOrWorkerType, port: Option<u16>) -> Value {
    let mut resources = Map::new();
    resources.insert("cpu".into(), Value::from(tier.cores));
    resources.insert("memory".into(), Value::String(format!("{}g", tier.memory_gb)));
    resources.insert(
        "ports".into(),
        Value::Array(port.map(Value::from).into_iter().collect()),
    );
    Value::Object(resources)
}
