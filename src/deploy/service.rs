//! Service job payload: single-node managed image on the ngrok tunnel.
//! Image and port always come from the catalog descriptor.

use serde_json::{Map, Value};

use crate::catalog::{self, data, ServiceType};
use crate::model::{JobDraft, ServiceJobDeployment};

use super::{
    deployment_nonce, insert_tunnel_params, key_values_to_map, resolve_target_nodes,
    DeploymentPayload,
};

pub const SERVICE_TUNNEL_ENGINE: &str = "ngrok";
pub const SERVICE_TUNNEL_TOKEN_KEY: &str = "NGROK_AUTH_TOKEN";
pub const SERVICE_PLUGIN_SIGNATURE: &str = "CONTAINER_APP_RUNNER";

pub fn format_service_job_payload(
    draft: &JobDraft,
    deployment: &ServiceJobDeployment,
) -> DeploymentPayload {
    let service = resolve_service(draft, deployment);
    let (target_nodes, _) = resolve_target_nodes(draft);

    let mut app_params = Map::new();
    app_params.insert("IMAGE".into(), Value::String(service.image.into()));
    app_params.insert("PORT".into(), Value::from(service.port));
    insert_tunnel_params(
        &mut app_params,
        SERVICE_TUNNEL_ENGINE,
        SERVICE_TUNNEL_TOKEN_KEY,
        &deployment.tunneling,
    );
    app_params.insert("ENV".into(), key_values_to_map(&deployment.inputs));
    app_params.insert("RESTART_POLICY".into(), Value::String("always".into()));
    app_params.insert("IMAGE_PULL_POLICY".into(), Value::String("always".into()));

    DeploymentPayload {
        app_alias: deployment.job_alias.clone(),
        plugin_signature: SERVICE_PLUGIN_SIGNATURE.into(),
        nonce: deployment_nonce(),
        target_nodes,
        // Service jobs are single-node by definition.
        target_nodes_count: 1,
        app_params,
        pipeline_input_type: "void".into(),
        pipeline_input_uri: None,
        pipeline_params: Map::new(),
        chainstore_response: true,
        service_replica: Some(deployment.service_replica),
        plugins: Vec::new(),
    }
}

/// The tier named by the specification wins; the service identity is the
/// fallback for drafts that never went through tier selection.
fn resolve_service(draft: &JobDraft, deployment: &ServiceJobDeployment) -> &'static ServiceType {
    catalog::service_type(&draft.specification.resource_type_name)
        .or_else(|| catalog::service_by_name(&deployment.service_name))
        .unwrap_or(&data::SERVICE_TYPES[0])
}
