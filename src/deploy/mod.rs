//! Deployment phase: validated draft job → exact backend wire payload.
//!
//! Formatters are total functions: input is assumed form-validated, so a
//! malformed draft is a caller bug, not a runtime error to catch here.

pub mod generic;
pub mod native;
pub mod service;

pub use generic::format_generic_job_payload;
pub use native::format_native_job_payload;
pub use service::format_service_job_payload;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::model::{
    CustomParam, CustomParamType, DynamicEnvEntry, FileVolumeEntry, JobDeployment, JobDraft,
    KeyValue, TunnelingConfig,
};
use crate::normalize::normalize_node_address;

/// The wire object submitted to the orchestration backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeploymentPayload {
    pub app_alias: String,
    pub plugin_signature: String,
    pub nonce: String,
    pub target_nodes: Vec<String>,
    pub target_nodes_count: u32,
    pub app_params: Map<String, Value>,
    pub pipeline_input_type: String,
    pub pipeline_input_uri: Option<String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub pipeline_params: Map<String, Value>,
    pub chainstore_response: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_replica: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<PluginPayload>,
}

/// A secondary plugin instance of a native job on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginPayload {
    pub signature: String,
    pub params: Map<String, Value>,
}

/// Dispatch a draft to its family formatter.
pub fn format_deployment_payload(draft: &JobDraft) -> DeploymentPayload {
    match &draft.deployment {
        JobDeployment::Generic(d) => generic::format_generic_job_payload(draft, d),
        JobDeployment::Native(d) => native::format_native_job_payload(draft, d),
        JobDeployment::Service(d) => service::format_service_job_payload(draft, d),
    }
}

static NONCE_WATERMARK: AtomicU64 = AtomicU64::new(0);

/// Backend de-duplication token: hex of the current time in microseconds,
/// forced strictly increasing per call. Not cryptographically significant.
pub fn deployment_nonce() -> String {
    let micros = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
        * 1000;
    let mut prev = NONCE_WATERMARK.load(Ordering::Relaxed);
    loop {
        let next = micros.max(prev + 1);
        match NONCE_WATERMARK.compare_exchange_weak(
            prev,
            next,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => return format!("0x{next:x}"),
            Err(current) => prev = current,
        }
    }
}

/// Explicit node addresses override count-based scheduling: when any are
/// given they go out verbatim with a zero count, otherwise the requested
/// count rides alone.
pub fn resolve_target_nodes(draft: &JobDraft) -> (Vec<String>, u32) {
    let nodes: Vec<String> = draft
        .target_nodes
        .iter()
        .map(|addr| normalize_node_address(addr))
        .filter(|addr| !addr.is_empty())
        .collect();
    if nodes.is_empty() {
        (nodes, draft.specification.target_nodes_count)
    } else {
        (nodes, 0)
    }
}

// ---------------------------------------------------------------------------
// Shared wire serializers
// ---------------------------------------------------------------------------

pub(crate) fn key_values_to_map(entries: &[KeyValue]) -> Value {
    let mut map = Map::new();
    for entry in entries {
        map.insert(entry.key.clone(), Value::String(entry.value.clone()));
    }
    Value::Object(map)
}

pub(crate) fn dynamic_env_to_map(entries: &[DynamicEnvEntry]) -> Value {
    let mut map = Map::new();
    for entry in entries {
        let values: Vec<Value> = entry
            .values
            .iter()
            .map(|v| serde_json::to_value(v).unwrap_or(Value::Null))
            .collect();
        map.insert(entry.key.clone(), Value::Array(values));
    }
    Value::Object(map)
}

pub(crate) fn file_volumes_to_list(entries: &[FileVolumeEntry]) -> Value {
    Value::Array(
        entries
            .iter()
            .map(|e| {
                let mut item = Map::new();
                item.insert("name".into(), Value::String(e.name.clone()));
                item.insert(
                    "mounting_point".into(),
                    Value::String(e.mounting_point.clone()),
                );
                item.insert("content".into(), Value::String(e.content.clone()));
                Value::Object(item)
            })
            .collect(),
    )
}

/// Insert the tunnel triple: engine, its auth token, and the enable flag.
pub(crate) fn insert_tunnel_params(
    params: &mut Map<String, Value>,
    engine: &str,
    token_key: &str,
    tunneling: &TunnelingConfig,
) {
    params.insert("TUNNEL_ENGINE".into(), Value::String(engine.into()));
    params.insert(
        token_key.into(),
        Value::String(tunneling.token.clone().unwrap_or_default()),
    );
    params.insert(
        "TUNNEL_ENGINE_ENABLED".into(),
        Value::Bool(tunneling.enabled),
    );
}

/// Merge custom params back into `app_params`: `json` params are re-parsed
/// to their structured form, `string` params ride as-is.
pub(crate) fn merge_custom_params(params: &mut Map<String, Value>, custom: &[CustomParam]) {
    for param in custom {
        let value = match param.value_type {
            CustomParamType::String => Value::String(param.value.clone()),
            CustomParamType::Json => serde_json::from_str(&param.value)
                .unwrap_or_else(|_| Value::String(param.value.clone())),
        };
        params.insert(param.key.clone(), value);
    }
}
