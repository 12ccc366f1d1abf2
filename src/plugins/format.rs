//! Projection of raw instance configs into typed `Plugin` values.

use serde_json::Value;

use crate::model::{
    ContainerDeployment, CustomParam, CustomParamType, DynamicEnvEntry, DynamicEnvKind,
    DynamicEnvValue, FileVolumeEntry, GenericPlugin, ImagePullPolicy, KeyValue, NativePlugin,
    Plugin, PluginDeploymentType, RestartPolicy, TunnelingConfig, Visibility, WorkerDeployment,
};
use crate::normalize::{
    get_key, non_empty_string_at, port_at, string_at, string_list_at, to_boolean_value,
    to_string_value,
};

pub const DEFAULT_CONTAINER_REGISTRY: &str = "docker.io";

/// Every dynamic-env key carries exactly this many value slots on the wire.
pub const DYNAMIC_ENV_SLOTS: usize = 3;

/// Config keys the generic formatter consumes itself; everything else in
/// the raw config becomes a custom param.
const GENERIC_RESERVED_KEYS: [&str; 16] = [
    "IMAGE",
    "CR_DATA",
    "VCS_DATA",
    "BUILD_AND_RUN_COMMANDS",
    "ENV",
    "DYNAMIC_ENV",
    "VOLUMES",
    "FILE_VOLUMES",
    "CONTAINER_RESOURCES",
    "PORT",
    "RESTART_POLICY",
    "IMAGE_PULL_POLICY",
    "TUNNEL_ENGINE",
    "TUNNEL_ENGINE_ENABLED",
    "CLOUDFLARE_TOKEN",
    "NGROK_AUTH_TOKEN",
];

const NATIVE_RESERVED_KEYS: [&str; 5] = [
    "INSTANCE_ID",
    "TUNNEL_ENGINE",
    "TUNNEL_ENGINE_ENABLED",
    "CLOUDFLARE_TOKEN",
    "NGROK_AUTH_TOKEN",
];

/// Structural classifier: a `VCS_DATA` block selects a worker build, its
/// absence a prebuilt container image.
pub fn deployment_type_of(config: &Value) -> PluginDeploymentType {
    let image = string_at(config, "IMAGE");

    if let Some(vcs) = get_key(config, "VCS_DATA").filter(|v| v.is_object()) {
        let username = non_empty_string_at(vcs, "USERNAME");
        let access_token = non_empty_string_at(vcs, "TOKEN");
        let visibility = if username.is_some() || access_token.is_some() {
            Visibility::Private
        } else {
            Visibility::Public
        };
        return PluginDeploymentType::Worker(WorkerDeployment {
            worker_image: image,
            repository_url: string_at(vcs, "REPO_URL"),
            repository_visibility: visibility,
            repository_username: username,
            repository_access_token: access_token,
            worker_commands: string_list_at(config, "BUILD_AND_RUN_COMMANDS"),
        });
    }

    let cr_data = get_key(config, "CR_DATA");
    let registry = cr_data
        .and_then(|cr| non_empty_string_at(cr, "SERVER"))
        .unwrap_or_else(|| DEFAULT_CONTAINER_REGISTRY.to_string());
    let username = cr_data.and_then(|cr| non_empty_string_at(cr, "USERNAME"));
    let password = cr_data.and_then(|cr| non_empty_string_at(cr, "PASSWORD"));
    // Visibility is inferred: a username means the registry needs auth.
    let visibility = if username.is_some() {
        Visibility::Private
    } else {
        Visibility::Public
    };
    PluginDeploymentType::Container(ContainerDeployment {
        container_image: image,
        container_registry: registry,
        cr_visibility: visibility,
        cr_username: username,
        cr_password: password,
    })
}

/// `ENV`/`VOLUMES`-style object maps become ordered key/value rows.
pub fn key_value_entries(config: &Value, key: &str) -> Vec<KeyValue> {
    match get_key(config, key) {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(k, v)| KeyValue::new(k.clone(), to_string_value(Some(v))))
            .collect(),
        _ => Vec::new(),
    }
}

/// Decode `DYNAMIC_ENV`, padding or truncating every entry to exactly
/// three value slots.
pub fn dynamic_env_entries(config: &Value) -> Vec<DynamicEnvEntry> {
    let Some(Value::Object(map)) = get_key(config, "DYNAMIC_ENV") else {
        return Vec::new();
    };
    map.iter()
        .map(|(key, raw_values)| {
            let mut values: Vec<DynamicEnvValue> = match raw_values {
                Value::Array(items) => items
                    .iter()
                    .take(DYNAMIC_ENV_SLOTS)
                    .map(dynamic_env_value)
                    .collect(),
                _ => Vec::new(),
            };
            values.resize_with(DYNAMIC_ENV_SLOTS, DynamicEnvValue::empty);
            DynamicEnvEntry {
                key: key.clone(),
                values,
            }
        })
        .collect()
}

fn dynamic_env_value(raw: &Value) -> DynamicEnvValue {
    let kind = match string_at(raw, "type").trim().to_ascii_lowercase().as_str() {
        "host_ip" => DynamicEnvKind::HostIp,
        _ => DynamicEnvKind::Static,
    };
    DynamicEnvValue {
        kind,
        value: string_at(raw, "value"),
    }
}

/// Decode `FILE_VOLUMES`, keeping the first entry per name.
pub fn file_volume_entries(config: &Value) -> Vec<FileVolumeEntry> {
    let Some(Value::Array(items)) = get_key(config, "FILE_VOLUMES") else {
        return Vec::new();
    };
    let mut entries: Vec<FileVolumeEntry> = Vec::new();
    for item in items {
        let Some(name) = non_empty_string_at(item, "NAME") else {
            continue;
        };
        if entries.iter().any(|e| e.name == name) {
            continue;
        }
        entries.push(FileVolumeEntry {
            name,
            mounting_point: string_at(item, "MOUNTING_POINT"),
            content: string_at(item, "CONTENT"),
        });
    }
    entries
}

/// Tunnel config of a plugin instance. Enablement defaults to `true`:
/// legacy pipelines predate the flag and were always exposed.
pub fn tunneling_of(config: &Value) -> TunnelingConfig {
    let token = non_empty_string_at(config, "CLOUDFLARE_TOKEN")
        .or_else(|| non_empty_string_at(config, "NGROK_AUTH_TOKEN"));
    TunnelingConfig {
        enabled: to_boolean_value(get_key(config, "TUNNEL_ENGINE_ENABLED"), true),
        token,
    }
}

/// Non-reserved config keys become custom params. Raw strings stay
/// `string`; anything else is carried as serialized `json`.
pub fn custom_params(config: &Value, reserved: &[&str]) -> Vec<CustomParam> {
    let Some(map) = config.as_object() else {
        return Vec::new();
    };
    map.iter()
        .filter(|(key, _)| !reserved.iter().any(|r| r.eq_ignore_ascii_case(key)))
        .map(|(key, value)| {
            let value_type = if value.is_string() {
                CustomParamType::String
            } else {
                CustomParamType::Json
            };
            CustomParam {
                key: key.clone(),
                value: to_string_value(Some(value)),
                value_type,
            }
        })
        .collect()
}

/// Project a raw app-runner config into a typed generic plugin.
pub fn format_generic_plugin(config: &Value) -> GenericPlugin {
    GenericPlugin {
        deployment_type: deployment_type_of(config),
        port: port_at(config, "PORT"),
        tunneling: tunneling_of(config),
        env_vars: key_value_entries(config, "ENV"),
        dynamic_env_vars: dynamic_env_entries(config),
        volumes: key_value_entries(config, "VOLUMES"),
        file_volumes: file_volume_entries(config),
        restart_policy: RestartPolicy::resolve(get_key(config, "RESTART_POLICY")),
        image_pull_policy: ImagePullPolicy::resolve(get_key(config, "IMAGE_PULL_POLICY")),
        custom_params: custom_params(config, &GENERIC_RESERVED_KEYS),
    }
}

/// Project a raw native plugin config into its typed form.
pub fn format_native_plugin(signature: &str, config: &Value) -> NativePlugin {
    NativePlugin {
        signature: signature.to_string(),
        tunneling: tunneling_of(config),
        custom_params: custom_params(config, &NATIVE_RESERVED_KEYS),
    }
}

/// Classify one decoded instance by its signature.
pub fn classify_plugin(signature: &str, config: &Value) -> Plugin {
    if crate::catalog::is_app_runner_signature(signature) {
        Plugin::Generic(format_generic_plugin(config))
    } else {
        Plugin::Native(format_native_plugin(signature, config))
    }
}
