//! Plugin decoder: wire-shape normalization and typed projection.

use serde_json::json;

use deeploy_compiler::error::RecoveryError;
use deeploy_compiler::model::{
    CustomParamType, DynamicEnvKind, PluginDeploymentType, Visibility,
};
use deeploy_compiler::plugins::{
    custom_params, deployment_type_of, dynamic_env_entries, format_generic_plugin,
    normalize_plugins, required_plugin_config, DYNAMIC_ENV_SLOTS,
};

#[test]
fn normalize_plugins_accepts_array_shape() {
    let pipeline = json!({
        "PLUGINS": [
            {
                "SIGNATURE": "CONTAINER_APP_RUNNER",
                "INSTANCES": [{"INSTANCE_CONF": {"IMAGE": "nginx:latest"}}]
            }
        ]
    });
    let plugins = normalize_plugins(&pipeline);
    assert_eq!(plugins.len(), 1);
    assert_eq!(plugins[0].signature, "CONTAINER_APP_RUNNER");
    assert_eq!(plugins[0].instances.len(), 1);
    assert_eq!(plugins[0].instances[0]["IMAGE"], "nginx:latest");
}

#[test]
fn normalize_plugins_accepts_map_shape() {
    let pipeline = json!({
        "plugins": {
            "SOME_NATIVE_01": [
                {"instance_conf": {"PARAM": 1}},
                {"PARAM": 2}
            ]
        }
    });
    let plugins = normalize_plugins(&pipeline);
    assert_eq!(plugins.len(), 1);
    assert_eq!(plugins[0].signature, "SOME_NATIVE_01");
    assert_eq!(plugins[0].instances.len(), 2);
    assert_eq!(plugins[0].instances[1]["PARAM"], 2);
}

#[test]
fn normalize_plugins_drops_malformed_entries() {
    let pipeline = json!({
        "PLUGINS": [
            {"INSTANCES": [{"IMAGE": "no-signature"}]},
            {"SIGNATURE": "EMPTY_LIST", "INSTANCES": []},
            {"SIGNATURE": "EMPTY_CONF", "INSTANCES": [{"INSTANCE_CONF": {}}]},
            {"SIGNATURE": "KEPT", "INSTANCES": [{"X": 1}]}
        ]
    });
    let plugins = normalize_plugins(&pipeline);
    assert_eq!(plugins.len(), 1);
    assert_eq!(plugins[0].signature, "KEPT");
}

#[test]
fn normalize_plugins_without_collection_is_empty() {
    assert!(normalize_plugins(&json!({})).is_empty());
    assert!(normalize_plugins(&json!({"PLUGINS": "nope"})).is_empty());
}

#[test]
fn required_plugin_config_fails_when_absent() {
    let plugins = normalize_plugins(&json!({
        "PLUGINS": [{"SIGNATURE": "OTHER", "INSTANCES": [{"X": 1}]}]
    }));
    let err = required_plugin_config(&plugins, "app-runner missing", |s| {
        s == "CONTAINER_APP_RUNNER"
    })
    .unwrap_err();
    assert!(matches!(err, RecoveryError::MissingPluginConfiguration(_)));
    assert_eq!(err.code(), "R003");
}

#[test]
fn deployment_type_defaults_to_public_docker_io() {
    let config = json!({"IMAGE": "nginx:latest"});
    match deployment_type_of(&config) {
        PluginDeploymentType::Container(c) => {
            assert_eq!(c.container_image, "nginx:latest");
            assert_eq!(c.container_registry, "docker.io");
            assert_eq!(c.cr_visibility, Visibility::Public);
            assert_eq!(c.cr_username, None);
        }
        other => panic!("expected container, got {other:?}"),
    }
}

#[test]
fn deployment_type_infers_private_from_username() {
    let config = json!({
        "IMAGE": "acme/api",
        "CR_DATA": {"SERVER": "ghcr.io", "USERNAME": "bot", "PASSWORD": "pw"}
    });
    match deployment_type_of(&config) {
        PluginDeploymentType::Container(c) => {
            assert_eq!(c.container_registry, "ghcr.io");
            assert_eq!(c.cr_visibility, Visibility::Private);
            assert_eq!(c.cr_username.as_deref(), Some("bot"));
            assert_eq!(c.cr_password.as_deref(), Some("pw"));
        }
        other => panic!("expected container, got {other:?}"),
    }
}

#[test]
fn vcs_data_selects_worker_with_inferred_visibility() {
    let config = json!({
        "IMAGE": "rust:1.84",
        "VCS_DATA": {"REPO_URL": "https://github.com/acme/bot", "TOKEN": "gh-tok"},
        "BUILD_AND_RUN_COMMANDS": ["cargo build --release", "./target/release/bot"]
    });
    match deployment_type_of(&config) {
        PluginDeploymentType::Worker(w) => {
            assert_eq!(w.repository_url, "https://github.com/acme/bot");
            assert_eq!(w.repository_visibility, Visibility::Private);
            assert_eq!(w.repository_username, None);
            assert_eq!(w.repository_access_token.as_deref(), Some("gh-tok"));
            assert_eq!(w.worker_commands.len(), 2);
        }
        other => panic!("expected worker, got {other:?}"),
    }

    // build commands land in worker_commands only, never as a custom param
    let app = format_generic_plugin(&config);
    assert!(app.custom_params.is_empty());

    let public = json!({
        "IMAGE": "rust:1.84",
        "VCS_DATA": {"REPO_URL": "https://github.com/acme/bot"}
    });
    match deployment_type_of(&public) {
        PluginDeploymentType::Worker(w) => {
            assert_eq!(w.repository_visibility, Visibility::Public)
        }
        other => panic!("expected worker, got {other:?}"),
    }
}

#[test]
fn custom_params_keep_strings_and_serialize_the_rest() {
    let config = json!({
        "IMAGE": "kept-out",
        "FLAG": "on",
        "RETRY": {"count": 3}
    });
    let params = custom_params(&config, &["IMAGE"]);
    assert_eq!(params.len(), 2);
    let flag = params.iter().find(|p| p.key == "FLAG").unwrap();
    assert_eq!(flag.value, "on");
    assert_eq!(flag.value_type, CustomParamType::String);
    let retry = params.iter().find(|p| p.key == "RETRY").unwrap();
    assert_eq!(retry.value, r#"{"count":3}"#);
    assert_eq!(retry.value_type, CustomParamType::Json);
}

#[test]
fn dynamic_env_is_always_three_slots() {
    for raw_count in [1usize, 3, 5] {
        let raw_values: Vec<_> = (0..raw_count)
            .map(|i| json!({"type": "static", "value": format!("v{i}")}))
            .collect();
        let config = json!({"DYNAMIC_ENV": {"KEY": raw_values}});
        let entries = dynamic_env_entries(&config);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].values.len(), DYNAMIC_ENV_SLOTS);
    }
}

#[test]
fn dynamic_env_pads_with_empty_static_slots() {
    let config = json!({
        "DYNAMIC_ENV": {"UPSTREAM": [{"type": "host_ip", "value": ""}]}
    });
    let entries = dynamic_env_entries(&config);
    assert_eq!(entries[0].values[0].kind, DynamicEnvKind::HostIp);
    assert_eq!(entries[0].values[1].kind, DynamicEnvKind::Static);
    assert_eq!(entries[0].values[1].value, "");
    assert_eq!(entries[0].values[2].kind, DynamicEnvKind::Static);
}
