//! Deployment payload compilation, one suite per job family, plus the
//! recovery → deployment round trip.

mod helpers;

use serde_json::{json, Value};

use deeploy_compiler::deploy::{
    deployment_nonce, format_deployment_payload, format_generic_job_payload,
    format_native_job_payload, format_service_job_payload,
};
use deeploy_compiler::model::{
    ContainerDeployment, JobDeployment, Plugin, PluginDeploymentType, Visibility,
};
use deeploy_compiler::recover::{build_recovered_job_prefill, RecoveryInput};

use helpers::{closed_job, generic_draft, native_draft, service_draft};

const GENERIC_PIPELINE: &str = include_str!("fixtures/generic_pipeline.json");

fn generic_deployment(
    draft: &deeploy_compiler::model::JobDraft,
) -> &deeploy_compiler::model::GenericJobDeployment {
    match &draft.deployment {
        JobDeployment::Generic(d) => d,
        other => panic!("expected generic deployment, got {other:?}"),
    }
}

#[test]
fn generic_payload_carries_wire_exact_fields() {
    let draft = generic_draft();
    let payload = format_generic_job_payload(&draft, generic_deployment(&draft));

    assert_eq!(payload.app_alias, "acme-api");
    assert_eq!(payload.plugin_signature, "CONTAINER_APP_RUNNER");
    assert_eq!(payload.target_nodes, Vec::<String>::new());
    assert_eq!(payload.target_nodes_count, 2);
    assert_eq!(payload.pipeline_input_type, "void");
    assert!(payload.chainstore_response);
    assert_eq!(payload.service_replica, None);

    let params = &payload.app_params;
    assert_eq!(params["IMAGE"], "acme/api:1.4");
    assert_eq!(params["TUNNEL_ENGINE"], "cloudflare");
    assert_eq!(params["CLOUDFLARE_TOKEN"], "cf-tok");
    assert_eq!(params["TUNNEL_ENGINE_ENABLED"], json!(true));
    assert_eq!(params["PORT"], json!(8080));
    // policies go out lowercase
    assert_eq!(params["RESTART_POLICY"], "always");
    assert_eq!(params["IMAGE_PULL_POLICY"], "always");
    assert_eq!(params["ENV"], json!({"MODE": "prod"}));

    // public registry: server only, no credentials
    assert_eq!(params["CR_DATA"], json!({"SERVER": "docker.io"}));

    insta::assert_snapshot!(
        serde_json::to_string(&params["CONTAINER_RESOURCES"]).unwrap(),
        @r#"{"cpu":8,"memory":"16g","ports":[8080]}"#
    );
}

#[test]
fn private_registry_credentials_ride_in_cr_data() {
    let mut draft = generic_draft();
    let JobDeployment::Generic(d) = &mut draft.deployment else {
        unreachable!()
    };
    d.app.deployment_type = PluginDeploymentType::Container(ContainerDeployment {
        container_image: "ghcr.io/acme/api:1.4".into(),
        container_registry: "ghcr.io".into(),
        cr_visibility: Visibility::Private,
        cr_username: Some("bot".into()),
        cr_password: Some("pw".into()),
    });
    let payload = format_generic_job_payload(&draft, generic_deployment(&draft));
    assert_eq!(
        payload.app_params["CR_DATA"],
        json!({"SERVER": "ghcr.io", "USERNAME": "bot", "PASSWORD": "pw"})
    );
}

#[test]
fn explicit_target_nodes_zero_the_count() {
    let mut draft = generic_draft();
    draft.target_nodes = vec!["0xaiNodeOne".into(), "  ".into(), "node-two".into()];
    let payload = format_deployment_payload(&draft);
    assert_eq!(payload.target_nodes, vec!["0xai_NodeOne", "0xai_node-two"]);
    assert_eq!(payload.target_nodes_count, 0);
}

#[test]
fn native_payload_merges_custom_params_and_resources() {
    let draft = native_draft();
    let payload = match &draft.deployment {
        JobDeployment::Native(d) => format_native_job_payload(&draft, d),
        other => panic!("expected native deployment, got {other:?}"),
    };

    assert_eq!(payload.plugin_signature, "TELEGRAM_BASIC_BOT_01");
    assert!(!payload.chainstore_response);
    assert_eq!(payload.pipeline_input_type, "url");
    assert_eq!(
        payload.pipeline_input_uri.as_deref(),
        Some("https://example.com/feed.json")
    );
    assert_eq!(payload.pipeline_params["SOURCE"], "feed");

    // non-empty custom params always merge into app_params
    assert_eq!(payload.app_params["TELEGRAM_BOT_TOKEN"], "tg-123");

    insta::assert_snapshot!(
        serde_json::to_string(&payload.app_params["NODE_RES_REQ"]).unwrap(),
        @r#"{"cpu_cores":2,"ram_gb":4,"storage_gb":20}"#
    );
}

#[test]
fn native_secondary_plugins_get_their_own_blocks() {
    let mut draft = native_draft();
    let JobDeployment::Native(d) = &mut draft.deployment else {
        unreachable!()
    };
    d.plugins.push(Plugin::Native(deeploy_compiler::model::NativePlugin {
        signature: "SENTIMENT_SCORER_01".into(),
        tunneling: Default::default(),
        custom_params: vec![],
    }));

    let JobDeployment::Native(d) = &draft.deployment else {
        unreachable!()
    };
    let payload = format_native_job_payload(&draft, d);
    // the first native plugin is the primary; only the second rides along
    assert_eq!(payload.plugins.len(), 1);
    assert_eq!(payload.plugins[0].signature, "SENTIMENT_SCORER_01");
}

#[test]
fn service_payload_is_single_node_on_ngrok() {
    let draft = service_draft();
    let payload = match &draft.deployment {
        JobDeployment::Service(d) => format_service_job_payload(&draft, d),
        other => panic!("expected service deployment, got {other:?}"),
    };

    assert_eq!(payload.plugin_signature, "CONTAINER_APP_RUNNER");
    // single-node by definition, regardless of the requested count
    assert_eq!(payload.target_nodes_count, 1);
    assert_eq!(payload.service_replica, Some(2));

    let params = &payload.app_params;
    // image and port are catalog-owned
    assert_eq!(params["IMAGE"], "postgres:17");
    assert_eq!(params["PORT"], json!(5432));
    assert_eq!(params["TUNNEL_ENGINE"], "ngrok");
    assert_eq!(params["NGROK_AUTH_TOKEN"], "ngrok-tok");
    assert_eq!(params["ENV"], json!({"POSTGRES_PASSWORD": "s3cret"}));
}

#[test]
fn nonce_is_strictly_increasing() {
    let nonces: Vec<u64> = (0..50)
        .map(|_| {
            let nonce = deployment_nonce();
            let hex = nonce.strip_prefix("0x").expect("nonce should be 0x-prefixed");
            u64::from_str_radix(hex, 16).expect("nonce should be hex")
        })
        .collect();
    for pair in nonces.windows(2) {
        assert!(pair[1] > pair[0], "nonce went backwards: {pair:?}");
    }
}

#[test]
fn recovered_generic_job_round_trips_cr_data() {
    let pipeline: Value = serde_json::from_str(GENERIC_PIPELINE).unwrap();
    let job = closed_job(3);
    let prefill = build_recovered_job_prefill(RecoveryInput {
        closed_job: &job,
        pipeline: &pipeline,
        pipeline_cid: None,
    })
    .expect("recovery should succeed");

    let payload = format_deployment_payload(&prefill.form_values);

    let original_cr =
        &pipeline["PLUGINS"][0]["INSTANCES"][0]["INSTANCE_CONF"]["CR_DATA"];
    assert_eq!(&payload.app_params["CR_DATA"], original_cr);

    // explicit recovered nodes override the count
    assert_eq!(payload.target_nodes, vec!["0xai_AbCd111", "0xai_NodeTwo"]);
    assert_eq!(payload.target_nodes_count, 0);
    // recovered custom params come back to the wire in structured form
    assert_eq!(payload.app_params["RETRY_SPEC"], json!({"count": 3}));
    assert_eq!(payload.app_params["RESTART_POLICY"], "unless-stopped");
}
