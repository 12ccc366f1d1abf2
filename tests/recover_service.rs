//! Recovery of managed service jobs: image matching and input refill.

mod helpers;

use serde_json::json;

use deeploy_compiler::error::RecoveryError;
use deeploy_compiler::model::{JobDeployment, JobFamily, KeyValue};
use deeploy_compiler::recover::{build_recovered_job_prefill, RecoveryInput};

use helpers::closed_job;

const SERVICE_PIPELINE: &str = include_str!("fixtures/service_pipeline.json");

#[test]
fn digest_suffixed_image_matches_catalog_service() {
    let pipeline = serde_json::from_str(SERVICE_PIPELINE).expect("fixture should parse");
    let job = closed_job(9); // PGSQL-LOW
    let prefill = build_recovered_job_prefill(RecoveryInput {
        closed_job: &job,
        pipeline: &pipeline,
        pipeline_cid: None,
    })
    .expect("recovery should succeed");

    assert_eq!(prefill.job_family, JobFamily::Service);
    assert_eq!(prefill.form_values.specification.resource_type_name, "PGSQL-LOW");
    assert_eq!(prefill.form_values.specification.gpu_type_name, None);

    let JobDeployment::Service(deployment) = &prefill.form_values.deployment else {
        panic!("expected a service deployment");
    };
    assert_eq!(deployment.service_name, "PostgreSQL");
    assert_eq!(deployment.service_replica, 2);
    assert!(deployment.tunneling.enabled);
    assert_eq!(deployment.tunneling.token.as_deref(), Some("ngrok-tok"));

    // deployed ENV wins, declared defaults fill the rest
    assert_eq!(
        deployment.inputs,
        vec![
            KeyValue::new("POSTGRES_USER", "postgres"),
            KeyValue::new("POSTGRES_PASSWORD", "s3cret"),
            KeyValue::new("POSTGRES_DB", "postgres"),
        ]
    );
}

#[test]
fn foreign_image_is_unrecoverable() {
    let pipeline = json!({
        "DEEPLOY_SPECS": {},
        "PLUGINS": [{
            "SIGNATURE": "CONTAINER_APP_RUNNER",
            "INSTANCES": [{"INSTANCE_CONF": {"IMAGE": "mariadb:11"}}]
        }]
    });
    let job = closed_job(9);
    let err = build_recovered_job_prefill(RecoveryInput {
        closed_job: &job,
        pipeline: &pipeline,
        pipeline_cid: None,
    })
    .unwrap_err();
    assert_eq!(err, RecoveryError::UnknownServiceImage("mariadb:11".into()));
    assert_eq!(err.code(), "R004");
}

#[test]
fn exact_image_match_wins_without_normalization() {
    let pipeline = json!({
        "DEEPLOY_SPECS": {},
        "PLUGINS": [{
            "SIGNATURE": "CONTAINER_APP_RUNNER",
            "INSTANCES": [{"INSTANCE_CONF": {"IMAGE": "redis:7.4"}}]
        }]
    });
    let job = closed_job(13); // REDIS-LOW
    let prefill = build_recovered_job_prefill(RecoveryInput {
        closed_job: &job,
        pipeline: &pipeline,
        pipeline_cid: None,
    })
    .expect("recovery should succeed");

    let JobDeployment::Service(deployment) = &prefill.form_values.deployment else {
        panic!("expected a service deployment");
    };
    assert_eq!(deployment.service_name, "Redis");
    // Redis declares no inputs
    assert!(deployment.inputs.is_empty());
    assert_eq!(deployment.service_replica, 1);
}
