#![allow(dead_code)]

use deeploy_compiler::model::*;

// =============================================================================
// Closed-job and draft builders
// =============================================================================

/// On-chain record for a job deployed under the given job-type code.
pub fn closed_job(job_type: u8) -> ClosedJob {
    ClosedJob {
        id: 7,
        project_hash: "0xproj".into(),
        job_type,
        number_of_nodes_requested: 2,
        project_name: Some("Demo Project".into()),
    }
}

/// A public container plugin on port 8080 with a cloudflare token.
pub fn container_plugin() -> GenericPlugin {
    GenericPlugin {
        deployment_type: PluginDeploymentType::Container(ContainerDeployment {
            container_image: "acme/api:1.4".into(),
            container_registry: "docker.io".into(),
            cr_visibility: Visibility::Public,
            cr_username: None,
            cr_password: None,
        }),
        port: Some(8080),
        tunneling: TunnelingConfig {
            enabled: true,
            token: Some("cf-tok".into()),
        },
        env_vars: vec![KeyValue::new("MODE", "prod")],
        dynamic_env_vars: vec![],
        volumes: vec![],
        file_volumes: vec![],
        restart_policy: RestartPolicy::Always,
        image_pull_policy: ImagePullPolicy::Always,
        custom_params: vec![],
    }
}

/// Validated generic draft: MED1, 2 nodes, 3 paid months.
pub fn generic_draft() -> JobDraft {
    JobDraft {
        specification: JobSpecification {
            family: JobFamily::Generic,
            target_nodes_count: 2,
            job_tags: vec!["web".into()],
            nodes_countries: vec![],
            resource_type_name: "MED1".into(),
            gpu_type_name: None,
        },
        payment_months_count: 3,
        target_nodes: vec![],
        spare_nodes: vec![],
        allow_replication_in_the_wild: true,
        deployment: JobDeployment::Generic(GenericJobDeployment {
            job_alias: "acme-api".into(),
            app: container_plugin(),
        }),
    }
}

/// Validated native draft: N-MED with a bot plugin carrying custom params.
pub fn native_draft() -> JobDraft {
    JobDraft {
        specification: JobSpecification {
            family: JobFamily::Native,
            target_nodes_count: 1,
            job_tags: vec![],
            nodes_countries: vec![],
            resource_type_name: "N-MED".into(),
            gpu_type_name: None,
        },
        payment_months_count: 1,
        target_nodes: vec![],
        spare_nodes: vec![],
        allow_replication_in_the_wild: true,
        deployment: JobDeployment::Native(NativeJobDeployment {
            job_alias: "feed-bot".into(),
            plugins: vec![Plugin::Native(NativePlugin {
                signature: "TELEGRAM_BASIC_BOT_01".into(),
                tunneling: TunnelingConfig::default(),
                custom_params: vec![CustomParam {
                    key: "TELEGRAM_BOT_TOKEN".into(),
                    value: "tg-123".into(),
                    value_type: CustomParamType::String,
                }],
            })],
            pipeline_input_type: PipelineInputType::Url,
            pipeline_input_uri: Some("https://example.com/feed.json".into()),
            pipeline_params: vec![KeyValue::new("SOURCE", "feed")],
        }),
    }
}

/// Validated service draft: PGSQL-LOW with one overridden input.
pub fn service_draft() -> JobDraft {
    JobDraft {
        specification: JobSpecification {
            family: JobFamily::Service,
            target_nodes_count: 3,
            job_tags: vec![],
            nodes_countries: vec![],
            resource_type_name: "PGSQL-LOW".into(),
            gpu_type_name: None,
        },
        payment_months_count: 1,
        target_nodes: vec![],
        spare_nodes: vec![],
        allow_replication_in_the_wild: false,
        deployment: JobDeployment::Service(ServiceJobDeployment {
            job_alias: "team-db".into(),
            service_name: "PostgreSQL".into(),
            inputs: vec![KeyValue::new("POSTGRES_PASSWORD", "s3cret")],
            service_replica: 2,
            tunneling: TunnelingConfig {
                enabled: true,
                token: Some("ngrok-tok".into()),
            },
        }),
    }
}
