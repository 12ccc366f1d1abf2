//! Plugin-level model types shared by recovery and deployment.
//!
//! These are the serde target for the edit form's draft state. Shapes here
//! mirror what the form binds to, not what the backend wire carries; the
//! deploy formatters own the wire projection.

use serde::{Deserialize, Serialize};

/// Registry/repository visibility. Inferred from credential presence during
/// recovery, user-declared only for container registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Private,
}

/// One `{key, value}` row of an ordered collection (env vars, volumes,
/// pipeline params, service inputs). Keys are unique case-sensitively;
/// order is kept for UI stability only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        KeyValue {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Value source of one dynamic-env slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DynamicEnvKind {
    #[serde(rename = "static")]
    Static,
    #[serde(rename = "host_ip")]
    HostIp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicEnvValue {
    #[serde(rename = "type")]
    pub kind: DynamicEnvKind,
    pub value: String,
}

impl DynamicEnvValue {
    pub fn empty() -> Self {
        DynamicEnvValue {
            kind: DynamicEnvKind::Static,
            value: String::new(),
        }
    }
}

/// A dynamic env var. The wire format requires exactly three value slots
/// per key; recovery pads or truncates to keep that invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicEnvEntry {
    pub key: String,
    pub values: Vec<DynamicEnvValue>,
}

/// A file mounted into the container from inline content. Names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileVolumeEntry {
    pub name: String,
    pub mounting_point: String,
    pub content: String,
}

/// How a custom (non-reserved) plugin parameter round-trips: raw strings
/// stay strings, everything else is carried as serialized JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomParamType {
    #[serde(rename = "string")]
    String,
    #[serde(rename = "json")]
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomParam {
    pub key: String,
    pub value: String,
    pub value_type: CustomParamType,
}

/// Tunnel exposure of a plugin's port. The engine is not stored here: it is
/// fixed per job family at deployment time (cloudflare for generic jobs,
/// ngrok for services).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TunnelingConfig {
    pub enabled: bool,
    pub token: Option<String>,
}

/// Container restart policy. Titlecase labels in the model/UI, lowercase on
/// the wire. The first member is the canonical default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestartPolicy {
    Always,
    OnFailure,
    UnlessStopped,
    No,
}

impl RestartPolicy {
    pub const ALL: [RestartPolicy; 4] = [
        RestartPolicy::Always,
        RestartPolicy::OnFailure,
        RestartPolicy::UnlessStopped,
        RestartPolicy::No,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RestartPolicy::Always => "Always",
            RestartPolicy::OnFailure => "On-failure",
            RestartPolicy::UnlessStopped => "Unless-stopped",
            RestartPolicy::No => "No",
        }
    }

    pub fn wire_value(&self) -> &'static str {
        match self {
            RestartPolicy::Always => "always",
            RestartPolicy::OnFailure => "on-failure",
            RestartPolicy::UnlessStopped => "unless-stopped",
            RestartPolicy::No => "no",
        }
    }
}

impl Default for RestartPolicy {
    fn default() -> Self {
        RestartPolicy::ALL[0]
    }
}

/// Image pull policy. Same casing rules as `RestartPolicy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImagePullPolicy {
    Always,
    IfNotPresent,
    Never,
}

impl ImagePullPolicy {
    pub const ALL: [ImagePullPolicy; 3] = [
        ImagePullPolicy::Always,
        ImagePullPolicy::IfNotPresent,
        ImagePullPolicy::Never,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ImagePullPolicy::Always => "Always",
            ImagePullPolicy::IfNotPresent => "If-not-present",
            ImagePullPolicy::Never => "Never",
        }
    }

    pub fn wire_value(&self) -> &'static str {
        match self {
            ImagePullPolicy::Always => "always",
            ImagePullPolicy::IfNotPresent => "if-not-present",
            ImagePullPolicy::Never => "never",
        }
    }
}

impl Default for ImagePullPolicy {
    fn default() -> Self {
        ImagePullPolicy::ALL[0]
    }
}

/// Where a native job's pipeline reads its input from. First member is the
/// canonical default for jobs that predate the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineInputType {
    Void,
    Url,
    Stream,
}

impl PipelineInputType {
    pub const ALL: [PipelineInputType; 3] = [
        PipelineInputType::Void,
        PipelineInputType::Url,
        PipelineInputType::Stream,
    ];

    pub fn wire_value(&self) -> &'static str {
        match self {
            PipelineInputType::Void => "void",
            PipelineInputType::Url => "url",
            PipelineInputType::Stream => "stream",
        }
    }
}

impl Default for PipelineInputType {
    fn default() -> Self {
        PipelineInputType::ALL[0]
    }
}

// =============================================================================
// DEPLOYMENT TYPE
// =============================================================================

/// How a generic plugin's executable is delivered: a prebuilt container
/// image, or a worker built from a source repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "pluginType")]
pub enum PluginDeploymentType {
    Container(ContainerDeployment),
    Worker(WorkerDeployment),
}

/// Prebuilt image pulled from a registry. Credentials come in pairs:
/// username and password are either both present or both absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDeployment {
    pub container_image: String,
    pub container_registry: String,
    pub cr_visibility: Visibility,
    pub cr_username: Option<String>,
    pub cr_password: Option<String>,
}

/// Worker built and run from a VCS repository. Visibility is inferred from
/// credential presence, never user-declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerDeployment {
    pub worker_image: String,
    pub repository_url: String,
    pub repository_visibility: Visibility,
    pub repository_username: Option<String>,
    pub repository_access_token: Option<String>,
    pub worker_commands: Vec<String>,
}

// =============================================================================
// PLUGINS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Plugin {
    Generic(GenericPlugin),
    Native(NativePlugin),
}

impl Plugin {
    pub fn is_native(&self) -> bool {
        matches!(self, Plugin::Native(_))
    }
}

/// A containerized/worker plugin instance with its full runtime surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericPlugin {
    pub deployment_type: PluginDeploymentType,
    pub port: Option<u16>,
    pub tunneling: TunnelingConfig,
    pub env_vars: Vec<KeyValue>,
    pub dynamic_env_vars: Vec<DynamicEnvEntry>,
    pub volumes: Vec<KeyValue>,
    pub file_volumes: Vec<FileVolumeEntry>,
    pub restart_policy: RestartPolicy,
    pub image_pull_policy: ImagePullPolicy,
    pub custom_params: Vec<CustomParam>,
}

/// An in-process plugin running directly on the compute node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativePlugin {
    pub signature: String,
    pub tunneling: TunnelingConfig,
    pub custom_params: Vec<CustomParam>,
}
