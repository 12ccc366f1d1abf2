//! Job-level model types: family, specification, draft, on-chain metadata.

use serde::{Deserialize, Serialize};

use super::plugin::{
    GenericPlugin, KeyValue, PipelineInputType, Plugin, TunnelingConfig,
};

/// The three job families. Everything downstream is a discriminated union
/// on this tag; switches over it are exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobFamily {
    Generic,
    Native,
    Service,
}

/// Where and on what hardware a job runs. `resource_type_name` must name a
/// catalog entry of the job's family; `gpu_type_name` must name a GPU tier
/// compatible with that entry (see `catalog::is_gpu_compatible`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSpecification {
    pub family: JobFamily,
    pub target_nodes_count: u32,
    pub job_tags: Vec<String>,
    pub nodes_countries: Vec<String>,
    pub resource_type_name: String,
    pub gpu_type_name: Option<String>,
}

/// Family-shaped deployment data. A `Generic` value never carries
/// native-only fields (pipeline input type etc.) and vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "family")]
pub enum JobDeployment {
    Generic(GenericJobDeployment),
    Native(NativeJobDeployment),
    Service(ServiceJobDeployment),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericJobDeployment {
    pub job_alias: String,
    #[serde(flatten)]
    pub app: GenericPlugin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeJobDeployment {
    pub job_alias: String,
    /// All plugin instances of the job, at most five. The first native
    /// entry acts as the primary on the wire; the rest ride as secondary
    /// blocks.
    pub plugins: Vec<Plugin>,
    pub pipeline_input_type: PipelineInputType,
    pub pipeline_input_uri: Option<String>,
    pub pipeline_params: Vec<KeyValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceJobDeployment {
    pub job_alias: String,
    /// Catalog service identity, e.g. "PostgreSQL". Image and port always
    /// come from the catalog descriptor, never from user input.
    pub service_name: String,
    pub inputs: Vec<KeyValue>,
    pub service_replica: u32,
    pub tunneling: TunnelingConfig,
}

impl JobDeployment {
    pub fn family(&self) -> JobFamily {
        match self {
            JobDeployment::Generic(_) => JobFamily::Generic,
            JobDeployment::Native(_) => JobFamily::Native,
            JobDeployment::Service(_) => JobFamily::Service,
        }
    }

    pub fn job_alias(&self) -> &str {
        match self {
            JobDeployment::Generic(d) => &d.job_alias,
            JobDeployment::Native(d) => &d.job_alias,
            JobDeployment::Service(d) => &d.job_alias,
        }
    }
}

/// A fully typed, form-shaped job. Serves both as the body of a recovered
/// prefill and, once form-validated, as the deployment compiler's input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    pub specification: JobSpecification,
    pub payment_months_count: u32,
    /// Explicit node addresses. Non-empty lists override count-based
    /// scheduling on the wire.
    pub target_nodes: Vec<String>,
    pub spare_nodes: Vec<String>,
    pub allow_replication_in_the_wild: bool,
    pub deployment: JobDeployment,
}

/// On-chain metadata of a running or closed job, as read from the contract.
/// Only the fields recovery needs; the chain client owns the full record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedJob {
    pub id: u64,
    pub project_hash: String,
    /// Chain job-type code, mapped to a catalog resource during recovery.
    pub job_type: u8,
    pub number_of_nodes_requested: u32,
    pub project_name: Option<String>,
}
