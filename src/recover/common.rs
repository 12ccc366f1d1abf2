//! Family-independent prefill defaults.

use serde_json::Value;

use crate::catalog::{self, CatalogResource};
use crate::model::ClosedJob;
use crate::normalize::{
    get_key, normalize_node_address, parse_job_tags, sanitize_alias, string_at, string_list_at,
    to_boolean_value,
};

/// Defaults shared by all three job families, resolved before dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonPrefill {
    pub job_alias: String,
    pub target_nodes_count: u32,
    pub job_tags: Vec<String>,
    pub nodes_countries: Vec<String>,
    pub target_nodes: Vec<String>,
    pub spare_nodes: Vec<String>,
    pub allow_replication_in_the_wild: bool,
    pub gpu_type_name: Option<String>,
}

pub fn common_prefill(
    job: &ClosedJob,
    pipeline: &Value,
    specs: &Value,
    resource: CatalogResource,
) -> CommonPrefill {
    let fallback_alias = format!("recovered-job-{}", job.id);
    let tags = parse_job_tags(&string_list_at(specs, "job_tags"));

    // GPU names are kept only when they resolve to a known catalog tier
    // that is attachable to the resolved resource tier.
    let gpu_type_name = match resource {
        CatalogResource::Service(_) => None,
        CatalogResource::ContainerOrWorker { family, spec: tier } => {
            let raw = string_at(specs, "gpu_type");
            catalog::gpu_type(raw.trim())
                .filter(|g| catalog::is_gpu_compatible(g, family, tier.tier))
                .map(|g| g.name.to_string())
        }
    };

    CommonPrefill {
        job_alias: sanitize_alias(&string_at(pipeline, "APP_ALIAS"), &fallback_alias),
        target_nodes_count: job.number_of_nodes_requested.max(1),
        job_tags: tags.tags,
        nodes_countries: tags.countries,
        target_nodes: node_addresses(specs, "current_target_nodes"),
        spare_nodes: node_addresses(specs, "spare_nodes"),
        // Legacy jobs predate the flag and were replicable by default.
        allow_replication_in_the_wild: to_boolean_value(
            get_key(specs, "allow_replication_in_the_wild"),
            true,
        ),
        gpu_type_name,
    }
}

fn node_addresses(specs: &Value, key: &str) -> Vec<String> {
    string_list_at(specs, key)
        .iter()
        .map(|addr| normalize_node_address(addr))
        .filter(|addr| !addr.is_empty())
        .collect()
}
