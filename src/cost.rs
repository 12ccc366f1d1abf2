//! Cost model: monthly/epoch pricing against the catalog tables.

use crate::catalog::{self, CatalogResource};
use crate::model::{JobDraft, JobSpecification};

pub const EPOCHS_PER_MONTH: f64 = 30.0;

/// Reserved discount hook; no discount scheme is live yet.
const DISCOUNT_PERCENT: f64 = 0.0;

/// Monthly price of one worker node under `spec`: resource tier plus the
/// optional GPU tier. Unknown names price as zero.
pub fn monthly_budget_per_node(spec: &JobSpecification) -> f64 {
    let resource = match catalog::resource_by_name(spec.family, &spec.resource_type_name) {
        Some(CatalogResource::ContainerOrWorker { spec: tier, .. }) => {
            tier.monthly_budget_per_worker
        }
        Some(CatalogResource::Service(s)) => s.monthly_budget_per_worker,
        None => 0.0,
    };
    let gpu = spec
        .gpu_type_name
        .as_deref()
        .and_then(catalog::gpu_type)
        .map(|g| g.monthly_budget_per_worker)
        .unwrap_or(0.0);
    resource + gpu
}

/// Total price of a draft over its paid months and requested nodes.
pub fn job_cost(draft: &JobDraft) -> f64 {
    f64::from(draft.payment_months_count)
        * f64::from(draft.specification.target_nodes_count)
        * monthly_budget_per_node(&draft.specification)
        * (1.0 - DISCOUNT_PERCENT / 100.0)
}

pub fn jobs_total_cost(drafts: &[JobDraft]) -> f64 {
    drafts.iter().map(job_cost).sum()
}

pub fn price_per_epoch(monthly_budget: f64) -> f64 {
    monthly_budget / EPOCHS_PER_MONTH
}

/// Extra cost of raising a running job's node count for its remaining
/// epochs. Zero when the requested count does not increase or no epochs
/// remain.
pub fn node_increase_cost(
    spec: &JobSpecification,
    requested_count: u32,
    current_count: u32,
    remaining_epochs: u32,
) -> f64 {
    if requested_count <= current_count || remaining_epochs == 0 {
        return 0.0;
    }
    let increased = f64::from(requested_count - current_count);
    increased * price_per_epoch(monthly_budget_per_node(spec)) * f64::from(remaining_epochs)
}
