//! Catalog entry types. All instances live in `data.rs` as `'static`
//! reference data; nothing here is constructed at runtime.

/// A fixed-price hardware tier for containerized (generic) or in-process
/// (native) workloads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerOrWorkerType {
    pub name: &'static str,
    /// On-chain job-type code this tier is deployed under.
    pub job_type: u8,
    /// Ordering rank used for GPU compatibility checks; higher is bigger.
    pub tier: u8,
    pub cores: u32,
    pub memory_gb: u32,
    pub storage_gb: u32,
    pub monthly_budget_per_worker: f64,
    /// Minimum node count the orchestrator balances this tier across.
    pub minimal_balancing: u32,
}

/// A declared input of a managed service, with the default used when a
/// recovered pipeline does not carry the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceInput {
    pub key: &'static str,
    pub default_value: &'static str,
}

/// A managed service tier. Image and port are catalog-owned: deployments
/// always use these, never user-supplied values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceType {
    /// Catalog identity, e.g. "PostgreSQL".
    pub service: &'static str,
    /// Resource tier name, e.g. "PGSQL-LOW".
    pub resource_name: &'static str,
    pub job_type: u8,
    pub image: &'static str,
    pub port: u16,
    pub monthly_budget_per_worker: f64,
    pub minimal_balancing: u32,
    pub inputs: &'static [ServiceInput],
}

/// A GPU tier attachable to generic/native jobs. Each declares the minimum
/// hardware tier it requires per job family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpuType {
    pub name: &'static str,
    pub vram_gb: u32,
    pub monthly_budget_per_worker: f64,
    pub min_generic_tier: u8,
    pub min_native_tier: u8,
}
