//! Static resource catalog: hardware tiers, GPU tiers, managed services.
//!
//! Pure reference data plus name/code lookups. Tables are module-level
//! immutable constants, loaded once at compile time and never mutated.

pub mod data;
pub mod types;

pub use types::*;

use crate::model::JobFamily;

/// A resolved catalog entry for an on-chain job-type code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CatalogResource {
    ContainerOrWorker {
        family: JobFamily,
        spec: &'static ContainerOrWorkerType,
    },
    Service(&'static ServiceType),
}

impl CatalogResource {
    pub fn family(&self) -> JobFamily {
        match self {
            CatalogResource::ContainerOrWorker { family, .. } => *family,
            CatalogResource::Service(_) => JobFamily::Service,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CatalogResource::ContainerOrWorker { spec, .. } => spec.name,
            CatalogResource::Service(s) => s.resource_name,
        }
    }
}

/// Look up a generic (container) hardware tier by name, case-insensitively.
pub fn generic_type(name: &str) -> Option<&'static ContainerOrWorkerType> {
    data::GENERIC_CONTAINER_TYPES
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
}

/// Look up a native (worker) hardware tier by name, case-insensitively.
pub fn native_type(name: &str) -> Option<&'static ContainerOrWorkerType> {
    data::NATIVE_WORKER_TYPES
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
}

/// Look up a service tier by its resource name (e.g. "PGSQL-LOW").
pub fn service_type(resource_name: &str) -> Option<&'static ServiceType> {
    data::SERVICE_TYPES
        .iter()
        .find(|s| s.resource_name.eq_ignore_ascii_case(resource_name))
}

/// Look up a service by its catalog identity (e.g. "PostgreSQL").
pub fn service_by_name(service_name: &str) -> Option<&'static ServiceType> {
    data::SERVICE_TYPES
        .iter()
        .find(|s| s.service.eq_ignore_ascii_case(service_name))
}

/// Look up a GPU tier by name, case-insensitively.
pub fn gpu_type(name: &str) -> Option<&'static GpuType> {
    data::GPU_TYPES
        .iter()
        .find(|g| g.name.eq_ignore_ascii_case(name))
}

/// Map an on-chain job-type code to its catalog resource. `None` means the
/// code belongs to an unsupported/legacy job type.
pub fn resource_for_job_type(code: u8) -> Option<CatalogResource> {
    if let Some(spec) = data::GENERIC_CONTAINER_TYPES.iter().find(|t| t.job_type == code) {
        return Some(CatalogResource::ContainerOrWorker {
            family: JobFamily::Generic,
            spec,
        });
    }
    if let Some(spec) = data::NATIVE_WORKER_TYPES.iter().find(|t| t.job_type == code) {
        return Some(CatalogResource::ContainerOrWorker {
            family: JobFamily::Native,
            spec,
        });
    }
    data::SERVICE_TYPES
        .iter()
        .find(|s| s.job_type == code)
        .map(CatalogResource::Service)
}

/// Resolve a family + resource name to the hardware tier backing it.
pub fn resource_by_name(family: JobFamily, name: &str) -> Option<CatalogResource> {
    match family {
        JobFamily::Generic => generic_type(name).map(|spec| CatalogResource::ContainerOrWorker {
            family,
            spec,
        }),
        JobFamily::Native => native_type(name).map(|spec| CatalogResource::ContainerOrWorker {
            family,
            spec,
        }),
        JobFamily::Service => service_type(name).map(CatalogResource::Service),
    }
}

/// Whether `gpu` may be attached to a resource of `family` at `tier`.
/// GPU tiers declare the minimum catalog tier they require per family;
/// services never take GPUs.
pub fn is_gpu_compatible(gpu: &GpuType, family: JobFamily, tier: u8) -> bool {
    match family {
        JobFamily::Generic => gpu.min_generic_tier <= tier,
        JobFamily::Native => gpu.min_native_tier <= tier,
        JobFamily::Service => false,
    }
}

/// Whether a plugin signature identifies an app-runner (generic) plugin as
/// opposed to a native one.
pub fn is_app_runner_signature(signature: &str) -> bool {
    data::GENERIC_PLUGIN_SIGNATURES
        .iter()
        .any(|s| s.eq_ignore_ascii_case(signature))
}

/// Find the catalog service matching a deployed image: first by exact image
/// string, then by normalized comparison (lowercased, `@sha256:...` digest
/// and `:latest` suffixes stripped).
pub fn service_for_image(image: &str) -> Option<&'static ServiceType> {
    if let Some(s) = data::SERVICE_TYPES.iter().find(|s| s.image == image) {
        return Some(s);
    }
    let wanted = normalize_image(image);
    data::SERVICE_TYPES
        .iter()
        .find(|s| normalize_image(s.image) == wanted)
}

fn normalize_image(image: &str) -> String {
    let mut normalized = image.trim().to_ascii_lowercase();
    if let Some(at) = normalized.find("@sha256:") {
        normalized.truncate(at);
    }
    if let Some(stripped) = normalized.strip_suffix(":latest") {
        normalized = stripped.to_string();
    }
    normalized
}
