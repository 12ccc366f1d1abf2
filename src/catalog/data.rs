//! The catalog tables. Immutable reference data; prices are monthly USD
//! per worker node.

use super::types::{ContainerOrWorkerType, GpuType, ServiceInput, ServiceType};

/// Plugin signatures that run containerized/worker apps. Anything else in a
/// plugin collection is treated as a native plugin.
pub const GENERIC_PLUGIN_SIGNATURES: [&str; 2] = ["CONTAINER_APP_RUNNER", "WORKER_APP_RUNNER"];

/// Signature used when a native draft carries no explicit plugin.
pub const DEFAULT_NATIVE_SIGNATURE: &str = "NATIVE_APP_RUNNER";

pub static GENERIC_CONTAINER_TYPES: [ContainerOrWorkerType; 5] = [
    ContainerOrWorkerType {
        name: "ENTRY",
        job_type: 1,
        tier: 1,
        cores: 2,
        memory_gb: 4,
        storage_gb: 40,
        monthly_budget_per_worker: 15.0,
        minimal_balancing: 1,
    },
    ContainerOrWorkerType {
        name: "LOW1",
        job_type: 2,
        tier: 2,
        cores: 4,
        memory_gb: 8,
        storage_gb: 80,
        monthly_budget_per_worker: 28.0,
        minimal_balancing: 1,
    },
    ContainerOrWorkerType {
        name: "MED1",
        job_type: 3,
        tier: 3,
        cores: 8,
        memory_gb: 16,
        storage_gb: 160,
        monthly_budget_per_worker: 55.0,
        minimal_balancing: 2,
    },
    ContainerOrWorkerType {
        name: "HIGH1",
        job_type: 4,
        tier: 4,
        cores: 12,
        memory_gb: 32,
        storage_gb: 320,
        monthly_budget_per_worker: 104.0,
        minimal_balancing: 2,
    },
    ContainerOrWorkerType {
        name: "ULTRA1",
        job_type: 5,
        tier: 5,
        cores: 16,
        memory_gb: 64,
        storage_gb: 640,
        monthly_budget_per_worker: 192.0,
        minimal_balancing: 3,
    },
];

pub static NATIVE_WORKER_TYPES: [ContainerOrWorkerType; 3] = [
    ContainerOrWorkerType {
        name: "N-ENTRY",
        job_type: 6,
        tier: 1,
        cores: 1,
        memory_gb: 2,
        storage_gb: 10,
        monthly_budget_per_worker: 9.0,
        minimal_balancing: 1,
    },
    ContainerOrWorkerType {
        name: "N-MED",
        job_type: 7,
        tier: 2,
        cores: 2,
        memory_gb: 4,
        storage_gb: 20,
        monthly_budget_per_worker: 16.0,
        minimal_balancing: 1,
    },
    ContainerOrWorkerType {
        name: "N-HIGH",
        job_type: 8,
        tier: 3,
        cores: 4,
        memory_gb: 8,
        storage_gb: 40,
        monthly_budget_per_worker: 30.0,
        minimal_balancing: 2,
    },
];

static POSTGRES_INPUTS: [ServiceInput; 3] = [
    ServiceInput {
        key: "POSTGRES_USER",
        default_value: "postgres",
    },
    ServiceInput {
        key: "POSTGRES_PASSWORD",
        default_value: "postgres",
    },
    ServiceInput {
        key: "POSTGRES_DB",
        default_value: "postgres",
    },
];

static MYSQL_INPUTS: [ServiceInput; 2] = [
    ServiceInput {
        key: "MYSQL_ROOT_PASSWORD",
        default_value: "mysql",
    },
    ServiceInput {
        key: "MYSQL_DATABASE",
        default_value: "mysql",
    },
];

static MONGO_INPUTS: [ServiceInput; 2] = [
    ServiceInput {
        key: "MONGO_INITDB_ROOT_USERNAME",
        default_value: "mongo",
    },
    ServiceInput {
        key: "MONGO_INITDB_ROOT_PASSWORD",
        default_value: "mongo",
    },
];

pub static SERVICE_TYPES: [ServiceType; 5] = [
    ServiceType {
        service: "PostgreSQL",
        resource_name: "PGSQL-LOW",
        job_type: 9,
        image: "postgres:17",
        port: 5432,
        monthly_budget_per_worker: 32.0,
        minimal_balancing: 1,
        inputs: &POSTGRES_INPUTS,
    },
    ServiceType {
        service: "PostgreSQL",
        resource_name: "PGSQL-MED",
        job_type: 10,
        image: "postgres:17",
        port: 5432,
        monthly_budget_per_worker: 58.0,
        minimal_balancing: 1,
        inputs: &POSTGRES_INPUTS,
    },
    ServiceType {
        service: "MySQL",
        resource_name: "MYSQL-LOW",
        job_type: 11,
        image: "mysql:8.4",
        port: 3306,
        monthly_budget_per_worker: 34.0,
        minimal_balancing: 1,
        inputs: &MYSQL_INPUTS,
    },
    ServiceType {
        service: "MongoDB",
        resource_name: "MONGO-LOW",
        job_type: 12,
        image: "mongo:8",
        port: 27017,
        monthly_budget_per_worker: 36.0,
        minimal_balancing: 1,
        inputs: &MONGO_INPUTS,
    },
    ServiceType {
        service: "Redis",
        resource_name: "REDIS-LOW",
        job_type: 13,
        image: "redis:7.4",
        port: 6379,
        monthly_budget_per_worker: 21.0,
        minimal_balancing: 1,
        inputs: &[],
    },
];

pub static GPU_TYPES: [GpuType; 4] = [
    GpuType {
        name: "RTX-3080",
        vram_gb: 10,
        monthly_budget_per_worker: 120.0,
        min_generic_tier: 3,
        min_native_tier: 2,
    },
    GpuType {
        name: "RTX-4090",
        vram_gb: 24,
        monthly_budget_per_worker: 210.0,
        min_generic_tier: 3,
        min_native_tier: 2,
    },
    GpuType {
        name: "A100",
        vram_gb: 80,
        monthly_budget_per_worker: 640.0,
        min_generic_tier: 4,
        min_native_tier: 3,
    },
    GpuType {
        name: "H100",
        vram_gb: 80,
        monthly_budget_per_worker: 990.0,
        min_generic_tier: 5,
        min_native_tier: 3,
    },
];
