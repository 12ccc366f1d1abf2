//! Plugin decoding: boundary normalization of the two `PLUGINS` wire
//! shapes, then projection of raw configs into typed `Plugin` values.

pub mod format;

pub use format::*;

use serde_json::Value;

use crate::error::RecoveryError;
use crate::normalize::{get_key, non_empty_string_at};

/// One plugin signature with its decoded instance configs. The uniform
/// shape all downstream code operates on, regardless of which wire shape
/// the pipeline used.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPlugin {
    pub signature: String,
    /// Always JSON objects; `instance_conf` wrappers are already unwrapped.
    pub instances: Vec<Value>,
}

/// Decode the `PLUGINS` (or `plugins`) collection of a pipeline into a
/// uniform list. Two wire shapes are supported:
///
/// 1. an array of `{signature, instances: [...]}` blocks;
/// 2. an object map of `signature -> instances[]`.
///
/// Entries with a missing signature, an empty instance list, or only empty
/// configs are dropped silently: malformed entries are omissions, not
/// decoding errors.
pub fn normalize_plugins(pipeline: &Value) -> Vec<NormalizedPlugin> {
    let mut normalized = Vec::new();
    match get_key(pipeline, "PLUGINS") {
        Some(Value::Array(blocks)) => {
            for block in blocks {
                let Some(signature) = non_empty_string_at(block, "SIGNATURE") else {
                    continue;
                };
                let instances = match get_key(block, "INSTANCES") {
                    Some(Value::Array(items)) => decode_instances(items),
                    _ => Vec::new(),
                };
                push_plugin(&mut normalized, signature, instances);
            }
        }
        Some(Value::Object(map)) => {
            for (signature, raw_instances) in map {
                if signature.trim().is_empty() {
                    continue;
                }
                let instances = match raw_instances {
                    Value::Array(items) => decode_instances(items),
                    _ => Vec::new(),
                };
                push_plugin(&mut normalized, signature.clone(), instances);
            }
        }
        _ => {}
    }
    normalized
}

fn push_plugin(out: &mut Vec<NormalizedPlugin>, signature: String, instances: Vec<Value>) {
    if !instances.is_empty() {
        out.push(NormalizedPlugin {
            signature,
            instances,
        });
    }
}

/// Unwrap each instance down to its config object, dropping anything that
/// is not a non-empty object afterwards.
fn decode_instances(items: &[Value]) -> Vec<Value> {
    items
        .iter()
        .filter_map(|item| {
            let config = match get_key(item, "INSTANCE_CONF") {
                Some(conf) if conf.is_object() => conf,
                _ => item,
            };
            match config.as_object() {
                Some(map) if !map.is_empty() => Some(config.clone()),
                _ => None,
            }
        })
        .collect()
}

/// The first instance config whose signature satisfies `predicate`.
///
/// The one place plugin absence is fatal: callers only ask for a plugin
/// class that is structurally required for the job family at hand.
pub fn required_plugin_config<'a>(
    plugins: &'a [NormalizedPlugin],
    description: &str,
    predicate: impl Fn(&str) -> bool,
) -> Result<&'a Value, RecoveryError> {
    plugins
        .iter()
        .filter(|p| predicate(&p.signature))
        .flat_map(|p| p.instances.first())
        .next()
        .ok_or_else(|| RecoveryError::MissingPluginConfiguration(description.to_string()))
}
