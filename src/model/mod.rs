//! Typed internal job model: drafts, plugins, prefill.

pub mod job;
pub mod plugin;
pub mod prefill;

pub use job::*;
pub use plugin::*;
pub use prefill::*;
