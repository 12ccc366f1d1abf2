pub mod catalog;
pub mod cost;
pub mod deploy;
pub mod error;
pub mod model;
pub mod normalize;
pub mod plugins;
pub mod recover;
pub mod wasm;
