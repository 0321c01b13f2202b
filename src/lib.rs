#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod config;
pub mod errors;
pub mod frame;
pub mod geometry;
pub mod lcs;
pub mod model;
pub mod structure;

pub use config::LcsSettings;
pub use errors::{ConfigError, LcsError, ModelError, StructureEditError};
pub use frame::LocalFrame;
pub use geometry::{point, Point};
pub use lcs::{LocalAxisProvider, DEFAULT_PARALLEL_EPSILON, FALLBACK_AXES, MIN_BAR_LENGTH};
pub use model::{BarDefinition, BuiltModel, Model, NodeDefinition};
pub use structure::Structure;
