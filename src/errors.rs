//! Error types produced while computing frames or editing structures.

use petgraph::graph::{EdgeIndex, NodeIndex};
use thiserror::Error;

/// Error returned when a local coordinate system cannot be built for a bar.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum LcsError {
    /// Returned when the bar end points coincide.
    #[error("bar length too small ({length:e})")]
    DegenerateBar {
        /// Distance between the two end points.
        length: f64,
    },
    /// Returned when no auxiliary vector is usable for the given bar axis.
    ///
    /// With the default tolerance this cannot happen, since one of the global
    /// axes is always non-parallel to any direction.
    #[error("no auxiliary vector is non-parallel to bar axis {axis:?}")]
    DegenerateBasis {
        /// Unit bar axis for which the search failed.
        axis: [f64; 3],
    },
}

/// Error returned when editing a [`Structure`](crate::Structure).
///
/// # Examples
///
/// ```
/// use petgraph::graph::EdgeIndex;
/// use barframe::{Structure, StructureEditError};
///
/// let mut structure = Structure::new();
/// let missing = EdgeIndex::new(7);
/// let error = structure
///     .set_k_point(missing, None)
///     .expect_err("unknown bar is rejected");
/// assert_eq!(error, StructureEditError::UnknownBar(missing));
/// ```
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum StructureEditError {
    /// Returned when a node cannot be found in the structure.
    #[error("node {0:?} does not exist in this structure")]
    UnknownNode(NodeIndex),
    /// Returned when a bar cannot be found in the structure.
    #[error("bar {0:?} does not exist in this structure")]
    UnknownBar(EdgeIndex),
    /// Returned when the edit would leave a bar without a valid local frame.
    #[error("bar between {start:?} and {end:?} is invalid: {source}")]
    InvalidGeometry {
        /// Start node of the offending bar.
        start: NodeIndex,
        /// End node of the offending bar.
        end: NodeIndex,
        /// Reason the frame could not be computed.
        #[source]
        source: LcsError,
    },
}

/// Error returned when loading or validating [`LcsSettings`](crate::LcsSettings).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the parallel tolerance is not a finite value in `(0, 1)`.
    #[error("parallel epsilon must lie strictly between 0 and 1 (received {0})")]
    InvalidParallelEpsilon(f64),
    /// Returned when the settings document is not valid JSON.
    #[error("could not parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Error returned when a [`Model`](crate::Model) cannot be turned into a structure.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Returned when the model document is not valid JSON.
    #[error("could not parse model: {0}")]
    Json(#[from] serde_json::Error),
    /// Returned when the embedded settings are invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Returned when two nodes share an identifier.
    #[error("node id {0} is defined more than once")]
    DuplicateNodeId(u32),
    /// Returned when two bars share an identifier.
    #[error("bar id {0} is defined more than once")]
    DuplicateBarId(u32),
    /// Returned when a bar references a node that was never defined.
    #[error("bar {bar} references unknown node {node}")]
    UnknownNodeId {
        /// Identifier of the offending bar.
        bar: u32,
        /// Identifier of the missing node.
        node: u32,
    },
    /// Returned when a bar is rejected by the structure.
    #[error("bar {bar}: {source}")]
    Edit {
        /// Identifier of the offending bar.
        bar: u32,
        /// Underlying edit failure.
        #[source]
        source: StructureEditError,
    },
}
