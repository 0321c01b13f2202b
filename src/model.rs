//! JSON description of nodes and bars.

use std::collections::BTreeMap;

use petgraph::graph::{EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::config::LcsSettings;
use crate::errors::ModelError;
use crate::geometry::Point;
use crate::lcs::LocalAxisProvider;
use crate::structure::Structure;

/// A node definition in a model document.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeDefinition {
    /// User facing identifier.
    pub id: u32,
    /// Position of the node.
    pub position: Point,
}

/// A bar definition in a model document.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarDefinition {
    /// User facing identifier.
    pub id: u32,
    /// Identifier of the start node.
    pub start: u32,
    /// Identifier of the end node.
    pub end: u32,
    /// Optional orientation point.
    #[serde(default)]
    pub k_point: Option<Point>,
}

/// Model document as stored on disk.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Frame computation settings.
    #[serde(default)]
    pub settings: LcsSettings,
    /// Node definitions.
    #[serde(default)]
    pub nodes: Vec<NodeDefinition>,
    /// Bar definitions.
    #[serde(default)]
    pub bars: Vec<BarDefinition>,
}

/// A structure built from a [`Model`] together with the identifier lookups.
///
/// The lookups describe the structure as built. Removing nodes or bars through
/// `structure` re-indexes the graph and leaves them stale.
#[derive(Debug)]
pub struct BuiltModel {
    /// Structure holding every node and bar.
    pub structure: Structure,
    /// Node identifier to graph index.
    pub nodes: BTreeMap<u32, NodeIndex>,
    /// Bar identifier to graph index.
    pub bars: BTreeMap<u32, EdgeIndex>,
}

impl Model {
    /// Parse a model from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Json`] when the document is malformed.
    pub fn from_json(source: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Validate the model and build its structure.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] for invalid settings, repeated identifiers, bars that
    /// reference missing nodes and bars without a valid local frame.
    ///
    /// # Examples
    /// ```
    /// use barframe::Model;
    ///
    /// let model = Model::from_json(
    ///     r#"{
    ///         "nodes": [
    ///             { "id": 1, "position": { "x": 0.0, "y": 0.0, "z": 0.0 } },
    ///             { "id": 2, "position": { "x": 0.0, "y": 0.0, "z": 3.0 } }
    ///         ],
    ///         "bars": [ { "id": 10, "start": 1, "end": 2 } ]
    ///     }"#,
    /// )
    /// .expect("valid json");
    /// let built = model.build().expect("valid model");
    /// let frame = built.structure.bar_frame(built.bars[&10]).expect("frame");
    /// assert_eq!(frame.origin().z, 1.5);
    /// ```
    pub fn build(&self) -> Result<BuiltModel, ModelError> {
        self.settings.validate()?;
        let mut structure = Structure::with_provider(LocalAxisProvider::from_settings(&self.settings));

        let mut nodes = BTreeMap::new();
        for node in &self.nodes {
            if nodes.contains_key(&node.id) {
                return Err(ModelError::DuplicateNodeId(node.id));
            }
            nodes.insert(node.id, structure.add_node(node.position));
        }

        let mut bars = BTreeMap::new();
        for bar in &self.bars {
            if bars.contains_key(&bar.id) {
                return Err(ModelError::DuplicateBarId(bar.id));
            }
            let lookup = |node: u32| {
                nodes
                    .get(&node)
                    .copied()
                    .ok_or(ModelError::UnknownNodeId { bar: bar.id, node })
            };
            let start = lookup(bar.start)?;
            let end = lookup(bar.end)?;
            let index = structure
                .add_bar(start, end, bar.k_point)
                .map_err(|source| ModelError::Edit { bar: bar.id, source })?;
            bars.insert(bar.id, index);
        }

        Ok(BuiltModel {
            structure,
            nodes,
            bars,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ConfigError, LcsError, StructureEditError};
    use crate::geometry::point;

    fn two_nodes() -> Vec<NodeDefinition> {
        vec![
            NodeDefinition {
                id: 1,
                position: point(0.0, 0.0, 0.0),
            },
            NodeDefinition {
                id: 2,
                position: point(1.0, 0.0, 0.0),
            },
        ]
    }

    fn bar(id: u32, start: u32, end: u32) -> BarDefinition {
        BarDefinition {
            id,
            start,
            end,
            k_point: None,
        }
    }

    #[test]
    fn parses_optional_sections() {
        let model = Model::from_json("{}").expect("empty model");
        assert_eq!(model, Model::default());
        let built = model.build().expect("empty model builds");
        assert_eq!(built.structure.node_count(), 0);
    }

    #[test]
    fn k_point_is_read_from_json() {
        let model = Model::from_json(
            r#"{
                "settings": { "parallel_epsilon": 0.001 },
                "nodes": [
                    { "id": 1, "position": { "x": 0, "y": 0, "z": 0 } },
                    { "id": 2, "position": { "x": 1, "y": 0, "z": 0 } }
                ],
                "bars": [ { "id": 5, "start": 1, "end": 2, "k_point": { "x": 0, "y": 0, "z": 1 } } ]
            }"#,
        )
        .expect("valid json");
        assert_eq!(model.bars[0].k_point, Some(point(0.0, 0.0, 1.0)));

        let built = model.build().expect("valid model");
        assert_eq!(built.structure.provider().parallel_epsilon(), 0.001);
        let frame = built.structure.bar_frame(built.bars[&5]).expect("frame");
        assert_eq!(frame.y_prime(), nalgebra::Vector3::z());
    }

    #[test]
    fn duplicate_identifiers_are_rejected() {
        let mut model = Model {
            nodes: two_nodes(),
            ..Model::default()
        };
        model.nodes.push(model.nodes[0]);
        assert!(matches!(model.build(), Err(ModelError::DuplicateNodeId(1))));

        let model = Model {
            nodes: two_nodes(),
            bars: vec![bar(3, 1, 2), bar(3, 2, 1)],
            ..Model::default()
        };
        assert!(matches!(model.build(), Err(ModelError::DuplicateBarId(3))));
    }

    #[test]
    fn unknown_node_reference_is_reported() {
        let model = Model {
            nodes: two_nodes(),
            bars: vec![bar(7, 1, 9)],
            ..Model::default()
        };
        assert!(matches!(
            model.build(),
            Err(ModelError::UnknownNodeId { bar: 7, node: 9 })
        ));
    }

    #[test]
    fn degenerate_bar_names_the_bar() {
        let model = Model {
            nodes: two_nodes(),
            bars: vec![bar(4, 1, 1)],
            ..Model::default()
        };
        assert!(matches!(
            model.build(),
            Err(ModelError::Edit {
                bar: 4,
                source: StructureEditError::InvalidGeometry {
                    source: LcsError::DegenerateBar { .. },
                    ..
                },
            })
        ));
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let model = Model {
            settings: LcsSettings {
                parallel_epsilon: 0.0,
            },
            ..Model::default()
        };
        assert!(matches!(
            model.build(),
            Err(ModelError::Config(ConfigError::InvalidParallelEpsilon(_)))
        ));
    }
}
