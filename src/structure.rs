//! Node and bar storage that keeps every bar's local frame current.

use petgraph::graph::{EdgeIndex, Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use tracing::debug;

use crate::errors::{LcsError, StructureEditError};
use crate::frame::LocalFrame;
use crate::geometry::{distance, Point};
use crate::lcs::LocalAxisProvider;

/// Internal representation of a structural node.
#[derive(Clone, Debug)]
struct Node {
    /// Position of the node.
    position: Point,
}

/// Internal representation of a bar.
#[derive(Clone, Debug)]
struct Bar {
    /// Optional orientation point.
    k_point: Option<Point>,
    /// Local frame for the current geometry.
    frame: LocalFrame,
}

/// Container for nodes and the bars connecting them.
///
/// Every bar stored here has a valid local frame. Edits that would break this,
/// such as moving a node onto its neighbour, are rejected and leave the structure
/// untouched.
#[derive(Debug, Default)]
pub struct Structure {
    /// Underlying graph storage for nodes and bars.
    graph: Graph<Node, Bar>,
    /// Computes the frame of each bar.
    provider: LocalAxisProvider,
}

impl Structure {
    /// Create an empty structure using the default provider.
    ///
    /// # Examples
    /// ```
    /// use barframe::Structure;
    ///
    /// let structure = Structure::new();
    /// assert_eq!(structure.node_count(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_provider(LocalAxisProvider::new())
    }

    /// Create an empty structure that computes frames with `provider`.
    #[must_use]
    pub fn with_provider(provider: LocalAxisProvider) -> Self {
        Self {
            graph: Graph::new(),
            provider,
        }
    }

    /// Provider used for all frames in this structure.
    #[must_use]
    pub fn provider(&self) -> &LocalAxisProvider {
        &self.provider
    }

    /// Return the number of nodes in the structure.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of bars in the structure.
    #[must_use]
    pub fn bar_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Add a new node to the structure.
    pub fn add_node(&mut self, position: Point) -> NodeIndex {
        self.graph.add_node(Node { position })
    }

    /// Position of a node.
    #[must_use]
    pub fn node_position(&self, node: NodeIndex) -> Option<Point> {
        self.graph.node_weight(node).map(|node| node.position)
    }

    /// Move a node and refresh the frames of all bars attached to it.
    ///
    /// # Errors
    ///
    /// Returns [`StructureEditError::UnknownNode`] when `node` is not part of this
    /// structure and [`StructureEditError::InvalidGeometry`] when an attached bar
    /// would collapse. In both cases nothing changes.
    pub fn move_node(&mut self, node: NodeIndex, position: Point) -> Result<(), StructureEditError> {
        if self.graph.node_weight(node).is_none() {
            return Err(StructureEditError::UnknownNode(node));
        }

        let mut updates = Vec::new();
        for direction in [Direction::Outgoing, Direction::Incoming] {
            for edge in self.graph.edges_directed(node, direction) {
                let (start, end) = (edge.source(), edge.target());
                // A bar from the node to itself is already rejected by add_bar.
                let start_position = if start == node {
                    position
                } else {
                    self.graph[start].position
                };
                let end_position = if end == node {
                    position
                } else {
                    self.graph[end].position
                };
                let frame = self
                    .provider
                    .compute_lcs(start_position, end_position, edge.weight().k_point)
                    .map_err(|source| StructureEditError::InvalidGeometry { start, end, source })?;
                updates.push((edge.id(), frame));
            }
        }

        self.graph[node].position = position;
        for (edge, frame) in updates {
            self.graph[edge].frame = frame;
        }
        Ok(())
    }

    /// Remove a node and all attached bars from the structure.
    ///
    /// The last node takes over the index of the removed one, and bars are
    /// re-indexed the same way, as with [`petgraph::Graph::remove_node`].
    ///
    /// # Errors
    ///
    /// Returns [`StructureEditError::UnknownNode`] when `node` is not part of this structure.
    pub fn remove_node(&mut self, node: NodeIndex) -> Result<Point, StructureEditError> {
        self.graph
            .remove_node(node)
            .map(|node| node.position)
            .ok_or(StructureEditError::UnknownNode(node))
    }

    /// Connect two nodes with a new bar oriented by an optional K-point.
    ///
    /// # Errors
    ///
    /// Returns [`StructureEditError::UnknownNode`] when either node is missing and
    /// [`StructureEditError::InvalidGeometry`] when the bar length is too small.
    ///
    /// # Examples
    /// ```
    /// use barframe::{point, LcsError, Structure, StructureEditError};
    ///
    /// let mut structure = Structure::new();
    /// let a = structure.add_node(point(0.0, 0.0, 0.0));
    /// let b = structure.add_node(point(0.0, 0.0, 0.0));
    /// let error = structure.add_bar(a, b, None).expect_err("zero length bar");
    /// assert!(matches!(
    ///     error,
    ///     StructureEditError::InvalidGeometry { source: LcsError::DegenerateBar { .. }, .. }
    /// ));
    /// assert_eq!(structure.bar_count(), 0);
    /// ```
    pub fn add_bar(
        &mut self,
        start: NodeIndex,
        end: NodeIndex,
        k_point: Option<Point>,
    ) -> Result<EdgeIndex, StructureEditError> {
        let frame = self.frame_between(start, end, k_point)?;
        let bar = self.graph.add_edge(start, end, Bar { k_point, frame });
        debug!(?bar, ?start, ?end, "added bar");
        Ok(bar)
    }

    /// Remove a bar from the structure.
    ///
    /// The last bar takes over the index of the removed one, as with
    /// [`petgraph::Graph::remove_edge`]. Indices held for that bar must be refreshed.
    ///
    /// # Errors
    ///
    /// Returns [`StructureEditError::UnknownBar`] when `bar` is not part of this structure.
    pub fn remove_bar(&mut self, bar: EdgeIndex) -> Result<(), StructureEditError> {
        self.graph
            .remove_edge(bar)
            .map(|_| ())
            .ok_or(StructureEditError::UnknownBar(bar))
    }

    /// Replace the K-point of a bar and recompute its frame.
    ///
    /// # Errors
    ///
    /// Returns [`StructureEditError::UnknownBar`] when `bar` is not part of this structure.
    pub fn set_k_point(
        &mut self,
        bar: EdgeIndex,
        k_point: Option<Point>,
    ) -> Result<(), StructureEditError> {
        let (start, end) = self
            .graph
            .edge_endpoints(bar)
            .ok_or(StructureEditError::UnknownBar(bar))?;
        let frame = self.frame_between(start, end, k_point)?;
        let weight = &mut self.graph[bar];
        weight.k_point = k_point;
        weight.frame = frame;
        Ok(())
    }

    /// K-point currently assigned to a bar.
    #[must_use]
    pub fn k_point(&self, bar: EdgeIndex) -> Option<Point> {
        self.graph.edge_weight(bar).and_then(|bar| bar.k_point)
    }

    /// Local frame of a bar.
    #[must_use]
    pub fn bar_frame(&self, bar: EdgeIndex) -> Option<LocalFrame> {
        self.graph.edge_weight(bar).map(|bar| bar.frame)
    }

    /// Start and end node positions of a bar.
    #[must_use]
    pub fn bar_endpoints(&self, bar: EdgeIndex) -> Option<(Point, Point)> {
        self.graph
            .edge_endpoints(bar)
            .map(|(start, end)| (self.graph[start].position, self.graph[end].position))
    }

    /// Distance between the end nodes of a bar.
    #[must_use]
    pub fn bar_length(&self, bar: EdgeIndex) -> Option<f64> {
        self.bar_endpoints(bar)
            .map(|(start, end)| distance(start, end))
    }

    /// Iterate over every bar and its local frame.
    pub fn frames(&self) -> impl Iterator<Item = (EdgeIndex, LocalFrame)> + '_ {
        self.graph
            .edge_indices()
            .map(move |bar| (bar, self.graph[bar].frame))
    }

    /// Change the parallel tolerance and recompute every frame.
    ///
    /// # Errors
    ///
    /// Returns [`StructureEditError::InvalidGeometry`] when some bar has no valid
    /// frame under the new tolerance. The previous tolerance is then kept.
    pub fn set_parallel_epsilon(&mut self, eps: f64) -> Result<(), StructureEditError> {
        let mut provider = self.provider;
        provider.set_parallel_epsilon(eps);

        let mut frames = Vec::with_capacity(self.bar_count());
        for edge in self.graph.edge_references() {
            let (start, end) = (edge.source(), edge.target());
            let frame = provider
                .compute_lcs(
                    self.graph[start].position,
                    self.graph[end].position,
                    edge.weight().k_point,
                )
                .map_err(|source| StructureEditError::InvalidGeometry { start, end, source })?;
            frames.push(frame);
        }

        self.provider = provider;
        for (bar, frame) in self.graph.edge_weights_mut().zip(frames) {
            bar.frame = frame;
        }
        debug!(eps, "parallel tolerance updated");
        Ok(())
    }

    /// Compute the frame for a prospective bar between two existing nodes.
    fn frame_between(
        &self,
        start: NodeIndex,
        end: NodeIndex,
        k_point: Option<Point>,
    ) -> Result<LocalFrame, StructureEditError> {
        let start_position = self
            .node_position(start)
            .ok_or(StructureEditError::UnknownNode(start))?;
        let end_position = self
            .node_position(end)
            .ok_or(StructureEditError::UnknownNode(end))?;
        self.provider
            .compute_lcs(start_position, end_position, k_point)
            .map_err(|source: LcsError| StructureEditError::InvalidGeometry { start, end, source })
    }
}
