use std::fmt::Display;

use crate::vertex::VertexId;

/// Stable arena slot of an edge instance. Slots are never reused, so an id
/// stays valid until its edge is removed.
pub type EdgeId = u32;

/// We limit the number of edges to `2^32 - 1`.
pub type NumEdges = u32;

/// Edge and vertex weights.
pub type Weight = f64;

/// Weight assigned whenever none is configured.
pub const DEFAULT_WEIGHT: Weight = 0.0;

/// A single edge instance owned by the graph arena.
///
/// Parallel edges between the same endpoints are distinct instances with
/// distinct slots and are never merged. For undirected graphs the same
/// instance is referenced from both endpoints' adjacency; `source` and
/// `target` then merely record the insertion orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub(crate) id: EdgeId,
    pub(crate) source: VertexId,
    pub(crate) target: VertexId,
    pub(crate) weight: Weight,
}

impl Edge {
    /// Returns the arena slot of this edge instance.
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// Arena slot of the vertex this edge leaves from.
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Arena slot of the vertex this edge points to.
    pub fn target(&self) -> VertexId {
        self.target
    }

    /// Returns the edge weight ([`DEFAULT_WEIGHT`] on unweighted graphs).
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.source == self.target
    }

    /// Given one endpoint, returns the other. A loop returns the endpoint
    /// itself.
    pub(crate) fn other_endpoint(&self, u: VertexId) -> VertexId {
        if self.source == u {
            self.target
        } else {
            self.source
        }
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.source, self.target)
    }
}

/// Configuration of an edge to insert, consumed by
/// [`Graph::insert_edge`](crate::graph::Graph::insert_edge). Endpoints are
/// passed separately as labels; the builder only carries the per-edge
/// properties.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeBuilder {
    weight: Option<Weight>,
}

impl EdgeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the weight of the edge. Only valid on weighted graphs;
    /// insertion rejects a configured weight anywhere else.
    pub fn set_weight(&mut self, weight: Weight) {
        self.weight = Some(weight);
    }

    /// Sets the weight of the edge. Only valid on weighted graphs;
    /// insertion rejects a configured weight anywhere else.
    pub fn weight(mut self, weight: Weight) -> Self {
        self.set_weight(weight);
        self
    }

    pub(crate) fn configured_weight(&self) -> Option<Weight> {
        self.weight
    }
}
