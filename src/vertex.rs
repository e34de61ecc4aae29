/*!
# Vertex Representation

Vertices are addressed by caller-supplied labels but stored in a slot arena:
`VertexId = u32` indexes into the arena and stays stable for the lifetime of
the vertex. This keeps adjacency as plain indices instead of references,
which in turn keeps walker state `Copy`-cheap and free of lifetimes.
*/

use smallvec::SmallVec;

use crate::edge::{EdgeId, NumEdges, Weight, DEFAULT_WEIGHT};

/// Stable arena slot of a vertex. Slots are never reused, so an id stays
/// valid until its vertex is removed.
pub type VertexId = u32;

/// There can be at most `2^32 - 1` vertices in a graph!
pub type NumVertices = u32;

/// Discovery depth recorded by breadth-first walkers.
pub type Depth = u32;

/// Inline capacity of the per-vertex incidence lists. Vertices of sparse
/// graphs mostly stay below this and never touch the heap.
pub(crate) const INLINE_DEGREE: usize = 4;

/// Incident edge slots of one vertex, in insertion order.
pub(crate) type IncidenceList = SmallVec<[EdgeId; INLINE_DEGREE]>;

/// A vertex owned by the graph arena: its label, a weight, and the incident
/// edge slots in insertion order.
#[derive(Debug, Clone)]
pub struct Vertex<L> {
    pub(crate) label: L,
    pub(crate) weight: Weight,
    pub(crate) id: VertexId,
    /// Outgoing edge slots in insertion order. For undirected graphs this
    /// holds every incident edge (both endpoints reference the same slot).
    pub(crate) out: IncidenceList,
    /// Edge slots this vertex is the target of; its length is the
    /// in-degree.
    pub(crate) inc: IncidenceList,
}

impl<L> Vertex<L> {
    pub(crate) fn new(label: L, weight: Weight, id: VertexId) -> Self {
        Self {
            label,
            weight,
            id,
            out: IncidenceList::new(),
            inc: IncidenceList::new(),
        }
    }

    /// Returns the caller-supplied label identifying this vertex.
    pub fn label(&self) -> &L {
        &self.label
    }

    /// Returns the vertex weight ([`DEFAULT_WEIGHT`] unless configured at
    /// insertion).
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Returns the arena slot of this vertex.
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Number of outgoing edge instances (every incident instance for
    /// undirected graphs). Parallel edges count individually.
    pub fn out_degree(&self) -> NumEdges {
        self.out.len() as NumEdges
    }

    /// Number of incoming edge instances. Meaningless on undirected
    /// graphs, which is why the public accessor
    /// [`Graph::in_degree_of`](crate::graph::Graph::in_degree_of) checks
    /// the mode first.
    pub(crate) fn in_degree(&self) -> NumEdges {
        self.inc.len() as NumEdges
    }
}

/// Configuration of a vertex to insert, consumed by
/// [`Graph::insert_vertex`](crate::graph::Graph::insert_vertex).
#[derive(Debug, Clone)]
pub struct VertexBuilder<L> {
    label: L,
    weight: Weight,
}

impl<L> VertexBuilder<L> {
    pub fn new(label: L) -> Self {
        Self {
            label,
            weight: DEFAULT_WEIGHT,
        }
    }

    /// Sets the weight of the vertex. Vertex weights are independent of
    /// the graph's weighted flag, which only governs edges.
    pub fn set_weight(&mut self, weight: Weight) {
        self.weight = weight;
    }

    /// Sets the weight of the vertex. Vertex weights are independent of
    /// the graph's weighted flag, which only governs edges.
    pub fn weight(mut self, weight: Weight) -> Self {
        self.set_weight(weight);
        self
    }

    pub(crate) fn into_parts(self) -> (L, Weight) {
        (self.label, self.weight)
    }
}
