/*!
# Labelled Graph Container

One container type covers every mode combination: directed or undirected,
weighted or unweighted, cycle-permitting or acyclic. The mode is fixed at
construction and checked at runtime wherever an operation is only defined
for some of the modes.

Storage follows an arena discipline: vertices and edges live in slot
vectors owned by the graph, adjacency is kept as edge slots, and removal
tombstones a slot so that surviving ids stay stable. Labels are resolved
through a hash registry while iteration runs over the arena itself and
therefore preserves insertion order.
*/

use std::fmt::{self, Debug};
use std::hash::Hash;

use fxhash::FxHashMap;
use itertools::Itertools;

use crate::{
    edge::{Edge, EdgeBuilder, EdgeId, NumEdges, Weight, DEFAULT_WEIGHT},
    error::GraphError,
    vertex::{NumVertices, Vertex, VertexBuilder, VertexId},
};

/// Runtime mode flags of a graph, fixed at construction.
///
/// Defaults to undirected, unweighted and cycle-permitting. `acyclic`
/// implies `directed` since acyclicity is only tracked along edge
/// orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Mode {
    directed: bool,
    weighted: bool,
    acyclic: bool,
}

impl Mode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Edges get an orientation from source to target.
    pub fn set_directed(&mut self) {
        self.directed = true;
    }

    /// Edges get an orientation from source to target.
    pub fn directed(mut self) -> Self {
        self.set_directed();
        self
    }

    /// Edges carry caller-supplied weights.
    pub fn set_weighted(&mut self) {
        self.weighted = true;
    }

    /// Edges carry caller-supplied weights.
    pub fn weighted(mut self) -> Self {
        self.set_weighted();
        self
    }

    /// Edges that would close a directed cycle are rejected at insertion.
    /// Implies `directed`.
    pub fn set_acyclic(&mut self) {
        self.acyclic = true;
        self.directed = true;
    }

    /// Edges that would close a directed cycle are rejected at insertion.
    /// Implies `directed`.
    pub fn acyclic(mut self) -> Self {
        self.set_acyclic();
        self
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    pub fn is_acyclic(&self) -> bool {
        self.acyclic
    }
}

/// An in-memory graph whose vertices are addressed by caller-supplied
/// labels.
///
/// Labels can be any `Clone + Eq + Hash` type and are unique: inserting a
/// label twice yields the same vertex. Edges may be parallel (tracked as
/// separate instances) unless the acyclic mode forbids them.
///
/// # Examples
/// ```
/// use lgraphs::prelude::*;
///
/// let mut g = Graph::new(Mode::new().directed());
/// g.add_edge("a", "b").unwrap();
/// g.add_edge("b", "c").unwrap();
///
/// assert!(g.contains_edge(&"a", &"b"));
/// assert_eq!(g.number_of_vertices(), 3);
/// assert_eq!(g.in_degree_of(&"c").unwrap(), 1);
/// ```
#[derive(Clone)]
pub struct Graph<L> {
    mode: Mode,
    vertices: Vec<Option<Vertex<L>>>,
    edges: Vec<Option<Edge>>,
    labels: FxHashMap<L, VertexId>,
    num_edges: NumEdges,
}

impl<L> Graph<L>
where
    L: Clone + Eq + Hash,
{
    /// Creates an empty graph with the given mode.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            vertices: Vec::new(),
            edges: Vec::new(),
            labels: FxHashMap::default(),
            num_edges: 0,
        }
    }

    /// Builds a graph of the given mode from an edge list, upserting every
    /// endpoint label on the way. Fails exactly like the equivalent
    /// sequence of [`Graph::add_edge`] calls would, which is only possible
    /// in acyclic mode.
    ///
    /// # Examples
    /// ```
    /// use lgraphs::prelude::*;
    ///
    /// let g = Graph::from_edges(Mode::new().acyclic(), [(1, 2), (2, 3)]).unwrap();
    /// assert_eq!(g.number_of_edges(), 2);
    ///
    /// assert!(Graph::from_edges(Mode::new().acyclic(), [(1, 2), (2, 1)]).is_err());
    /// ```
    pub fn from_edges<I>(mode: Mode, edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (L, L)>,
    {
        let mut graph = Self::new(mode);
        for (from, to) in edges {
            graph.add_edge(from, to)?;
        }
        Ok(graph)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_directed(&self) -> bool {
        self.mode.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.mode.weighted
    }

    pub fn is_acyclic(&self) -> bool {
        self.mode.acyclic
    }

    /// Number of vertices currently in the graph.
    pub fn number_of_vertices(&self) -> NumVertices {
        self.labels.len() as NumVertices
    }

    /// Number of live edge instances. Parallel edges count individually;
    /// an undirected edge counts once.
    pub fn number_of_edges(&self) -> NumEdges {
        self.num_edges
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Inserts a vertex with the given label and default weight. Labels
    /// are unique: if the label is already present the existing vertex is
    /// left untouched and its id is returned.
    pub fn add_vertex(&mut self, label: L) -> VertexId {
        self.insert_vertex(VertexBuilder::new(label))
    }

    /// Inserts a configured vertex. Idempotent on the label like
    /// [`Graph::add_vertex`]: an existing vertex keeps its stored weight.
    pub fn insert_vertex(&mut self, vertex: VertexBuilder<L>) -> VertexId {
        let (label, weight) = vertex.into_parts();
        if let Some(&id) = self.labels.get(&label) {
            return id;
        }

        let id = self.vertices.len() as VertexId;
        self.labels.insert(label.clone(), id);
        self.vertices.push(Some(Vertex::new(label, weight, id)));
        id
    }

    /// Inserts an edge from `from` to `to` with default weight. Endpoint
    /// labels not yet in the graph are inserted first, so a graph can be
    /// built from edges alone. Returns the slot of the new instance.
    ///
    /// Acyclic graphs reject self-loops ([`GraphError::SelfLoop`]),
    /// parallel edges ([`GraphError::DuplicateEdge`]) and edges that would
    /// close a cycle ([`GraphError::CycleDetected`]); a rejected insertion
    /// leaves the graph unchanged, including the endpoint upserts.
    pub fn add_edge(&mut self, from: L, to: L) -> Result<EdgeId, GraphError> {
        self.insert_edge(from, to, EdgeBuilder::new())
    }

    /// Inserts an edge carrying the given weight. Fails with
    /// [`GraphError::InvalidMode`] unless the graph is weighted.
    pub fn add_edge_weighted(&mut self, from: L, to: L, weight: Weight) -> Result<EdgeId, GraphError> {
        self.insert_edge(from, to, EdgeBuilder::new().weight(weight))
    }

    /// Inserts a configured edge, upserting both endpoint labels. See
    /// [`Graph::add_edge`] for the mode-dependent rejections.
    pub fn insert_edge(&mut self, from: L, to: L, edge: EdgeBuilder) -> Result<EdgeId, GraphError> {
        let weight = match edge.configured_weight() {
            Some(_) if !self.mode.weighted => return Err(GraphError::InvalidMode),
            Some(w) => w,
            None => DEFAULT_WEIGHT,
        };

        // All rejections happen before the endpoint upserts so that a
        // failed insertion leaves no trace.
        if self.mode.acyclic {
            if from == to {
                return Err(GraphError::SelfLoop);
            }
            // Only edges between two existing vertices can duplicate an
            // instance or close a cycle.
            if let (Some(&f), Some(&t)) = (self.labels.get(&from), self.labels.get(&to)) {
                if self.has_edge_ids(f, t) {
                    return Err(GraphError::DuplicateEdge);
                }
                if self.is_reachable(t, f) {
                    return Err(GraphError::CycleDetected);
                }
            }
        }

        let from_id = self.add_vertex(from);
        let to_id = self.add_vertex(to);

        let id = self.edges.len() as EdgeId;
        self.edges.push(Some(Edge {
            id,
            source: from_id,
            target: to_id,
            weight,
        }));

        self.vert_mut(from_id).out.push(id);
        if !self.mode.directed && from_id != to_id {
            // One arena slot, referenced from both adjacency lists.
            self.vert_mut(to_id).out.push(id);
        }
        self.vert_mut(to_id).inc.push(id);
        self.num_edges += 1;

        Ok(id)
    }

    /// Removes a single edge instance by slot. Returns false, leaving the
    /// graph untouched, if the slot is already gone.
    pub fn remove_edge_id(&mut self, id: EdgeId) -> bool {
        let Some(edge) = self.edges.get_mut(id as usize).and_then(Option::take) else {
            return false;
        };

        self.vert_mut(edge.source).out.retain(|e| *e != id);
        if !self.mode.directed && !edge.is_loop() {
            self.vert_mut(edge.target).out.retain(|e| *e != id);
        }
        self.vert_mut(edge.target).inc.retain(|e| *e != id);
        self.num_edges -= 1;
        true
    }

    /// Removes every edge instance between `from` and `to` (the unordered
    /// pair for undirected graphs) and returns how many were removed.
    /// Unknown labels or pairs without edges are a no-op returning 0.
    pub fn remove_edge(&mut self, from: &L, to: &L) -> usize {
        let (Some(&from_id), Some(&to_id)) = (self.labels.get(from), self.labels.get(to)) else {
            return 0;
        };

        let doomed: Vec<EdgeId> = self
            .vert(from_id)
            .out
            .iter()
            .copied()
            .filter(|&e| self.edge_matches(e, from_id, to_id))
            .collect();

        for e in &doomed {
            self.remove_edge_id(*e);
        }
        doomed.len()
    }

    /// Removes the vertex with the given label along with every incident
    /// edge. Unknown labels are a no-op.
    pub fn remove_vertex(&mut self, label: &L) {
        let Some(&id) = self.labels.get(label) else {
            return;
        };

        // Incident edges go first so endpoint bookkeeping stays intact.
        // Undirected slots can show up in both lists; the second removal
        // of the same slot is a no-op.
        let incident: Vec<EdgeId> = {
            let v = self.vert(id);
            v.out.iter().chain(v.inc.iter()).copied().collect()
        };
        for e in incident {
            self.remove_edge_id(e);
        }

        self.labels.remove(label);
        self.vertices[id as usize] = None;
    }

    pub fn contains_vertex(&self, label: &L) -> bool {
        self.labels.contains_key(label)
    }

    /// Returns true if at least one edge instance connects `from` to `to`
    /// (either orientation on undirected graphs).
    pub fn contains_edge(&self, from: &L, to: &L) -> bool {
        self.edge_between(from, to).is_some()
    }

    /// Returns the vertex stored under `label`.
    pub fn vertex(&self, label: &L) -> Option<&Vertex<L>> {
        self.labels.get(label).map(|&id| self.vert(id))
    }

    /// Returns the arena slot of `label`.
    pub fn vertex_id(&self, label: &L) -> Option<VertexId> {
        self.labels.get(label).copied()
    }

    /// Returns the vertex in slot `id`; `None` for removed or foreign
    /// slots.
    pub fn vertex_by_id(&self, id: VertexId) -> Option<&Vertex<L>> {
        self.vertices.get(id as usize).and_then(Option::as_ref)
    }

    /// Returns the edge instance in slot `id`; `None` for removed or
    /// foreign slots.
    pub fn edge_by_id(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id as usize).and_then(Option::as_ref)
    }

    /// First inserted edge instance between the endpoints, if any.
    pub fn edge_between(&self, from: &L, to: &L) -> Option<&Edge> {
        self.edges_between(from, to).next()
    }

    /// All parallel edge instances between the endpoints in insertion
    /// order. Unknown labels yield an empty iterator.
    pub fn edges_between<'a>(&'a self, from: &L, to: &L) -> impl Iterator<Item = &'a Edge> + 'a {
        let endpoints = match (self.labels.get(from), self.labels.get(to)) {
            (Some(&f), Some(&t)) => Some((f, t)),
            _ => None,
        };

        endpoints.into_iter().flat_map(move |(f, t)| {
            self.vert(f)
                .out
                .iter()
                .copied()
                .filter(move |&e| self.edge_matches(e, f, t))
                .map(move |e| self.edge_slot(e))
        })
    }

    /// Iterates the outgoing neighbors of `label` in edge-insertion order.
    /// Parallel edges repeat their neighbor once per instance; undirected
    /// graphs list every adjacent vertex.
    pub fn neighbors_of<'a>(
        &'a self,
        label: &L,
    ) -> Result<impl Iterator<Item = &'a Vertex<L>> + 'a, GraphError> {
        let id = self.resolve(label)?;
        Ok(self
            .vert(id)
            .out
            .iter()
            .map(move |&e| self.vert(self.edge_slot(e).other_endpoint(id))))
    }

    /// Iterates the outgoing edge instances of `label` in insertion order
    /// (every incident instance for undirected graphs).
    pub fn edges_of<'a>(&'a self, label: &L) -> Result<impl Iterator<Item = &'a Edge> + 'a, GraphError> {
        let id = self.resolve(label)?;
        Ok(self.vert(id).out.iter().map(move |&e| self.edge_slot(e)))
    }

    /// Number of outgoing edge instances of `label`.
    pub fn out_degree_of(&self, label: &L) -> Result<NumEdges, GraphError> {
        Ok(self.vert(self.resolve(label)?).out_degree())
    }

    /// Number of edge instances pointing at `label`. Undirected graphs
    /// have no notion of in-degree, so asking is a
    /// [`GraphError::InvalidMode`].
    pub fn in_degree_of(&self, label: &L) -> Result<NumEdges, GraphError> {
        if !self.mode.directed {
            return Err(GraphError::InvalidMode);
        }
        Ok(self.vert(self.resolve(label)?).in_degree())
    }

    /// Iterates all vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<L>> {
        self.vertices.iter().flatten()
    }

    /// Iterates all edge instances in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().flatten()
    }

    pub(crate) fn resolve(&self, label: &L) -> Result<VertexId, GraphError> {
        self.labels
            .get(label)
            .copied()
            .ok_or(GraphError::VertexNotFound)
    }

    /// Resolves a live vertex slot. Callers only pass ids taken from live
    /// bookkeeping.
    ///
    /// ** Panics if the slot is tombstoned or out of range **
    pub(crate) fn vert(&self, id: VertexId) -> &Vertex<L> {
        self.vertices[id as usize].as_ref().unwrap()
    }

    fn vert_mut(&mut self, id: VertexId) -> &mut Vertex<L> {
        self.vertices[id as usize].as_mut().unwrap()
    }

    /// Resolves a live edge slot, with the same contract as
    /// [`Graph::vert`].
    pub(crate) fn edge_slot(&self, id: EdgeId) -> &Edge {
        self.edges[id as usize].as_ref().unwrap()
    }

    /// Arena length including tombstones, for slot-indexed scratch space.
    pub(crate) fn vertex_slots(&self) -> usize {
        self.vertices.len()
    }

    /// Whether edge slot `e`, known to be incident to `from`, connects
    /// `from` to `to` under the graph's orientation rules.
    fn edge_matches(&self, e: EdgeId, from: VertexId, to: VertexId) -> bool {
        let edge = self.edge_slot(e);
        if self.mode.directed {
            edge.target == to
        } else {
            edge.other_endpoint(from) == to
        }
    }

    fn has_edge_ids(&self, from: VertexId, to: VertexId) -> bool {
        self.vert(from)
            .out
            .iter()
            .any(|&e| self.edge_matches(e, from, to))
    }

    /// Depth-first reachability along edge orientation, used by the
    /// acyclic-mode insertion check (acyclic implies directed).
    fn is_reachable(&self, from: VertexId, to: VertexId) -> bool {
        if from == to {
            return true;
        }

        let mut visited = vec![false; self.vertices.len()];
        visited[from as usize] = true;
        let mut stack = vec![from];

        while let Some(u) = stack.pop() {
            for &e in &self.vert(u).out {
                let v = self.edge_slot(e).target;
                if v == to {
                    return true;
                }
                if !visited[v as usize] {
                    visited[v as usize] = true;
                    stack.push(v);
                }
            }
        }

        false
    }
}

impl<L> Default for Graph<L>
where
    L: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

impl<L> Debug for Graph<L>
where
    L: Clone + Eq + Hash + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.mode.directed { "->" } else { "--" };
        write!(
            f,
            "Graph[n={}, m={}; {}]",
            self.number_of_vertices(),
            self.number_of_edges(),
            self.edges()
                .map(|e| format!(
                    "{:?}{arrow}{:?}",
                    self.vert(e.source).label,
                    self.vert(e.target).label
                ))
                .join(", ")
        )
    }
}


crate::testing::test_graph_ops!(directed_container_ops, true);
crate::testing::test_graph_ops!(undirected_container_ops, false);
