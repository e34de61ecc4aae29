/*!
# Graph Traversals

Breadth-first and depth-first search share one engine: a frontier of
pending vertices, a visited set maintained at discovery time, and a depth
label per discovered vertex. The frontier container decides the
traversal: a queue yields BFS, a stack yields DFS.
*/

use std::collections::VecDeque;
use std::hash::Hash;

use fxhash::{FxHashMap, FxHashSet};

use super::*;

/// Common contract of every traversal iterator in this crate.
///
/// Next to the plain pull interface there is [`Walker::iterate`], which
/// drains the remaining order through a fallible visitor, and
/// [`Walker::reset`], which rewinds the iterator to the state it had
/// right after construction.
pub trait Walker<'g, L: 'g> {
    /// Returns true if another vertex will be produced.
    fn has_next(&self) -> bool;

    /// Produces the next vertex of the order, if any.
    fn next_vertex(&mut self) -> Option<&'g Vertex<L>>;

    /// Rewinds the iterator to its starting state.
    fn reset(&mut self);

    /// Drains the remaining order, applying `visit` to every produced
    /// vertex. The first error stops the traversal and is handed back.
    fn iterate<E, F>(&mut self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&'g Vertex<L>) -> Result<(), E>,
    {
        while let Some(v) = self.next_vertex() {
            visit(v)?;
        }
        Ok(())
    }
}

/// Order in which a [`GraphSearch`] works through its pending vertices.
/// Entries carry the discovery depth alongside the vertex slot.
pub trait Frontier: Default {
    fn push(&mut self, item: (VertexId, Depth));
    fn pop(&mut self) -> Option<(VertexId, Depth)>;
    fn cardinality(&self) -> usize;
    fn clear(&mut self);
}

/// FIFO frontier: breadth-first order.
impl Frontier for VecDeque<(VertexId, Depth)> {
    fn push(&mut self, item: (VertexId, Depth)) {
        self.push_back(item);
    }

    fn pop(&mut self) -> Option<(VertexId, Depth)> {
        self.pop_front()
    }

    fn cardinality(&self) -> usize {
        self.len()
    }

    fn clear(&mut self) {
        VecDeque::clear(self);
    }
}

/// LIFO frontier: depth-first order.
impl Frontier for Vec<(VertexId, Depth)> {
    fn push(&mut self, item: (VertexId, Depth)) {
        Vec::push(self, item);
    }

    fn pop(&mut self) -> Option<(VertexId, Depth)> {
        Vec::pop(self)
    }

    fn cardinality(&self) -> usize {
        self.len()
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }
}

/// Generic single-source traversal, parameterized over the frontier.
///
/// A vertex joins the visited set the moment it is discovered, so each
/// reachable vertex is produced exactly once even across parallel edges
/// and cycles. Undirected graphs are traversed along every incident
/// edge, directed graphs only along edge orientation.
pub struct GraphSearch<'g, L, F> {
    graph: &'g Graph<L>,
    start: VertexId,
    frontier: F,
    visited: FxHashSet<VertexId>,
    depth: FxHashMap<VertexId, Depth>,
    cursor: Option<(VertexId, Depth)>,
}

/// Breadth-first traversal: vertices appear in non-decreasing depth.
pub type Bfs<'g, L> = GraphSearch<'g, L, VecDeque<(VertexId, Depth)>>;

/// Depth-first traversal: each branch is exhausted before its siblings.
pub type Dfs<'g, L> = GraphSearch<'g, L, Vec<(VertexId, Depth)>>;

impl<'g, L, F> GraphSearch<'g, L, F>
where
    L: Clone + Eq + Hash,
    F: Frontier,
{
    fn new(graph: &'g Graph<L>, start: &L) -> Result<Self, GraphError> {
        let start = graph.resolve(start)?;
        let mut search = Self {
            graph,
            start,
            frontier: F::default(),
            visited: FxHashSet::default(),
            depth: FxHashMap::default(),
            cursor: None,
        };
        search.reset();
        Ok(search)
    }
}

impl<'g, L, F> Walker<'g, L> for GraphSearch<'g, L, F>
where
    L: Clone + Eq + Hash,
    F: Frontier,
{
    fn has_next(&self) -> bool {
        self.frontier.cardinality() > 0
    }

    fn next_vertex(&mut self) -> Option<&'g Vertex<L>> {
        let (u, d) = self.frontier.pop()?;
        let graph = self.graph;

        for &e in &graph.vert(u).out {
            let v = graph.edge_slot(e).other_endpoint(u);
            if self.visited.insert(v) {
                self.frontier.push((v, d + 1));
                self.depth.insert(v, d + 1);
            }
        }

        self.cursor = Some((u, d));
        Some(graph.vert(u))
    }

    fn reset(&mut self) {
        self.frontier.clear();
        self.visited.clear();
        self.depth.clear();
        self.cursor = None;

        self.frontier.push((self.start, 0));
        self.visited.insert(self.start);
        self.depth.insert(self.start, 0);
    }
}

impl<'g, L, F> Iterator for GraphSearch<'g, L, F>
where
    L: Clone + Eq + Hash,
    F: Frontier,
{
    type Item = &'g Vertex<L>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_vertex()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = self.frontier.cardinality();
        let undiscovered = self.graph.number_of_vertices() as usize - self.visited.len();
        (pending, Some(pending + undiscovered))
    }
}

impl<'g, L> GraphSearch<'g, L, VecDeque<(VertexId, Depth)>>
where
    L: Clone + Eq + Hash,
{
    /// Depth of the most recently produced vertex; 0 before the first
    /// call to [`Walker::next_vertex`].
    pub fn current_depth(&self) -> Depth {
        self.cursor.map_or(0, |(_, d)| d)
    }

    /// Depth at which `label` has been discovered so far. `None` for
    /// vertices the traversal has not reached yet and for labels that are
    /// not in the graph at all.
    pub fn depth_of(&self, label: &L) -> Option<Depth> {
        let id = self.graph.resolve(label).ok()?;
        self.depth.get(&id).copied()
    }

    /// Like [`Walker::iterate`] with the discovery depth handed to the
    /// visitor alongside every vertex.
    pub fn iterate_with_depth<E, F>(&mut self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&'g Vertex<L>, Depth) -> Result<(), E>,
    {
        while let Some(v) = self.next_vertex() {
            let depth = self.current_depth();
            visit(v, depth)?;
        }
        Ok(())
    }
}

impl<L> Graph<L>
where
    L: Clone + Eq + Hash,
{
    /// Breadth-first traversal from `start`. Vertices at depth `d` are
    /// all produced before any vertex at depth `d + 1`; within a depth,
    /// discovery order (edge-insertion order) decides.
    ///
    /// # Examples
    /// ```
    /// use lgraphs::{algo::*, prelude::*};
    ///
    /// let g = Graph::from_edges(
    ///     Mode::new().directed(),
    ///     [("a", "b"), ("a", "d"), ("b", "c")],
    /// )
    /// .unwrap();
    ///
    /// let order: Vec<_> = g.bfs(&"a").unwrap().map(|v| *v.label()).collect();
    /// assert_eq!(order, ["a", "b", "d", "c"]);
    /// ```
    pub fn bfs<'g>(&'g self, start: &L) -> Result<Bfs<'g, L>, GraphError> {
        GraphSearch::new(self, start)
    }

    /// Depth-first traversal from `start`: the most recently discovered
    /// vertex is expanded next.
    ///
    /// # Examples
    /// ```
    /// use lgraphs::{algo::*, prelude::*};
    ///
    /// let g = Graph::from_edges(
    ///     Mode::new().directed(),
    ///     [("a", "b"), ("a", "c"), ("c", "d")],
    /// )
    /// .unwrap();
    ///
    /// let order: Vec<_> = g.dfs(&"a").unwrap().map(|v| *v.label()).collect();
    /// assert_eq!(order, ["a", "c", "d", "b"]);
    /// ```
    pub fn dfs<'g>(&'g self, start: &L) -> Result<Dfs<'g, L>, GraphError> {
        GraphSearch::new(self, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn labels<'g>(vertices: impl Iterator<Item = &'g Vertex<&'static str>>) -> Vec<&'static str> {
        vertices.map(|v| *v.label()).collect_vec()
    }

    #[test]
    fn bfs_visits_in_depth_layers() {
        let g = Graph::from_edges(
            Mode::new().directed(),
            [
                ("A", "B"),
                ("A", "D"),
                ("B", "C"),
                ("B", "E"),
                ("C", "F"),
                ("D", "E"),
                ("E", "F"),
            ],
        )
        .unwrap();

        let mut bfs = g.bfs(&"A").unwrap();
        assert_eq!(labels(bfs.by_ref()), ["A", "B", "D", "C", "E", "F"]);

        // F is reachable through C and through E, both at depth 2
        for (label, depth) in [("A", 0), ("B", 1), ("D", 1), ("C", 2), ("E", 2), ("F", 3)] {
            assert_eq!(bfs.depth_of(&label), Some(depth));
        }
    }

    #[test]
    fn bfs_records_discovery_depths() {
        let g = Graph::from_edges(
            Mode::new().directed(),
            [("A", "B"), ("A", "C"), ("B", "D"), ("B", "E"), ("C", "F")],
        )
        .unwrap();

        let mut bfs = g.bfs(&"A").unwrap();
        assert_eq!(bfs.depth_of(&"A"), Some(0));
        // not discovered yet
        assert_eq!(bfs.depth_of(&"D"), None);

        while bfs.next_vertex().is_some() {}

        for (label, depth) in [("A", 0), ("B", 1), ("C", 1), ("D", 2), ("E", 2), ("F", 2)] {
            assert_eq!(bfs.depth_of(&label), Some(depth));
        }
        assert_eq!(bfs.depth_of(&"Z"), None);
    }

    #[test]
    fn iterate_with_depth_follows_the_order() {
        let g = Graph::from_edges(
            Mode::new().directed(),
            [("a", "b"), ("b", "c"), ("c", "d")],
        )
        .unwrap();

        let mut seen = Vec::new();
        g.bfs(&"a")
            .unwrap()
            .iterate_with_depth(|v, d| {
                seen.push((*v.label(), d));
                Ok::<(), ()>(())
            })
            .unwrap();

        assert_eq!(seen, [("a", 0), ("b", 1), ("c", 2), ("d", 3)]);
    }

    #[test]
    fn iterate_stops_at_the_first_error() {
        let g = Graph::from_edges(
            Mode::new().directed(),
            [("a", "b"), ("b", "c"), ("c", "d")],
        )
        .unwrap();

        let mut bfs = g.bfs(&"a").unwrap();
        let mut seen = 0;
        let result = bfs.iterate(|_| {
            seen += 1;
            if seen == 2 {
                Err("stop")
            } else {
                Ok(())
            }
        });

        assert_eq!(result, Err("stop"));
        assert_eq!(seen, 2);
        // the traversal can pick up where the visitor bailed
        assert!(bfs.has_next());
        assert_eq!(bfs.next_vertex().map(|v| *v.label()), Some("c"));
    }

    #[test]
    fn dfs_exhausts_branches_before_siblings() {
        let g = Graph::from_edges(Mode::new().directed(), [(1, 2), (1, 3), (3, 4)]).unwrap();

        let order = g.dfs(&1).unwrap().map(|v| *v.label()).collect_vec();
        assert_eq!(order, [1, 3, 4, 2]);
    }

    #[test]
    fn undirected_traversal_walks_both_orientations() {
        let g = Graph::from_edges(Mode::new(), [(0, 1), (1, 2)]).unwrap();

        let order = g.bfs(&2).unwrap().map(|v| *v.label()).collect_vec();
        assert_eq!(order, [2, 1, 0]);
    }

    #[test]
    fn cycles_and_parallel_edges_produce_each_vertex_once() {
        let mut g = Graph::new(Mode::new().directed());
        g.add_edge("a", "a").unwrap();
        g.add_edge("a", "b").unwrap();
        g.add_edge("a", "b").unwrap();
        g.add_edge("b", "a").unwrap();

        assert_eq!(labels(g.bfs(&"a").unwrap()), ["a", "b"]);
        assert_eq!(labels(g.dfs(&"a").unwrap()), ["a", "b"]);
    }

    #[test]
    fn unreachable_vertices_are_skipped() {
        let g = Graph::from_edges(Mode::new().directed(), [("a", "b"), ("c", "d")]).unwrap();

        let mut bfs = g.bfs(&"a").unwrap();
        let order = labels(bfs.by_ref());
        assert_eq!(order, ["a", "b"]);
        assert_eq!(bfs.depth_of(&"c"), None);
    }

    #[test]
    fn reset_replays_the_same_order() {
        let g = Graph::from_edges(
            Mode::new().directed(),
            [
                ("A", "B"),
                ("A", "D"),
                ("B", "C"),
                ("B", "E"),
                ("C", "F"),
                ("D", "E"),
                ("E", "F"),
            ],
        )
        .unwrap();

        let mut bfs = g.bfs(&"A").unwrap();
        let first = labels(bfs.by_ref());
        assert!(!bfs.has_next());
        assert!(bfs.next_vertex().is_none());

        bfs.reset();
        assert_eq!(bfs.depth_of(&"B"), None);
        let second = labels(bfs.by_ref());
        assert_eq!(first, second);

        let mut dfs = g.dfs(&"A").unwrap();
        let first = labels(dfs.by_ref());
        dfs.reset();
        assert_eq!(labels(dfs.by_ref()), first);
    }

    #[test]
    fn has_next_does_not_advance() {
        let g = Graph::from_edges(Mode::new().directed(), [(1, 2)]).unwrap();

        let mut bfs = g.bfs(&1).unwrap();
        for _ in 0..5 {
            assert!(bfs.has_next());
        }
        assert_eq!(bfs.map(|v| *v.label()).collect_vec(), [1, 2]);
    }

    #[test]
    fn missing_start_is_an_error() {
        let g = Graph::from_edges(Mode::new().directed(), [("a", "b")]).unwrap();

        assert_eq!(g.bfs(&"z").err(), Some(GraphError::VertexNotFound));
        assert_eq!(g.dfs(&"z").err(), Some(GraphError::VertexNotFound));
    }
}
