/*!
# Closest-First Expansion

Single-source shortest-distance traversal in the style of Dijkstra: the
unsettled vertex with the smallest tentative distance is produced next.
The heap keeps lazily-deleted stale entries, purged whenever they reach
the top, so that heap emptiness coincides exactly with exhaustion.
*/

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

use fxhash::{FxHashMap, FxHashSet};

use super::*;

/// Heap entry: smallest distance first, earlier discovery first among
/// equal distances.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    dist: Weight,
    seq: u64,
    vertex: VertexId,
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed so the max-heap pops the minimum
        other
            .dist
            .partial_cmp(&self.dist)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Closest-first traversal over a graph.
///
/// Distances accumulate edge weights along the taken paths; on
/// unweighted graphs every edge contributes the default weight, which
/// collapses all distances and leaves discovery order. A vertex is
/// settled when it is produced, at which point its distance is final.
pub struct ClosestFirst<'g, L> {
    graph: &'g Graph<L>,
    start: VertexId,
    heap: BinaryHeap<Candidate>,
    dist: FxHashMap<VertexId, Weight>,
    settled: FxHashSet<VertexId>,
    seq: u64,
}

impl<'g, L> ClosestFirst<'g, L>
where
    L: Clone + Eq + Hash,
{
    fn new(graph: &'g Graph<L>, start: &L) -> Result<Self, GraphError> {
        let start = graph.resolve(start)?;
        let mut search = Self {
            graph,
            start,
            heap: BinaryHeap::new(),
            dist: FxHashMap::default(),
            settled: FxHashSet::default(),
            seq: 0,
        };
        search.reset();
        Ok(search)
    }

    /// Shortest distance from the start to `label`, available once the
    /// vertex has been produced. `None` while it is still tentative and
    /// for labels the traversal cannot reach.
    pub fn distance_of(&self, label: &L) -> Option<Weight> {
        let id = self.graph.resolve(label).ok()?;
        self.settled.contains(&id).then(|| self.dist[&id])
    }

    /// Drops stale entries off the top so that heap emptiness means
    /// exhaustion.
    fn purge_settled(&mut self) {
        while let Some(c) = self.heap.peek() {
            if !self.settled.contains(&c.vertex) {
                break;
            }
            self.heap.pop();
        }
    }
}

impl<'g, L> Walker<'g, L> for ClosestFirst<'g, L>
where
    L: Clone + Eq + Hash,
{
    fn has_next(&self) -> bool {
        !self.heap.is_empty()
    }

    fn next_vertex(&mut self) -> Option<&'g Vertex<L>> {
        let Candidate { dist, vertex: u, .. } = self.heap.pop()?;
        self.settled.insert(u);

        let graph = self.graph;
        for &e in &graph.vert(u).out {
            let edge = graph.edge_slot(e);
            let v = edge.other_endpoint(u);
            if self.settled.contains(&v) {
                continue;
            }

            let next = dist + edge.weight();
            if self.dist.get(&v).map_or(true, |&cur| next < cur) {
                self.dist.insert(v, next);
                self.seq += 1;
                self.heap.push(Candidate {
                    dist: next,
                    seq: self.seq,
                    vertex: v,
                });
            }
        }

        self.purge_settled();
        Some(graph.vert(u))
    }

    fn reset(&mut self) {
        self.heap.clear();
        self.dist.clear();
        self.settled.clear();
        self.seq = 0;

        self.heap.push(Candidate {
            dist: 0.0,
            seq: 0,
            vertex: self.start,
        });
        self.dist.insert(self.start, 0.0);
    }
}

impl<'g, L> Iterator for ClosestFirst<'g, L>
where
    L: Clone + Eq + Hash,
{
    type Item = &'g Vertex<L>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_vertex()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let unsettled = self.graph.number_of_vertices() as usize - self.settled.len();
        (usize::from(!self.heap.is_empty()), Some(unsettled))
    }
}

impl<L> Graph<L>
where
    L: Clone + Eq + Hash,
{
    /// Closest-first traversal from `start`, see [`ClosestFirst`].
    ///
    /// # Examples
    /// ```
    /// use lgraphs::{algo::*, prelude::*};
    ///
    /// let mut g = Graph::new(Mode::new().directed().weighted());
    /// g.add_edge_weighted("a", "b", 2.0).unwrap();
    /// g.add_edge_weighted("a", "c", 5.0).unwrap();
    /// g.add_edge_weighted("b", "c", 1.0).unwrap();
    ///
    /// let order: Vec<_> = g.closest_first(&"a").unwrap().map(|v| *v.label()).collect();
    /// assert_eq!(order, ["a", "b", "c"]);
    /// ```
    pub fn closest_first<'g>(&'g self, start: &L) -> Result<ClosestFirst<'g, L>, GraphError> {
        ClosestFirst::new(self, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn weighted(edges: &[(&'static str, &'static str, Weight)]) -> Graph<&'static str> {
        let mut g = Graph::new(Mode::new().directed().weighted());
        for &(u, v, w) in edges {
            g.add_edge_weighted(u, v, w).unwrap();
        }
        g
    }

    #[test]
    fn expands_by_shortest_distance() {
        let g = weighted(&[("a", "b", 4.0), ("a", "c", 1.0), ("c", "b", 2.0), ("b", "d", 1.0)]);

        let mut cf = g.closest_first(&"a").unwrap();
        let order = cf.by_ref().map(|v| *v.label()).collect_vec();
        assert_eq!(order, ["a", "c", "b", "d"]);

        assert_eq!(cf.distance_of(&"a"), Some(0.0));
        assert_eq!(cf.distance_of(&"c"), Some(1.0));
        assert_eq!(cf.distance_of(&"b"), Some(3.0));
        assert_eq!(cf.distance_of(&"d"), Some(4.0));
    }

    #[test]
    fn distances_appear_as_vertices_settle() {
        let g = weighted(&[("a", "b", 4.0), ("a", "c", 1.0)]);

        let mut cf = g.closest_first(&"a").unwrap();
        assert_eq!(cf.distance_of(&"a"), None);

        cf.next_vertex();
        assert_eq!(cf.distance_of(&"a"), Some(0.0));
        // discovered but still tentative
        assert_eq!(cf.distance_of(&"b"), None);

        while cf.next_vertex().is_some() {}
        assert_eq!(cf.distance_of(&"b"), Some(4.0));
        assert_eq!(cf.distance_of(&"unknown"), None);
    }

    #[test]
    fn ties_resolve_by_discovery_order() {
        let g = weighted(&[
            ("a", "b", 1.0),
            ("a", "c", 1.0),
            ("b", "d", 1.0),
            ("c", "e", 1.0),
        ]);

        let order = g.closest_first(&"a").unwrap().map(|v| *v.label()).collect_vec();
        assert_eq!(order, ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn unweighted_graphs_fall_back_to_discovery_order() {
        let g = Graph::from_edges(
            Mode::new().directed(),
            [("a", "b"), ("a", "c"), ("b", "d")],
        )
        .unwrap();

        let mut cf = g.closest_first(&"a").unwrap();
        let order = cf.by_ref().map(|v| *v.label()).collect_vec();
        assert_eq!(order, ["a", "b", "c", "d"]);
        assert_eq!(cf.distance_of(&"d"), Some(0.0));
    }

    #[test]
    fn improved_paths_win_and_stale_entries_vanish() {
        let g = weighted(&[("a", "b", 10.0), ("a", "c", 1.0), ("c", "b", 1.0)]);

        let mut cf = g.closest_first(&"a").unwrap();
        let mut produced = 0;
        while cf.has_next() {
            assert!(cf.next_vertex().is_some());
            produced += 1;
        }

        // the stale 10.0 entry for b must not inflate the iteration
        assert_eq!(produced, 3);
        assert!(cf.next_vertex().is_none());
        assert_eq!(cf.distance_of(&"b"), Some(2.0));
    }

    #[test]
    fn parallel_edges_take_the_lightest_instance() {
        let mut g = Graph::new(Mode::new().directed().weighted());
        g.add_edge_weighted("a", "b", 5.0).unwrap();
        g.add_edge_weighted("a", "b", 2.0).unwrap();
        g.add_edge_weighted("a", "a", 1.0).unwrap();

        let mut cf = g.closest_first(&"a").unwrap();
        let order = cf.by_ref().map(|v| *v.label()).collect_vec();
        assert_eq!(order, ["a", "b"]);
        assert_eq!(cf.distance_of(&"b"), Some(2.0));
    }

    #[test]
    fn undirected_edges_relax_both_ways() {
        let mut g = Graph::new(Mode::new().weighted());
        g.add_edge_weighted("a", "b", 3.0).unwrap();
        g.add_edge_weighted("b", "c", 1.0).unwrap();

        let mut cf = g.closest_first(&"c").unwrap();
        let order = cf.by_ref().map(|v| *v.label()).collect_vec();
        assert_eq!(order, ["c", "b", "a"]);
        assert_eq!(cf.distance_of(&"a"), Some(4.0));
    }

    #[test]
    fn unreachable_vertices_stay_unsettled() {
        let mut g = weighted(&[("a", "b", 1.0)]);
        g.add_vertex("x");

        let mut cf = g.closest_first(&"a").unwrap();
        let order = cf.by_ref().map(|v| *v.label()).collect_vec();
        assert_eq!(order, ["a", "b"]);
        assert_eq!(cf.distance_of(&"x"), None);
    }

    #[test]
    fn reset_replays_the_same_expansion() {
        let g = weighted(&[("a", "b", 4.0), ("a", "c", 1.0), ("c", "b", 2.0)]);

        let mut cf = g.closest_first(&"a").unwrap();
        let first = cf.by_ref().map(|v| *v.label()).collect_vec();

        cf.reset();
        assert_eq!(cf.distance_of(&"b"), None);
        let second = cf.by_ref().map(|v| *v.label()).collect_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_start_is_an_error() {
        let g = weighted(&[("a", "b", 1.0)]);
        assert_eq!(
            g.closest_first(&"z").err(),
            Some(GraphError::VertexNotFound)
        );
    }
}
