/*!
# Random Walks

Uniform random walks over the outgoing adjacency of a graph. Transitions
pick among edge instances, so parallel edges weigh their endpoint
proportionally. The RNG state at construction is kept around, which makes
a reset walk replay its exact trajectory.
*/

use std::hash::Hash;

use rand::Rng;

use super::*;

/// Random walk iterator: the start vertex first, then one vertex per
/// transition.
///
/// A walk of `steps` transitions produces at most `steps + 1` vertices
/// and ends early when the current vertex has no outgoing edge. Vertices
/// can repeat; the walk does not track visited state.
pub struct RandomWalk<'g, L, R: Rng + Clone> {
    graph: &'g Graph<L>,
    start: VertexId,
    steps: usize,
    initial_rng: R,
    rng: R,
    position: Option<VertexId>,
    taken: usize,
}

impl<'g, L, R> RandomWalk<'g, L, R>
where
    L: Clone + Eq + Hash,
    R: Rng + Clone,
{
    fn new(graph: &'g Graph<L>, start: &L, steps: usize, rng: R) -> Result<Self, GraphError> {
        Ok(Self {
            graph,
            start: graph.resolve(start)?,
            steps,
            initial_rng: rng.clone(),
            rng,
            position: None,
            taken: 0,
        })
    }
}

impl<'g, L, R> Walker<'g, L> for RandomWalk<'g, L, R>
where
    L: Clone + Eq + Hash,
    R: Rng + Clone,
{
    fn has_next(&self) -> bool {
        match self.position {
            None => true,
            Some(u) => self.taken < self.steps && self.graph.vert(u).out_degree() > 0,
        }
    }

    fn next_vertex(&mut self) -> Option<&'g Vertex<L>> {
        let graph = self.graph;

        let next = match self.position {
            None => self.start,
            Some(u) => {
                if self.taken >= self.steps {
                    return None;
                }
                let out = &graph.vert(u).out;
                if out.is_empty() {
                    return None;
                }
                let e = out[self.rng.random_range(0..out.len())];
                self.taken += 1;
                graph.edge_slot(e).other_endpoint(u)
            }
        };

        self.position = Some(next);
        Some(graph.vert(next))
    }

    fn reset(&mut self) {
        self.rng = self.initial_rng.clone();
        self.position = None;
        self.taken = 0;
    }
}

impl<'g, L, R> Iterator for RandomWalk<'g, L, R>
where
    L: Clone + Eq + Hash,
    R: Rng + Clone,
{
    type Item = &'g Vertex<L>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_vertex()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending_start = usize::from(self.position.is_none());
        (0, Some(self.steps - self.taken + pending_start))
    }
}

impl<L> Graph<L>
where
    L: Clone + Eq + Hash,
{
    /// Uniform random walk of at most `steps` transitions from `start`,
    /// see [`RandomWalk`].
    ///
    /// # Examples
    /// ```
    /// use lgraphs::{algo::*, prelude::*};
    /// use rand::SeedableRng;
    /// use rand_pcg::Pcg64Mcg;
    ///
    /// let g = Graph::from_edges(Mode::new().directed(), [("a", "b"), ("b", "a")]).unwrap();
    ///
    /// let walk = g.random_walk(&"a", 3, Pcg64Mcg::seed_from_u64(3)).unwrap();
    /// let trail: Vec<_> = walk.map(|v| *v.label()).collect();
    /// assert_eq!(trail, ["a", "b", "a", "b"]);
    /// ```
    pub fn random_walk<'g, R>(
        &'g self,
        start: &L,
        steps: usize,
        rng: R,
    ) -> Result<RandomWalk<'g, L, R>, GraphError>
    where
        R: Rng + Clone,
    {
        RandomWalk::new(self, start, steps, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn branching() -> Graph<&'static str> {
        Graph::from_edges(
            Mode::new().directed(),
            [("a", "b"), ("a", "c"), ("b", "a"), ("c", "a"), ("c", "b")],
        )
        .unwrap()
    }

    #[test]
    fn walk_follows_existing_edges() {
        let g = branching();

        let trail = g
            .random_walk(&"a", 20, Pcg64Mcg::seed_from_u64(3))
            .unwrap()
            .map(|v| *v.label())
            .collect_vec();

        assert_eq!(trail[0], "a");
        assert!(trail.len() <= 21);
        for (u, v) in trail.iter().tuple_windows() {
            assert!(g.contains_edge(u, v));
        }
    }

    #[test]
    fn step_budget_counts_transitions() {
        let g = Graph::from_edges(
            Mode::new().directed(),
            [("a", "b"), ("b", "c"), ("c", "a")],
        )
        .unwrap();

        let trail = g
            .random_walk(&"a", 5, Pcg64Mcg::seed_from_u64(3))
            .unwrap()
            .map(|v| *v.label())
            .collect_vec();

        // start plus one vertex per transition
        assert_eq!(trail.len(), 6);
        assert_eq!(trail, ["a", "b", "c", "a", "b", "c"]);
    }

    #[test]
    fn walk_ends_at_a_dead_end() {
        let g = Graph::from_edges(Mode::new().directed(), [("a", "b"), ("b", "c")]).unwrap();

        let mut walk = g.random_walk(&"a", 10, Pcg64Mcg::seed_from_u64(3)).unwrap();
        let trail = walk.by_ref().map(|v| *v.label()).collect_vec();

        assert_eq!(trail, ["a", "b", "c"]);
        assert!(!walk.has_next());
        assert!(walk.next_vertex().is_none());
    }

    #[test]
    fn isolated_start_produces_itself() {
        let mut g: Graph<&str> = Graph::new(Mode::new().directed());
        g.add_vertex("x");

        let mut walk = g.random_walk(&"x", 5, Pcg64Mcg::seed_from_u64(3)).unwrap();
        assert!(walk.has_next());
        assert_eq!(walk.next_vertex().map(|v| *v.label()), Some("x"));
        assert!(!walk.has_next());
    }

    #[test]
    fn zero_steps_produces_only_the_start() {
        let g = branching();

        let trail = g
            .random_walk(&"a", 0, Pcg64Mcg::seed_from_u64(3))
            .unwrap()
            .map(|v| *v.label())
            .collect_vec();
        assert_eq!(trail, ["a"]);
    }

    #[test]
    fn self_loops_keep_the_walk_in_place() {
        let g = Graph::from_edges(Mode::new().directed(), [("a", "a")]).unwrap();

        let trail = g
            .random_walk(&"a", 3, Pcg64Mcg::seed_from_u64(3))
            .unwrap()
            .map(|v| *v.label())
            .collect_vec();
        assert_eq!(trail, ["a", "a", "a", "a"]);
    }

    #[test]
    fn undirected_walk_crosses_edges_both_ways() {
        let g = Graph::from_edges(Mode::new(), [("a", "b")]).unwrap();

        let trail = g
            .random_walk(&"a", 3, Pcg64Mcg::seed_from_u64(3))
            .unwrap()
            .map(|v| *v.label())
            .collect_vec();
        assert_eq!(trail, ["a", "b", "a", "b"]);
    }

    #[test]
    fn reset_replays_the_same_trajectory() {
        let g = branching();

        let mut walk = g.random_walk(&"a", 15, Pcg64Mcg::seed_from_u64(7)).unwrap();
        let first = walk.by_ref().map(|v| *v.label()).collect_vec();

        walk.reset();
        let second = walk.by_ref().map(|v| *v.label()).collect_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_start_is_an_error() {
        let g = branching();
        assert!(matches!(
            g.random_walk(&"z", 5, Pcg64Mcg::seed_from_u64(3)),
            Err(GraphError::VertexNotFound)
        ));
    }
}
