/*!
# Topological Orders

Kahn's algorithm over the in-degree bookkeeping of the container. The
plain variant resolves ties by arena order (insertion order), so it is
deterministic for a given construction history. The stable variant hands
tie-breaking to a caller-supplied comparator instead.
*/

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::hash::Hash;

use itertools::Itertools;

use super::*;

/// Topological order of a directed graph: every edge points from an
/// earlier to a later position. Ties are resolved by insertion order.
///
/// Directedness of the mode is required, acyclicity is not: any directed
/// graph that happens to be cycle-free sorts fine, one with a cycle is a
/// [`GraphError::CycleDetected`].
///
/// # Examples
/// ```
/// use lgraphs::{algo::*, prelude::*};
///
/// let g = Graph::from_edges(Mode::new().acyclic(), [(1, 2), (1, 3), (3, 4)]).unwrap();
///
/// let order: Vec<_> = topological_sort(&g).unwrap().iter().map(|v| *v.label()).collect();
/// assert_eq!(order, [1, 2, 3, 4]);
/// ```
pub fn topological_sort<L>(graph: &Graph<L>) -> Result<Vec<&Vertex<L>>, GraphError>
where
    L: Clone + Eq + Hash,
{
    kahn(graph, None::<fn(&L, &L) -> Ordering>)
}

/// Topological order with caller-controlled tie-breaking: whenever newly
/// released vertices join the candidate frontier, the whole frontier is
/// re-sorted by `cmp`. Passing `None` skips the sorting and behaves like
/// [`topological_sort`].
///
/// # Examples
/// ```
/// use lgraphs::{algo::*, prelude::*};
///
/// let g = Graph::from_edges(Mode::new().directed(), [("b", "a"), ("c", "a")]).unwrap();
///
/// let order: Vec<_> = stable_topological_sort(&g, Some(|x: &&str, y: &&str| x.cmp(y)))
///     .unwrap()
///     .iter()
///     .map(|v| *v.label())
///     .collect();
/// assert_eq!(order, ["b", "c", "a"]);
/// ```
pub fn stable_topological_sort<L, C>(
    graph: &Graph<L>,
    cmp: Option<C>,
) -> Result<Vec<&Vertex<L>>, GraphError>
where
    L: Clone + Eq + Hash,
    C: FnMut(&L, &L) -> Ordering,
{
    kahn(graph, cmp)
}

fn kahn<'g, L, C>(graph: &'g Graph<L>, mut cmp: Option<C>) -> Result<Vec<&'g Vertex<L>>, GraphError>
where
    L: Clone + Eq + Hash,
    C: FnMut(&L, &L) -> Ordering,
{
    if !graph.is_directed() {
        return Err(GraphError::InvalidMode);
    }

    // Slot-indexed copy of the in-degrees; parallel instances count
    // individually, so a vertex is released once all of them are gone.
    let mut in_degs: Vec<NumEdges> = vec![0; graph.vertex_slots()];
    for v in graph.vertices() {
        in_degs[v.id() as usize] = v.in_degree();
    }

    let mut frontier: VecDeque<VertexId> = graph
        .vertices()
        .filter(|v| v.in_degree() == 0)
        .map(|v| v.id())
        .collect();
    sort_frontier(graph, &mut frontier, &mut cmp);

    let mut order = Vec::with_capacity(graph.number_of_vertices() as usize);
    while let Some(u) = frontier.pop_front() {
        order.push(u);

        let mut grew = false;
        for &e in &graph.vert(u).out {
            let v = graph.edge_slot(e).target;
            in_degs[v as usize] -= 1;
            if in_degs[v as usize] == 0 {
                frontier.push_back(v);
                grew = true;
            }
        }
        if grew {
            sort_frontier(graph, &mut frontier, &mut cmp);
        }
    }

    // Vertices on a cycle never reach in-degree 0.
    if order.len() < graph.number_of_vertices() as usize {
        return Err(GraphError::CycleDetected);
    }

    Ok(order.into_iter().map(|u| graph.vert(u)).collect_vec())
}

fn sort_frontier<L, C>(graph: &Graph<L>, frontier: &mut VecDeque<VertexId>, cmp: &mut Option<C>)
where
    L: Clone + Eq + Hash,
    C: FnMut(&L, &L) -> Ordering,
{
    if let Some(cmp) = cmp.as_mut() {
        frontier
            .make_contiguous()
            .sort_by(|&a, &b| cmp(graph.vert(a).label(), graph.vert(b).label()));
    }
}

/// Iterator form of [`topological_sort`]: the order is computed eagerly
/// at construction and handed out vertex by vertex, so graphs that do
/// not sort fail at construction time.
pub struct TopoIter<'g, L> {
    order: Vec<&'g Vertex<L>>,
    cursor: usize,
}

impl<'g, L> TopoIter<'g, L>
where
    L: Clone + Eq + Hash,
{
    fn new(graph: &'g Graph<L>) -> Result<Self, GraphError> {
        Ok(Self {
            order: topological_sort(graph)?,
            cursor: 0,
        })
    }
}

impl<'g, L> Walker<'g, L> for TopoIter<'g, L>
where
    L: Clone + Eq + Hash,
{
    fn has_next(&self) -> bool {
        self.cursor < self.order.len()
    }

    fn next_vertex(&mut self) -> Option<&'g Vertex<L>> {
        let v = *self.order.get(self.cursor)?;
        self.cursor += 1;
        Some(v)
    }

    fn reset(&mut self) {
        self.cursor = 0;
    }
}

impl<'g, L> Iterator for TopoIter<'g, L>
where
    L: Clone + Eq + Hash,
{
    type Item = &'g Vertex<L>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_vertex()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.order.len() - self.cursor;
        (remaining, Some(remaining))
    }
}

impl<L> Graph<L>
where
    L: Clone + Eq + Hash,
{
    /// Topological iterator over the graph, see [`TopoIter`].
    pub fn topo_iter(&self) -> Result<TopoIter<'_, L>, GraphError> {
        TopoIter::new(self)
    }
}
