/*!
`lgraphs` is a graph data structure & traversal library designed for graphs that are
- **l**abelled : Vertices are addressed by caller-supplied labels (any `Clone + Eq + Hash` type)
- **l**ightweight : One container type, no lifetimes or generics beyond the label
- **l**inear to walk : Every algorithm is an iterator that produces vertices one at a time

# Representation

Vertices and edges live in slot arenas owned by the graph and are referenced by `u32`
handles. Labels resolve to handles through a hash registry, while iteration runs over
the arenas themselves and therefore preserves insertion order. Removal tombstones a
slot, so the handles of surviving vertices and edges stay stable.

### Modes

A graph fixes three orthogonal flags at construction (see [`graph::Mode`]):

- **directed** or undirected: an undirected edge is a single instance visible from both
  endpoints.
- **weighted** or unweighted: weighted graphs accept caller-supplied edge weights,
  unweighted graphs reject them.
- **acyclic** or cycle-permitting: acyclic graphs reject self-loops, parallel edges and
  any edge that would close a directed cycle, atomically at insertion time. Acyclic
  implies directed.

Parallel edges are first-class everywhere else: they are stored as separate instances
and count individually in degrees and edge totals.

# Design

All traversals are configurable structs created through methods on the graph itself
(`graph.bfs(&start)`, `graph.topo_iter()`, ...). Each implements both [`Iterator`] and
the crate's own [`algo::Walker`] contract, which adds `has_next` peeking, fallible
visitor draining and a `reset` that rewinds the iterator to its starting state.

# Usage

There are *3* core submodules you probably want to interact with:
- [`prelude`] includes the graph container, modes, vertices, edges and errors,
- [`algo`] includes the traversal iterators: BFS (`graph.bfs(&start)`), DFS,
  topological orders, closest-first expansion, and random walks,
- [`error`] includes the error type every fallible operation reports.

In most use-cases, `use lgraphs::{prelude::*, algo::*};` suffices for your needs.

# When to use

You should only use this library if the following apply:
- You address vertices by domain labels rather than dense indices
- You want iterator-shaped traversals you can pause, resume and rewind
- You require only basic functionality for graphs

In all other cases, it might make sense for you to check out
[petgraph](https://crates.io/crates/petgraph) who provide a more extensive library for
general graphs in *Rust*.
*/

pub mod algo;
pub mod edge;
pub mod error;
pub mod graph;
pub(crate) mod testing;
pub mod vertex;

/// `lgraphs::prelude` includes the graph container and its modes, vertex and edge
/// definitions as well as the error type.
pub mod prelude {
    pub use super::{edge::*, error::*, graph::*, vertex::*};
}
