/*!
# Graph Algorithms

Traversal iterators over [`Graph`]: breadth-first and depth-first search,
topological orders, closest-first (shortest-distance) expansion, and
random walks. Every iterator borrows the graph, produces vertices one at
a time and can be rewound to its starting state.
*/

mod closest_first;
mod random_walk;
mod toposort;
mod traversal;

use crate::prelude::*;

pub use closest_first::*;
pub use random_walk::*;
pub use toposort::*;
pub use traversal::*;
