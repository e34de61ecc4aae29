use thiserror::Error;

/// Everything that can go wrong when mutating or querying a graph.
///
/// The enumeration is closed and payload-free: errors compare structurally,
/// so callers match on the kind directly instead of probing sentinel values.
/// A rejected mutation always leaves the graph unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphError {
    /// A lookup or walker construction referenced a label that is not in
    /// the graph.
    #[error("vertex does not exist in the graph")]
    VertexNotFound,

    /// Inserting the edge would close a directed cycle in an acyclic
    /// graph, or a topological order was requested on a cyclic graph.
    #[error("the graph would contain a cycle")]
    CycleDetected,

    /// A self-loop was inserted into a graph whose mode forbids them.
    #[error("self-loops are not allowed in this graph")]
    SelfLoop,

    /// A parallel edge was inserted into a graph whose mode forbids them.
    #[error("an edge between these vertices already exists")]
    DuplicateEdge,

    /// The operation is not defined for the graph's mode, e.g. asking an
    /// undirected graph for in-degrees or an unweighted one for weighted
    /// edges.
    #[error("operation is not supported by this graph mode")]
    InvalidMode,
}
