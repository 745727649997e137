//! Graph representation and the read-only view consumed by the predictor

pub mod compressed;
pub mod builder;
pub mod sparse;

pub use compressed::CompressedGraph;
pub use builder::GraphBuilder;

/// Dense vertex identifier in `[0, vertex_count)`
pub type Vertex = u32;

/// Read-only access to a directed graph.
///
/// Every scoring worker traverses the same view concurrently, so
/// implementations must be `Sync` and keep no traversal state in `&self`.
pub trait GraphView: Sync {
    /// Iterator over the out-neighbors of a vertex
    type Neighbors<'a>: Iterator<Item = Vertex> + 'a
    where
        Self: 'a;

    /// Number of vertices
    fn vertex_count(&self) -> usize;

    /// Number of outgoing edges of `v`
    fn out_degree(&self, v: Vertex) -> usize;

    /// Out-neighbors of `v`, in an implementation-defined but stable order
    fn out_neighbors(&self, v: Vertex) -> Self::Neighbors<'_>;
}
