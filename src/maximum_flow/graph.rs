use num_traits::Float;
use std::fmt::Debug;
use std::hash::Hash;

/// The view of a weighted graph that the residual network is built from.
///
/// Vertices and edges are opaque identities. `vertex_index` and `edge_index` must map every
/// identity to a stable dense integer, which is what extension pools are addressed by.
pub trait FlowGraph<Flow> {
    type Vertex: Copy + Eq + Hash + Debug;
    type Edge: Copy + Eq + Hash + Debug;

    fn is_directed(&self) -> bool;

    fn vertices(&self) -> impl Iterator<Item = Self::Vertex> + '_;

    fn edges(&self) -> impl Iterator<Item = Self::Edge> + '_;

    // only queried for directed graphs
    fn outgoing_edges(&self, u: Self::Vertex) -> impl Iterator<Item = Self::Edge> + '_;

    fn edge_source(&self, e: Self::Edge) -> Self::Vertex;

    fn edge_target(&self, e: Self::Edge) -> Self::Vertex;

    fn edge_weight(&self, e: Self::Edge) -> Flow;

    /// Some edge from `u` to `v`, if any. Undirected graphs match either orientation.
    fn find_edge(&self, u: Self::Vertex, v: Self::Vertex) -> Option<Self::Edge>;

    fn contains_edge(&self, e: Self::Edge) -> bool;

    fn vertex_index(&self, v: Self::Vertex) -> usize;

    fn edge_index(&self, e: Self::Edge) -> usize;
}

#[derive(PartialEq, Debug, Clone)]
pub struct Edge<Flow> {
    pub from: usize,
    pub to: usize,
    pub weight: Flow,
}

#[derive(Default)]
pub struct Graph<Flow> {
    num_nodes: usize,
    num_edges: usize,
    undirected: bool,
    edges: Vec<Edge<Flow>>,
    outgoing: Vec<Vec<usize>>,
}

impl<Flow> Graph<Flow>
where
    Flow: Float,
{
    pub fn new_directed() -> Self {
        Self { num_nodes: 0, num_edges: 0, undirected: false, edges: Vec::new(), outgoing: Vec::new() }
    }

    pub fn new_undirected() -> Self {
        Self { num_nodes: 0, num_edges: 0, undirected: true, edges: Vec::new(), outgoing: Vec::new() }
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn add_node(&mut self) -> usize {
        self.outgoing.push(Vec::new());
        self.num_nodes += 1;
        self.num_nodes - 1
    }

    pub fn add_nodes(&mut self, num_nodes: usize) -> Vec<usize> {
        self.outgoing.resize_with(self.num_nodes + num_nodes, Vec::new);
        self.num_nodes += num_nodes;
        ((self.num_nodes - num_nodes)..self.num_nodes).collect()
    }

    // return edge index
    pub fn add_edge(&mut self, from: usize, to: usize, weight: Flow) -> Option<usize> {
        if from >= self.num_nodes || to >= self.num_nodes || weight < Flow::zero() || weight.is_nan() {
            return None;
        }

        self.edges.push(Edge { from, to, weight });
        self.outgoing[from].push(self.num_edges);
        if self.undirected && from != to {
            self.outgoing[to].push(self.num_edges);
        }

        self.num_edges += 1;
        Some(self.num_edges - 1)
    }

    pub fn get_edge(&self, edge_id: usize) -> Option<Edge<Flow>> {
        self.edges.get(edge_id).cloned()
    }
}

impl<Flow> FlowGraph<Flow> for Graph<Flow>
where
    Flow: Float,
{
    type Vertex = usize;
    type Edge = usize;

    fn is_directed(&self) -> bool {
        !self.undirected
    }

    fn vertices(&self) -> impl Iterator<Item = usize> + '_ {
        0..self.num_nodes
    }

    fn edges(&self) -> impl Iterator<Item = usize> + '_ {
        0..self.num_edges
    }

    fn outgoing_edges(&self, u: usize) -> impl Iterator<Item = usize> + '_ {
        self.outgoing[u].iter().copied()
    }

    fn edge_source(&self, e: usize) -> usize {
        self.edges[e].from
    }

    fn edge_target(&self, e: usize) -> usize {
        self.edges[e].to
    }

    fn edge_weight(&self, e: usize) -> Flow {
        self.edges[e].weight
    }

    fn find_edge(&self, u: usize, v: usize) -> Option<usize> {
        if u >= self.num_nodes || v >= self.num_nodes {
            return None;
        }
        self.outgoing[u].iter().copied().find(|&e| {
            let edge = &self.edges[e];
            (edge.from == u && edge.to == v) || (self.undirected && edge.from == v && edge.to == u)
        })
    }

    fn contains_edge(&self, e: usize) -> bool {
        e < self.num_edges
    }

    #[inline]
    fn vertex_index(&self, v: usize) -> usize {
        v
    }

    #[inline]
    fn edge_index(&self, e: usize) -> usize {
        e
    }
}
