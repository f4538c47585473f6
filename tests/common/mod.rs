#![allow(dead_code)]

use residual_flow::maximum_flow::graph::FlowGraph;
use residual_flow::maximum_flow::residual_network::ResidualNetwork;
use std::collections::VecDeque;

/// Graph whose vertices are the letters 'A', 'B', ...
pub struct LetterGraph {
    directed: bool,
    vertices: Vec<char>,
    edges: Vec<(char, char, f64)>,
}

impl LetterGraph {
    pub fn directed(vertices: &str) -> Self {
        Self { directed: true, vertices: vertices.chars().collect(), edges: Vec::new() }
    }

    pub fn undirected(vertices: &str) -> Self {
        Self { directed: false, vertices: vertices.chars().collect(), edges: Vec::new() }
    }

    pub fn add_edge(&mut self, u: char, v: char, weight: f64) -> usize {
        self.edges.push((u, v, weight));
        self.edges.len() - 1
    }
}

impl FlowGraph<f64> for LetterGraph {
    type Vertex = char;
    type Edge = usize;

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn vertices(&self) -> impl Iterator<Item = char> + '_ {
        self.vertices.iter().copied()
    }

    fn edges(&self) -> impl Iterator<Item = usize> + '_ {
        0..self.edges.len()
    }

    fn outgoing_edges(&self, u: char) -> impl Iterator<Item = usize> + '_ {
        (0..self.edges.len()).filter(move |&e| self.edges[e].0 == u)
    }

    fn edge_source(&self, e: usize) -> char {
        self.edges[e].0
    }

    fn edge_target(&self, e: usize) -> char {
        self.edges[e].1
    }

    fn edge_weight(&self, e: usize) -> f64 {
        self.edges[e].2
    }

    fn find_edge(&self, u: char, v: char) -> Option<usize> {
        self.edges.iter().position(|&(a, b, _)| (a == u && b == v) || (!self.directed && a == v && b == u))
    }

    fn contains_edge(&self, e: usize) -> bool {
        e < self.edges.len()
    }

    fn vertex_index(&self, v: char) -> usize {
        (v as u8 - b'A') as usize
    }

    fn edge_index(&self, e: usize) -> usize {
        e
    }
}

/// Shortest augmenting paths driven through the residual network.
pub fn edmonds_karp<G, VX, EX>(network: &mut ResidualNetwork<G, f64, VX, EX>, source: G::Vertex, sink: G::Vertex) -> f64
where
    G: FlowGraph<f64>,
{
    let s = network.vertex_id_of(source).expect("source is not in the graph");
    let t = network.vertex_id_of(sink).expect("sink is not in the graph");
    let n = network.num_vertex_records();
    let mut prev = vec![usize::MAX; n];
    let mut visited = vec![false; n];
    let mut flow = 0.0;

    loop {
        prev.fill(usize::MAX);
        visited.fill(false);

        // bfs
        visited[s] = true;
        let mut queue = VecDeque::from([s]);
        while let Some(u) = queue.pop_front() {
            if u == t {
                break;
            }

            for &edge_id in network.outgoing(u) {
                let to = network.edge(edge_id).target();
                if visited[to] || !network.has_capacity(edge_id) {
                    continue;
                }

                visited[to] = true;
                prev[to] = edge_id;
                queue.push_back(to);
            }
        }

        if !visited[t] {
            break;
        }

        // calculate delta
        let mut delta = f64::INFINITY;
        let mut v = t;
        while v != s {
            let edge = network.edge(prev[v]);
            delta = delta.min(edge.residual_capacity());
            v = edge.source();
        }

        // update flow
        let mut v = t;
        while v != s {
            let edge_id = prev[v];
            network.push(edge_id, delta);
            v = network.edge(edge_id).source();
        }
        flow += delta;
    }

    network.set_maximum_flow_value(flow);
    flow
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "expected {}, got {}", expected, actual);
}
