use residual_flow::maximum_flow::graph::{FlowGraph, Graph};
use residual_flow::maximum_flow::residual_network::ResidualNetwork;
use std::collections::VecDeque;

// shortest augmenting paths over the residual network
fn edmonds_karp(network: &mut ResidualNetwork<Graph<f64>, f64>, source: usize, sink: usize) -> f64 {
    let (Some(s), Some(t)) = (network.vertex_id_of(source), network.vertex_id_of(sink)) else {
        return 0.0;
    };
    let mut prev = vec![usize::MAX; network.num_vertex_records()];
    let mut flow = 0.0;

    loop {
        prev.fill(usize::MAX);
        prev[s] = s;
        let mut queue = VecDeque::from([s]);
        while let Some(u) = queue.pop_front() {
            for &edge_id in network.outgoing(u) {
                let to = network.edge(edge_id).target();
                if prev[to] == usize::MAX && network.has_capacity(edge_id) {
                    prev[to] = edge_id;
                    queue.push_back(to);
                }
            }
        }
        if prev[t] == usize::MAX {
            break;
        }

        let mut path = Vec::new();
        let mut v = t;
        while v != s {
            path.push(prev[v]);
            v = network.edge(prev[v]).source();
        }
        let delta = path.iter().map(|&edge_id| network.edge(edge_id).residual_capacity()).fold(f64::INFINITY, f64::min);
        for edge_id in path {
            network.push(edge_id, delta);
        }
        flow += delta;
    }

    network.set_maximum_flow_value(flow);
    flow
}

fn main() {
    env_logger::init();

    let mut graph = Graph::new_undirected();
    graph.add_nodes(4);

    let edges = vec![
        graph.add_edge(0, 1, 2.0).unwrap(),
        graph.add_edge(0, 2, 1.5).unwrap(),
        graph.add_edge(1, 2, 1.0).unwrap(),
        graph.add_edge(1, 3, 1.0).unwrap(),
        graph.add_edge(2, 3, 2.5).unwrap(),
    ];

    let mut network: ResidualNetwork<_, f64> = ResidualNetwork::with_default_epsilon(&graph);
    network.init();
    let value = edmonds_karp(&mut network, 0, 3);

    println!("maximum flow:{}", value);
    for edge_id in edges {
        let edge = graph.get_edge(edge_id).unwrap();
        match (network.flow_on(edge_id), network.flow_direction(edge_id)) {
            (Ok(flow), Ok(to)) if flow > network.epsilon() => {
                let from = if to == edge.to { edge.from } else { edge.to };
                println!("{} -> {}: {} / {}", from, to, flow, graph.edge_weight(edge_id));
            }
            (Ok(_), Ok(_)) => println!("{} -- {}: unused", edge.from, edge.to),
            (Err(e), _) | (_, Err(e)) => println!("{:?}: {}", edge, e),
        }
    }
}
