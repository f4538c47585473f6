use crate::maximum_flow::epsilon::EpsilonComparator;
use crate::maximum_flow::error::FlowError;
use crate::maximum_flow::extension::{Extension, ExtensionPool};
use crate::maximum_flow::graph::FlowGraph;
use crate::maximum_flow::status::Status;
use num_traits::Float;
use std::cell::OnceCell;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::fmt::Debug;

#[derive(Debug)]
pub struct VertexRecord<V, Flow, X> {
    prototype: Option<V>,
    pub excess: Flow,
    outgoing: Vec<usize>,
    pub ext: X,
}

impl<V, Flow, X> VertexRecord<V, Flow, X>
where
    V: Copy,
    Flow: Float,
{
    fn new(ext: X) -> Self {
        Self { prototype: None, excess: Flow::zero(), outgoing: Vec::new(), ext }
    }

    // ids of the residual edges leaving this vertex
    #[inline]
    pub fn outgoing(&self) -> &[usize] {
        &self.outgoing
    }
}

impl<V: Copy, Flow, X> Extension for VertexRecord<V, Flow, X> {
    type Prototype = V;

    fn prototype(&self) -> Option<V> {
        self.prototype
    }
}

/// One direction of a capacity pair in the residual network.
#[derive(Debug)]
pub struct ResidualEdge<E, Flow, X> {
    source: usize,
    target: usize,
    inverse: usize,
    prototype: Option<E>,
    // upper bound on the flow in this direction, see `has_capacity`
    capacity: Flow,
    flow: Flow,
    pub ext: X,
}

impl<E, Flow, X> ResidualEdge<E, Flow, X>
where
    E: Copy,
    Flow: Float,
{
    fn new(ext: X) -> Self {
        Self { source: usize::MAX, target: usize::MAX, inverse: usize::MAX, prototype: None, capacity: Flow::zero(), flow: Flow::zero(), ext }
    }

    #[inline]
    pub fn source(&self) -> usize {
        self.source
    }

    #[inline]
    pub fn target(&self) -> usize {
        self.target
    }

    #[inline]
    pub fn inverse(&self) -> usize {
        self.inverse
    }

    #[inline]
    pub fn capacity(&self) -> Flow {
        self.capacity
    }

    #[inline]
    pub fn flow(&self) -> Flow {
        self.flow
    }

    #[inline]
    pub fn residual_capacity(&self) -> Flow {
        self.capacity - self.flow
    }
}

impl<E: Copy, Flow, X> Extension for ResidualEdge<E, Flow, X> {
    type Prototype = E;

    fn prototype(&self) -> Option<E> {
        self.prototype
    }
}

/// Where the partner of a forward residual edge comes from in a directed graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BackwardOrigin<E> {
    // an anti-parallel edge of the input graph; appended when its own source is visited
    Reused(E),
    // no counterpart in the input graph; appended right away
    Synthetic,
}

type VertexPool<G, Flow, VX> = ExtensionPool<VertexRecord<<G as FlowGraph<Flow>>::Vertex, Flow, VX>>;
type EdgePool<G, Flow, EX> = ExtensionPool<ResidualEdge<<G as FlowGraph<Flow>>::Edge, Flow, EX>>;

/// Residual flow network over an input graph.
///
/// Vertex and edge records are addressed by record id. Algorithms attach their own state through
/// the `VX` and `EX` payloads, and change flow only through [`ResidualNetwork::push`].
pub struct ResidualNetwork<'g, G, Flow, VX = (), EX = ()>
where
    G: FlowGraph<Flow>,
{
    graph: &'g G,
    directed: bool,
    comparator: EpsilonComparator<Flow>,
    status: Status,
    vertices: VertexPool<G, Flow, VX>,
    edges: EdgePool<G, Flow, EX>,
    maximum_flow_value: Flow,
    maximum_flow_set: bool,
    pub(crate) composed: OnceCell<HashMap<G::Edge, Flow>>,
}

impl<'g, G, Flow, VX, EX> ResidualNetwork<'g, G, Flow, VX, EX>
where
    G: FlowGraph<Flow>,
    Flow: Float + Debug,
{
    pub fn new(graph: &'g G, epsilon: Flow) -> Result<Self, FlowError> {
        Ok(Self::with_comparator(graph, EpsilonComparator::new(epsilon)?))
    }

    pub fn with_default_epsilon(graph: &'g G) -> Self {
        Self::with_comparator(graph, EpsilonComparator::default())
    }

    fn with_comparator(graph: &'g G, comparator: EpsilonComparator<Flow>) -> Self {
        Self {
            graph,
            directed: graph.is_directed(),
            comparator,
            status: Status::Uninitialized,
            // replaced with the caller's factories by init
            vertices: ExtensionPool::new(|| unreachable!("vertex pool used before init")),
            edges: ExtensionPool::new(|| unreachable!("edge pool used before init")),
            maximum_flow_value: -Flow::one(),
            maximum_flow_set: false,
            composed: OnceCell::new(),
        }
    }

    /// Builds the residual network, creating the per-vertex and per-edge payloads with the
    /// given factories. Any state from a previous run is discarded.
    pub fn init_with<FV, FE>(&mut self, vertex_factory: FV, edge_factory: FE)
    where
        FV: Fn() -> VX + 'static,
        FE: Fn() -> EX + 'static,
    {
        self.vertices = ExtensionPool::new(move || VertexRecord::new(vertex_factory()));
        self.edges = ExtensionPool::new(move || ResidualEdge::new(edge_factory()));

        if self.directed {
            self.build_directed();
        } else {
            self.build_undirected();
        }

        self.maximum_flow_value = Flow::zero();
        self.maximum_flow_set = false;
        self.composed = OnceCell::new();
        self.status = Status::Built;

        log::debug!(
            "built {} residual network: {} vertex records, {} residual edges",
            if self.directed { "directed" } else { "undirected" },
            self.vertices.len(),
            self.edges.len()
        );
    }

    pub fn init(&mut self)
    where
        VX: Default,
        EX: Default,
    {
        self.init_with(|| VX::default(), || EX::default());
    }

    fn vertex_record(&mut self, v: G::Vertex) -> usize {
        let id = self.vertices.get(self.graph.vertex_index(v));
        self.vertices.record_mut(id).prototype = Some(v);
        id
    }

    fn build_directed(&mut self) {
        let graph = self.graph;
        for u in graph.vertices() {
            let ux = self.vertex_record(u);

            for e in graph.outgoing_edges(u) {
                // already paired as the reused partner of an anti-parallel edge
                if let Some(forward) = self.edges.find(graph.edge_index(e)) {
                    self.vertices.record_mut(ux).outgoing.push(forward);
                    continue;
                }

                let v = graph.edge_target(e);
                let vx = self.vertex_record(v);

                let origin = match graph.find_edge(v, u) {
                    Some(r) if r != e && self.edges.find(graph.edge_index(r)).is_none() => BackwardOrigin::Reused(r),
                    _ => BackwardOrigin::Synthetic,
                };

                let forward = self.create_edge(ux, vx, e, graph.edge_weight(e));
                let backward = match origin {
                    BackwardOrigin::Reused(r) => self.create_edge(vx, ux, r, graph.edge_weight(r)),
                    BackwardOrigin::Synthetic => self.create_synthetic_edge(vx, ux, Flow::zero()),
                };
                self.link(forward, backward);

                self.vertices.record_mut(ux).outgoing.push(forward);
                if origin == BackwardOrigin::Synthetic {
                    self.vertices.record_mut(vx).outgoing.push(backward);
                }
            }
        }
    }

    fn build_undirected(&mut self) {
        let graph = self.graph;
        for v in graph.vertices() {
            self.vertex_record(v);
        }

        for e in graph.edges() {
            let ux = self.vertex_record(graph.edge_source(e));
            let vx = self.vertex_record(graph.edge_target(e));
            let weight = graph.edge_weight(e);

            let forward = self.create_edge(ux, vx, e, weight);
            let backward = self.create_synthetic_edge(vx, ux, weight);
            self.link(forward, backward);

            self.vertices.record_mut(ux).outgoing.push(forward);
            self.vertices.record_mut(vx).outgoing.push(backward);
        }
    }

    fn create_edge(&mut self, source: usize, target: usize, e: G::Edge, capacity: Flow) -> usize {
        let id = self.edges.get(self.graph.edge_index(e));
        let edge = self.edges.record_mut(id);
        edge.source = source;
        edge.target = target;
        edge.prototype = Some(e);
        edge.capacity = capacity;
        id
    }

    fn create_synthetic_edge(&mut self, source: usize, target: usize, capacity: Flow) -> usize {
        let id = self.edges.create_detached();
        let edge = self.edges.record_mut(id);
        edge.source = source;
        edge.target = target;
        edge.capacity = capacity;
        id
    }

    fn link(&mut self, forward: usize, backward: usize) {
        self.edges.record_mut(forward).inverse = backward;
        self.edges.record_mut(backward).inverse = forward;
    }

    /// Increases the flow in the direction of `edge_id` by `amount`.
    ///
    /// Flow already going the opposite way is cancelled first: with `f2` the flow on the inverse
    /// edge, if `amount > f2` the inverse flow drops to zero and this edge carries `amount - f2`,
    /// otherwise the inverse flow drops to `f2 - amount` and this edge's flow is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if the flow is positive in both directions, which means the caller broke the
    /// network's consistency.
    pub fn push(&mut self, edge_id: usize, amount: Flow) {
        debug_assert!(self.status != Status::Uninitialized);
        debug_assert!(self.comparator.compare(amount, Flow::zero()) != Ordering::Less);

        let inverse_id = self.edges.record(edge_id).inverse;
        let flow = self.edges.record(edge_id).flow;
        let opposite = self.edges.record(inverse_id).flow;

        assert!(
            !(self.comparator.is_positive(flow) && self.comparator.is_positive(opposite)),
            "flow is positive in both directions of residual edge {}",
            self.display_edge(edge_id)
        );

        if self.comparator.compare(opposite, amount) == Ordering::Less {
            let difference = amount - opposite;

            let edge = self.edges.record_mut(edge_id);
            edge.flow = edge.flow + difference;
            edge.capacity = edge.capacity - opposite;

            let inverse = self.edges.record_mut(inverse_id);
            inverse.flow = Flow::zero();
            inverse.capacity = inverse.capacity + difference;

            log::trace!("push {:?} through {}: cancelled opposite flow {:?}", amount, edge_id, opposite);
        } else {
            let edge = self.edges.record_mut(edge_id);
            edge.capacity = edge.capacity - amount;

            let inverse = self.edges.record_mut(inverse_id);
            inverse.flow = inverse.flow - amount;

            log::trace!("push {:?} through {}: reduced opposite flow only", amount, edge_id);
        }

        self.composed.take();
    }

    /// Whether more flow can be pushed along `edge_id`.
    #[inline]
    pub fn has_capacity(&self, edge_id: usize) -> bool {
        let edge = self.edges.record(edge_id);
        self.comparator.compare(edge.capacity, edge.flow) == Ordering::Greater
    }

    #[inline]
    pub fn graph(&self) -> &'g G {
        self.graph
    }

    #[inline]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    #[inline]
    pub fn epsilon(&self) -> Flow {
        self.comparator.epsilon()
    }

    #[inline]
    pub fn comparator(&self) -> &EpsilonComparator<Flow> {
        &self.comparator
    }

    /// `Finalized` once the maximum flow value is set and the flow has been composed.
    pub fn status(&self) -> Status {
        if self.status == Status::Built && self.maximum_flow_set && self.composed.get().is_some() {
            return Status::Finalized;
        }
        self.status
    }

    #[inline]
    pub fn num_vertex_records(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn num_residual_edges(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn vertex(&self, id: usize) -> &VertexRecord<G::Vertex, Flow, VX> {
        self.vertices.record(id)
    }

    #[inline]
    pub fn vertex_mut(&mut self, id: usize) -> &mut VertexRecord<G::Vertex, Flow, VX> {
        self.vertices.record_mut(id)
    }

    #[inline]
    pub fn edge(&self, id: usize) -> &ResidualEdge<G::Edge, Flow, EX> {
        self.edges.record(id)
    }

    #[inline]
    pub fn edge_ext_mut(&mut self, id: usize) -> &mut EX {
        &mut self.edges.record_mut(id).ext
    }

    #[inline]
    pub fn outgoing(&self, vertex_id: usize) -> &[usize] {
        self.vertices.record(vertex_id).outgoing()
    }

    pub fn vertex_id_of(&self, v: G::Vertex) -> Option<usize> {
        self.vertices.find(self.graph.vertex_index(v))
    }

    pub fn edge_id_of(&self, e: G::Edge) -> Option<usize> {
        if !self.graph.contains_edge(e) {
            return None;
        }
        self.edges.find(self.graph.edge_index(e))
    }

    pub fn maximum_flow_value(&self) -> Flow {
        self.maximum_flow_value
    }

    pub fn set_maximum_flow_value(&mut self, value: Flow) {
        debug_assert!(self.status != Status::Uninitialized);
        self.maximum_flow_value = value;
        self.maximum_flow_set = true;
        log::debug!("maximum flow value set to {:?}", value);
    }

    pub fn display_edge(&self, id: usize) -> EdgeDisplay<'_, 'g, G, Flow, VX, EX> {
        EdgeDisplay { network: self, id }
    }
}

/// Prints a residual edge as `(source,target,c:capacity f:flow)`.
pub struct EdgeDisplay<'a, 'g, G, Flow, VX, EX>
where
    G: FlowGraph<Flow>,
{
    network: &'a ResidualNetwork<'g, G, Flow, VX, EX>,
    id: usize,
}

impl<G, Flow, VX, EX> fmt::Display for EdgeDisplay<'_, '_, G, Flow, VX, EX>
where
    G: FlowGraph<Flow>,
    Flow: Float + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edge = self.network.edge(self.id);
        let endpoint = |id: usize| match self.network.vertex(id).prototype() {
            Some(v) => format!("{:?}", v),
            None => "null".to_string(),
        };
        write!(f, "({},{},c:{:?} f:{:?})", endpoint(edge.source), endpoint(edge.target), edge.capacity, edge.flow)
    }
}
