//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! Callers route through the [`Router`] trait so alternative searches (A*,
//! bidirectional Dijkstra) can be swapped in.  [`shortest_route`] is the
//! name-based entry point used by the CLI.
//!
//! # Tie-breaking
//!
//! Among equal-cost frontier entries the lower `NodeId` is settled first.
//! This makes results reproducible for a given insertion order, but it is
//! not a canonical choice between equal-length paths.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use cr_core::{EdgeId, NodeId};

use crate::network::GeoGraph;
use crate::{SpatialError, SpatialResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a successful routing query.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Nodes from source to destination, both inclusive.
    pub nodes: Vec<NodeId>,
    /// Arcs traversed in order; `arcs.len() == nodes.len() - 1`.
    pub arcs: Vec<EdgeId>,
    /// Sum of traversed edge weights in kilometres.
    pub total_km: f64,
}

/// One hop of a [`Route`], resolved against its graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg<'g> {
    pub from: &'g str,
    pub to: &'g str,
    pub km: f64,
}

impl Route {
    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.arcs.is_empty()
    }

    pub fn hop_count(&self) -> usize {
        self.arcs.len()
    }

    /// City names along the route.
    pub fn names<'g>(&self, graph: &'g GeoGraph) -> Vec<&'g str> {
        self.nodes.iter().map(|&n| graph.node_name(n)).collect()
    }

    /// Per-hop breakdown.
    pub fn legs<'g>(&self, graph: &'g GeoGraph) -> Vec<Leg<'g>> {
        self.arcs
            .iter()
            .map(|a| Leg {
                from: graph.node_name(graph.arc_from[a.index()]),
                to:   graph.node_name(graph.arc_to[a.index()]),
                km:   graph.arc_km[a.index()],
            })
            .collect()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
///
/// Implementations must be `Send + Sync`; a built `GeoGraph` is immutable and
/// may be queried from several threads at once.
pub trait Router: Send + Sync {
    /// Compute the minimum-weight route from `from` to `to`.
    ///
    /// `from == to` yields a single-node route of 0 km.  Disconnected
    /// endpoints yield [`SpatialError::NoPathFound`]; ids outside the graph
    /// yield [`SpatialError::NodeNotFound`].
    fn route(&self, graph: &GeoGraph, from: NodeId, to: NodeId) -> SpatialResult<Route>;
}

/// Binary-heap Dijkstra over the CSR arcs, weighted in kilometres.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, graph: &GeoGraph, from: NodeId, to: NodeId) -> SpatialResult<Route> {
        dijkstra(graph, from, to)
    }
}

// ── Name-based entry points ───────────────────────────────────────────────────

/// Shortest route between two cities by name, using [`DijkstraRouter`].
///
/// Unknown names fail with [`SpatialError::InvalidInput`] before any search
/// runs.
pub fn shortest_route(graph: &GeoGraph, source: &str, target: &str) -> SpatialResult<Route> {
    shortest_route_with(&DijkstraRouter, graph, source, target)
}

/// Like [`shortest_route`] with a caller-supplied router.
pub fn shortest_route_with<R: Router + ?Sized>(
    router: &R,
    graph: &GeoGraph,
    source: &str,
    target: &str,
) -> SpatialResult<Route> {
    let from = resolve(graph, source)?;
    let to = resolve(graph, target)?;

    match router.route(graph, from, to) {
        Ok(route) => {
            debug!(from = source, to = target, hops = route.hop_count(), total_km = route.total_km, "route found");
            Ok(route)
        }
        Err(e) => {
            debug!(from = source, to = target, error = %e, "route failed");
            Err(e)
        }
    }
}

fn resolve(graph: &GeoGraph, name: &str) -> SpatialResult<NodeId> {
    graph
        .node_id(name)
        .ok_or_else(|| SpatialError::InvalidInput { name: name.to_owned() })
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Min-heap entry: ordering is reversed so `BinaryHeap` pops the lowest
/// cost first, then the lowest `NodeId`.
#[derive(Copy, Clone, PartialEq)]
struct Frontier {
    cost: f64,
    node: NodeId,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn dijkstra(graph: &GeoGraph, from: NodeId, to: NodeId) -> SpatialResult<Route> {
    for id in [from, to] {
        if !graph.contains(id) {
            return Err(SpatialError::NodeNotFound(id));
        }
    }
    if from == to {
        return Ok(Route { nodes: vec![from], arcs: vec![], total_km: 0.0 });
    }

    let n = graph.node_count();
    let mut dist     = vec![f64::INFINITY; n];
    let mut prev_arc = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(Frontier { cost: 0.0, node: from });

    while let Some(Frontier { cost, node }) = heap.pop() {
        if node == to {
            return Ok(reconstruct(graph, &prev_arc, from, to, cost));
        }

        // Stale entry.
        if cost > dist[node.index()] {
            continue;
        }

        for arc in graph.out_arcs(node) {
            let next = graph.arc_to[arc.index()];
            let new_cost = cost + graph.arc_km[arc.index()];
            if new_cost < dist[next.index()] {
                dist[next.index()] = new_cost;
                prev_arc[next.index()] = arc;
                heap.push(Frontier { cost: new_cost, node: next });
            }
        }
    }

    Err(SpatialError::NoPathFound {
        from: graph.node_name(from).to_owned(),
        to: graph.node_name(to).to_owned(),
    })
}

fn reconstruct(
    graph: &GeoGraph,
    prev_arc: &[EdgeId],
    from: NodeId,
    to: NodeId,
    total_km: f64,
) -> Route {
    let mut arcs = Vec::new();
    let mut nodes = vec![to];
    let mut cur = to;
    while cur != from {
        let a = prev_arc[cur.index()];
        arcs.push(a);
        cur = graph.arc_from[a.index()];
        nodes.push(cur);
    }
    arcs.reverse();
    nodes.reverse();
    Route { nodes, arcs, total_km }
}
