//! City graph representation and construction.
//!
//! # Data layout
//!
//! The graph is undirected, but each edge is stored as **two directed arcs**
//! in Compressed Sparse Row (CSR) order.  Arcs leaving node `n` occupy:
//!
//! ```text
//! arc_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Arcs are sorted by `(from, to)`, so neighbor iteration is a contiguous
//! scan in ascending `NodeId` order.
//!
//! # Construction policy
//!
//! [`build_graph`] joins every unordered pair of points whose geodesic
//! distance is strictly below `GraphConfig::threshold_km`.  The scan is
//! O(n²); the shipped dataset has tens of nodes, so no spatial pruning is
//! applied.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the nearest `NodeId`.

use std::collections::{HashMap, HashSet, VecDeque};

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use tracing::{debug, trace};

use cr_core::{EdgeId, GeoPoint, GraphConfig, NodeId, PointSet};

use crate::{SpatialError, SpatialResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [lat, lon]
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lon space.  Java sits within 9° of
    /// the equator, where a degree of longitude is within 1.5 % of a degree
    /// of latitude.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── GeoGraph ──────────────────────────────────────────────────────────────────

/// Immutable undirected city graph weighted in kilometres.
///
/// Do not construct directly; use [`build_graph`] or [`GeoGraphBuilder`].
pub struct GeoGraph {
    // ── Node data (indexed by NodeId) ─────────────────────────────────────
    node_name: Vec<String>,
    pub node_pos: Vec<GeoPoint>,
    by_name: HashMap<String, NodeId>,

    // ── CSR arc adjacency ─────────────────────────────────────────────────
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,
    pub arc_from: Vec<NodeId>,
    pub arc_to: Vec<NodeId>,
    /// Geodesic length of each arc in kilometres.
    pub arc_km: Vec<f64>,

    spatial_idx: RTree<NodeEntry>,
}

impl GeoGraph {
    /// A graph with no nodes.  Every route query against it fails with
    /// [`SpatialError::InvalidInput`].
    pub fn empty() -> Self {
        GeoGraphBuilder::new().build()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.arc_to.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// # Panics
    /// Panics if `id` is out of range.
    pub fn node_name(&self, id: NodeId) -> &str {
        &self.node_name[id.index()]
    }

    /// # Panics
    /// Panics if `id` is out of range.
    pub fn node_pos(&self, id: NodeId) -> GeoPoint {
        self.node_pos[id.index()]
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.node_count()
    }

    /// All node ids in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.node_count()).map(|i| NodeId(i as u32))
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Iterator over the arcs leaving `node`.  A contiguous index range.
    #[inline]
    pub fn out_arcs(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// `(neighbor, km)` pairs in ascending neighbor order.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.out_arcs(node)
            .map(|a| (self.arc_to[a.index()], self.arc_km[a.index()]))
    }

    #[inline]
    pub fn degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// Weight of the edge between `a` and `b`, if one exists.
    pub fn edge_weight(&self, a: NodeId, b: NodeId) -> Option<f64> {
        if !self.contains(a) || !self.contains(b) {
            return None;
        }
        let start = self.node_out_start[a.index()] as usize;
        let end   = self.node_out_start[a.index() + 1] as usize;
        let slice = &self.arc_to[start..end];
        slice
            .binary_search(&b)
            .ok()
            .map(|i| self.arc_km[start + i])
    }

    /// Every undirected edge exactly once, as `(a, b, km)` with `a < b`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, f64)> + '_ {
        (0..self.arc_to.len())
            .filter(|&i| self.arc_from[i] < self.arc_to[i])
            .map(|i| (self.arc_from[i], self.arc_to[i], self.arc_km[i]))
    }

    /// Maximal sets of mutually reachable nodes.  Each component is sorted
    /// and components are ordered by their smallest `NodeId`.
    pub fn connected_components(&self) -> Vec<Vec<NodeId>> {
        let n = self.node_count();
        let mut seen = vec![false; n];
        let mut components = Vec::new();
        let mut queue = VecDeque::new();

        for start in self.nodes() {
            if seen[start.index()] {
                continue;
            }
            seen[start.index()] = true;
            queue.push_back(start);
            let mut component = Vec::new();
            while let Some(node) = queue.pop_front() {
                component.push(node);
                for (next, _) in self.neighbors(node) {
                    if !seen[next.index()] {
                        seen[next.index()] = true;
                        queue.push_back(next);
                    }
                }
            }
            component.sort_unstable();
            components.push(component);
        }
        components
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The node closest to `pos`.  `None` only if the graph has no nodes.
    pub fn nearest_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
    }
}

// ── build_graph ───────────────────────────────────────────────────────────────

/// Build the threshold graph over `points`.
///
/// Node ids follow the set's insertion order.  An edge `(i, j)` exists iff
/// `distance(i, j) < config.threshold_km`; its weight is that distance.
/// Pure apart from `tracing` events.
pub fn build_graph(points: &PointSet, config: &GraphConfig) -> GeoGraph {
    let n = points.len();
    let mut b = GeoGraphBuilder::with_capacity(n, n * 4);

    // PointSet guarantees unique names, so the unchecked push is sound.
    let nodes: Vec<(NodeId, GeoPoint)> = points
        .iter()
        .map(|(name, pos)| (b.push_node(name.to_owned(), pos), pos))
        .collect();

    for i in 0..nodes.len() {
        let (a, pa) = nodes[i];
        for &(c, pc) in &nodes[i + 1..] {
            let km = pa.distance_km(pc, config.model);
            if km < config.threshold_km {
                trace!(a = %a, b = %c, km, "connect");
                b.push_edge(a, c, km);
            }
        }
    }

    let graph = b.build();
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        threshold_km = config.threshold_km,
        model = %config.model,
        "built geo graph"
    );
    graph
}

// ── GeoGraphBuilder ───────────────────────────────────────────────────────────

/// Construct a [`GeoGraph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use cr_core::GeoPoint;
/// use cr_spatial::GeoGraphBuilder;
///
/// let mut b = GeoGraphBuilder::new();
/// let a = b.add_node("Kudus", GeoPoint::new(-6.8048, 110.8407)).unwrap();
/// let c = b.add_node("Pati", GeoPoint::new(-6.7533, 111.0371)).unwrap();
/// b.add_edge(a, c, 22.4).unwrap();
/// let g = b.build();
/// assert_eq!(g.node_count(), 2);
/// assert_eq!(g.edge_count(), 1);
/// ```
pub struct GeoGraphBuilder {
    nodes:     Vec<(String, GeoPoint)>,
    by_name:   HashMap<String, NodeId>,
    raw_edges: Vec<RawEdge>,
    edge_keys: HashSet<(NodeId, NodeId)>,
}

struct RawEdge {
    a:  NodeId,
    b:  NodeId,
    km: f64,
}

impl GeoGraphBuilder {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:     Vec::with_capacity(nodes),
            by_name:   HashMap::with_capacity(nodes),
            raw_edges: Vec::with_capacity(edges),
            edge_keys: HashSet::with_capacity(edges),
        }
    }

    /// Add a named node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, name: impl Into<String>, pos: GeoPoint) -> SpatialResult<NodeId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(SpatialError::DuplicateNode(name));
        }
        Ok(self.push_node(name, pos))
    }

    /// Add an undirected edge of `km` kilometres between `a` and `b`.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, km: f64) -> SpatialResult<()> {
        for id in [a, b] {
            if id.index() >= self.nodes.len() {
                return Err(SpatialError::NodeNotFound(id));
            }
        }
        if a == b {
            return Err(SpatialError::SelfLoop(a));
        }
        if !km.is_finite() || km < 0.0 {
            return Err(SpatialError::NegativeWeight { a, b, km });
        }
        if self.edge_keys.contains(&edge_key(a, b)) {
            return Err(SpatialError::DuplicateEdge { a, b });
        }
        self.push_edge(a, b, km);
        Ok(())
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    fn push_node(&mut self, name: String, pos: GeoPoint) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.by_name.insert(name.clone(), id);
        self.nodes.push((name, pos));
        id
    }

    fn push_edge(&mut self, a: NodeId, b: NodeId, km: f64) {
        self.edge_keys.insert(edge_key(a, b));
        self.raw_edges.push(RawEdge { a, b, km });
    }

    /// Consume the builder and produce a [`GeoGraph`].
    ///
    /// O(E log E) for the arc sort plus O(N log N) for the R-tree bulk load.
    pub fn build(self) -> GeoGraph {
        let node_count = self.nodes.len();

        // Expand each undirected edge into two arcs, sorted for CSR.
        let mut arcs: Vec<(NodeId, NodeId, f64)> = Vec::with_capacity(self.raw_edges.len() * 2);
        for e in &self.raw_edges {
            arcs.push((e.a, e.b, e.km));
            arcs.push((e.b, e.a, e.km));
        }
        arcs.sort_unstable_by_key(|&(from, to, _)| (from, to));

        let arc_from: Vec<NodeId> = arcs.iter().map(|a| a.0).collect();
        let arc_to:   Vec<NodeId> = arcs.iter().map(|a| a.1).collect();
        let arc_km:   Vec<f64>    = arcs.iter().map(|a| a.2).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for &(from, _, _) in &arcs {
            node_out_start[from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, arcs.len());

        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, (_, pos))| NodeEntry {
                point: [pos.lat, pos.lon],
                id: NodeId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        let (node_name, node_pos) = self.nodes.into_iter().unzip();

        GeoGraph {
            node_name,
            node_pos,
            by_name: self.by_name,
            node_out_start,
            arc_from,
            arc_to,
            arc_km,
            spatial_idx,
        }
    }
}

impl Default for GeoGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn edge_key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a < b { (a, b) } else { (b, a) }
}
