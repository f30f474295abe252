//! Traversal primitives over a [`Graph`] filtered by an [`ActiveMask`]:
//! neighbor/predecessor enumeration and a property-filtered reverse BFS.
//!
//! Grounded in `get_neighbours`/`get_predecessors`/`bfs` of the original
//! (`original_source/src/graph/graph.c`), but re-expressed so that neighbor
//! enumeration borrows the graph's own storage instead of allocating and
//! handing back a freshly `malloc`'d array per call — this also eliminates
//! a per-call malloc/free pair the original paid on every traversal step.

use crate::active::ActiveMask;
use crate::graph::{Graph, VertexId};

/// Outgoing neighbors of `v` that are currently active.
///
/// Self-loops are yielded like any other edge; the only thing that makes the
/// sequence empty outright is `v` itself being inactive.
pub fn successors<'a>(
    v: VertexId,
    graph: &'a Graph,
    active: &'a ActiveMask,
) -> impl Iterator<Item = VertexId> + 'a {
    let edges: &'a [VertexId] = if active.is_active(v) { graph.out_edges(v) } else { &[] };
    edges.iter().copied().filter(move |&u| active.is_active(u))
}

/// Incoming neighbors of `v` that are currently active. Symmetric to
/// [`successors`], over the reverse index.
pub fn predecessors<'a>(
    v: VertexId,
    graph: &'a Graph,
    active: &'a ActiveMask,
) -> impl Iterator<Item = VertexId> + 'a {
    let edges: &'a [VertexId] = if active.is_active(v) { graph.in_edges(v) } else { &[] };
    edges.iter().copied().filter(move |&u| active.is_active(u))
}

/// True iff `v` cannot lie on any cycle in the active subgraph: it has no
/// active incoming edges, or no active outgoing edges. A vertex whose only
/// active edge is a self-loop counts as both an in- and an out-edge, so it
/// is *not* trivial by this rule.
pub fn is_trivial(v: VertexId, graph: &Graph, active: &ActiveMask) -> bool {
    if !active.is_active(v) {
        return true;
    }
    successors(v, graph, active).next().is_none() || predecessors(v, graph, active).next().is_none()
}

/// Reusable scratch space for [`reverse_bfs`], so repeated calls (one per
/// color root, potentially thousands per outer iteration) don't each
/// allocate a fresh visited bitmap and queue.
pub struct BfsScratch {
    visited: Vec<bool>,
    queue: Vec<VertexId>,
}

impl BfsScratch {
    pub fn new(n: usize) -> Self {
        BfsScratch { visited: vec![false; n], queue: Vec::with_capacity(n) }
    }

    fn reset(&mut self) {
        self.visited.iter_mut().for_each(|b| *b = false);
        self.queue.clear();
    }
}

/// Property-filtered reverse BFS.
///
/// Starting from `root`, expands only along incoming edges to vertices `u`
/// such that `active[u] && color[u] == target_color`. Returns every visited
/// vertex (including `root`) in FIFO discovery order.
///
/// If `root` is inactive or `color[root] != target_color`, the result is
/// empty — this is the contract the per-color peel phase relies on to skip
/// roots that were already consumed by trimming.
pub fn reverse_bfs(
    root: VertexId,
    graph: &Graph,
    active: &ActiveMask,
    color: &[VertexId],
    target_color: VertexId,
    scratch: &mut BfsScratch,
) -> Vec<VertexId> {
    scratch.reset();

    if !active.is_active(root) || color[root] != target_color {
        return Vec::new();
    }

    scratch.visited[root] = true;
    scratch.queue.push(root);

    let mut head = 0;
    while head < scratch.queue.len() {
        let v = scratch.queue[head];
        head += 1;

        for u in predecessors(v, graph, active) {
            if !scratch.visited[u] && color[u] == target_color {
                scratch.visited[u] = true;
                scratch.queue.push(u);
            }
        }
    }

    scratch.queue.clone()
}
