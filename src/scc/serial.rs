//! Single-threaded coloring SCC engine: trim, color, propagate, peel.
//!
//! Grounded in the sequential shape underlying `scc_pthreads.c`'s
//! `p_scc_coloring` driver (`original_source/src/scc_pthreads/scc_pthreads.c`):
//! repeat { trim trivial vertices to a fixpoint; color the remaining active
//! vertices and propagate forward to a fixpoint; for each surviving color,
//! recover its component with a backward BFS restricted to that color and
//! remove it } until no active vertices remain. This module runs that loop
//! with plain `Vec`s and no threads; [`crate::scc::parallel`] runs the same
//! four phases data-parallel.

use std::collections::HashSet;

use crate::active::ActiveMask;
use crate::graph::{Graph, VertexId};
use crate::traversal::{self, BfsScratch};

/// Computes the strongly connected components of `graph`.
///
/// Every vertex appears in exactly one returned component. A vertex with no
/// active self-loop and no other edges forms a singleton component on its
/// own.
pub fn compute_sccs(graph: &Graph) -> Vec<Vec<VertexId>> {
    let n = graph.n();
    let mut active = ActiveMask::all_active(n);
    let mut color = vec![0usize; n];
    let mut scratch = BfsScratch::new(n);
    let mut sccs: Vec<Vec<VertexId>> = Vec::new();

    while active.active_count() > 0 {
        trim(graph, &mut active, &mut sccs);

        if active.active_count() == 0 {
            break;
        }

        init_colors(&active, &mut color);
        propagate_colors(graph, &active, &mut color);

        for c in unique_colors(&active, &color) {
            let component = traversal::reverse_bfs(c, graph, &active, &color, c, &mut scratch);
            debug_assert!(!component.is_empty(), "color root must belong to its own component");
            for &v in &component {
                active.deactivate(v);
            }
            sccs.push(component);
        }
    }

    sccs
}

/// Repeatedly deactivates trivial vertices (`is_trivial`) until
/// none remain; each one is its own singleton component. Trimming a vertex
/// can make a former non-trivial neighbor trivial, hence the fixpoint loop
/// rather than a single pass.
fn trim(graph: &Graph, active: &mut ActiveMask, sccs: &mut Vec<Vec<VertexId>>) {
    loop {
        let mut trimmed_any = false;
        for v in 0..graph.n() {
            if active.is_active(v) && traversal::is_trivial(v, graph, active) {
                active.deactivate(v);
                sccs.push(vec![v]);
                trimmed_any = true;
            }
        }
        if !trimmed_any {
            break;
        }
    }
}

fn init_colors(active: &ActiveMask, color: &mut [VertexId]) {
    for v in 0..active.len() {
        if active.is_active(v) {
            color[v] = v;
        }
    }
}

/// Propagates colors to a fixpoint: `color[v] = min(color[v], color[u])`
/// for every active predecessor `u` of `v`. Each vertex only ever writes its
/// own slot (pulling from its predecessors rather than pushing to its
/// successors), which is what lets the parallel engine partition this phase
/// by vertex with no two workers ever writing the same slot. Monotone
/// (colors only shrink), so this always terminates.
fn propagate_colors(graph: &Graph, active: &ActiveMask, color: &mut [VertexId]) {
    loop {
        let mut changed = false;
        for v in 0..graph.n() {
            if !active.is_active(v) {
                continue;
            }
            for u in traversal::predecessors(v, graph, active) {
                if color[v] > color[u] {
                    color[v] = color[u];
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
}

/// Distinct color values among the still-active vertices, in ascending
/// order (ascending order is not required for correctness, only for
/// deterministic iteration in tests).
fn unique_colors(active: &ActiveMask, color: &[VertexId]) -> Vec<VertexId> {
    let set: HashSet<VertexId> = (0..active.len()).filter(|&v| active.is_active(v)).map(|v| color[v]).collect();
    let mut colors: Vec<VertexId> = set.into_iter().collect();
    colors.sort_unstable();
    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scc::canonicalize;

    #[test]
    fn test_triangle_is_one_component() {
        let g = Graph::from_edges(3, &[(0, 1), (1, 2), (2, 0)]);
        let sccs = canonicalize(compute_sccs(&g));
        assert_eq!(sccs, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_empty_graph_has_no_components() {
        let g = Graph::from_edges(0, &[]);
        assert!(compute_sccs(&g).is_empty());
    }

    #[test]
    fn test_isolated_vertices_are_singletons() {
        let g = Graph::from_edges(3, &[]);
        let sccs = canonicalize(compute_sccs(&g));
        assert_eq!(sccs, vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn test_self_loop_is_its_own_component() {
        let g = Graph::from_edges(1, &[(0, 0)]);
        let sccs = canonicalize(compute_sccs(&g));
        assert_eq!(sccs, vec![vec![0]]);
    }

    #[test]
    fn test_two_cycles_joined_by_bridge() {
        // 0<->1 is one cycle, 2<->3 is another, a single one-way edge 1->2
        // joins them without merging the components.
        let g = Graph::from_edges(4, &[(0, 1), (1, 0), (1, 2), (2, 3), (3, 2)]);
        let sccs = canonicalize(compute_sccs(&g));
        assert_eq!(sccs, vec![vec![0, 1], vec![2, 3]]);
    }

    #[test]
    fn test_chain_with_cycle_tail() {
        // 0 -> 1 -> 2 -> 3 -> 1: vertex 0 is trivial, {1,2,3} form a cycle.
        let g = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 1)]);
        let sccs = canonicalize(compute_sccs(&g));
        assert_eq!(sccs, vec![vec![0], vec![1, 2, 3]]);
    }

    #[test]
    fn test_two_triangles_connected() {
        let g = Graph::from_edges(
            6,
            &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (2, 3)],
        );
        let sccs = canonicalize(compute_sccs(&g));
        assert_eq!(sccs, vec![vec![0, 1, 2], vec![3, 4, 5]]);
    }

    #[test]
    fn test_every_vertex_covered_exactly_once() {
        let g = Graph::from_edges(
            6,
            &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (2, 3)],
        );
        let sccs = compute_sccs(&g);
        let mut seen: Vec<VertexId> = sccs.into_iter().flatten().collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..6).collect::<Vec<_>>());
    }
}
