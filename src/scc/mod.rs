//! Strongly-connected-component engines: a single-threaded reference
//! (`serial`) and a data-parallel driver (`parallel`) built over the same
//! [`crate::graph::Graph`]/[`crate::active::ActiveMask`]/[`crate::traversal`]
//! primitives.
//!
//! Both engines return the same shape: a `Vec` of SCCs, each a `Vec` of the
//! vertex ids it contains, in no particular order. [`canonicalize`] imposes
//! a deterministic order so the two engines' output can be compared
//! directly in tests and in the cross-check mode of the CLI.

pub mod parallel;
pub mod serial;

use crate::graph::VertexId;

/// Sort vertices within each component and sort components by their
/// smallest member, so that two partitions of the same vertex set compare
/// equal with plain `==` regardless of discovery order.
pub fn canonicalize(mut sccs: Vec<Vec<VertexId>>) -> Vec<Vec<VertexId>> {
    for scc in &mut sccs {
        scc.sort_unstable();
    }
    sccs.sort_by_key(|scc| scc[0]);
    sccs
}

/// Converts an engine's partition into the `scc_id`/`k` output pair: a
/// length-`n` array where `scc_id[v]` is the minimum vertex id in `v`'s
/// component, plus the distinct-value count `k`.
///
/// Both engines discover each component with its minimum member already
/// acting as the color root (trim assigns `v` itself; the coloring phase's
/// fixed point assigns the color-class root, which is that minimum by
/// construction), so this is a relabeling, not a search: the smallest id
/// already present in each component is its `scc_id`.
///
/// # Panics
/// Panics if `sccs` is not a partition of `0..n` (a vertex id `>= n`, or a
/// vertex missing or duplicated across components) — that would mean one of
/// the engines violated its own output contract.
pub fn to_scc_id(sccs: &[Vec<VertexId>], n: usize) -> (Vec<VertexId>, usize) {
    let mut scc_id = vec![VertexId::MAX; n];
    for scc in sccs {
        let rep = *scc.iter().min().expect("SCC must be non-empty");
        for &v in scc {
            assert!(v < n, "vertex {} out of range for n={}", v, n);
            assert_eq!(scc_id[v], VertexId::MAX, "vertex {} appears in more than one SCC", v);
            scc_id[v] = rep;
        }
    }
    assert!(scc_id.iter().all(|&id| id != VertexId::MAX), "not every vertex was assigned an SCC");

    let mut distinct: Vec<VertexId> = scc_id.clone();
    distinct.sort_unstable();
    distinct.dedup();
    (scc_id, distinct.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_orders_components_and_members() {
        let input = vec![vec![2, 0], vec![1]];
        assert_eq!(canonicalize(input), vec![vec![1], vec![0, 2]]);
    }

    #[test]
    fn test_to_scc_id_labels_by_component_minimum() {
        // matches worked example #3 from the spec's scenario table
        let sccs = vec![vec![0, 1], vec![2, 3]];
        let (scc_id, k) = to_scc_id(&sccs, 4);
        assert_eq!(scc_id, vec![0, 0, 2, 2]);
        assert_eq!(k, 2);
    }

    #[test]
    fn test_to_scc_id_all_singletons() {
        let sccs = vec![vec![0], vec![1], vec![2]];
        let (scc_id, k) = to_scc_id(&sccs, 3);
        assert_eq!(scc_id, vec![0, 1, 2]);
        assert_eq!(k, 3);
    }

    #[test]
    fn test_to_scc_id_empty_graph() {
        let (scc_id, k) = to_scc_id(&[], 0);
        assert!(scc_id.is_empty());
        assert_eq!(k, 0);
    }

    #[test]
    #[should_panic(expected = "appears in more than one SCC")]
    fn test_to_scc_id_rejects_overlap() {
        to_scc_id(&[vec![0, 1], vec![1]], 2);
    }

    #[test]
    #[should_panic(expected = "not every vertex was assigned")]
    fn test_to_scc_id_rejects_missing_vertex() {
        to_scc_id(&[vec![0]], 2);
    }
}
