//! Dual compressed-sparse directed graph (CSR forward, CSC-style reverse).
//!
//! Built once from an edge stream and read-only thereafter. Grounded in
//! the original's `graph` struct
//! (`original_source/src/graph/graph.h`/`graph.c`), which stores a pattern
//! adjacency matrix as separate CSR (`csr_row_id`/`csr_col_id`) and CSC
//! (`csc_row_id`/`csc_col_id`) arrays built via a counting sort over the COO
//! edge list — re-expressed here with owned `Vec<usize>` buffers instead of
//! raw `malloc`'d arrays, and a counting sort instead of the original's
//! `qsort` (O(n + m) instead of O(m log m), no comparator indirection).

use crate::error::SccError;

/// Vertex identifier. An alias for `usize` rather than the original's
/// `uint32_t` `vert_t`: this crate indexes directly into `Vec`s with vertex
/// ids throughout, and a `usize` alias avoids a cast at every such site while
/// still documenting intent at call sites that matters.
pub type VertexId = usize;

/// A directed graph stored as dual compressed-sparse indices.
///
/// `fwd_off`/`fwd_dst` give O(deg) access to outgoing edges (row-major, CSR);
/// `rev_off`/`rev_src` give O(deg) access to incoming edges (column-major).
/// Both are built from the same multiset of edges; neither is ever mutated
/// after construction.
#[derive(Debug)]
pub struct Graph {
    n: usize,
    fwd_off: Vec<usize>,
    fwd_dst: Vec<VertexId>,
    rev_off: Vec<usize>,
    rev_src: Vec<VertexId>,
}

impl Graph {
    /// Builds a graph from `n` vertices and a stream of 1-based `(src, dst)`
    /// pairs (as read directly off a MatrixMarket file). Indices are
    /// converted to 0-based internally.
    ///
    /// Uses a two-pass counting sort: a first pass counts
    /// per-vertex degrees and prefix-sums them into offsets, a second pass
    /// scatters each edge into its slot using scratch cursors. No
    /// comparison sort is needed, and edges within a vertex's slice keep
    /// their input order.
    ///
    /// # Panics
    /// Panics if any 1-based index is `0` or greater than `n` — by this
    /// point in the pipeline that is a loader bug, not a user-facing error
    /// (the loader itself validates and reports out-of-range indices to the
    /// user before `Graph::from_edges_one_based` ever runs).
    pub fn from_edges_one_based(n: usize, edges: &[(u32, u32)]) -> Self {
        let zero_based: Vec<(VertexId, VertexId)> = edges
            .iter()
            .map(|&(src, dst)| {
                assert!(src >= 1 && (src as usize) <= n, "src {} out of range for n={}", src, n);
                assert!(dst >= 1 && (dst as usize) <= n, "dst {} out of range for n={}", dst, n);
                (src as usize - 1, dst as usize - 1)
            })
            .collect();
        Self::from_edges(n, &zero_based)
    }

    /// Builds a graph from `n` vertices and a stream of 0-based `(src, dst)`
    /// pairs. Duplicate edges and self-loops are preserved verbatim — no
    /// dedup is performed.
    ///
    /// # Panics
    /// Panics if any index is `>= n`.
    pub fn from_edges(n: usize, edges: &[(VertexId, VertexId)]) -> Self {
        let m = edges.len();

        let mut fwd_off = vec![0usize; n + 1];
        let mut rev_off = vec![0usize; n + 1];

        for &(src, dst) in edges {
            assert!(src < n, "src {} out of range for n={}", src, n);
            assert!(dst < n, "dst {} out of range for n={}", dst, n);
            fwd_off[src + 1] += 1;
            rev_off[dst + 1] += 1;
        }

        for i in 0..n {
            fwd_off[i + 1] += fwd_off[i];
            rev_off[i + 1] += rev_off[i];
        }
        debug_assert_eq!(fwd_off[n], m);
        debug_assert_eq!(rev_off[n], m);

        let mut fwd_cursor = fwd_off.clone();
        let mut rev_cursor = rev_off.clone();
        let mut fwd_dst = vec![0usize; m];
        let mut rev_src = vec![0usize; m];

        for &(src, dst) in edges {
            fwd_dst[fwd_cursor[src]] = dst;
            fwd_cursor[src] += 1;
            rev_src[rev_cursor[dst]] = src;
            rev_cursor[dst] += 1;
        }

        Graph { n, fwd_off, fwd_dst, rev_off, rev_src }
    }

    /// Convenience constructor chaining the MatrixMarket loader directly
    /// into graph construction.
    pub fn from_mtx_file(path: impl AsRef<std::path::Path>) -> Result<Self, SccError> {
        let (_header, n, edges) = crate::mtx::read_mtx(path)?;
        Ok(Self::from_edges_one_based(n, &edges))
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn m(&self) -> usize {
        self.fwd_dst.len()
    }

    /// Raw outgoing-edge slice for `v`, with no active-mask filtering.
    #[inline]
    pub fn out_edges(&self, v: VertexId) -> &[VertexId] {
        &self.fwd_dst[self.fwd_off[v]..self.fwd_off[v + 1]]
    }

    /// Raw incoming-edge slice for `v`, with no active-mask filtering.
    #[inline]
    pub fn in_edges(&self, v: VertexId) -> &[VertexId] {
        &self.rev_src[self.rev_off[v]..self.rev_off[v + 1]]
    }

    #[inline]
    pub fn out_degree(&self, v: VertexId) -> usize {
        self.fwd_off[v + 1] - self.fwd_off[v]
    }

    #[inline]
    pub fn in_degree(&self, v: VertexId) -> usize {
        self.rev_off[v + 1] - self.rev_off[v]
    }
}
