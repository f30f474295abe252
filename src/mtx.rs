//! MatrixMarket coordinate-format reader.
//!
//! Parses the subset of the MatrixMarket 1.0 format this crate cares about:
//! `coordinate` matrices of field `pattern`, `integer` or `real`, symmetry
//! `general`. Values (for `integer`/`real`) are parsed for validation and
//! then discarded — the crate only ever sees the 0/1 structural pattern of
//! the matrix.
//!
//! This mirrors the banner/size/entry reading that the original `mmio`-based
//! C loader performs (`import_graph` in `graph.c`), but returns a `Result`
//! instead of printing to stderr and calling `exit`/returning `NULL`.

use std::fs;
use std::path::Path;

use crate::error::SccError;

/// Declared field type of a MatrixMarket coordinate matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MtxField {
    Pattern,
    Integer,
    Real,
}

/// Parsed banner line.
#[derive(Debug, Clone, Copy)]
pub struct MtxHeader {
    pub field: MtxField,
}

fn fmt_err(message: impl Into<String>, line: usize) -> SccError {
    SccError::Format { message: message.into(), line: Some(line) }
}

/// Parse the `%%MatrixMarket matrix coordinate <field> general` banner.
fn parse_banner(line: &str, line_no: usize) -> Result<MtxHeader, SccError> {
    let mut tokens = line.split_whitespace();

    let tag = tokens.next().unwrap_or("");
    if tag != "%%MatrixMarket" {
        return Err(fmt_err("missing %%MatrixMarket banner", line_no));
    }

    let object = tokens.next().unwrap_or("");
    if object != "matrix" {
        return Err(fmt_err(format!("unsupported object type '{}'", object), line_no));
    }

    let format = tokens.next().unwrap_or("");
    if format != "coordinate" {
        return Err(fmt_err(
            format!("unsupported format '{}': only coordinate is supported", format),
            line_no,
        ));
    }

    let field = match tokens.next().unwrap_or("") {
        "pattern" => MtxField::Pattern,
        "integer" => MtxField::Integer,
        "real" => MtxField::Real,
        other => {
            return Err(fmt_err(format!("unsupported field '{}'", other), line_no));
        }
    };

    let symmetry = tokens.next().unwrap_or("");
    if symmetry != "general" {
        return Err(fmt_err(
            format!("unsupported symmetry '{}': only general is supported", symmetry),
            line_no,
        ));
    }

    Ok(MtxHeader { field })
}

/// Parse the size line: `n_rows n_cols n_nz`.
fn parse_size(line: &str, line_no: usize) -> Result<(usize, usize, usize), SccError> {
    let mut tokens = line.split_whitespace();
    let n_rows: usize = tokens
        .next()
        .ok_or_else(|| fmt_err("missing size line", line_no))?
        .parse()
        .map_err(|_| fmt_err("non-numeric row count", line_no))?;
    let n_cols: usize = tokens
        .next()
        .ok_or_else(|| fmt_err("missing column count", line_no))?
        .parse()
        .map_err(|_| fmt_err("non-numeric column count", line_no))?;
    let n_nz: usize = tokens
        .next()
        .ok_or_else(|| fmt_err("missing nonzero count", line_no))?
        .parse()
        .map_err(|_| fmt_err("non-numeric nonzero count", line_no))?;

    if n_rows != n_cols {
        return Err(fmt_err(
            format!("matrix must be square: {} rows != {} cols", n_rows, n_cols),
            line_no,
        ));
    }

    Ok((n_rows, n_cols, n_nz))
}

/// Parse one coordinate entry line, returning the 1-based `(row, col)` pair.
/// The value field (if present) is parsed but discarded: Non-goal "edge-weight
/// preservation" — the matrix is treated as a 0/1 pattern.
fn parse_entry(
    line: &str,
    field: MtxField,
    n_rows: usize,
    line_no: usize,
) -> Result<(u32, u32), SccError> {
    let mut tokens = line.split_whitespace();

    let row: usize = tokens
        .next()
        .ok_or_else(|| fmt_err("missing row index", line_no))?
        .parse()
        .map_err(|_| fmt_err("non-numeric row index", line_no))?;
    let col: usize = tokens
        .next()
        .ok_or_else(|| fmt_err("missing column index", line_no))?
        .parse()
        .map_err(|_| fmt_err("non-numeric column index", line_no))?;

    if field != MtxField::Pattern {
        let value_str = tokens
            .next()
            .ok_or_else(|| fmt_err("missing value field", line_no))?;
        value_str
            .parse::<f64>()
            .map_err(|_| fmt_err("non-numeric value field", line_no))?;
    }

    if row == 0 || row > n_rows || col == 0 || col > n_rows {
        return Err(fmt_err(
            format!("index out of range: ({}, {}) for {}x{} matrix", row, col, n_rows, n_rows),
            line_no,
        ));
    }

    Ok((row as u32, col as u32))
}

/// Read a MatrixMarket coordinate file, returning the header, the (square)
/// dimension `n`, and the 1-based `(row, col)` edge list in file order.
///
/// Duplicate entries and self-loops are preserved verbatim — this function
/// performs no dedup and no sorting.
pub fn read_mtx(path: impl AsRef<Path>) -> Result<(MtxHeader, usize, Vec<(u32, u32)>), SccError> {
    let text = fs::read_to_string(path)?;
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));

    let (banner_no, banner_line) = lines
        .next()
        .ok_or_else(|| fmt_err("empty file", 1))?;
    let header = parse_banner(banner_line, banner_no)?;

    let mut non_comment = lines.filter(|(_, l)| !l.trim_start().starts_with('%'));

    let (size_no, size_line) = non_comment
        .next()
        .ok_or_else(|| fmt_err("missing size line", banner_no + 1))?;
    let (n_rows, _n_cols, n_nz) = parse_size(size_line, size_no)?;

    let mut edges = Vec::with_capacity(n_nz);
    for _ in 0..n_nz {
        let (entry_no, entry_line) = non_comment
            .next()
            .ok_or_else(|| SccError::Format {
                message: format!("expected {} entries, file ended early", n_nz),
                line: None,
            })?;
        edges.push(parse_entry(entry_line, header.field, n_rows, entry_no)?);
    }

    Ok((header, n_rows, edges))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_tmp(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_parse_pattern_triangle() {
        let tmp = write_tmp(
            "%%MatrixMarket matrix coordinate pattern general\n\
             3 3 3\n\
             1 2\n\
             2 3\n\
             3 1\n",
        );
        let (header, n, edges) = read_mtx(tmp.path()).unwrap();
        assert_eq!(header.field, MtxField::Pattern);
        assert_eq!(n, 3);
        assert_eq!(edges, vec![(1, 2), (2, 3), (3, 1)]);
    }

    #[test]
    fn test_parse_skips_comments() {
        let tmp = write_tmp(
            "%%MatrixMarket matrix coordinate integer general\n\
             % a comment\n\
             2 2 1\n\
             % another comment\n\
             1 1 7\n",
        );
        let (_, n, edges) = read_mtx(tmp.path()).unwrap();
        assert_eq!(n, 2);
        assert_eq!(edges, vec![(1, 1)]);
    }

    #[test]
    fn test_rejects_non_square() {
        let tmp = write_tmp("%%MatrixMarket matrix coordinate pattern general\n2 3 0\n");
        let err = read_mtx(tmp.path()).unwrap_err();
        assert!(matches!(err, SccError::Format { .. }));
    }

    #[test]
    fn test_rejects_bad_banner() {
        let tmp = write_tmp("not a banner\n2 2 0\n");
        let err = read_mtx(tmp.path()).unwrap_err();
        assert!(matches!(err, SccError::Format { .. }));
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        let tmp = write_tmp(
            "%%MatrixMarket matrix coordinate pattern general\n2 2 1\n3 1\n",
        );
        let err = read_mtx(tmp.path()).unwrap_err();
        assert!(matches!(err, SccError::Format { .. }));
    }

    #[test]
    fn test_preserves_duplicates_and_self_loops() {
        let tmp = write_tmp(
            "%%MatrixMarket matrix coordinate pattern general\n\
             2 2 3\n\
             1 1\n\
             1 2\n\
             1 2\n",
        );
        let (_, _, edges) = read_mtx(tmp.path()).unwrap();
        assert_eq!(edges, vec![(1, 1), (1, 2), (1, 2)]);
    }
}
