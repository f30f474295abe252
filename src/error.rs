use std::fmt;

/// Unified error type for the loader, graph construction, and CLI layers.
#[derive(Debug)]
pub enum SccError {
    /// CLI argument parsing/validation failure (missing input, bad `-n`, etc.).
    Argument(String),
    /// Could not open or read the input file.
    Io(std::io::Error),
    /// Malformed MatrixMarket input: bad banner, non-square size, short line,
    /// non-numeric field, out-of-range index. `line` is the 1-based source
    /// line when known.
    Format { message: String, line: Option<usize> },
    /// Reserved for allocation failure during graph construction or SCC
    /// computation. Never constructed by this crate: Rust's global allocator
    /// aborts on OOM rather than returning an error, so there is nothing to
    /// propagate here in practice. Kept so the error taxonomy documents the
    /// full failure space even though this arm is unreachable in safe code.
    Allocation,
}

impl fmt::Display for SccError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SccError::Argument(msg) => write!(f, "argument error: {}", msg),
            SccError::Io(e) => write!(f, "I/O error: {}", e),
            SccError::Format { message, line: Some(line) } => {
                write!(f, "format error at line {}: {}", line, message)
            }
            SccError::Format { message, line: None } => write!(f, "format error: {}", message),
            SccError::Allocation => write!(f, "allocation failure"),
        }
    }
}

impl std::error::Error for SccError {}

impl From<std::io::Error> for SccError {
    fn from(e: std::io::Error) -> Self {
        SccError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_display() {
        let e = SccError::Argument("--threads must be at least 1".to_string());
        assert_eq!(e.to_string(), "argument error: --threads must be at least 1");
    }

    #[test]
    fn test_format_display_with_and_without_line() {
        let with_line = SccError::Format { message: "bad banner".to_string(), line: Some(1) };
        assert_eq!(with_line.to_string(), "format error at line 1: bad banner");

        let without_line = SccError::Format { message: "short file".to_string(), line: None };
        assert_eq!(without_line.to_string(), "format error: short file");
    }
}
