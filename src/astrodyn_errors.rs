use thiserror::Error;

use crate::ephemeris::chebyshev::Body;

/// Crate-wide error type.
///
/// Variants fall into four families:
/// - format errors (malformed or structurally invalid input files),
/// - range errors (times outside leap-second-table or ephemeris validity),
/// - lookup errors (no ephemeris registered for a requested body),
/// - argument errors (negative durations, reversed interval bounds).
///
/// Parse-time variants carry the source file name and, where meaningful, the
/// line or block index so callers can build an actionable message.
#[derive(Error, Debug)]
pub enum AstrodynError {
    #[error("Invalid timestamp format: {0}")]
    InvalidTimestampFormat(String),

    #[error("Time out of range: {0}")]
    TimeOutOfRange(String),

    #[error("{file}: block {block} has {found} coefficients, expected {expected}")]
    InvalidBlockSize {
        file: String,
        block: usize,
        expected: usize,
        found: usize,
    },

    #[error("{file}: block {block} starts at JD {found_start}, expected JD {expected_start} (blocks must be contiguous)")]
    NonContiguousBlocks {
        file: String,
        block: usize,
        expected_start: f64,
        found_start: f64,
    },

    #[error("{file}:{line}: unexpected keyword: {keyword}")]
    UnexpectedKeyword {
        file: String,
        line: usize,
        keyword: String,
    },

    #[error("{file}:{line}: invalid header line, expected {expected}")]
    InvalidHeaderLine {
        file: String,
        line: usize,
        expected: String,
    },

    #[error("{file}:{line}: invalid record: {message}")]
    InvalidRecord {
        file: String,
        line: usize,
        message: String,
    },

    #[error("No ephemeris available for body {0}")]
    NoEphemerisForBody(Body),

    #[error("Negative interval duration: {0} microseconds")]
    NegativeDuration(i64),

    #[error("Interval stop ({stop}) precedes start ({start})")]
    InvalidIntervalBounds { start: i64, stop: i64 },

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl PartialEq for AstrodynError {
    fn eq(&self, other: &Self) -> bool {
        use AstrodynError::*;
        match (self, other) {
            (InvalidTimestampFormat(a), InvalidTimestampFormat(b)) => a == b,
            (TimeOutOfRange(a), TimeOutOfRange(b)) => a == b,
            (
                InvalidBlockSize {
                    file: f1,
                    block: b1,
                    expected: e1,
                    found: n1,
                },
                InvalidBlockSize {
                    file: f2,
                    block: b2,
                    expected: e2,
                    found: n2,
                },
            ) => f1 == f2 && b1 == b2 && e1 == e2 && n1 == n2,
            (
                NonContiguousBlocks {
                    file: f1, block: b1, ..
                },
                NonContiguousBlocks {
                    file: f2, block: b2, ..
                },
            ) => f1 == f2 && b1 == b2,
            (
                UnexpectedKeyword {
                    file: f1,
                    line: l1,
                    keyword: k1,
                },
                UnexpectedKeyword {
                    file: f2,
                    line: l2,
                    keyword: k2,
                },
            ) => f1 == f2 && l1 == l2 && k1 == k2,
            (
                InvalidHeaderLine { file: f1, line: l1, .. },
                InvalidHeaderLine { file: f2, line: l2, .. },
            ) => f1 == f2 && l1 == l2,
            (
                InvalidRecord { file: f1, line: l1, .. },
                InvalidRecord { file: f2, line: l2, .. },
            ) => f1 == f2 && l1 == l2,
            (NoEphemerisForBody(a), NoEphemerisForBody(b)) => a == b,
            (NegativeDuration(a), NegativeDuration(b)) => a == b,
            (
                InvalidIntervalBounds { start: s1, stop: p1 },
                InvalidIntervalBounds { start: s2, stop: p2 },
            ) => s1 == s2 && p1 == p2,

            // Not comparable beyond the variant itself
            (IoError(_), IoError(_)) => true,

            _ => false,
        }
    }
}
