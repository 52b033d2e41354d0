use std::{io, path::PathBuf, str::Utf8Error};

use thiserror::Error;

/// Failures raised while decoding an EVTC buffer. Every variant aborts the
/// decode; no partial log is ever returned.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Invalid magic bytes: expected {expected:?}, got {got:?}")]
    InvalidMagic { expected: Vec<u8>, got: Vec<u8> },

    #[error("Unexpected end of input at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEndOfInput {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("Truncated event record at offset {offset}: {remaining} trailing bytes")]
    TruncatedRecord { offset: usize, remaining: usize },

    #[error("Invalid UTF-8 in {field} at offset {offset}: {source}")]
    InvalidEncoding {
        field: &'static str,
        offset: usize,
        #[source]
        source: Utf8Error,
    },
}

pub type Result<T> = std::result::Result<T, DecodeError>;

/// Failures raised while loading a log file from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("log file is empty: {0:?}")]
    EmptyFile(PathBuf),

    #[error("unsupported log file extension: {0:?} (expected .evtc)")]
    UnsupportedExtension(PathBuf),

    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
}

impl LoadError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn decode(path: impl Into<PathBuf>, source: DecodeError) -> Self {
        Self::Decode {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn decode_error__invalid_magic__then_formats_both_tags() {
        let err = DecodeError::InvalidMagic {
            expected: b"EVTC".to_vec(),
            got: b"ATI2".to_vec(),
        };
        let message = err.to_string();
        assert!(message.contains("Invalid magic"));
        assert!(message.contains(&format!("{:?}", b"ATI2".to_vec())));
    }

    #[test]
    fn decode_error__unexpected_end__then_reports_offset_and_widths() {
        let err = DecodeError::UnexpectedEndOfInput {
            offset: 20,
            needed: 96,
            remaining: 12,
        };
        let message = err.to_string();
        assert!(message.contains("offset 20"));
        assert!(message.contains("needed 96"));
        assert!(message.contains("12 remaining"));
    }

    #[test]
    fn load_error__io_constructor__then_preserves_path_and_source() {
        let err = LoadError::io(
            "/tmp/fight.evtc",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );

        match &err {
            LoadError::Io { path, source } => {
                assert!(path.display().to_string().ends_with("fight.evtc"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn load_error__decode_constructor__then_keeps_decode_source() {
        let err = LoadError::decode(
            "/tmp/fight.evtc",
            DecodeError::TruncatedRecord {
                offset: 128,
                remaining: 10,
            },
        );

        assert!(matches!(
            &err,
            LoadError::Decode {
                source: DecodeError::TruncatedRecord { remaining: 10, .. },
                ..
            }
        ));
        assert!(std::error::Error::source(&err).is_some());
    }
}
