//! Error kinds of the record manager surface.

use thiserror::Error;

/// Coarse classification of a failed manager call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any mutation or I/O.
    Validation,
    /// Applied in memory, persisting failed, change reverted.
    StorageWrite,
}

#[derive(Debug, Error)]
pub enum DeptError {
    #[error("department name must not be empty")]
    EmptyName,

    #[error("employee count must not be negative, got {0}")]
    NegativeEmployeeCount(i32),

    #[error("a department named '{0}' already exists")]
    DuplicateName(String),

    #[error("department with id {0} not found")]
    NotFound(u32),

    #[error("no department ids left to assign")]
    IdExhausted,

    #[error("storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl DeptError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DeptError::Storage(_) => ErrorKind::StorageWrite,
            _ => ErrorKind::Validation,
        }
    }

    #[inline]
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

pub type DeptResult<T> = Result<T, DeptError>;

/// Failure converting an external record back into a `Department`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("field {field}: timestamp '{value}' does not match yyyy-MM-dd HH:mm:ss")]
    BadTimestamp { field: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(DeptError::EmptyName.kind(), ErrorKind::Validation);
        assert_eq!(DeptError::NotFound(3).kind(), ErrorKind::Validation);
        assert_eq!(DeptError::IdExhausted.kind(), ErrorKind::Validation);
        let e: DeptError = anyhow::anyhow!("disk full").into();
        assert_eq!(e.kind(), ErrorKind::StorageWrite);
        assert!(!e.is_validation());
    }
}
