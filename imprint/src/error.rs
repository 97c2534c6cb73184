use core::fmt::{self, Display, Formatter, Write};

use crate::{Kind, Shape, ValueType};

/// A segment in an assignment path
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    /// A field of a record
    Field(&'static str),
    /// A key in a map
    Key(String),
    /// An index in a sequence
    Index(usize),
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, ".{name}"),
            PathSegment::Key(key) => write!(f, "[{key:?}]"),
            PathSegment::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// Error produced while assigning into a record.
#[derive(Debug, Clone)]
pub struct AssignError {
    /// The specific kind of error
    pub kind: AssignErrorKind,
    /// Where in the destination the error occurred, from the top-level record
    pub path: Vec<PathSegment>,
}

impl AssignError {
    /// Create a new error at the root
    pub fn new(kind: AssignErrorKind) -> Self {
        Self {
            kind,
            path: Vec::new(),
        }
    }

    /// Format the path as a string
    pub fn path_string(&self) -> String {
        if self.path.is_empty() {
            "<root>".into()
        } else {
            let mut s = String::new();
            for seg in &self.path {
                let _ = write!(s, "{seg}");
            }
            s
        }
    }
}

impl Display for AssignError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "at {}: {}", self.path_string(), self.kind)
        }
    }
}

impl core::error::Error for AssignError {}

impl From<AssignErrorKind> for AssignError {
    fn from(kind: AssignErrorKind) -> Self {
        AssignError::new(kind)
    }
}

/// Specific error kinds for assignment.
#[derive(Debug, Clone)]
pub enum AssignErrorKind {
    /// The source handed to a top-level assignment was not an object
    NotAnObject {
        /// What the source actually was
        got: ValueType,
    },
    /// A string could not be parsed as the numeric field type
    InvalidNumber {
        /// The offending text
        text: String,
        /// The numeric type it was parsed as
        expected: &'static Shape,
    },
    /// An element of a sequence or map was not of the declared element type
    ElementMismatch {
        /// The declared element type
        expected: &'static Shape,
        /// What the element actually was
        got: Kind,
    },
    /// A source key names no field (only with `deny_unknown_fields`)
    UnknownField {
        /// The unknown key
        field: String,
        /// The record being assigned
        record: &'static Shape,
    },
}

impl Display for AssignErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AssignErrorKind::NotAnObject { got } => {
                write!(f, "expected an object to assign from, got {got}")
            }
            AssignErrorKind::InvalidNumber { text, expected } => {
                write!(f, "invalid {expected} literal: {text:?}")
            }
            AssignErrorKind::ElementMismatch { expected, got } => {
                write!(f, "element type mismatch: expected {expected}, got {got}")
            }
            AssignErrorKind::UnknownField { field, record } => {
                write!(f, "unknown field `{field}` for {record}")
            }
        }
    }
}

/// Result type for assignment.
pub type Result<T> = core::result::Result<T, AssignError>;
