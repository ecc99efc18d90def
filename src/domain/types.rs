//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., one-based page numbers,
//! non-empty record identifiers) so that once a value reaches the query layer
//! it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided page number is zero.
    #[error("page index must be at least 1")]
    ZeroPage,
    /// Provided page size is zero.
    #[error("page size must be at least 1")]
    ZeroPageSize,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// One-based page number as expected by the remote query service.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageIndex(usize);

impl PageIndex {
    /// The first page.
    pub const FIRST: PageIndex = PageIndex(1);

    /// Creates a page index ensuring it is at least one.
    pub fn new(value: usize) -> Result<Self, TypeConstraintError> {
        if value >= 1 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::ZeroPage)
        }
    }

    /// Builds a page index from a zero-based route token.
    pub const fn from_route_token(token: usize) -> Self {
        Self(token.saturating_add(1))
    }

    /// Returns the zero-based token used in list routes.
    pub const fn route_token(self) -> usize {
        self.0.saturating_sub(1)
    }

    /// Returns the raw one-based value.
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for PageIndex {
    fn default() -> Self {
        Self::FIRST
    }
}

impl Display for PageIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for PageIndex {
    type Error = TypeConstraintError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageIndex> for usize {
    fn from(value: PageIndex) -> Self {
        value.0
    }
}

/// Number of records requested per page.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PageSize(usize);

impl PageSize {
    /// Creates a page size ensuring it is at least one.
    pub fn new(value: usize) -> Result<Self, TypeConstraintError> {
        if value >= 1 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::ZeroPageSize)
        }
    }

    /// Returns the raw value.
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(crate::domain::collection::DEFAULT_PAGE_SIZE)
    }
}

impl Display for PageSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Remote record identifier, trimmed and non-empty.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(String);

impl RecordId {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        if trimmed.contains('/') {
            return Err(TypeConstraintError::InvalidValue(trimmed));
        }
        Ok(Self(trimmed))
    }

    /// Borrow the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for RecordId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for RecordId {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for RecordId {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.0
    }
}
