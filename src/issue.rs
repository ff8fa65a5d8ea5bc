//! Validation issues
//!
//! An issue is a single validation failure: a machine-readable code, a path
//! locating the failing value inside the submitted data, and a human-readable
//! message. [`Schema::parse`](crate::schema::Schema::parse) reports failures as
//! a [`ValidationError`] holding an ordered list of [`ValidationIssue`]s.
//!
//! Other validation libraries plug in by implementing [`Issue`] for their
//! issue records and [`IssueSource`] for their error objects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of a path into submitted data: an object key or an array index.
///
/// Serialized untagged, so a path reads `["items", 0, "name"]` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
	Index(usize),
	Key(String),
}

impl fmt::Display for PathSegment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PathSegment::Index(index) => write!(f, "{}", index),
			PathSegment::Key(key) => f.write_str(key),
		}
	}
}

impl From<&str> for PathSegment {
	fn from(key: &str) -> Self {
		PathSegment::Key(key.to_string())
	}
}

impl From<String> for PathSegment {
	fn from(key: String) -> Self {
		PathSegment::Key(key)
	}
}

impl From<usize> for PathSegment {
	fn from(index: usize) -> Self {
		PathSegment::Index(index)
	}
}

/// Builds a path from a mix of keys and indices.
///
/// # Examples
///
/// ```
/// use reinhardt_form_state::{path, PathSegment};
///
/// let p = path!["items", 0, "name"];
/// assert_eq!(p[1], PathSegment::Index(0));
/// assert!(path![].is_empty());
/// ```
#[macro_export]
macro_rules! path {
	() => {
		::std::vec::Vec::<$crate::PathSegment>::new()
	};
	($($segment:expr),+ $(,)?) => {
		::std::vec![$($crate::PathSegment::from($segment)),+]
	};
}

/// Machine-readable issue code.
///
/// Codes travel as plain strings; names this crate does not produce itself
/// survive as [`IssueCode::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IssueCode {
	InvalidType,
	InvalidLiteral,
	TooSmall,
	TooBig,
	InvalidString,
	InvalidUnion,
	InvalidUnionDiscriminator,
	Custom,
	Other(String),
}

impl IssueCode {
	pub fn as_str(&self) -> &str {
		match self {
			IssueCode::InvalidType => "invalid_type",
			IssueCode::InvalidLiteral => "invalid_literal",
			IssueCode::TooSmall => "too_small",
			IssueCode::TooBig => "too_big",
			IssueCode::InvalidString => "invalid_string",
			IssueCode::InvalidUnion => "invalid_union",
			IssueCode::InvalidUnionDiscriminator => "invalid_union_discriminator",
			IssueCode::Custom => "custom",
			IssueCode::Other(code) => code,
		}
	}
}

impl From<String> for IssueCode {
	fn from(code: String) -> Self {
		match code.as_str() {
			"invalid_type" => IssueCode::InvalidType,
			"invalid_literal" => IssueCode::InvalidLiteral,
			"too_small" => IssueCode::TooSmall,
			"too_big" => IssueCode::TooBig,
			"invalid_string" => IssueCode::InvalidString,
			"invalid_union" => IssueCode::InvalidUnion,
			"invalid_union_discriminator" => IssueCode::InvalidUnionDiscriminator,
			"custom" => IssueCode::Custom,
			_ => IssueCode::Other(code),
		}
	}
}

impl From<&str> for IssueCode {
	fn from(code: &str) -> Self {
		IssueCode::from(code.to_string())
	}
}

impl From<IssueCode> for String {
	fn from(code: IssueCode) -> Self {
		match code {
			IssueCode::Other(code) => code,
			known => known.as_str().to_string(),
		}
	}
}

impl fmt::Display for IssueCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Read access to the three fields every issue record exposes.
pub trait Issue {
	fn code(&self) -> &str;
	fn path(&self) -> &[PathSegment];
	fn message(&self) -> &str;
}

impl<I: Issue + ?Sized> Issue for &I {
	fn code(&self) -> &str {
		(**self).code()
	}

	fn path(&self) -> &[PathSegment] {
		(**self).path()
	}

	fn message(&self) -> &str {
		(**self).message()
	}
}

/// An error object carrying an ordered sequence of issues.
pub trait IssueSource {
	type Issue: Issue;

	fn issues(&self) -> &[Self::Issue];
}

impl<I: Issue> IssueSource for [I] {
	type Issue = I;

	fn issues(&self) -> &[I] {
		self
	}
}

impl<I: Issue> IssueSource for Vec<I> {
	type Issue = I;

	fn issues(&self) -> &[I] {
		self
	}
}

/// A validation issue as reported by [`Schema::parse`](crate::schema::Schema::parse).
///
/// Besides the three projected fields, an issue may carry `params` (limits,
/// expected/received types) and, for unions, the issues of every failed
/// branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
	pub code: IssueCode,
	#[serde(default)]
	pub path: Vec<PathSegment>,
	pub message: String,
	#[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
	pub params: serde_json::Map<String, serde_json::Value>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub union_errors: Vec<ValidationError>,
}

impl ValidationIssue {
	/// Creates an issue without params or union errors.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_form_state::{path, Issue, IssueCode, ValidationIssue};
	///
	/// let issue = ValidationIssue::new(IssueCode::TooSmall, path!["password"], "Too short");
	/// assert_eq!(issue.code(), "too_small");
	/// ```
	pub fn new(
		code: impl Into<IssueCode>,
		path: Vec<PathSegment>,
		message: impl Into<String>,
	) -> Self {
		Self {
			code: code.into(),
			path,
			message: message.into(),
			params: serde_json::Map::new(),
			union_errors: Vec::new(),
		}
	}

	pub fn with_param(
		mut self,
		key: impl Into<String>,
		value: impl Into<serde_json::Value>,
	) -> Self {
		self.params.insert(key.into(), value.into());
		self
	}

	pub fn with_union_errors(mut self, union_errors: Vec<ValidationError>) -> Self {
		self.union_errors = union_errors;
		self
	}
}

impl Issue for ValidationIssue {
	fn code(&self) -> &str {
		self.code.as_str()
	}

	fn path(&self) -> &[PathSegment] {
		&self.path
	}

	fn message(&self) -> &str {
		&self.message
	}
}

/// Structured failure raised by a schema parse.
///
/// A payload whose `issues` key is missing deserializes to an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("Validation failed with {} issue(s)", .issues.len())]
pub struct ValidationError {
	#[serde(default)]
	pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
	pub fn new(issues: Vec<ValidationIssue>) -> Self {
		Self { issues }
	}

	pub fn is_empty(&self) -> bool {
		self.issues.is_empty()
	}

	pub fn len(&self) -> usize {
		self.issues.len()
	}
}

impl From<Vec<ValidationIssue>> for ValidationError {
	fn from(issues: Vec<ValidationIssue>) -> Self {
		Self { issues }
	}
}

impl IssueSource for ValidationError {
	type Issue = ValidationIssue;

	fn issues(&self) -> &[ValidationIssue] {
		&self.issues
	}
}
