//! Conversion from `validator::ValidationErrors`
//!
//! `validator` reports failures as a tree keyed by field name. This module
//! flattens that tree into an ordered issue list so derive-validated structs
//! feed the same [`error_to_form_state`](crate::mapping::error_to_form_state)
//! path as [`Schema`](crate::schema::Schema) results.
//!
//! Field names are visited in sorted order; `__all__` (struct-level) errors
//! get the path of their parent.

use crate::issue::{IssueCode, PathSegment, ValidationError, ValidationIssue};
use validator::{ValidationErrors, ValidationErrorsKind};

const STRUCT_LEVEL_KEY: &str = "__all__";

impl From<&ValidationErrors> for ValidationError {
	fn from(errors: &ValidationErrors) -> Self {
		let mut issues = Vec::new();
		flatten(errors, &mut Vec::new(), &mut issues);
		ValidationError::new(issues)
	}
}

impl From<ValidationErrors> for ValidationError {
	fn from(errors: ValidationErrors) -> Self {
		ValidationError::from(&errors)
	}
}

fn flatten(
	errors: &ValidationErrors,
	path: &mut Vec<PathSegment>,
	out: &mut Vec<ValidationIssue>,
) {
	let mut fields: Vec<(String, &ValidationErrorsKind)> = errors
		.errors()
		.iter()
		.map(|(field, kind)| (field.to_string(), kind))
		.collect();
	fields.sort_by(|a, b| a.0.cmp(&b.0));

	for (field, kind) in fields {
		let struct_level = field == STRUCT_LEVEL_KEY;
		if !struct_level {
			path.push(PathSegment::Key(field));
		}
		match kind {
			ValidationErrorsKind::Field(field_errors) => {
				for error in field_errors {
					out.push(to_issue(error, path));
				}
			}
			ValidationErrorsKind::Struct(nested) => flatten(nested, path, out),
			ValidationErrorsKind::List(items) => {
				for (index, nested) in items {
					path.push(PathSegment::Index(*index));
					flatten(nested, path, out);
					path.pop();
				}
			}
		}
		if !struct_level {
			path.pop();
		}
	}
}

fn to_issue(error: &validator::ValidationError, path: &[PathSegment]) -> ValidationIssue {
	let message = error
		.message
		.as_ref()
		.map(|message| message.to_string())
		.unwrap_or_else(|| error.code.to_string());
	let code = IssueCode::from(error.code.to_string());
	let mut issue = ValidationIssue::new(code, path.to_vec(), message);
	let mut params: Vec<_> = error.params.iter().collect();
	params.sort_by(|a, b| a.0.cmp(b.0));
	for (key, value) in params {
		issue = issue.with_param(key.to_string(), value.clone());
	}
	issue
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::mapping::error_to_form_state;
	use crate::path;
	use crate::state::FormState;
	use rstest::rstest;
	use serde_json::{Value, json};

	#[rstest]
	fn test_flattens_fields_in_sorted_order() {
		// Arrange
		let mut errors = ValidationErrors::new();
		errors.add(
			"password",
			validator::ValidationError::new("length").with_message("Too short".into()),
		);
		errors.add("email", validator::ValidationError::new("email"));

		// Act
		let converted = ValidationError::from(&errors);

		// Assert
		let located: Vec<(&str, Vec<PathSegment>, &str)> = converted
			.issues
			.iter()
			.map(|issue| (issue.code.as_str(), issue.path.clone(), issue.message.as_str()))
			.collect();
		assert_eq!(
			located,
			vec![
				("email", path!["email"], "email"),
				("length", path!["password"], "Too short"),
			]
		);
	}

	#[rstest]
	fn test_flattens_nested_struct_and_list_errors() {
		// Arrange
		let mut address = ValidationErrors::new();
		address.add("city", validator::ValidationError::new("required"));
		let mut first_item = ValidationErrors::new();
		first_item.add("name", validator::ValidationError::new("required"));
		let mut second_item = ValidationErrors::new();
		second_item.add(
			"name",
			validator::ValidationError::new("length").with_message("Too short".into()),
		);

		let mut errors = ValidationErrors::new();
		errors.add("email", validator::ValidationError::new("email"));
		errors.errors_mut().insert(
			"address".into(),
			ValidationErrorsKind::Struct(Box::new(address)),
		);
		errors.errors_mut().insert(
			"items".into(),
			ValidationErrorsKind::List(
				[(1, Box::new(second_item)), (0, Box::new(first_item))]
					.into_iter()
					.collect(),
			),
		);

		// Act
		let converted = ValidationError::from(errors);

		// Assert
		let located: Vec<(&str, Vec<PathSegment>)> = converted
			.issues
			.iter()
			.map(|issue| (issue.code.as_str(), issue.path.clone()))
			.collect();
		assert_eq!(
			located,
			vec![
				("required", path!["address", "city"]),
				("email", path!["email"]),
				("required", path!["items", 0, "name"]),
				("length", path!["items", 1, "name"]),
			]
		);
		assert_eq!(converted.issues[3].message, "Too short");
	}

	#[rstest]
	fn test_struct_level_errors_have_parent_path() {
		// Arrange
		let mut errors = ValidationErrors::new();
		errors.add(
			"__all__",
			validator::ValidationError::new("passwords_match")
				.with_message("Passwords don't match".into()),
		);

		// Act
		let state: FormState<Value> =
			error_to_form_state(&ValidationError::from(errors), json!({ "password": "a" }));

		// Assert
		assert_eq!(state.errors().len(), 1);
		assert!(state.errors()[0].is_non_field());
		assert_eq!(state.errors()[0].message, "Passwords don't match");
	}
}
