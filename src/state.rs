//! Form submission state
//!
//! [`FormState`] is what a form action returns and what the next submission
//! receives as its previous state. On the wire it is a single object whose
//! boolean `success` field tells the two variants apart:
//!
//! ```json
//! { "success": true, "message": "Saved", "data": { "email": "a@b.co" } }
//! { "success": false, "message": "Validation failed", "errors": [...], "data": { "email": "a" } }
//! ```
//!
//! `FormSuccess` never carries errors. Deserializing a success payload with a
//! non-empty `errors` array is rejected.

use crate::form_error::{FormError, NON_FIELD_ERRORS_KEY};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

/// A successful submission holding validated data.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSuccess<T> {
	pub message: Option<String>,
	pub data: T,
}

impl<T> FormSuccess<T> {
	pub fn new(data: T) -> Self {
		Self {
			message: None,
			data,
		}
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}
}

/// A failed submission.
///
/// `data` holds the raw submitted input for re-display, never the validated type.
#[derive(Debug, Clone, PartialEq)]
pub struct FormFailure<R> {
	pub message: Option<String>,
	pub errors: Option<Vec<FormError>>,
	pub error: Option<String>,
	pub data: Option<R>,
}

impl<R> Default for FormFailure<R> {
	fn default() -> Self {
		Self {
			message: None,
			errors: None,
			error: None,
			data: None,
		}
	}
}

impl<R> FormFailure<R> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	pub fn with_error(mut self, error: impl Into<String>) -> Self {
		self.error = Some(error.into());
		self
	}

	pub fn with_errors(mut self, errors: Vec<FormError>) -> Self {
		self.errors = Some(errors);
		self
	}

	pub fn with_data(mut self, data: R) -> Self {
		self.data = Some(data);
		self
	}

	/// Field errors as a slice; empty when `errors` is absent.
	pub fn error_list(&self) -> &[FormError] {
		self.errors.as_deref().unwrap_or_default()
	}

	/// Errors whose dotted path equals `path`.
	pub fn errors_for<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a FormError> + 'a {
		self.error_list()
			.iter()
			.filter(move |error| error.dotted_path() == path)
	}

	/// Messages of errors with an empty path.
	pub fn non_field_errors(&self) -> Vec<&str> {
		self.error_list()
			.iter()
			.filter(|error| error.is_non_field())
			.map(|error| error.message.as_str())
			.collect()
	}

	/// Groups messages by dotted path, whole-object errors under [`NON_FIELD_ERRORS_KEY`].
	///
	/// Message order within a key follows the order of `errors`.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_form_state::{path, FormError, FormFailure, NON_FIELD_ERRORS_KEY};
	///
	/// let failure: FormFailure<()> = FormFailure::new().with_errors(vec![
	///     FormError::new("too_small", path!["password"], "Too short"),
	///     FormError::new("custom", path![], "Try again"),
	/// ]);
	///
	/// let grouped = failure.field_errors();
	/// assert_eq!(grouped["password"], vec!["Too short".to_string()]);
	/// assert_eq!(grouped[NON_FIELD_ERRORS_KEY], vec!["Try again".to_string()]);
	/// ```
	pub fn field_errors(&self) -> HashMap<String, Vec<String>> {
		let mut grouped: HashMap<String, Vec<String>> = HashMap::new();
		for error in self.error_list() {
			let key = if error.is_non_field() {
				NON_FIELD_ERRORS_KEY.to_string()
			} else {
				error.dotted_path()
			};
			grouped.entry(key).or_default().push(error.message.clone());
		}
		grouped
	}
}

/// Outcome of one form submission attempt.
///
/// `R` is the raw input type kept by failures and defaults to
/// [`serde_json::Value`].
#[derive(Debug, Clone, PartialEq)]
pub enum FormState<T, R = serde_json::Value> {
	Success(FormSuccess<T>),
	Failure(FormFailure<R>),
}

impl<T, R> FormState<T, R> {
	pub fn success(data: T) -> Self {
		FormState::Success(FormSuccess::new(data))
	}

	pub fn is_success(&self) -> bool {
		matches!(self, FormState::Success(_))
	}

	pub fn message(&self) -> Option<&str> {
		match self {
			FormState::Success(success) => success.message.as_deref(),
			FormState::Failure(failure) => failure.message.as_deref(),
		}
	}

	/// Validation errors; always empty for a success.
	pub fn errors(&self) -> &[FormError] {
		match self {
			FormState::Success(_) => &[],
			FormState::Failure(failure) => failure.error_list(),
		}
	}

	/// Validated data, if the submission succeeded.
	pub fn data(&self) -> Option<&T> {
		match self {
			FormState::Success(success) => Some(&success.data),
			FormState::Failure(_) => None,
		}
	}

	/// Raw input kept by a failed submission.
	pub fn raw_input(&self) -> Option<&R> {
		match self {
			FormState::Success(_) => None,
			FormState::Failure(failure) => failure.data.as_ref(),
		}
	}

	pub fn into_result(self) -> Result<FormSuccess<T>, FormFailure<R>> {
		match self {
			FormState::Success(success) => Ok(success),
			FormState::Failure(failure) => Err(failure),
		}
	}
}

impl<T, R> From<FormSuccess<T>> for FormState<T, R> {
	fn from(success: FormSuccess<T>) -> Self {
		FormState::Success(success)
	}
}

impl<T, R> From<FormFailure<R>> for FormState<T, R> {
	fn from(failure: FormFailure<R>) -> Self {
		FormState::Failure(failure)
	}
}

// Wire representations. The `success` flag lives only here.

#[derive(Serialize)]
struct SuccessRef<'a, T> {
	success: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	message: Option<&'a str>,
	data: &'a T,
}

#[derive(Serialize)]
struct FailureRef<'a, R> {
	success: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	message: Option<&'a str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	errors: Option<&'a [FormError]>,
	#[serde(skip_serializing_if = "Option::is_none")]
	error: Option<&'a str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	data: Option<&'a R>,
}

#[derive(Deserialize)]
struct SuccessOwned<T> {
	success: bool,
	message: Option<String>,
	data: T,
	errors: Option<Vec<FormError>>,
}

#[derive(Deserialize)]
struct FailureOwned<R> {
	success: bool,
	message: Option<String>,
	errors: Option<Vec<FormError>>,
	error: Option<String>,
	data: Option<R>,
}

impl<T: Serialize> Serialize for FormSuccess<T> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		SuccessRef {
			success: true,
			message: self.message.as_deref(),
			data: &self.data,
		}
		.serialize(serializer)
	}
}

impl<R: Serialize> Serialize for FormFailure<R> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		FailureRef {
			success: false,
			message: self.message.as_deref(),
			errors: self.errors.as_deref(),
			error: self.error.as_deref(),
			data: self.data.as_ref(),
		}
		.serialize(serializer)
	}
}

impl<T: Serialize, R: Serialize> Serialize for FormState<T, R> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			FormState::Success(success) => success.serialize(serializer),
			FormState::Failure(failure) => failure.serialize(serializer),
		}
	}
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FormSuccess<T> {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let repr = SuccessOwned::<T>::deserialize(deserializer)?;
		if !repr.success {
			return Err(D::Error::custom("expected `success: true`"));
		}
		if repr.errors.is_some_and(|errors| !errors.is_empty()) {
			return Err(D::Error::custom("a successful form state cannot carry errors"));
		}
		Ok(FormSuccess {
			message: repr.message,
			data: repr.data,
		})
	}
}

impl<'de, R: Deserialize<'de>> Deserialize<'de> for FormFailure<R> {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let repr = FailureOwned::<R>::deserialize(deserializer)?;
		if repr.success {
			return Err(D::Error::custom("expected `success: false`"));
		}
		Ok(FormFailure {
			message: repr.message,
			errors: repr.errors,
			error: repr.error,
			data: repr.data,
		})
	}
}

impl<'de, T: DeserializeOwned, R: DeserializeOwned> Deserialize<'de> for FormState<T, R> {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let value = serde_json::Value::deserialize(deserializer)?;
		match value.get("success").and_then(serde_json::Value::as_bool) {
			Some(true) => serde_json::from_value::<FormSuccess<T>>(value)
				.map(FormState::Success)
				.map_err(D::Error::custom),
			Some(false) => serde_json::from_value::<FormFailure<R>>(value)
				.map(FormState::Failure)
				.map_err(D::Error::custom),
			None => Err(D::Error::custom(
				"form state requires a boolean `success` field",
			)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::path;
	use assert_json_diff::assert_json_eq;
	use rstest::rstest;
	use serde_json::{Value, json};

	#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
	struct Login {
		email: String,
	}

	#[rstest]
	fn test_success_serializes_with_tag() {
		// Arrange
		let state: FormState<Login> = FormSuccess::new(Login {
			email: "a@b.co".to_string(),
		})
		.with_message("Welcome back")
		.into();

		// Act
		let value = serde_json::to_value(&state).unwrap();

		// Assert
		assert_json_eq!(
			value,
			json!({ "success": true, "message": "Welcome back", "data": { "email": "a@b.co" } })
		);
	}

	#[rstest]
	fn test_failure_omits_absent_fields() {
		// Arrange
		let state: FormState<Login> = FormFailure::new().with_error("Server unavailable").into();

		// Act
		let value = serde_json::to_value(&state).unwrap();

		// Assert
		assert_json_eq!(value, json!({ "success": false, "error": "Server unavailable" }));
	}

	#[rstest]
	fn test_deserialize_dispatches_on_success_flag() {
		// Arrange
		let ok = json!({ "success": true, "data": { "email": "a@b.co" }, "errors": [] });
		let failed = json!({ "success": false, "data": { "email": "" } });

		// Act
		let ok: FormState<Login> = serde_json::from_value(ok).unwrap();
		let failed: FormState<Login> = serde_json::from_value(failed).unwrap();

		// Assert
		assert!(ok.is_success());
		assert_eq!(ok.data().map(|login| login.email.as_str()), Some("a@b.co"));
		assert!(!failed.is_success());
		assert_eq!(failed.raw_input(), Some(&json!({ "email": "" })));
	}

	#[derive(Debug, PartialEq, Deserialize)]
	struct Draft {
		title: String,
	}

	#[rstest]
	fn test_failure_deserializes_raw_input_without_default() {
		// Arrange
		let bare = json!({ "success": false, "error": "Server unavailable" });
		let with_data = json!({ "success": false, "data": { "title": "" } });

		// Act
		let bare: FormState<Login, Draft> = serde_json::from_value(bare).unwrap();
		let with_data: FormFailure<Draft> = serde_json::from_value(with_data).unwrap();

		// Assert
		assert_eq!(bare.raw_input(), None);
		assert!(bare.errors().is_empty());
		assert_eq!(
			with_data.data,
			Some(Draft {
				title: String::new()
			})
		);
	}

	#[rstest]
	#[case(json!({ "data": {} }))]
	#[case(json!({ "success": "yes", "data": {} }))]
	#[case(json!({ "success": true, "data": { "email": "a" }, "errors": [
		{ "code": "custom", "path": [], "message": "nope" }
	] }))]
	fn test_deserialize_rejects_malformed_state(#[case] raw: Value) {
		// Act
		let result = serde_json::from_value::<FormState<Login>>(raw);

		// Assert
		assert!(result.is_err());
	}

	#[rstest]
	fn test_errors_are_empty_for_success() {
		// Arrange
		let state: FormState<i32> = FormState::success(1);

		// Act + Assert
		assert!(state.errors().is_empty());
		assert_eq!(state.message(), None);
		assert_eq!(state.into_result().map(|success| success.data), Ok(1));
	}

	#[rstest]
	fn test_errors_for_matches_dotted_path() {
		// Arrange
		let failure: FormFailure<Value> = FormFailure::new().with_errors(vec![
			FormError::new("too_small", path!["items", 0, "name"], "Too short"),
			FormError::new("invalid_type", path!["items", 1, "name"], "Required"),
			FormError::new("too_big", path!["items", 0, "name"], "Too long"),
		]);

		// Act
		let messages: Vec<&str> = failure
			.errors_for("items.0.name")
			.map(|error| error.message.as_str())
			.collect();

		// Assert
		assert_eq!(messages, vec!["Too short", "Too long"]);
		assert!(failure.non_field_errors().is_empty());
	}
}
