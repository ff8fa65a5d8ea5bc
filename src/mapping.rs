//! Issue-to-error and error-to-state conversion
//!
//! Both functions are pure projections. Neither one inspects, reorders,
//! deduplicates, or rewrites the issues it is given.

use crate::config::{FormStateConfig, VALIDATION_FAILED_MESSAGE};
use crate::form_error::FormError;
use crate::issue::{Issue, IssueSource};
use crate::state::{FormFailure, FormState};

/// Projects an issue onto its `code`, `path` and `message`.
///
/// Anything else the issue carries, such as params or nested union errors,
/// is dropped.
///
/// # Examples
///
/// ```
/// use reinhardt_form_state::{issue_to_form_error, path, IssueCode, ValidationIssue};
///
/// let issue = ValidationIssue::new(IssueCode::TooSmall, path!["password"], "Too short")
///     .with_param("minimum", 8);
/// let error = issue_to_form_error(&issue);
///
/// assert_eq!(error.code, "too_small");
/// assert_eq!(error.message, "Too short");
/// ```
pub fn issue_to_form_error<I: Issue + ?Sized>(issue: &I) -> FormError {
	FormError {
		code: issue.code().to_string(),
		path: issue.path().to_vec(),
		message: issue.message().to_string(),
	}
}

fn collect_errors<E: IssueSource + ?Sized>(error: &E) -> Vec<FormError> {
	error.issues().iter().map(issue_to_form_error).collect()
}

/// Turns a validation error and the raw input that failed into a failure state.
///
/// The result always has `success: false`, the message `"Validation failed"`,
/// one [`FormError`] per issue in the original order, and `data` set to
/// `raw_input` unchanged. An empty issue list still yields a failure.
///
/// # Examples
///
/// ```
/// use reinhardt_form_state::{error_to_form_state, path, FormState, IssueCode, ValidationError, ValidationIssue};
/// use serde_json::json;
///
/// let error = ValidationError::new(vec![ValidationIssue::new(
///     IssueCode::InvalidString,
///     path!["email"],
///     "Invalid email",
/// )]);
///
/// let state: FormState<()> = error_to_form_state(&error, json!({ "email": "nope" }));
/// assert!(!state.is_success());
/// assert_eq!(state.message(), Some("Validation failed"));
/// assert_eq!(state.errors()[0].message, "Invalid email");
/// ```
pub fn error_to_form_state<T, R, E>(error: &E, raw_input: R) -> FormState<T, R>
where
	E: IssueSource + ?Sized,
{
	build_failure(VALIDATION_FAILED_MESSAGE, error, Some(raw_input)).into()
}

/// Same as [`error_to_form_state`] with the failure message taken from `config`.
pub fn error_to_form_state_with<T, R, E>(
	config: &FormStateConfig,
	error: &E,
	raw_input: R,
) -> FormState<T, R>
where
	E: IssueSource + ?Sized,
{
	build_failure(&config.failure_message, error, Some(raw_input)).into()
}

/// Builds the failure without raw input; `data` stays absent.
pub fn error_to_form_failure<R, E>(error: &E) -> FormFailure<R>
where
	E: IssueSource + ?Sized,
{
	build_failure(VALIDATION_FAILED_MESSAGE, error, None)
}

fn build_failure<R, E>(message: &str, error: &E, raw_input: Option<R>) -> FormFailure<R>
where
	E: IssueSource + ?Sized,
{
	let errors = collect_errors(error);
	tracing::debug!(issue_count = errors.len(), "assembled failed form state");
	FormFailure {
		message: Some(message.to_string()),
		errors: Some(errors),
		error: None,
		data: raw_input,
	}
}
