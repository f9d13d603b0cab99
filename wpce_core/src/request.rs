//! Standardized handling of form-style requests.
//!
//! A [`RequestProcessor`] keeps only its allowed keys, sanitizes them, checks
//! prerequisites, validates each field and runs its success action when no
//! error was recorded. Errors and data are collected in a [`Response`] whose
//! [`Response::body`] is serialized as JSON:
//!
//! ```json
//! { "fieldErrors": { "email": ["Invalid address."] }, "formErrors": ["Please check your form fields for errors."], "isSuccess": false }
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::PropBag;
use crate::PropValue;

/// Status reported for a failed response when no error status was set.
pub const DEFAULT_ERROR_STATUS: u16 = 400;
/// Form error added to a failed response that has field errors.
pub const DEFAULT_FIELD_ERRORS_MESSAGE: &str = "Please check your form fields for errors.";
/// Message of a successful response unless replaced.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Request was made successfully.";

/// Errors and data collected while processing a request.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
	field_errors: BTreeMap<String, Vec<String>>,
	form_errors: Vec<String>,
	status: u16,
	data: serde_json::Value,
	success_message: String,
}

impl Default for Response {
	fn default() -> Self {
		Self {
			field_errors: BTreeMap::new(),
			form_errors: Vec::new(),
			status: 200,
			data: serde_json::Value::Array(Vec::new()),
			success_message: DEFAULT_SUCCESS_MESSAGE.to_string(),
		}
	}
}

impl Response {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_field_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
		self.field_errors
			.entry(field.into())
			.or_default()
			.push(message.into());
	}

	pub fn add_form_error(&mut self, message: impl Into<String>) {
		self.form_errors.push(message.into());
	}

	pub fn field_errors(&self) -> &BTreeMap<String, Vec<String>> {
		&self.field_errors
	}

	pub fn form_errors(&self) -> &[String] {
		&self.form_errors
	}

	pub fn has_field_errors(&self) -> bool {
		self.field_errors.values().any(|errors| !errors.is_empty())
	}

	/// True when any field or form error was recorded.
	pub fn has_errors(&self) -> bool {
		let field_errors: usize = self.field_errors.values().map(Vec::len).sum();
		field_errors + self.form_errors.len() > 0
	}

	/// Data returned with a successful response.
	pub fn set_data(&mut self, data: impl Into<serde_json::Value>) {
		self.data = data.into();
	}

	pub fn data(&self) -> &serde_json::Value {
		&self.data
	}

	pub fn set_status(&mut self, status: u16) {
		self.status = status;
	}

	/// The status to send. A failed response never reports a status below
	/// 400.
	pub fn status(&self) -> u16 {
		if self.has_errors() && self.status < 400 {
			DEFAULT_ERROR_STATUS
		} else {
			self.status
		}
	}

	pub fn set_success_message(&mut self, message: impl Into<String>) {
		self.success_message = message.into();
	}

	/// The serializable response body.
	pub fn body(&self) -> ResponseBody {
		if !self.has_errors() {
			return ResponseBody::Success(SuccessBody {
				data: self.data.clone(),
				is_success: true,
				success_message: self.success_message.clone(),
			});
		}

		let mut form_errors = self.form_errors.clone();
		if self.has_field_errors() {
			form_errors.push(DEFAULT_FIELD_ERRORS_MESSAGE.to_string());
		}

		ResponseBody::Failure(FailureBody {
			field_errors: self.field_errors.clone(),
			form_errors,
			is_success: false,
		})
	}

	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string(&self.body())
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
	Success(SuccessBody),
	Failure(FailureBody),
}

impl ResponseBody {
	pub fn is_success(&self) -> bool {
		matches!(self, Self::Success(_))
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessBody {
	pub data: serde_json::Value,
	pub is_success: bool,
	pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureBody {
	pub field_errors: BTreeMap<String, Vec<String>>,
	pub form_errors: Vec<String>,
	pub is_success: bool,
}

/// Drives a request through a fixed flow: keep the allowed keys (missing
/// ones as null), sanitize each value, validate prerequisites, validate each
/// field, and run the success action when no error was recorded.
pub trait RequestProcessor {
	/// Keys read from the request, in validation order.
	fn allowed_keys(&self) -> &[&str];

	fn sanitize_field(&self, _name: &str, value: PropValue) -> PropValue {
		value
	}

	/// Checks unrelated to the request data. Returning `false` skips field
	/// validation.
	fn validate_prerequisites(&mut self, _response: &mut Response) -> bool {
		true
	}

	/// Record errors for an invalid value on `response`.
	fn validate_field(&mut self, _name: &str, _value: &PropValue, _response: &mut Response) {}

	/// Runs only when no error was recorded.
	fn process_success(&mut self, data: &PropBag, response: &mut Response);

	fn process_request(&mut self, request: &PropBag) -> Response {
		let mut response = Response::new();
		let keys: Vec<String> = self.allowed_keys().iter().map(ToString::to_string).collect();

		let data: PropBag = keys
			.iter()
			.map(|key| {
				let value = request.get(key).cloned().unwrap_or_default();
				(key.clone(), self.sanitize_field(key, value))
			})
			.collect();

		if self.validate_prerequisites(&mut response) {
			let null = PropValue::Null;
			for key in &keys {
				let value = data.get(key).unwrap_or(&null);
				self.validate_field(key, value, &mut response);
			}
		}

		if response.has_errors() {
			tracing::debug!(
				field_errors = response.field_errors().len(),
				form_errors = response.form_errors().len(),
				"request failed validation"
			);
		} else {
			self.process_success(&data, &mut response);
		}

		response
	}
}
