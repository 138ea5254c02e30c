//! Request self-validation.
//!
//! # Design
//! Every outbound request type implements [`Validatable`], a single pure
//! method that re-derives a [`ValidationResult`] from the request's current
//! field values. Validation never raises: a missing required field appends a
//! fixed `"<field> must be specified"` message, and callers inspect the
//! collected result before any network traffic happens. Message order follows
//! each request type's field declaration order, which tests rely on.

/// Outcome of validating one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    status: Status,
    messages: Vec<String>,
}

/// Whether a request is well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Valid,
    Invalid,
}

impl ValidationResult {
    pub fn builder() -> ValidationResultBuilder {
        ValidationResultBuilder {
            messages: Vec::new(),
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Human-readable failure messages, in the order the checks ran.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

/// Accumulates failure messages; `build` resolves the status.
#[derive(Debug)]
pub struct ValidationResultBuilder {
    messages: Vec<String>,
}

impl ValidationResultBuilder {
    /// Record one failure message.
    pub fn message(&mut self, message: impl Into<String>) -> &mut Self {
        self.messages.push(message.into());
        self
    }

    /// `Invalid` if and only if at least one message was recorded.
    pub fn build(self) -> ValidationResult {
        let status = if self.messages.is_empty() {
            Status::Valid
        } else {
            Status::Invalid
        };
        ValidationResult {
            status,
            messages: self.messages,
        }
    }
}

/// The capability of a request to check its own required fields.
///
/// Implementations must be pure: no side effects, no normalization of field
/// values, and the same result on every call against the same request.
pub trait Validatable {
    fn validate(&self) -> ValidationResult;
}
