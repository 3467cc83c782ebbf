//! [`Error`] type.

/// An error from the API, the HTTP client, or response decoding.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// HTTP error.
	///
	/// Covers both transport failures (DNS, connection, timeout) and non-2xx responses.
	/// Use [`Error::status`] to tell them apart.
	#[error("http error: {0}")]
	Http(#[from] reqwest::Error),
	/// Failed to decode the response body.
	#[error("failed to decode the response: {0}")]
	Decode(#[from] serde_json::Error),
	/// The configured base URL is not a valid URL.
	#[error("invalid base url: {0}")]
	InvalidBaseUrl(#[from] url::ParseError),
}

impl Error {
	/// The HTTP status of the response, if the error came from a non-2xx response.
	pub fn status(&self) -> Option<reqwest::StatusCode> {
		match self {
			Error::Http(e) => e.status(),
			_ => None,
		}
	}

	/// Whether the error is a transport failure (connection, timeout) rather than an error response.
	pub fn is_transport(&self) -> bool {
		matches!(self, Error::Http(e) if e.status().is_none())
	}
}
