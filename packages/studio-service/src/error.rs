pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Fetch failed: {message}")]
	Fetch { message: String },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
}
impl From<studio_providers::Error> for Error {
	fn from(err: studio_providers::Error) -> Self {
		match err {
			studio_providers::Error::InvalidConfig { message } => Self::InvalidRequest { message },
			other => Self::Fetch { message: other.to_string() },
		}
	}
}
impl From<studio_domain::FilterError> for Error {
	fn from(err: studio_domain::FilterError) -> Self {
		Self::InvalidRequest { message: err.to_string() }
	}
}
