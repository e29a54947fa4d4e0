pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{message}")]
	NotFound { message: String },
	#[error("invalid value for {field}.")]
	Validation { field: String },
	#[error("store operation failed, {message}")]
	Store { message: String },
}
impl From<carnet_store::Error> for Error {
	fn from(err: carnet_store::Error) -> Self {
		match err {
			carnet_store::Error::NotFound { message } => Self::NotFound { message },
			err => Self::Store { message: err.to_string() },
		}
	}
}
