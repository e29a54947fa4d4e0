use std::sync::{Mutex, MutexGuard};

/// Holds the auth token for the lifetime of a client. Shared behind an `Arc`
/// so the HTTP layer can drop a token the store has rejected.
#[derive(Debug, Default)]
pub struct Session {
	token: Mutex<Option<String>>,
}
impl Session {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_token(token: impl Into<String>) -> Self {
		Self { token: Mutex::new(Some(token.into())) }
	}

	pub fn authenticate(&self, token: impl Into<String>) {
		*self.lock() = Some(token.into());
	}

	pub fn clear(&self) {
		*self.lock() = None;
	}

	pub fn token(&self) -> Option<String> {
		self.lock().clone()
	}

	pub fn is_authenticated(&self) -> bool {
		self.lock().is_some()
	}

	fn lock(&self) -> MutexGuard<'_, Option<String>> {
		self.token.lock().unwrap_or_else(|err| err.into_inner())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn token_lifecycle() {
		let session = Session::new();

		assert!(!session.is_authenticated());

		session.authenticate("abc");

		assert_eq!(session.token().as_deref(), Some("abc"));

		session.clear();

		assert_eq!(session.token(), None);
	}
}
