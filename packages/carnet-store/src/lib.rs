pub mod auth;
pub mod contacts;
pub mod query;

mod error;
mod session;

pub use auth::{AuthSession, AuthUser, Credentials};
pub use contacts::ContactPage;
pub use error::{Error, Result};
pub use session::Session;

use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

use reqwest::{
	Client, Response, StatusCode,
	header::{AUTHORIZATION, HeaderMap, HeaderName},
};
use serde_json::{Map, Value};

use carnet_config::Store;
use carnet_domain::{Contact, ContactPatch};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The external system of record. Object-safe so services can swap in test
/// doubles.
pub trait ContactStore
where
	Self: Send + Sync,
{
	fn list<'a>(
		&'a self,
		cfg: &'a Store,
		query: &'a [(String, String)],
	) -> BoxFuture<'a, Result<ContactPage>>;

	fn fetch<'a>(&'a self, cfg: &'a Store, id: &'a str) -> BoxFuture<'a, Result<Contact>>;

	fn create<'a>(
		&'a self,
		cfg: &'a Store,
		patch: &'a ContactPatch,
	) -> BoxFuture<'a, Result<Contact>>;

	fn update<'a>(
		&'a self,
		cfg: &'a Store,
		id: &'a str,
		patch: &'a ContactPatch,
	) -> BoxFuture<'a, Result<Contact>>;

	fn delete<'a>(&'a self, cfg: &'a Store, id: &'a str) -> BoxFuture<'a, Result<()>>;
}

/// Default implementation talking to the REST API.
pub struct HttpContactStore {
	session: Arc<Session>,
}
impl HttpContactStore {
	pub fn new(session: Arc<Session>) -> Self {
		Self { session }
	}

	pub fn session(&self) -> &Arc<Session> {
		&self.session
	}
}
impl ContactStore for HttpContactStore {
	fn list<'a>(
		&'a self,
		cfg: &'a Store,
		query: &'a [(String, String)],
	) -> BoxFuture<'a, Result<ContactPage>> {
		Box::pin(contacts::list(cfg, &self.session, query))
	}

	fn fetch<'a>(&'a self, cfg: &'a Store, id: &'a str) -> BoxFuture<'a, Result<Contact>> {
		Box::pin(contacts::fetch(cfg, &self.session, id))
	}

	fn create<'a>(
		&'a self,
		cfg: &'a Store,
		patch: &'a ContactPatch,
	) -> BoxFuture<'a, Result<Contact>> {
		Box::pin(contacts::create(cfg, &self.session, patch))
	}

	fn update<'a>(
		&'a self,
		cfg: &'a Store,
		id: &'a str,
		patch: &'a ContactPatch,
	) -> BoxFuture<'a, Result<Contact>> {
		Box::pin(contacts::update(cfg, &self.session, id, patch))
	}

	fn delete<'a>(&'a self, cfg: &'a Store, id: &'a str) -> BoxFuture<'a, Result<()>> {
		Box::pin(contacts::delete(cfg, &self.session, id))
	}
}

/// Configured default headers with the session's auth header layered on top.
pub fn auth_headers(session: &Session, default_headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidConfig {
				message: "Default header values must be strings.".to_string(),
			});
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}
	if let Some(token) = session.token() {
		headers.insert(AUTHORIZATION, format!("JWT {token}").parse()?);
	}

	Ok(headers)
}

pub(crate) fn http_client(cfg: &Store) -> Result<Client> {
	Ok(Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?)
}

pub(crate) fn collection_url(cfg: &Store) -> String {
	format!("{}/{}", cfg.api_base, cfg.collection)
}

pub(crate) fn document_url(cfg: &Store, id: &str) -> String {
	format!("{}/{}/{}", cfg.api_base, cfg.collection, id)
}

/// Maps failure statuses onto the error taxonomy. A 401 also drops the
/// session token, since the store will keep refusing it.
pub(crate) async fn guard(res: Response, session: &Session) -> Result<Response> {
	let status = res.status();

	if status == StatusCode::UNAUTHORIZED {
		session.clear();
		tracing::warn!("Store rejected the session token.");

		return Err(Error::Unauthorized);
	}
	if status == StatusCode::NOT_FOUND {
		return Err(Error::NotFound { message: failure_message(res).await });
	}
	if !status.is_success() {
		return Err(Error::Rejected {
			status: status.as_u16(),
			message: failure_message(res).await,
		});
	}

	Ok(res)
}

async fn failure_message(res: Response) -> String {
	let status = res.status();
	let fallback = format!("Store returned status {status}.");

	match res.json::<Value>().await {
		Ok(body) => error_message(&body).unwrap_or(fallback),
		Err(_) => fallback,
	}
}

/// Digs the human-readable message out of the store's error body, which is
/// either `{message}` or `{errors: [{message}]}`.
fn error_message(body: &Value) -> Option<String> {
	if let Some(message) = body.get("message").and_then(Value::as_str) {
		return Some(message.to_string());
	}

	body.get("errors")
		.and_then(Value::as_array)
		.and_then(|errors| errors.first())
		.and_then(|error| error.get("message"))
		.and_then(Value::as_str)
		.map(ToString::to_string)
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn auth_header_uses_the_jwt_scheme() {
		let session = Session::with_token("tok");
		let headers = auth_headers(&session, &Map::new()).expect("Headers must build.");

		assert_eq!(headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()), Some("JWT tok"));
	}

	#[test]
	fn anonymous_session_sends_no_auth_header() {
		let headers = auth_headers(&Session::new(), &Map::new()).expect("Headers must build.");

		assert!(headers.get(AUTHORIZATION).is_none());
	}

	#[test]
	fn auth_header_wins_over_configured_defaults() {
		let session = Session::with_token("tok");
		let mut defaults = Map::new();

		defaults.insert("authorization".to_string(), Value::String("Bearer stale".to_string()));
		defaults.insert("x-org".to_string(), Value::String("newsroom".to_string()));

		let headers = auth_headers(&session, &defaults).expect("Headers must build.");

		assert_eq!(headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()), Some("JWT tok"));
		assert_eq!(headers.get("x-org").and_then(|v| v.to_str().ok()), Some("newsroom"));
	}

	#[test]
	fn non_string_default_header_is_rejected() {
		let mut defaults = Map::new();

		defaults.insert("x-retries".to_string(), Value::Number(3.into()));

		assert!(matches!(
			auth_headers(&Session::new(), &defaults),
			Err(Error::InvalidConfig { .. }),
		));
	}

	#[test]
	fn error_message_prefers_the_top_level_message() {
		let body = json!({ "message": "Invalid login.", "errors": [{ "message": "other" }] });

		assert_eq!(error_message(&body).as_deref(), Some("Invalid login."));
	}

	#[test]
	fn error_message_falls_back_to_the_errors_array() {
		let body = json!({ "errors": [{ "message": "The email field is invalid." }] });

		assert_eq!(error_message(&body).as_deref(), Some("The email field is invalid."));
		assert_eq!(error_message(&json!({ "ok": true })), None);
	}
}
