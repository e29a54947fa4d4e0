use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Result, Session};
use carnet_config::Store;
use carnet_domain::{Contact, ContactPatch};

/// Paged list envelope as the store sends it.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPage {
	pub docs: Vec<Contact>,
	pub total_docs: u64,
	pub limit: u32,
	pub total_pages: u32,
	pub page: u32,
	#[serde(default)]
	pub has_prev_page: bool,
	#[serde(default)]
	pub has_next_page: bool,
	#[serde(default)]
	pub prev_page: Option<u32>,
	#[serde(default)]
	pub next_page: Option<u32>,
}

pub async fn list(
	cfg: &Store,
	session: &Session,
	query: &[(String, String)],
) -> Result<ContactPage> {
	let client = crate::http_client(cfg)?;
	let res = client
		.get(crate::collection_url(cfg))
		.headers(crate::auth_headers(session, &cfg.default_headers)?)
		.query(query)
		.send()
		.await?;

	Ok(crate::guard(res, session).await?.json().await?)
}

pub async fn fetch(cfg: &Store, session: &Session, id: &str) -> Result<Contact> {
	let client = crate::http_client(cfg)?;
	let res = client
		.get(crate::document_url(cfg, id))
		.headers(crate::auth_headers(session, &cfg.default_headers)?)
		.send()
		.await?;
	let json: Value = crate::guard(res, session).await?.json().await?;

	unwrap_doc(json)
}

pub async fn create(cfg: &Store, session: &Session, patch: &ContactPatch) -> Result<Contact> {
	let client = crate::http_client(cfg)?;
	let res = client
		.post(crate::collection_url(cfg))
		.headers(crate::auth_headers(session, &cfg.default_headers)?)
		.json(patch)
		.send()
		.await?;
	let json: Value = crate::guard(res, session).await?.json().await?;

	unwrap_doc(json)
}

pub async fn update(
	cfg: &Store,
	session: &Session,
	id: &str,
	patch: &ContactPatch,
) -> Result<Contact> {
	let client = crate::http_client(cfg)?;
	let res = client
		.patch(crate::document_url(cfg, id))
		.headers(crate::auth_headers(session, &cfg.default_headers)?)
		.json(patch)
		.send()
		.await?;
	let json: Value = crate::guard(res, session).await?.json().await?;

	unwrap_doc(json)
}

pub async fn delete(cfg: &Store, session: &Session, id: &str) -> Result<()> {
	let client = crate::http_client(cfg)?;
	let res = client
		.delete(crate::document_url(cfg, id))
		.headers(crate::auth_headers(session, &cfg.default_headers)?)
		.send()
		.await?;

	crate::guard(res, session).await?;

	Ok(())
}

/// Mutations may come back either as the bare document or wrapped in a
/// `{message, doc}` envelope.
fn unwrap_doc(mut json: Value) -> Result<Contact> {
	if let Some(doc) = json.get_mut("doc") {
		json = doc.take();
	}

	Ok(serde_json::from_value(json)?)
}
