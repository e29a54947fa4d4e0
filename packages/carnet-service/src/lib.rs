//! Contact operations built on top of the document store.
//!
//! Each operation validates its request, translates it into store calls and
//! returns a response DTO together with a [`ContactOp`] marker describing
//! what actually happened. Rejected requests never reach the store.

pub mod create;
pub mod delete;
pub mod fetch;
pub mod list;
pub mod timeline;
pub mod update;

mod error;

pub use create::{CreateRequest, CreateResponse};
pub use delete::{DeleteRequest, DeleteResponse};
pub use error::{Error, Result};
pub use fetch::{FetchRequest, FetchResponse};
pub use list::{ListRequest, ListResponse};
pub use timeline::{
	AddInteractionRequest, AddInteractionResponse, DeleteInteractionRequest,
	DeleteInteractionResponse, UpdateInteractionRequest, UpdateInteractionResponse,
};
pub use update::{UpdateRequest, UpdateResponse};

/// Filter state and query translation, re-exported for callers that drive
/// the list view.
pub use carnet_domain::{ContactFilters, FilterPatch};
pub use carnet_store::query::build_query;

// std
use std::sync::Arc;
// crates.io
use serde::{Deserialize, Serialize};
// self
use carnet_config::Config;
use carnet_store::{ContactStore, HttpContactStore, Session};

/// What a write operation did to the stored document.
///
/// Idempotent retries report [`ContactOp::None`] instead of failing, so
/// callers can tell a fresh write from a replay without inspecting errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactOp {
	Create,
	Update,
	Delete,
	None,
}

pub struct ContactService {
	cfg: Config,
	store: Arc<dyn ContactStore>,
}
impl ContactService {
	/// Service wired to the HTTP store, authenticating through `session`.
	pub fn new(cfg: Config, session: Arc<Session>) -> Self {
		Self { cfg, store: Arc::new(HttpContactStore::new(session)) }
	}

	/// Service over an injected store implementation.
	pub fn with_store(cfg: Config, store: Arc<dyn ContactStore>) -> Self {
		Self { cfg, store }
	}

	pub fn config(&self) -> &Config {
		&self.cfg
	}

	pub(crate) fn store_cfg(&self) -> &carnet_config::Store {
		&self.cfg.store
	}
}
