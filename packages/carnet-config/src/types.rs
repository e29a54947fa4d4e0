use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub store: Store,
	pub service: Service,
	#[serde(default)]
	pub export: Export,
}

#[derive(Debug, Deserialize)]
pub struct Store {
	/// Base URL of the store's REST API, e.g. "http://localhost:3000/api".
	/// Trailing slashes are stripped during normalization.
	pub api_base: String,
	/// Collection slug under the API base.
	#[serde(default = "default_collection")]
	pub collection: String,
	pub timeout_ms: u64,
	/// Page size used when a list request does not specify one.
	#[serde(default = "default_page_limit")]
	pub page_limit: u32,
	/// Optional. Extra headers sent with every request; the auth header wins
	/// on conflict.
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Export {
	pub filename_prefix: String,
}
impl Default for Export {
	fn default() -> Self {
		Self { filename_prefix: "contacts".to_string() }
	}
}

fn default_collection() -> String {
	"contacts".to_string()
}

fn default_page_limit() -> u32 {
	20
}
