// crates.io
use serde::{Deserialize, Serialize};
// self
use crate::{ContactService, Error, Result};
use carnet_domain::Contact;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FetchRequest {
	pub id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FetchResponse {
	pub contact: Contact,
}

impl ContactService {
	pub async fn fetch(&self, req: FetchRequest) -> Result<FetchResponse> {
		let id = req.id.trim();

		if id.is_empty() {
			return Err(Error::Validation { field: "id".into() });
		}

		let contact = self.store.fetch(self.store_cfg(), id).await?;

		Ok(FetchResponse { contact })
	}
}
