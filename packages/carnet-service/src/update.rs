// crates.io
use serde::{Deserialize, Serialize};
// self
use crate::{ContactOp, ContactService, Error, Result};
use carnet_domain::{Contact, ContactForm, ContactPatch, validate_form};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateRequest {
	pub id: String,
	pub form: ContactForm,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateResponse {
	pub contact: Contact,
	pub op: ContactOp,
}

impl ContactService {
	pub async fn update(&self, req: UpdateRequest) -> Result<UpdateResponse> {
		let id = req.id.trim();

		if id.is_empty() {
			return Err(Error::Validation { field: "id".into() });
		}

		validate_form(&req.form)
			.map_err(|reason| Error::Validation { field: reason.field() })?;

		let patch = ContactPatch::from_form(req.form);
		let contact = self.store.update(self.store_cfg(), id, &patch).await?;

		tracing::info!(id = %contact.id, "Updated contact.");

		Ok(UpdateResponse { contact, op: ContactOp::Update })
	}
}
