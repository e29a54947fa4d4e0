// crates.io
use serde::{Deserialize, Serialize};
// self
use crate::{ContactOp, ContactService, Error, Result};
use carnet_domain::{Contact, ContactForm, ContactPatch, validate_form};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateRequest {
	pub form: ContactForm,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateResponse {
	pub contact: Contact,
	pub op: ContactOp,
}

impl ContactService {
	pub async fn create(&self, req: CreateRequest) -> Result<CreateResponse> {
		validate_form(&req.form)
			.map_err(|reason| Error::Validation { field: reason.field() })?;

		let patch = ContactPatch::from_form(req.form);
		let contact = self.store.create(self.store_cfg(), &patch).await?;

		tracing::info!(id = %contact.id, "Created contact.");

		Ok(CreateResponse { contact, op: ContactOp::Create })
	}
}
