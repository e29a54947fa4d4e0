// crates.io
use serde::{Deserialize, Serialize};
// self
use crate::{ContactOp, ContactService, Error, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteRequest {
	pub id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
	pub id: String,
	pub op: ContactOp,
}

impl ContactService {
	pub async fn delete(&self, req: DeleteRequest) -> Result<DeleteResponse> {
		let id = req.id.trim();

		if id.is_empty() {
			return Err(Error::Validation { field: "id".into() });
		}

		match self.store.delete(self.store_cfg(), id).await {
			Ok(()) => {
				tracing::info!(%id, "Deleted contact.");

				Ok(DeleteResponse { id: id.to_owned(), op: ContactOp::Delete })
			},
			// A replayed delete finds nothing; the document is gone either way.
			Err(carnet_store::Error::NotFound { .. }) =>
				Ok(DeleteResponse { id: id.to_owned(), op: ContactOp::None }),
			Err(err) => Err(err.into()),
		}
	}
}
