//! Read-modify-write over a contact's embedded interaction list.
//!
//! Every operation re-reads the contact, edits the list locally and writes
//! the whole list back in one patch, so the stored `lastContact` is always
//! recomputed from the rows actually persisted. Writers take no version
//! token; two clients racing on one contact are last-write-wins.

// crates.io
use serde::{Deserialize, Serialize};
use uuid::Uuid;
// self
use crate::{ContactOp, ContactService, Error, Result};
use carnet_domain::{Contact, ContactPatch, Interaction, InteractionPatch, timeline};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddInteractionRequest {
	pub contact_id: String,
	pub interaction: Interaction,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddInteractionResponse {
	pub contact: Contact,
	pub interaction_id: String,
	pub op: ContactOp,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateInteractionRequest {
	pub contact_id: String,
	pub interaction_id: String,
	pub patch: InteractionPatch,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateInteractionResponse {
	pub contact: Contact,
	pub op: ContactOp,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteInteractionRequest {
	pub contact_id: String,
	pub interaction_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteInteractionResponse {
	pub contact: Contact,
	pub op: ContactOp,
}

impl ContactService {
	pub async fn add_interaction(
		&self,
		req: AddInteractionRequest,
	) -> Result<AddInteractionResponse> {
		let contact_id = req.contact_id.trim();

		if contact_id.is_empty() {
			return Err(Error::Validation { field: "contactId".into() });
		}
		if req.interaction.notes.trim().is_empty() {
			return Err(Error::Validation { field: "notes".into() });
		}

		let mut interaction = req.interaction;
		let interaction_id =
			interaction.id.get_or_insert_with(|| Uuid::new_v4().to_string()).clone();
		let current = self.store.fetch(self.store_cfg(), contact_id).await?;
		let mut interactions = current.interactions;

		interactions.push(interaction);

		let contact = self
			.store
			.update(self.store_cfg(), contact_id, &ContactPatch::timeline(interactions))
			.await?;

		tracing::debug!(contact = %contact.id, interaction = %interaction_id, "Logged interaction.");

		Ok(AddInteractionResponse { contact, interaction_id, op: ContactOp::Update })
	}

	pub async fn update_interaction(
		&self,
		req: UpdateInteractionRequest,
	) -> Result<UpdateInteractionResponse> {
		let contact_id = req.contact_id.trim();
		let interaction_id = req.interaction_id.trim();

		if contact_id.is_empty() {
			return Err(Error::Validation { field: "contactId".into() });
		}
		if interaction_id.is_empty() {
			return Err(Error::Validation { field: "interactionId".into() });
		}
		if let Some(notes) = &req.patch.notes
			&& notes.trim().is_empty()
		{
			return Err(Error::Validation { field: "notes".into() });
		}

		let current = self.store.fetch(self.store_cfg(), contact_id).await?;
		// The row check runs before any write; a miss must not persist.
		let index =
			timeline::find(&current.interactions, interaction_id).ok_or_else(|| Error::NotFound {
				message: format!("no interaction {interaction_id} on contact {contact_id}"),
			})?;

		if req.patch.is_empty() {
			return Ok(UpdateInteractionResponse { contact: current, op: ContactOp::None });
		}

		let mut interactions = current.interactions;

		interactions[index] = timeline::apply_patch(&interactions[index], &req.patch);

		let contact = self
			.store
			.update(self.store_cfg(), contact_id, &ContactPatch::timeline(interactions))
			.await?;

		Ok(UpdateInteractionResponse { contact, op: ContactOp::Update })
	}

	pub async fn delete_interaction(
		&self,
		req: DeleteInteractionRequest,
	) -> Result<DeleteInteractionResponse> {
		let contact_id = req.contact_id.trim();
		let interaction_id = req.interaction_id.trim();

		if contact_id.is_empty() {
			return Err(Error::Validation { field: "contactId".into() });
		}
		if interaction_id.is_empty() {
			return Err(Error::Validation { field: "interactionId".into() });
		}

		let current = self.store.fetch(self.store_cfg(), contact_id).await?;

		// Deleting an absent row is a no-op, not an error; skip the write too.
		if timeline::find(&current.interactions, interaction_id).is_none() {
			return Ok(DeleteInteractionResponse { contact: current, op: ContactOp::None });
		}

		let interactions = current
			.interactions
			.into_iter()
			.filter(|interaction| interaction.id.as_deref() != Some(interaction_id))
			.collect();
		let contact = self
			.store
			.update(self.store_cfg(), contact_id, &ContactPatch::timeline(interactions))
			.await?;

		tracing::debug!(contact = %contact.id, interaction = %interaction_id, "Removed interaction.");

		Ok(DeleteInteractionResponse { contact, op: ContactOp::Delete })
	}
}
