pub mod fixtures;

use std::sync::{
	Mutex, MutexGuard,
	atomic::{AtomicUsize, Ordering},
};

use time::OffsetDateTime;
use uuid::Uuid;

use carnet_config::Store as StoreConfig;
use carnet_domain::{Contact, ContactPatch, Interaction};
use carnet_store::{BoxFuture, ContactPage, ContactStore, Error, Result};

/// In-memory stand-in for the REST store. Applies patches the way the real
/// backend would (row ids assigned, `updatedAt` bumped) so tests can assert
/// against the post-write document rather than an optimistic local copy.
#[derive(Default)]
pub struct MemoryStore {
	contacts: Mutex<Vec<Contact>>,
	persist_calls: AtomicUsize,
	last_query: Mutex<Option<Vec<(String, String)>>>,
	fail_next: Mutex<Option<Error>>,
}
impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_contacts(contacts: Vec<Contact>) -> Self {
		Self { contacts: Mutex::new(contacts), ..Self::default() }
	}

	/// Mutations (create/update/delete) observed so far.
	pub fn persist_calls(&self) -> usize {
		self.persist_calls.load(Ordering::SeqCst)
	}

	pub fn last_query(&self) -> Option<Vec<(String, String)>> {
		lock(&self.last_query).clone()
	}

	/// Queues an error for the next call, whichever operation that is.
	pub fn fail_next(&self, error: Error) {
		*lock(&self.fail_next) = Some(error);
	}

	pub fn insert(&self, contact: Contact) {
		lock(&self.contacts).push(contact);
	}

	pub fn stored(&self, id: &str) -> Option<Contact> {
		lock(&self.contacts).iter().find(|contact| contact.id == id).cloned()
	}

	pub fn len(&self) -> usize {
		lock(&self.contacts).len()
	}

	pub fn is_empty(&self) -> bool {
		lock(&self.contacts).is_empty()
	}

	fn take_fault(&self) -> Option<Error> {
		lock(&self.fail_next).take()
	}
}
impl ContactStore for MemoryStore {
	fn list<'a>(
		&'a self,
		_cfg: &'a StoreConfig,
		query: &'a [(String, String)],
	) -> BoxFuture<'a, Result<ContactPage>> {
		Box::pin(async move {
			if let Some(error) = self.take_fault() {
				return Err(error);
			}

			*lock(&self.last_query) = Some(query.to_vec());

			let contacts = lock(&self.contacts).clone();
			let page = number_of(query, "page").unwrap_or(1).max(1);
			let limit = number_of(query, "limit").unwrap_or(10).max(1);
			let total_docs = contacts.len() as u64;
			let total_pages = total_docs.div_ceil(u64::from(limit)).max(1) as u32;
			let start = ((page - 1) * limit) as usize;
			let docs: Vec<Contact> =
				contacts.into_iter().skip(start).take(limit as usize).collect();

			Ok(ContactPage {
				docs,
				total_docs,
				limit,
				total_pages,
				page,
				has_prev_page: page > 1,
				has_next_page: page < total_pages,
				prev_page: (page > 1).then(|| page - 1),
				next_page: (page < total_pages).then(|| page + 1),
			})
		})
	}

	fn fetch<'a>(&'a self, _cfg: &'a StoreConfig, id: &'a str) -> BoxFuture<'a, Result<Contact>> {
		Box::pin(async move {
			if let Some(error) = self.take_fault() {
				return Err(error);
			}

			self.stored(id).ok_or_else(|| not_found(id))
		})
	}

	fn create<'a>(
		&'a self,
		_cfg: &'a StoreConfig,
		patch: &'a ContactPatch,
	) -> BoxFuture<'a, Result<Contact>> {
		Box::pin(async move {
			if let Some(error) = self.take_fault() {
				return Err(error);
			}

			self.persist_calls.fetch_add(1, Ordering::SeqCst);

			let now = OffsetDateTime::now_utc();
			let contact = Contact {
				id: Uuid::new_v4().to_string(),
				first_name: patch.first_name.clone().unwrap_or_default(),
				last_name: patch.last_name.clone().unwrap_or_default(),
				alias: patch.alias.clone(),
				organization: patch.organization.clone(),
				position: patch.position.clone(),
				email: patch.email.clone(),
				phone: patch.phone.clone(),
				sensitivity: patch.sensitivity.unwrap_or_default(),
				reliability: patch.reliability.unwrap_or_default(),
				status: patch.status.unwrap_or_default(),
				tags: patch.tags.clone().unwrap_or_default(),
				notes: patch.notes.clone(),
				interactions: assign_row_ids(patch.interactions.clone().unwrap_or_default()),
				last_contact: patch.last_contact().flatten(),
				created_at: now,
				updated_at: now,
			};

			self.insert(contact.clone());

			Ok(contact)
		})
	}

	fn update<'a>(
		&'a self,
		_cfg: &'a StoreConfig,
		id: &'a str,
		patch: &'a ContactPatch,
	) -> BoxFuture<'a, Result<Contact>> {
		Box::pin(async move {
			if let Some(error) = self.take_fault() {
				return Err(error);
			}

			self.persist_calls.fetch_add(1, Ordering::SeqCst);

			let mut contacts = lock(&self.contacts);
			let contact = contacts
				.iter_mut()
				.find(|contact| contact.id == id)
				.ok_or_else(|| not_found(id))?;

			if let Some(first_name) = &patch.first_name {
				contact.first_name = first_name.clone();
			}
			if let Some(last_name) = &patch.last_name {
				contact.last_name = last_name.clone();
			}
			if let Some(alias) = &patch.alias {
				contact.alias = Some(alias.clone());
			}
			if let Some(organization) = &patch.organization {
				contact.organization = Some(organization.clone());
			}
			if let Some(position) = &patch.position {
				contact.position = Some(position.clone());
			}
			if let Some(email) = &patch.email {
				contact.email = Some(email.clone());
			}
			if let Some(phone) = &patch.phone {
				contact.phone = Some(phone.clone());
			}
			if let Some(sensitivity) = patch.sensitivity {
				contact.sensitivity = sensitivity;
			}
			if let Some(reliability) = patch.reliability {
				contact.reliability = reliability;
			}
			if let Some(status) = patch.status {
				contact.status = status;
			}
			if let Some(tags) = &patch.tags {
				contact.tags = tags.clone();
			}
			if let Some(notes) = &patch.notes {
				contact.notes = Some(notes.clone());
			}
			if let Some(interactions) = &patch.interactions {
				contact.interactions = assign_row_ids(interactions.clone());
			}
			if let Some(derived) = patch.last_contact() {
				contact.last_contact = derived;
			}

			contact.updated_at = OffsetDateTime::now_utc();

			Ok(contact.clone())
		})
	}

	fn delete<'a>(&'a self, _cfg: &'a StoreConfig, id: &'a str) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			if let Some(error) = self.take_fault() {
				return Err(error);
			}

			self.persist_calls.fetch_add(1, Ordering::SeqCst);

			let mut contacts = lock(&self.contacts);
			let before = contacts.len();

			contacts.retain(|contact| contact.id != id);

			if contacts.len() == before {
				return Err(not_found(id));
			}

			Ok(())
		})
	}
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(|err| err.into_inner())
}

fn not_found(id: &str) -> Error {
	Error::NotFound { message: format!("No contact with id {id}.") }
}

fn number_of(query: &[(String, String)], key: &str) -> Option<u32> {
	query.iter().find(|(k, _)| k == key).and_then(|(_, v)| v.parse().ok())
}

fn assign_row_ids(interactions: Vec<Interaction>) -> Vec<Interaction> {
	interactions
		.into_iter()
		.map(|mut interaction| {
			if interaction.id.is_none() {
				interaction.id = Some(Uuid::new_v4().to_string());
			}

			interaction
		})
		.collect()
}
