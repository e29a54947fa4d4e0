// crates.io
use serde::{Deserialize, Serialize};
// self
use crate::{ContactService, Result};
use carnet_domain::{Contact, ContactFilters};
use carnet_store::query;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ListRequest {
	pub filters: ContactFilters,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListResponse {
	pub items: Vec<Contact>,
	pub total: u64,
	pub page: u32,
	pub page_size: u32,
	pub total_pages: u32,
	pub has_prev: bool,
	pub has_next: bool,
}

impl ContactService {
	pub async fn list(&self, req: ListRequest) -> Result<ListResponse> {
		let mut filters = req.filters;

		// A zero limit asks for the configured page size.
		if filters.limit == 0 {
			filters.limit = self.cfg.store.page_limit;
		}

		let query = query::build_query(&filters)?;

		tracing::debug!(pairs = query.len(), page = filters.page, "Built contact query.");

		let page = self.store.list(self.store_cfg(), &query).await?;

		Ok(ListResponse {
			items: page.docs,
			total: page.total_docs,
			page: page.page,
			page_size: page.limit,
			total_pages: page.total_pages,
			has_prev: page.has_prev_page,
			has_next: page.has_next_page,
		})
	}
}
