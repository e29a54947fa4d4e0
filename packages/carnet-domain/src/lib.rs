pub mod contact;
pub mod filter;
pub mod timeline;
pub mod wire;

pub use contact::{
	Contact, ContactForm, ContactPatch, ContactStatus, Interaction, InteractionKind,
	InteractionPatch, RejectReason, Reliability, Sensitivity, Tag, UnknownVariant, validate_form,
};
pub use filter::{ContactFilters, FilterPatch};
