//! Source adapters: provider records in, widget payloads out.
//!
//! Each adapter borrows its provider and the dashboard token for the length
//! of one run. The per-record mapping goes through [`SourceRecord`], so the
//! list-building step is shared.

pub mod events;
pub mod social;
pub mod transit;

pub use events::{EventsAdapter, EventsOptions};
pub use social::SocialAdapter;
pub use transit::TransitAdapter;

use crate::error::AdapterError;
use crate::payload::ListItem;

/// Label/value extraction for one raw provider record.
pub trait SourceRecord {
    fn label(&self) -> String;
    fn value(&self) -> Result<String, AdapterError>;

    fn to_list_item(&self) -> Result<ListItem, AdapterError> {
        Ok(ListItem::new(self.label(), self.value()?))
    }
}

/// Map records to list items, keeping provider order. Stops at the first
/// record whose value cannot be extracted.
pub fn list_items<R: SourceRecord>(records: &[R]) -> Result<Vec<ListItem>, AdapterError> {
    records.iter().map(SourceRecord::to_list_item).collect()
}
