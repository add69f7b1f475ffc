//! Inventory domain: the item record, its input validation, and the store.
//!
//! Pure in-process logic (no IO, no HTTP). The HTTP surface lives in
//! `stockroom-api` and only talks to the [`ItemStore`] trait.

pub mod filter;
pub mod item;
pub mod store;

pub use filter::ItemFilter;
pub use item::{Item, ItemDraft, ItemFields, ItemPatch};
pub use store::{InMemoryItemStore, ItemStore};
