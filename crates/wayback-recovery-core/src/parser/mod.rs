//! HTML parsers for archived catalogue pages
//!
//! Contains modules for parsing browse pages and item-detail pages.

pub mod item;
pub mod listing;
pub mod media;
pub mod sections;

pub use item::extract_item;
pub use listing::parse_item_links;
pub use media::parse_media_links;
pub use sections::{parse_sections, parse_title, DefinitionListStrategy, FieldStrategy, LabeledFieldStrategy};
