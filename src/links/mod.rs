//! Link module for extraction and resolution.

pub mod extract;
pub mod record;
pub mod subpages;

pub use extract::{all_links, extract_links, LinkFilter};
pub use record::LinkRecord;
pub use subpages::{collect_subpages, is_subpage, manifest_path, SUBPAGE_MANIFEST};
