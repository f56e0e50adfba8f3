mod document;
mod locators;
mod markers;
mod resolver;
mod revision;

pub use document::{find_document_body, HeaderFooterRef, HeaderFooterType, Section, WmlDocument};
pub use locators::{locate_related_part, locate_textboxes};
pub use markers::{accept_insertions, process_element, remove_deletions};
pub use resolver::accept_all_revisions;
pub use revision::{count_revisions, ResolvedRevisions, RevisionCounts};
