pub mod error;
pub mod package;
pub mod wml;
pub mod xml;

pub use error::{RevacceptError, Result};

pub use wml::{accept_all_revisions, ResolvedRevisions, RevisionCounts, Section, WmlDocument};
