pub mod ooxml;
pub mod parts;
pub mod relationships;

pub use ooxml::OoxmlPackage;
pub use parts::{PartKind, XmlPart};
pub use relationships::{relationship_types, Relationship, TargetMode};
