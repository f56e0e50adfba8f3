use super::relationships::relationship_types;
use crate::xml::XmlDocument;

/// The related parts of a main document that can carry tracked changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    Header,
    Footer,
    Footnotes,
    Endnotes,
    Comments,
}

impl PartKind {
    pub fn from_relationship_type(rel_type: &str) -> Option<Self> {
        match rel_type {
            relationship_types::HEADER => Some(Self::Header),
            relationship_types::FOOTER => Some(Self::Footer),
            relationship_types::FOOTNOTES => Some(Self::Footnotes),
            relationship_types::ENDNOTES => Some(Self::Endnotes),
            relationship_types::COMMENTS => Some(Self::Comments),
            _ => None,
        }
    }

    pub fn relationship_type(self) -> &'static str {
        match self {
            Self::Header => relationship_types::HEADER,
            Self::Footer => relationship_types::FOOTER,
            Self::Footnotes => relationship_types::FOOTNOTES,
            Self::Endnotes => relationship_types::ENDNOTES,
            Self::Comments => relationship_types::COMMENTS,
        }
    }
}

/// A parsed XML part of the package.
pub struct XmlPart {
    pub name: String,
    pub kind: PartKind,
    pub doc: XmlDocument,
}

impl XmlPart {
    pub fn new(name: &str, kind: PartKind, doc: XmlDocument) -> Self {
        Self {
            name: name.to_string(),
            kind,
            doc,
        }
    }
}
