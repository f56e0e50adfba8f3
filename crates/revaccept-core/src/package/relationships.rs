use crate::error::{RevacceptError, Result};
use crate::xml::namespaces::PR;
use crate::xml::parser::parse_named;
use crate::xml::XName;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TargetMode {
    #[default]
    Internal,
    External,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
    #[serde(default)]
    pub target_mode: TargetMode,
}

impl Relationship {
    pub fn new(id: &str, rel_type: &str, target: &str) -> Self {
        Self {
            id: id.to_string(),
            rel_type: rel_type.to_string(),
            target: target.to_string(),
            target_mode: TargetMode::Internal,
        }
    }

    pub fn is_internal(&self) -> bool {
        self.target_mode == TargetMode::Internal
    }
}

pub mod relationship_types {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const FOOTNOTES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footnotes";
    pub const ENDNOTES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/endnotes";
    pub const COMMENTS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/comments";
    pub const HEADER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/header";
    pub const FOOTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer";
}

/// Parse a `*.rels` part. `rels_part` only feeds error messages.
pub fn parse_relationships(bytes: &[u8], rels_part: &str) -> Result<Vec<Relationship>> {
    let doc = parse_named(bytes, rels_part)?;
    let Some(root) = doc.root() else {
        return Ok(Vec::new());
    };

    let id_name = XName::local("Id");
    let type_name = XName::local("Type");
    let target_name = XName::local("Target");
    let mode_name = XName::local("TargetMode");

    let relationship = PR::relationship();
    doc.elements_by_name(root, &relationship)
        .filter_map(|node| doc.get(node))
        .map(|data| {
            let attr = |name: &XName| {
                data.attribute(name).ok_or_else(|| RevacceptError::InvalidRelationship {
                    source_part: rels_part.to_string(),
                    message: format!("Relationship without {} attribute", name),
                })
            };
            Ok(Relationship {
                id: attr(&id_name)?.to_string(),
                rel_type: attr(&type_name)?.to_string(),
                target: attr(&target_name)?.to_string(),
                target_mode: match data.attribute(&mode_name) {
                    Some("External") => TargetMode::External,
                    _ => TargetMode::Internal,
                },
            })
        })
        .collect()
}

/// `word/document.xml` -> `word/_rels/document.xml.rels`; `""` (the package) -> `_rels/.rels`.
pub fn rels_part_name(source_part: &str) -> String {
    match source_part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None if source_part.is_empty() => "_rels/.rels".to_string(),
        None => format!("_rels/{}.rels", source_part),
    }
}

/// Resolve a relationship target against the part that owns the relationship,
/// producing a zip entry name (no leading slash).
pub fn resolve_target(source_part: &str, target: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    if let Some(absolute) = target.strip_prefix('/') {
        push_segments(&mut segments, absolute);
    } else {
        if let Some((dir, _)) = source_part.rsplit_once('/') {
            push_segments(&mut segments, dir);
        }
        push_segments(&mut segments, target);
    }
    segments.join("/")
}

fn push_segments<'a>(segments: &mut Vec<&'a str>, path: &'a str) {
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
}
