use crate::error::Result;
use crate::package::{OoxmlPackage, PartKind, Relationship, XmlPart};
use crate::package::relationships::resolve_target;
use crate::xml::arena::XmlDocument;
use crate::xml::builder::serialize_bytes;
use crate::xml::namespaces::{R, W};
use crate::xml::parser::parse_named;
use indextree::NodeId;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::Write;
use tracing::{debug, warn};

use super::revision::{count_revisions, RevisionCounts};

/// Which pages of a section a header or footer applies to (`w:type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFooterType {
    Default,
    First,
    Even,
}

impl HeaderFooterType {
    fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("first") => Self::First,
            Some("even") => Self::Even,
            _ => Self::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFooterRef {
    pub kind: HeaderFooterType,
    pub part_name: String,
}

/// One `w:sectPr` of the main body with the header and footer parts it references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    pub headers: Vec<HeaderFooterRef>,
    pub footers: Vec<HeaderFooterRef>,
}

impl Section {
    pub fn header(&self, kind: HeaderFooterType) -> Option<&str> {
        self.headers
            .iter()
            .find(|r| r.kind == kind)
            .map(|r| r.part_name.as_str())
    }

    pub fn footer(&self, kind: HeaderFooterType) -> Option<&str> {
        self.footers
            .iter()
            .find(|r| r.kind == kind)
            .map(|r| r.part_name.as_str())
    }
}

/// A loaded WordprocessingML package.
///
/// The main part, the footnotes, endnotes and comments parts, and every
/// header and footer part a section references are parsed up front, so
/// malformed XML surfaces here rather than half way through resolving
/// revisions. A header or footer no section references is left in the
/// package as stored.
pub struct WmlDocument {
    package: OoxmlPackage,
    main_part_name: String,
    main: XmlDocument,
    relationships: Vec<Relationship>,
    parts: BTreeMap<String, XmlPart>,
    sections: Vec<Section>,
}

impl WmlDocument {
    /// Create a minimal WML document package from main XML content (useful for testing)
    pub fn from_main_xml(main_xml: &[u8]) -> Result<Self> {
        let mut buffer = std::io::Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buffer);
            let options = zip::write::SimpleFileOptions::default();

            zip.start_file("[Content_Types].xml", options)?;
            zip.write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#)?;

            zip.start_file("_rels/.rels", options)?;
            zip.write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#)?;

            zip.start_file("word/document.xml", options)?;
            zip.write_all(main_xml)?;

            zip.finish()?;
        }

        Self::from_bytes(&buffer.into_inner())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let package = OoxmlPackage::open(bytes)?;
        let main_part_name = package.main_document_part_name()?;
        let main = package.get_xml_part(&main_part_name)?;
        let relationships = package.relationships(&main_part_name)?;
        let referenced = section_reference_ids(&main);

        let mut parts = BTreeMap::new();
        for rel in relationships.iter().filter(|rel| rel.is_internal()) {
            let Some(kind) = PartKind::from_relationship_type(&rel.rel_type) else {
                continue;
            };
            let name = resolve_target(&main_part_name, &rel.target);
            if matches!(kind, PartKind::Header | PartKind::Footer)
                && !referenced.contains(rel.id.as_str())
            {
                debug!(part = %name, id = %rel.id, "no section references part");
                continue;
            }
            if parts.contains_key(&name) {
                continue;
            }
            let Some(bytes) = package.get_part(&name) else {
                warn!(part = %name, id = %rel.id, "relationship target missing from package");
                continue;
            };
            let doc = parse_named(bytes, &name)?;
            debug!(part = %name, ?kind, "loaded related part");
            parts.insert(name.clone(), XmlPart::new(&name, kind, doc));
        }

        let sections = find_sections(&main, &main_part_name, &relationships, &parts);
        debug!(sections = sections.len(), related_parts = parts.len(), "loaded document");

        Ok(Self {
            package,
            main_part_name,
            main,
            relationships,
            parts,
            sections,
        })
    }

    /// Serialize every parsed part back into the package.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut replacements = HashMap::with_capacity(self.parts.len() + 1);
        replacements.insert(self.main_part_name.clone(), serialize_bytes(&self.main)?);
        for (name, part) in &self.parts {
            replacements.insert(name.clone(), serialize_bytes(&part.doc)?);
        }
        self.package.save_with(&replacements)
    }

    pub fn package(&self) -> &OoxmlPackage {
        &self.package
    }

    pub fn main_part_name(&self) -> &str {
        &self.main_part_name
    }

    pub fn main_document(&self) -> &XmlDocument {
        &self.main
    }

    pub fn main_document_mut(&mut self) -> &mut XmlDocument {
        &mut self.main
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn part(&self, name: &str) -> Option<&XmlPart> {
        self.parts.get(name)
    }

    pub fn part_mut(&mut self, name: &str) -> Option<&mut XmlPart> {
        self.parts.get_mut(name)
    }

    /// Loaded related parts, ordered by part name.
    pub fn parts(&self) -> impl Iterator<Item = &XmlPart> {
        self.parts.values()
    }

    /// Part name of the first internal relationship of `rel_type`, if that part was loaded.
    pub fn related_part_name(&self, rel_type: &str) -> Option<String> {
        self.relationships
            .iter()
            .filter(|rel| rel.is_internal() && rel.rel_type == rel_type)
            .map(|rel| resolve_target(&self.main_part_name, &rel.target))
            .find(|name| self.parts.contains_key(name))
    }

    /// Revision markers left in each XML part, main part first.
    pub fn revisions_by_part(&self) -> Vec<(String, RevisionCounts)> {
        let mut counts = Vec::with_capacity(self.parts.len() + 1);
        if let Some(root) = self.main.root() {
            counts.push((self.main_part_name.clone(), count_revisions(&self.main, root)));
        }
        for (name, part) in &self.parts {
            if let Some(root) = part.doc.root() {
                counts.push((name.clone(), count_revisions(&part.doc, root)));
            }
        }
        counts
    }

    pub fn revisions(&self) -> RevisionCounts {
        self.revisions_by_part()
            .into_iter()
            .map(|(_, counts)| counts)
            .sum()
    }
}

pub fn find_document_body(doc: &XmlDocument) -> Option<NodeId> {
    let root = doc.root()?;
    doc.elements_by_name(root, &W::body()).next()
}

/// Section properties live in the last paragraph of each section (`w:pPr/w:sectPr`)
/// and, for the final section, directly in the body.
fn section_properties(doc: &XmlDocument) -> Vec<NodeId> {
    let Some(body) = find_document_body(doc) else {
        return Vec::new();
    };
    let body_name = W::body();
    let ppr_name = W::pPr();

    doc.descendants_named(body, &W::sectPr())
        .into_iter()
        .filter(|&sect_pr| {
            doc.parent(sect_pr).is_some_and(|parent| {
                doc.is_element_named(parent, &body_name) || doc.is_element_named(parent, &ppr_name)
            })
        })
        .collect()
}

/// Relationship ids of every header and footer reference in any section.
fn section_reference_ids(doc: &XmlDocument) -> HashSet<String> {
    let headers_name = W::headerReference();
    let footers_name = W::footerReference();
    let rel_id = R::id();

    section_properties(doc)
        .into_iter()
        .flat_map(|sect_pr| doc.children(sect_pr).collect::<Vec<_>>())
        .filter(|&child| {
            doc.is_element_named(child, &headers_name) || doc.is_element_named(child, &footers_name)
        })
        .filter_map(|reference| doc.get(reference)?.attribute(&rel_id).map(str::to_owned))
        .collect()
}

fn find_sections(
    doc: &XmlDocument,
    main_part_name: &str,
    relationships: &[Relationship],
    parts: &BTreeMap<String, XmlPart>,
) -> Vec<Section> {
    section_properties(doc)
        .into_iter()
        .map(|sect_pr| {
            let resolve = |reference: NodeId, kind: PartKind| {
                let data = doc.get(reference)?;
                let rel_id = data.attribute(&R::id())?;
                let rel = relationships.iter().find(|rel| rel.id == rel_id)?;
                let part_name = resolve_target(main_part_name, &rel.target);
                let part = parts.get(&part_name).filter(|part| part.kind == kind)?;
                Some(HeaderFooterRef {
                    kind: HeaderFooterType::from_attr(data.attribute(&W::type_())),
                    part_name: part.name.clone(),
                })
            };

            let headers_name = W::headerReference();
            let footers_name = W::footerReference();
            Section {
                headers: doc
                    .elements_by_name(sect_pr, &headers_name)
                    .filter_map(|r| resolve(r, PartKind::Header))
                    .collect(),
                footers: doc
                    .elements_by_name(sect_pr, &footers_name)
                    .filter_map(|r| resolve(r, PartKind::Footer))
                    .collect(),
            }
        })
        .collect()
}
