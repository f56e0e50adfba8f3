use crate::error::{RevacceptError, Result};
use crate::xml::XmlDocument;
use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use tracing::debug;
use zip::read::ZipArchive;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

use super::relationships::{parse_relationships, rels_part_name, relationship_types, resolve_target, Relationship};

const DEFAULT_MAIN_PART: &str = "word/document.xml";

/// Raw OPC package: zip entries kept in archive order.
pub struct OoxmlPackage {
    order: Vec<String>,
    parts: HashMap<String, Vec<u8>>,
}

impl OoxmlPackage {
    pub fn open(bytes: &[u8]) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;

        let mut order = Vec::with_capacity(archive.len());
        let mut parts = HashMap::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut content = Vec::new();
            file.read_to_end(&mut content)?;
            if parts.insert(name.clone(), content).is_none() {
                order.push(name);
            }
        }

        debug!(parts = order.len(), "opened package");
        Ok(Self { order, parts })
    }

    /// Write the package back out, substituting `replacements` for the
    /// stored bytes of the parts they name.
    pub fn save_with(&self, replacements: &HashMap<String, Vec<u8>>) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        let mut writer = ZipWriter::new(&mut buffer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for name in &self.order {
            let content = replacements
                .get(name)
                .or_else(|| self.parts.get(name))
                .map(Vec::as_slice)
                .unwrap_or_default();
            writer.start_file(name.as_str(), options)?;
            writer.write_all(content)?;
        }

        writer.finish()?;
        Ok(buffer.into_inner())
    }

    pub fn get_part(&self, name: &str) -> Option<&[u8]> {
        self.parts.get(name).map(|v| v.as_slice())
    }

    pub fn has_part(&self, name: &str) -> bool {
        self.parts.contains_key(name)
    }

    pub fn get_xml_part(&self, name: &str) -> Result<XmlDocument> {
        let bytes = self.get_part(name).ok_or_else(|| RevacceptError::MissingPart {
            part_name: name.to_string(),
        })?;
        crate::xml::parser::parse_named(bytes, name)
    }

    pub fn part_names(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    /// Relationships owned by `source_part` (`""` for the package itself).
    /// A part without a relationships part has none.
    pub fn relationships(&self, source_part: &str) -> Result<Vec<Relationship>> {
        let rels_name = rels_part_name(source_part);
        match self.get_part(&rels_name) {
            Some(bytes) => parse_relationships(bytes, &rels_name),
            None => Ok(Vec::new()),
        }
    }

    /// Name of the main document part, found through the package relationships.
    pub fn main_document_part_name(&self) -> Result<String> {
        let name = self
            .relationships("")?
            .into_iter()
            .find(|rel| rel.rel_type == relationship_types::OFFICE_DOCUMENT && rel.is_internal())
            .map(|rel| resolve_target("", &rel.target))
            .unwrap_or_else(|| DEFAULT_MAIN_PART.to_string());

        if self.has_part(&name) {
            Ok(name)
        } else {
            Err(RevacceptError::MissingPart { part_name: name })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zip_of(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut zip = ZipWriter::new(&mut buffer);
            for (name, content) in entries {
                zip.start_file(*name, SimpleFileOptions::default()).unwrap();
                zip.write_all(content.as_bytes()).unwrap();
            }
            zip.finish().unwrap();
        }
        buffer.into_inner()
    }

    #[test]
    fn save_keeps_archive_order_and_applies_replacements() {
        let bytes = zip_of(&[("[Content_Types].xml", "<Types/>"), ("b.xml", "<b/>"), ("a.xml", "<a/>")]);
        let pkg = OoxmlPackage::open(&bytes).unwrap();

        let mut replacements = HashMap::new();
        replacements.insert("b.xml".to_string(), b"<b2/>".to_vec());
        let reloaded = OoxmlPackage::open(&pkg.save_with(&replacements).unwrap()).unwrap();

        let names: Vec<_> = reloaded.part_names().cloned().collect();
        assert_eq!(names, ["[Content_Types].xml", "b.xml", "a.xml"]);
        assert_eq!(reloaded.get_part("b.xml"), Some(&b"<b2/>"[..]));
        assert_eq!(reloaded.get_part("a.xml"), Some(&b"<a/>"[..]));
    }

    #[test]
    fn main_part_from_package_relationships() {
        let rels = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="/word/main.xml"/></Relationships>"#;
        let bytes = zip_of(&[("_rels/.rels", rels), ("word/main.xml", "<w/>")]);
        let pkg = OoxmlPackage::open(&bytes).unwrap();
        assert_eq!(pkg.main_document_part_name().unwrap(), "word/main.xml");
    }

    #[test]
    fn main_part_defaults_without_package_relationships() {
        let pkg = OoxmlPackage::open(&zip_of(&[("word/document.xml", "<w/>")])).unwrap();
        assert_eq!(pkg.main_document_part_name().unwrap(), "word/document.xml");
    }

    #[test]
    fn missing_main_part_is_an_error() {
        let pkg = OoxmlPackage::open(&zip_of(&[("other.xml", "<x/>")])).unwrap();
        assert!(matches!(
            pkg.main_document_part_name(),
            Err(RevacceptError::MissingPart { .. })
        ));
    }

    #[test]
    fn part_without_rels_has_no_relationships() {
        let pkg = OoxmlPackage::open(&zip_of(&[("word/document.xml", "<w/>")])).unwrap();
        assert!(pkg.relationships("word/document.xml").unwrap().is_empty());
    }
}
