#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/";

/// Wrap `inner` in a root element that declares the `w` and `r` prefixes.
pub fn wml(root: &str, inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:{root} xmlns:w="{W_NS}" xmlns:r="{R_NS}">{inner}</w:{root}>"#
    )
}

/// Builds `.docx` packages in memory.
pub struct DocxBuilder {
    body: String,
    relationships: Vec<(String, String, String, bool)>,
    parts: Vec<(String, String)>,
}

impl DocxBuilder {
    pub fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
            relationships: Vec::new(),
            parts: Vec::new(),
        }
    }

    /// Add a part under `word/` reached from the main part through `rel_id`.
    /// `kind` is the last segment of the relationship type, e.g. `footnotes`.
    pub fn related(mut self, rel_id: &str, kind: &str, file_name: &str, xml: &str) -> Self {
        self.relationships
            .push((rel_id.to_string(), format!("{REL_BASE}{kind}"), file_name.to_string(), false));
        self.parts.push((format!("word/{file_name}"), xml.to_string()));
        self
    }

    /// Add a relationship whose target is not part of the package.
    pub fn dangling(mut self, rel_id: &str, kind: &str, target: &str) -> Self {
        self.relationships
            .push((rel_id.to_string(), format!("{REL_BASE}{kind}"), target.to_string(), false));
        self
    }

    pub fn external(mut self, rel_id: &str, kind: &str, target: &str) -> Self {
        self.relationships
            .push((rel_id.to_string(), format!("{REL_BASE}{kind}"), target.to_string(), true));
        self
    }

    /// Add a package entry that nothing references.
    pub fn raw(mut self, name: &str, content: &str) -> Self {
        self.parts.push((name.to_string(), content.to_string()));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let rels: String = self
            .relationships
            .iter()
            .map(|(id, rel_type, target, external)| {
                let mode = if *external { r#" TargetMode="External""# } else { "" };
                format!(r#"<Relationship Id="{id}" Type="{rel_type}" Target="{target}"{mode}/>"#)
            })
            .collect();

        let mut entries = vec![
            (
                "[Content_Types].xml".to_string(),
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/></Types>"#.to_string(),
            ),
            (
                "_rels/.rels".to_string(),
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#.to_string(),
            ),
            ("word/document.xml".to_string(), wml("document", &format!("<w:body>{}</w:body>", self.body))),
            (
                "word/_rels/document.xml.rels".to_string(),
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels}</Relationships>"#
                ),
            ),
        ];
        entries.extend(self.parts);

        let mut buffer = Cursor::new(Vec::new());
        {
            let mut zip = ZipWriter::new(&mut buffer);
            for (name, content) in entries {
                zip.start_file(name, SimpleFileOptions::default()).unwrap();
                zip.write_all(content.as_bytes()).unwrap();
            }
            zip.finish().unwrap();
        }
        buffer.into_inner()
    }
}
