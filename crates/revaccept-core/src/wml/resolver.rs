//! Accept every tracked change in a document.

use crate::package::relationship_types::{COMMENTS, ENDNOTES, FOOTNOTES};
use tracing::{debug, info, info_span};

use super::document::WmlDocument;
use super::locators::{locate_related_part, locate_textboxes};
use super::markers::process_element;
use super::revision::{ResolvedRevisions, RevisionCounts};

/// Apply all insertions and discard all deletions, in place.
///
/// Visits the main part, then each section's headers and footers, then
/// footnotes, endnotes and comments, then the text boxes of the main part.
/// Parts the document does not have are skipped. Returns the markers
/// resolved in each visited part.
pub fn accept_all_revisions(doc: &mut WmlDocument) -> ResolvedRevisions {
    let span = info_span!("accept_all_revisions", document = %doc.main_part_name());
    let _enter = span.enter();

    let mut resolved = ResolvedRevisions::default();
    process_main_part(doc, &mut resolved);
    process_sections(doc, &mut resolved);
    process_related_part(doc, FOOTNOTES, &mut resolved);
    process_related_part(doc, ENDNOTES, &mut resolved);
    process_related_part(doc, COMMENTS, &mut resolved);
    process_textboxes(doc, &mut resolved);

    let total = resolved.total();
    info!(
        insertions = total.insertions,
        deletions = total.deletions,
        "accepted all revisions"
    );
    resolved
}

fn process_main_part(doc: &mut WmlDocument, resolved: &mut ResolvedRevisions) {
    let name = doc.main_part_name().to_string();
    let main = doc.main_document_mut();
    let Some(root) = main.root() else {
        return;
    };
    let counts = process_element(main, root);
    log_part(&name, counts);
    resolved.record(&name, counts);
}

fn process_sections(doc: &mut WmlDocument, resolved: &mut ResolvedRevisions) {
    // Part names only; sections may share a header or footer part and the
    // second visit finds nothing left to do.
    let part_names: Vec<String> = doc
        .sections()
        .iter()
        .flat_map(|section| section.headers.iter().chain(section.footers.iter()))
        .map(|reference| reference.part_name.clone())
        .collect();

    for name in part_names {
        let Some(part) = doc.part_mut(&name) else {
            continue;
        };
        let Some(root) = part.doc.root() else {
            continue;
        };
        let counts = process_element(&mut part.doc, root);
        log_part(&name, counts);
        resolved.record(&name, counts);
    }
}

fn process_related_part(
    doc: &mut WmlDocument,
    relationship_type: &str,
    resolved: &mut ResolvedRevisions,
) {
    let Some(part) = locate_related_part(doc, relationship_type) else {
        debug!(relationship_type, "no related part");
        return;
    };
    let Some(root) = part.doc.root() else {
        return;
    };
    let counts = process_element(&mut part.doc, root);
    log_part(&part.name, counts);
    resolved.record(&part.name, counts);
}

fn process_textboxes(doc: &mut WmlDocument, resolved: &mut ResolvedRevisions) {
    let name = doc.main_part_name().to_string();
    let main = doc.main_document_mut();
    let Some(root) = main.root() else {
        return;
    };

    let textboxes = locate_textboxes(main, root);
    let mut total = RevisionCounts::default();
    for textbox in &textboxes {
        total += process_element(main, *textbox);
    }
    debug!(
        textboxes = textboxes.len(),
        insertions = total.insertions,
        deletions = total.deletions,
        "processed text boxes"
    );
    resolved.record(&name, total);
}

fn log_part(name: &str, counts: RevisionCounts) {
    debug!(
        part = name,
        insertions = counts.insertions,
        deletions = counts.deletions,
        "processed part"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::builder::serialize_fragment;
    use crate::xml::namespaces::W;
    use pretty_assertions::assert_eq;

    fn document(body: &str) -> WmlDocument {
        let xml = format!(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );
        WmlDocument::from_main_xml(xml.as_bytes()).unwrap()
    }

    fn first_paragraph(doc: &WmlDocument) -> String {
        let main = doc.main_document();
        let para = main.descendants_named(main.root().unwrap(), &W::p())[0];
        serialize_fragment(main, para).unwrap()
    }

    #[test]
    fn resolves_body_without_related_parts() {
        let mut doc = document(
            "<w:p><w:ins><w:r>Hello</w:r></w:ins><w:del><w:r>Old</w:r></w:del><w:r> World</w:r></w:p>",
        );

        let resolved = accept_all_revisions(&mut doc);

        assert_eq!(first_paragraph(&doc), "<w:p><w:r>Hello</w:r><w:r> World</w:r></w:p>");
        assert_eq!(resolved.total(), RevisionCounts { insertions: 1, deletions: 1 });
        assert_eq!(resolved.parts().len(), 1);
        assert!(doc.revisions().is_empty());
    }

    #[test]
    fn textbox_content_is_resolved() {
        let mut doc = document(
            "<w:p><w:r><w:pict><w:textbox><w:p><w:ins><w:r><w:t>boxed</w:t></w:r></w:ins><w:del><w:r/></w:del></w:p></w:textbox></w:pict></w:r></w:p>",
        );

        accept_all_revisions(&mut doc);

        let main = doc.main_document();
        assert!(doc.revisions().is_empty());
        assert_eq!(main.text(main.root().unwrap()), "boxed");
    }

    #[test]
    fn running_twice_changes_nothing() {
        let mut doc = document("<w:p><w:ins><w:ins><w:r/></w:ins></w:ins><w:del/></w:p>");

        accept_all_revisions(&mut doc);
        let once = first_paragraph(&doc);
        let second = accept_all_revisions(&mut doc);

        assert_eq!(first_paragraph(&doc), once);
        assert!(second.total().is_empty());
        assert_eq!(once, "<w:p><w:r/></w:p>");
    }

    #[test]
    fn nested_deletion_is_resolved_once() {
        let mut doc = document("<w:p><w:ins><w:r/></w:ins><w:del><w:del><w:r/></w:del></w:del></w:p>");
        assert_eq!(doc.revisions(), RevisionCounts { insertions: 1, deletions: 2 });

        let resolved = accept_all_revisions(&mut doc);

        assert_eq!(resolved.total(), RevisionCounts { insertions: 1, deletions: 1 });
        assert_eq!(
            resolved.part("word/document.xml"),
            Some(RevisionCounts { insertions: 1, deletions: 1 })
        );
        assert_eq!(first_paragraph(&doc), "<w:p><w:r/></w:p>");
    }
}
