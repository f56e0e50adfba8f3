use crate::xml::arena::XmlDocument;
use crate::xml::namespaces::W;
use indextree::NodeId;
use serde::Serialize;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Number of insertion (`w:ins`) and deletion (`w:del`) markers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RevisionCounts {
    pub insertions: usize,
    pub deletions: usize,
}

impl RevisionCounts {
    pub fn total(&self) -> usize {
        self.insertions + self.deletions
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl Add for RevisionCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            insertions: self.insertions + other.insertions,
            deletions: self.deletions + other.deletions,
        }
    }
}

impl AddAssign for RevisionCounts {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sum for RevisionCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Markers resolved in each part, in the order the parts were first visited.
/// A part visited more than once has its counts merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedRevisions {
    parts: Vec<(String, RevisionCounts)>,
}

impl ResolvedRevisions {
    pub fn record(&mut self, part: &str, counts: RevisionCounts) {
        match self.parts.iter_mut().find(|(name, _)| name == part) {
            Some((_, existing)) => *existing += counts,
            None => self.parts.push((part.to_string(), counts)),
        }
    }

    pub fn part(&self, name: &str) -> Option<RevisionCounts> {
        self.parts
            .iter()
            .find(|(part, _)| part == name)
            .map(|(_, counts)| *counts)
    }

    pub fn parts(&self) -> &[(String, RevisionCounts)] {
        &self.parts
    }

    pub fn total(&self) -> RevisionCounts {
        self.parts.iter().map(|(_, counts)| *counts).sum()
    }

    pub fn into_parts(self) -> Vec<(String, RevisionCounts)> {
        self.parts
    }
}

/// Count markers in the subtree rooted at `start`, `start` included.
/// Markers nested inside other markers are counted too.
pub fn count_revisions(doc: &XmlDocument, start: NodeId) -> RevisionCounts {
    let ins = W::ins();
    let del = W::del();
    let mut counts = RevisionCounts::default();

    for node in doc.descendants(start) {
        if doc.is_element_named(node, &ins) {
            counts.insertions += 1;
        } else if doc.is_element_named(node, &del) {
            counts.deletions += 1;
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parser::parse;

    #[test]
    fn counts_nested_markers() {
        let doc = parse(
            r#"<w:p xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
                <w:ins><w:ins><w:r/></w:ins></w:ins>
                <w:del><w:r><w:delText>x</w:delText></w:r></w:del>
                <w:r><w:rPr><w:del/></w:rPr></w:r>
            </w:p>"#,
        )
        .unwrap();

        let counts = count_revisions(&doc, doc.root().unwrap());
        assert_eq!(counts, RevisionCounts { insertions: 2, deletions: 2 });
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn ignores_same_local_name_in_other_namespaces() {
        let doc = parse(r#"<root xmlns:x="urn:other"><x:ins/><x:del/></root>"#).unwrap();
        assert!(count_revisions(&doc, doc.root().unwrap()).is_empty());
    }

    #[test]
    fn sums_and_accumulates() {
        let a = RevisionCounts { insertions: 1, deletions: 2 };
        let b = RevisionCounts { insertions: 3, deletions: 0 };
        let mut acc = a;
        acc += b;
        assert_eq!(acc, RevisionCounts { insertions: 4, deletions: 2 });
        assert_eq!([a, b].into_iter().sum::<RevisionCounts>(), acc);
    }

    #[test]
    fn resolved_revisions_merge_repeat_visits() {
        let mut resolved = ResolvedRevisions::default();
        resolved.record("word/document.xml", RevisionCounts { insertions: 2, deletions: 1 });
        resolved.record("word/footer1.xml", RevisionCounts { insertions: 0, deletions: 1 });
        resolved.record("word/footer1.xml", RevisionCounts::default());
        resolved.record("word/document.xml", RevisionCounts { insertions: 1, deletions: 0 });

        assert_eq!(resolved.parts().len(), 2);
        assert_eq!(resolved.parts()[0].0, "word/document.xml");
        assert_eq!(
            resolved.part("word/document.xml"),
            Some(RevisionCounts { insertions: 3, deletions: 1 })
        );
        assert_eq!(resolved.part("word/header1.xml"), None);
        assert_eq!(resolved.total(), RevisionCounts { insertions: 3, deletions: 2 });
    }
}
