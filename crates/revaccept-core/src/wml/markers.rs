//! Insertion and deletion markers: unwrap every `w:ins`, drop every `w:del`.

use crate::xml::arena::XmlDocument;
use crate::xml::namespaces::W;
use crate::xml::XName;
use indextree::NodeId;
use once_cell::sync::Lazy;

use super::revision::RevisionCounts;

static INS: Lazy<XName> = Lazy::new(W::ins);
static DEL: Lazy<XName> = Lazy::new(W::del);

/// Accept insertions, then remove deletions, in the subtree below `root`.
///
/// Insertions go first: unwrapping only moves content up to the marker's
/// parent, so a deletion that sat inside an insertion is still below `root`
/// when the deletion pass runs.
pub fn process_element(doc: &mut XmlDocument, root: NodeId) -> RevisionCounts {
    let insertions = accept_insertions(doc, root);
    let deletions = remove_deletions(doc, root);
    RevisionCounts {
        insertions,
        deletions,
    }
}

/// Replace every `w:ins` below `root` with its children, in place and in
/// order. Returns the number of markers unwrapped.
pub fn accept_insertions(doc: &mut XmlDocument, root: NodeId) -> usize {
    // Snapshot first. Unwrapping an outer marker moves an inner one up a
    // level; it is still in the list and gets unwrapped at its new position.
    let markers = doc.descendants_named(root, &INS);

    let mut unwrapped = 0;
    for marker in markers {
        if doc.parent(marker).is_none() {
            continue;
        }
        let children: Vec<NodeId> = doc.children(marker).collect();
        for child in children {
            doc.move_before(child, marker);
        }
        doc.remove(marker);
        unwrapped += 1;
    }
    unwrapped
}

/// Remove every `w:del` below `root` together with its content. Returns the
/// number of markers removed; one nested in another goes with the outer
/// marker and is not counted.
pub fn remove_deletions(doc: &mut XmlDocument, root: NodeId) -> usize {
    let markers = doc.descendants_named(root, &DEL);

    let mut removed = 0;
    for marker in markers {
        // Already gone with an enclosing deletion.
        if doc.is_removed(marker) {
            continue;
        }
        doc.remove_subtree(marker);
        removed += 1;
    }
    removed
}
