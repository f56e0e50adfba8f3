use crate::package::XmlPart;
use crate::xml::arena::XmlDocument;
use crate::xml::namespaces::W;
use indextree::NodeId;

use super::document::WmlDocument;

/// The related part the main document reaches through `relationship_type`.
/// `None` is the ordinary answer for a document without such a part.
pub fn locate_related_part<'a>(
    doc: &'a mut WmlDocument,
    relationship_type: &str,
) -> Option<&'a mut XmlPart> {
    let name = doc.related_part_name(relationship_type)?;
    doc.part_mut(&name)
}

/// Every `w:textbox` below `root`, in document order.
pub fn locate_textboxes(doc: &XmlDocument, root: NodeId) -> Vec<NodeId> {
    doc.descendants_named(root, &W::textbox())
}
