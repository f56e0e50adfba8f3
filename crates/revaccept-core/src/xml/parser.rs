use super::arena::XmlDocument;
use super::namespaces::{XMLNS_NS, XML_NS};
use super::node::XmlNodeData;
use super::xname::{XAttribute, XName};
use crate::error::{RevacceptError, Result};

pub fn parse(xml: &str) -> Result<XmlDocument> {
    parse_named(xml.as_bytes(), "input")
}

pub fn parse_bytes(bytes: &[u8]) -> Result<XmlDocument> {
    parse_named(bytes, "input")
}

/// Parse a package part. `part_name` only feeds error locations.
pub fn parse_named(bytes: &[u8], part_name: &str) -> Result<XmlDocument> {
    let text = std::str::from_utf8(strip_bom(bytes)).map_err(|e| RevacceptError::XmlParse {
        message: e.to_string(),
        location: part_name.to_string(),
    })?;

    let doc = roxmltree::Document::parse_with_options(
        text,
        roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        },
    )
    .map_err(|e| RevacceptError::XmlParse {
        message: e.to_string(),
        location: format!("{}, line {}", part_name, e.pos().row),
    })?;

    let mut xml_doc = XmlDocument::new();
    build_tree(doc.root_element(), &mut xml_doc, None);
    Ok(xml_doc)
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
}

fn build_tree(node: roxmltree::Node, doc: &mut XmlDocument, parent: Option<indextree::NodeId>) {
    let node_data = match node.node_type() {
        roxmltree::NodeType::Element => {
            let name = XName::new(
                node.tag_name().namespace().unwrap_or(""),
                node.tag_name().name(),
            );

            let mut attributes = declared_namespaces(node);
            attributes.extend(node.attributes().map(|attr| {
                XAttribute::new(
                    XName::new(attr.namespace().unwrap_or(""), attr.name()),
                    attr.value(),
                )
            }));

            XmlNodeData::Element { name, attributes }
        }
        roxmltree::NodeType::Text => match node.text() {
            Some(text) => XmlNodeData::Text(text.to_string()),
            None => return,
        },
        roxmltree::NodeType::Comment => match node.text() {
            Some(text) => XmlNodeData::Comment(text.to_string()),
            None => return,
        },
        roxmltree::NodeType::PI => {
            let Some(pi) = node.pi() else { return };
            XmlNodeData::ProcessingInstruction {
                target: pi.target.to_string(),
                data: pi.value.unwrap_or_default().to_string(),
            }
        }
        roxmltree::NodeType::Root => return,
    };

    let new_id = match parent {
        Some(parent_id) => doc.add_child(parent_id, node_data),
        None => doc.add_root(node_data),
    };

    for child in node.children() {
        build_tree(child, doc, Some(new_id));
    }
}

/// roxmltree reports the whole in-scope namespace set for every element.
/// Keep only the declarations this element adds relative to its parent.
/// The implicit `xml` binding is never written out.
fn declared_namespaces(node: roxmltree::Node) -> Vec<XAttribute> {
    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|parent| parent.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();

    node.namespaces()
        .filter(|ns| ns.uri() != XML_NS)
        .filter(|ns| !inherited.contains(&(ns.name(), ns.uri())))
        .map(|ns| match ns.name() {
            Some(prefix) => XAttribute::new(XName::new(XMLNS_NS, prefix), ns.uri()),
            None => XAttribute::new(XName::local("xmlns"), ns.uri()),
        })
        .collect()
}
