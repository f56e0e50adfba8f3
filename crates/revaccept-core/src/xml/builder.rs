use super::arena::XmlDocument;
use super::namespaces::{well_known_prefix, XMLNS_NS, XML_NS};
use super::node::XmlNodeData;
use super::xname::{XAttribute, XName};
use crate::error::{RevacceptError, Result};
use indextree::NodeId;
use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::collections::HashMap;
use std::io::Cursor;

/// Namespace URI to prefix, `""` for the default namespace.
type NamespaceScope = HashMap<String, String>;

pub fn serialize(doc: &XmlDocument) -> Result<String> {
    into_string(serialize_bytes(doc)?)
}

/// Full part serialization with an XML declaration.
pub fn serialize_bytes(doc: &XmlDocument) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .map_err(write_error)?;

    if let Some(root) = doc.root() {
        write_node(doc, root, &mut writer, &NamespaceScope::new())?;
    }

    Ok(writer.into_inner().into_inner())
}

/// Serialize one subtree without a declaration. Prefixes are resolved
/// against the declarations of its ancestors, which are not repeated.
pub fn serialize_fragment(doc: &XmlDocument, node: NodeId) -> Result<String> {
    let mut scope = NamespaceScope::new();
    let mut ancestors: Vec<NodeId> = doc.ancestors_of(node).collect();
    ancestors.reverse();
    for ancestor in ancestors {
        if let Some(attrs) = doc.get(ancestor).and_then(|data| data.attributes()) {
            extend_scope(&mut scope, attrs);
        }
    }

    let mut writer = Writer::new(Cursor::new(Vec::new()));
    write_node(doc, node, &mut writer, &scope)?;
    into_string(writer.into_inner().into_inner())
}

fn into_string(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| RevacceptError::XmlWrite(e.to_string()))
}

fn write_error(e: impl std::fmt::Display) -> RevacceptError {
    RevacceptError::XmlWrite(e.to_string())
}

fn extend_scope(scope: &mut NamespaceScope, attributes: &[XAttribute]) {
    for attr in attributes.iter().filter(|a| a.is_namespace_declaration()) {
        let prefix = match attr.name.namespace {
            Some(_) => attr.name.local_name.clone(),
            None => String::new(),
        };
        scope.insert(attr.value.clone(), prefix);
    }
}

fn element_tag(name: &XName, scope: &NamespaceScope) -> String {
    let Some(ns) = &name.namespace else {
        return name.local_name.clone();
    };
    let prefix = scope
        .get(ns)
        .map(String::as_str)
        .or_else(|| well_known_prefix(ns))
        .unwrap_or_default();
    qualify(prefix, &name.local_name)
}

fn attribute_key(name: &XName, scope: &NamespaceScope) -> String {
    let Some(ns) = &name.namespace else {
        return name.local_name.clone();
    };
    let prefix = match ns.as_str() {
        XMLNS_NS => "xmlns",
        XML_NS => "xml",
        // Unprefixed attributes never take the default namespace.
        _ => scope
            .get(ns)
            .map(String::as_str)
            .filter(|p| !p.is_empty())
            .or_else(|| well_known_prefix(ns))
            .unwrap_or_default(),
    };
    qualify(prefix, &name.local_name)
}

fn qualify(prefix: &str, local_name: &str) -> String {
    if prefix.is_empty() {
        local_name.to_string()
    } else {
        format!("{}:{}", prefix, local_name)
    }
}

fn write_node<W: std::io::Write>(
    doc: &XmlDocument,
    node: NodeId,
    writer: &mut Writer<W>,
    scope: &NamespaceScope,
) -> Result<()> {
    let Some(data) = doc.get(node) else {
        return Ok(());
    };

    match data {
        XmlNodeData::Element { name, attributes } => {
            write_element(doc, node, name, attributes, writer, scope)?;
        }
        XmlNodeData::Text(text) => {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(write_error)?;
        }
        XmlNodeData::Comment(text) => {
            writer
                .write_event(Event::Comment(BytesText::from_escaped(text.as_str())))
                .map_err(write_error)?;
        }
        XmlNodeData::ProcessingInstruction { target, data } => {
            let content = if data.is_empty() {
                target.clone()
            } else {
                format!("{} {}", target, data)
            };
            writer
                .write_event(Event::PI(BytesPI::new(content.as_str())))
                .map_err(write_error)?;
        }
    }

    Ok(())
}

fn write_element<W: std::io::Write>(
    doc: &XmlDocument,
    node: NodeId,
    name: &XName,
    attributes: &[XAttribute],
    writer: &mut Writer<W>,
    scope: &NamespaceScope,
) -> Result<()> {
    let mut scope = scope.clone();
    extend_scope(&mut scope, attributes);

    let tag = element_tag(name, &scope);
    let mut start = BytesStart::new(tag.as_str());
    for attr in attributes {
        let key = attribute_key(&attr.name, &scope);
        start.push_attribute((key.as_str(), attr.value.as_str()));
    }

    let mut children = doc.children(node).peekable();
    if children.peek().is_none() {
        writer.write_event(Event::Empty(start)).map_err(write_error)?;
        return Ok(());
    }

    writer.write_event(Event::Start(start)).map_err(write_error)?;
    for child in children {
        write_node(doc, child, writer, &scope)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(tag.as_str())))
        .map_err(write_error)?;

    Ok(())
}
