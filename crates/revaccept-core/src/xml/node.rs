use super::xname::{XAttribute, XName};

/// Payload of one node in an [`XmlDocument`](super::XmlDocument) arena.
#[derive(Clone, Debug)]
pub enum XmlNodeData {
    Element {
        name: XName,
        attributes: Vec<XAttribute>,
    },
    Text(String),
    Comment(String),
    ProcessingInstruction { target: String, data: String },
}

impl XmlNodeData {
    pub fn element(name: XName) -> Self {
        XmlNodeData::Element {
            name,
            attributes: vec![],
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        XmlNodeData::Text(content.into())
    }

    /// Element name; `None` for every other kind of node.
    pub fn name(&self) -> Option<&XName> {
        if let XmlNodeData::Element { name, .. } = self {
            Some(name)
        } else {
            None
        }
    }

    pub fn is_named(&self, expected: &XName) -> bool {
        self.name() == Some(expected)
    }

    /// Attributes in source order, namespace declarations included.
    pub fn attributes(&self) -> Option<&[XAttribute]> {
        if let XmlNodeData::Element { attributes, .. } = self {
            Some(attributes)
        } else {
            None
        }
    }

    pub fn attribute(&self, key: &XName) -> Option<&str> {
        self.attributes()?
            .iter()
            .find(|attr| attr.name == *key)
            .map(|attr| attr.value.as_str())
    }

    /// Character data of a text node. The parser folds CDATA sections into text.
    pub fn text_value(&self) -> Option<&str> {
        match self {
            XmlNodeData::Text(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::namespaces::W;

    #[test]
    fn attribute_lookup_is_namespace_aware() {
        let node = XmlNodeData::Element {
            name: W::footerReference(),
            attributes: vec![
                XAttribute::new(W::type_(), "default"),
                XAttribute::new(XName::local("type"), "unqualified"),
            ],
        };
        assert!(node.is_named(&W::footerReference()));
        assert_eq!(node.attribute(&W::type_()), Some("default"));
        assert_eq!(node.attribute(&XName::local("type")), Some("unqualified"));
        assert_eq!(node.attribute(&W::id()), None);
    }

    #[test]
    fn character_data_has_no_name() {
        let text = XmlNodeData::text("page 1");
        let comment = XmlNodeData::Comment("note".into());

        assert!(text.name().is_none());
        assert!(!text.is_named(&W::t()));
        assert_eq!(text.text_value(), Some("page 1"));
        assert_eq!(comment.text_value(), None);
        assert_eq!(comment.attribute(&W::id()), None);
    }
}
