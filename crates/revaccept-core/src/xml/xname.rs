use std::fmt;

use super::namespaces::XMLNS_NS;

/// Namespace-qualified element or attribute name. An empty namespace is
/// stored as `None`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct XName {
    pub namespace: Option<String>,
    pub local_name: String,
}

impl XName {
    pub fn new(namespace: &str, local_name: impl Into<String>) -> Self {
        XName {
            namespace: Some(namespace).filter(|ns| !ns.is_empty()).map(str::to_owned),
            local_name: local_name.into(),
        }
    }

    pub fn local(local_name: impl Into<String>) -> Self {
        XName {
            namespace: None,
            local_name: local_name.into(),
        }
    }

    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.local_name == local_name && self.namespace.as_deref() == Some(namespace)
    }
}

/// Clark notation, `{namespace}local`.
impl fmt::Display for XName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ns) = &self.namespace {
            write!(f, "{{{ns}}}")?;
        }
        f.write_str(&self.local_name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XAttribute {
    pub name: XName,
    pub value: String,
}

impl XAttribute {
    pub fn new(name: XName, value: impl Into<String>) -> Self {
        XAttribute {
            name,
            value: value.into(),
        }
    }

    /// `xmlns` or `xmlns:prefix` declaration carried as an attribute.
    pub fn is_namespace_declaration(&self) -> bool {
        match self.name.namespace.as_deref() {
            None => self.name.local_name == "xmlns",
            Some(ns) => ns == XMLNS_NS,
        }
    }
}
