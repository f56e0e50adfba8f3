#![allow(non_snake_case)]

use super::xname::XName;

pub const XMLNS_NS: &str = "http://www.w3.org/2000/xmlns/";
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

pub mod W {
    use super::XName;
    pub const NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

    pub fn document() -> XName { XName::new(NS, "document") }
    pub fn body() -> XName { XName::new(NS, "body") }
    pub fn p() -> XName { XName::new(NS, "p") }
    pub fn pPr() -> XName { XName::new(NS, "pPr") }
    pub fn r() -> XName { XName::new(NS, "r") }
    pub fn t() -> XName { XName::new(NS, "t") }
    pub fn ins() -> XName { XName::new(NS, "ins") }
    pub fn del() -> XName { XName::new(NS, "del") }
    pub fn textbox() -> XName { XName::new(NS, "textbox") }
    pub fn sectPr() -> XName { XName::new(NS, "sectPr") }
    pub fn headerReference() -> XName { XName::new(NS, "headerReference") }
    pub fn footerReference() -> XName { XName::new(NS, "footerReference") }
    pub fn fldSimple() -> XName { XName::new(NS, "fldSimple") }
    pub fn type_() -> XName { XName::new(NS, "type") }
    pub fn id() -> XName { XName::new(NS, "id") }
}

/// Relationship attributes used inside parts, e.g. `r:id` on header references.
pub mod R {
    use super::XName;
    pub const NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

    pub fn id() -> XName { XName::new(NS, "id") }
}

/// Package relationship parts (`*.rels`).
pub mod PR {
    use super::XName;
    pub const NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

    pub fn relationship() -> XName { XName::new(NS, "Relationship") }
}

pub mod V {
    pub const NS: &str = "urn:schemas-microsoft-com:vml";
}

/// Conventional prefix for a namespace that has no declaration in scope.
pub fn well_known_prefix(namespace: &str) -> Option<&'static str> {
    let prefix = match namespace {
        W::NS => "w",
        R::NS => "r",
        "http://schemas.openxmlformats.org/markup-compatibility/2006" => "mc",
        V::NS => "v",
        "http://schemas.microsoft.com/office/word/2010/wordml" => "w14",
        "http://schemas.microsoft.com/office/word/2012/wordml" => "w15",
        "http://schemas.microsoft.com/office/word/2010/wordprocessingShape" => "wps",
        "http://schemas.microsoft.com/office/word/2010/wordprocessingGroup" => "wpg",
        "http://schemas.openxmlformats.org/drawingml/2006/main" => "a",
        "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" => "wp",
        "http://schemas.openxmlformats.org/drawingml/2006/picture" => "pic",
        "http://schemas.openxmlformats.org/officeDocument/2006/math" => "m",
        "urn:schemas-microsoft-com:office:office" => "o",
        XML_NS => "xml",
        _ => return None,
    };
    Some(prefix)
}
