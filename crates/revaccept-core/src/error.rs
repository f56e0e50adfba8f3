use thiserror::Error;

#[derive(Error, Debug)]
pub enum RevacceptError {
    #[error("Invalid OOXML package: {message}")]
    InvalidPackage { message: String },

    #[error("Missing required part '{part_name}'")]
    MissingPart { part_name: String },

    #[error("XML parsing error at {location}: {message}")]
    XmlParse { message: String, location: String },

    #[error("XML serialization error: {0}")]
    XmlWrite(String),

    #[error("Invalid relationship in '{source_part}': {message}")]
    InvalidRelationship { source_part: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, RevacceptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_part_names_the_part() {
        let err = RevacceptError::MissingPart {
            part_name: "word/document.xml".to_string(),
        };
        assert_eq!(err.to_string(), "Missing required part 'word/document.xml'");
    }

    #[test]
    fn xml_parse_includes_location() {
        let err = RevacceptError::XmlParse {
            message: "unexpected end of stream".to_string(),
            location: "word/footer1.xml, line 3".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "XML parsing error at word/footer1.xml, line 3: unexpected end of stream"
        );
    }
}
