use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: u32,
    pub col: u32,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.col)
    }
}

impl From<roxmltree::TextPos> for Location {
    fn from(pos: roxmltree::TextPos) -> Self {
        Location {
            line: pos.row,
            col: pos.col,
        }
    }
}

#[derive(Error, Debug)]
pub enum MappingError {
    #[error("XML parsing error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Invalid mapping specification: {0}")]
    InvalidSpec(String),

    #[error("No mapping named '{0}' in the mapping specification")]
    SchemaNotFound(String),
}

impl MappingError {
    pub(crate) fn invalid_at(node: roxmltree::Node<'_, '_>, message: impl std::fmt::Display) -> Self {
        let location = Location::from(node.document().text_pos_at(node.range().start));
        MappingError::InvalidSpec(format!("{} at {}", message, location))
    }
}
