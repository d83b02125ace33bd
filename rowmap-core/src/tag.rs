use std::fmt::{self, Display};

/// Modifier following the column name in a field tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagModifier {
    /// `omitempty`, recognised but without effect on fetching.
    OmitEmpty,
    Other(String),
}

impl From<&str> for TagModifier {
    fn from(value: &str) -> Self {
        match value {
            "omitempty" => TagModifier::OmitEmpty,
            v => TagModifier::Other(v.into()),
        }
    }
}

impl Display for TagModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagModifier::OmitEmpty => f.write_str("omitempty"),
            TagModifier::Other(v) => f.write_str(v),
        }
    }
}

/// Column tag of a record field: `column[,modifier]*`.
///
/// ```rust
/// use rowmap_core::{Tag, TagModifier};
/// let tag = Tag::parse("user_id,omitempty");
/// assert_eq!(tag.column(), "user_id");
/// assert_eq!(tag.modifiers(), &[TagModifier::OmitEmpty]);
/// assert!(Tag::parse("-").is_excluded());
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    column: String,
    modifiers: Vec<TagModifier>,
}

impl Tag {
    pub fn parse(tag: &str) -> Self {
        let mut segments = tag.split(',');
        let column = segments.next().unwrap_or_default().trim().to_string();
        let modifiers = segments
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(Into::into)
            .collect();
        Self { column, modifiers }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn modifiers(&self) -> &[TagModifier] {
        &self.modifiers
    }

    pub fn has_modifier(&self, modifier: &TagModifier) -> bool {
        self.modifiers.contains(modifier)
    }

    /// Fields tagged `-` or `_` are never bound.
    pub fn is_excluded(&self) -> bool {
        matches!(self.column.as_str(), "-" | "_")
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.column)?;
        for modifier in &self.modifiers {
            write!(f, ",{}", modifier)?;
        }
        Ok(())
    }
}
