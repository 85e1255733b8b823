use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::FieldPathError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Dotted location of a value inside the form, e.g. `orders.2.total`.
///
/// Numeric segments address list elements; everything else is a key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Key(key.into()));
        self
    }

    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(PathSegment::Index(index));
        self
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn starts_with(&self, prefix: &FieldPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            match segment {
                PathSegment::Key(key) => f.write_str(key)?,
                PathSegment::Index(index) => write!(f, "{}", index)?,
            }
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = FieldPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(FieldPathError::Empty);
        }
        let mut path = FieldPath::new();
        for part in trimmed.split('.') {
            if part.is_empty() {
                return Err(FieldPathError::EmptySegment(trimmed.to_string()));
            }
            if part.bytes().all(|b| b.is_ascii_digit()) {
                let index = part
                    .parse::<usize>()
                    .map_err(|_| FieldPathError::InvalidIndex(part.to_string()))?;
                path = path.index(index);
            } else {
                path = path.key(part);
            }
        }
        Ok(path)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldPath, PathSegment};
    use crate::error::FieldPathError;

    #[test]
    fn display_joins_keys_and_indices_with_dots() {
        let path = FieldPath::new().key("orders").index(2).key("total");
        assert_eq!(path.to_string(), "orders.2.total");
    }

    #[test]
    fn parse_recognizes_numeric_segments_as_indices() {
        let path: FieldPath = "orders.0.title".parse().expect("parse path");
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("orders".to_string()),
                PathSegment::Index(0),
                PathSegment::Key("title".to_string()),
            ]
        );
    }

    #[test]
    fn parse_rejects_empty_segments() {
        assert_eq!("".parse::<FieldPath>(), Err(FieldPathError::Empty));
        assert!(matches!(
            "orders..total".parse::<FieldPath>(),
            Err(FieldPathError::EmptySegment(_))
        ));
    }

    #[test]
    fn starts_with_matches_prefixes() {
        let row = FieldPath::new().key("orders").index(1);
        let total = row.clone().key("total");
        assert!(total.starts_with(&row));
        assert!(!row.starts_with(&total));
    }
}
