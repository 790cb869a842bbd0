use crate::{
    common,
    error::{Error, Result},
};

use std::{collections, fmt, str};

/// Separator for nested members.
const PATH_SEPARATOR: &str = ".";

/// One step of an attribute path.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum PathElement {
    /// A top-level attribute or a member of a map.
    Member(String),
    /// An element of a list, zero-based.
    Index(usize),
}

/// Path to an attribute, possibly nested inside maps and lists.
///
/// ```rust
/// use dynamodb_movies::common::path::AttributePath;
///
/// let parsed: AttributePath = "info.actors[0]".parse().unwrap();
/// let built = AttributePath::new("info").member("actors").index(0);
/// assert_eq!(parsed, built);
/// assert_eq!(built.to_string(), "info.actors[0]");
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct AttributePath(Vec<PathElement>);

impl AttributePath {
    /// Path to a top-level attribute.
    pub fn new(name: impl Into<String>) -> Self {
        Self(vec![PathElement::Member(name.into())])
    }

    /// Descend into a map member.
    pub fn member(mut self, name: impl Into<String>) -> Self {
        self.0.push(PathElement::Member(name.into()));
        self
    }

    /// Descend into a list element.
    pub fn index(mut self, index: usize) -> Self {
        self.0.push(PathElement::Index(index));
        self
    }

    /// The elements of the path, outermost first.
    pub fn elements(&self) -> &[PathElement] {
        &self.0
    }

    /// Name of the innermost member, used to label value placeholders.
    pub(crate) fn label(&self) -> &str {
        self.0
            .iter()
            .rev()
            .find_map(|element| match element {
                PathElement::Member(name) => Some(name.as_str()),
                PathElement::Index(_) => None,
            })
            .unwrap_or_default()
    }

    pub(crate) fn to_expression(&self) -> common::ExpressionInput {
        let mut expression = String::new();
        let mut expression_attribute_names = collections::HashMap::new();
        for element in &self.0 {
            match element {
                PathElement::Member(name) => {
                    let placeholder = format!("#{name}");
                    if !expression.is_empty() {
                        expression.push_str(PATH_SEPARATOR);
                    }
                    expression.push_str(&placeholder);
                    expression_attribute_names.insert(placeholder, name.clone());
                }
                PathElement::Index(index) => expression.push_str(&format!("[{index}]")),
            }
        }
        common::ExpressionInput {
            expression,
            expression_attribute_names,
            ..Default::default()
        }
    }
}

impl str::FromStr for AttributePath {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let invalid = |reason| Error::InvalidPath {
            path: text.to_string(),
            reason,
        };
        let mut elements = Vec::new();
        for segment in text.split(PATH_SEPARATOR) {
            let (name, mut rest) = match segment.find('[') {
                Some(position) => segment.split_at(position),
                None => (segment, ""),
            };
            if name.is_empty() {
                return Err(invalid("empty member name"));
            }
            elements.push(PathElement::Member(name.to_string()));
            while !rest.is_empty() {
                let inner = rest
                    .strip_prefix('[')
                    .ok_or_else(|| invalid("unexpected text after index"))?;
                let (digits, remainder) = inner
                    .split_once(']')
                    .ok_or_else(|| invalid("unterminated index"))?;
                let index = digits.parse().map_err(|_| invalid("invalid index"))?;
                elements.push(PathElement::Index(index));
                rest = remainder;
            }
        }
        Ok(Self(elements))
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, element) in self.0.iter().enumerate() {
            match element {
                PathElement::Member(name) if position == 0 => write!(f, "{name}")?,
                PathElement::Member(name) => write!(f, "{PATH_SEPARATOR}{name}")?,
                PathElement::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}
