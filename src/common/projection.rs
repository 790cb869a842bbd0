use crate::{
    common::{self, path},
    error::Result,
};

/// Attributes to return from a read.
///
/// ```rust
/// use dynamodb_movies::common::projection::Projection;
///
/// let projection = Projection::parse(["year", "title", "info.actors[0]"]).unwrap();
/// assert_eq!(projection.paths().len(), 3);
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Projection(Vec<path::AttributePath>);

impl Projection {
    /// Projection over already-built paths.
    pub fn new(paths: Vec<path::AttributePath>) -> Self {
        Self(paths)
    }

    /// Parse every path of the projection.
    pub fn parse<'a>(paths: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let paths = paths
            .into_iter()
            .map(str::parse::<path::AttributePath>)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self(paths))
    }

    /// The projected paths, in request order.
    pub fn paths(&self) -> &[path::AttributePath] {
        &self.0
    }
}

impl From<Projection> for common::ExpressionInput {
    fn from(projection: Projection) -> Self {
        let operations = projection
            .0
            .iter()
            .map(path::AttributePath::to_expression)
            .collect();
        common::ExpressionInput::merge(", ", operations)
    }
}
