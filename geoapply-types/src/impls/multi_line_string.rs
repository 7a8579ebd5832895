use serde::{Deserialize, Serialize};

use crate::impls::line_string::LineString;

/// A set of line strings.
#[derive(Debug, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash, Deserialize, Serialize)]
pub struct MultiLineString<P>(Vec<LineString<P>>);

impl<P> MultiLineString<P> {
    /// Returns reference to the line strings.
    pub fn line_strings(&self) -> &[LineString<P>] {
        &self.0
    }

    /// Takes the line strings out.
    pub fn into_line_strings(self) -> Vec<LineString<P>> {
        self.0
    }
}

impl<P> From<Vec<LineString<P>>> for MultiLineString<P> {
    fn from(value: Vec<LineString<P>>) -> Self {
        Self(value)
    }
}
