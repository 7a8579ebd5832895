//! Features are geometries with attached properties.

use serde::{Deserialize, Serialize};

use crate::geo::Crs;

/// A feature is an arbitrary geographic object: a geometry and a set of properties.
///
/// Transformations never touch the properties, only the geometry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Feature<G, P = ()> {
    /// Optional identifier of the feature.
    pub id: Option<String>,
    /// Geometry of the feature.
    pub geometry: G,
    /// User properties.
    pub properties: P,
}

impl<G> Feature<G> {
    /// Creates a feature without properties.
    pub fn new(geometry: G) -> Self {
        Self {
            id: None,
            geometry,
            properties: (),
        }
    }
}

impl<G, P> Feature<G, P> {
    /// Creates a feature with the given properties.
    pub fn with_properties(geometry: G, properties: P) -> Self {
        Self {
            id: None,
            geometry,
            properties,
        }
    }

    /// Sets the identifier of the feature.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Replaces the geometry, keeping the id and the properties.
    pub fn map_geometry<T>(self, f: impl FnOnce(G) -> T) -> Feature<T, P> {
        Feature {
            id: self.id,
            geometry: f(self.geometry),
            properties: self.properties,
        }
    }
}

/// Ordered set of features sharing a coordinate reference system.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeatureCollection<G, P = ()> {
    /// Features of the collection.
    pub features: Vec<Feature<G, P>>,
    /// Coordinate system of all geometries in the collection, if known.
    pub crs: Option<Crs>,
}

impl<G, P> FeatureCollection<G, P> {
    /// Creates a new collection.
    pub fn new(features: Vec<Feature<G, P>>, crs: Option<Crs>) -> Self {
        Self { features, crs }
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if the collection has no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl<G, P> From<Vec<Feature<G, P>>> for FeatureCollection<G, P> {
    fn from(features: Vec<Feature<G, P>>) -> Self {
        Self {
            features,
            crs: None,
        }
    }
}

impl<G, P> Default for FeatureCollection<G, P> {
    fn default() -> Self {
        Self {
            features: vec![],
            crs: None,
        }
    }
}
