use serde::{Deserialize, Serialize};

use crate::geo::datum::Datum;

/// Cheap classification of a coordinate reference system.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum CrsKind {
    /// Coordinates are longitude and latitude in degrees.
    Geographic,
    /// Coordinates are projected onto a plane.
    Cartesian,
    /// Nothing is known about the coordinates.
    Unknown,
}

/// Exact description of a coordinate reference system: the ellipsoid and the kind of coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize, Serialize)]
pub struct PreparedCrs {
    /// Reference ellipsoid.
    pub datum: Datum,
    /// Kind of the coordinates.
    pub kind: CrsKind,
}

/// Source of coordinate reference system metadata.
///
/// `prepared` may be expensive and can return `None` if the provider cannot resolve the exact parameters.
/// `kind` must be cheap.
pub trait CrsProvider {
    /// Exact description of the CRS, if it can be resolved.
    fn prepared(&self) -> Option<PreparedCrs>;

    /// Classification of the CRS.
    fn kind(&self) -> CrsKind;
}

/// Coordinate reference system.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Crs {
    datum: Datum,
    projection_type: ProjectionType,
}

/// Method used to project geographic coordinates of a [`Crs`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[non_exhaustive]
pub enum ProjectionType {
    /// Projection is not known.
    Unknown,
    /// Coordinates are not projected (geographic CRS).
    None,
    /// Web Mercator projection.
    WebMercator,
    /// Projection given by a `geodesy` definition string.
    Other(String),
}

impl Crs {
    /// WGS84 geographic coordinates (EPSG:4326).
    pub const WGS84: Crs = Crs {
        datum: Datum::WGS84,
        projection_type: ProjectionType::None,
    };

    /// Web Mercator (EPSG:3857).
    pub const EPSG3857: Crs = Crs {
        datum: Datum::WGS84,
        projection_type: ProjectionType::WebMercator,
    };

    /// Creates a new CRS.
    pub fn new(datum: Datum, projection_type: ProjectionType) -> Self {
        Self {
            datum,
            projection_type,
        }
    }

    /// Reference ellipsoid of the CRS.
    pub fn datum(&self) -> Datum {
        self.datum
    }

    /// Projection method of the CRS.
    pub fn projection_type(&self) -> &ProjectionType {
        &self.projection_type
    }
}

impl CrsProvider for Crs {
    fn prepared(&self) -> Option<PreparedCrs> {
        let kind = match self.projection_type {
            ProjectionType::None => CrsKind::Geographic,
            ProjectionType::WebMercator => CrsKind::Cartesian,
            ProjectionType::Unknown | ProjectionType::Other(_) => return None,
        };

        Some(PreparedCrs {
            datum: self.datum,
            kind,
        })
    }

    fn kind(&self) -> CrsKind {
        match self.projection_type {
            ProjectionType::None => CrsKind::Geographic,
            ProjectionType::WebMercator | ProjectionType::Other(_) => CrsKind::Cartesian,
            ProjectionType::Unknown => CrsKind::Unknown,
        }
    }
}

impl<T: CrsProvider> CrsProvider for Option<T> {
    fn prepared(&self) -> Option<PreparedCrs> {
        self.as_ref().and_then(CrsProvider::prepared)
    }

    fn kind(&self) -> CrsKind {
        self.as_ref().map_or(CrsKind::Unknown, CrsProvider::kind)
    }
}
