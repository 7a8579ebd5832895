use geo::{Area, BooleanOps, Intersects};
use geoapply_types::cartesian::NewCartesianPoint2d;
use geoapply_types::impls::{MultiPolygon, Polygon};
use geoapply_types::{Geom, GeometryTrait, TraitTarget};
use serde::{Deserialize, Serialize};

use super::{DegenerateGeometry, Diagnostics, GeometryCorrection};

/// What to do with polygons of near zero area.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum SliverPolicy {
    /// Slivers stay in the output as they are.
    Keep,
    /// Slivers are removed from the output.
    #[default]
    Drop,
}

/// Configuration of overlap resolution in multipolygons.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct IntersectionConfig {
    /// Polygons and overlaps with an area not larger than this are slivers. Slivers never take part in boolean
    /// operations.
    pub sliver_area: f64,
    /// Treatment of slivers.
    pub sliver_policy: SliverPolicy,
}

impl Default for IntersectionConfig {
    fn default() -> Self {
        Self {
            sliver_area: 1e-10,
            sliver_policy: SliverPolicy::Drop,
        }
    }
}

impl IntersectionConfig {
    /// Sets the sliver area threshold.
    pub fn with_sliver_area(mut self, sliver_area: f64) -> Self {
        self.sliver_area = sliver_area;
        self
    }

    /// Sets the sliver policy.
    pub fn with_sliver_policy(mut self, sliver_policy: SliverPolicy) -> Self {
        self.sliver_policy = sliver_policy;
        self
    }
}

#[derive(Debug, Copy, Clone)]
enum Resolution {
    Difference,
    Union,
}

/// Resolves overlapping polygons of a multipolygon by subtracting every polygon from the ones after it.
///
/// Earlier polygons win: the output has the first polygon intact, the second one without the area covered by the
/// first one, and so on.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct DiffIntersectingPolygons {
    config: IntersectionConfig,
}

impl DiffIntersectingPolygons {
    /// Creates a new correction.
    pub fn new(config: IntersectionConfig) -> Self {
        Self { config }
    }
}

impl<P> GeometryCorrection<P> for DiffIntersectingPolygons
where
    P: NewCartesianPoint2d<f64> + Clone + Send + Sync,
{
    fn name(&self) -> &'static str {
        "DiffIntersectingPolygons"
    }

    fn target(&self) -> TraitTarget {
        GeometryTrait::MultiPolygon.into()
    }

    fn correct(&self, geometry: Geom<P>, diagnostics: &Diagnostics) -> Geom<P> {
        match geometry {
            Geom::MultiPolygon(polygons) => Geom::MultiPolygon(resolve(
                polygons,
                Resolution::Difference,
                &self.config,
                GeometryCorrection::<P>::name(self),
                diagnostics,
            )),
            other => other,
        }
    }
}

/// Resolves overlapping polygons of a multipolygon by merging them.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct UnionIntersectingPolygons {
    config: IntersectionConfig,
}

impl UnionIntersectingPolygons {
    /// Creates a new correction.
    pub fn new(config: IntersectionConfig) -> Self {
        Self { config }
    }
}

impl<P> GeometryCorrection<P> for UnionIntersectingPolygons
where
    P: NewCartesianPoint2d<f64> + Clone + Send + Sync,
{
    fn name(&self) -> &'static str {
        "UnionIntersectingPolygons"
    }

    fn target(&self) -> TraitTarget {
        GeometryTrait::MultiPolygon.into()
    }

    fn correct(&self, geometry: Geom<P>, diagnostics: &Diagnostics) -> Geom<P> {
        match geometry {
            Geom::MultiPolygon(polygons) => Geom::MultiPolygon(resolve(
                polygons,
                Resolution::Union,
                &self.config,
                GeometryCorrection::<P>::name(self),
                diagnostics,
            )),
            other => other,
        }
    }
}

fn resolve<P>(
    polygons: MultiPolygon<P>,
    resolution: Resolution,
    config: &IntersectionConfig,
    correction: &'static str,
    diagnostics: &Diagnostics,
) -> MultiPolygon<P>
where
    P: NewCartesianPoint2d<f64> + Clone,
{
    let converted: Vec<geo::Polygon<f64>> =
        polygons.parts().iter().map(geo::Polygon::from).collect();

    let mut solid = vec![];
    let mut slivers = vec![];
    for (index, polygon) in converted.iter().enumerate() {
        let area = polygon.unsigned_area();
        if area > config.sliver_area {
            solid.push(index);
        } else {
            diagnostics.report(DegenerateGeometry {
                correction,
                geometry_trait: GeometryTrait::Polygon,
                reason: format!("polygon {index} has area {area}"),
            });
            slivers.push(index);
        }
    }

    if !has_overlaps(&converted, &solid, config.sliver_area) {
        if slivers.is_empty() || config.sliver_policy == SliverPolicy::Keep {
            return polygons;
        }

        return polygons
            .parts
            .into_iter()
            .enumerate()
            .filter(|(index, _)| solid.contains(index))
            .map(|(_, polygon)| polygon)
            .collect::<Vec<_>>()
            .into();
    }

    log::debug!(
        "{correction}: resolving overlaps between {} polygons",
        solid.len()
    );

    let operands = solid.iter().map(|&index| converted[index].clone());
    let resolved = match resolution {
        Resolution::Difference => difference(operands),
        Resolution::Union => union(operands),
    };

    let mut parts: Vec<Polygon<P>> = resolved
        .0
        .into_iter()
        .filter(|polygon| {
            config.sliver_policy == SliverPolicy::Keep
                || polygon.unsigned_area() > config.sliver_area
        })
        .map(Polygon::from)
        .collect();

    if config.sliver_policy == SliverPolicy::Keep {
        parts.extend(slivers.iter().map(|&index| polygons.parts[index].clone()));
    }

    MultiPolygon::from(parts)
}

fn has_overlaps(polygons: &[geo::Polygon<f64>], indices: &[usize], sliver_area: f64) -> bool {
    indices.iter().enumerate().any(|(position, &i)| {
        indices[position + 1..].iter().any(|&j| {
            let (a, b) = (&polygons[i], &polygons[j]);
            a.intersects(b) && a.intersection(b).unsigned_area() > sliver_area
        })
    })
}

fn difference(polygons: impl Iterator<Item = geo::Polygon<f64>>) -> geo::MultiPolygon<f64> {
    let mut covered = geo::MultiPolygon::new(vec![]);
    let mut pieces = vec![];
    for polygon in polygons {
        let polygon = geo::MultiPolygon::new(vec![polygon]);
        pieces.extend(polygon.difference(&covered).0);
        covered = covered.union(&polygon);
    }

    geo::MultiPolygon::new(pieces)
}

fn union(polygons: impl Iterator<Item = geo::Polygon<f64>>) -> geo::MultiPolygon<f64> {
    polygons.fold(geo::MultiPolygon::new(vec![]), |acc, polygon| {
        acc.union(&geo::MultiPolygon::new(vec![polygon]))
    })
}
