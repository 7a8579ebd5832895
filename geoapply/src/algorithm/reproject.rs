use geoapply_types::cartesian::CartesianPoint2d;
use geoapply_types::geo::Projection;
use geoapply_types::{Geom, GeometryTrait};

use crate::apply::Apply;
use crate::error::{ApplyError, ProjectionError};
use crate::options::Threading;
use crate::task_functors::TaskFunctors;
use crate::traversable::Traversable;

/// Projects every point of the value.
///
/// Every concurrency unit of the call uses its own projection from `projections`, so the number of projections must
/// be equal to the number of units of `threading`.
pub fn reproject<T, P, Pr>(
    value: T,
    projections: &mut TaskFunctors<Pr>,
    threading: Threading,
) -> Result<T, ApplyError<ProjectionError>>
where
    T: Traversable<Node = Geom<P>>,
    T::Part: Send,
    P: CartesianPoint2d<Num = f64>,
    Pr: Projection<InPoint = P, OutPoint = P> + Send,
{
    let mut transforms = projections.map_mut(|projection| {
        move |node: Geom<P>| match node {
            Geom::Point(point) => projection
                .project(&point)
                .map(Geom::Point)
                .ok_or_else(|| ProjectionError::Projection {
                    x: point.x(),
                    y: point.y(),
                }),
            other => Ok(other),
        }
    });

    Ok(Apply::new(GeometryTrait::Point)
        .threading(threading)
        .run_with_functors(&mut transforms, value)?
        .value)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    use geoapply_types::cartesian::{NewCartesianPoint2d, Point2d};
    use geoapply_types::geo::projection::WebMercator;
    use geoapply_types::impls::LineString;

    use super::*;

    #[test]
    fn web_mercator() {
        let line: Geom<Point2d> =
            LineString::new(vec![Point2d::new(0.0, 0.0), Point2d::new(180.0, 0.0)]).into();
        let mut projections = TaskFunctors::new(vec![WebMercator::<Point2d, Point2d>::default()]);
        let projected =
            reproject(line, &mut projections, Threading::Sequential).expect("projection failed");

        let Geom::LineString(line) = projected else {
            panic!("line string expected");
        };
        assert_relative_eq!(line[1].x, 20_037_508.342789244, epsilon = 1e-6);
        assert_relative_eq!(line[1].y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn functor_count_must_match() {
        let points: Vec<Geom<Point2d>> = vec![Point2d::new(0.0, 0.0).into()];
        let mut projections = TaskFunctors::new(vec![WebMercator::<Point2d, Point2d>::default()]);
        assert_matches!(
            reproject(points, &mut projections, Threading::parallel(2)),
            Err(ApplyError::TaskCountMismatch {
                functors: 1,
                tasks: 2
            })
        );
    }

    #[test]
    fn failed_point() {
        let pole: Geom<Point2d> = Point2d::new(0.0, 90.0).into();
        let mut projections = TaskFunctors::new(vec![WebMercator::<Point2d, Point2d>::default()]);
        assert_matches!(
            reproject(pole, &mut projections, Threading::Sequential),
            Err(ApplyError::Transform(ProjectionError::Projection { .. }))
        );
    }
}
