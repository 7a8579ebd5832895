use approx::assert_relative_eq;
use geoapply::algorithm::{area, length, reproject};
use geoapply::{TaskFunctors, Threading};
use geoapply_types::cartesian::{NewCartesianPoint2d, Point2d};
use geoapply_types::geo::projection::WebMercator;
use geoapply_types::geo::{Crs, Manifold};
use geoapply_types::impls::{LineString, Polygon};
use geoapply_types::{Feature, FeatureCollection, Geom};

fn country() -> Geom<Point2d> {
    Polygon::from(vec![
        Point2d::new(2.0, 45.0),
        Point2d::new(8.0, 45.0),
        Point2d::new(8.0, 50.0),
        Point2d::new(5.0, 51.0),
        Point2d::new(2.0, 49.0),
    ])
    .into()
}

#[test]
fn results_depend_on_manifold_only() {
    for manifold in [Manifold::Planar, Manifold::spherical(), Manifold::geodesic()] {
        let first = area(country(), manifold).expect("area");
        let second = area(country(), manifold).expect("area");
        assert_eq!(first, second);
        assert_eq!(
            length(country(), manifold).expect("length"),
            length(country(), manifold).expect("length")
        );
    }

    assert_ne!(
        area(country(), Manifold::Planar).expect("area"),
        area(country(), Manifold::spherical()).expect("area")
    );
}

#[test]
fn spherical_area_scales_with_radius_squared() {
    let unit = area(country(), Manifold::sphere(1.0)).expect("area");
    for radius in [2.0, 10.0, 6_371_008.8] {
        assert_relative_eq!(
            area(country(), Manifold::sphere(radius)).expect("area"),
            unit * radius * radius,
            max_relative = 1e-12
        );
    }
}

#[test]
fn manifold_from_collection_crs() {
    let collection = FeatureCollection::new(vec![Feature::new(country())], Some(Crs::WGS84));
    let manifold = Manifold::for_crs(&collection.crs);
    assert_eq!(manifold, Manifold::geodesic());
    let on_ellipsoid = area(collection, manifold).expect("area");
    assert!(on_ellipsoid > 1.0e11 && on_ellipsoid < 3.0e11);
}

#[test]
fn parallel_reprojection() {
    let lines: Vec<Geom<Point2d>> = (0..50)
        .map(|i| {
            LineString::new(vec![Point2d::new(i as f64, 0.0), Point2d::new(0.0, i as f64)]).into()
        })
        .collect();

    let mut single = TaskFunctors::new(vec![WebMercator::<Point2d, Point2d>::default()]);
    let sequential =
        reproject(lines.clone(), &mut single, Threading::Sequential).expect("reprojection failed");

    let mut projections = TaskFunctors::from_fn(4, |_| WebMercator::<Point2d, Point2d>::default());
    let parallel =
        reproject(lines, &mut projections, Threading::parallel(4)).expect("reprojection failed");

    assert_eq!(parallel, sequential);
    assert_relative_eq!(
        length(parallel[1].clone(), Manifold::Planar).expect("length"),
        length(sequential[1].clone(), Manifold::Planar).expect("length")
    );
}

#[cfg(feature = "geodesy")]
#[test]
fn parallel_reprojection_with_geodesy() {
    use geoapply_types::geo::projection::GeodesyProjection;

    let mercator =
        || GeodesyProjection::<Point2d, Point2d>::new("merc").expect("invalid definition");
    let lines: Vec<Geom<Point2d>> = (0..40)
        .map(|i| {
            let offset = i as f64 / 4.0;
            LineString::new(vec![
                Point2d::new(offset, 0.0),
                Point2d::new(10.0, 50.0 + offset),
            ])
            .into()
        })
        .collect();

    let mut single = TaskFunctors::new(vec![mercator()]);
    let sequential =
        reproject(lines.clone(), &mut single, Threading::Sequential).expect("reprojection failed");

    let mut projections = TaskFunctors::from_fn(3, |_| mercator());
    let parallel =
        reproject(lines, &mut projections, Threading::parallel(3)).expect("reprojection failed");

    assert_eq!(parallel.len(), 40);
    assert_eq!(parallel, sequential);

    let Geom::LineString(first) = &parallel[0] else {
        panic!("line string expected");
    };
    assert_relative_eq!(first[0].x, 0.0, epsilon = 1e-6);
    assert_relative_eq!(first[0].y, 0.0, epsilon = 1e-6);
    assert_relative_eq!(first[1].x, 1_113_194.91, epsilon = 0.01);
}
