use geoapply::correction::{
    ClosedRing, CorrectionPipeline, DiffIntersectingPolygons, IntersectionConfig, SliverPolicy,
    UnionIntersectingPolygons,
};
use geoapply::Threading;
use geoapply_types::cartesian::{NewCartesianPoint2d, Point2d};
use geoapply_types::impls::{LineString, LinearRing, MultiPolygon, Polygon};
use geoapply_types::{Feature, FeatureCollection, Geom, GeometryTrait};

fn ring(coords: &[(f64, f64)]) -> LinearRing<Point2d> {
    LinearRing::new(coords.iter().map(|&(x, y)| Point2d::new(x, y)).collect())
}

fn open_square(x: f64, y: f64, size: f64) -> Polygon<Point2d> {
    Polygon::new(
        ring(&[(x, y), (x + size, y), (x + size, y + size), (x, y + size)]),
        vec![],
    )
}

fn input() -> FeatureCollection<Geom<Point2d>> {
    FeatureCollection::from(vec![
        Feature::new(
            MultiPolygon::from(vec![open_square(0.0, 0.0, 2.0), open_square(1.0, 1.0, 2.0)])
                .into(),
        ),
        Feature::new(LineString::new(vec![Point2d::new(0.0, 0.0), Point2d::new(5.0, 5.0)]).into()),
        Feature::new(Geom::Collection(vec![
            Point2d::new(1.0, 1.0).into(),
            open_square(10.0, 10.0, 1.0).into(),
            Polygon::new(ring(&[(0.0, 0.0), (1.0, 1.0)]), vec![]).into(),
        ])),
    ])
}

fn pipeline() -> CorrectionPipeline {
    CorrectionPipeline::new()
        .with_correction(ClosedRing)
        .with_correction(UnionIntersectingPolygons::default())
}

#[test]
fn closed_ring_example() {
    let report = CorrectionPipeline::new()
        .with_correction(ClosedRing)
        .fix(Geom::LinearRing(ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])))
        .expect("correction failed");

    assert!(report.is_clean());
    assert_eq!(
        report.value,
        Geom::LinearRing(ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]))
    );
}

#[test]
fn pipeline_is_idempotent() {
    let _ = env_logger::builder().is_test(true).try_init();

    let once = pipeline().fix(input()).expect("correction failed");
    assert_eq!(once.diagnostics.len(), 1);
    assert_eq!(once.diagnostics[0].geometry_trait, GeometryTrait::LinearRing);

    let Geom::MultiPolygon(merged) = &once.value.features[0].geometry else {
        panic!("multipolygon expected");
    };
    assert_eq!(merged.parts().len(), 1);

    let twice = pipeline().fix(once.value.clone()).expect("correction failed");
    assert_eq!(twice.value, once.value);
}

#[test]
fn parallel_pipeline_matches_sequential() {
    let features: Vec<_> = (0..30).flat_map(|_| input().features).collect();
    let sequential = pipeline().fix(features.clone()).expect("correction failed");
    let parallel = pipeline()
        .with_threading(Threading::parallel(4))
        .fix(features)
        .expect("correction failed");

    assert_eq!(parallel.value, sequential.value);
    assert_eq!(parallel.diagnostics.len(), sequential.diagnostics.len());
}

#[test]
fn unreachable_corrections_are_skipped() {
    let lines: Vec<Geom<Point2d>> =
        vec![LineString::new(vec![Point2d::new(0.0, 0.0), Point2d::new(1.0, 0.0)]).into()];
    let report = pipeline()
        .with_correction(DiffIntersectingPolygons::default())
        .fix(lines.clone())
        .expect("correction failed");
    assert_eq!(report.value, lines);
    assert!(report.is_clean());
}

#[test]
fn corrections_keep_cardinality_of_other_levels() {
    let polygons = MultiPolygon::from(vec![
        open_square(0.0, 0.0, 2.0),
        open_square(1.0, 1.0, 2.0),
        open_square(5.0, 5.0, 1.0),
    ]);
    let value: Vec<Geom<Point2d>> = vec![polygons.into(), Point2d::new(0.0, 0.0).into()];

    let keep = IntersectionConfig::default().with_sliver_policy(SliverPolicy::Keep);
    let report = CorrectionPipeline::new()
        .with_correction(DiffIntersectingPolygons::new(keep))
        .fix(value)
        .expect("correction failed");

    assert_eq!(report.value.len(), 2);
    assert_eq!(report.value[1], Geom::Point(Point2d::new(0.0, 0.0)));
}
