use std::collections::HashMap;

use lofter::batch::{FeatureBatch, LiftPolicy};
use lofter::config::LiftParams;
use lofter::feature::{Feature, FeatureKind};
use lofter::footprint::Footprint;
use lofter::math::Point2;
use lofter::sample::{PointClass, Sample};

fn main() -> lofter::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::DEBUG.into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // A narrow fence strip along the x axis.
    let footprint = Footprint::new(vec![
        Point2::new(0.0, 0.0),
        Point2::new(8.0, 0.0),
        Point2::new(8.0, 0.4),
        Point2::new(0.0, 0.4),
    ])?;

    let mut batch = FeatureBatch::new();
    let fence = batch.insert(Feature::new(
        "fence-001",
        FeatureKind::Separation,
        footprint,
        HashMap::new(),
    ));

    for (elevation, classification, last_return) in [
        (1.8, PointClass::Ground, true),
        (1.9, PointClass::Unclassified, true),
        (1.7, PointClass::Ground, true),
        (6.0, PointClass::Building, true),
        (0.9, PointClass::Ground, false),
    ] {
        batch.add_elevation_point(
            fence,
            &Sample {
                position: Point2::new(4.0, 0.2),
                elevation,
                radius: 0.5,
                classification,
                last_return,
            },
        )?;
    }

    batch.lift_all(&LiftParams::default(), LiftPolicy::SkipEmpty)?;

    for (_, lifted) in batch.lifted_features() {
        println!(
            "{}: height {:.2}, {} roof + {} wall triangles",
            lifted.id(),
            lifted.height(),
            lifted.roof().triangle_count(),
            lifted.walls().triangle_count()
        );
    }

    Ok(())
}
