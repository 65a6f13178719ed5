use riverworld_common::RenderPoint;
use riverworld_geo::{EnvironmentFeature, FeatureKind};
use uuid::Uuid;

/// One placed overlay instance (a house, a tree) handed to the rendering
/// collaborator on materialization and referenced again on eviction.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureInstance {
    pub id: Uuid,
    pub kind: FeatureKind,
    pub position: RenderPoint,
}

/// Attach surroundings to a tile footprint.
///
/// The footprint is the `tile_size` square centered on the tile. Villages
/// and allotments place one instance at their location when that location
/// falls inside the footprint. A forest whose shape touches the footprint
/// places one instance per shape point, the whole stand at once, so a wood
/// never appears half-grown at a tile seam.
pub fn attach_features(
    surroundings: &[EnvironmentFeature],
    center: RenderPoint,
    tile_size: f64,
) -> Vec<FeatureInstance> {
    let mut instances = Vec::new();

    for feature in surroundings {
        match feature.kind {
            FeatureKind::Village | FeatureKind::Allotments => {
                if let Some(location) = feature.location
                    && in_footprint(location, center, tile_size)
                {
                    instances.push(FeatureInstance {
                        id: Uuid::new_v4(),
                        kind: feature.kind,
                        position: location,
                    });
                }
            }
            FeatureKind::Forest => {
                if let Some(shape) = &feature.shape
                    && shape.iter().any(|&p| in_footprint(p, center, tile_size))
                {
                    instances.extend(shape.iter().map(|&position| FeatureInstance {
                        id: Uuid::new_v4(),
                        kind: FeatureKind::Forest,
                        position,
                    }));
                }
            }
        }
    }

    instances
}

fn in_footprint(point: RenderPoint, center: RenderPoint, tile_size: f64) -> bool {
    let half = tile_size / 2.0;
    point.x >= center.x - half
        && point.x <= center.x + half
        && point.z >= center.z - half
        && point.z <= center.z + half
}

#[cfg(test)]
mod tests {
    use super::*;

    fn village_at(x: f64, z: f64) -> EnvironmentFeature {
        EnvironmentFeature {
            kind: FeatureKind::Village,
            location: Some(RenderPoint::new(x, z)),
            shape: None,
            tags: serde_json::Value::Null,
        }
    }

    fn forest_over(points: &[(f64, f64)]) -> EnvironmentFeature {
        EnvironmentFeature {
            kind: FeatureKind::Forest,
            location: None,
            shape: Some(
                points
                    .iter()
                    .map(|&(x, z)| RenderPoint::new(x, z))
                    .collect(),
            ),
            tags: serde_json::Value::Null,
        }
    }

    #[test]
    fn village_inside_footprint_is_placed() {
        let surroundings = vec![village_at(20.0, -10.0), village_at(500.0, 0.0)];
        let instances = attach_features(&surroundings, RenderPoint::new(0.0, 0.0), 100.0);

        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].kind, FeatureKind::Village);
        assert_eq!(instances[0].position, RenderPoint::new(20.0, -10.0));
    }

    #[test]
    fn footprint_edge_is_inclusive() {
        let surroundings = vec![village_at(50.0, 50.0)];
        let instances = attach_features(&surroundings, RenderPoint::new(0.0, 0.0), 100.0);
        assert_eq!(instances.len(), 1);
    }

    #[test]
    fn touching_forest_places_its_whole_stand() {
        // One point inside pulls in the whole shape, outliers included.
        let surroundings = vec![forest_over(&[(10.0, 10.0), (200.0, 200.0)])];
        let instances = attach_features(&surroundings, RenderPoint::new(0.0, 0.0), 100.0);

        assert_eq!(instances.len(), 2);
        assert!(instances.iter().all(|i| i.kind == FeatureKind::Forest));
    }

    #[test]
    fn distant_forest_is_ignored() {
        let surroundings = vec![forest_over(&[(300.0, 300.0), (310.0, 310.0)])];
        let instances = attach_features(&surroundings, RenderPoint::new(0.0, 0.0), 100.0);
        assert!(instances.is_empty());
    }

    #[test]
    fn village_without_location_is_ignored() {
        let surroundings = vec![EnvironmentFeature {
            kind: FeatureKind::Village,
            location: None,
            shape: None,
            tags: serde_json::Value::Null,
        }];
        let instances = attach_features(&surroundings, RenderPoint::new(0.0, 0.0), 100.0);
        assert!(instances.is_empty());
    }

    #[test]
    fn instances_get_distinct_ids() {
        let surroundings = vec![forest_over(&[(0.0, 0.0), (1.0, 1.0)])];
        let instances = attach_features(&surroundings, RenderPoint::new(0.0, 0.0), 100.0);
        assert_ne!(instances[0].id, instances[1].id);
    }
}
