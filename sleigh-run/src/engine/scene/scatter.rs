use crate::engine::assets::bounds::SceneBounds;
use crate::engine::scene::probe::RayProbe;
use crate::engine::scene::rng::SceneRng;
use bevy::prelude::*;
use constants::scatter::{PROBE_MARGIN, PROBE_START_ABOVE_TOP, TREE_SCALE_JITTER};
use std::f32::consts::PI;

/// Prop placed on open ground. Positions sit at ground level (y = 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropPlacement {
    Tree { position: Vec3, scale: Vec3 },
    Ramp { position: Vec3, yaw: f32 },
}

impl PropPlacement {
    pub fn position(&self) -> Vec3 {
        match self {
            PropPlacement::Tree { position, .. } | PropPlacement::Ramp { position, .. } => {
                *position
            }
        }
    }
}

/// Rejection-sample open ground inside `bounds` and dress it with trees and ramps.
///
/// Each trial drops one probe from just above the scene. A probe that reaches
/// any geometry is discarded; an open column always receives exactly one prop.
/// No spacing is enforced between props.
pub fn scatter_props(
    bounds: &SceneBounds,
    probe: &impl RayProbe,
    rng: &mut SceneRng,
    trials: usize,
    ramp_chance: f32,
) -> Vec<PropPlacement> {
    let probe_height = bounds.top() + PROBE_START_ABOVE_TOP;
    let reach = bounds.size().y + PROBE_MARGIN;

    let mut props = Vec::new();
    for _ in 0..trials {
        let x = rng.range(bounds.min_x, bounds.max_x);
        let z = rng.range(bounds.min_z, bounds.max_z);

        if probe.cast_down(Vec3::new(x, probe_height, z), reach).is_some() {
            continue;
        }

        let position = Vec3::new(x, 0.0, z);
        if rng.chance(ramp_chance) {
            props.push(PropPlacement::Ramp {
                position,
                yaw: rng.range(0.0, PI),
            });
        } else {
            let jitter = Vec3::new(rng.unit(), rng.unit(), rng.unit()) * TREE_SCALE_JITTER;
            props.push(PropPlacement::Tree {
                position,
                scale: Vec3::ONE + jitter,
            });
        }
    }

    props
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct OpenGround;

    impl RayProbe for OpenGround {
        fn cast_down(&self, _origin: Vec3, _max_distance: f32) -> Option<f32> {
            None
        }
    }

    struct Rooftops;

    impl RayProbe for Rooftops {
        fn cast_down(&self, _origin: Vec3, _max_distance: f32) -> Option<f32> {
            Some(1.0)
        }
    }

    /// Blocks the western half of the scene and records every probe.
    #[derive(Default)]
    struct HalfBlocked {
        probes: RefCell<Vec<(Vec3, f32)>>,
    }

    impl RayProbe for HalfBlocked {
        fn cast_down(&self, origin: Vec3, max_distance: f32) -> Option<f32> {
            self.probes.borrow_mut().push((origin, max_distance));
            (origin.x < 0.0).then_some(2.0)
        }
    }

    fn bounds() -> SceneBounds {
        SceneBounds::new(Vec3::new(-50.0, 0.0, -20.0), Vec3::new(50.0, 30.0, 20.0))
    }

    #[test]
    fn open_columns_always_get_one_prop() {
        let mut rng = SceneRng::from_seed(5);
        let props = scatter_props(&bounds(), &OpenGround, &mut rng, 250, 0.1);
        assert_eq!(props.len(), 250);
    }

    #[test]
    fn blocked_columns_never_get_props() {
        let mut rng = SceneRng::from_seed(5);
        let props = scatter_props(&bounds(), &Rooftops, &mut rng, 250, 0.1);
        assert!(props.is_empty());
    }

    #[test]
    fn props_only_land_where_probe_missed() {
        let probe = HalfBlocked::default();
        let mut rng = SceneRng::from_seed(11);
        let props = scatter_props(&bounds(), &probe, &mut rng, 200, 0.1);

        let probes = probe.probes.borrow();
        let open = probes.iter().filter(|(origin, _)| origin.x >= 0.0).count();
        assert_eq!(probes.len(), 200);
        assert_eq!(props.len(), open);
        assert!(props.iter().all(|p| p.position().x >= 0.0));

        for (origin, reach) in probes.iter() {
            assert_eq!(origin.y, 31.0);
            assert_eq!(*reach, 130.0);
        }
    }

    #[test]
    fn props_sit_on_ground_inside_bounds() {
        let b = bounds();
        let mut rng = SceneRng::from_seed(8);
        for prop in scatter_props(&b, &OpenGround, &mut rng, 250, 0.1) {
            let p = prop.position();
            assert_eq!(p.y, 0.0);
            assert!(p.x >= b.min_x && p.x < b.max_x);
            assert!(p.z >= b.min_z && p.z < b.max_z);
        }
    }

    #[test]
    fn tree_scale_and_ramp_yaw_ranges() {
        let mut rng = SceneRng::from_seed(21);
        let trees = scatter_props(&bounds(), &OpenGround, &mut rng, 100, 0.0);
        for tree in &trees {
            let PropPlacement::Tree { scale, .. } = tree else {
                panic!("ramp placed with zero ramp chance");
            };
            assert!(scale.cmpge(Vec3::ONE).all());
            assert!(scale.cmple(Vec3::splat(1.8)).all());
        }

        let ramps = scatter_props(&bounds(), &OpenGround, &mut rng, 100, 1.0);
        for ramp in &ramps {
            let PropPlacement::Ramp { yaw, .. } = ramp else {
                panic!("tree placed with certain ramp chance");
            };
            assert!((0.0..PI).contains(yaw));
        }
    }

    #[test]
    fn same_seed_same_dressing() {
        let run = || {
            let mut rng = SceneRng::from_seed(1234);
            scatter_props(&bounds(), &OpenGround, &mut rng, 50, 0.1)
        };
        assert_eq!(run(), run());
    }
}
