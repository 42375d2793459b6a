use crate::engine::scene::classifier::ClassifiedMesh;
use bevy::prelude::*;

/// Downward ray queries against scene geometry.
pub trait RayProbe {
    /// Distance to the first surface straight below `origin`, if any lies within `max_distance`.
    fn cast_down(&self, origin: Vec3, max_distance: f32) -> Option<f32>;
}

struct ProbeMesh {
    min: Vec3,
    max: Vec3,
    triangles: Vec<[Vec3; 3]>,
}

/// Brute-force probe over world-space triangles, culled per mesh by its bounding box.
pub struct TriangleSoupProbe {
    meshes: Vec<ProbeMesh>,
}

impl TriangleSoupProbe {
    pub fn from_meshes(meshes: &[ClassifiedMesh]) -> Self {
        let meshes = meshes
            .iter()
            .filter_map(|mesh| {
                let positions = &mesh.world_positions;
                let first = *positions.first()?;
                let (min, max) = positions
                    .iter()
                    .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));

                let triangles = mesh
                    .indices
                    .chunks_exact(3)
                    .filter_map(|tri| {
                        Some([
                            *positions.get(tri[0] as usize)?,
                            *positions.get(tri[1] as usize)?,
                            *positions.get(tri[2] as usize)?,
                        ])
                    })
                    .collect();

                Some(ProbeMesh {
                    min,
                    max,
                    triangles,
                })
            })
            .collect();

        Self { meshes }
    }
}

impl RayProbe for TriangleSoupProbe {
    fn cast_down(&self, origin: Vec3, max_distance: f32) -> Option<f32> {
        self.meshes
            .iter()
            .filter(|mesh| ray_aabb_hit_t(origin, Vec3::NEG_Y, mesh.min, mesh.max).is_some())
            .flat_map(|mesh| mesh.triangles.iter())
            .filter_map(|tri| ray_triangle_hit_t(origin, Vec3::NEG_Y, tri))
            .filter(|t| *t <= max_distance)
            .min_by(f32::total_cmp)
    }
}

// Slab-method ray–AABB intersection, returns Some(t) or None
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;

    for axis in 0..3 {
        let (o, d) = (ray_origin[axis], ray_direction[axis]);
        if d == 0.0 {
            // Parallel to this slab: must already be inside it.
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let (mut t0, mut t1) = ((min[axis] - o) / d, (max[axis] - o) / d);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        return None;
    }
    Some(if t_near >= 0.0 { t_near } else { t_far })
}

/// Möller–Trumbore ray–triangle intersection, double-sided.
pub fn ray_triangle_hit_t(ray_origin: Vec3, ray_direction: Vec3, tri: &[Vec3; 3]) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = tri[1] - tri[0];
    let edge2 = tri[2] - tri[0];
    let p = ray_direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray_origin - tri[0];
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = ray_direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::classifier::{MaterialChoice, MeshClass};

    /// A flat 2x2 square at height `y`, centred on (`x`, `z`).
    fn slab(x: f32, y: f32, z: f32) -> ClassifiedMesh {
        ClassifiedMesh {
            name: "slab".to_string(),
            class: MeshClass::LowStructure,
            material: MaterialChoice::LowStructure,
            height: 0.0,
            world_positions: vec![
                Vec3::new(x - 1.0, y, z - 1.0),
                Vec3::new(x + 1.0, y, z - 1.0),
                Vec3::new(x + 1.0, y, z + 1.0),
                Vec3::new(x - 1.0, y, z + 1.0),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
            uvs: None,
            base_color: [1.0; 4],
        }
    }

    #[test]
    fn downward_ray_hits_triangle() {
        let tri = [
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(0.0, 0.0, 1.0),
        ];
        let t = ray_triangle_hit_t(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y, &tri);
        assert_eq!(t, Some(5.0));

        let miss = ray_triangle_hit_t(Vec3::new(3.0, 5.0, 0.0), Vec3::NEG_Y, &tri);
        assert_eq!(miss, None);

        let behind = ray_triangle_hit_t(Vec3::new(0.0, -5.0, 0.0), Vec3::NEG_Y, &tri);
        assert_eq!(behind, None);
    }

    #[test]
    fn axis_aligned_ray_against_box() {
        let hit = ray_aabb_hit_t(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y, Vec3::ZERO, Vec3::ONE);
        assert_eq!(hit, Some(9.0));

        let beside = ray_aabb_hit_t(Vec3::new(2.0, 10.0, 0.5), Vec3::NEG_Y, Vec3::ZERO, Vec3::ONE);
        assert_eq!(beside, None);
    }

    #[test]
    fn probe_returns_nearest_surface_within_reach() {
        let probe = TriangleSoupProbe::from_meshes(&[slab(0.0, 1.0, 0.0), slab(0.0, 4.0, 0.0)]);

        let t = probe.cast_down(Vec3::new(0.2, 10.0, 0.3), 50.0).unwrap();
        assert!((t - 6.0).abs() < 1e-4);
        assert_eq!(probe.cast_down(Vec3::new(0.2, 10.0, 0.3), 5.0), None);
        assert_eq!(probe.cast_down(Vec3::new(5.0, 10.0, 5.0), 50.0), None);
    }
}
