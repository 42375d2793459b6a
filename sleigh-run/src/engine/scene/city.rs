use crate::engine::assets::city_textures::CityMaterials;
use crate::engine::scene::classifier::{ClassifiedMesh, MeshClass};
use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy_rapier3d::prelude::*;
use constants::texture::PLANAR_UV_SCALE;

/// Classified city geometry. Roads carry no collider.
#[derive(Component, Debug, Clone, Copy)]
pub struct CityMesh {
    pub class: MeshClass,
}

/// Render mesh for classified geometry already baked into world space.
pub fn build_city_mesh(source: &ClassifiedMesh) -> Mesh {
    let positions: Vec<[f32; 3]> = source.world_positions.iter().map(|p| p.to_array()).collect();

    let uvs = match &source.uvs {
        Some(uvs) if uvs.len() == positions.len() => uvs.clone(),
        _ => planar_uvs(&source.world_positions),
    };

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(source.indices.clone()));
    mesh.compute_smooth_normals();
    mesh
}

/// Top-down projection for geometry exported without texture coordinates.
pub fn planar_uvs(positions: &[Vec3]) -> Vec<[f32; 2]> {
    positions
        .iter()
        .map(|p| [p.x * PLANAR_UV_SCALE, p.z * PLANAR_UV_SCALE])
        .collect()
}

pub fn spawn_city_meshes(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    city_materials: &CityMaterials,
    city: &[ClassifiedMesh],
) {
    for source in city {
        if source.indices.len() < 3 {
            continue;
        }

        let material = city_materials
            .for_choice(source.material)
            .unwrap_or_else(|| {
                let [r, g, b, a] = source.base_color;
                materials.add(StandardMaterial::from(Color::linear_rgba(r, g, b, a)))
            });

        let mut entity = commands.spawn((
            Name::new(source.name.clone()),
            CityMesh {
                class: source.class,
            },
            Mesh3d(meshes.add(build_city_mesh(source))),
            MeshMaterial3d(material),
            Transform::IDENTITY,
        ));

        if source.class.is_solid() {
            entity.insert((
                RigidBody::Fixed,
                AsyncCollider(ComputedColliderShape::TriMesh(TriMeshFlags::default())),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::classifier::MaterialChoice;

    fn quad(uvs: Option<Vec<[f32; 2]>>) -> ClassifiedMesh {
        ClassifiedMesh {
            name: "road".to_string(),
            class: MeshClass::Road { dark: false },
            material: MaterialChoice::LightRoad,
            height: 0.0,
            world_positions: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(10.0, 0.0, 20.0),
                Vec3::new(0.0, 0.0, 20.0),
            ],
            indices: vec![0, 2, 1, 0, 3, 2],
            uvs,
            base_color: [1.0; 4],
        }
    }

    #[test]
    fn missing_uvs_are_projected_from_above() {
        let uvs = planar_uvs(&quad(None).world_positions);
        assert_eq!(uvs[2], [1.0, 2.0]);
    }

    #[test]
    fn city_mesh_has_normals_and_uvs() {
        let mesh = build_city_mesh(&quad(None));
        assert_eq!(mesh.count_vertices(), 4);
        assert!(mesh.attribute(Mesh::ATTRIBUTE_NORMAL).is_some());
        assert!(mesh.attribute(Mesh::ATTRIBUTE_UV_0).is_some());
        assert_eq!(mesh.indices().map(|i| i.len()), Some(6));
    }

    #[test]
    fn mismatched_uvs_fall_back_to_planar() {
        let mesh = build_city_mesh(&quad(Some(vec![[0.0, 0.0]])));
        let Some(bevy::render::mesh::VertexAttributeValues::Float32x2(uvs)) =
            mesh.attribute(Mesh::ATTRIBUTE_UV_0)
        else {
            panic!("uv attribute missing");
        };
        assert_eq!(uvs.len(), 4);
        assert_eq!(uvs[1], [1.0, 0.0]);
    }
}
