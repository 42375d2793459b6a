use bevy::prelude::*;
use constants::class::{INSTANCE_FEATURE_MAP_KEY, INSTANCE_NAME_MARKER};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneLoadError {
    #[error("geometry request failed: {0}")]
    Request(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid glTF payload: {0}")]
    Parse(#[from] gltf::Error),
    #[error("geometry payload contained no triangle meshes")]
    Empty,
    #[error("mesh '{0}' has no vertex positions")]
    MissingPositions(String),
}

/// One triangle primitive pulled out of the GLB, still in its local frame.
#[derive(Debug, Clone)]
pub struct ImportedMesh {
    pub name: String,
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub uvs: Option<Vec<[f32; 2]>>,
    /// Accumulated transform of the owning node and its ancestors.
    pub node_transform: Mat4,
    pub instanced: bool,
    pub base_color: [f32; 4],
}

impl ImportedMesh {
    /// Extent along the geometry's own Z axis, before any node transform.
    pub fn local_z_extent(&self) -> f32 {
        let (min, max) = self
            .positions
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), p| {
                (min.min(p.z), max.max(p.z))
            });

        if min.is_finite() && max.is_finite() {
            max - min
        } else {
            0.0
        }
    }
}

/// Parse a binary glTF payload into flat triangle meshes.
///
/// Walks the default scene (or the first one) so that node transforms accumulate
/// down the hierarchy. Images are never decoded; the city is re-materialised.
pub fn parse_glb(bytes: &[u8]) -> Result<Vec<ImportedMesh>, SceneLoadError> {
    let gltf::Gltf { document, blob } = gltf::Gltf::from_slice(bytes)?;
    let buffers = gltf::import_buffers(&document, None, blob)?;

    let mut meshes = Vec::new();
    if let Some(scene) = document.default_scene().or_else(|| document.scenes().next()) {
        for node in scene.nodes() {
            collect_node(&node, Mat4::IDENTITY, &buffers, &mut meshes)?;
        }
    }

    if meshes.is_empty() {
        return Err(SceneLoadError::Empty);
    }

    Ok(meshes)
}

fn collect_node(
    node: &gltf::Node,
    parent_transform: Mat4,
    buffers: &[gltf::buffer::Data],
    meshes: &mut Vec<ImportedMesh>,
) -> Result<(), SceneLoadError> {
    let transform = parent_transform * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        let name = node
            .name()
            .or_else(|| mesh.name())
            .map(str::to_string)
            .unwrap_or_else(|| format!("mesh{}", mesh.index()));

        let instanced = is_instanced(name.as_str(), node.extras())
            || is_instanced(mesh.name().unwrap_or_default(), mesh.extras());

        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                debug!("Skipping non-triangle primitive in '{}'", name);
                continue;
            }

            let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| &d.0[..]));

            let positions: Vec<Vec3> = reader
                .read_positions()
                .ok_or_else(|| SceneLoadError::MissingPositions(name.clone()))?
                .map(Vec3::from_array)
                .collect();

            let indices: Vec<u32> = match reader.read_indices() {
                Some(iter) => iter.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };

            let uvs = reader
                .read_tex_coords(0)
                .map(|iter| iter.into_f32().collect());

            meshes.push(ImportedMesh {
                name: name.clone(),
                positions,
                indices,
                uvs,
                node_transform: transform,
                instanced,
                base_color: primitive
                    .material()
                    .pbr_metallic_roughness()
                    .base_color_factor(),
            });
        }
    }

    for child in node.children() {
        collect_node(&child, transform, buffers, meshes)?;
    }

    Ok(())
}

/// Instanced decorations are exported with a name marker or a feature map in extras.
fn is_instanced(name: &str, extras: &gltf::json::Extras) -> bool {
    name.to_lowercase().contains(INSTANCE_NAME_MARKER)
        || extras
            .as_ref()
            .is_some_and(|raw| raw.get().contains(INSTANCE_FEATURE_MAP_KEY))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Assemble a GLB around `root`, with `bin` as the single buffer.
    pub(crate) fn assemble_glb(mut root: serde_json::Value, bin: &[u8]) -> Vec<u8> {
        root["buffers"] = serde_json::json!([{ "byteLength": bin.len() }]);

        let mut json_bytes = serde_json::to_vec(&root).unwrap();
        while json_bytes.len() % 4 != 0 {
            json_bytes.push(b' ');
        }
        let mut bin = bin.to_vec();
        while bin.len() % 4 != 0 {
            bin.push(0);
        }

        let total_length = 12 + 8 + json_bytes.len() + 8 + bin.len();
        let mut glb = Vec::with_capacity(total_length);
        glb.extend_from_slice(b"glTF");
        glb.extend_from_slice(&2u32.to_le_bytes());
        glb.extend_from_slice(&(total_length as u32).to_le_bytes());
        glb.extend_from_slice(&(json_bytes.len() as u32).to_le_bytes());
        glb.extend_from_slice(&0x4E4F534Au32.to_le_bytes());
        glb.extend_from_slice(&json_bytes);
        glb.extend_from_slice(&(bin.len() as u32).to_le_bytes());
        glb.extend_from_slice(&0x004E4942u32.to_le_bytes());
        glb.extend_from_slice(&bin);
        glb
    }

    /// Vertex bytes for `positions` as tightly packed little-endian f32 triples.
    fn position_bytes(positions: &[[f32; 3]]) -> Vec<u8> {
        positions
            .iter()
            .flat_map(|p| p.iter().flat_map(|c| c.to_le_bytes()))
            .collect()
    }

    /// A GLB with one node holding one non-indexed triangle mesh.
    pub(crate) fn single_mesh_glb(
        node_name: &str,
        positions: &[[f32; 3]],
        node_extras: Option<serde_json::Value>,
    ) -> Vec<u8> {
        let bin = position_bytes(positions);
        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        for p in positions {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }

        let mut node = serde_json::json!({
            "name": node_name,
            "mesh": 0,
            "translation": [1.0, 0.0, 0.0]
        });
        if let Some(extras) = node_extras {
            node["extras"] = extras;
        }

        let root = serde_json::json!({
            "asset": { "version": "2.0" },
            "scene": 0,
            "scenes": [{ "nodes": [0] }],
            "nodes": [node],
            "meshes": [{ "name": "geometry", "primitives": [{ "attributes": { "POSITION": 0 } }] }],
            "bufferViews": [{ "buffer": 0, "byteOffset": 0, "byteLength": bin.len() }],
            "accessors": [{
                "bufferView": 0,
                "componentType": 5126,
                "count": positions.len(),
                "type": "VEC3",
                "min": min,
                "max": max
            }]
        });

        assemble_glb(root, &bin)
    }

    const TRIANGLE: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 2.0]];

    #[test]
    fn imports_single_triangle_mesh() {
        let glb = single_mesh_glb("Building_12", &TRIANGLE, None);
        let meshes = parse_glb(&glb).unwrap();

        assert_eq!(meshes.len(), 1);
        let mesh = &meshes[0];
        assert_eq!(mesh.name, "Building_12");
        assert_eq!(mesh.positions.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert!(mesh.uvs.is_none());
        assert!(!mesh.instanced);
        assert_eq!(mesh.base_color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(
            mesh.node_transform.transform_point3(Vec3::ZERO),
            Vec3::new(1.0, 0.0, 0.0)
        );
        assert_eq!(mesh.local_z_extent(), 2.0);
    }

    #[test]
    fn instance_marker_in_name_flags_mesh() {
        let glb = single_mesh_glb("Lamp_Instance_4", &TRIANGLE, None);
        let meshes = parse_glb(&glb).unwrap();
        assert!(meshes[0].instanced);
    }

    #[test]
    fn instance_feature_map_in_extras_flags_mesh() {
        let glb = single_mesh_glb(
            "Bench",
            &TRIANGLE,
            Some(serde_json::json!({ "instanceIxToFeatureMap": { "0": 17 } })),
        );
        let meshes = parse_glb(&glb).unwrap();
        assert!(meshes[0].instanced);
    }

    #[test]
    fn scene_without_meshes_is_empty() {
        let root = serde_json::json!({
            "asset": { "version": "2.0" },
            "scene": 0,
            "scenes": [{ "nodes": [0] }],
            "nodes": [{ "name": "lonely" }]
        });
        let glb = assemble_glb(root, &[0, 0, 0, 0]);

        assert!(matches!(parse_glb(&glb), Err(SceneLoadError::Empty)));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let result = parse_glb(b"definitely not a glb");
        assert!(matches!(result, Err(SceneLoadError::Parse(_))));
    }
}
