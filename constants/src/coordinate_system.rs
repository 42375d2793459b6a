use bevy::math::Vec3;

/// Uniform scale applied to imported city geometry.
pub const SCENE_SCALE: f32 = 15.0;

/// Coordinate transformation matrix (row-major: [x_new, y_new, z_new])
/// Default: -90° X rotation (Z→Y, -Y→Z, X→X)
///
/// Imported geometry is authored Z-up. Classification measures height along
/// local Z for this reason, so both must change together.
pub const COORDINATE_TRANSFORM: [[f32; 3]; 3] = [
    [1.0, 0.0, 0.0],  // X = X
    [0.0, 0.0, 1.0],  // Y = Z
    [0.0, -1.0, 0.0], // Z = -Y
];

/// Map a point from imported (Z-up, unscaled) space into world space.
pub fn to_world(local: Vec3) -> Vec3 {
    let input = local.to_array();
    let mut output = [0.0; 3];

    for i in 0..3 {
        for j in 0..3 {
            output[i] += COORDINATE_TRANSFORM[i][j] * input[j];
        }
    }

    Vec3::from_array(output) * SCENE_SCALE
}
