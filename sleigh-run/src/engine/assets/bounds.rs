use bevy::prelude::*;
use serde::Serialize;

/// Axis-aligned bounds of the composed city in world coordinates.
/// Drives scatter sampling and gift placement, and is serialized into the
/// `get_game_status` reply.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl SceneBounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min_x: min.x,
            max_x: max.x,
            min_y: min.y,
            max_y: max.y,
            min_z: min.z,
            max_z: max.z,
        }
    }

    /// Tightest bounds around `points`, or `None` when there are no points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = *points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self::new(min, max))
    }

    pub fn min(&self) -> Vec3 {
        Vec3::new(self.min_x, self.min_y, self.min_z)
    }

    pub fn max(&self) -> Vec3 {
        Vec3::new(self.max_x, self.max_y, self.max_z)
    }

    pub fn size(&self) -> Vec3 {
        self.max() - self.min()
    }

    /// Highest point of any geometry; probes start above it.
    pub fn top(&self) -> f32 {
        self.max_y
    }

    /// Same box scaled about the world origin.
    pub fn scaled(&self, factor: f32) -> SceneBounds {
        let a = self.min() * factor;
        let b = self.max() * factor;
        SceneBounds::new(a.min(b), a.max(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_from_points() {
        let points = [
            Vec3::new(1.0, 0.0, -2.0),
            Vec3::new(-3.0, 4.0, 5.0),
            Vec3::new(0.0, -1.0, 0.0),
        ];
        let bounds = SceneBounds::from_points(&points).unwrap();

        assert_eq!(bounds.min(), Vec3::new(-3.0, -1.0, -2.0));
        assert_eq!(bounds.max(), Vec3::new(1.0, 4.0, 5.0));
        assert_eq!(bounds.size(), Vec3::new(4.0, 5.0, 7.0));
        assert!(SceneBounds::from_points(&Vec::<Vec3>::new()).is_none());
    }

    #[test]
    fn scaled_about_origin() {
        let bounds = SceneBounds::new(Vec3::new(10.0, 0.0, -20.0), Vec3::new(30.0, 8.0, 40.0));
        let half = bounds.scaled(0.5);
        assert_eq!(half.min(), Vec3::new(5.0, 0.0, -10.0));
        assert_eq!(half.max(), Vec3::new(15.0, 4.0, 20.0));
    }
}
