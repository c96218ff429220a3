use cgmath::{Deg, EuclideanSpace, Matrix4, Point3};
use skirmish_collision::{Collidable, CollisionVolume, multiply_matrix4_and_point3};

use crate::scenario::{ScenarioError, TargetDefinition};

/// A stationary battlefield object with an attached collision volume.
#[derive(Debug)]
pub struct Target {
    name: String,
    transform: Matrix4<f32>,
    volume: CollisionVolume,
}

impl Target {
    pub fn new(definition: &TargetDefinition) -> Result<Self, ScenarioError> {
        let volume = definition
            .volume
            .build()
            .map_err(|error| ScenarioError::InvalidVolume(definition.name.clone(), error))?;
        let transform =
            Matrix4::from_translation(definition.position.to_vec()) * Matrix4::from_angle_y(Deg(definition.yaw_degrees));

        Ok(Target {
            name: definition.name.clone(),
            transform,
            volume,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Maps a volume-local impact point back into world space.
    pub fn impact_point(&self, local: Point3<f32>) -> Point3<f32> {
        let volume_transform = self.transform * Matrix4::from_translation(self.volume.offset());
        multiply_matrix4_and_point3(&volume_transform, local)
    }
}

impl Collidable for Target {
    fn hit_volume(&self) -> &CollisionVolume {
        &self.volume
    }

    fn world_transform(&self) -> Matrix4<f32> {
        self.transform
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{Point3, Vector3, assert_relative_eq};
    use skirmish_collision::Collidable;

    use crate::object::Target;
    use crate::scenario::{TargetDefinition, VolumeDefinition};

    fn definition(yaw_degrees: f32) -> TargetDefinition {
        TargetDefinition {
            name: "pillbox".to_string(),
            position: Point3::new(10.0, 0.0, 0.0),
            yaw_degrees,
            volume: VolumeDefinition {
                shape: "box".to_string(),
                policy: "continuous".to_string(),
                scales: Vector3::new(4.0, 4.0, 4.0),
                offset: Vector3::new(0.0, 0.0, 0.0),
            },
        }
    }

    #[test]
    fn test_reference_point_matches_position() {
        let target = Target::new(&definition(0.0)).unwrap();

        assert_relative_eq!(target.reference_point(), Point3::new(10.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_impact_point_follows_the_yaw() {
        let target = Target::new(&definition(90.0)).unwrap();

        // local +X points down world -Z after the quarter turn
        assert_relative_eq!(
            target.impact_point(Point3::new(1.0, 0.0, 0.0)),
            Point3::new(10.0, 0.0, -1.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_invalid_volume_is_reported_with_the_name() {
        let mut broken = definition(0.0);
        broken.volume.policy = "sometimes".to_string();

        let error = Target::new(&broken).unwrap_err();
        assert!(error.to_string().contains("pillbox"));
    }
}
