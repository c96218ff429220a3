use std::error::Error;
use std::fmt;
use std::fs;
use std::io;

use cgmath::{Point3, Vector3};
use serde::Deserialize;
use skirmish_collision::{CollisionVolume, VolumeError};

const BUNDLED_SCENARIO: &str = include_str!("../scenarios/outpost.ron");

#[derive(Debug)]
pub enum ScenarioError {
    Unreadable(String, io::Error),
    Malformed(ron::error::SpannedError),
    InvalidVolume(String, VolumeError),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::Unreadable(path, error) => {
                write!(formatter, "cannot read scenario file `{}`: {}", path, error)
            }
            ScenarioError::Malformed(error) => write!(formatter, "malformed scenario file: {}", error),
            ScenarioError::InvalidVolume(name, error) => {
                write!(formatter, "invalid volume on `{}`: {}", name, error)
            }
        }
    }
}

impl Error for ScenarioError {}

#[derive(Debug, Deserialize)]
pub struct VolumeDefinition {
    pub shape: String,
    pub policy: String,
    pub scales: Vector3<f32>,
    pub offset: Vector3<f32>,
}

impl VolumeDefinition {
    pub fn build(&self) -> Result<CollisionVolume, VolumeError> {
        let shape = self.shape.parse()?;
        let policy = self.policy.parse()?;
        CollisionVolume::new(shape, policy, self.scales, self.offset)
    }
}

#[derive(Debug, Deserialize)]
pub struct TargetDefinition {
    pub name: String,
    pub position: Point3<f32>,
    pub yaw_degrees: f32,
    pub volume: VolumeDefinition,
}

#[derive(Debug, Deserialize)]
pub struct ShotDefinition {
    pub name: String,
    pub origin: Point3<f32>,
    pub velocity: Vector3<f32>,
    pub lifetime: u32,
}

#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub objects: Vec<TargetDefinition>,
    pub projectiles: Vec<ShotDefinition>,
}

impl Scenario {
    /// Loads a scenario from a RON file.
    pub fn load(path: &str) -> Result<Self, ScenarioError> {
        let data = fs::read_to_string(path).map_err(|error| ScenarioError::Unreadable(path.to_string(), error))?;
        ron::from_str(&data).map_err(ScenarioError::Malformed)
    }

    /// The scenario compiled into the binary, used when no file is given.
    pub fn bundled() -> Result<Self, ScenarioError> {
        ron::from_str(BUNDLED_SCENARIO).map_err(ScenarioError::Malformed)
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector3;
    use skirmish_collision::VolumeError;

    use crate::scenario::{Scenario, VolumeDefinition};

    #[test]
    fn test_bundled_scenario_parses() {
        let scenario = Scenario::bundled().unwrap();

        assert_eq!(scenario.name, "outpost raid");
        assert_eq!(scenario.objects.len(), 3);
        assert_eq!(scenario.projectiles.len(), 4);

        for object in &scenario.objects {
            object.volume.build().unwrap();
        }
    }

    #[test]
    fn test_unknown_tags_are_rejected() {
        let definition = VolumeDefinition {
            shape: "pyramid".to_string(),
            policy: "continuous".to_string(),
            scales: Vector3::new(1.0, 1.0, 1.0),
            offset: Vector3::new(0.0, 0.0, 0.0),
        };

        let error = definition.build().unwrap_err();
        assert_eq!(error, VolumeError::UnknownShape("pyramid".to_string()));
    }

    #[test]
    fn test_malformed_scenario_text_fails_to_parse() {
        let result: Result<Scenario, _> = ron::from_str("(name: \"broken\", objects: [");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_volume_parameters_are_rejected() {
        let source = r#"(
            name: "broken",
            objects: [
                (
                    name: "wall",
                    position: (x: 0.0, y: 0.0, z: 0.0),
                    yaw_degrees: 0.0,
                    volume: (
                        shape: "box",
                        policy: "continuous",
                        scales: (x: -4.0, y: 2.0, z: 2.0),
                        offset: (x: 0.0, y: 0.0, z: 0.0),
                    ),
                ),
            ],
            projectiles: [],
        )"#;

        let scenario: Scenario = ron::from_str(source).unwrap();
        let error = scenario.objects[0].volume.build().unwrap_err();

        assert!(matches!(error, VolumeError::InvalidScale { value, .. } if value == -4.0));
    }
}
