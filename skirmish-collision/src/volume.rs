use std::error::Error;
use std::fmt;
use std::str::FromStr;

use cgmath::{ElementWise, InnerSpace, Point3, Vector3, Zero};

use crate::axis::Axis;

/// The parametric shape of a collision volume.
///
/// Shape tags used by object definitions parse through [`FromStr`]:
/// `ellipsoid`, `cylX`, `cylY`, `cylZ`, or `box`, case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeShape {
    /// General ellipsoid spanned by the three half-scales.
    Ellipsoid,
    /// Elliptical cylinder with the given axis of rotational symmetry.
    Cylinder(Axis),
    /// Axis-aligned box spanned by the three half-scales.
    Box,
}

/// Which algorithm family queries against a volume use.
///
/// Policy tags parse through [`FromStr`]: `discrete` or `continuous`,
/// case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestPolicy {
    /// Point in volume membership tests.
    Discrete,
    /// Ray segment surface intersection tests.
    Continuous,
}

/// Error produced when building a collision volume from invalid
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum VolumeError {
    /// A full scale was zero, negative, or not finite.
    InvalidScale {
        /// Axis the scale belongs to.
        axis: Axis,
        /// The offending value.
        value: f32,
    },
    /// An offset component was not finite.
    InvalidOffset {
        /// Axis the offset belongs to.
        axis: Axis,
        /// The offending value.
        value: f32,
    },
    /// A shape tag did not name a known volume shape.
    UnknownShape(String),
    /// A policy tag did not name a known test policy.
    UnknownPolicy(String),
}

impl fmt::Display for VolumeError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolumeError::InvalidScale { axis, value } => {
                write!(formatter, "invalid scale {} on the {:?} axis", value, axis)
            }
            VolumeError::InvalidOffset { axis, value } => {
                write!(formatter, "invalid offset {} on the {:?} axis", value, axis)
            }
            VolumeError::UnknownShape(tag) => write!(formatter, "unknown volume shape `{}`", tag),
            VolumeError::UnknownPolicy(tag) => write!(formatter, "unknown test policy `{}`", tag),
        }
    }
}

impl Error for VolumeError {}

impl FromStr for VolumeShape {
    type Err = VolumeError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.to_ascii_lowercase().as_str() {
            "ellipsoid" => Ok(VolumeShape::Ellipsoid),
            "cylx" => Ok(VolumeShape::Cylinder(Axis::X)),
            "cyly" => Ok(VolumeShape::Cylinder(Axis::Y)),
            "cylz" => Ok(VolumeShape::Cylinder(Axis::Z)),
            "box" => Ok(VolumeShape::Box),
            _ => Err(VolumeError::UnknownShape(tag.to_string())),
        }
    }
}

impl FromStr for TestPolicy {
    type Err = VolumeError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.to_ascii_lowercase().as_str() {
            "discrete" => Ok(TestPolicy::Discrete),
            "continuous" => Ok(TestPolicy::Continuous),
            _ => Err(VolumeError::UnknownPolicy(tag.to_string())),
        }
    }
}

/// A parametric bounding volume attached to a collidable object.
///
/// The half-scales, their squares and inverses, and the enclosing-sphere
/// radius are derived once at construction and never mutated afterwards,
/// keeping the per-query hot path free of divisions.
#[derive(Debug, Clone, Copy)]
pub struct CollisionVolume {
    shape: VolumeShape,
    policy: TestPolicy,
    scales: Vector3<f32>,
    half_scales: Vector3<f32>,
    half_scales_sq: Vector3<f32>,
    inv_half_scales: Vector3<f32>,
    offset: Vector3<f32>,
    bounding_radius: f32,
    bounding_radius_sq: f32,
    spherical: bool,
}

impl CollisionVolume {
    /// Creates a volume from full axis scales and a local center offset.
    ///
    /// Scales must be positive and finite and offsets finite; anything
    /// else is rejected here so that misconfigured volumes never reach the
    /// query path.
    pub fn new(
        shape: VolumeShape,
        policy: TestPolicy,
        scales: Vector3<f32>,
        offset: Vector3<f32>,
    ) -> Result<Self, VolumeError> {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let scale = scales[axis.index()];
            if !scale.is_finite() || scale <= 0.0 {
                return Err(VolumeError::InvalidScale { axis, value: scale });
            }

            let shift = offset[axis.index()];
            if !shift.is_finite() {
                return Err(VolumeError::InvalidOffset { axis, value: shift });
            }
        }

        let half_scales = scales * 0.5;
        let half_scales_sq = half_scales.mul_element_wise(half_scales);
        let inv_half_scales = Vector3::new(1.0 / half_scales.x, 1.0 / half_scales.y, 1.0 / half_scales.z);

        // the radius-only shortcut is exact only for an untranslated
        // sphere, so anything else leaves the flag unset
        let spherical = shape == VolumeShape::Ellipsoid
            && scales.x == scales.y
            && scales.y == scales.z
            && offset == Vector3::zero();

        let local_radius = match shape {
            VolumeShape::Ellipsoid => half_scales.x.max(half_scales.y).max(half_scales.z),
            VolumeShape::Cylinder(primary) => {
                let (second, third) = primary.secondary_axes();
                let cap_radius = half_scales[second.index()].max(half_scales[third.index()]);
                let half_height = half_scales[primary.index()];
                (half_height * half_height + cap_radius * cap_radius).sqrt()
            }
            VolumeShape::Box => half_scales.magnitude(),
        };
        let bounding_radius = local_radius + offset.magnitude();

        Ok(CollisionVolume {
            shape,
            policy,
            scales,
            half_scales,
            half_scales_sq,
            inv_half_scales,
            offset,
            bounding_radius,
            bounding_radius_sq: bounding_radius * bounding_radius,
            spherical,
        })
    }

    /// The shape of the volume.
    pub fn shape(&self) -> VolumeShape {
        self.shape
    }

    /// The test policy queries against this volume use.
    pub fn policy(&self) -> TestPolicy {
        self.policy
    }

    /// Full extents along each local axis.
    pub fn scales(&self) -> Vector3<f32> {
        self.scales
    }

    /// Half extents along each local axis.
    pub fn half_scales(&self) -> Vector3<f32> {
        self.half_scales
    }

    /// Squared half extents along each local axis.
    pub fn half_scales_sq(&self) -> Vector3<f32> {
        self.half_scales_sq
    }

    /// Reciprocal half extents along each local axis.
    pub fn inv_half_scales(&self) -> Vector3<f32> {
        self.inv_half_scales
    }

    /// Local-space translation from the owner's reference point to the
    /// volume center.
    pub fn offset(&self) -> Vector3<f32> {
        self.offset
    }

    /// Radius of the enclosing sphere around the volume, offset included.
    pub fn bounding_radius(&self) -> f32 {
        self.bounding_radius
    }

    /// Squared radius of the enclosing sphere.
    pub fn bounding_radius_sq(&self) -> f32 {
        self.bounding_radius_sq
    }

    /// True for volumes whose membership test reduces to a radius check.
    pub fn is_spherical(&self) -> bool {
        self.spherical
    }

    /// Checks if a volume-local point lies inside the volume.
    ///
    /// Points exactly on the surface count as inside on all shapes.
    pub fn contains_local_point(&self, point: Point3<f32>) -> bool {
        match self.shape {
            VolumeShape::Ellipsoid => {
                let scaled = Vector3::new(
                    point.x * self.inv_half_scales.x,
                    point.y * self.inv_half_scales.y,
                    point.z * self.inv_half_scales.z,
                );
                scaled.magnitude2() <= 1.0
            }
            VolumeShape::Cylinder(primary) => {
                let (second, third) = primary.secondary_axes();
                let radial0 = point[second.index()] * self.inv_half_scales[second.index()];
                let radial1 = point[third.index()] * self.inv_half_scales[third.index()];

                point[primary.index()].abs() <= self.half_scales[primary.index()]
                    && radial0 * radial0 + radial1 * radial1 <= 1.0
            }
            VolumeShape::Box => {
                point.x.abs() <= self.half_scales.x
                    && point.y.abs() <= self.half_scales.y
                    && point.z.abs() <= self.half_scales.z
            }
        }
    }
}
