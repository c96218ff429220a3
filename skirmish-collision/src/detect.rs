use cgmath::{Matrix4, MetricSpace, Point3, SquareMatrix};

use crate::cuboid::intersect_box;
use crate::cylinder::intersect_cylinder;
use crate::ellipsoid::intersect_ellipsoid;
use crate::multiply_matrix4_and_point3;
use crate::query::{Intersection, QueryStats};
use crate::volume::{CollisionVolume, TestPolicy, VolumeShape};

/// A simulated object that can be tested for collisions.
///
/// Implementors expose their world transform and attached volume; the
/// query functions read both and never mutate the object.
pub trait Collidable {
    /// The bounding volume attached to this object.
    fn hit_volume(&self) -> &CollisionVolume;

    /// World-space transform of the object's reference point.
    fn world_transform(&self) -> Matrix4<f32>;

    /// World-space position of the reference point, used for the
    /// enclosing-sphere rejection.
    fn reference_point(&self) -> Point3<f32> {
        Point3::from_homogeneous(self.world_transform().w)
    }
}

/// Canonical query entry point, dispatching on the volume's test policy:
/// discrete volumes are tested for containment of `p0` alone, continuous
/// volumes against the full segment.
///
/// Returns whether the object was hit. The caller's `query` record is
/// filled when one is provided and the continuous path produced
/// candidates. `stats` counts one test per call.
pub fn detect_hit(
    object: &impl Collidable,
    p0: Point3<f32>,
    p1: Point3<f32>,
    query: Option<&mut Intersection>,
    stats: &mut QueryStats,
) -> bool {
    match object.hit_volume().policy() {
        TestPolicy::Discrete => {
            stats.discrete_tests += 1;
            discrete_test(object, p0)
        }
        TestPolicy::Continuous => {
            stats.continuous_tests += 1;
            match continuous_test(object, p0, p1) {
                Some(intersection) => {
                    if let Some(query) = query {
                        *query = intersection;
                    }
                    true
                }
                None => false,
            }
        }
    }
}

/// Tests whether a world-space point lies inside an object's volume.
///
/// The enclosing sphere around the object's reference point rejects far
/// points before the transform is even composed, and spherical volumes
/// are fully classified by that check alone.
pub fn discrete_test(object: &impl Collidable, point: Point3<f32>) -> bool {
    let volume = object.hit_volume();

    if object.reference_point().distance2(point) > volume.bounding_radius_sq() {
        return false;
    }

    if volume.is_spherical() {
        return true;
    }

    let transform = volume_transform(object);
    let Some(inverse) = transform.invert() else {
        return false;
    };

    volume.contains_local_point(multiply_matrix4_and_point3(&inverse, point))
}

/// Tests a world-space segment against an object's volume, returning the
/// surface candidates when the segment crosses it.
pub fn continuous_test(object: &impl Collidable, p0: Point3<f32>, p1: Point3<f32>) -> Option<Intersection> {
    intersect_segment(object.hit_volume(), &volume_transform(object), p0, p1)
}

/// Tests a world-space segment against a volume positioned by an explicit
/// transform.
///
/// Both endpoints are mapped into volume-local space through the inverted
/// transform, cheap bounding-box rejection runs first, and the matching
/// shape solver handles the rest. A non-invertible transform reports a
/// miss.
pub fn intersect_segment(
    volume: &CollisionVolume,
    transform: &Matrix4<f32>,
    p0: Point3<f32>,
    p1: Point3<f32>,
) -> Option<Intersection> {
    let inverse = transform.invert()?;
    let local0 = multiply_matrix4_and_point3(&inverse, p0);
    let local1 = multiply_matrix4_and_point3(&inverse, p1);

    if segment_misses_bounds(volume, local0, local1) {
        return None;
    }

    match volume.shape() {
        VolumeShape::Ellipsoid => intersect_ellipsoid(volume, local0, local1),
        VolumeShape::Cylinder(primary) => intersect_cylinder(volume, primary, local0, local1),
        VolumeShape::Box => intersect_box(volume, local0, local1),
    }
}

// every shape fits the same local half-extent box, so one
// shape-independent range check rejects most misses before any root
// solving
fn segment_misses_bounds(volume: &CollisionVolume, p0: Point3<f32>, p1: Point3<f32>) -> bool {
    let half_scales = volume.half_scales();

    for index in 0..3 {
        let low = p0[index].min(p1[index]);
        let high = p0[index].max(p1[index]);

        if high < -half_scales[index] || low > half_scales[index] {
            return true;
        }
    }

    false
}

fn volume_transform(object: &impl Collidable) -> Matrix4<f32> {
    object.world_transform() * Matrix4::from_translation(object.hit_volume().offset())
}
