use cgmath::{EuclideanSpace, InnerSpace, MetricSpace, Point3, Vector3};

use crate::COLLISION_EPSILON;
use crate::axis::Axis;
use crate::query::Intersection;
use crate::volume::CollisionVolume;

/// Intersects a volume-local ray segment with an elliptical cylinder.
///
/// The quadratic is built from the ray components on the two secondary
/// axes only, giving the crossings of the infinite cylinder's side
/// surface. Roots whose primary-axis coordinate falls outside the end-cap
/// span, and rays running parallel to the primary axis, are resolved
/// against the cap planes instead.
pub(crate) fn intersect_cylinder(
    volume: &CollisionVolume,
    primary: Axis,
    p0: Point3<f32>,
    p1: Point3<f32>,
) -> Option<Intersection> {
    let (second, third) = primary.secondary_axes();
    let height_index = primary.index();
    let radial_index0 = second.index();
    let radial_index1 = third.index();

    let half_scales = volume.half_scales();
    let half_scales_sq = volume.half_scales_sq();
    let inverse_scales = volume.inv_half_scales();
    let half_height = half_scales[height_index];

    let between_caps = p0[height_index] > -half_height && p0[height_index] < half_height;
    let radial0 = p0[radial_index0] * inverse_scales[radial_index0];
    let radial1 = p0[radial_index1] * inverse_scales[radial_index1];

    if between_caps && radial0 * radial0 + radial1 * radial1 <= 1.0 {
        return Some(Intersection::origin_inside());
    }

    let span = p1 - p0;
    let segment_length_sq = span.magnitude2();
    if segment_length_sq == 0.0 {
        return None;
    }
    let direction = span.normalize();

    // cross-section ellipse equation along the ray, using only the
    // secondary-axis components
    let a = direction[radial_index0] * direction[radial_index0] / half_scales_sq[radial_index0]
        + direction[radial_index1] * direction[radial_index1] / half_scales_sq[radial_index1];
    let b = 2.0
        * (p0[radial_index0] * direction[radial_index0] / half_scales_sq[radial_index0]
            + p0[radial_index1] * direction[radial_index1] / half_scales_sq[radial_index1]);
    let c = p0[radial_index0] * p0[radial_index0] / half_scales_sq[radial_index0]
        + p0[radial_index1] * p0[radial_index1] / half_scales_sq[radial_index1]
        - 1.0;

    let mut hit0 = false;
    let mut hit1 = false;
    let mut t0 = 0.0;
    let mut t1 = 0.0;
    let mut point0 = Point3::origin();
    let mut point1 = Point3::origin();

    // a vanishing quadratic term means the ray runs parallel to the
    // cylinder axis and can only enter through a cap
    if a > 0.0 {
        let discriminant = b * b - 4.0 * a * c;

        if discriminant < -COLLISION_EPSILON {
            // the infinite ray misses the infinite cylinder, which makes
            // the caps unreachable as well
            return None;
        }

        if discriminant < COLLISION_EPSILON {
            // tangent ray, a single root
            t0 = -b / (2.0 * a);
            point0 = p0 + direction * t0;

            if point0[height_index] > -half_height && point0[height_index] < half_height {
                hit0 = t0 > 0.0 && point0.distance2(p0) <= segment_length_sq;
            }
        } else {
            let root = discriminant.sqrt();
            t0 = (-b + root) / (2.0 * a);
            t1 = (-b - root) / (2.0 * a);
            point0 = p0 + direction * t0;
            point1 = p0 + direction * t1;

            if point0[height_index] > -half_height && point0[height_index] < half_height {
                hit0 = t0 > 0.0 && point0.distance2(p0) <= segment_length_sq;
            }

            if point1[height_index] > -half_height && point1[height_index] < half_height {
                hit1 = t1 > 0.0 && point1.distance2(p0) <= segment_length_sq;
            }
        }
    }

    // candidates that failed on the side surface can still cross an end
    // cap; slot 0 resolves against the -h plane, slot 1 against the +h
    // plane
    if !hit0 {
        (hit0, t0, point0) = intersect_cap(volume, primary, -half_height, p0, direction, segment_length_sq);
    }
    if !hit1 {
        (hit1, t1, point1) = intersect_cap(volume, primary, half_height, p0, direction, segment_length_sq);
    }

    (hit0 || hit1).then_some(Intersection {
        hit0,
        hit1,
        t0,
        t1,
        point0,
        point1,
    })
}

/// Intersects the ray against the end-cap plane at the given signed
/// primary-axis position, validating the crossing against the
/// cross-section ellipse and the segment length.
fn intersect_cap(
    volume: &CollisionVolume,
    primary: Axis,
    cap_position: f32,
    origin: Point3<f32>,
    direction: Vector3<f32>,
    segment_length_sq: f32,
) -> (bool, f32, Point3<f32>) {
    let (second, third) = primary.secondary_axes();
    let height_index = primary.index();
    let radial_index0 = second.index();
    let radial_index1 = third.index();
    let half_scales_sq = volume.half_scales_sq();

    // a ray parallel to the cap plane cannot cross it
    if direction[height_index].abs() < COLLISION_EPSILON {
        return (false, 0.0, Point3::origin());
    }

    let t = -(origin[height_index] - cap_position) / direction[height_index];
    let point = origin + direction * t;
    let radial = point[radial_index0] * point[radial_index0] / half_scales_sq[radial_index0]
        + point[radial_index1] * point[radial_index1] / half_scales_sq[radial_index1];
    let valid = t > 0.0 && radial <= 1.0 && point.distance2(origin) <= segment_length_sq;

    (valid, t, point)
}
