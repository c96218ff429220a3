use cgmath::{EuclideanSpace, InnerSpace, MetricSpace, Point3, Vector3};

use crate::COLLISION_EPSILON;
use crate::query::Intersection;
use crate::volume::CollisionVolume;

/// Intersects a volume-local ray segment with an ellipsoid.
///
/// Both endpoints are rescaled by the inverse half-scales first, turning
/// the general surface equation into the canonical unit sphere so a single
/// scalar quadratic covers every ellipsoid. Based on "Real-Time Collision
/// Detection" (2004), by Christer Ericson, section 5.3.2.
pub(crate) fn intersect_ellipsoid(
    volume: &CollisionVolume,
    p0: Point3<f32>,
    p1: Point3<f32>,
) -> Option<Intersection> {
    let inverse_scales = volume.inv_half_scales();
    let unit0 = Vector3::new(p0.x * inverse_scales.x, p0.y * inverse_scales.y, p0.z * inverse_scales.z);
    let unit1 = Vector3::new(p1.x * inverse_scales.x, p1.y * inverse_scales.y, p1.z * inverse_scales.z);

    if unit0.magnitude2() <= 1.0 {
        return Some(Intersection::origin_inside());
    }

    let span = unit1 - unit0;
    if span.magnitude2() == 0.0 {
        return None;
    }
    let direction = span.normalize();

    // unit-sphere surface equation along the ray; the normalized
    // direction leaves the squared term without a coefficient
    let b = 2.0 * unit0.dot(direction);
    let c = unit0.magnitude2() - 1.0;
    let discriminant = b * b - 4.0 * c;

    if discriminant < -COLLISION_EPSILON {
        return None;
    }

    let segment_length_sq = p0.distance2(p1);
    let half_scales = volume.half_scales();
    let surface_point = |parameter: f32| {
        let unit_point = unit0 + direction * parameter;
        Point3::new(
            unit_point.x * half_scales.x,
            unit_point.y * half_scales.y,
            unit_point.z * half_scales.z,
        )
    };

    if discriminant < COLLISION_EPSILON {
        // tangent ray, a single root
        let t0 = -b * 0.5;
        let point0 = surface_point(t0);
        let hit0 = t0 > 0.0 && point0.distance2(p0) <= segment_length_sq;

        hit0.then_some(Intersection {
            hit0,
            hit1: false,
            t0,
            t1: 0.0,
            point0,
            point1: Point3::origin(),
        })
    } else {
        let root = discriminant.sqrt();
        let t0 = (-b + root) * 0.5;
        let t1 = (-b - root) * 0.5;
        let point0 = surface_point(t0);
        let point1 = surface_point(t1);
        let hit0 = t0 > 0.0 && point0.distance2(p0) <= segment_length_sq;
        let hit1 = t1 > 0.0 && point1.distance2(p0) <= segment_length_sq;

        (hit0 || hit1).then_some(Intersection {
            hit0,
            hit1,
            t0,
            t1,
            point0,
            point1,
        })
    }
}
