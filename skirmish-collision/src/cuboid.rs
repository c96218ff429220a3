use cgmath::{InnerSpace, MetricSpace, Point3};

use crate::COLLISION_EPSILON;
use crate::query::Intersection;
use crate::volume::CollisionVolume;

/// Intersects a volume-local ray segment with a box using the slab
/// method: the entry and exit parameters against each axis's pair of
/// parallel planes narrow one shared interval. Based on "Real-Time
/// Collision Detection" (2004), by Christer Ericson, section 5.3.3.
pub(crate) fn intersect_box(
    volume: &CollisionVolume,
    p0: Point3<f32>,
    p1: Point3<f32>,
) -> Option<Intersection> {
    let half_scales = volume.half_scales();

    let inside = p0.x > -half_scales.x
        && p0.x < half_scales.x
        && p0.y > -half_scales.y
        && p0.y < half_scales.y
        && p0.z > -half_scales.z
        && p0.z < half_scales.z;

    if inside {
        return Some(Intersection::origin_inside());
    }

    let span = p1 - p0;
    let segment_length_sq = span.magnitude2();
    if segment_length_sq == 0.0 {
        return None;
    }
    let direction = span.normalize();

    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;

    for index in 0..3 {
        if direction[index].abs() < COLLISION_EPSILON {
            // parallel to this slab: either inside it or a miss outright
            if p0[index] < -half_scales[index] || p0[index] > half_scales[index] {
                return None;
            }
            continue;
        }

        let entry = (-half_scales[index] - p0[index]) / direction[index];
        let exit = (half_scales[index] - p0[index]) / direction[index];
        let (entry, exit) = if entry <= exit { (entry, exit) } else { (exit, entry) };

        t_near = t_near.max(entry);
        t_far = t_far.min(exit);

        if t_near > t_far || t_far < 0.0 {
            return None;
        }
    }

    let point0 = p0 + direction * t_near;
    let point1 = p0 + direction * t_far;
    let hit0 = t_near > 0.0 && point0.distance2(p0) <= segment_length_sq;
    let hit1 = t_far > 0.0 && point1.distance2(p0) <= segment_length_sq;

    (hit0 || hit1).then_some(Intersection {
        hit0,
        hit1,
        t0: t_near,
        t1: t_far,
        point0,
        point1,
    })
}

#[cfg(test)]
mod tests {
    use cgmath::{Point3, Vector3, Zero, assert_relative_eq};

    use crate::cuboid::intersect_box;
    use crate::volume::{CollisionVolume, TestPolicy, VolumeShape};

    fn cube() -> CollisionVolume {
        CollisionVolume::new(
            VolumeShape::Box,
            TestPolicy::Continuous,
            Vector3::new(10.0, 10.0, 10.0),
            Vector3::zero(),
        )
        .unwrap()
    }

    #[test]
    fn test_straight_pass_through() {
        let volume = cube();

        let intersection = intersect_box(&volume, Point3::new(-20.0, 0.0, 0.0), Point3::new(20.0, 0.0, 0.0))
            .expect("segment crosses the box");

        assert!(intersection.hit0);
        assert!(intersection.hit1);
        assert_relative_eq!(intersection.t0, 15.0, epsilon = 1e-3);
        assert_relative_eq!(intersection.t1, 25.0, epsilon = 1e-3);
        assert_relative_eq!(intersection.point0, Point3::new(-5.0, 0.0, 0.0), epsilon = 1e-3);
        assert_relative_eq!(intersection.point1, Point3::new(5.0, 0.0, 0.0), epsilon = 1e-3);
    }

    #[test]
    fn test_origin_inside_reports_parameter_zero() {
        let volume = cube();

        let intersection = intersect_box(&volume, Point3::new(1.0, -2.0, 3.0), Point3::new(40.0, 0.0, 0.0))
            .expect("segment starts inside");

        assert!(intersection.hit0);
        assert!(intersection.hit1);
        assert_eq!(intersection.t0, 0.0);
        assert_eq!(intersection.t1, 0.0);
    }

    #[test]
    fn test_parallel_outside_slab() {
        let volume = cube();

        let intersection = intersect_box(&volume, Point3::new(-20.0, 7.0, 0.0), Point3::new(20.0, 7.0, 0.0));

        assert!(intersection.is_none());
    }

    #[test]
    fn test_interval_miss() {
        let volume = cube();

        let intersection = intersect_box(&volume, Point3::new(-20.0, 0.0, 0.0), Point3::new(0.0, 20.0, 0.0));

        assert!(intersection.is_none());
    }

    #[test]
    fn test_segment_stops_short_of_surface() {
        let volume = cube();

        let intersection = intersect_box(&volume, Point3::new(-20.0, 0.0, 0.0), Point3::new(-12.0, 0.0, 0.0));

        assert!(intersection.is_none());
    }

    #[test]
    fn test_receding_ray() {
        let volume = cube();

        let intersection = intersect_box(&volume, Point3::new(-20.0, 0.0, 0.0), Point3::new(-30.0, 0.0, 0.0));

        assert!(intersection.is_none());
    }

    #[test]
    fn test_origin_on_surface() {
        let volume = cube();

        let intersection = intersect_box(&volume, Point3::new(5.0, 0.0, 0.0), Point3::new(-5.0, 0.0, 0.0))
            .expect("segment starts on the surface and passes through");

        // the starting point itself is not a forward crossing, only the
        // far surface is
        assert!(!intersection.hit0);
        assert!(intersection.hit1);
        assert_relative_eq!(intersection.t1, 10.0, epsilon = 1e-3);
        assert_relative_eq!(intersection.point1, Point3::new(-5.0, 0.0, 0.0), epsilon = 1e-3);
    }

    #[test]
    fn test_diagonal_corner_entry() {
        let volume = cube();

        let intersection = intersect_box(&volume, Point3::new(-15.0, -15.0, 0.0), Point3::new(15.0, 15.0, 0.0))
            .expect("diagonal segment crosses the box");

        assert!(intersection.hit0);
        assert!(intersection.hit1);
        assert_relative_eq!(intersection.point0, Point3::new(-5.0, -5.0, 0.0), epsilon = 1e-3);
        assert_relative_eq!(intersection.point1, Point3::new(5.0, 5.0, 0.0), epsilon = 1e-3);
    }
}
