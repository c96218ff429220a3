//! Collision volumes and intersection queries for battlefield objects.
#![warn(missing_docs)]

mod axis;
mod cuboid;
mod cylinder;
mod detect;
mod ellipsoid;
mod query;
mod volume;

pub use axis::Axis;
use cgmath::{EuclideanSpace, Matrix4, Point3};
pub use detect::{Collidable, continuous_test, detect_hit, discrete_test, intersect_segment};
pub use query::{Intersection, QueryStats};
pub use volume::{CollisionVolume, TestPolicy, VolumeError, VolumeShape};

/// Tolerance below which quadratic discriminants and ray direction
/// components are treated as exactly zero, so floating point noise does
/// not turn tangent rays into misses.
pub const COLLISION_EPSILON: f32 = 1e-4;

/// Multiplies a 4x4 matrix with a 3 component vector, treating the vector as a
/// point in 3D space.
pub fn multiply_matrix4_and_point3(matrix: &Matrix4<f32>, vector: Point3<f32>) -> Point3<f32> {
    let adjusted_vector = matrix * vector.to_homogeneous();
    Point3::from_vec((adjusted_vector / adjusted_vector.w).truncate())
}

#[cfg(test)]
mod tests {
    use cgmath::{Deg, EuclideanSpace, Matrix4, Point3, SquareMatrix, Vector3, assert_relative_eq};

    use crate::multiply_matrix4_and_point3;

    #[test]
    fn test_multiply_matrix4_and_point3() {
        let translation = Point3::new(1.0, 2.0, 3.0);
        let matrix = Matrix4::from_translation(translation.to_vec());
        let vector = Point3::new(4.0, 5.0, 6.0);
        let result = multiply_matrix4_and_point3(&matrix, vector);
        assert_relative_eq!(result, Point3::new(5.0, 7.0, 9.0), epsilon = 1e-6);
    }

    #[test]
    fn test_matrix_round_trip() {
        let matrix = Matrix4::from_translation(Vector3::new(5.0, -3.0, 2.0))
            * Matrix4::from_angle_y(Deg(40.0))
            * Matrix4::from_nonuniform_scale(2.0, 1.0, 0.5);
        let inverse = matrix.invert().unwrap();

        let point = Point3::new(1.0, 2.0, 3.0);
        let round_trip = multiply_matrix4_and_point3(&inverse, multiply_matrix4_and_point3(&matrix, point));

        assert_relative_eq!(round_trip, point, epsilon = 1e-4);
    }
}
