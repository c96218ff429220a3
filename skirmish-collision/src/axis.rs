/// An axis in 3D space.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub enum Axis {
    /// X Axis.
    X = 0,
    /// Y Axis.
    Y = 1,
    /// Z Axis.
    Z = 2,
}

impl Axis {
    /// Index of this axis into the components of a point or vector.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The two axes orthogonal to this one, in X to Y to Z order.
    ///
    /// For a cylinder these span the elliptical cross-section while the
    /// primary axis carries the height.
    pub const fn secondary_axes(self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }
}
