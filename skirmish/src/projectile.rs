use cgmath::{Point3, Vector3};

use crate::scenario::ShotDefinition;

/// A projectile flying in a straight line, one velocity step per tick.
pub struct Projectile {
    name: String,
    position: Point3<f32>,
    velocity: Vector3<f32>,
    remaining_ticks: u32,
    live: bool,
}

impl Projectile {
    pub fn new(definition: &ShotDefinition) -> Self {
        Projectile {
            name: definition.name.clone(),
            position: definition.origin,
            velocity: definition.velocity,
            remaining_ticks: definition.lifetime,
            live: definition.lifetime > 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Advances one tick and returns the movement segment flown, or `None`
    /// once the projectile is spent.
    pub fn advance(&mut self) -> Option<(Point3<f32>, Point3<f32>)> {
        if !self.live {
            return None;
        }

        let start = self.position;
        self.position += self.velocity;
        self.remaining_ticks -= 1;

        if self.remaining_ticks == 0 {
            self.live = false;
        }

        Some((start, self.position))
    }

    /// Removes the projectile from play, used once it hits something.
    pub fn deactivate(&mut self) {
        self.live = false;
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{Point3, Vector3};

    use crate::projectile::Projectile;
    use crate::scenario::ShotDefinition;

    fn shot(lifetime: u32) -> Projectile {
        Projectile::new(&ShotDefinition {
            name: "tracer".to_string(),
            origin: Point3::new(0.0, 0.0, 0.0),
            velocity: Vector3::new(5.0, 0.0, 0.0),
            lifetime,
        })
    }

    #[test]
    fn test_advance_yields_consecutive_segments() {
        let mut projectile = shot(3);

        assert_eq!(
            projectile.advance(),
            Some((Point3::new(0.0, 0.0, 0.0), Point3::new(5.0, 0.0, 0.0)))
        );
        assert_eq!(
            projectile.advance(),
            Some((Point3::new(5.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0)))
        );
    }

    #[test]
    fn test_lifetime_expiry() {
        let mut projectile = shot(2);

        assert!(projectile.advance().is_some());
        assert!(projectile.is_live());
        assert!(projectile.advance().is_some());
        assert!(!projectile.is_live());
        assert!(projectile.advance().is_none());
    }

    #[test]
    fn test_deactivated_projectile_stops() {
        let mut projectile = shot(5);

        projectile.advance();
        projectile.deactivate();

        assert!(!projectile.is_live());
        assert!(projectile.advance().is_none());
    }

    #[test]
    fn test_zero_lifetime_never_flies() {
        let mut projectile = shot(0);

        assert!(!projectile.is_live());
        assert!(projectile.advance().is_none());
    }
}
