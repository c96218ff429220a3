use cgmath::{MetricSpace, Point3};
use rayon::prelude::*;
use skirmish_collision::{Intersection, QueryStats, detect_hit};

use crate::object::Target;
use crate::projectile::Projectile;
use crate::scenario::{Scenario, ScenarioError};

/// The simulated battlefield: stationary targets, flying projectiles, and
/// the query counters accumulated over the run.
pub struct World {
    name: String,
    targets: Vec<Target>,
    projectiles: Vec<Projectile>,
    stats: QueryStats,
}

struct HitReport {
    projectile_index: usize,
    target_index: usize,
    distance_sq: f32,
    impact: Point3<f32>,
}

impl World {
    pub fn new(scenario: &Scenario) -> Result<Self, ScenarioError> {
        let targets = scenario.objects.iter().map(Target::new).collect::<Result<Vec<_>, _>>()?;
        let projectiles = scenario.projectiles.iter().map(Projectile::new).collect();

        Ok(World {
            name: scenario.name.clone(),
            targets,
            projectiles,
            stats: QueryStats::new(),
        })
    }

    /// Ticks the simulation until every projectile has hit something or
    /// expired.
    pub fn run(&mut self) {
        log::info!(
            "running scenario `{}` with {} targets and {} projectiles",
            self.name,
            self.targets.len(),
            self.projectiles.len()
        );

        let mut tick = 0;
        while self.projectiles.iter().any(Projectile::is_live) {
            tick += 1;
            self.step(tick);
        }

        log::info!(
            "finished after {} ticks: {} discrete and {} continuous tests",
            tick,
            self.stats.discrete_tests,
            self.stats.continuous_tests
        );
    }

    fn step(&mut self, tick: u32) {
        let segments: Vec<(usize, Point3<f32>, Point3<f32>)> = self
            .projectiles
            .iter_mut()
            .enumerate()
            .filter_map(|(index, projectile)| projectile.advance().map(|(start, end)| (index, start, end)))
            .collect();

        let targets = &self.targets;
        let (mut reports, batch_stats) = segments
            .par_iter()
            .fold(
                || (Vec::new(), QueryStats::new()),
                |mut accumulator, &(projectile_index, start, end)| {
                    for (target_index, target) in targets.iter().enumerate() {
                        let mut query = Intersection::miss();

                        if detect_hit(target, start, end, Some(&mut query), &mut accumulator.1) {
                            // parameter-0 contacts happen at the query point itself;
                            // surface crossings are remapped into world space
                            let (distance_sq, impact) = match query.nearest_hit() {
                                Some((parameter, local_point)) if parameter > 0.0 => {
                                    let impact = target.impact_point(local_point);
                                    (start.distance2(impact), impact)
                                }
                                _ => (0.0, start),
                            };

                            accumulator.0.push(HitReport {
                                projectile_index,
                                target_index,
                                distance_sq,
                                impact,
                            });
                        }
                    }

                    accumulator
                },
            )
            .reduce(
                || (Vec::new(), QueryStats::new()),
                |mut a, mut b| {
                    a.0.append(&mut b.0);
                    a.1.merge(&b.1);
                    a
                },
            );

        self.stats.merge(&batch_stats);

        // nearest hit wins for each projectile
        reports.sort_by(|a, b| {
            a.projectile_index
                .cmp(&b.projectile_index)
                .then(a.distance_sq.total_cmp(&b.distance_sq))
        });

        for report in reports {
            let projectile = &mut self.projectiles[report.projectile_index];
            if !projectile.is_live() {
                continue;
            }

            projectile.deactivate();
            log::info!(
                "tick {}: {} hit {} at ({:.2}, {:.2}, {:.2})",
                tick,
                projectile.name(),
                self.targets[report.target_index].name(),
                report.impact.x,
                report.impact.y,
                report.impact.z
            );
        }

        log::debug!("tick {}: tested {} movement segments", tick, segments.len());
    }
}
