mod object;
mod projectile;
mod scenario;
mod world;

use std::env;
use std::process::ExitCode;

use crate::scenario::Scenario;
use crate::world::World;

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    if let Err(error) = rayon::ThreadPoolBuilder::new().num_threads(4).build_global() {
        log::error!("failed to build the worker thread pool: {}", error);
        return ExitCode::FAILURE;
    }

    let scenario = match env::args().nth(1) {
        Some(path) => Scenario::load(&path),
        None => Scenario::bundled(),
    };

    let scenario = match scenario {
        Ok(scenario) => scenario,
        Err(error) => {
            log::error!("failed to load scenario: {}", error);
            return ExitCode::FAILURE;
        }
    };

    let mut world = match World::new(&scenario) {
        Ok(world) => world,
        Err(error) => {
            log::error!("failed to build world: {}", error);
            return ExitCode::FAILURE;
        }
    };

    world.run();
    ExitCode::SUCCESS
}
