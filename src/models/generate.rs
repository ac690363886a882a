//! Random catalog generation.
//!
//! Produces plausible task lists and rosters for demos, benchmarks and
//! tests. Ranges mirror the ones used by the ticket board tooling:
//! weights 10..=100, capacities 10..=30, hourly rates 50..=200.

use rand::seq::SliceRandom;
use rand::Rng;

use super::{Professional, Task};

const NAME_POOL: [&str; 20] = [
    "rafael", "gabriel", "joao", "maria", "ana", "carlos", "paulo", "lucas", "pedro", "antonio",
    "rafaela", "juliana", "marcos", "roberto", "fernando", "ricardo", "eduardo", "andre", "felipe",
    "luana",
];

/// Generates `count` tasks named `Ticket 1..=count` with weights in `10..=100`.
pub fn random_tasks<R: Rng>(count: usize, rng: &mut R) -> Vec<Task> {
    (0..count)
        .map(|i| Task::new(format!("Ticket {}", i + 1), rng.random_range(10..=100) as f64))
        .collect()
}

/// Generates `count` professionals with distinct names.
///
/// Names are drawn without replacement from a fixed pool; once the pool
/// is exhausted a numeric suffix keeps them unique.
pub fn random_professionals<R: Rng>(count: usize, rng: &mut R) -> Vec<Professional> {
    let mut names = NAME_POOL;
    names.shuffle(rng);

    (0..count)
        .map(|i| {
            let base = names[i % names.len()];
            let name = if i < names.len() {
                base.to_string()
            } else {
                format!("{base}-{}", i / names.len() + 1)
            };
            Professional::new(
                name,
                rng.random_range(10..=30) as f64,
                rng.random_range(50..=200) as f64,
            )
        })
        .collect()
}
