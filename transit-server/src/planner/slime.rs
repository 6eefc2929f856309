//! Slime-mould metaheuristic.
//!
//! Keeps a population of valid paths, each scored by the shared cost
//! model. Every round each member is either replaced by a fresh random
//! path (exploration), spliced with the best path so far (crossover), or
//! locally rerouted (mutation). A member is only replaced by a strictly
//! cheaper offspring, so the best fitness never gets worse.

use petgraph::graph::NodeIndex;
use rand::Rng;
use tracing::{debug, trace};

use crate::domain::Weights;
use crate::network::{TransitGraph, path_cost, random_path};

use super::SolvedPath;
use super::config::SlimeConfig;
use super::error::RouteError;
use super::operators::{Member, SearchSpace, crossover, mutate};

/// Keeps the weight log term away from `ln(1)`.
const EPSILON: f64 = 1e-10;

/// Search for a cheap origin to destination path.
pub fn solve_slime_mould<R: Rng>(
    graph: &TransitGraph,
    origin: &str,
    destination: &str,
    weights: &Weights,
    config: &SlimeConfig,
    rng: &mut R,
) -> Result<SolvedPath, RouteError> {
    let space = SearchSpace::new(graph, origin, destination)?;
    let fitness = |path: &[NodeIndex]| path_cost(graph, path, weights);

    let mut population = initial_population(&space, &fitness, config.population_size, rng);
    if population.is_empty() {
        return Err(RouteError::NoFeasibleSolution(
            "population initialization failed".to_string(),
        ));
    }
    sort_population(&mut population);
    let mut best = population[0].clone();
    debug!(
        size = population.len(),
        fitness = best.fitness,
        "initial population"
    );

    let total = config.iterations;
    for t in 0..total {
        let progress = t as f64 / total as f64;
        let a = (1.0 - progress).min(1.0 - 1e-9).atanh();
        let smell = smell_weights(&population, rng);

        for k in 0..population.len() {
            let offspring = if rng.gen_range(0.0..1.0) < config.exploration {
                random_path(graph, &space.origins, &space.destinations, rng)
            } else {
                let p = (population[k].fitness - best.fitness).abs().tanh();
                let r: f64 = rng.gen_range(0.0..1.0);
                if r < p {
                    let v = a * (2.0 * r - 1.0);
                    Some(crossover(&space, &best.path, &population, &smell, v, rng))
                } else {
                    let range = 1.0 - progress;
                    let v = rng.gen_range(-range..=range);
                    Some(mutate(&space, &population[k].path, v, rng))
                }
            };

            if let Some(path) = offspring {
                let f = fitness(&path);
                if f < population[k].fitness {
                    population[k] = Member { path, fitness: f };
                }
            }
        }

        sort_population(&mut population);
        if population[0].fitness < best.fitness {
            best = population[0].clone();
            trace!(iteration = t, fitness = best.fitness, "new best path");
        }
    }

    debug!(
        iterations = total,
        fitness = best.fitness,
        nodes = best.path.len(),
        "slime mould finished"
    );

    Ok(SolvedPath {
        path: best.path,
        cost: best.fitness,
    })
}

/// Random shortest paths under random edge weights. Unreachable pairs
/// and infinite-cost paths are dropped, so the result may be smaller than
/// `size` or empty.
fn initial_population<R, F>(space: &SearchSpace<'_>, fitness: &F, size: usize, rng: &mut R) -> Vec<Member>
where
    R: Rng,
    F: Fn(&[NodeIndex]) -> f64,
{
    (0..size)
        .filter_map(|_| random_path(space.graph, &space.origins, &space.destinations, rng))
        .filter_map(|path| {
            let f = fitness(&path);
            f.is_finite().then_some(Member { path, fitness: f })
        })
        .collect()
}

fn sort_population(population: &mut [Member]) {
    population.sort_by(|a, b| a.fitness.total_cmp(&b.fitness));
}

/// Selection weights for a population sorted best first.
///
/// The better half gets weights at or above 1, the worse half at or
/// below 1, scaled by how far each member sits between best and worst.
fn smell_weights<R: Rng>(population: &[Member], rng: &mut R) -> Vec<f64> {
    let (Some(best), Some(worst)) = (population.first(), population.last()) else {
        return Vec::new();
    };
    let (best, worst) = (best.fitness, worst.fitness);
    let half = population.len() / 2;

    population
        .iter()
        .enumerate()
        .map(|(rank, member)| {
            let spread = if best == worst {
                0.0
            } else {
                (best - member.fitness) / (best - worst)
            };
            let log_term = (spread + EPSILON + 1.0).ln();
            let r: f64 = rng.gen_range(0.0..1.0);
            if rank < half {
                1.0 + r * log_term
            } else {
                1.0 - r * log_term
            }
        })
        .collect()
}
