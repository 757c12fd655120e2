//! Depth-limited genetic algorithm.
//!
//! Candidate solutions are fixed-length move sequences (genomes). Each round
//! evaluates every genome against the target, then rebuilds the population by
//! tournament selection, uniform crossover and swap mutation.
//!
//! This search is best effort. It reliably finds very short solutions but
//! usually fails to converge on puzzles that need more than a handful of moves;
//! returning `None` in that case is the expected outcome.
use super::{Puzzle, SolveResult, Solver};
use crate::engine::{Direction, Grid};
use crate::error::{ConfigError, InvalidTransition};
use crate::heuristics::squared_manhattan_distance;
use crate::moves::apply_direction;
use crate::step::SolutionStep;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use tracing::debug;

/// Parameters of the genetic search.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneticConfig {
    /// Number of individuals per generation.
    pub population_size: usize,
    /// Fitness given to a genome that reaches the target. Must exceed every
    /// score a non-solving genome can get, i.e. the depth limit.
    pub solved_fitness: i64,
    /// Share of the population visited by crossover each round; the number of
    /// crossover pairs is `population_size * crossover_fraction`.
    pub crossover_fraction: f64,
    /// Chance that a single gene position is swapped during crossover.
    pub crossover_probability: f64,
    /// Chance that an individual gets two of its genes swapped.
    pub mutation_probability: f64,
    /// Maximum number of generations.
    pub evolution_rounds: usize,
    /// Seed for the random source; `None` seeds from system entropy.
    pub seed: Option<u64>,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        GeneticConfig {
            population_size: 32768,
            solved_fitness: 123456,
            crossover_fraction: 0.5,
            crossover_probability: 0.5,
            mutation_probability: 0.01,
            evolution_rounds: 100,
            seed: None,
        }
    }
}

impl GeneticConfig {
    /// Checks the configuration for a run with genomes of `depth_limit` genes.
    pub fn validate(&self, depth_limit: usize) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        for (name, value) in [
            ("crossover fraction", self.crossover_fraction),
            ("crossover probability", self.crossover_probability),
            ("mutation probability", self.mutation_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { name, value });
            }
        }
        if self.solved_fitness <= depth_limit as i64 {
            return Err(ConfigError::SentinelTooLow {
                sentinel: self.solved_fitness,
                depth_limit,
            });
        }
        Ok(())
    }
}

/// A candidate move sequence and its last computed fitness.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Individual {
    genome: Vec<Direction>,
    fitness: i64,
}

impl Individual {
    fn random(length: usize, rng: &mut impl Rng) -> Self {
        let genome = (0..length)
            .map(|_| Direction::ALL[rng.gen_range(0..Direction::ALL.len())])
            .collect();
        Individual { genome, fitness: 0 }
    }

    pub fn from_genome(genome: Vec<Direction>) -> Self {
        Individual { genome, fitness: 0 }
    }

    pub fn genome(&self) -> &[Direction] {
        &self.genome
    }

    pub fn fitness(&self) -> i64 {
        self.fitness
    }

    /// Replays the genome from `initial` and scores how close it gets to `target`.
    ///
    /// - Reaching `target` cuts the genome right after the solving move and
    ///   scores `solved_fitness`.
    /// - An illegal move at gene `i` stops the replay and earns a bonus of `i`
    ///   (the number of moves that did play).
    /// - The bonus (zero if every gene played) is added to the negated squared
    ///   Manhattan distance between the last grid reached and `target`.
    pub fn evaluate(&mut self, initial: &Grid, target: &Grid, solved_fitness: i64) {
        let mut current = initial.clone();
        let mut bonus = 0;
        for (i, &direction) in self.genome.iter().enumerate() {
            let Some(next) = apply_direction(&current, direction) else {
                bonus = i as i64;
                break;
            };
            if &next == target {
                self.genome.truncate(i + 1);
                self.fitness = solved_fitness;
                return;
            }
            current = next;
        }
        self.fitness = bonus - squared_manhattan_distance(&current, target);
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.genome {
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

/// Genetic algorithm over move sequences of at most `depth_limit` moves.
#[derive(Debug)]
pub struct GeneticSearch {
    puzzle: Puzzle,
    depth_limit: usize,
    config: GeneticConfig,
    rng: SmallRng,
    population: Vec<Individual>,
}

impl GeneticSearch {
    /// # Errors
    /// Returns a `ConfigError` if `config` fails `GeneticConfig::validate`.
    pub fn new(
        puzzle: Puzzle,
        depth_limit: usize,
        config: GeneticConfig,
    ) -> Result<Self, ConfigError> {
        config.validate(depth_limit)?;
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Ok(GeneticSearch {
            puzzle,
            depth_limit,
            config,
            rng,
            population: Vec::new(),
        })
    }

    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    fn initialize(&mut self) {
        let mut population = Vec::with_capacity(self.config.population_size);
        for _ in 0..self.config.population_size {
            population.push(Individual::random(self.depth_limit, &mut self.rng));
        }
        self.population = population;
    }

    /// Scores every individual and sorts the population best first. Returns
    /// the solution if the best individual reaches the target.
    fn evaluate(&mut self) -> SolveResult {
        let initial = self.puzzle.initial();
        let target = self.puzzle.target();
        for individual in self.population.iter_mut() {
            individual.evaluate(initial, target, self.config.solved_fitness);
        }
        self.population.sort_by(|a, b| b.fitness.cmp(&a.fitness));

        match self.population.first() {
            Some(best) if best.fitness == self.config.solved_fitness => {
                replay_steps(initial, &best.genome).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Binary tournament: the fitter of two random picks survives, the second
    /// pick on a tie.
    fn select(&mut self) {
        let size = self.population.len();
        let mut next = Vec::with_capacity(size);
        while next.len() < size {
            let a = &self.population[self.rng.gen_range(0..size)];
            let b = &self.population[self.rng.gen_range(0..size)];
            next.push(if a.fitness > b.fitness { a.clone() } else { b.clone() });
        }
        self.population = next;
    }

    /// Uniform crossover between random pairs of distinct individuals.
    fn crossover(&mut self) {
        let size = self.population.len();
        let pairs = (size as f64 * self.config.crossover_fraction) as usize;
        for _ in 0..pairs {
            let a = self.rng.gen_range(0..size);
            let mut b = self.rng.gen_range(0..size);
            while b == a {
                b = self.rng.gen_range(0..size);
            }
            let (first, second) = pair_mut(&mut self.population, a, b);
            for (x, y) in first.genome.iter_mut().zip(second.genome.iter_mut()) {
                if self.rng.gen_bool(self.config.crossover_probability) {
                    std::mem::swap(x, y);
                }
            }
        }
    }

    /// Swaps two distinct genes of some individuals.
    fn mutate(&mut self) {
        for individual in self.population.iter_mut() {
            if individual.genome.len() < 2 || !self.rng.gen_bool(self.config.mutation_probability) {
                continue;
            }
            let positions: Vec<usize> =
                rand::seq::index::sample(&mut self.rng, individual.genome.len(), 2).into_vec();
            individual.genome.swap(positions[0], positions[1]);
        }
    }
}

/// Turns a solving genome back into solution steps.
fn replay_steps(
    initial: &Grid,
    genome: &[Direction],
) -> Result<Vec<SolutionStep>, InvalidTransition> {
    let mut steps = Vec::with_capacity(genome.len());
    let mut last = initial.clone();
    for &direction in genome {
        // A solving genome only holds legal moves; an illegal one surfaces as an
        // invalid transition between identical grids.
        let next = apply_direction(&last, direction).unwrap_or_else(|| last.clone());
        steps.push(SolutionStep::between(&last, &next)?);
        last = next;
    }
    Ok(steps)
}

/// Mutable references to two distinct elements of a slice.
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

impl fmt::Display for GeneticSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "depth-limited Genetic Algorithm (depth_limit={}, evolution_round={})",
            self.depth_limit, self.config.evolution_rounds
        )
    }
}

impl Solver for GeneticSearch {
    /// Evaluate, select, crossover, mutate; repeated until a genome solves the
    /// puzzle or the configured number of rounds is spent.
    fn solve(&mut self) -> SolveResult {
        if self.puzzle.is_solved() {
            return Ok(Some(Vec::new()));
        }
        self.initialize();
        for round in 0..self.config.evolution_rounds {
            if let Some(steps) = self.evaluate()? {
                debug!(round, steps = steps.len(), "genetic search reached the target");
                return Ok(Some(steps));
            }
            if let Some(best) = self.population.first() {
                debug!(round, fitness = best.fitness, individual = %best, "evolution round");
            }
            self.select();
            self.crossover();
            self.mutate();
        }
        Ok(None)
    }
}
