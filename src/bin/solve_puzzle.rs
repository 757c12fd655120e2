use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use sliding_solver::engine::{Grid, BLANK_SYMBOL, DEFAULT_SIZE};
use sliding_solver::heuristics::{is_reachable, manhattan_distance};
use sliding_solver::moves::scramble;
use sliding_solver::solver::{
    BreadthFirstSearch, DepthFirstSearch, GeneticConfig, GeneticSearch, Puzzle, Solver,
};
use sliding_solver::utils::{grid_from_str_array, puzzle_from_text};
use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Breadth-first search, shortest solution
    Bfs,
    /// Depth-limited depth-first search
    Dfs,
    /// Depth-limited genetic algorithm (best effort)
    Genetic,
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// File holding the initial grid rows followed by the target grid rows.
    /// Rows are read from stdin when omitted.
    puzzle_file: Option<PathBuf>,

    /// Search strategy
    #[clap(short, long, value_enum, default_value_t = Strategy::Bfs)]
    strategy: Strategy,

    /// Depth limit, required by the dfs and genetic strategies
    #[clap(short, long)]
    depth: Option<usize>,

    /// Grid size (rows and columns)
    #[clap(short = 'n', long, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Solve a random puzzle this many moves away from the solved grid instead of reading one
    #[clap(long, conflicts_with = "puzzle_file")]
    scramble: Option<usize>,

    /// Seed for --scramble and the genetic algorithm
    #[clap(long)]
    seed: Option<u64>,

    /// Genetic algorithm: individuals per generation
    #[clap(long)]
    population: Option<usize>,

    /// Genetic algorithm: maximum number of generations
    #[clap(long)]
    rounds: Option<usize>,

    /// Genetic algorithm: per-gene crossover probability
    #[clap(long)]
    crossover_probability: Option<f64>,

    /// Genetic algorithm: per-individual mutation probability
    #[clap(long)]
    mutation_probability: Option<f64>,

    /// Enable verbose logging
    #[clap(short, long)]
    verbose: bool,
}

fn read_grid_from_stdin(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    size: usize,
) -> Result<Grid> {
    let mut rows = Vec::with_capacity(size);
    while rows.len() < size {
        match lines.next() {
            Some(line) => {
                let line = line.context("Failed to read from stdin")?;
                if !line.trim().is_empty() {
                    rows.push(line);
                }
            }
            None => break,
        }
    }
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    Ok(grid_from_str_array(&rows, size)?)
}

fn read_puzzle(args: &Args) -> Result<Puzzle> {
    let (initial, target) = if let Some(path) = &args.puzzle_file {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read puzzle file {}", path.display()))?;
        puzzle_from_text(&content, args.size)
            .with_context(|| format!("Invalid puzzle in {}", path.display()))?
    } else if let Some(moves) = args.scramble {
        let target = Grid::solved(args.size)?;
        let mut rng = match args.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        (scramble(&target, moves, &mut rng), target)
    } else {
        println!(
            "Please input a {size}x{size} grid as the initial arrangement, and leave a '{BLANK_SYMBOL}' where the blank lies.",
            size = args.size
        );
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        let initial = read_grid_from_stdin(&mut lines, args.size).context("Invalid initial grid")?;
        println!("Initial grid {} confirmed. Please input the target grid:", initial);
        let target = read_grid_from_stdin(&mut lines, args.size).context("Invalid target grid")?;
        println!("Target grid {} confirmed.", target);
        (initial, target)
    };
    Ok(Puzzle::new(initial, target)?)
}

fn build_solver(args: &Args, puzzle: Puzzle) -> Result<Box<dyn Solver>> {
    let depth = || {
        args.depth.with_context(|| {
            format!("The {:?} strategy needs a depth limit (--depth)", args.strategy)
        })
    };
    let solver: Box<dyn Solver> = match args.strategy {
        Strategy::Bfs => Box::new(BreadthFirstSearch::new(puzzle)),
        Strategy::Dfs => Box::new(DepthFirstSearch::new(puzzle, depth()?)),
        Strategy::Genetic => {
            let defaults = GeneticConfig::default();
            let config = GeneticConfig {
                population_size: args.population.unwrap_or(defaults.population_size),
                evolution_rounds: args.rounds.unwrap_or(defaults.evolution_rounds),
                crossover_probability: args
                    .crossover_probability
                    .unwrap_or(defaults.crossover_probability),
                mutation_probability: args
                    .mutation_probability
                    .unwrap_or(defaults.mutation_probability),
                seed: args.seed,
                ..defaults
            };
            Box::new(GeneticSearch::new(puzzle, depth()?, config)?)
        }
    };
    Ok(solver)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    if args.strategy == Strategy::Bfs && args.depth.is_some() {
        warn!("Breadth-first search has no depth limit; ignoring --depth");
    }

    let puzzle = read_puzzle(&args)?;
    info!(initial = %puzzle.initial(), target = %puzzle.target(), "Puzzle loaded");
    info!(
        lower_bound = manhattan_distance(puzzle.initial(), puzzle.target()),
        "Moves needed at least"
    );
    if !is_reachable(puzzle.initial(), puzzle.target()) {
        warn!("The target cannot be reached from the initial grid; expect no solution");
    }

    let mut solver = build_solver(&args, puzzle)?;
    info!("Solving the puzzle with {}...", solver);
    let solution = solver
        .solve()
        .with_context(|| format!("{} produced an invalid solution", solver))?;

    match solution {
        None => println!("No solution found using {}, sorry.", solver),
        Some(steps) => {
            println!(
                "Solution found, with {} steps in total. Please follow the steps below:",
                steps.len()
            );
            for step in &steps {
                println!(" {}", step);
            }
        }
    }
    Ok(())
}
