use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};

use tiles_and_points::{
    config::{Config, PuzzleConfig, ShowPath},
    geometry::{brute_force, closest_pair},
    points::{random_points, read_points, write_points},
    puzzle::{manhattan_distance, PuzzleState},
    replay::{self, TerminalKeys},
    search::{SearchStatus, Solver},
    solvability,
    validate::is_valid_path,
};

const RULE: &str = "============================================================";

#[derive(Parser)]
#[command(name = "tiles-and-points", version, about = "Sliding-tile A* solver and closest pair of points")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Solve a sliding-tile board with A* and the Manhattan heuristic
    Puzzle {
        /// Start board as comma-separated tiles, row-major; n*n is the blank
        #[arg(long, value_delimiter = ',')]
        start: Option<Vec<u32>>,
        /// Goal board, defaults to 1..=n*n
        #[arg(long, value_delimiter = ',')]
        goal: Option<Vec<u32>>,
        /// Start from a random solvable board of this size instead
        #[arg(long, conflicts_with = "start")]
        shuffle: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Stop after this many expansions
        #[arg(long)]
        max_nodes: Option<usize>,
        #[arg(long, value_enum)]
        show_path: Option<ShowPath>,
    },
    /// Find the closest pair of points in each file
    Pairs {
        /// Point files (two lines: x-coordinates, then y-coordinates)
        files: Vec<PathBuf>,
        /// Also run the quadratic search and compare
        #[arg(long)]
        brute_force: bool,
    },
    /// Write a file of random points
    GeneratePoints {
        out: PathBuf,
        #[arg(short = 'n', long, default_value_t = 100)]
        count: usize,
        /// Coordinates are drawn from -range..=range
        #[arg(long, default_value_t = 1000)]
        range: i64,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Cmd::Puzzle {
            start,
            goal,
            shuffle,
            seed,
            max_nodes,
            show_path,
        } => {
            if let Some(size) = shuffle {
                let board = PuzzleState::shuffled(size, &mut rng_from(seed))
                    .context("cannot shuffle a board of that size")?;
                config.puzzle.start = board.tiles().to_vec();
            }
            if let Some(start) = start {
                config.puzzle.start = start;
            }
            if goal.is_some() {
                config.puzzle.goal = goal;
            }
            if max_nodes.is_some() {
                config.puzzle.max_nodes = max_nodes;
            }
            if let Some(show_path) = show_path {
                config.puzzle.show_path = show_path;
            }
            run_puzzle(&config.puzzle)
        }
        Cmd::Pairs { files, brute_force } => {
            if !files.is_empty() {
                config.points.files = files;
            }
            config.points.compare_brute_force |= brute_force;
            run_pairs(&config);
            Ok(())
        }
        Cmd::GeneratePoints {
            out,
            count,
            range,
            seed,
        } => {
            let points = random_points(count, range, &mut rng_from(seed));
            write_points(&out, &points)?;
            println!("Wrote {} points to {}", count, out.display());
            Ok(())
        }
    }
}

fn run_puzzle(puzzle: &PuzzleConfig) -> anyhow::Result<()> {
    let start = puzzle.start_state().context("invalid start board")?;
    let goal = puzzle.goal_state(&start).context("invalid goal board")?;

    println!("{}", RULE);
    println!("SLIDING-TILE PUZZLE SOLVER");
    println!("Algorithm: branch and bound (A*)");
    println!("{}", RULE);
    println!("\nStart board:\n{}", start);
    println!("Goal board:\n{}", goal);

    println!("Checking whether the puzzle can be solved...");
    let report = solvability::check(&start);
    println!("{}", report);
    let reachable = if goal == PuzzleState::goal(goal.size())? {
        report.solvable
    } else {
        let reachable = solvability::same_parity_class(&start, &goal);
        println!(
            "The goal is {}reachable from the start.",
            if reachable { "" } else { "NOT " }
        );
        reachable
    };
    if !reachable {
        warn!("aborting: goal unreachable from start");
        println!("\nThe puzzle cannot be solved. Stopping.");
        println!("{}", RULE);
        return Ok(());
    }

    println!("\nSearching, initial estimate {} moves...", manhattan_distance(&start, &goal));
    let result = Solver::new(puzzle.search()).solve(&start, &goal)?;

    let path = match (&result.path, result.status) {
        (Some(path), _) => path,
        (None, SearchStatus::BudgetExhausted) => {
            println!(
                "No solution within {} expansions ({:.4} s).",
                result.nodes_explored,
                result.elapsed.as_secs_f64()
            );
            return Ok(());
        }
        (None, _) => {
            println!("No solution found.");
            return Ok(());
        }
    };

    println!("\nSolution found!");
    println!("Moves: {}", path.len() - 1);
    println!("Nodes explored: {}", result.nodes_explored);
    println!("Elapsed: {:.4} s", result.elapsed.as_secs_f64());
    if let Some(moves) = result.moves() {
        let labels: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
        println!("Blank moves: {}", labels.join(" "));
    }
    let valid = is_valid_path(path, &start, &goal);
    println!("Valid solution: {}", if valid { "yes" } else { "no" });

    let interactive = io::stdin().is_terminal();
    let show = match puzzle.show_path {
        ShowPath::Always => true,
        ShowPath::Never => false,
        ShowPath::Ask if interactive => {
            replay::confirm(&mut io::stdout(), &mut TerminalKeys, "\nShow the full solution path?")?
        }
        ShowPath::Ask => false,
    };
    if show {
        if interactive {
            replay::replay(&mut io::stdout(), &mut TerminalKeys, path)?;
        } else {
            for (step, state) in path.iter().enumerate() {
                println!("\nStep {}:\n{}", step, state);
            }
        }
    }

    println!("\n{}", RULE);
    Ok(())
}

fn run_pairs(config: &Config) {
    for file in &config.points.files {
        println!("Processing file: {}", file.display());
        let points = match read_points(file) {
            Ok(points) => points,
            Err(e) => {
                println!("Error: {}", e);
                continue;
            }
        };
        println!("Points read: {}", points.len());

        let started = Instant::now();
        let best = closest_pair(&points);
        let elapsed = started.elapsed();

        let Some((p, q)) = best.pair else {
            println!("No closest pair (fewer than two points).");
            continue;
        };
        info!("{}: closest pair {} {} at {}", file.display(), p, q, best.distance);
        println!("Closest pair: P{} and Q{}", p, q);
        println!("Minimum distance: {:.4}", best.distance);
        println!("Elapsed (divide and conquer): {:.6} s", elapsed.as_secs_f64());

        if config.points.compare_brute_force {
            let started = Instant::now();
            let baseline = brute_force(&points);
            let elapsed = started.elapsed();
            println!("Elapsed (brute force): {:.6} s", elapsed.as_secs_f64());
            if baseline.distance == best.distance {
                println!("Brute force agrees.");
            } else {
                warn!(
                    "{}: brute force {} vs divide and conquer {}",
                    file.display(),
                    baseline.distance,
                    best.distance
                );
                println!(
                    "MISMATCH: brute force found distance {:.4}",
                    baseline.distance
                );
            }
        }
        println!();
    }
}
