//! Command line front end for the crossfill solver.
//!
//! Reads a JSON puzzle file, solves it, and prints the filled grid and the answers.
//!
//! # Usage
//!
//! ```sh
//! cargo run --bin crossfill -- crates/crossfill-cli/demos/mini.json
//! ```
//!
//! Clean noisy candidates and fill isolated gaps from a word list:
//!
//! ```sh
//! cargo run --bin crossfill -- --clean --dictionary crates/crossfill-cli/demos/words.txt \
//!     crates/crossfill-cli/demos/mini.json
//! ```
//!
//! Set `RUST_LOG=debug` to trace every ensemble round.

use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
    process,
};

use clap::Parser;
use crossfill_core::{Puzzle, WordList, candidates::CleanOptions};
use crossfill_solver::{
    Engine, EngineConfig, EnsembleConfig, FillResult, SearchBudget, SolverError,
};

use self::puzzle_file::{PuzzleFile, PuzzleFileError, SolvedFile};

mod puzzle_file;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Puzzle file in JSON format.
    #[arg(value_name = "PUZZLE")]
    puzzle: PathBuf,

    /// Newline-separated word list for gap filling and candidate cleaning.
    #[arg(short, long, value_name = "FILE")]
    dictionary: Option<PathBuf>,

    /// Clean raw candidates before solving.
    #[arg(long)]
    clean: bool,

    /// With --clean, keep only candidates found in the dictionary.
    #[arg(long, requires = "dictionary")]
    known_words_only: bool,

    /// Run the ensemble rounds on all cores.
    #[arg(long)]
    parallel: bool,

    /// Search nodes allowed per ensemble round.
    #[arg(long, value_name = "COUNT", default_value_t = SearchBudget::default().max_nodes)]
    max_nodes: usize,

    /// Solutions collected per ensemble round.
    #[arg(long, value_name = "COUNT", default_value_t = SearchBudget::default().max_solutions)]
    max_solutions: usize,

    /// Leave unanswered cells blank instead of guessing them.
    #[arg(long)]
    no_gap_fill: bool,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,

    /// Print statistics for every ensemble round.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
enum CliError {
    #[display("cannot read {}: {source}", path.display())]
    #[from(skip)]
    Read { path: PathBuf, source: io::Error },
    #[display("malformed puzzle file: {_0}")]
    Json(serde_json::Error),
    #[display("{_0}")]
    PuzzleFile(PuzzleFileError),
    #[display("{_0}")]
    Solver(SolverError),
}

fn main() {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    if args.max_nodes == 0 || args.max_solutions == 0 {
        eprintln!("--max-nodes and --max-solutions must be at least 1.");
        process::exit(2);
    }

    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let dictionary = match &args.dictionary {
        Some(path) => {
            let words = WordList::from_reader(BufReader::new(open(path)?))
                .map_err(|source| CliError::Read {
                    path: path.clone(),
                    source,
                })?;
            log::info!("loaded {} dictionary words", words.len());
            words
        }
        None => WordList::new(),
    };

    let puzzle = load_puzzle(args, &dictionary)?;
    let config = EngineConfig {
        ensemble: EnsembleConfig {
            parallel: args.parallel,
            budget: SearchBudget {
                max_nodes: args.max_nodes,
                max_solutions: args.max_solutions,
            },
        },
        fill_gaps: !args.no_gap_fill,
    };
    let mut engine = Engine::with_config(puzzle, config)?;
    let result = engine.solve(&dictionary)?;

    if args.json {
        let solved = SolvedFile::new(&result.grid, &result.solution);
        println!("{}", serde_json::to_string_pretty(&solved)?);
    } else {
        print_result(engine.puzzle(), &result, args.verbose);
    }
    Ok(())
}

fn open(path: &Path) -> Result<File, CliError> {
    File::open(path).map_err(|source| CliError::Read {
        path: path.to_owned(),
        source,
    })
}

fn load_puzzle(args: &Args, dictionary: &WordList) -> Result<Puzzle, CliError> {
    let file: PuzzleFile = serde_json::from_reader(BufReader::new(open(&args.puzzle)?))?;
    let clean = args.clean.then(|| CleanOptions {
        require_dictionary_word: args.known_words_only,
        ..CleanOptions::default()
    });
    let puzzle = file.to_puzzle(clean.as_ref(), Some(dictionary))?;
    log::info!(
        "loaded {}x{} puzzle with {} clues",
        puzzle.layout().size(),
        puzzle.layout().size(),
        puzzle.clue_count()
    );
    Ok(puzzle)
}

fn print_result(puzzle: &Puzzle, result: &FillResult, verbose: bool) {
    println!("{}", result.grid);
    println!();

    for clue in puzzle.clues() {
        let id = clue.id().to_string();
        let answer = result.solution.answer(clue.id()).unwrap_or("-");
        if clue.text().is_empty() {
            println!("{id:>4}  {answer}");
        } else {
            println!("{id:>4}  {answer:<8} {}", clue.text());
        }
    }
    println!();
    println!(
        "Answered {}/{} clues, guessed {} cells, {} cells blank.",
        result.solution.len(),
        puzzle.clue_count(),
        result.gap_fill.filled.len(),
        result.grid.blank_cells().len()
    );

    if verbose {
        println!();
        println!(
            "{:>8} {:>8} {:>8} {:>10} {:>10} {:>6}",
            "leave", "pruned", "wiped", "nodes", "solutions", "best"
        );
        for round in &result.rounds {
            println!(
                "{:>8} {:>8} {:>8} {:>10} {:>10} {:>6}{}",
                round.leave_out.to_string(),
                round.ac3.removed,
                round.ac3.wiped_out,
                round.search.nodes,
                round.solutions,
                round.best_coverage,
                if round.search.exhausted { " (budget)" } else { "" }
            );
        }
    }
}
