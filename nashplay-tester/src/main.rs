mod logic;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use nashplay_game::{GameCatalog, GameKind};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use logic::{GameResult, GameTester, RunRecord, resolve_seed_inputs};
use util::split_csv;

#[derive(Debug, Parser)]
#[command(name = "nashplay-tester", version = "0.1.0")]
#[command(about = "Solve, play out and check the Coin Toss and Rock-Paper-Scissors equilibria")]
struct Args {
    /// Games to run (comma-separated: cointoss, rps, all)
    #[arg(long, default_value = "all")]
    games: String,

    /// List all available games and exit
    #[arg(long)]
    list_games: bool,

    /// Seeds to run (comma-separated integers, 0x-hex, or 'random')
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of playouts per seed; each iteration advances the seed by one
    #[arg(long, default_value_t = 1)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Print each playout's narration in the console report
    #[arg(long)]
    show_narration: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_games(&args)? {
        return Ok(());
    }

    if args.report == "console" {
        announce_banner();
    }

    let start_time = Instant::now();
    let games = expand_games(&args.games)?;
    let seeds = resolve_seed_inputs(&split_csv(&args.seeds))?;
    let tester = GameTester::new(GameCatalog::load_from_static(), args.verbose);

    let (results, records) = run_games(&tester, &games, &seeds, args.iterations.max(1));

    write_reports(&args, &results, &records, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_games(args: &Args) -> Result<bool> {
    if !args.list_games {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available games:")?;
    for game in GameKind::ALL {
        writeln!(output_target.writer(), "  {:10} - {}", game.key(), game.title())?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🎲 Nashplay Equilibrium Tester".bright_cyan().bold());
    println!("{}", "==============================".cyan());
}

fn expand_games(games_arg: &str) -> Result<Vec<GameKind>> {
    let mut games = Vec::new();
    for token in split_csv(games_arg) {
        if token.eq_ignore_ascii_case("all") {
            games.extend(GameKind::ALL);
            continue;
        }
        let game: GameKind = token.parse()?;
        games.push(game);
    }
    let mut seen = Vec::with_capacity(games.len());
    games.retain(|game| {
        if seen.contains(game) {
            false
        } else {
            seen.push(*game);
            true
        }
    });
    if games.is_empty() {
        anyhow::bail!("no games selected");
    }
    Ok(games)
}

fn run_games(
    tester: &GameTester,
    games: &[GameKind],
    seeds: &[u64],
    iterations: usize,
) -> (Vec<GameResult>, Vec<RunRecord>) {
    let mut results = Vec::with_capacity(games.len());
    let mut records = Vec::new();
    for &game in games {
        let (result, mut runs) = tester.run_game(game, seeds, iterations);
        log::info!(
            "{game}: {}/{} runs passed",
            result.successful_runs,
            result.runs
        );
        results.push(result);
        records.append(&mut runs);
    }
    (results, records)
}

fn write_reports(
    args: &Args,
    results: &[GameResult],
    records: &[RunRecord],
    start_time: Instant,
) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut output_target, results, records)?,
        "markdown" => logic::reports::generate_markdown_report(&mut output_target, results)?,
        _ => {
            logic::reports::generate_console_report(
                &mut output_target,
                results,
                records,
                args.show_narration,
                start_time.elapsed(),
            )?;
            writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
