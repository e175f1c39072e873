use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use super::{GameResult, RunRecord};

#[derive(Serialize)]
struct JsonReport<'a> {
    games: &'a [GameResult],
    runs: &'a [RunRecord],
}

pub fn generate_console_report(
    out: &mut dyn Write,
    results: &[GameResult],
    records: &[RunRecord],
    show_narration: bool,
    total_duration: Duration,
) -> Result<()> {
    if show_narration {
        for record in records {
            writeln!(
                out,
                "{} seed {}",
                format!("▶ {}", record.game.title()).bright_white().bold(),
                record.seed
            )?;
            for line in &record.narration {
                writeln!(out, "   {line}")?;
            }
            writeln!(out)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", "📊 Equilibrium Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "==============================".cyan())?;

    let total_games = results.len();
    let passed_games = results.iter().filter(|r| r.passed).count();
    let failed_games = total_games - passed_games;

    writeln!(out, "Total games: {total_games}")?;
    writeln!(out, "Passed: {}", passed_games.to_string().green())?;
    writeln!(out, "Failed: {}", failed_games.to_string().red())?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };

        writeln!(out, "{} {}", status, result.game.title().bold())?;
        writeln!(
            out,
            "   Runs: {}/{} successful",
            result.successful_runs, result.runs
        )?;
        writeln!(
            out,
            "   Outcomes: Player 1 {} | Player 2 {} | ties {} | unfinished {}",
            result.p1_wins, result.p2_wins, result.ties, result.unfinished
        )?;
        writeln!(out, "   Mean turns: {:.2}", result.mean_turns)?;
        writeln!(out, "   Average time: {:?}", result.average_duration())?;

        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_json_report(
    out: &mut dyn Write,
    results: &[GameResult],
    records: &[RunRecord],
) -> Result<()> {
    let report = JsonReport {
        games: results,
        runs: records,
    };
    let json_output = serde_json::to_string_pretty(&report)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, results: &[GameResult]) -> Result<()> {
    writeln!(out, "# Nashplay Equilibrium Results\n")?;

    let total_games = results.len();
    let passed_games = results.iter().filter(|r| r.passed).count();

    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total games**: {total_games}")?;
    writeln!(out, "- **Passed**: {passed_games}")?;
    writeln!(out, "- **Failed**: {}\n", total_games - passed_games)?;

    writeln!(out, "## Detailed Results\n")?;
    writeln!(
        out,
        "| Game | Status | Runs | P1 wins | P2 wins | Ties | Unfinished | Mean turns |"
    )?;
    writeln!(out, "|---|---|---|---|---|---|---|---|")?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(
            out,
            "| {} | {} | {}/{} | {} | {} | {} | {} | {:.2} |",
            result.game.title(),
            status,
            result.successful_runs,
            result.runs,
            result.p1_wins,
            result.p2_wins,
            result.ties,
            result.unfinished,
            result.mean_turns
        )?;
    }

    for result in results.iter().filter(|r| !r.failures.is_empty()) {
        writeln!(out, "\n### Failures: {}\n", result.game.title())?;
        for failure in &result.failures {
            writeln!(out, "- {failure}")?;
        }
    }
    Ok(())
}
