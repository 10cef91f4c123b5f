//! Display functions for command results

use super::formatters::{colored_guess, create_progress_bar};
use crate::commands::{EvaluationSummary, PlayResult};
use colored::Colorize;

/// Print the attempt trace of a single episode
pub fn print_play_result(result: &PlayResult, verbose: bool) {
    let report = &result.report;
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Target: {}   Strategy: {}",
        report.target.text().bright_yellow().bold(),
        report.strategy.bright_cyan()
    );
    println!("{}", "─".repeat(60).cyan());

    for record in &result.records {
        println!(
            "\nTurn {}: {}  {}  {}",
            record.attempt,
            colored_guess(&record.guess, record.feedback),
            record.feedback,
            format!("{:+.2}", record.reward).bright_black()
        );

        if verbose {
            println!(
                "  Candidates:  {} → {}",
                record.candidates_before, record.candidates_after
            );
            println!(
                "  Info gained: {:.3} bits ({:.1}% eliminated)",
                record.information_gain(),
                record.reduction_rate() * 100.0
            );
            println!(
                "  Distance:    hamming {}, levenshtein {}",
                record.hamming, record.levenshtein
            );
            if !record.violations.is_clean() {
                println!(
                    "  {} green {}, yellow {}, gray {}",
                    "Violations:".red(),
                    record.violations.green,
                    record.violations.yellow,
                    record.violations.gray
                );
            }
            if record.strategy != report.strategy {
                println!("  Played by:   {}", record.strategy);
            }
        }
    }

    println!();
    println!("Total reward: {:.2}", report.total_reward);
    if report.solved {
        println!(
            "{}",
            format!("✅ Solved in {} guesses!", report.attempts)
                .green()
                .bold()
        );
    } else {
        println!(
            "{}",
            format!(
                "❌ Failed to solve in {} guesses ({} candidates left)",
                report.attempts, report.remaining
            )
            .red()
            .bold()
        );
    }
}

/// Print evaluation statistics
pub fn print_evaluation_summary(summary: &EvaluationSummary) {
    println!("\n{}", "═".repeat(70));
    println!(" Evaluation: {} ", summary.strategy.bright_cyan().bold());
    println!("{}", "═".repeat(70));

    println!("\n📊 {}", "Overall Performance".bright_cyan().bold());
    println!("  Games played:     {}", summary.games);
    println!(
        "  Wins:             {} {}",
        summary.wins,
        format!("({:.1}%)", summary.win_rate() * 100.0).green()
    );
    if summary.losses() > 0 {
        println!(
            "  Losses:           {} {}",
            summary.losses(),
            format!("({:.1}%)", (1.0 - summary.win_rate()) * 100.0).red()
        );
    }
    if summary.contradictions > 0 {
        println!(
            "  Contradictions:   {}",
            summary.contradictions.to_string().red().bold()
        );
    }
    println!(
        "  Mean attempts:    {}",
        format!("{:.3}", summary.mean_attempts())
            .bright_yellow()
            .bold()
    );
    println!("  Mean reward:      {:.2}", summary.mean_reward());
    println!(
        "  Total time:       {:.2}s",
        summary.duration.as_secs_f64()
    );

    println!("\n📈 {}", "Attempt Distribution".bright_cyan().bold());
    let max_count = (1..=summary.loss_sentinel)
        .map(|a| summary.count_for(a))
        .max()
        .unwrap_or(0);
    for attempts in 1..=summary.loss_sentinel {
        let count = summary.count_for(attempts);
        let pct = if summary.games > 0 {
            count as f64 / summary.games as f64 * 100.0
        } else {
            0.0
        };
        let bar = create_progress_bar(count as f64, max_count as f64, 40);
        let label = if attempts == summary.loss_sentinel {
            "X".red().to_string()
        } else {
            attempts.to_string()
        };
        let bar = if attempts == summary.loss_sentinel {
            bar.red()
        } else {
            bar.green()
        };
        println!("  {label}: {bar} {count:5} ({pct:5.1}%)");
    }

    if !summary.missed.is_empty() {
        let shown: Vec<&str> = summary.missed.iter().take(10).map(|w| w.text()).collect();
        println!("\n⚠️  {} {}", "Missed:".yellow(), shown.join(", "));
        if summary.missed.len() > shown.len() {
            println!("   … and {} more", summary.missed.len() - shown.len());
        }
    }
}
