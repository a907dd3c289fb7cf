//! Display functions for command results

use super::formatters::{best_label, create_progress_bar};
use crate::commands::SimulationResult;
use crate::core::Difficulty;
use crate::storage::BestScoreStore;
use colored::Colorize;

/// Print the best-score table for every level
pub fn print_best_scores(store: &BestScoreStore) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BEST SCORES".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    if let Some(path) = store.path() {
        println!("\n📁 {}", path.display().to_string().bright_black());
    } else {
        println!("\n📁 {}", "(not saved)".bright_black());
    }

    println!();
    for level in Difficulty::ALL {
        let best = store.best(level);
        let value = best_label(best);
        let value = if best.is_some() {
            value.bright_yellow().bold()
        } else {
            value.bright_black()
        };
        println!(
            "   {} {:<8} {:>3}-{:<4} best: {}",
            level.icon(),
            level.name(),
            level.min_value(),
            level.max_value(),
            value
        );
    }
    println!();
}

/// Print the result of a simulation run
pub fn print_simulation_result(result: &SimulationResult) {
    let level = result.difficulty;

    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} {} ",
        "SIMULATION:".bright_cyan().bold(),
        level.icon(),
        level.name().bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Games played:     {}", result.total_games);
    println!(
        "   Average attempts: {}",
        format!("{:.2}", result.average_attempts)
            .bright_yellow()
            .bold()
    );
    println!(
        "   Best case:        {}",
        format!("{}", result.min_attempts).green()
    );
    println!(
        "   Worst case:       {}",
        format!("{}", result.max_attempts).yellow()
    );
    println!(
        "   Lucky first hits: {} (refused)",
        result.first_guess_rejections
    );
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Games/second:     {:.1}", result.games_per_second);

    if result.total_games == 0 {
        return;
    }

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    let mut buckets: Vec<_> = result.distribution.iter().collect();
    buckets.sort_unstable_by_key(|(attempts, _)| **attempts);
    for (attempts, &count) in buckets {
        let pct = (count as f64 / result.total_games as f64) * 100.0;
        let bar = create_progress_bar(pct, 100.0, 40);
        println!("   {attempts:>2}: {} {count:6} ({pct:5.1}%)", bar.green());
    }
}
