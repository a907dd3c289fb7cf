//! Simple interactive CLI mode
//!
//! Line-based game loop without the TUI

use crate::core::{Category, Difficulty, GameError, GameSession, GuessOutcome};
use crate::output::formatters::{attempts_label, best_label, history_line};
use crate::storage::BestScoreStore;
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Run the simple interactive CLI mode on stdin/stdout
///
/// # Errors
///
/// Returns an error if reading stdin or writing stdout fails.
pub fn run_simple(difficulty: Difficulty, store: &mut BestScoreStore) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_simple_with(stdin.lock(), stdout.lock(), difficulty, store)
}

/// Run the game loop against arbitrary input/output streams
///
/// End of input behaves like `quit`.
///
/// # Errors
///
/// Returns an error if reading `input` or writing `output` fails.
pub fn run_simple_with<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    difficulty: Difficulty,
    store: &mut BestScoreStore,
) -> io::Result<()> {
    writeln!(output, "\n╔══════════════════════════════════════════════════════════════╗")?;
    writeln!(output, "║                 Guess the Number - Simple Mode               ║")?;
    writeln!(output, "╚══════════════════════════════════════════════════════════════╝\n")?;
    writeln!(output, "Find the hidden number. After each guess you'll hear how close you are.")?;
    writeln!(
        output,
        "Commands: 'quit' to exit, 'new' for new game, 'level <easy|medium|hard|expert>', 'stats'\n"
    )?;

    let mut session = GameSession::start(difficulty);
    announce(&mut output, &session, store)?;

    loop {
        let Some(line) = prompt(&mut input, &mut output, "Your guess")? else {
            writeln!(output, "\n👋 Thanks for playing!\n")?;
            return Ok(());
        };

        match line.to_lowercase().as_str() {
            "quit" | "q" | "exit" => {
                writeln!(output, "\n👋 Thanks for playing!\n")?;
                return Ok(());
            }
            "new" | "n" => {
                session.restart();
                writeln!(output, "\n🔄 New game started!")?;
                announce(&mut output, &session, store)?;
                continue;
            }
            "stats" | "s" => {
                print_stats(&mut output, &session, store)?;
                continue;
            }
            cmd if cmd.starts_with("level") => {
                let name = cmd.trim_start_matches("level").trim();
                match name.parse::<Difficulty>() {
                    Ok(level) => {
                        session = GameSession::start(level);
                        writeln!(output, "\n🔄 Switched level!")?;
                        announce(&mut output, &session, store)?;
                    }
                    Err(err) => writeln!(output, "❌ {err}\n")?,
                }
                continue;
            }
            _ => {}
        }

        match session.submit_guess(&line) {
            Ok(GuessOutcome::Hint(feedback)) => {
                let text = format!("{feedback}");
                let styled = match feedback.category() {
                    Category::Hot => text.bright_red().bold(),
                    Category::Warm => text.yellow(),
                    Category::Cold => text.bright_blue(),
                };
                writeln!(output, "   {styled}  ({})", attempts_label(session.attempts()))?;
            }
            Ok(GuessOutcome::FirstGuessRejected) => {
                if let Some(feedback) = session.feedback() {
                    writeln!(output, "   {}", feedback.to_string().bright_magenta())?;
                }
            }
            Ok(GuessOutcome::Won { attempts }) => {
                celebrate(&mut output, &session, store, attempts)?;

                let answer = prompt(&mut input, &mut output, "Play again? (yes/no)")?;
                let again = answer.is_some_and(|a| matches!(a.to_lowercase().as_str(), "yes" | "y"));
                if again {
                    session.restart();
                    writeln!(output, "\n🔄 New game started!")?;
                    announce(&mut output, &session, store)?;
                } else {
                    writeln!(output, "\n👋 Thanks for playing!\n")?;
                    return Ok(());
                }
            }
            Err(GameError::InvalidInput { .. }) => {
                if let Some(feedback) = session.feedback() {
                    writeln!(output, "   ❌ {}", feedback.message().bright_black())?;
                }
            }
            Err(err) => writeln!(output, "   ❌ {err}")?,
        }
    }
}

fn announce<W: Write>(
    output: &mut W,
    session: &GameSession,
    store: &BestScoreStore,
) -> io::Result<()> {
    let level = session.difficulty();
    writeln!(output, "────────────────────────────────────────────────────────────")?;
    writeln!(
        output,
        "{} {}  •  {}-{}  •  best: {}",
        level.icon(),
        level.name().bold(),
        level.min_value(),
        level.max_value(),
        best_label(store.best(level))
    )?;
    writeln!(output, "────────────────────────────────────────────────────────────")
}

fn celebrate<W: Write>(
    output: &mut W,
    session: &GameSession,
    store: &mut BestScoreStore,
    attempts: u32,
) -> io::Result<()> {
    let level = session.difficulty();
    let previous = store.best(level);
    let improved = store.record_if_better(level, attempts);

    writeln!(output, "\n{}", "═".repeat(62).bright_cyan())?;
    writeln!(
        output,
        "{}",
        "        🎉 ✨  B R A V O !  ✨ 🎉        ".bright_green().bold()
    )?;
    writeln!(output, "{}", "═".repeat(62).bright_cyan())?;
    writeln!(
        output,
        "\n  You found {} in {}!",
        session.target().to_string().bright_yellow().bold(),
        attempts_label(attempts).bright_cyan().bold()
    )?;
    writeln!(output, "  Guesses: {}", history_line(session.history()))?;

    if improved {
        match previous {
            Some(old) => writeln!(output, "  🏆 New best for {} (was {old})!", level.name())?,
            None => writeln!(output, "  🏆 First win on {}!", level.name())?,
        }
    } else {
        writeln!(output, "  Best on {}: {}", level.name(), best_label(store.best(level)))?;
    }
    writeln!(output)
}

fn print_stats<W: Write>(
    output: &mut W,
    session: &GameSession,
    store: &BestScoreStore,
) -> io::Result<()> {
    let level = session.difficulty();
    writeln!(output, "\n📊 {}", "Statistics".bright_cyan().bold())?;
    writeln!(output, "   Level:     {} {}", level.icon(), level.name())?;
    writeln!(output, "   Attempts:  {}", session.attempts())?;
    writeln!(output, "   Best:      {}", best_label(store.best(level)))?;
    if !session.history().is_empty() {
        writeln!(output, "   History:   {}", history_line(session.history()))?;
    }
    writeln!(output)
}

/// Print a prompt and read one trimmed line; `None` at end of input
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(output, "{label}: ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
