use blackjack::{CountStatistics, Pacing, RoundEngine, Shoe, TableRules, DEFAULT_DECKS};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::error::Error;
use std::io::{self, Write};

mod console;
use console::TerminalConsole;

mod tui_logger;
use tui_logger::TuiLogger;

mod ui;

const RULE: &str = "═══════════════════════════════════════════════════════════════════";

#[derive(Parser)]
#[command(
    name = "terminal-blackjack",
    about = "Single-player blackjack in the terminal with a live Hi-Lo count"
)]
struct Cli {
    /// Number of decks in the shoe (1-8). Asked for interactively when omitted.
    #[arg(short, long, env = "BLACKJACK_DECKS")]
    decks: Option<String>,

    /// Seed the shoe for a reproducible session
    #[arg(long, env = "BLACKJACK_SEED")]
    seed: Option<u64>,

    /// Skip the pauses between steps
    #[arg(long, default_value_t = false)]
    fast: bool,

    /// Print the final statistics as JSON after quitting
    #[arg(long, default_value_t = false)]
    json_summary: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let (logger, log_buffer) = TuiLogger::new();
    log::set_boxed_logger(Box::new(logger))
        .map(|()| log::set_max_level(log::LevelFilter::Info))?;

    print_welcome();

    let deck_input = match cli.decks {
        Some(decks) => decks,
        None => prompt_deck_count()?,
    };
    let (num_decks, notice) = deck_count_or_default(&deck_input);
    if let Some(notice) = notice {
        println!("{notice}");
        // also shown in the log pane
        log::warn!("{notice}");
    }
    println!("Starting game with {num_decks} deck(s)...");

    let pacing = if cli.fast {
        Pacing::instant()
    } else {
        Pacing::default()
    };
    let rules = TableRules::new(num_decks)?.with_pacing(pacing);
    let shoe = match cli.seed {
        Some(seed) => Shoe::with_seed(num_decks, seed)?,
        None => Shoe::new(num_decks)?,
    };
    let mut engine = RoundEngine::with_shoe(shoe, rules);
    log::info!("New shoe: {num_decks} deck(s), {} cards", engine.shoe().total_count());

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    let mut console = TerminalConsole::new(terminal, log_buffer);
    let res = engine.run(&mut console);

    // restore terminal
    let mut terminal = console.into_terminal();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Game aborted: {err}");
        return Err(err.into());
    }

    print_farewell(&engine);
    if cli.json_summary {
        println!("{}", serde_json::to_string_pretty(engine.stats())?);
    }

    Ok(())
}

/// Parsed deck count, or the default plus a notice explaining the fallback
fn deck_count_or_default(input: &str) -> (u8, Option<String>) {
    match TableRules::parse_deck_count(input) {
        Ok(num_decks) => (num_decks, None),
        Err(e) => (
            DEFAULT_DECKS,
            Some(format!("{e}. Using default: {DEFAULT_DECKS} deck.")),
        ),
    }
}

fn print_welcome() {
    println!("{RULE}");
    println!("                    WELCOME TO TERMINAL BLACKJACK");
    println!("{RULE}");
    println!();
    println!("This game includes Hi-Lo card counting:");
    println!("  • Low cards (2-6): +1  |  Neutral (7-9): 0  |  High (10-A): -1");
    println!("  • Running Count (R): Raw total since shuffle");
    println!("  • True Count (T): Running count ÷ decks remaining");
    println!();
    println!("Track the count at the top of the screen during play!");
    println!("Press (L) during play to show or hide the log.");
    println!("{RULE}");
    println!();
}

fn prompt_deck_count() -> io::Result<String> {
    print!("How many decks would you like to play with? 1-8 (Press Enter for default: 1): ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

fn print_farewell(engine: &RoundEngine) {
    let stats: &CountStatistics = engine.stats();
    let shoe = engine.shoe();

    println!("{RULE}");
    println!("  TERMINAL BLACKJACK");
    println!("{RULE}");
    println!(
        "  Cards: {}/{} | W: {} | L: {} | T: {} | Win Rate: {}%",
        shoe.remaining_count(),
        shoe.total_count(),
        stats.games_won,
        stats.games_lost,
        stats.games_tied,
        stats.win_rate()
    );
    println!(
        "  Hi-Lo: R {} / T {} | BJ: {} | Busts: P:{} D:{}",
        ui::signed(stats.running_count),
        ui::signed(engine.true_count()),
        stats.blackjacks,
        stats.busts,
        stats.dealer_busts
    );
    println!("{RULE}");
    println!();
    println!("Thanks for playing Terminal Blackjack!");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_deck_count_has_no_notice() {
        assert_eq!(deck_count_or_default("6\n"), (6, None));
        assert_eq!(deck_count_or_default("\n"), (DEFAULT_DECKS, None));
    }

    #[test]
    fn test_invalid_deck_count_falls_back_with_notice() {
        let (num_decks, notice) = deck_count_or_default("12");
        assert_eq!(num_decks, DEFAULT_DECKS);
        let notice = notice.unwrap();
        assert!(notice.contains("12"));
        assert!(notice.ends_with("Using default: 1 deck."));

        let (num_decks, notice) = deck_count_or_default("lots");
        assert_eq!(num_decks, DEFAULT_DECKS);
        assert!(notice.is_some());
    }
}
