//! Tile Link entry point
//!
//! Terminal front-end for the puzzle core. One event loop serializes stdin
//! commands and 1 Hz clock ticks into the game, then prints the resulting
//! state. All rules live in the library; this binary only forwards events
//! in and renders snapshots out.

use std::io::BufRead;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tile_link::consts::MATCH_REWARD;
use tile_link::game::{Game, Pos, RoundEvent, RoundPhase, RoundSnapshot};
use tile_link::level::Level;

/// Inbound events for the single game actor
enum UiEvent {
    Command(String),
    Tick,
    Eof,
}

fn main() {
    env_logger::init();
    log::info!("Tile Link starting...");

    let level = std::env::args()
        .nth(1)
        .and_then(|s| Level::from_str(&s))
        .unwrap_or_default();
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut game = match Game::at_level(level, seed) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("cannot start round: {e}");
            std::process::exit(1);
        }
    };
    log::info!("session seed {}, level {}", seed, level.as_str());

    let (tx, rx) = mpsc::channel();

    // Clock: one tick per second, independent of user input
    let tick_tx = tx.clone();
    thread::spawn(move || {
        loop {
            thread::sleep(Duration::from_secs(1));
            if tick_tx.send(UiEvent::Tick).is_err() {
                break;
            }
        }
    });

    // Stdin commands
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(UiEvent::Command(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(UiEvent::Eof);
    });

    println!("Pick two matching icons that a straight line can join.");
    print_help();
    render(&game.snapshot());

    while let Ok(event) = rx.recv() {
        match event {
            UiEvent::Tick => {
                for event in game.tick() {
                    announce(&event);
                }
            }
            UiEvent::Command(line) => {
                if !handle_command(&mut game, line.trim()) {
                    break;
                }
            }
            UiEvent::Eof => break,
        }
    }
    log::info!("Tile Link exiting");
}

/// Apply one stdin command; returns false to quit
fn handle_command(game: &mut Game, line: &str) -> bool {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        [] => {}
        ["quit"] | ["q"] | ["exit"] => return false,
        ["help"] | ["h"] => print_help(),
        ["board"] | ["b"] => render(&game.snapshot()),
        ["json"] => match serde_json::to_string_pretty(&game.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("snapshot failed: {e}"),
        },
        ["restart"] | ["r"] => {
            if game.restart().is_ok() {
                println!("New round!");
                render(&game.snapshot());
            }
        }
        ["level", name] => match Level::from_str(name) {
            Some(level) => {
                if game.set_level(level).is_ok() {
                    println!("Level: {}", level.as_str());
                    render(&game.snapshot());
                }
            }
            None => println!("Unknown level '{name}' (easy, medium, hard)"),
        },
        [row, col] => match (row.parse(), col.parse()) {
            (Ok(row), Ok(col)) => {
                for event in game.choose_cell(Pos::new(row, col)) {
                    announce(&event);
                }
                render(&game.snapshot());
            }
            _ => println!("Expected: <row> <col>"),
        },
        _ => print_help(),
    }
    true
}

fn announce(event: &RoundEvent) {
    match event {
        RoundEvent::Matched { .. } => println!("Matched! +{MATCH_REWARD}"),
        RoundEvent::IconMismatch { .. } => println!("Icons don't match!"),
        RoundEvent::NotConnectable { .. } => println!("No clear line between those icons!"),
        RoundEvent::Won { score } => println!("You win! Final score: {score}"),
        RoundEvent::Lost => println!("Time's up! Game over"),
    }
}

fn render(snapshot: &RoundSnapshot) {
    println!();
    println!(
        "score {:>4}   time {:>3}   {}",
        snapshot.score,
        snapshot.time_remaining,
        phase_label(snapshot.phase)
    );
    print!("   ");
    for col in 0..snapshot.cols {
        print!("{col:>2} ");
    }
    println!();
    for row in 0..snapshot.rows {
        print!("{row:>2} ");
        for col in 0..snapshot.cols {
            let cell = &snapshot.cells[row * snapshot.cols + col];
            let glyph = if cell.matched {
                '.'
            } else {
                cell.icon.glyph()
            };
            if snapshot.selection.contains(&Pos::new(row, col)) {
                print!("[{glyph}]");
            } else {
                print!(" {glyph} ");
            }
        }
        println!();
    }
}

fn phase_label(phase: RoundPhase) -> &'static str {
    match phase {
        RoundPhase::Playing => "playing",
        RoundPhase::Won => "WON",
        RoundPhase::Lost => "LOST",
    }
}

fn print_help() {
    println!("Commands:");
    println!("  <row> <col>         choose a cell");
    println!("  level <difficulty>  switch level (easy, medium, hard)");
    println!("  restart             new round at the current level");
    println!("  board               reprint the board");
    println!("  json                dump the round snapshot as JSON");
    println!("  quit                leave the game");
}
