//! Headless match runner (default binary).
//!
//! Plays 1-4 autopilot players on a virtual 16ms clock and prints the final
//! standings, as text or JSON.
//!
//! ```text
//! blockfall --players 3 --difficulty hard --seed 7 --steps 20000 --json
//! ```

use anyhow::Result;

use blockfall::runner::{parse_run_args, report_text, run};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_run_args(&args)?;

    eprintln!(
        "[blockfall] {} player(s), difficulty {}, seed {}, up to {} ticks",
        config.players,
        config.difficulty.name(),
        config.seed,
        config.steps
    );

    let report = run(&config)?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report_text(&report));
    }

    match report.winner {
        Some(id) => eprintln!(
            "[blockfall] match over after {} ticks, winner id {}",
            report.steps, id
        ),
        None if report.finished => {
            eprintln!("[blockfall] game over after {} ticks", report.steps)
        }
        None => eprintln!("[blockfall] stopped at step limit"),
    }
    Ok(())
}
