use std::io::{self, BufRead, Write};

use anyhow::{Context, Error};
use klondike_engine::{DrawOutcome, Game, Lift, MoveOutcome, PileId};
use log::{info, warn};
use pico_args::Arguments;

const HELP: &str = "\
Play Klondike solitaire in the terminal

USAGE:
  klondike [OPTIONS]

OPTIONS:
  --seed       N           Deal seed  [default: env KLONDIKE_SEED or random]

FLAGS:
  --color                  Always color cards
  --no-color               Never color cards
  -h, --help               Print help information

ENVIRONMENT:
  KLONDIKE_SEED            Deal seed
  RUST_LOG                 Log filter, e.g. debug
";

const COMMANDS: &str = "\
commands:
  d                 draw from stock (recycles an empty stock)
  m FROM TO [N]     move the top N cards (default 1) from FROM to TO
  u / r             undo / redo
  n [SEED]          new game
  s                 print the board as JSON
  h                 this help
  q                 quit
piles: s (stock), w (waste), f1-f4 (foundations), t1-t7 (tableaus)
";

struct Config {
    seed: Option<u64>,
    color: Option<bool>,
}

impl Config {
    fn from_args() -> Result<Self, Error> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            print!("{HELP}");
            std::process::exit(0);
        }

        let seed = match pargs.opt_value_from_str("--seed")? {
            Some(seed) => Some(seed),
            None => std::env::var("KLONDIKE_SEED")
                .ok()
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("KLONDIKE_SEED must be an unsigned integer")?,
        };
        let color = if pargs.contains("--no-color") {
            Some(false)
        } else if pargs.contains("--color") {
            Some(true)
        } else {
            None
        };

        let rest = pargs.finish();
        if !rest.is_empty() {
            warn!("Ignoring unrecognized arguments: {rest:?}");
        }
        Ok(Self { seed, color })
    }
}

fn parse_pile(token: &str) -> Option<PileId> {
    match token {
        "s" => Some(PileId::Stock),
        "w" => Some(PileId::Waste),
        _ => {
            let mut chars = token.chars();
            let kind = chars.next()?;
            // Piles are numbered from 1 for the player.
            let idx = chars.as_str().parse::<u8>().ok()?.checked_sub(1)?;
            match kind {
                'f' => Some(PileId::Foundation(idx)),
                't' => Some(PileId::Tableau(idx)),
                _ => None,
            }
        }
    }
}

fn report_draw(draw: DrawOutcome) {
    match draw {
        DrawOutcome { drew: Some(card), .. } => println!("Drew {card}"),
        DrawOutcome { recycled: true, .. } => println!("Waste turned back into stock"),
        _ => println!("Stock and waste are empty"),
    }
}

fn run_move(game: &mut Game, args: &[&str]) -> Result<(), Error> {
    let [from, to, rest @ ..] = args else {
        println!("usage: m FROM TO [N]");
        return Ok(());
    };
    let (Some(source), Some(destination)) = (parse_pile(from), parse_pile(to)) else {
        println!("unknown pile; try s, w, f1-f4, t1-t7");
        return Ok(());
    };
    let lift = match rest.first() {
        Some(n) => Lift::Count(n.parse().context("card count must be a number")?),
        None => Lift::Top,
    };
    match game.attempt_move(source, lift, destination)? {
        MoveOutcome::Accepted { .. } => {}
        MoveOutcome::Rejected(reason) => println!("Can't move: {reason}"),
    }
    Ok(())
}

/// Runs one command line. Returns `false` once the player quits.
fn handle(game: &mut Game, line: &str) -> Result<bool, Error> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        [] => {}
        ["q" | "quit", ..] => return Ok(false),
        ["h" | "help", ..] => print!("{COMMANDS}"),
        ["d" | "draw", ..] => report_draw(game.draw_stock()),
        ["m" | "move", args @ ..] => run_move(game, args)?,
        ["u" | "undo", ..] => {
            if !game.undo() {
                println!("Nothing to undo");
            }
        }
        ["r" | "redo", ..] => {
            if !game.redo() {
                println!("Nothing to redo");
            }
        }
        ["n" | "new", seed @ ..] => {
            let seed = seed
                .first()
                .map(|s| s.parse::<u64>())
                .transpose()
                .context("seed must be an unsigned integer")?;
            game.new_game(seed);
        }
        ["s" | "snapshot", ..] => {
            println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
            return Ok(true);
        }
        [other, ..] => println!("unknown command '{other}', h for help"),
    }
    if let Some(card) = game.take_revealed() {
        println!("Turned up {card}");
    }
    println!("{}", game.snapshot());
    if game.is_won() {
        println!("\nEvery card is home. You win!");
    }
    Ok(true)
}

fn main() -> Result<(), Error> {
    env_logger::builder().format_target(false).init();

    let config = Config::from_args()?;
    if let Some(color) = config.color {
        colored::control::set_override(color);
    }

    let mut game = Game::new(config.seed);
    if let Some(seed) = game.seed() {
        info!("Playing seed {seed}");
    }
    print!("{COMMANDS}");
    println!("{}", game.snapshot());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        match handle(&mut game, &line?) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => println!("error: {e:#}"),
        }
    }
    Ok(())
}
