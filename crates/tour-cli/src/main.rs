// ============================================================================
// luistertocht — terminal kiosk for the Wezenspyk audio tour
// ============================================================================
// Usage:
//   luistertocht prices                     Show the group price list
//   luistertocht stops                      List tour stops and audio files
//   luistertocht generate --count 3         Print codes from a throwaway registry
//   luistertocht kiosk                      Interactive kiosk on stdin
//
// Codes live in memory only: they are valid for the lifetime of one process.
// ============================================================================

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tour_core::{
    AccessCode, CodeRegistry, CodeStatus, TourApp, TourConfig, PRICING_OPTIONS, TOUR_STOPS,
};
use tracing::{debug, info};

/// Wezenspyk audio tour kiosk
#[derive(Parser)]
#[command(name = "luistertocht", version, about = "Sell and check access codes for the audio tour")]
struct Cli {
    /// Fixed seed for code generation (overrides TOUR_RNG_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Directory with the stop audio files (overrides TOUR_AUDIO_DIR)
    #[arg(long, global = true)]
    audio_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the group price list
    Prices,

    /// List the tour stops with their audio files
    Stops,

    /// Generate codes and print them (they are forgotten on exit)
    Generate {
        /// Number of codes to generate
        #[arg(long, default_value = "1")]
        count: usize,

        /// Print as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Run the interactive kiosk
    Kiosk,
}

/// One line typed at the kiosk prompt
#[derive(Debug, PartialEq, Eq)]
enum KioskCommand {
    Code(String),
    Buy(u32),
    Prices,
    Tour,
    Codes,
    Export,
    Help,
    Quit,
    Empty,
}

const KIOSK_HELP: &str = "\
Commands:
  code <CODE>   enter an access code
  buy <N>       buy access for N visitors (1-8)
  prices        show the price list
  tour          show the tour stops (once unlocked)
  codes         list every code issued so far
  export        dump codes and session as JSON
  help          show this help
  quit          leave the kiosk";

fn parse_command(line: &str) -> Result<KioskCommand> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(KioskCommand::Empty);
    };
    let arg = parts.next();

    match (word.to_lowercase().as_str(), arg) {
        ("code", Some(code)) => Ok(KioskCommand::Code(code.to_string())),
        ("code", None) => anyhow::bail!("Usage: code <CODE>"),
        ("buy", Some(n)) => {
            let quantity = n
                .parse::<u32>()
                .with_context(|| format!("'{}' is not a number of visitors", n))?;
            Ok(KioskCommand::Buy(quantity))
        }
        ("buy", None) => anyhow::bail!("Usage: buy <N>"),
        ("prices", _) => Ok(KioskCommand::Prices),
        ("tour", _) => Ok(KioskCommand::Tour),
        ("codes", _) => Ok(KioskCommand::Codes),
        ("export", _) => Ok(KioskCommand::Export),
        ("help" | "?", _) => Ok(KioskCommand::Help),
        ("quit" | "exit", _) => Ok(KioskCommand::Quit),
        (other, _) => anyhow::bail!("Unknown command '{}'. Type 'help' for a list.", other),
    }
}

fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".into())
}

fn init_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tour_core=warn".parse()?)
                .add_directive("tour_cli=info".parse()?),
        )
        .init();
    Ok(())
}

fn load_config(cli: &Cli) -> Result<TourConfig> {
    let mut config = TourConfig::from_env()?;
    if let Some(seed) = cli.seed {
        config.rng_seed = Some(seed);
    }
    if let Some(dir) = &cli.audio_dir {
        config.audio_dir = dir.clone();
    }
    Ok(config)
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Warning: Could not load .env file: {}", e);
    }
    init_logging()?;

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    debug!("Starting with {:?}", config);

    match cli.command {
        Commands::Prices => cmd_prices(&mut io::stdout()),
        Commands::Stops => cmd_stops(&config, &mut io::stdout()),
        Commands::Generate { count, json } => cmd_generate(config, count, json),
        Commands::Kiosk => {
            let mut app = TourApp::from_config(config);
            info!("Kiosk ready");
            let stdin = io::stdin();
            run_kiosk(&mut app, stdin.lock(), &mut io::stdout())
        }
    }
}

fn cmd_prices<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "=== Toegang kopen ===")?;
    for option in PRICING_OPTIONS.iter() {
        writeln!(out, "  {}", option.label())?;
    }
    Ok(())
}

fn cmd_stops<W: Write>(config: &TourConfig, out: &mut W) -> Result<()> {
    writeln!(out, "=== Tourpunten ===")?;
    for stop in TOUR_STOPS.iter() {
        writeln!(out, "{}  [{}]", stop.title(), stop.audio_path(&config.audio_dir).display())?;
        writeln!(out, "  {}", stop.caption)?;
    }
    Ok(())
}

fn cmd_generate(config: TourConfig, count: usize, json: bool) -> Result<()> {
    let mut registry = match config.rng_seed {
        Some(seed) => CodeRegistry::seeded(seed),
        None => CodeRegistry::new(),
    };
    let codes = registry.generate(count);

    if json {
        println!("{}", serde_json::to_string_pretty(&codes)?);
    } else {
        for code in &codes {
            println!("{}", code);
        }
    }
    Ok(())
}

fn run_kiosk<R: BufRead, W: Write>(app: &mut TourApp, input: R, out: &mut W) -> Result<()> {
    writeln!(out, "🎧 Luustertocht – Wezenspyk")?;
    writeln!(out, "Voer je toegangscode in of koop een tour voor jezelf of je groep.")?;
    writeln!(out, "Type 'help' for commands.")?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from stdin")?;

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };

        match command {
            KioskCommand::Empty => {}
            KioskCommand::Quit => break,
            KioskCommand::Help => writeln!(out, "{}", KIOSK_HELP)?,
            KioskCommand::Prices => cmd_prices(out)?,
            KioskCommand::Code(code) => {
                let was_unlocked = app.session().is_unlocked();
                let status = app.submit_code(&code);
                writeln!(out, "{}", status.message())?;
                if !AccessCode::is_well_formed(&code) {
                    writeln!(out, "Codes look like Txk382: 'Tx', a letter and three digits.")?;
                }
                if status.is_accepted() && !was_unlocked {
                    print_tour(app, out)?;
                }
            }
            KioskCommand::Buy(quantity) => match app.purchase(quantity) {
                Ok(purchase) => {
                    writeln!(out, "Gekozen: {}", purchase.option.label())?;
                    writeln!(out, "Jouw toegangscode: {}", purchase.primary)?;
                    if !purchase.extras.is_empty() {
                        writeln!(out, "Deelcodes:")?;
                        for code in &purchase.extras {
                            writeln!(out, "  {}", code)?;
                        }
                    }
                    writeln!(out, "{}", purchase.status.message())?;
                    if purchase.status == CodeStatus::Accepted {
                        print_tour(app, out)?;
                    }
                }
                Err(e) => writeln!(out, "{}", e)?,
            },
            KioskCommand::Tour => {
                if app.tour_stops().is_some() {
                    print_tour(app, out)?;
                } else {
                    writeln!(out, "Tour is locked. Enter a code or buy access first.")?;
                }
            }
            KioskCommand::Codes => print_codes(app, out)?,
            KioskCommand::Export => {
                let export = serde_json::json!({
                    "exported_at": Utc::now().to_rfc3339(),
                    "session": app.session(),
                    "codes": app.registry().snapshot(),
                });
                writeln!(out, "{}", serde_json::to_string_pretty(&export)?)?;
            }
        }
    }

    info!("Kiosk closed with {} code(s) issued", app.registry().len());
    Ok(())
}

fn print_tour<W: Write>(app: &TourApp, out: &mut W) -> Result<()> {
    let Some(stops) = app.tour_stops() else {
        return Ok(());
    };

    writeln!(out, "\n🎧 Tourpunten")?;
    for stop in stops {
        writeln!(out, "{}", stop.title())?;
        writeln!(out, "  {}", stop.caption)?;
        writeln!(out, "  ♪ {}", stop.audio_path(&app.config().audio_dir).display())?;
    }
    Ok(())
}

fn print_codes<W: Write>(app: &TourApp, out: &mut W) -> Result<()> {
    let snapshot = app.registry().snapshot();
    if snapshot.is_empty() {
        writeln!(out, "No codes issued yet.")?;
        return Ok(());
    }

    writeln!(out, "{:<8}  {:<8}  {}", "CODE", "STATE", "ACTIVATED AT")?;
    writeln!(out, "{}", "-".repeat(44))?;
    for entry in &snapshot {
        writeln!(
            out,
            "{:<8}  {:<8}  {}",
            entry.code,
            entry.state.display_name(),
            format_timestamp(entry.record.activated_at())
        )?;
    }
    writeln!(out, "\nTotal: {} codes", snapshot.len())?;
    writeln!(
        out,
        "Used codes work again {} days after activation.",
        app.registry().cooldown().num_days()
    )?;
    Ok(())
}
