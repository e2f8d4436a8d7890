mod script;

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use parlor_core::TrialConfig;
use parlor_engine::football::{FieldSlot, TeamSheet};
use parlor_engine::roster::{generate_team_names, PlayerGenerator};
use parlor_engine::words::Dictionary;
use parlor_engine::{football, people::PersonGenerator};

/// Which mini-game a trial runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Game {
    Word,
    Numbers,
    Sports,
    Dating,
}

impl Game {
    fn as_str(&self) -> &'static str {
        match self {
            Game::Word => "word",
            Game::Numbers => "numbers",
            Game::Sports => "sports",
            Game::Dating => "dating",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EntityKind {
    Players,
    People,
}

/// Parlor timed trial engine.
#[derive(Parser)]
#[command(name = "parlor", version, about = "Parlor timed trial engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scripted trial and print the result object as JSON
    Run {
        /// Which game to run
        #[arg(long, value_enum)]
        game: Game,
        /// Path to the JSON event script
        script: PathBuf,
        /// Path to a trial config JSON file (defaults apply if omitted)
        #[arg(long)]
        config: Option<PathBuf>,
        /// RNG seed (wall clock when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Word list file for the word game, one word per line
        #[arg(long)]
        words: Option<PathBuf>,
        /// Write the result here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Pretty-print the result JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Run repeated match simulations and print aggregate statistics
    Simulate {
        /// Number of matches to simulate
        #[arg(long, default_value = "1000")]
        iterations: u32,
        /// RNG seed (wall clock when omitted)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate entities and print them as JSON
    Generate {
        /// What to generate
        #[arg(value_enum)]
        kind: EntityKind,
        /// How many
        #[arg(long, default_value = "5")]
        count: u32,
        /// RNG seed (wall clock when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(message) = dispatch(cli) {
        eprintln!("error: {message}");
        process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Run {
            game,
            script,
            config,
            seed,
            words,
            out,
            pretty,
        } => run_trial(game, &script, config.as_deref(), seed, words.as_deref(), out, pretty),
        Commands::Simulate { iterations, seed } => simulate_matches(iterations, resolve_seed(seed)),
        Commands::Generate {
            kind,
            count,
            seed,
            pretty,
        } => generate_entities(kind, count, resolve_seed(seed), pretty),
    }
}

/// Seed from the flag, or from the wall clock for a casual run.
fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| OffsetDateTime::now_utc().unix_timestamp_nanos() as u64)
}

fn read_config(path: Option<&std::path::Path>) -> Result<TrialConfig, String> {
    match path {
        None => Ok(TrialConfig::default()),
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|e| format!("cannot read config {}: {e}", path.display()))?;
            serde_json::from_str(&raw).map_err(|e| format!("invalid config: {e}"))
        }
    }
}

fn read_dictionary(path: Option<&std::path::Path>) -> Result<Dictionary, String> {
    match path {
        None => {
            tracing::warn!("no word list given; every word will be recorded as incorrect");
            Ok(Dictionary::default())
        }
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|e| format!("cannot read word list {}: {e}", path.display()))?;
            Ok(Dictionary::from_words(raw.lines()))
        }
    }
}

fn run_trial(
    game: Game,
    script_path: &std::path::Path,
    config_path: Option<&std::path::Path>,
    seed: Option<u64>,
    words_path: Option<&std::path::Path>,
    out: Option<PathBuf>,
    pretty: bool,
) -> Result<(), String> {
    let config = read_config(config_path)?;
    let seed = resolve_seed(seed);
    let raw = fs::read_to_string(script_path)
        .map_err(|e| format!("cannot read script {}: {e}", script_path.display()))?;

    let result = match game {
        Game::Word => {
            let dictionary = read_dictionary(words_path)?;
            let steps = serde_json::from_str(&raw).map_err(|e| format!("invalid script: {e}"))?;
            script::run_word(config, dictionary, seed, steps)?
        }
        Game::Numbers => {
            let steps = serde_json::from_str(&raw).map_err(|e| format!("invalid script: {e}"))?;
            script::run_numbers(config, seed, steps)?
        }
        Game::Sports => {
            let steps = serde_json::from_str(&raw).map_err(|e| format!("invalid script: {e}"))?;
            script::run_sports(config, seed, steps)?
        }
        Game::Dating => {
            let steps = serde_json::from_str(&raw).map_err(|e| format!("invalid script: {e}"))?;
            script::run_dating(config, seed, steps)?
        }
    };

    let completed_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| format!("timestamp formatting failed: {e}"))?;
    let envelope = serde_json::json!({
        "game": game.as_str(),
        "seed": seed,
        "completedAt": completed_at,
        "result": result,
    });

    let rendered = if pretty {
        serde_json::to_string_pretty(&envelope)
    } else {
        serde_json::to_string(&envelope)
    }
    .map_err(|e| e.to_string())?;

    match out {
        Some(path) => fs::write(&path, rendered)
            .map_err(|e| format!("cannot write {}: {e}", path.display()))?,
        None => println!("{rendered}"),
    }
    Ok(())
}

/// Repeated simulations over two freshly drafted lineups: a quick sanity
/// look at the scoreline distribution.
fn simulate_matches(iterations: u32, seed: u64) -> Result<(), String> {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut generator = PlayerGenerator::new();
    let mut sheet = TeamSheet::new();
    for slot in FieldSlot::ALL {
        sheet.put(slot, generator.generate(&mut rng));
    }
    let (team_a, team_b) = generate_team_names(&mut rng);

    let mut wins_a = 0u32;
    let mut wins_b = 0u32;
    let mut ties = 0u32;
    let mut diff_sum = 0i64;
    let mut goals_sum = 0u64;
    for _ in 0..iterations {
        let outcome = football::simulate(&sheet, &mut rng);
        match outcome.winner {
            parlor_core::Winner::A => wins_a += 1,
            parlor_core::Winner::B => wins_b += 1,
            parlor_core::Winner::Tie => ties += 1,
        }
        diff_sum += outcome.team_a_score as i64 - outcome.team_b_score as i64;
        goals_sum += (outcome.team_a_score + outcome.team_b_score) as u64;
    }

    println!("{team_a} vs {team_b}");
    println!(
        "fitness: {:.2} vs {:.2}",
        football::team_fitness(&sheet, true),
        football::team_fitness(&sheet, false)
    );
    println!("matches: {iterations}");
    println!("wins A: {wins_a}  wins B: {wins_b}  ties: {ties}");
    println!("mean goal differential: {:.3}", diff_sum as f64 / iterations as f64);
    println!("mean total goals: {:.3}", goals_sum as f64 / iterations as f64);
    Ok(())
}

fn generate_entities(kind: EntityKind, count: u32, seed: u64, pretty: bool) -> Result<(), String> {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let mut rng = StdRng::seed_from_u64(seed);
    let value = match kind {
        EntityKind::Players => {
            let mut generator = PlayerGenerator::new();
            let players: Vec<_> = (0..count).map(|_| generator.generate(&mut rng)).collect();
            serde_json::to_value(players)
        }
        EntityKind::People => {
            let mut generator = PersonGenerator::new();
            let people: Vec<_> = (0..count).map(|_| generator.generate(&mut rng)).collect();
            serde_json::to_value(people)
        }
    }
    .map_err(|e| e.to_string())?;

    let rendered = if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
    .map_err(|e| e.to_string())?;
    println!("{rendered}");
    Ok(())
}
