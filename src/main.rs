use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use heads_up_agent::agent::{Agent, AgentConfig, assess};
use heads_up_agent::cards::{Card, parse_cards};
use heads_up_agent::evaluator;
use heads_up_agent::game::{Bot, GameState, RoundState};
use heads_up_agent::policy::StrategyVariant;
use owo_colors::OwoColorize;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "heads-up-agent",
    version,
    about = "Hand scoring, equity and decisions for a heads-up hold'em bot",
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Disable ANSI colors in output
    #[arg(long = "no-color", global = true, default_value_t = false)]
    no_color: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Score a 5 to 7 card hand
    Score {
        /// Cards such as As Kd 10h
        #[arg(required = true, num_args = 5..=7)]
        cards: Vec<String>,
    },
    /// Equity of two hole cards against every opponent holding
    Equity {
        #[arg(long, num_args = 2, required = true)]
        hole: Vec<String>,
        #[arg(long, num_args = 0..=5)]
        board: Vec<String>,
    },
    /// Pick an action for a JSON round snapshot
    Decide {
        /// File holding `{ "game": .., "round": .., "active": .. }`
        snapshot: PathBuf,
        /// Agent config (JSON); overrides --variant
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, default_value = "clinch")]
        variant: VariantArg,
        /// RNG seed (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Debug, Clone, ValueEnum)]
enum VariantArg {
    Equity,
    Clinch,
    Aggressive,
}

impl From<VariantArg> for StrategyVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Equity => StrategyVariant::Equity,
            VariantArg::Clinch => StrategyVariant::Clinch,
            VariantArg::Aggressive => StrategyVariant::Aggressive,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Snapshot {
    game: GameState,
    round: RoundState,
    active: usize,
}

fn main() -> Result<()> {
    let _ = color_eyre::install();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Score { cards } => run_score(&cards, cli.no_color),
        Commands::Equity { hole, board } => run_equity(&hole, &board, cli.no_color),
        Commands::Decide {
            snapshot,
            config,
            variant,
            seed,
        } => run_decide(snapshot, config, variant.into(), seed, cli.no_color),
    }
}

fn run_score(tokens: &[String], no_color: bool) -> Result<()> {
    let cards = parse_cards(tokens)?;
    let strength = evaluator::score(&cards)?;
    let category = format!("{:?}", strength.category);
    if no_color {
        println!(
            "Hand {} | {} | strength {:.3}",
            join(&cards),
            category,
            strength.scalar()
        );
    } else {
        println!(
            "{} {} {} {} {:.3}",
            "Hand".bold().cyan(),
            join(&cards).bold().yellow(),
            category.bold().green(),
            "Strength".bold().white(),
            strength.scalar()
        );
    }
    Ok(())
}

fn run_equity(hole: &[String], board: &[String], no_color: bool) -> Result<()> {
    let hole = parse_cards(hole)?;
    let hole: [Card; 2] = match hole.as_slice() {
        [a, b] => [*a, *b],
        _ => bail!("exactly two hole cards are required"),
    };
    let board = parse_cards(board)?;
    let assessment = assess(&hole, &board)?;
    let board = if board.is_empty() {
        "--".to_string()
    } else {
        join(&board)
    };

    if no_color {
        println!(
            "Hole {} | Board {} | strength {:.3} | equity {:.1}%",
            join(&hole),
            board,
            assessment.strength,
            assessment.equity * 100.0
        );
    } else {
        println!(
            "{} {} {} {} {} {:.3} {} {:.1}%",
            "Hole".bold().white(),
            join(&hole).bold().yellow(),
            "Board".bold().white(),
            board.bold().blue(),
            "Strength".bold().white(),
            assessment.strength,
            "Equity".bold().magenta(),
            assessment.equity * 100.0
        );
    }
    Ok(())
}

fn run_decide(
    snapshot: PathBuf,
    config: Option<PathBuf>,
    variant: StrategyVariant,
    seed: Option<u64>,
    no_color: bool,
) -> Result<()> {
    let raw = fs::read_to_string(&snapshot)
        .with_context(|| format!("reading snapshot {}", snapshot.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&raw).context("parsing snapshot")?;

    let mut config = match config {
        Some(path) => AgentConfig::load(path)?,
        None => AgentConfig {
            variant,
            ..AgentConfig::default()
        },
    };
    if seed.is_some() {
        config.seed = seed;
    }

    let mut agent = Agent::new(config);
    agent.handle_new_round(&snapshot.game, &snapshot.round, snapshot.active)?;
    let action = agent.get_action(&snapshot.game, &snapshot.round, snapshot.active)?;

    if no_color {
        println!("Action: {action}");
    } else {
        println!("{} {}", "Action".bold().cyan(), action.bold().green());
    }
    Ok(())
}

fn join(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
