use std::fs;
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::{Card, remaining_deck};
use crate::equity;
use crate::evaluator::{self, EvalError};
use crate::game::{Action, Bot, GameState, RoundState, TerminalState};
use crate::opponent::OpponentModel;
use crate::policy::{DecisionPolicy, PolicyConfig, StrategyVariant};

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("seat {seat} holds {count} hole cards, expected 2")]
    HoleCards { seat: usize, count: usize },
    #[error("seat index {0} is not 0 or 1")]
    Seat(usize),
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AgentConfig {
    #[serde(default)]
    pub variant: StrategyVariant,
    /// Replaces the variant's preset thresholds when present.
    #[serde(default)]
    pub policy: Option<PolicyConfig>,
    pub seed: Option<u64>,
}

impl AgentConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AgentError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| AgentError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| AgentError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn policy_config(&self) -> PolicyConfig {
        self.policy
            .clone()
            .unwrap_or_else(|| PolicyConfig::resolve(self.variant))
    }
}

/// Strength and equity behind one decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Assessment {
    pub strength: f32,
    pub equity: f32,
}

/// Scores `hole` on `board` and rates it against every holding left in the deck.
pub fn assess(hole: &[Card; 2], board: &[Card]) -> Result<Assessment, EvalError> {
    let used: Vec<Card> = hole.iter().chain(board).copied().collect();
    let deck = remaining_deck(&used);
    Ok(Assessment {
        strength: evaluator::hand_strength(hole, board)?,
        equity: equity::estimate(hole, board, &deck)?,
    })
}

/// One match worth of decision state. Creating the agent is the match start.
pub struct Agent {
    policy: DecisionPolicy,
    opponent: OpponentModel,
    rng: StdRng,
}

impl Agent {
    pub fn new(config: AgentConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self {
            policy: DecisionPolicy::new(config.policy_config()),
            opponent: OpponentModel::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn opponent(&self) -> &OpponentModel {
        &self.opponent
    }

    pub fn policy(&self) -> &DecisionPolicy {
        &self.policy
    }
}

fn hole_cards(round: &RoundState, seat: usize) -> Result<[Card; 2], AgentError> {
    let cards = round.hands.get(seat).ok_or(AgentError::Seat(seat))?;
    match cards.as_slice() {
        [a, b] => Ok([*a, *b]),
        other => Err(AgentError::HoleCards {
            seat,
            count: other.len(),
        }),
    }
}

impl Bot for Agent {
    type Error = AgentError;

    fn handle_new_round(
        &mut self,
        game: &GameState,
        _round: &RoundState,
        _active: usize,
    ) -> Result<(), AgentError> {
        debug!(round = game.round_num, bankroll = game.bankroll, "new round");
        self.opponent.reset_round_actions();
        Ok(())
    }

    fn get_action(
        &mut self,
        game: &GameState,
        round: &RoundState,
        active: usize,
    ) -> Result<Action, AgentError> {
        let hole = hole_cards(round, active)?;
        let Assessment { strength, equity } = assess(&hole, &round.board)?;
        let confidence = self.opponent.current_confidence();

        let action = self
            .policy
            .decide(round, game, strength, equity, confidence, &mut self.rng);
        if self.policy.config().record_actions {
            self.opponent.record_action(action.kind());
        }

        debug!(
            round = game.round_num,
            street = ?round.street(),
            continue_cost = round.continue_cost(active),
            strength,
            equity,
            confidence,
            %action,
            "decided"
        );
        Ok(action)
    }

    fn handle_round_over(
        &mut self,
        game: &GameState,
        terminal: &TerminalState,
        active: usize,
    ) -> Result<(), AgentError> {
        let opponent = 1usize.checked_sub(active).ok_or(AgentError::Seat(active))?;
        let previous = &terminal.previous_state;
        let actions = self.opponent.take_round_actions();

        if previous.hands[opponent].len() == 2 {
            let hole = hole_cards(previous, opponent)?;
            let record = self.opponent.record_reveal(hole, &previous.board, actions)?;
            let (category, consistent) = (record.category, record.is_consistent());
            info!(
                round = game.round_num,
                ?category,
                consistent,
                confidence = self.opponent.current_confidence(),
                "opponent revealed"
            );
        }
        Ok(())
    }
}
