use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::cards::Card;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub fn from_board_len(len: usize) -> Option<Self> {
        match len {
            0 => Some(Street::Preflop),
            3 => Some(Street::Flop),
            4 => Some(Street::Turn),
            5 => Some(Street::River),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Fold,
    Call,
    Check,
    Raise,
}

impl ActionKind {
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Fold => "fold",
            ActionKind::Call => "call",
            ActionKind::Check => "check",
            ActionKind::Raise => "raise",
        }
    }
}

impl Display for ActionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One move handed back to the match engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum Action {
    Fold,
    Call,
    Check,
    /// Raise to this many chips in total for the betting round.
    Raise(u32),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Fold => ActionKind::Fold,
            Action::Call => ActionKind::Call,
            Action::Check => ActionKind::Check,
            Action::Raise(_) => ActionKind::Raise,
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Raise(amount) => write!(f, "raise {amount}"),
            other => f.write_str(other.kind().label()),
        }
    }
}

/// Match-level context supplied by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameState {
    /// Net chips won or lost since the start of the match.
    pub bankroll: i64,
    /// Seconds left on the agent's clock.
    pub game_clock: f32,
    /// 1-based index of the current round.
    pub round_num: u32,
    pub total_rounds: u32,
}

impl GameState {
    pub fn remaining_rounds(&self) -> u32 {
        self.total_rounds.saturating_sub(self.round_num)
    }
}

/// Read-only snapshot of the betting round, indexed by seat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundState {
    /// Hole cards per seat; an unknown hand is empty.
    pub hands: [Vec<Card>; 2],
    pub board: Vec<Card>,
    pub pips: [u32; 2],
    pub stacks: [u32; 2],
    pub legal_actions: Vec<ActionKind>,
    /// `(min, max)` raise-to amounts, present whenever raising is legal.
    #[serde(default)]
    pub raise_bounds: Option<(u32, u32)>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IllegalAction {
    #[error("{0} is not legal in this spot")]
    NotAllowed(ActionKind),
    #[error("raise to {amount} is outside {min}..={max}")]
    OutOfBounds { amount: u32, min: u32, max: u32 },
    #[error("raise offered without bounds")]
    MissingBounds,
}

impl RoundState {
    pub fn street(&self) -> Option<Street> {
        Street::from_board_len(self.board.len())
    }

    pub fn can(&self, kind: ActionKind) -> bool {
        self.legal_actions.contains(&kind)
    }

    pub fn continue_cost(&self, active: usize) -> u32 {
        self.pips[1 - active].saturating_sub(self.pips[active])
    }

    pub fn validate(&self, action: &Action) -> Result<(), IllegalAction> {
        if !self.can(action.kind()) {
            return Err(IllegalAction::NotAllowed(action.kind()));
        }
        if let Action::Raise(amount) = *action {
            let (min, max) = self.raise_bounds.ok_or(IllegalAction::MissingBounds)?;
            if !(min..=max).contains(&amount) {
                return Err(IllegalAction::OutOfBounds { amount, min, max });
            }
        }
        Ok(())
    }
}

/// Round outcome handed over after payoffs are settled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TerminalState {
    pub deltas: [i64; 2],
    pub previous_state: RoundState,
}

/// Lifecycle hooks the match engine drives, strictly in sequence.
pub trait Bot {
    type Error: std::error::Error;

    fn handle_new_round(
        &mut self,
        game: &GameState,
        round: &RoundState,
        active: usize,
    ) -> Result<(), Self::Error>;

    fn get_action(
        &mut self,
        game: &GameState,
        round: &RoundState,
        active: usize,
    ) -> Result<Action, Self::Error>;

    fn handle_round_over(
        &mut self,
        game: &GameState,
        terminal: &TerminalState,
        active: usize,
    ) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raise_spot() -> RoundState {
        RoundState {
            hands: [vec![], vec![]],
            board: vec![],
            pips: [1, 2],
            stacks: [399, 398],
            legal_actions: vec![ActionKind::Fold, ActionKind::Call, ActionKind::Raise],
            raise_bounds: Some((4, 400)),
        }
    }

    #[test]
    fn validate_checks_kind_and_bounds() {
        let round = raise_spot();
        assert!(round.validate(&Action::Call).is_ok());
        assert!(round.validate(&Action::Raise(4)).is_ok());
        assert_eq!(
            round.validate(&Action::Check),
            Err(IllegalAction::NotAllowed(ActionKind::Check))
        );
        assert_eq!(
            round.validate(&Action::Raise(401)),
            Err(IllegalAction::OutOfBounds {
                amount: 401,
                min: 4,
                max: 400
            })
        );
    }

    #[test]
    fn remaining_rounds_saturates() {
        let game = GameState {
            bankroll: 0,
            game_clock: 30.0,
            round_num: 1001,
            total_rounds: 1000,
        };
        assert_eq!(game.remaining_rounds(), 0);
    }

    #[test]
    fn actions_serialize_with_kind_tag() {
        let json = serde_json::to_string(&Action::Raise(20)).unwrap();
        assert_eq!(json, r#"{"kind":"raise","amount":20}"#);
        let fold: Action = serde_json::from_str(r#"{"kind":"fold"}"#).unwrap();
        assert_eq!(fold, Action::Fold);
        assert_eq!(raise_spot().continue_cost(0), 1);
    }
}
