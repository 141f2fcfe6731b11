use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::evaluator::{self, EvalError};
use crate::game::ActionKind;

const STRONG_ABOVE: f32 = 0.7;
const WEAK_AT_MOST: f32 = 0.4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StrengthCategory {
    Weak,
    Medium,
    Strong,
}

impl StrengthCategory {
    pub fn of(strength: f32) -> Self {
        if strength > STRONG_ABOVE {
            StrengthCategory::Strong
        } else if strength > WEAK_AT_MOST {
            StrengthCategory::Medium
        } else {
            StrengthCategory::Weak
        }
    }
}

/// A round where the opponent's hole cards were shown down.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpponentRecord {
    pub hole: [Card; 2],
    pub board: Vec<Card>,
    pub actions: Vec<ActionKind>,
    pub category: StrengthCategory,
}

impl OpponentRecord {
    /// Strong hands that never folded and weak hands that never raised.
    /// Medium hands are never consistent.
    pub fn is_consistent(&self) -> bool {
        match self.category {
            StrengthCategory::Strong => !self.actions.contains(&ActionKind::Fold),
            StrengthCategory::Weak => !self.actions.contains(&ActionKind::Raise),
            StrengthCategory::Medium => false,
        }
    }
}

/// Per-match record of revealed opponent hands.
///
/// Built when the match starts, owned by the agent, and updated only between
/// decisions: the round buffer is cleared at round start, grows with every
/// emitted action, and is consumed into a record when a hand is revealed.
#[derive(Debug, Clone, Default)]
pub struct OpponentModel {
    history: Vec<OpponentRecord>,
    round_actions: Vec<ActionKind>,
}

impl OpponentModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_reveal(
        &mut self,
        hole: [Card; 2],
        board: &[Card],
        actions: Vec<ActionKind>,
    ) -> Result<&OpponentRecord, EvalError> {
        let strength = evaluator::hand_strength(&hole, board)?;
        self.history.push(OpponentRecord {
            hole,
            board: board.to_vec(),
            actions,
            category: StrengthCategory::of(strength),
        });
        Ok(&self.history[self.history.len() - 1])
    }

    /// Fraction of revealed rounds whose actions matched the hand; 0.0 until
    /// the first reveal.
    pub fn current_confidence(&self) -> f32 {
        if self.history.is_empty() {
            return 0.0;
        }
        let consistent = self.history.iter().filter(|r| r.is_consistent()).count();
        consistent as f32 / self.history.len() as f32
    }

    pub fn reset_round_actions(&mut self) {
        self.round_actions.clear();
    }

    pub fn record_action(&mut self, kind: ActionKind) {
        self.round_actions.push(kind);
    }

    pub fn round_actions(&self) -> &[ActionKind] {
        &self.round_actions
    }

    pub fn take_round_actions(&mut self) -> Vec<ActionKind> {
        std::mem::take(&mut self.round_actions)
    }

    pub fn revealed_count(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &[OpponentRecord] {
        &self.history
    }
}
