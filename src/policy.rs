use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::game::{Action, ActionKind, GameState, RoundState};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RaiseSize {
    Min,
    Max,
}

/// One step of the raise ladder. Unset thresholds always pass; set ones
/// must be strictly exceeded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RaiseRule {
    #[serde(default)]
    pub min_strength: Option<f32>,
    #[serde(default)]
    pub min_equity: Option<f32>,
    pub size: RaiseSize,
}

impl RaiseRule {
    pub fn new(min_strength: Option<f32>, min_equity: Option<f32>, size: RaiseSize) -> Self {
        Self {
            min_strength,
            min_equity,
            size,
        }
    }

    pub fn matches(&self, strength: f32, equity: f32) -> bool {
        self.min_strength.is_none_or(|t| strength > t) && self.min_equity.is_none_or(|t| equity > t)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StrategyVariant {
    /// Equity ladder with bluffs and rare desperation folds, no clinch.
    Equity,
    /// Equity ladder plus the bankroll clinch and opponent tracking.
    #[default]
    Clinch,
    /// Coin-flip jams and a strength-only ladder behind a tighter clinch.
    Aggressive,
}

/// Named thresholds driving [`DecisionPolicy`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolicyConfig {
    /// Worst-case chips lost per remaining round; `None` disables the clinch.
    #[serde(default)]
    pub clinch_loss_per_round: Option<f32>,
    /// Chance of raising to the maximum before the ladder is consulted.
    #[serde(default)]
    pub aggression_frequency: f32,
    pub raise_ladder: Vec<RaiseRule>,
    pub bluff_frequency: f32,
    pub desperation_strength: f32,
    pub desperation_equity: f32,
    pub desperation_fold_frequency: f32,
    /// Feed every emitted action into the opponent model's round buffer.
    #[serde(default)]
    pub record_actions: bool,
    /// Shift ladder thresholds by opponent confidence. Off in every preset.
    #[serde(default)]
    pub use_confidence: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::resolve(StrategyVariant::default())
    }
}

impl PolicyConfig {
    pub fn resolve(variant: StrategyVariant) -> Self {
        let equity_ladder = vec![
            RaiseRule::new(Some(0.7), Some(0.6), RaiseSize::Max),
            RaiseRule::new(Some(0.5), Some(0.5), RaiseSize::Max),
            RaiseRule::new(Some(0.4), Some(0.4), RaiseSize::Min),
            RaiseRule::new(None, Some(0.4), RaiseSize::Min),
        ];
        match variant {
            StrategyVariant::Equity => Self {
                clinch_loss_per_round: None,
                aggression_frequency: 0.0,
                raise_ladder: equity_ladder,
                bluff_frequency: 0.3,
                desperation_strength: 0.2,
                desperation_equity: 0.2,
                desperation_fold_frequency: 0.1,
                record_actions: false,
                use_confidence: false,
            },
            StrategyVariant::Clinch => Self {
                clinch_loss_per_round: Some(7.5),
                aggression_frequency: 0.0,
                raise_ladder: equity_ladder,
                bluff_frequency: 0.3,
                desperation_strength: 0.2,
                desperation_equity: 0.2,
                desperation_fold_frequency: 0.1,
                record_actions: true,
                use_confidence: false,
            },
            StrategyVariant::Aggressive => Self {
                clinch_loss_per_round: Some(6.0),
                aggression_frequency: 0.5,
                raise_ladder: vec![
                    RaiseRule::new(Some(0.7), None, RaiseSize::Max),
                    RaiseRule::new(Some(0.5), None, RaiseSize::Min),
                ],
                bluff_frequency: 0.3,
                desperation_strength: 0.2,
                desperation_equity: 0.2,
                desperation_fold_frequency: 0.0,
                record_actions: true,
                use_confidence: false,
            },
        }
    }
}

/// Folds out the match once the lead survives losing `loss_per_round`
/// chips in every round still to play, this one included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BankrollGuard {
    pub loss_per_round: f32,
}

impl BankrollGuard {
    pub fn should_clinch(&self, game: &GameState) -> bool {
        let at_risk = (game.remaining_rounds() as f64 + 1.0) * self.loss_per_round as f64;
        game.bankroll > 0 && game.bankroll as f64 > at_risk
    }
}

/// Ordered threshold rules mapping strength and equity onto one legal action.
#[derive(Debug, Clone)]
pub struct DecisionPolicy {
    config: PolicyConfig,
}

impl DecisionPolicy {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn guard(&self) -> Option<BankrollGuard> {
        self.config
            .clinch_loss_per_round
            .map(|loss_per_round| BankrollGuard { loss_per_round })
    }

    /// Picks an action; the result is always in `round`'s legal set.
    ///
    /// `confidence` only matters when `use_confidence` is set: a predictable
    /// opponent (confidence above one half) loosens every ladder threshold by
    /// up to 0.1, an unpredictable one tightens them by the same amount.
    pub fn decide<R: Rng + ?Sized>(
        &self,
        round: &RoundState,
        game: &GameState,
        strength: f32,
        equity: f32,
        confidence: f32,
        rng: &mut R,
    ) -> Action {
        let chosen = self.choose(round, game, strength, equity, confidence, rng);
        match round.validate(&chosen) {
            Ok(()) => chosen,
            Err(err) => {
                let repaired = repair(round, chosen);
                warn!(%err, %chosen, %repaired, "repaired illegal action");
                repaired
            }
        }
    }

    fn choose<R: Rng + ?Sized>(
        &self,
        round: &RoundState,
        game: &GameState,
        strength: f32,
        equity: f32,
        confidence: f32,
        rng: &mut R,
    ) -> Action {
        if let Some(guard) = self.guard()
            && guard.should_clinch(game)
        {
            info!(
                bankroll = game.bankroll,
                remaining = game.remaining_rounds(),
                "lead is safe, folding out the match"
            );
            return Action::Fold;
        }

        if round.can(ActionKind::Raise)
            && let Some((min_raise, max_raise)) = round.raise_bounds
        {
            let size = |size: RaiseSize| match size {
                RaiseSize::Min => Action::Raise(min_raise),
                RaiseSize::Max => Action::Raise(max_raise),
            };

            if roll(rng, self.config.aggression_frequency) {
                return size(RaiseSize::Max);
            }

            let shift = self.threshold_shift(confidence);
            let rule = self
                .config
                .raise_ladder
                .iter()
                .find(|rule| rule.matches(strength + shift, equity + shift));
            if let Some(rule) = rule {
                return size(rule.size);
            }

            if roll(rng, self.config.bluff_frequency) {
                return size(RaiseSize::Min);
            }
        }

        if round.can(ActionKind::Check) {
            return Action::Check;
        }

        if strength < self.config.desperation_strength
            && equity < self.config.desperation_equity
            && roll(rng, self.config.desperation_fold_frequency)
        {
            return Action::Fold;
        }

        Action::Call
    }

    fn threshold_shift(&self, confidence: f32) -> f32 {
        if self.config.use_confidence {
            (confidence.clamp(0.0, 1.0) - 0.5) * 0.2
        } else {
            0.0
        }
    }
}

fn roll<R: Rng + ?Sized>(rng: &mut R, probability: f32) -> bool {
    if probability.is_nan() || probability <= 0.0 {
        return false;
    }
    rng.gen_bool(f64::from(probability.min(1.0)))
}

/// Nearest legal stand-in for an action the round does not allow.
fn repair(round: &RoundState, action: Action) -> Action {
    if let (Action::Raise(amount), Some((min, max))) = (action, round.raise_bounds)
        && round.can(ActionKind::Raise)
        && min <= max
    {
        return Action::Raise(amount.clamp(min, max));
    }
    [ActionKind::Check, ActionKind::Call, ActionKind::Fold]
        .into_iter()
        .find(|kind| round.can(*kind))
        .map(|kind| match kind {
            ActionKind::Check => Action::Check,
            ActionKind::Call => Action::Call,
            _ => Action::Fold,
        })
        .unwrap_or(Action::Check)
}
