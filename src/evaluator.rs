use std::cmp::Ordering;
use std::collections::HashSet;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("a hand must hold 5 to 7 cards, got {0}")]
    WrongSize(usize),
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
    #[error("a board holds 0, 3, 4 or 5 cards, got {0}")]
    InvalidBoard(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    /// Cumulative share of 7-card deals that land strictly below this category.
    const FLOORS: [f32; 9] = [
        0.0, 0.1741, 0.6123, 0.8472, 0.8955, 0.9417, 0.9720, 0.9980, 0.9997,
    ];

    /// Percentile interval `[floor, ceiling)` the category occupies.
    pub fn band(self) -> (f32, f32) {
        let idx = self as usize;
        let floor = Self::FLOORS[idx];
        let ceiling = Self::FLOORS.get(idx + 1).copied().unwrap_or(1.0);
        (floor, ceiling)
    }
}

/// Comparable result of scoring a hand: category first, then tie-break ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: HandCategory,
    pub ranks: [u8; 5],
}

impl PartialOrd for HandStrength {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandStrength {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.ranks.cmp(&other.ranks))
    }
}

impl HandStrength {
    /// Maps the strength onto [0, 1): the category's percentile band,
    /// interpolated by the tie-break ranks read as base-15 digits.
    pub fn scalar(&self) -> f32 {
        let packed = self
            .ranks
            .iter()
            .fold(0u32, |acc, &rank| acc * 15 + rank as u32);
        let within = packed as f32 / 15u32.pow(5) as f32;
        let (floor, ceiling) = self.category.band();
        floor + (ceiling - floor) * within
    }
}

fn fill(mut values: Vec<u8>) -> [u8; 5] {
    values.resize(5, 0);
    [values[0], values[1], values[2], values[3], values[4]]
}

fn descending_singles(groups: &[(u8, u8)]) -> Vec<u8> {
    groups
        .iter()
        .filter(|(count, _)| *count == 1)
        .map(|(_, rank)| *rank)
        .collect()
}

fn evaluate_five(cards: &[Card; 5]) -> HandStrength {
    let mut counts = [0u8; 15];
    let mut suits = [0u8; 4];
    let mut sorted_ranks: Vec<u8> = cards.iter().map(|c| c.rank_value()).collect();
    sorted_ranks.sort_unstable_by(|a, b| b.cmp(a));

    for card in cards {
        counts[card.rank_value() as usize] += 1;
        suits[card.suit.index()] += 1;
    }

    let is_flush = suits.contains(&5);

    let mut mask: u32 = 0;
    for rank_value in 2u8..=14 {
        if counts[rank_value as usize] > 0 {
            mask |= 1 << rank_value;
            if rank_value == Rank::Ace.value() {
                mask |= 1 << 1; // wheel
            }
        }
    }

    let straight_high = (5u8..=14).rev().find(|&high| {
        let needed = (0..5u8).fold(0u32, |acc, i| acc | 1 << (high - i));
        mask & needed == needed
    });

    // (count, rank), largest groups first and higher ranks breaking ties
    let mut groups: Vec<(u8, u8)> = (2u8..=14)
        .filter(|&rank| counts[rank as usize] > 0)
        .map(|rank| (counts[rank as usize], rank))
        .collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));

    let run = |high: u8| fill(vec![high, high - 1, high - 2, high - 3, high - 4]);

    if is_flush && let Some(high) = straight_high {
        return HandStrength {
            category: HandCategory::StraightFlush,
            ranks: run(high),
        };
    }

    let (top_count, top_rank) = groups[0];
    let second_count = groups.get(1).map(|(c, _)| *c).unwrap_or(0);

    if top_count == 4 {
        return HandStrength {
            category: HandCategory::FourOfAKind,
            ranks: fill(vec![top_rank, groups[1].1]),
        };
    }

    if top_count == 3 && second_count == 2 {
        return HandStrength {
            category: HandCategory::FullHouse,
            ranks: fill(vec![top_rank, groups[1].1]),
        };
    }

    if is_flush {
        return HandStrength {
            category: HandCategory::Flush,
            ranks: fill(sorted_ranks),
        };
    }

    if let Some(high) = straight_high {
        return HandStrength {
            category: HandCategory::Straight,
            ranks: run(high),
        };
    }

    match (top_count, second_count) {
        (3, _) => {
            let mut values = vec![top_rank];
            values.extend(descending_singles(&groups));
            HandStrength {
                category: HandCategory::ThreeOfAKind,
                ranks: fill(values),
            }
        }
        (2, 2) => {
            let kicker = descending_singles(&groups).first().copied().unwrap_or(0);
            HandStrength {
                category: HandCategory::TwoPair,
                ranks: fill(vec![top_rank, groups[1].1, kicker]),
            }
        }
        (2, _) => {
            let mut values = vec![top_rank];
            values.extend(descending_singles(&groups));
            HandStrength {
                category: HandCategory::OnePair,
                ranks: fill(values),
            }
        }
        _ => HandStrength {
            category: HandCategory::HighCard,
            ranks: fill(sorted_ranks),
        },
    }
}

/// Scores the best five-card hand inside a 5 to 7 card multiset.
///
/// The result is independent of input order. Hands of the wrong size or
/// containing the same card twice are rejected.
pub fn score(cards: &[Card]) -> Result<HandStrength, EvalError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(EvalError::WrongSize(cards.len()));
    }
    let mut seen = HashSet::with_capacity(cards.len());
    if let Some(dup) = cards.iter().find(|card| !seen.insert(**card)) {
        return Err(EvalError::DuplicateCard(*dup));
    }

    let best = cards
        .iter()
        .copied()
        .combinations(5)
        .map(|combo| evaluate_five(&[combo[0], combo[1], combo[2], combo[3], combo[4]]))
        .max()
        .ok_or(EvalError::WrongSize(cards.len()))?;
    Ok(best)
}

/// Pre-flop heuristic for a two-card holding, in [0, 1].
pub fn starting_hand_strength(hole: &[Card; 2]) -> f32 {
    let ranks = [hole[0].rank_value(), hole[1].rank_value()];
    let pair = ranks[0] == ranks[1];
    let connectors = (ranks[0] as i8 - ranks[1] as i8).abs() == 1;
    let suited = hole[0].suit == hole[1].suit;

    let mut strength = (ranks[0] + ranks[1]) as f32 / 28.0;
    if pair {
        strength += 0.25;
    } else if connectors {
        strength += 0.08;
    }
    if suited {
        strength += 0.05;
    }
    strength.clamp(0.0, 1.0)
}

/// Strength scalar for a holding on the current street.
///
/// Pre-flop falls back to [`starting_hand_strength`]; from the flop on the
/// made hand is scored and mapped through [`HandStrength::scalar`].
pub fn hand_strength(hole: &[Card; 2], board: &[Card]) -> Result<f32, EvalError> {
    match board.len() {
        0 if hole[0] == hole[1] => Err(EvalError::DuplicateCard(hole[0])),
        0 => Ok(starting_hand_strength(hole)),
        3..=5 => {
            let cards: Vec<Card> = hole.iter().chain(board).copied().collect();
            Ok(score(&cards)?.scalar())
        }
        n => Err(EvalError::InvalidBoard(n)),
    }
}
