use std::cmp::Ordering;

use itertools::Itertools;

use crate::cards::Card;
use crate::evaluator::{self, EvalError};

/// Share of the pot won against every two-card holding the opponent could
/// hold, with ties counted as half.
///
/// `deck` must not contain any card of `hole` or `board`. Each unordered pair
/// is visited once. Pre-flop, holdings are compared with the starting-hand
/// heuristic since there is no five-card hand to score yet.
pub fn estimate(hole: &[Card; 2], board: &[Card], deck: &[Card]) -> Result<f32, EvalError> {
    if deck.len() < 2 {
        return Ok(0.0);
    }

    match board.len() {
        0 if hole[0] == hole[1] => Err(EvalError::DuplicateCard(hole[0])),
        0 => enumerate(deck, evaluator::starting_hand_strength(hole), |opp| {
            Ok(evaluator::starting_hand_strength(opp))
        }),
        3..=5 => {
            let mine: Vec<Card> = hole.iter().chain(board).copied().collect();
            let mine = evaluator::score(&mine)?;
            let mut cards = Vec::with_capacity(board.len() + 2);
            enumerate(deck, mine, |opp| {
                cards.clear();
                cards.extend_from_slice(opp);
                cards.extend_from_slice(board);
                evaluator::score(&cards)
            })
        }
        n => Err(EvalError::InvalidBoard(n)),
    }
}

fn enumerate<T, F>(deck: &[Card], mine: T, mut rate: F) -> Result<f32, EvalError>
where
    T: PartialOrd,
    F: FnMut(&[Card; 2]) -> Result<T, EvalError>,
{
    let mut total = 0.0f64;
    let mut combos = 0u32;
    for (a, b) in deck.iter().copied().tuple_combinations() {
        let theirs = rate(&[a, b])?;
        match mine.partial_cmp(&theirs) {
            Some(Ordering::Greater) => total += 1.0,
            Some(Ordering::Equal) => total += 0.5,
            _ => {}
        }
        combos += 1;
    }
    Ok((total / combos as f64) as f32)
}
