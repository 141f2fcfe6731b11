use heads_up_agent::cards::{Card, parse_cards, remaining_deck};
use heads_up_agent::equity::estimate;
use heads_up_agent::evaluator::{EvalError, HandCategory, score};

fn hole(tokens: [&str; 2]) -> [Card; 2] {
    let cards = parse_cards(&tokens).expect("valid cards");
    [cards[0], cards[1]]
}

#[test]
fn quads_outrank_full_house() {
    let cards = parse_cards(&["9c", "9d", "9h", "9s", "Ac", "Ah", "5c"]).unwrap();
    let strength = score(&cards).expect("seven cards score");
    assert_eq!(strength.category, HandCategory::FourOfAKind);
    assert_eq!(strength.ranks[0], 9);
}

#[test]
fn more_than_seven_cards_is_a_size_error() {
    let cards = parse_cards(&["2c", "3d", "4h", "5s", "6c", "7d", "8h", "9s"]).unwrap();
    assert_eq!(score(&cards), Err(EvalError::WrongSize(8)));
    assert_eq!(score(&cards[..7]).unwrap().category, HandCategory::Straight);
}

#[test]
fn score_ignores_card_order() {
    let mut cards = parse_cards(&["Kd", "10h", "Qs", "Jc", "Ah", "2c", "2d"]).unwrap();
    let expected = score(&cards).unwrap();
    for shift in 1..cards.len() {
        cards.rotate_left(1);
        assert_eq!(score(&cards).unwrap(), expected, "rotation {shift}");
    }
    cards.reverse();
    assert_eq!(score(&cards).unwrap(), expected);
}

#[test]
fn top_two_pair_on_reduced_deck_is_a_favourite() {
    let hole = hole(["As", "Ks"]);
    let board = parse_cards(&["Ah", "Kh", "2c"]).unwrap();
    let deck = parse_cards(&["3d", "4d", "5c", "7d", "8c", "9d", "Qh"]).unwrap();
    let equity = estimate(&hole, &board, &deck).unwrap();
    assert!(equity > 0.6, "equity={equity}");
}

#[test]
fn equity_is_a_probability_on_every_street() {
    let hole = hole(["8c", "9c"]);
    let runout = parse_cards(&["10c", "2h", "Kd", "Jc", "3s"]).unwrap();
    for len in [0, 3, 4, 5] {
        let board = &runout[..len];
        let used: Vec<Card> = hole.iter().chain(board).copied().collect();
        let equity = estimate(&hole, board, &remaining_deck(&used)).unwrap();
        assert!((0.0..=1.0).contains(&equity), "street {len}: {equity}");
    }
}

#[test]
fn outcomes_are_complementary_per_matchup() {
    // With one opponent holding left, the two seats' equities sum to one.
    let board = parse_cards(&["Ah", "Kh", "2c", "7d", "9s"]).unwrap();
    let mine = hole(["Qs", "Qd"]);
    let theirs = hole(["Jc", "Jd"]);
    let mine_vs = estimate(&mine, &board, &theirs).unwrap();
    let theirs_vs = estimate(&theirs, &board, &mine).unwrap();
    assert_eq!(mine_vs, 1.0);
    assert_eq!(mine_vs + theirs_vs, 1.0);

    let chopped = hole(["Qc", "Qh"]);
    assert_eq!(estimate(&mine, &board, &chopped).unwrap(), 0.5);
    assert_eq!(estimate(&chopped, &board, &mine).unwrap(), 0.5);
}
