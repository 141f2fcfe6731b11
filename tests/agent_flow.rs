use heads_up_agent::agent::{Agent, AgentConfig};
use heads_up_agent::cards::parse_cards;
use heads_up_agent::game::{Action, ActionKind, Bot, GameState, RoundState, TerminalState};
use heads_up_agent::policy::StrategyVariant;
use rand::{Rng, SeedableRng};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

fn game(bankroll: i64, round_num: u32) -> GameState {
    GameState {
        bankroll,
        game_clock: 30.0,
        round_num,
        total_rounds: 1000,
    }
}

fn spot(hole: &[&str], board: &[&str], legal: &[ActionKind]) -> RoundState {
    RoundState {
        hands: [parse_cards(hole).unwrap(), vec![]],
        board: parse_cards(board).unwrap(),
        pips: [0, 20],
        stacks: [380, 360],
        legal_actions: legal.to_vec(),
        raise_bounds: legal.contains(&ActionKind::Raise).then_some((20, 200)),
    }
}

fn agent(variant: StrategyVariant, seed: u64) -> Agent {
    Agent::new(AgentConfig {
        variant,
        policy: None,
        seed: Some(seed),
    })
}

#[test]
fn top_two_pair_raises_to_the_maximum() {
    let mut agent = agent(StrategyVariant::Clinch, 7);
    let round = spot(
        &["As", "Ks"],
        &["Ah", "Kh", "2c"],
        &[ActionKind::Fold, ActionKind::Call, ActionKind::Raise],
    );
    let action = agent.get_action(&game(0, 100), &round, 0).unwrap();
    assert_eq!(action, Action::Raise(200));
}

#[test]
fn safe_lead_folds_any_hand() {
    let mut agent = agent(StrategyVariant::Clinch, 7);
    let round = spot(
        &["As", "Ah"],
        &["Ad", "Ac", "Kh"],
        &[ActionKind::Fold, ActionKind::Call, ActionKind::Raise],
    );
    // 10 rounds left and 200 > 11 * 7.5
    let action = agent.get_action(&game(200, 990), &round, 0).unwrap();
    assert_eq!(action, Action::Fold);
}

#[test]
fn checks_whenever_raising_is_closed() {
    for (hole, board) in [
        (["As", "Ah"], vec!["Ad", "Ac", "Kh"]),
        (["7c", "2d"], vec!["Ks", "Qh", "9d", "4s"]),
        (["5h", "6h"], vec![]),
    ] {
        let mut agent = agent(StrategyVariant::Equity, 1);
        let round = spot(&hole, &board, &[ActionKind::Check]);
        assert_eq!(agent.get_action(&game(0, 1), &round, 0).unwrap(), Action::Check);
    }
}

#[test]
fn full_round_lifecycle_builds_history() {
    let mut agent = agent(StrategyVariant::Clinch, 11);
    let board = ["Ah", "Kh", "2c", "7d", "9s"];

    for round_num in 1..=3 {
        let g = game(0, round_num);
        let pre = spot(&["As", "Ks"], &[], &[ActionKind::Call, ActionKind::Raise]);
        agent.handle_new_round(&g, &pre, 0).unwrap();
        agent.get_action(&g, &pre, 0).unwrap();
        let river = spot(&["As", "Ks"], &board, &[ActionKind::Check, ActionKind::Raise]);
        agent.get_action(&g, &river, 0).unwrap();
        assert_eq!(agent.opponent().round_actions().len(), 2);

        let mut shown = river.clone();
        shown.hands[1] = parse_cards(&["Qc", "Jd"]).unwrap();
        let terminal = TerminalState {
            deltas: [40, -40],
            previous_state: shown,
        };
        agent.handle_round_over(&g, &terminal, 0).unwrap();
    }

    let history = agent.opponent().history();
    assert_eq!(history.len(), 3);
    assert!(history.iter().all(|r| r.actions.len() == 2));
    let confidence = agent.opponent().current_confidence();
    assert!((0.0..=1.0).contains(&confidence));
}

#[test]
fn random_spots_only_produce_legal_actions() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let menus: [&[ActionKind]; 4] = [
        &[ActionKind::Check, ActionKind::Raise],
        &[ActionKind::Check],
        &[ActionKind::Fold, ActionKind::Call],
        &[ActionKind::Fold, ActionKind::Call, ActionKind::Raise],
    ];
    let mut agents = [
        agent(StrategyVariant::Equity, 1),
        agent(StrategyVariant::Clinch, 2),
        agent(StrategyVariant::Aggressive, 3),
    ];

    for _ in 0..30 {
        let mut deck = heads_up_agent::cards::standard_deck();
        deck.shuffle(&mut rng);
        let street = [0usize, 3, 4, 5][rng.gen_range(0..4)];
        let legal = menus[rng.gen_range(0..menus.len())];
        let bounds = rng.gen_range(2..100);
        let round = RoundState {
            hands: [deck[..2].to_vec(), vec![]],
            board: deck[2..2 + street].to_vec(),
            pips: [rng.gen_range(0..50), rng.gen_range(0..50)],
            stacks: [400, 400],
            legal_actions: legal.to_vec(),
            raise_bounds: legal
                .contains(&ActionKind::Raise)
                .then_some((bounds, bounds * 2)),
        };
        let g = game(rng.gen_range(-3000..3000), rng.gen_range(1..=1000));

        for agent in agents.iter_mut() {
            let action = agent.get_action(&g, &round, 0).unwrap();
            assert!(round.validate(&action).is_ok(), "{action} for {legal:?}");
        }
    }
}
