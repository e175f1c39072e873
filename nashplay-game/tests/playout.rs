use nashplay_game::{
    Coin, CoinToss, EquilibriumSolver, GameCatalog, GameKind, GameSession, Hand, NarrationEvent,
    PayoffTable, Player, PlayoutError, RngBundle, SolveError, SolverLimits, create_solver,
};

fn narrate(kind: GameKind, seed: u64) -> Vec<Result<NarrationEvent, PlayoutError>> {
    let mut session = create_solver(kind, seed);
    session.solve().unwrap();
    session.playout().collect()
}

fn events(kind: GameKind, seed: u64) -> Vec<NarrationEvent> {
    narrate(kind, seed)
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

#[test]
fn playouts_open_with_welcome_and_players() {
    for kind in GameKind::ALL {
        let events = events(kind, 1);
        assert_eq!(
            events[0],
            NarrationEvent::Welcome {
                title: kind.title()
            }
        );
        assert_eq!(events[1].to_string(), "Players: Player 1, Player 2");
    }
}

#[test]
fn rps_playout_is_always_a_tie() {
    for seed in 0..100 {
        let events = events(GameKind::Rps, seed);
        assert_eq!(events.len(), 6, "seed {seed}: {events:?}");
        assert_eq!(events.last(), Some(&NarrationEvent::Tie));
        let chooses: Vec<String> = events
            .iter()
            .filter(|e| matches!(e, NarrationEvent::Chooses { .. }))
            .map(ToString::to_string)
            .collect();
        assert_eq!(chooses.len(), 2);
        assert!(chooses.iter().all(|line| line.ends_with("chooses: rock")));
    }
}

#[test]
fn coin_toss_winner_is_the_player_on_turn_at_first_heads() {
    for seed in 0..100 {
        let events = events(GameKind::CoinToss, seed);
        let results: Vec<Coin> = events
            .iter()
            .filter_map(|e| match e {
                NarrationEvent::CoinResult(coin) => Some(*coin),
                _ => None,
            })
            .collect();
        let (last, earlier) = results.split_last().expect("at least one toss");
        assert_eq!(*last, Coin::Heads, "seed {seed}");
        assert!(earlier.iter().all(|coin| *coin == Coin::Tails), "seed {seed}");

        let on_turn = events
            .iter()
            .rev()
            .find_map(|e| match e {
                NarrationEvent::Turn(player) => Some(*player),
                _ => None,
            })
            .expect("a turn was played");
        assert_eq!(events.last(), Some(&NarrationEvent::Wins(on_turn)));
        assert_eq!(events.iter().filter(|e| e.is_verdict()).count(), 1);
    }
}

#[test]
fn coin_toss_turns_narrate_heads_calls() {
    let events = events(GameKind::CoinToss, 2024);
    for event in &events {
        if let NarrationEvent::Chooses { strategy, .. } = event {
            assert_eq!(*strategy, "H");
        }
    }
    let tails = events
        .iter()
        .filter(|e| **e == NarrationEvent::CoinResult(Coin::Tails))
        .count();
    let hand_offs = events
        .iter()
        .filter(|e| matches!(e, NarrationEvent::NextTurn(_)))
        .count();
    assert_eq!(tails, hand_offs);
}

#[test]
fn both_players_win_coin_toss_across_seeds() {
    let winners: Vec<Player> = (0..200)
        .filter_map(|seed| {
            events(GameKind::CoinToss, seed)
                .last()
                .and_then(NarrationEvent::winner)
        })
        .collect();
    assert_eq!(winners.len(), 200);
    assert!(winners.contains(&Player::P1));
    assert!(winners.contains(&Player::P2));
}

#[test]
fn same_seed_replays_same_narration() {
    for kind in GameKind::ALL {
        assert_eq!(narrate(kind, 31337), narrate(kind, 31337));
    }
}

#[test]
fn turn_cap_cuts_off_long_coin_toss_playouts() {
    let mut catalog = GameCatalog::builtin();
    catalog.limits.max_turns = 1;

    let mut cut_off = 0;
    for seed in 0..64 {
        let mut session = GameSession::new(GameKind::CoinToss, seed, &catalog).unwrap();
        let items: Vec<_> = session.playout().collect();
        match items.last() {
            Some(Err(PlayoutError::TurnLimit { turns })) => {
                assert_eq!(*turns, 1);
                let tossed = &items[items.len() - 3];
                assert_eq!(tossed, &Ok(NarrationEvent::CoinResult(Coin::Tails)));
                cut_off += 1;
            }
            Some(Ok(NarrationEvent::Wins(_))) => {}
            other => panic!("seed {seed}: unexpected ending {other:?}"),
        }
        assert!(items.iter().filter(|item| item.is_err()).count() <= 1);
    }
    assert!(cut_off > 0, "some first tosses land tails");
}

#[test]
fn failed_implicit_solve_is_reported_after_intro() {
    let mut catalog = GameCatalog::builtin();
    catalog.limits.max_rounds = 5;
    catalog.rps = PayoffTable::symmetric(&[
        (Hand::Rock, 1.0),
        (Hand::Paper, 1.0),
        (Hand::Scissors, 1.0),
    ]);

    let mut session = GameSession::new(GameKind::Rps, 8, &catalog).unwrap();
    let items: Vec<_> = session.playout().collect();
    assert_eq!(items.len(), 3);
    assert!(matches!(items[0], Ok(NarrationEvent::Welcome { .. })));
    assert_eq!(
        items[2],
        Err(PlayoutError::Solve(SolveError::NotConverged { rounds: 5 }))
    );
}

#[test]
fn playout_is_lazy() {
    let mut solver = EquilibriumSolver::new(
        CoinToss::default(),
        SolverLimits::default(),
        RngBundle::from_user_seed(5),
    );
    let mut playout = solver.playout();
    let intro: Vec<_> = playout.by_ref().take(2).collect();
    assert_eq!(intro.len(), 2);
    assert!(intro.iter().all(Result::is_ok));
    assert_eq!(playout.turns(), 0);

    let _turn = playout.next();
    assert_eq!(playout.turns(), 1);
}

#[test]
fn paper_only_payoffs_let_the_rock_player_win() {
    let mut catalog = GameCatalog::builtin();
    catalog.rps = PayoffTable::symmetric(&[
        (Hand::Rock, 0.0),
        (Hand::Paper, 1.0),
        (Hand::Scissors, 0.0),
    ]);

    let mut seen = Vec::new();
    for seed in 0..32 {
        let mut session = GameSession::new(GameKind::Rps, seed, &catalog).unwrap();
        session.solve().unwrap();
        let equilibrium = session.equilibrium();
        let rock_player = match equilibrium {
            ["paper", "rock"] => Player::P2,
            ["rock", "paper"] => Player::P1,
            other => panic!("seed {seed}: unexpected equilibrium {other:?}"),
        };
        let events = session
            .playout()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(
            events.last(),
            Some(&NarrationEvent::Wins(rock_player)),
            "seed {seed}"
        );
        if !seen.contains(&equilibrium) {
            seen.push(equilibrium);
        }
    }
    assert!(seen.contains(&["paper", "rock"]));
}
