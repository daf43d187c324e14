//! Whole games driven through the public API.

use klondike_engine::{CardId, Deck, Game, Lift, PileId, Snapshot, Suit};

const MAX_STEPS: usize = 2_000;

fn json(snapshot: &Snapshot) -> String {
    serde_json::to_string(snapshot).unwrap()
}

fn is_legal(game: &Game, source: PileId, lift: Lift, destination: PileId) -> bool {
    matches!(game.check_move(source, lift, destination), Ok(Ok(())))
}

/// Picks a move that makes progress: anything onto a foundation first, then
/// a tableau run that exposes a face-down card, then the waste top onto a
/// tableau.
fn next_move(game: &Game) -> Option<(PileId, Lift, PileId)> {
    let tableaus = || (0u8..7).map(PileId::Tableau);
    let foundations = || (0u8..4).map(PileId::Foundation);

    for source in std::iter::once(PileId::Waste).chain(tableaus()) {
        for destination in foundations() {
            if is_legal(game, source, Lift::Top, destination) {
                return Some((source, Lift::Top, destination));
            }
        }
    }

    for source in tableaus() {
        let cards = game.pile(source).unwrap().cards();
        let Some(first_up) = cards.iter().position(|&card| game.is_face_up(card)) else {
            continue;
        };
        if first_up == 0 {
            continue;
        }
        for destination in tableaus() {
            if is_legal(game, source, Lift::From(first_up), destination) {
                return Some((source, Lift::From(first_up), destination));
            }
        }
    }

    tableaus()
        .find(|&destination| is_legal(game, PileId::Waste, Lift::Top, destination))
        .map(|destination| (PileId::Waste, Lift::Top, destination))
}

/// Plays until stuck or won. Returns the number of recorded moves.
fn play_greedily(game: &mut Game) -> usize {
    let mut recorded = 0;
    let mut idle_draws = 0;
    for _ in 0..MAX_STEPS {
        if game.is_won() {
            break;
        }
        if let Some((source, lift, destination)) = next_move(game) {
            assert!(game
                .attempt_move(source, lift, destination)
                .unwrap()
                .is_accepted());
            idle_draws = 0;
        } else {
            let cycle = game.pile(PileId::Stock).unwrap().len()
                + game.pile(PileId::Waste).unwrap().len();
            if idle_draws > cycle || game.draw_stock().is_noop() {
                break;
            }
            idle_draws += 1;
        }
        recorded += 1;

        let snapshot = game.snapshot();
        assert_eq!(snapshot.total_cards(), 52);
        for foundation in &snapshot.foundations {
            for (i, card) in foundation.iter().enumerate() {
                assert_eq!(card.rank as usize, i + 1);
                assert_eq!(card.suit, foundation[0].suit);
            }
        }
    }
    recorded
}

/// A deal the greedy player always wins: the low 28 cards fill the tableaus
/// with the lowest rank on top of each column, and the stock turns up the
/// rest in foundation order.
fn winnable_deck() -> Deck {
    let order: Vec<CardId> = (1..=13)
        .flat_map(|rank| Suit::ALL.map(|suit| CardId::new(suit, rank).unwrap()))
        .collect();
    let mut deck = vec![order[0]; 52];
    for n in 0..24 {
        deck[n] = order[28 + n];
    }
    for col in 0..7 {
        let start = col * (col + 1) / 2;
        for row in 0..=col {
            deck[51 - (start + row)] = order[start + (col - row)];
        }
    }
    Deck::from_order(deck).unwrap()
}

#[test]
fn scripted_deal_is_won_and_fully_undoable() {
    let mut game = Game::from_deck(winnable_deck());
    let initial = json(&game.snapshot());

    let recorded = play_greedily(&mut game);
    assert!(game.is_won());
    assert_eq!(recorded, game.history().undo_len());
    assert!(game.snapshot().foundations.iter().all(|f| f.len() == 13));

    assert!(game.undo());
    assert!(!game.is_won());
    assert!(game.redo());
    assert!(game.is_won());

    for _ in 0..recorded {
        assert!(game.undo());
    }
    assert!(!game.can_undo());
    assert_eq!(json(&game.snapshot()), initial);
}

#[test]
fn random_deals_unwind_completely() {
    let mut progressed = 0;
    for seed in 0..25 {
        let mut game = Game::new(Some(seed));
        let initial = json(&game.snapshot());

        let recorded = play_greedily(&mut game);
        assert_eq!(recorded, game.history().undo_len());
        if game.snapshot().foundations.iter().any(|f| !f.is_empty()) {
            progressed += 1;
        }

        while game.undo() {}
        assert_eq!(json(&game.snapshot()), initial, "seed {seed}");
    }
    assert!(progressed > 0);
}
