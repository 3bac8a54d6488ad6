//! Play-tree search integration tests.
//!
//! These tests build small goldfish games from decklists and check what the
//! breadth-first search can and cannot reach.

use rustc_hash::FxHashSet;

use goldfish::cards::{build_game, CardRegistry, Decklist};
use goldfish::core::{GameConfig, GameState, PlayerId};
use goldfish::search::{PlayTree, SearchConfig};
use goldfish::zones::ZoneKind;

fn start(deck: &[&str], hand: &[&str]) -> GameState {
    let registry = CardRegistry::with_catalog();
    let list = Decklist::new(deck).with_hand(hand);
    build_game(&GameConfig::default(), &registry, &[list], 0).unwrap()
}

fn search(state: GameState, turns: u32) -> PlayTree {
    let mut tree = PlayTree::new(state, SearchConfig::default().with_turn_limit(turns));
    tree.run();
    tree
}

// =============================================================================
// Mana goals
// =============================================================================

/// Land, ritual: three mana on turn one and no more.
#[test]
fn test_ritual_turn_one() {
    let tree = search(start(&["Forest"; 5], &["Swamp", "Dark Ritual"]), 1);

    assert_eq!(tree.max_mana(1), Some(3));
    assert!(tree.can_reach_mana(3, 1));
    assert!(!tree.can_reach_mana(4, 1));
}

/// A turn-one elf taps for mana on turn two.
#[test]
fn test_elf_into_turn_two() {
    let tree = search(start(&["Forest"; 5], &["Forest", "Llanowar Elves"]), 2);

    assert_eq!(tree.max_mana(1), Some(1));
    assert_eq!(tree.max_mana(2), Some(3));
    assert!(tree.can_reach_mana(3, 2));
    assert!(!tree.can_reach_mana(3, 1));
}

/// Mana in a pool does not survive the turn, so states are only as rich as
/// that turn's plays.
#[test]
fn test_pool_empties_between_turns() {
    let tree = search(start(&["Forest"; 5], &["Forest"]), 2);

    let fresh: Vec<&GameState> = tree
        .states_at(2)
        .filter(|s| s.zone_size(PlayerId::new(0), ZoneKind::Field) == 1)
        .collect();
    assert!(fresh.iter().any(|s| s.player(PlayerId::new(0)).pool.is_empty()));
    assert_eq!(tree.max_mana(2), Some(2));
}

// =============================================================================
// Turn structure
// =============================================================================

/// Upkeep triggers wait on the stack at the start of the main phase and
/// resolve as an ordinary action.
#[test]
fn test_upkeep_trigger_resolves_in_main_phase() {
    let registry = CardRegistry::with_catalog();
    let list = Decklist::new(&["Forest"; 4]).with_field(&["Phyrexian Arena"]);
    let state = build_game(&GameConfig::default(), &registry, &[list], 0).unwrap();
    let tree = search(state, 2);

    let p0 = PlayerId::new(0);
    let waiting = tree.states_at(2).filter(|s| s.stack.len() == 1).count();
    assert_eq!(waiting, 1);
    assert!(tree
        .states_at(2)
        .any(|s| s.player(p0).life == 19 && s.zone_size(p0, ZoneKind::Hand) == 2));
}

/// Running out of cards ends every line in a loss.
#[test]
fn test_deck_out() {
    let tree = search(start(&["Forest"], &[]), 3);

    assert!(tree.tracker(2).is_some_and(|t| !t.is_empty()));
    let turn3 = tree.tracker(3).unwrap();
    assert!(turn3.is_empty());
    assert!(turn3.losses().count() > 0);
    assert!(!tree.can_win_by(3));
}

// =============================================================================
// Dedup and statistics
// =============================================================================

/// Different orders of the same plays meet in one state.
#[test]
fn test_transpositions_dedup() {
    let registry = CardRegistry::with_catalog();
    let list = Decklist::new(&["Forest"; 3]).with_field(&["Forest", "Forest"]);
    let state = build_game(&GameConfig::default(), &registry, &[list], 0).unwrap();
    let tree = search(state, 1);
    let stats = tree.stats();

    // Untapped, one tapped, both tapped: tapping in either order meets.
    let turn = &stats.turns[0];
    assert_eq!(turn.intermediate, 3);
    assert!(turn.traversed > turn.intermediate);
    let ids: FxHashSet<String> = tree.states_at(1).map(GameState::id).collect();
    assert_eq!(ids.len(), turn.intermediate);
    assert_eq!(tree.max_mana(1), Some(2));
}

/// The same start always explores the same states.
#[test]
fn test_search_is_deterministic() {
    let hand = ["Forest", "Llanowar Elves", "Wall of Roots"];
    let a = search(start(&["Forest"; 5], &hand), 2);
    let b = search(start(&["Forest"; 5], &hand), 2);

    for turn in 1..=2 {
        let ids = |tree: &PlayTree| -> FxHashSet<String> { tree.states_at(turn).map(GameState::id).collect() };
        assert_eq!(ids(&a), ids(&b));
    }
    assert_eq!(a.stats().total_states(), b.stats().total_states());
}

/// Stats cover every turn and add up.
#[test]
fn test_stats_per_turn() {
    let tree = search(start(&["Forest"; 5], &["Forest", "Swamp"]), 3);
    let stats = tree.stats();

    assert_eq!(stats.turns.len(), 3);
    for (turn, entry) in (1..).zip(&stats.turns) {
        assert_eq!(entry.turn, turn);
        assert!(entry.traversed >= entry.intermediate);
        assert!(!entry.truncated);
    }
    assert_eq!(stats.total_states(), (1..=3).map(|t| tree.states_at(t).count()).sum::<usize>());
}
