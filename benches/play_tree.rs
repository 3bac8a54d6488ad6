use criterion::{black_box, criterion_group, criterion_main, Criterion};
use goldfish::cards::{build_game, CardRegistry, Decklist};
use goldfish::core::{GameConfig, GameState};
use goldfish::query::EnumerateAll;
use goldfish::rules::legal_actions;
use goldfish::search::{PlayTree, SearchConfig};

fn elf_start() -> GameState {
    let registry = CardRegistry::with_catalog();
    let list = Decklist::new(&["Forest", "Llanowar Elves", "Forest", "Dark Ritual", "Swamp"])
        .with_hand(&["Forest", "Llanowar Elves", "Wall of Roots", "Swamp", "Dark Ritual"]);
    build_game(&GameConfig::default(), &registry, &[list], 0).expect("catalog cards")
}

fn bench_state_id(c: &mut Criterion) {
    let state = elf_start();

    c.bench_function("state_id", |b| b.iter(|| black_box(&state).id()));
}

fn bench_clone(c: &mut Criterion) {
    let state = elf_start();

    c.bench_function("state_clone", |b| b.iter(|| black_box(&state).clone()));
}

fn bench_legal_actions(c: &mut Criterion) {
    let state = elf_start();

    c.bench_function("legal_actions", |b| {
        b.iter(|| legal_actions(black_box(&state), &EnumerateAll))
    });
}

fn bench_play_tree(c: &mut Criterion) {
    let state = elf_start();

    c.bench_function("play_tree_3_turns", |b| {
        b.iter(|| {
            let mut tree = PlayTree::new(state.clone(), SearchConfig::default().with_turn_limit(3));
            tree.run();
            tree.max_mana(3)
        })
    });
}

criterion_group!(
    benches,
    bench_state_id,
    bench_clone,
    bench_legal_actions,
    bench_play_tree
);
criterion_main!(benches);
