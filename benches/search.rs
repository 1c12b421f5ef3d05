//! Minimax search benchmark on a mid-sized board.

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};

use pursuit_engine::board::{Graph, Location, RoundSchedule, TransportKind};
use pursuit_engine::core::{Colour, PlayerConfig, TicketKind};
use pursuit_engine::game::GameState;
use pursuit_engine::search::MinimaxStrategy;
use pursuit_engine::strategy::Strategy;

fn config(colour: Colour, location: u32) -> PlayerConfig {
    let (secret, double) = if colour.is_evader() { (3, 2) } else { (0, 0) };
    PlayerConfig::new(colour, Location(location))
        .with_ticket(TicketKind::Taxi, 12)
        .with_ticket(TicketKind::Bus, 8)
        .with_ticket(TicketKind::Underground, 4)
        .with_ticket(TicketKind::Secret, secret)
        .with_ticket(TicketKind::Double, double)
}

fn board() -> Arc<Graph> {
    // 24-node taxi ring, bus chords every 4th node, two underground spans
    let mut builder = Graph::builder();
    for i in 1u32..=24 {
        let next = i % 24 + 1;
        builder = builder.edge(Location(i), TransportKind::Taxi, Location(next));
    }
    for i in (1u32..=24).step_by(4) {
        let across = (i + 3) % 24 + 1;
        builder = builder.edge(Location(i), TransportKind::Bus, Location(across));
    }
    Arc::new(
        builder
            .edge(Location(1), TransportKind::Underground, Location(13))
            .edge(Location(7), TransportKind::Underground, Location(19))
            .build(),
    )
}

fn bench_search(c: &mut Criterion) {
    let state = GameState::new_game(
        Arc::new(RoundSchedule::new(vec![
            false, false, true, false, false, true, false, false,
        ])),
        board(),
        config(Colour::Black, 1),
        vec![
            config(Colour::Blue, 7),
            config(Colour::Green, 13),
            config(Colour::Red, 19),
        ],
    )
    .unwrap();

    c.bench_function("minimax_three_pursuers", |b| {
        b.iter(|| {
            let mut searcher = MinimaxStrategy::default();
            let legal = state.legal_moves(Colour::Black);
            searcher.choose_move(&state.view(), Location(1), &legal)
        });
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
