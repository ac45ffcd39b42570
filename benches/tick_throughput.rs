//! Tick throughput benchmarks
//!
//! Run with: cargo bench --bench tick_throughput

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gravity_duel::config::SimConfig;
use gravity_duel::game::game_loop::{GameLoop, GameLoopConfig};
use gravity_duel::game::input::PlayerIntent;
use gravity_duel::game::state::Arena;
use gravity_duel::game::systems::{combat, control};
use gravity_duel::runner::{run_headless, RecordingSink, Session};
use gravity_duel::script::{InputScript, ScriptedKey};
use gravity_duel::util::vec2::Vec2;

/// Both players circle the central platform, swapping and attacking on a loop
fn create_busy_script(ticks: u64) -> InputScript {
    let mut events = Vec::new();
    for tick in (0..ticks).step_by(30) {
        let (p1_move, p2_move) = if (tick / 30) % 2 == 0 {
            ("d", "ArrowLeft")
        } else {
            ("a", "ArrowRight")
        };
        for key in [p1_move, p2_move, "q", "k", "w", "ArrowUp"] {
            events.push(ScriptedKey {
                tick,
                key: key.to_string(),
                pressed: true,
            });
        }
        for key in [p1_move, p2_move, "q", "k", "w", "ArrowUp"] {
            events.push(ScriptedKey {
                tick: tick + 15,
                key: key.to_string(),
                pressed: false,
            });
        }
    }
    InputScript { events }
}

/// Benchmark a single game loop tick with both players fighting on the central platform
fn bench_single_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");
    group.sample_size(100);

    let mut game = GameLoop::new(GameLoopConfig::default());
    let sender = game.input_sender();
    for player in &mut game.state_mut().players {
        player.position = Vec2::new(400.0 + player.id as f32 * 20.0, 250.0);
    }

    group.throughput(Throughput::Elements(1));
    group.bench_function("game_loop", |b| {
        b.iter(|| {
            let _ = sender.press("q");
            let _ = sender.press("k");
            black_box(game.tick())
        })
    });

    let arena = Arena::default();
    let intent = PlayerIntent {
        right: true,
        attack: true,
        ..PlayerIntent::default()
    };
    let mut players = game.state().players.clone();
    group.bench_function("player_update_and_combat", |b| {
        b.iter(|| {
            for player in players.iter_mut() {
                player.lives = 3;
                black_box(control::update_player(player, &intent, &arena));
            }
            black_box(combat::resolve_all(&mut players))
        })
    });

    group.finish();
}

/// Benchmark whole scripted runs of increasing length
fn bench_scripted_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("scripted_run");
    group.sample_size(20);

    for ticks in [600u64, 3_600, 36_000] {
        let config = SimConfig {
            max_ticks: ticks,
            auto_restart: true,
            ..SimConfig::default()
        };
        let script = create_busy_script(ticks);

        group.throughput(Throughput::Elements(ticks));
        group.bench_with_input(BenchmarkId::new("headless", ticks), &ticks, |b, _| {
            b.iter(|| {
                let mut session = Session::new(&config, script.clone());
                black_box(run_headless(&mut session, &mut RecordingSink::default()))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_tick, bench_scripted_run);
criterion_main!(benches);
