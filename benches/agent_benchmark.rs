use criterion::{criterion_group, criterion_main, Criterion};
use minesweeper_agent::{Board, Game, GameConfig, GameState, GameStats, InferencePolicy};

#[derive(Debug, Default)]
struct AggregateStats {
    games: Vec<(GameState, GameStats)>,
}

impl AggregateStats {
    fn games_played(&self) -> usize {
        self.games.len()
    }

    fn success_rate(&self) -> f64 {
        if self.games_played() == 0 {
            return 0.0;
        }
        self.games
            .iter()
            .filter(|(state, _)| *state == GameState::Won)
            .count() as f64
            / self.games_played() as f64
            * 100.0
    }

    fn average_moves(&self) -> f64 {
        if self.games_played() == 0 {
            return 0.0;
        }
        self.games
            .iter()
            .map(|(_, stats)| stats.total_moves())
            .sum::<u32>() as f64
            / self.games_played() as f64
    }

    fn total_random_moves(&self) -> u32 {
        self.games.iter().map(|(_, stats)| stats.random_moves).sum()
    }
}

fn play_single_game(config: GameConfig, seed: u64, policy: InferencePolicy) -> (GameState, GameStats) {
    let board = Board::with_seed(config, seed).unwrap();
    let mut game = Game::with_seed(board, seed, policy);
    let state = game.play().unwrap();
    (state, game.stats())
}

fn benchmark_agent(c: &mut Criterion) {
    let mut group = c.benchmark_group("Agent");

    let test_configs = vec![
        GameConfig::new(8, 8, 10),   // Beginner
        GameConfig::new(16, 16, 40), // Intermediate
        GameConfig::new(16, 30, 99), // Expert
    ];

    let policies = [
        (InferencePolicy::SinglePass, "Single pass"),
        (InferencePolicy::Saturate, "Saturate"),
    ];

    for config in test_configs {
        for (policy, name) in policies {
            let mut seed = 0;
            group.bench_function(format!("{} {}x{}", name, config.height, config.width), |b| {
                b.iter(|| {
                    seed += 1;
                    criterion::black_box(play_single_game(config, seed, policy))
                });
            });

            // Effectiveness stats (50 games)
            let mut aggregate = AggregateStats::default();
            for seed in 0..50 {
                aggregate.games.push(play_single_game(config, seed, policy));
            }

            println!("\n{} on {}x{} board:", name, config.height, config.width);
            println!("Success rate: {:.1}%", aggregate.success_rate());
            println!("Average moves per game: {:.1}", aggregate.average_moves());
            println!("Total random moves: {}", aggregate.total_random_moves());
            println!("Games played: {}", aggregate.games_played());
        }
    }

    group.finish();
}

criterion_group!(benches, benchmark_agent);
criterion_main!(benches);
