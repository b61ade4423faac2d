use clap::Parser;
use minesweeper_agent::{
    Board, Game, GameConfig, GameError, GameState, InferencePolicy, KnowledgeBase, Minefield,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Parser, Debug)]
#[command(version, about = "Plays Minesweeper with a logic-based agent", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Number of rows
    #[arg(long, default_value_t = 8)]
    height: u32,

    /// Number of columns
    #[arg(long, default_value_t = 8)]
    width: u32,

    /// Number of mines
    #[arg(short, long, default_value_t = 8)]
    mines: u32,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// How many games to play
    #[arg(short, long, default_value_t = 1)]
    games: u32,

    /// Keep applying both inference rules until nothing new is found
    #[arg(long)]
    saturate: bool,
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();
    log::debug!("seed: {:?}", args.seed);

    if let Err(e) = run(&args) {
        log::error!("Game error: {}", e);
        eprintln!("Game error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), GameError> {
    let config = GameConfig::new(args.height, args.width, args.mines);
    config.validate()?;

    let policy = if args.saturate {
        InferencePolicy::Saturate
    } else {
        InferencePolicy::SinglePass
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut wins = 0;
    let mut total_moves = 0;

    for round in 1..=args.games {
        let board = Board::with_rng(config, &mut rng)?;
        let agent = KnowledgeBase::with_rng(board.dimensions(), StdRng::seed_from_u64(rng.gen()))
            .with_policy(policy);
        let mut game = Game::with_agent(board, agent);

        let state = game.play()?;
        let stats = game.stats();
        total_moves += stats.total_moves();
        if state == GameState::Won {
            wins += 1;
        }

        print!("{}", game.field());
        println!(
            "Game {}: {:?} after {} moves ({} safe, {} random), {} of {} mines identified{}",
            round,
            state,
            stats.total_moves(),
            stats.safe_moves,
            stats.random_moves,
            game.agent().known_mines().len(),
            game.field().mine_count(),
            if game.field().won(game.agent().known_mines()) {
                ", all flagged"
            } else {
                ""
            }
        );
    }

    if args.games > 1 {
        println!(
            "Won {} of {} games ({:.1}%), {:.1} moves per game",
            wins,
            args.games,
            wins as f64 / args.games as f64 * 100.0,
            total_moves as f64 / args.games as f64
        );
    }

    Ok(())
}
