//! Headless autoplayer: runs one session of every game with simple bots.
//!
//! ```text
//! arcade-sim [config.json]
//!
//! ARCADE_SEED    root seed, overrides the config file
//! ARCADE_SCORES  path of a JSON score file; scores stay in memory without it
//! RUST_LOG       log filter, default "info"
//! ```

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arcade_engines::core::{ArcadeConfig, Direction, GameRng, RandomSource};
use arcade_engines::games::flap::FlapGame;
use arcade_engines::games::memory::{FlipOutcome, MemoryGame};
use arcade_engines::games::minesweeper::Minesweeper;
use arcade_engines::games::shooter::ShooterGame;
use arcade_engines::games::snake::SnakeGame;
use arcade_engines::games::twenty48::Game2048;
use arcade_engines::rules::{ArcadeGame, RealtimeEngine};
use arcade_engines::scores::{
    clear_snapshot, load_snapshot, save_snapshot, JsonFileStore, KeyValueStore, MemoryLeaderboard, MemoryStore,
    ScoreBook, ScoreStore, DEFAULT_LIST_LIMIT,
};
use arcade_engines::session::Session;

const PLAYER_NAME: &str = "arcade-sim";
const FRAME: f32 = 1.0 / 60.0;
const MAX_FRAMES: usize = 60 * 120;
const MAX_STEPS: usize = 20_000;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = match std::env::args().nth(1) {
        Some(path) => ArcadeConfig::from_json_file(&path).with_context(|| format!("loading config from {path}"))?,
        None => ArcadeConfig::default(),
    };
    if let Ok(seed) = std::env::var("ARCADE_SEED") {
        let seed = seed.parse().context("ARCADE_SEED must be an unsigned integer")?;
        config = config.with_seed(seed);
    }
    info!(seed = config.seed, "starting arcade simulation");

    match std::env::var("ARCADE_SCORES") {
        Ok(path) => {
            let store = JsonFileStore::open(&path).with_context(|| format!("opening score file {path}"))?;
            run_all(&config, ScoreBook::new(store).with_leaderboard(MemoryLeaderboard::new()))
        }
        Err(_) => run_all(&config, ScoreBook::new(MemoryStore::new()).with_leaderboard(MemoryLeaderboard::new())),
    }
}

fn run_all<K: KeyValueStore>(config: &ArcadeConfig, book: ScoreBook<K>) -> Result<()> {
    let root = GameRng::new(config.seed);

    let book = play_2048(root.for_context("2048"), book)?;
    let book = play_minesweeper(config, root.for_context("minesweeper"), book)?;
    let book = play_snake(config, root.for_context("snake"), book)?;
    let book = play_flap(config, root.for_context("flap"), book)?;
    let book = play_shooter(config, root.for_context("shooter"), book)?;
    let book = play_memory(config, root.for_context("memory"), book)?;

    for row in book.list(arcade_engines::GameId::Shooter, DEFAULT_LIST_LIMIT) {
        info!(name = %row.name, score = row.score, "shooter leaderboard");
    }
    Ok(())
}

/// Log the result, submit it, and hand back the store.
fn finish<G: ArcadeGame, K: KeyValueStore>(session: Session<G, ScoreBook<K>>) -> ScoreBook<K> {
    let (game, mut book) = session.into_parts();
    let id = game.game_id();
    let outcome = book.submit(id, PLAYER_NAME, game.score());
    info!(game = %id, score = game.score(), status = ?game.status(), best = ?book.get_best(id), ?outcome, "session done");
    book
}

fn play_2048<K: KeyValueStore>(rng: GameRng, book: ScoreBook<K>) -> Result<ScoreBook<K>> {
    let game = Game2048::resume(load_snapshot(book.store()), rng);
    let mut session = Session::new(game, book);
    const PREFERENCE: [Direction; 4] = [Direction::Down, Direction::Left, Direction::Right, Direction::Up];

    for _ in 0..MAX_STEPS {
        let moved = session.update(|g| PREFERENCE.into_iter().any(|d| g.apply_move(d).moved));
        if !moved || session.game().status().is_over() {
            break;
        }
    }

    let snapshot = session.game().snapshot();
    let finished = session.game().status().is_over();
    let store = session.store_mut().store_mut();
    if finished {
        clear_snapshot(store)?;
    } else {
        save_snapshot(store, &snapshot)?;
    }
    Ok(finish(session))
}

fn play_minesweeper<K: KeyValueStore>(config: &ArcadeConfig, mut rng: GameRng, book: ScoreBook<K>) -> Result<ScoreBook<K>> {
    let mut player = rng.fork();
    let game = Minesweeper::new(config.minesweeper, rng)?;
    let mut session = Session::new(game, book);

    while !session.game().status().is_over() {
        let board = session.game().board();
        let hidden: Vec<(usize, usize)> = (0..board.rows())
            .flat_map(|r| (0..board.cols()).map(move |c| (r, c)))
            .filter(|&(r, c)| board.get(r, c).is_ok_and(|cell| !cell.revealed && !cell.flagged))
            .collect();
        if hidden.is_empty() {
            break;
        }
        let (row, col) = hidden[player.gen_index(hidden.len())];
        session.update(|g| g.reveal(row, col))?;
    }
    Ok(finish(session))
}

fn play_snake<K: KeyValueStore>(config: &ArcadeConfig, rng: GameRng, book: ScoreBook<K>) -> Result<ScoreBook<K>> {
    let game = SnakeGame::new(config.snake.clone(), rng)?;
    let mut session = Session::new(game, book);

    for _ in 0..MAX_STEPS {
        if session.game().status().is_over() {
            break;
        }
        let game = session.game();
        let (Some(head), food) = (game.head(), game.food()) else {
            break;
        };
        let safe = |d: Direction| {
            let next = head.step(d);
            d != game.direction().opposite() && game.config().contains(next) && game.body().all(|&p| p != next)
        };
        let toward = [
            (food.x > head.x, Direction::Right),
            (food.x < head.x, Direction::Left),
            (food.y > head.y, Direction::Down),
            (food.y < head.y, Direction::Up),
        ];
        let choice = toward
            .iter()
            .filter(|(wanted, _)| *wanted)
            .map(|&(_, d)| d)
            .find(|&d| safe(d))
            .or_else(|| Direction::ALL.into_iter().find(|&d| safe(d)));
        session.update(|g| {
            if let Some(d) = choice {
                g.set_direction(d);
            }
            g.step()
        });
    }
    Ok(finish(session))
}

fn play_flap<K: KeyValueStore>(config: &ArcadeConfig, rng: GameRng, book: ScoreBook<K>) -> Result<ScoreBook<K>> {
    let game = FlapGame::new(config.flap.clone(), rng)?;
    let mut session = Session::new(game, book);
    session.update(|g| g.flap());

    for _ in 0..MAX_FRAMES {
        let game = session.game();
        let body = game.body();
        let target = game
            .obstacles()
            .find(|o| o.trailing_edge() >= body.x - game.config().radius)
            .map_or(game.config().height / 2.0, |o| o.gap_top + o.gap_height * 0.6);
        let should_flap = body.y > target && game.velocity() > 0.0;

        let delta = session.update(|g| {
            if should_flap {
                g.flap();
            }
            g.tick(FRAME)
        });
        if delta.game_over() {
            break;
        }
    }
    Ok(finish(session))
}

fn play_shooter<K: KeyValueStore>(config: &ArcadeConfig, rng: GameRng, book: ScoreBook<K>) -> Result<ScoreBook<K>> {
    let game = ShooterGame::new(config.shooter.clone(), rng)?;
    let mut session = Session::new(game, book);

    for frame in 0..MAX_FRAMES {
        let game = session.game();
        let ship = game.player().x;
        let aim = game
            .targets()
            .filter(|t| !t.consumed)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|t| t.pos.x + t.size / 2.0);

        let delta = session.update(|g| {
            match aim {
                Some(x) if x < ship - 5.0 => g.move_player(Direction::Left),
                Some(x) if x > ship + 5.0 => g.move_player(Direction::Right),
                _ => {}
            }
            if frame % 10 == 0 {
                g.fire();
            }
            g.tick(FRAME)
        });
        if delta.game_over() {
            break;
        }
    }
    Ok(finish(session))
}

fn play_memory<K: KeyValueStore>(config: &ArcadeConfig, rng: GameRng, book: ScoreBook<K>) -> Result<ScoreBook<K>> {
    let game = MemoryGame::new(config.memory.clone(), rng)?;
    let mut session = Session::new(game, book);
    // What the bot has seen face up, by card index.
    let mut seen: FxHashMap<usize, u8> = FxHashMap::default();

    for _ in 0..MAX_STEPS {
        if session.game().status().is_over() {
            break;
        }
        let cards = session.game().cards();
        let open: Vec<usize> = (0..cards.len()).filter(|&i| !cards[i].matched).collect();
        let known_pair = open.iter().find_map(|&i| {
            let symbol = seen.get(&i)?;
            open.iter().find(|&&j| j != i && seen.get(&j) == Some(symbol)).map(|&j| (i, j))
        });
        let first = match known_pair {
            Some((i, _)) => i,
            None => match open.iter().copied().find(|i| !seen.contains_key(i)) {
                Some(i) => i,
                None => break,
            },
        };

        session.update(|g| g.flip(first))?;
        seen.insert(first, session.game().cards()[first].symbol);
        let symbol = seen[&first];

        let cards = session.game().cards();
        let second = open
            .iter()
            .copied()
            .find(|&j| j != first && seen.get(&j) == Some(&symbol))
            .or_else(|| open.iter().copied().find(|&j| j != first && !seen.contains_key(&j) && !cards[j].face_up));
        let Some(second) = second else {
            break;
        };

        let outcome = session.update(|g| g.flip(second))?;
        seen.insert(second, session.game().cards()[second].symbol);
        if let FlipOutcome::Mismatched { .. } = outcome {
            // Stands in for the conceal timer.
            let token = session.token();
            session.run_deferred(token, |g| g.conceal());
        }
    }
    Ok(finish(session))
}
