//! Gin Rummy simulation with an exact deadwood solver and neuroevolved players.
//!
//! The hand-evaluation core lives in [`gin`]; [`gameplay`] runs matches on
//! top of it, and [`neural`], [`genetics`] and [`training`] evolve players.

pub mod cards;
pub mod gameplay;
pub mod genetics;
pub mod gin;
pub mod neural;
pub mod training;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Card point values, deadwood totals and match scores.
pub type Points = u32;
/// Neuron activations and network inputs, always in [0, 1].
pub type Signal = f32;
/// Matches won during one generation's evaluation.
pub type Fitness = u32;

// ============================================================================
// GAME RULES
// ============================================================================
/// Highest deadwood total that may knock.
pub const KNOCK_POINT: Points = 10;
/// Bonus to a player going gin, on top of the defender's deadwood.
pub const GIN_BONUS: Points = 25;
/// Bonus to a defender whose deadwood is no higher than the knocker's.
pub const UNDERCUT_BONUS: Points = 25;
/// Score that ends a match.
pub const MATCH_TARGET: Points = 100;
/// Awarded once to the player who reached the target.
pub const GAME_BONUS: Points = 100;
/// Awarded per game won, tallied at the end of the match.
pub const LINE_BONUS: Points = 20;
/// A game washes out when the stock is down to this many cards.
pub const STOCK_FLOOR: usize = 2;
/// Cards dealt to each player; the first seat receives one more.
pub const DEAL_SIZE: usize = 10;
/// Cards held between drawing and discarding.
pub const HAND_CAPACITY: usize = DEAL_SIZE + 1;
/// Turns before a game stalled on discard-pile pickups washes out.
pub const MAX_TURNS_PER_GAME: usize = 256;
/// Games played before a match is called for whoever leads.
pub const MAX_GAMES_PER_MATCH: usize = 64;

// ============================================================================
// DEADWOOD SOLVER
// ============================================================================
/// Memoized card multisets kept per solver before eviction.
pub const SOLVER_CACHE_CAPACITY: usize = 1 << 16;

// ============================================================================
// NEURAL NETWORK
// Fully connected: observation → hidden → (action, index, accept).
// ============================================================================
/// Inputs: hand rankings, discard top, deadwood, stock, phase, exposure.
pub const INPUT_WIDTH: usize = HAND_CAPACITY + 5;
/// Neurons in the single hidden layer.
pub const HIDDEN_WIDTH: usize = 24;
/// Outputs: action choice, card index, accept an improper knock.
pub const OUTPUT_WIDTH: usize = 3;

// ============================================================================
// GENETIC ALGORITHM
// ============================================================================
/// Members per generation.
pub const POPULATION_SIZE: usize = 32;
/// Matches each member plays against random opponents per generation.
pub const MATCHES_PER_MEMBER: usize = 4;
/// Share of the population carried into the next generation.
pub const SURVIVOR_FRACTION: f32 = 0.25;
/// Per-gene probability of being redrawn after crossover.
pub const MUTATION_RATE: f32 = 0.02;
/// Default generation limit for a training run.
pub const GENERATIONS: usize = 100;

// ============================================================================
// TRAINING INFRASTRUCTURE
// ============================================================================
/// Interval between progress log messages during training.
pub const TRAINING_LOG_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60);

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "cli")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/robogin-{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

#[cfg(feature = "cli")]
static INTERRUPTED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);
#[cfg(feature = "cli")]
static DEADLINE: std::sync::OnceLock<std::time::Instant> = std::sync::OnceLock::new();
/// True once "Q" was typed on stdin or the TRAIN_DURATION deadline passed.
#[cfg(feature = "cli")]
pub fn interrupted() -> bool {
    INTERRUPTED.load(std::sync::atomic::Ordering::Relaxed)
        || DEADLINE
            .get()
            .is_some_and(|d| std::time::Instant::now() >= *d)
}
#[cfg(not(feature = "cli"))]
pub fn interrupted() -> bool {
    false
}
/// Register graceful interrupt handler. Type "Q" + Enter to stop after the
/// current generation. TRAIN_DURATION (e.g. "30m", "2h") bounds the run.
#[cfg(feature = "cli")]
pub fn brb() {
    if let Ok(duration) = std::env::var("TRAIN_DURATION") {
        if let Some(deadline) = parse_duration(&duration) {
            let _ = DEADLINE.set(std::time::Instant::now() + deadline);
            log::info!("training will stop after {}", duration);
        }
    }
    std::thread::spawn(|| {
        loop {
            let ref mut buffer = String::new();
            match std::io::stdin().read_line(buffer) {
                Ok(0) | Err(_) => break,
                Ok(_) if buffer.trim().eq_ignore_ascii_case("Q") => {
                    log::warn!("graceful interrupt requested, finishing current generation...");
                    INTERRUPTED.store(true, std::sync::atomic::Ordering::Relaxed);
                    break;
                }
                Ok(_) => continue,
            }
        }
    });
}
/// Parse duration string like "30s", "5m", "2h", "1d" into Duration.
#[cfg(feature = "cli")]
fn parse_duration(s: &str) -> Option<std::time::Duration> {
    let s = s.trim();
    let (at, unit) = s.char_indices().last()?;
    let value = s[..at].parse::<u64>().ok()?;
    let scale = match unit {
        's' => 1,
        'm' => 60,
        'h' => 3600,
        'd' => 86400,
        _ => return None,
    };
    value.checked_mul(scale).map(std::time::Duration::from_secs)
}
