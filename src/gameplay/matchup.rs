use super::action::Action;
use super::action::Phase;
use super::observation::Observation;
use super::player::Player;
use super::table::Table;
use crate::DEAL_SIZE;
use crate::GAME_BONUS;
use crate::GIN_BONUS;
use crate::HAND_CAPACITY;
use crate::KNOCK_POINT;
use crate::LINE_BONUS;
use crate::MATCH_TARGET;
use crate::MAX_GAMES_PER_MATCH;
use crate::MAX_TURNS_PER_GAME;
use crate::Points;
use crate::STOCK_FLOOR;
use crate::UNDERCUT_BONUS;
use crate::gin::CacheStats;
use crate::gin::Solver;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// How a single game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// a valid knock by this seat, deadwood 1 to 10
    Knock(usize),
    /// a valid knock by this seat with no deadwood
    Gin(usize),
    /// the opponent accepted this seat's improper knock
    Accepted(usize),
    /// the stock ran down, or the turn limit passed, before anyone knocked
    Washout,
}

/// Final tally of a match, seat-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub winner: usize,
    pub scores: [Points; 2],
    pub wins: [usize; 2],
    pub games: usize,
    pub cache: CacheStats,
}

/// Games between two seated players until one reaches
/// [`MATCH_TARGET`] or [`MAX_GAMES_PER_MATCH`] runs out.
///
/// The match owns its RNG (shuffles, coin flips) and the solver answering
/// every deadwood query of its games.
#[derive(Debug)]
pub struct Match {
    table: Table,
    solver: Solver,
    rng: SmallRng,
    scores: [Points; 2],
    wins: [usize; 2],
    games: usize,
    dealer: usize,
    exposed: [bool; 2],
}

impl Match {
    pub fn new(a: Player, b: Player, seed: u64) -> anyhow::Result<Self> {
        let mut table = Table::default();
        table.seat(a)?;
        table.seat(b)?;
        Ok(Self {
            table,
            solver: Solver::default(),
            rng: SmallRng::seed_from_u64(seed),
            scores: [0; 2],
            wins: [0; 2],
            games: 0,
            dealer: 0,
            exposed: [false; 2],
        })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }
    pub fn scores(&self) -> [Points; 2] {
        self.scores
    }

    /// Plays games until the target is reached, then applies game and
    /// line bonuses and names a winner. Equal totals flip a coin.
    pub fn run(&mut self) -> Outcome {
        while self.scores.iter().all(|s| *s < MATCH_TARGET) && self.games < MAX_GAMES_PER_MATCH {
            self.play_game();
        }
        let mut totals = self.scores;
        for seat in 0..2 {
            if self.scores[seat] >= MATCH_TARGET {
                totals[seat] += GAME_BONUS;
            }
            totals[seat] += LINE_BONUS * self.wins[seat] as Points;
        }
        let winner = match totals[0].cmp(&totals[1]) {
            std::cmp::Ordering::Greater => 0,
            std::cmp::Ordering::Less => 1,
            std::cmp::Ordering::Equal => self.rng.random_range(0..2),
        };
        log::debug!("match over after {} games: {:?} -> seat {}", self.games, totals, winner);
        Outcome {
            winner,
            scores: totals,
            wins: self.wins,
            games: self.games,
            cache: self.solver.stats(),
        }
    }

    /// Deals, plays turns to an ending, scores it. The dealt-to-first seat
    /// alternates between games.
    pub fn play_game(&mut self) -> Ending {
        self.deal();
        let ending = self.take_turns();
        self.settle(ending);
        self.games += 1;
        self.dealer = 1 - self.dealer;
        log::debug!("game {} {:?} scores {:?}", self.games, ending, self.scores);
        ending
    }

    /// Ten cards to each seat, an eleventh to the seat that opens.
    fn deal(&mut self) {
        self.table.reset(&mut self.rng);
        self.exposed = [false; 2];
        for _ in 0..DEAL_SIZE {
            for seat in [self.dealer, 1 - self.dealer] {
                if let Some(card) = self.table.draw() {
                    self.table.player_mut(seat).take(card);
                }
            }
        }
        if let Some(card) = self.table.draw() {
            self.table.player_mut(self.dealer).take(card);
        }
    }

    fn take_turns(&mut self) -> Ending {
        let mut seat = self.dealer;
        for _ in 0..MAX_TURNS_PER_GAME {
            if self.table.player(seat).hand().size() < HAND_CAPACITY {
                if self.table.stock() <= STOCK_FLOOR {
                    return Ending::Washout;
                }
                self.draw(seat);
            }
            if let Some(ending) = self.discard(seat) {
                return ending;
            }
            seat = 1 - seat;
        }
        Ending::Washout
    }

    fn observe(&mut self, seat: usize, phase: Phase) -> Observation {
        let hand = self.table.player(seat).hand().clone();
        Observation {
            phase,
            deadwood: hand.deadwood_with(&mut self.solver),
            hand,
            discard: self.table.top(),
            stock: self.table.stock(),
            exposed: self.exposed[1 - seat].then(|| self.table.player(1 - seat).hand().clone()),
        }
    }

    fn draw(&mut self, seat: usize) {
        let ref observation = self.observe(seat, Phase::Draw);
        let card = match self.table.player_mut(seat).decide(observation) {
            Action::PickupDiscard => self.table.pickup().or_else(|| self.table.draw()),
            action => {
                if action != Action::Draw {
                    log::trace!("seat {} coerced {} to DRAW", seat, action);
                }
                self.table.draw()
            }
        };
        if let Some(card) = card {
            self.table.player_mut(seat).take(card);
        }
    }

    /// Discards, then judges any knock. Returns the ending if it stopped the game.
    fn discard(&mut self, seat: usize) -> Option<Ending> {
        let ref observation = self.observe(seat, Phase::Discard);
        let action = match self.table.player_mut(seat).decide(observation) {
            action @ (Action::Discard(_) | Action::Knock(_) | Action::KnockGin(_)) => action,
            action => {
                log::trace!("seat {} coerced {} to DISCARD", seat, action);
                Action::Discard(0)
            }
        };
        let index = action.index().unwrap_or_default();
        if let Some(card) = self.table.player_mut(seat).shed(index) {
            self.table.discard(card);
        }
        match action {
            Action::Knock(_) => self.knock(seat, false),
            Action::KnockGin(_) => self.knock(seat, true),
            _ => None,
        }
    }

    /// Validates a knock. A knock with no deadwood counts as gin; a claim
    /// of gin with deadwood, or a knock above the knock point, exposes the
    /// hand and lets a knock-worthy opponent accept and end the game.
    pub fn knock(&mut self, seat: usize, gin: bool) -> Option<Ending> {
        let deadwood = self.table.player(seat).hand().deadwood_with(&mut self.solver);
        match (deadwood, gin) {
            (0, _) => Some(Ending::Gin(seat)),
            (d, false) if d <= KNOCK_POINT => Some(Ending::Knock(seat)),
            _ => {
                log::trace!("seat {} knocked improperly with {}", seat, deadwood);
                self.exposed[seat] = true;
                let other = 1 - seat;
                let ref observation = self.observe(other, Phase::Discard);
                let accepted = observation.deadwood <= KNOCK_POINT
                    && self.table.player_mut(other).accept_improper_knock(observation);
                accepted.then_some(Ending::Accepted(seat))
            }
        }
    }

    /// Scores an ending. Knocks let the defender lay off first.
    pub fn settle(&mut self, ending: Ending) {
        match ending {
            Ending::Gin(knocker) => {
                let defender = 1 - knocker;
                let deadwood = self.deadwood(defender);
                self.award(knocker, deadwood + GIN_BONUS);
            }
            Ending::Knock(knocker) => {
                let defender = 1 - knocker;
                let hand = self.table.player(knocker).hand().clone();
                let shed = self
                    .table
                    .player_mut(defender)
                    .hand_mut()
                    .process_layoff_with(&hand, &mut self.solver);
                if !shed.is_empty() {
                    log::trace!("seat {} laid off {:?}", defender, shed);
                }
                let theirs = self.deadwood(defender);
                let ours = self.deadwood(knocker);
                if theirs <= ours {
                    self.award(defender, ours - theirs + UNDERCUT_BONUS);
                } else {
                    self.award(knocker, theirs - ours);
                }
            }
            Ending::Accepted(_) | Ending::Washout => {}
        }
    }

    fn deadwood(&mut self, seat: usize) -> Points {
        self.table.player(seat).hand().deadwood_with(&mut self.solver)
    }
    fn award(&mut self, seat: usize, points: Points) {
        self.scores[seat] += points;
        self.wins[seat] += 1;
    }
}
