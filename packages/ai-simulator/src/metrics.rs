//! Metrics collection for simulation results.
//!
//! [`GameMetrics`] is the per-game record written to the JSONL output,
//! with one fixed-width row per game in the summary CSV next to it.
//! [`BatchSummary`] folds finished games into the per-seat totals the
//! CLI prints at the end of a batch.

use serde::Serialize;
use wizard_engine::domain::{GameOutcome, RoundRecord};

use crate::simulator::GameResult;

/// Complete per-game record for the JSONL output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_no: u32,
    pub seed: u64,
    pub timestamp: String,
    pub config: GameConfig,
    pub result: GameResultMetrics,
    pub rounds: Vec<RoundMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameConfig {
    /// Policy name per seat.
    pub policies: Vec<String>,
    pub total_rounds: u8,
    pub total_games: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResultMetrics {
    pub final_scores: Vec<i32>,
    /// Sole top scorer; absent when the top score is shared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<u8>,
    /// Seats sharing the top score of a drawn game.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub drawn_seats: Vec<u8>,
    pub rounds_played: u8,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundMetrics {
    pub round_no: u8,
    pub hand_size: u8,
    pub dealer: u8,
    /// Trump card in token form, e.g. `R9` or `W`.
    pub trump: String,
    pub bids: Vec<i32>,
    pub tricks_won: Vec<u8>,
    pub score_deltas: Vec<i32>,
}

/// Build the per-game record from a finished game.
pub fn build_game_metrics(
    game_no: u32,
    seed: u64,
    policies: &[String],
    total_games: u32,
    total_rounds: u8,
    result: &GameResult,
    duration_ms: f64,
) -> GameMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let rounds: Vec<RoundMetrics> = result.history.iter().map(build_round_metrics).collect();

    let (winner, drawn_seats) = match &result.outcome {
        GameOutcome::Winner(seat) => (Some(*seat), Vec::new()),
        GameOutcome::Draw(seats) => (None, seats.clone()),
    };

    GameMetrics {
        game_no,
        seed,
        timestamp,
        config: GameConfig {
            policies: policies.to_vec(),
            total_rounds,
            total_games,
        },
        result: GameResultMetrics {
            final_scores: result.final_scores.clone(),
            winner,
            drawn_seats,
            rounds_played: result.rounds_played,
            duration_ms,
        },
        rounds,
    }
}

fn build_round_metrics(record: &RoundRecord) -> RoundMetrics {
    RoundMetrics {
        round_no: record.round_no,
        hand_size: record.hand_size,
        dealer: record.dealer,
        trump: record.trump.to_string(),
        // A scored round always has every bid set.
        bids: record.bids.iter().map(|b| b.unwrap_or(0)).collect(),
        tricks_won: record.tricks_won.clone(),
        score_deltas: record.score_deltas.clone(),
    }
}

/// Header of the summary CSV: one score column and one policy column
/// per seat.
pub fn csv_header(seat_count: usize) -> Vec<String> {
    let mut header = vec![
        "game_no".to_string(),
        "seed".to_string(),
        "winner".to_string(),
    ];
    header.extend((0..seat_count).map(|seat| format!("seat{seat}_score")));
    header.extend((0..seat_count).map(|seat| format!("seat{seat}_policy")));
    header
}

/// Flat summary-CSV row for one game. The winner column holds the seat
/// number, or `draw` for a shared top score.
pub fn csv_row(metrics: &GameMetrics) -> Vec<String> {
    let mut row = vec![
        metrics.game_no.to_string(),
        metrics.seed.to_string(),
        match metrics.result.winner {
            Some(seat) => seat.to_string(),
            None => "draw".to_string(),
        },
    ];
    row.extend(metrics.result.final_scores.iter().map(ToString::to_string));
    row.extend(metrics.config.policies.iter().cloned());
    row
}

/// Running totals for one seat over a batch of games.
#[derive(Debug, Clone)]
pub struct SeatStats {
    pub policy: String,
    /// Games where the seat was the sole top scorer.
    pub wins: u32,
    pub total_score: i64,
    pub min_score: i32,
    pub max_score: i32,
    /// Rounds where the seat took exactly its bid tricks.
    pub exact_bids: u32,
    /// Rounds where the seat bid above the tricks it took.
    pub overbids: u32,
    /// Rounds where the seat bid below the tricks it took.
    pub underbids: u32,
}

impl SeatStats {
    fn new(policy: String) -> Self {
        Self {
            policy,
            wins: 0,
            total_score: 0,
            min_score: i32::MAX,
            max_score: i32::MIN,
            exact_bids: 0,
            overbids: 0,
            underbids: 0,
        }
    }

    pub fn avg_score(&self, games: u32) -> f64 {
        if games == 0 {
            0.0
        } else {
            self.total_score as f64 / f64::from(games)
        }
    }

    pub fn win_rate(&self, games: u32) -> f64 {
        if games == 0 {
            0.0
        } else {
            f64::from(self.wins) * 100.0 / f64::from(games)
        }
    }

    /// Percentages of bid rounds that came out exact, overbid, underbid.
    pub fn bid_split(&self) -> (f64, f64, f64) {
        let total = self.exact_bids + self.overbids + self.underbids;
        if total == 0 {
            return (0.0, 0.0, 0.0);
        }
        let pct = |n: u32| f64::from(n) * 100.0 / f64::from(total);
        (
            pct(self.exact_bids),
            pct(self.overbids),
            pct(self.underbids),
        )
    }
}

/// Aggregated results over a whole batch.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub seats: Vec<SeatStats>,
    pub games: u32,
    /// Games whose top score was shared.
    pub draws: u32,
}

impl BatchSummary {
    pub fn new(policies: &[String]) -> Self {
        Self {
            seats: policies.iter().cloned().map(SeatStats::new).collect(),
            games: 0,
            draws: 0,
        }
    }

    /// Fold one finished game into the running totals.
    pub fn record(&mut self, result: &GameResult) {
        self.games += 1;
        match &result.outcome {
            GameOutcome::Winner(seat) => self.seats[*seat as usize].wins += 1,
            GameOutcome::Draw(_) => self.draws += 1,
        }

        for (seat, stats) in self.seats.iter_mut().enumerate() {
            let score = result.final_scores[seat];
            stats.total_score += i64::from(score);
            stats.min_score = stats.min_score.min(score);
            stats.max_score = stats.max_score.max(score);

            for record in &result.history {
                let Some(bid) = record.bids[seat] else { continue };
                let won = i32::from(record.tricks_won[seat]);
                if bid == won {
                    stats.exact_bids += 1;
                } else if bid > won {
                    stats.overbids += 1;
                } else {
                    stats.underbids += 1;
                }
            }
        }
    }
}
