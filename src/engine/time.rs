//! Per-move time budgeting. Separate from [`crate::board::search::constants`]
//! because these numbers answer "how long do we get", not "how do we search"
//! — UCI's `go` command feeds straight into this module, nowhere else.

use std::time::Duration;

const MOVES_LEFT_OPENING: u64 = 25;
const MOVES_LEFT_MIDGAME: u64 = 20;
const MOVES_LEFT_LATER: u64 = 15;
const OPENING_FULLMOVE_LIMIT: u32 = 15;
const MIDGAME_FULLMOVE_LIMIT: u32 = 40;

const MIN_BUDGET_MS: u64 = 500;
const INC_WEIGHT: f64 = 0.9;

/// What UCI's `go` command actually asked for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeControl {
    #[default]
    Infinite,
    Depth(i32),
    MoveTime(Duration),
    Incremental {
        my_time: Duration,
        my_inc: Duration,
        movestogo: Option<u64>,
    },
}

/// `(soft, hard)`: the soft deadline is where iterative deepening stops
/// starting new iterations; the hard deadline is a search-abort ceiling a
/// single iteration is never allowed to cross.
#[must_use]
pub fn compute_budget(control: TimeControl, fullmove_number: u32) -> (Duration, Duration) {
    match control {
        TimeControl::Infinite | TimeControl::Depth(_) => {
            (Duration::from_secs(3600), Duration::from_secs(3600))
        }
        TimeControl::MoveTime(t) => (t, t),
        TimeControl::Incremental {
            my_time,
            my_inc,
            movestogo,
        } => incremental_budget(my_time, my_inc, movestogo, fullmove_number),
    }
}

fn moves_left_estimate(fullmove_number: u32) -> u64 {
    if fullmove_number <= OPENING_FULLMOVE_LIMIT {
        MOVES_LEFT_OPENING
    } else if fullmove_number <= MIDGAME_FULLMOVE_LIMIT {
        MOVES_LEFT_MIDGAME
    } else {
        MOVES_LEFT_LATER
    }
}

fn incremental_budget(
    my_time: Duration,
    my_inc: Duration,
    movestogo: Option<u64>,
    fullmove_number: u32,
) -> (Duration, Duration) {
    let my_time_ms = my_time.as_millis() as f64;
    let moves_left = movestogo.unwrap_or_else(|| moves_left_estimate(fullmove_number)).max(1) as f64;

    let raw = my_time_ms / moves_left + INC_WEIGHT * my_inc.as_millis() as f64;
    let floor = my_time_ms / 20.0;
    let ceiling = my_time_ms / 3.0;
    let soft_ms = raw.clamp(floor.min(ceiling), floor.max(ceiling)).max(MIN_BUDGET_MS as f64);

    let hard_ms = (0.4 * my_time_ms - 1000.0).max(soft_ms);

    (
        Duration::from_millis(soft_ms as u64),
        Duration::from_millis(hard_ms as u64),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movetime_uses_exact_value() {
        let (soft, hard) = compute_budget(TimeControl::MoveTime(Duration::from_millis(2500)), 10);
        assert_eq!(soft, Duration::from_millis(2500));
        assert_eq!(hard, soft);
    }

    #[test]
    fn infinite_is_effectively_unbounded() {
        let (soft, hard) = compute_budget(TimeControl::Infinite, 1);
        assert!(soft > Duration::from_secs(60));
        assert!(hard > Duration::from_secs(60));
    }

    #[test]
    fn incremental_respects_floor() {
        let control = TimeControl::Incremental {
            my_time: Duration::from_secs(60),
            my_inc: Duration::from_millis(0),
            movestogo: None,
        };
        let (soft, hard) = compute_budget(control, 5);
        assert!(soft >= Duration::from_millis(MIN_BUDGET_MS));
        assert!(hard >= soft);
    }

    #[test]
    fn low_time_still_yields_floor_budget() {
        let control = TimeControl::Incremental {
            my_time: Duration::from_millis(200),
            my_inc: Duration::from_millis(0),
            movestogo: None,
        };
        let (soft, hard) = compute_budget(control, 1);
        assert_eq!(soft, Duration::from_millis(MIN_BUDGET_MS));
        assert!(hard >= soft);
    }

    #[test]
    fn moves_left_tiers_by_fullmove_number() {
        assert_eq!(moves_left_estimate(1), MOVES_LEFT_OPENING);
        assert_eq!(moves_left_estimate(20), MOVES_LEFT_MIDGAME);
        assert_eq!(moves_left_estimate(50), MOVES_LEFT_LATER);
    }
}
