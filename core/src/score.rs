use serde::{Deserialize, Serialize};

/// Completed-game score. Field order gives the derived `Ord` the intended
/// lexicographic comparison: fewer moves first, then faster time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BestScore {
    pub moves: u32,
    pub seconds: u32,
}

/// Move counter for the current session plus the best result seen so far in
/// this process. The best record survives restarts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreKeeper {
    moves: u32,
    best: Option<BestScore>,
}

impl ScoreKeeper {
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn best(&self) -> Option<BestScore> {
        self.best
    }

    pub(crate) fn bump_moves(&mut self) -> u32 {
        self.moves += 1;
        self.moves
    }

    pub(crate) fn reset_moves(&mut self) {
        self.moves = 0;
    }

    /// Records a finished game; returns true when it strictly beats the
    /// previous best (or there was none).
    pub(crate) fn record_win(&mut self, seconds: u32) -> bool {
        let score = BestScore {
            moves: self.moves,
            seconds,
        };
        if self.best.is_none_or(|best| score < best) {
            self.best = Some(score);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn win(keeper: &mut ScoreKeeper, moves: u32, seconds: u32) -> bool {
        keeper.reset_moves();
        for _ in 0..moves {
            keeper.bump_moves();
        }
        keeper.record_win(seconds)
    }

    #[test]
    fn first_win_always_sets_the_record() {
        let mut keeper = ScoreKeeper::default();
        assert!(win(&mut keeper, 5, 20));
        assert_eq!(
            keeper.best(),
            Some(BestScore {
                moves: 5,
                seconds: 20
            })
        );
    }

    #[test]
    fn fewer_moves_beat_faster_time() {
        let mut keeper = ScoreKeeper::default();
        win(&mut keeper, 5, 20);

        assert!(win(&mut keeper, 4, 30));
        assert_eq!(
            keeper.best(),
            Some(BestScore {
                moves: 4,
                seconds: 30
            })
        );

        assert!(win(&mut keeper, 4, 25));
        assert_eq!(
            keeper.best(),
            Some(BestScore {
                moves: 4,
                seconds: 25
            })
        );
    }

    #[test]
    fn equal_score_is_not_a_new_best() {
        let mut keeper = ScoreKeeper::default();
        win(&mut keeper, 4, 25);
        assert!(!win(&mut keeper, 4, 25));
        assert!(!win(&mut keeper, 6, 10));
    }
}
