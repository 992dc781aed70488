//! Transition matrix and the online reinforcement rule (spec §3, §4.E).

use crate::config::PROBABILITY_FLOOR;
use crate::protocol::{StateKind, NUM_STATES};

/// Floor every entry to [`PROBABILITY_FLOOR`], then renormalize so the row
/// sums to `1.0`. Resets to uniform if the post-floor sum is non-positive.
///
/// Shared by both the transition-matrix update and the transient
/// peer-influence perturbation — the original C++ duplicated this logic in
/// `normalize_probabilities` and the tail of `influence_probabilities`.
fn floor_and_normalize(row: &mut [f32; NUM_STATES]) {
    let mut sum = 0.0;
    for p in row.iter_mut() {
        if *p < PROBABILITY_FLOOR {
            *p = PROBABILITY_FLOOR;
        }
        sum += *p;
    }
    if sum > 0.0 {
        for p in row.iter_mut() {
            *p /= sum;
        }
    } else {
        *row = [1.0 / NUM_STATES as f32; NUM_STATES];
    }
}

/// A 5x5 matrix of categorical transition distributions, one row per
/// current state.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransitionMatrix {
    rows: [[f32; NUM_STATES]; NUM_STATES],
}

impl Default for TransitionMatrix {
    fn default() -> Self {
        Self::new_uniform()
    }
}

impl TransitionMatrix {
    pub fn new_uniform() -> Self {
        Self {
            rows: [[1.0 / NUM_STATES as f32; NUM_STATES]; NUM_STATES],
        }
    }

    /// Copy of the categorical distribution for `state`.
    pub fn row(&self, state: StateKind) -> [f32; NUM_STATES] {
        self.rows[state.index()]
    }

    /// Apply the online reinforcement rule: reward the `prev -> curr`
    /// transition by `learning_rate * reward`, redistributing the opposite
    /// delta evenly across the other `N - 1` entries of row `prev`, then
    /// floor and renormalize that row.
    pub fn update(&mut self, prev: StateKind, curr: StateKind, learning_rate: f32, reward: f32) {
        let row = &mut self.rows[prev.index()];
        let delta = learning_rate * reward;
        row[curr.index()] += delta;
        let spread = delta / (NUM_STATES as f32 - 1.0);
        for (i, p) in row.iter_mut().enumerate() {
            if i != curr.index() {
                *p -= spread;
            }
        }
        floor_and_normalize(row);
    }
}

/// Perturb a sampled distribution using a received peer report. Transient:
/// never mutates the persistent [`TransitionMatrix`].
///
/// `delta > 0` means the peer observed increasing light after `peer_state`,
/// so the chance of re-entering that state is reduced; `delta <= 0` raises
/// it. The spread is distributed evenly across the other states, then the
/// whole row is floored and renormalized.
pub fn apply_peer_influence(
    probabilities: &mut [f32; NUM_STATES],
    peer_state: StateKind,
    delta: f32,
    bias: f32,
) {
    let spread = bias / (NUM_STATES as f32 - 1.0);
    let s = peer_state.index();
    if delta > 0.0 {
        probabilities[s] -= bias;
        for (i, p) in probabilities.iter_mut().enumerate() {
            if i != s {
                *p += spread;
            }
        }
    } else {
        probabilities[s] += bias;
        for (i, p) in probabilities.iter_mut().enumerate() {
            if i != s {
                *p -= spread;
            }
        }
    }
    floor_and_normalize(probabilities);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_sum(row: &[f32; NUM_STATES]) -> f32 {
        row.iter().sum()
    }

    #[test]
    fn initial_matrix_is_uniform() {
        let m = TransitionMatrix::new_uniform();
        for s in StateKind::ALL {
            assert_eq!(m.row(s), [0.2; NUM_STATES]);
        }
    }

    #[test]
    fn row_stays_stochastic_after_many_updates() {
        let mut m = TransitionMatrix::new_uniform();
        let mut toggle = false;
        for _ in 0..500 {
            let reward = if toggle { 0.7 } else { -0.3 };
            toggle = !toggle;
            m.update(StateKind::Idle, StateKind::Aggressive, 0.1, reward);
            let row = m.row(StateKind::Idle);
            assert!((row_sum(&row) - 1.0).abs() <= 1e-5);
            for p in row {
                assert!(p >= PROBABILITY_FLOOR - 1e-6);
            }
        }
    }

    #[test]
    fn positive_reward_increases_target_entry_before_floor() {
        // S4 from spec §8: Idle -> Aggressive, reward = 0.4, lr = 0.1.
        let mut m = TransitionMatrix::new_uniform();
        m.update(StateKind::Idle, StateKind::Aggressive, 0.1, 0.4);
        let row = m.row(StateKind::Idle);
        assert!((row[StateKind::Aggressive.index()] - 0.24).abs() < 1e-5);
        for s in [
            StateKind::Idle,
            StateKind::Coward,
            StateKind::Love,
            StateKind::Explorer,
        ] {
            assert!((row[s.index()] - 0.19).abs() < 1e-5);
        }
    }

    #[test]
    fn degenerate_row_resets_to_uniform() {
        let mut row = [-1.0, -1.0, -1.0, -1.0, -1.0];
        floor_and_normalize(&mut row);
        assert_eq!(row, [0.2; NUM_STATES]);
    }

    #[test]
    fn peer_influence_matches_s5_scenario() {
        let mut probs = [0.2; NUM_STATES];
        apply_peer_influence(&mut probs, StateKind::Aggressive, 0.4, 0.2);
        // Floored 0.0 -> 0.01 at index Aggressive, others 0.25, sum 1.01.
        let expected_other = 0.25 / 1.01;
        let expected_agg = 0.01 / 1.01;
        assert!((probs[StateKind::Aggressive.index()] - expected_agg).abs() < 1e-5);
        for s in [
            StateKind::Idle,
            StateKind::Coward,
            StateKind::Love,
            StateKind::Explorer,
        ] {
            assert!((probs[s.index()] - expected_other).abs() < 1e-5);
        }
        assert!((probs.iter().sum::<f32>() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn influence_never_touches_the_matrix() {
        let m = TransitionMatrix::new_uniform();
        let before = m;
        let mut probs = m.row(StateKind::Love);
        apply_peer_influence(&mut probs, StateKind::Coward, -0.1, 0.2);
        assert_eq!(m, before);
    }
}
