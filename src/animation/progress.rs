//! Eased progress integrator

use super::MorphState;
use crate::constants::{CONVERGENCE_EPSILON, MAX_STEP_FRACTION, TRANSITION_SPEED};

/// Advances [`MorphState`] progress towards its target with an exponential
/// approach. Each tick moves `min(dt * speed, max_step)` of the remaining
/// distance, so a long frame (e.g. a backgrounded tab) can never overshoot.
#[derive(Debug, Clone, Copy)]
pub struct ProgressAnimator {
    /// Approach rate per second
    pub speed: f32,
    /// Distance below which progress snaps to the target
    pub epsilon: f32,
    /// Largest fraction of the remaining distance covered in one tick
    pub max_step: f32,
}

impl Default for ProgressAnimator {
    fn default() -> Self {
        Self {
            speed: TRANSITION_SPEED,
            epsilon: CONVERGENCE_EPSILON,
            max_step: MAX_STEP_FRACTION,
        }
    }
}

impl ProgressAnimator {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            ..Default::default()
        }
    }

    /// Run one render tick. Returns true when the transition settled on
    /// this tick. Does nothing while the state is at rest.
    pub fn tick(&self, state: &mut MorphState, dt: f32) -> bool {
        if !state.is_transitioning() {
            return false;
        }

        match step_progress(state.progress(), state.target(), dt, self) {
            Some(next) => {
                state.set_progress(next);
                false
            }
            None => {
                state.finish_transition();
                true
            }
        }
    }
}

/// One integration step. `None` means `progress` is within epsilon of
/// `target` and should snap onto it.
pub fn step_progress(progress: f32, target: f32, dt: f32, animator: &ProgressAnimator) -> Option<f32> {
    let diff = target - progress;
    if diff.abs() < animator.epsilon {
        return None;
    }

    let fraction = (dt.max(0.0) * animator.speed).min(animator.max_step);
    Some((progress + diff * fraction).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assembling() -> MorphState {
        let mut state = MorphState::new();
        state.toggle();
        state
    }

    #[test]
    fn test_idle_state_is_untouched() {
        let animator = ProgressAnimator::default();
        let mut state = MorphState::new();
        assert!(!animator.tick(&mut state, 0.5));
        assert_eq!(state, MorphState::new());
    }

    #[test]
    fn test_converges_within_ten_seconds() {
        let animator = ProgressAnimator::default();
        let mut state = assembling();

        let mut ticks = 0;
        while state.is_transitioning() {
            animator.tick(&mut state, 1.0 / 60.0);
            ticks += 1;
            assert!(ticks < 600, "no convergence after {} ticks", ticks);
        }

        assert_eq!(state.progress(), 1.0);

        // Holds the fixed point
        for _ in 0..10 {
            assert!(!animator.tick(&mut state, 1.0 / 60.0));
            assert_eq!(state.progress(), 1.0);
        }
    }

    #[test]
    fn test_monotonic_for_varied_frame_times() {
        let animator = ProgressAnimator::default();
        let mut state = assembling();
        let frame_times = [0.001, 0.016, 0.033, 0.25, 5.0, 0.0001];

        let mut prev = state.progress();
        for i in 0..2000 {
            animator.tick(&mut state, frame_times[i % frame_times.len()]);
            assert!(state.progress() >= prev);
            prev = state.progress();
        }
        assert!(!state.is_transitioning());
    }

    #[test]
    fn test_large_frame_is_capped() {
        let animator = ProgressAnimator::default();
        let next = step_progress(0.0, 1.0, 30.0, &animator).unwrap();
        assert!((next - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_step_is_deterministic() {
        let animator = ProgressAnimator::default();
        let a = step_progress(0.37, 0.0, 0.016, &animator);
        let b = step_progress(0.37, 0.0, 0.016, &animator);
        assert_eq!(a, b);
        assert!(a.unwrap() < 0.37);
    }

    #[test]
    fn test_reverse_transition_returns_to_zero() {
        let animator = ProgressAnimator::default();
        let mut state = assembling();
        while state.is_transitioning() {
            animator.tick(&mut state, 0.05);
        }
        state.toggle();
        while state.is_transitioning() {
            animator.tick(&mut state, 0.05);
        }
        assert_eq!(state.progress(), 0.0);
    }

    #[test]
    fn test_snaps_inside_epsilon() {
        let animator = ProgressAnimator::default();
        assert_eq!(step_progress(0.9995, 1.0, 0.016, &animator), None);
    }
}
