/// Which arrangement the scene is heading towards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MorphMode {
    /// Entities float in a spherical cloud (progress 0)
    #[default]
    Scattered,
    /// Entities sit on the cone silhouette (progress 1)
    TreeShape,
}

impl MorphMode {
    pub fn toggled(self) -> Self {
        match self {
            MorphMode::Scattered => MorphMode::TreeShape,
            MorphMode::TreeShape => MorphMode::Scattered,
        }
    }

    /// Progress value this mode settles at
    pub fn target(self) -> f32 {
        match self {
            MorphMode::Scattered => 0.0,
            MorphMode::TreeShape => 1.0,
        }
    }

    /// Label for the control that switches away from this mode
    pub fn action_label(self) -> &'static str {
        match self {
            MorphMode::Scattered => "Assemble",
            MorphMode::TreeShape => "Scatter",
        }
    }
}

/// Shared morph state, owned by the engine and passed by reference to the
/// animator, the motion models and the uniform updater.
///
/// `transitioning` stays true until the animator snaps `progress` onto the
/// current mode's target.
#[derive(Debug, Clone, PartialEq)]
pub struct MorphState {
    mode: MorphMode,
    progress: f32,
    transitioning: bool,
}

impl Default for MorphState {
    fn default() -> Self {
        Self::new()
    }
}

impl MorphState {
    /// Scattered, at rest
    pub fn new() -> Self {
        Self {
            mode: MorphMode::Scattered,
            progress: 0.0,
            transitioning: false,
        }
    }

    /// Flip the mode and start a transition towards the new target.
    ///
    /// This never refuses: callers that must not redirect a running
    /// transition check [`MorphState::is_transitioning`] first.
    pub fn toggle(&mut self) {
        self.mode = self.mode.toggled();
        self.transitioning = true;
    }

    /// Store a new progress value, clamped to [0, 1]. NaN maps to the target.
    pub fn set_progress(&mut self, progress: f32) {
        self.progress = if progress.is_nan() {
            self.mode.target()
        } else {
            progress.clamp(0.0, 1.0)
        };
    }

    /// Land exactly on the target and end the transition
    pub(crate) fn finish_transition(&mut self) {
        self.progress = self.mode.target();
        self.transitioning = false;
    }

    pub fn mode(&self) -> MorphMode {
        self.mode
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    pub fn target(&self) -> f32 {
        self.mode.target()
    }

    pub fn is_tree_shape(&self) -> bool {
        self.mode == MorphMode::TreeShape
    }

    /// Text for the toggle control in the current mode
    pub fn button_label(&self) -> &'static str {
        self.mode.action_label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = MorphState::new();
        assert_eq!(state.mode(), MorphMode::Scattered);
        assert_eq!(state.progress(), 0.0);
        assert!(!state.is_transitioning());
    }

    #[test]
    fn test_toggle_flips_and_starts_transition() {
        let mut state = MorphState::new();
        state.toggle();
        assert_eq!(state.mode(), MorphMode::TreeShape);
        assert!(state.is_transitioning());
        assert_eq!(state.target(), 1.0);
    }

    #[test]
    fn test_toggle_twice_restores_mode() {
        let mut state = MorphState::new();
        state.toggle();
        assert!(state.is_transitioning());
        state.toggle();
        assert_eq!(state.mode(), MorphMode::Scattered);
        assert!(state.is_transitioning());
    }

    #[test]
    fn test_set_progress_clamps() {
        let mut state = MorphState::new();
        state.set_progress(1.7);
        assert_eq!(state.progress(), 1.0);
        state.set_progress(-0.2);
        assert_eq!(state.progress(), 0.0);
        state.set_progress(f32::NAN);
        assert_eq!(state.progress(), 0.0);
    }

    #[test]
    fn test_action_labels() {
        assert_eq!(MorphMode::Scattered.action_label(), "Assemble");
        assert_eq!(MorphMode::TreeShape.action_label(), "Scatter");

        let mut state = MorphState::new();
        assert_eq!(state.button_label(), "Assemble");
        state.toggle();
        assert_eq!(state.button_label(), "Scatter");
    }
}
