//! Morph animation state
//!
//! Holds the scattered/tree mode switch and the eased progress value that
//! every ornament, the foliage shader and the trunk read each frame.

mod morph_state;
mod progress;

pub use morph_state::{MorphMode, MorphState};
pub use progress::{ProgressAnimator, step_progress};
