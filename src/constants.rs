//! Shared tuning constants for the morph animation.
//!
//! The foliage shader and the CPU motion models both read from here so the
//! two implementations cannot drift apart. The GLSL side receives these values
//! as `#define`s (see `render::shaders::foliage_vertex_source`).

// Morph progression
pub const TRANSITION_SPEED: f32 = 1.2; // exponential approach rate per second
pub const CONVERGENCE_EPSILON: f32 = 0.001; // snap distance to the target
pub const MAX_STEP_FRACTION: f32 = 0.1; // cap of remaining distance per tick

// Tree silhouette
pub const CONE_TAPER: f32 = 0.85;
pub const SURFACE_RADIAL_MIN: f32 = 0.7;

// Foliage particle cloud
pub const FOLIAGE_COUNT: usize = 8000;
pub const FOLIAGE_SCATTER_RADIUS_MIN: f32 = 8.0;
pub const FOLIAGE_SCATTER_RADIUS_SPREAD: f32 = 12.0;
pub const FOLIAGE_SCATTER_Y_OFFSET: f32 = 2.0;
pub const FOLIAGE_TREE_HEIGHT: f32 = 7.0;
pub const FOLIAGE_TREE_BASE: f32 = -1.0;
pub const FOLIAGE_CONE_RADIUS: f32 = 3.5;

// Foliage shader motion (vertex stage)
pub const FOLIAGE_BREATHE_FREQ: f32 = 1.5;
pub const FOLIAGE_BREATHE_PHASE: f32 = 6.28;
pub const FOLIAGE_BREATHE_AMP: f32 = 0.05;
pub const FOLIAGE_BREATHE_TREE_DAMP: f32 = 0.5; // breathe * (1 - p * damp)
pub const FOLIAGE_FLOAT_Y_FREQ: f32 = 0.8;
pub const FOLIAGE_FLOAT_Y_PHASE: f32 = 3.14;
pub const FOLIAGE_FLOAT_Y_AMP: f32 = 0.03;
pub const FOLIAGE_SCATTER_MOVEMENT: f32 = 0.3; // (1 - p) * movement
pub const FOLIAGE_DRIFT_X_FREQ: f32 = 0.5;
pub const FOLIAGE_DRIFT_X_PHASE: f32 = 10.0;
pub const FOLIAGE_DRIFT_Z_FREQ: f32 = 0.7;
pub const FOLIAGE_DRIFT_Z_PHASE: f32 = 8.0;
pub const FOLIAGE_POINT_SIZE_BASE: f32 = 25.0;
pub const FOLIAGE_POINT_SIZE_RANDOM: f32 = 10.0;

// Foliage shader shading (fragment stage)
pub const FOLIAGE_EDGE_OUTER: f32 = 0.5;
pub const FOLIAGE_EDGE_INNER: f32 = 0.2;
pub const FOLIAGE_CORE_OUTER: f32 = 0.3;
pub const FOLIAGE_PULSE_FREQ: f32 = 2.0;
pub const FOLIAGE_PULSE_AMP: f32 = 0.15;
pub const FOLIAGE_PULSE_BASE: f32 = 0.85;
pub const FOLIAGE_HEIGHT_LOW: f32 = -2.0;
pub const FOLIAGE_HEIGHT_HIGH: f32 = 6.0;
pub const FOLIAGE_HEIGHT_TINT: f32 = 0.3;
pub const FOLIAGE_CORE_TINT: f32 = 0.2;
pub const FOLIAGE_GLOW_MIX: f32 = 0.5;
pub const FOLIAGE_ALPHA: f32 = 0.9;
pub const FOLIAGE_GOLD_TINT: [f32; 3] = [1.0, 0.85, 0.4];

// Default foliage colors
pub const FOLIAGE_BASE_COLOR: &str = "#0d4a3a"; // deep emerald
pub const FOLIAGE_GLOW_COLOR: &str = "#ffd700"; // gold

// Ornament placement
pub const ORNAMENT_SCATTER_RADIUS_MIN: f32 = 6.0;
pub const ORNAMENT_SCATTER_RADIUS_SPREAD: f32 = 10.0; // multiplied by weight
pub const ORNAMENT_SCATTER_Y_OFFSET: f32 = 3.0;
pub const ORNAMENT_TREE_HEIGHT: f32 = 6.0;
pub const ORNAMENT_TREE_BASE: f32 = -0.5;
pub const ORNAMENT_CONE_RADIUS: f32 = 3.2;

// Gift box spin settles to 20% of its scattered rate
pub const GIFT_SPIN_SETTLE: f32 = 0.8;
pub const GIFT_SPIN_Y_RATIO: f32 = 0.5;

// Tiny light shimmer
pub const LIGHT_PULSE_FREQ: f32 = 3.0;
pub const LIGHT_PULSE_AMP: f32 = 0.3;
pub const LIGHT_HUE_BASE: f32 = 0.1;
pub const LIGHT_HUE_FREQ: f32 = 2.0;
pub const LIGHT_HUE_SWING: f32 = 0.05;
pub const LIGHT_SATURATION: f32 = 0.8;
pub const LIGHT_LIGHTNESS_BASE: f32 = 0.6;
pub const LIGHT_LIGHTNESS_FREQ: f32 = 4.0;
pub const LIGHT_LIGHTNESS_SWING: f32 = 0.2;

// Tree-topper star
pub const TOPPER_TREE_POSITION: [f32; 3] = [0.0, 6.5, 0.0];
pub const TOPPER_SCATTER_SPAN: f32 = 15.0; // x and z in +/- span / 2
pub const TOPPER_SCATTER_Y_MIN: f32 = 8.0;
pub const TOPPER_SCATTER_Y_SPREAD: f32 = 5.0;
pub const TOPPER_WEIGHT: f32 = 0.8;
pub const TOPPER_SPIN_SETTLED: f32 = 0.2;
pub const TOPPER_SPIN_SCATTERED: f32 = 1.5;
pub const TOPPER_WOBBLE_FREQ: f32 = 0.5;
pub const TOPPER_WOBBLE_AMP: f32 = 0.2;
pub const TOPPER_SCALE: f32 = 0.6;
pub const TOPPER_SCALE_PULSE_FREQ: f32 = 2.0;
pub const TOPPER_SCALE_PULSE_AMP: f32 = 0.05;
pub const TOPPER_GLOW_SCALE: f32 = 0.3;

// Trunk fades in as the tree assembles
pub const TRUNK_MAX_OPACITY: f32 = 0.9;

// Camera
pub const CAMERA_START: [f32; 3] = [0.0, 4.0, 20.0];
pub const CAMERA_FOV_DEG: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_MIN_DISTANCE: f32 = 8.0;
pub const CAMERA_MAX_DISTANCE: f32 = 35.0;
pub const CAMERA_MIN_POLAR: f32 = std::f32::consts::PI * 0.2;
pub const CAMERA_MAX_POLAR: f32 = std::f32::consts::PI * 0.6;
pub const CAMERA_AUTO_ROTATE_SPEED: f32 = 0.3; // 1.0 is one turn per minute
pub const CAMERA_DAMPING: f32 = 0.05;

// Scene atmosphere
pub const BACKGROUND_COLOR: [f32; 3] = [0.0196, 0.0392, 0.0275]; // #050a07
pub const FOG_NEAR: f32 = 15.0;
pub const FOG_FAR: f32 = 40.0;

// Post-processing
pub const BLOOM_THRESHOLD: f32 = 0.8;
pub const BLOOM_STRENGTH: f32 = 1.2;
pub const VIGNETTE_OFFSET: f32 = 0.3;
pub const VIGNETTE_DARKNESS: f32 = 0.6;
