//! Session constants and tuning parameters.
//!
//! These are the authoritative defaults behind `SessionConfig::default()`.

/// Frame rate the app loop drives the session at (Hz).
pub const FRAME_RATE: u32 = 60;

/// Seconds per frame at the default frame rate.
pub const FRAME_DT: f64 = 1.0 / FRAME_RATE as f64;

// --- Session ---

/// Length of one flight in seconds.
pub const SESSION_DURATION_SECS: u32 = 30;

/// Interval between countdown ticks (seconds).
pub const TICK_INTERVAL_SECS: f64 = 1.0;

/// Shortest accepted tick interval. Finer ticks would flood the event stream.
pub const MIN_TICK_INTERVAL_SECS: f64 = 0.1;

/// Shots available per flight.
pub const SHOT_BUDGET: u32 = 5;

/// Default RNG seed. Same seed = same target field and fact pick.
pub const DEFAULT_SEED: u64 = 42;

/// Tolerance when comparing accumulated clock time against tick boundaries.
pub const CLOCK_EPSILON_SECS: f64 = 1e-9;

// --- Path ---

/// Catmull-Rom tension (0.5 = standard Catmull-Rom).
pub const SPLINE_TENSION: f32 = 0.5;

/// Number of samples in the arc-length lookup table.
pub const ARC_LENGTH_DIVISIONS: usize = 200;

/// Minimum number of control points for a closed path.
pub const MIN_CONTROL_POINTS: usize = 2;

/// Parameter step used to estimate the tangent direction.
pub const TANGENT_EPSILON: f32 = 1e-4;

/// Compiled-in tunnel loop. A rounded, gently undulating circuit ~25 units across.
pub const DEFAULT_CONTROL_POINTS: [[f32; 3]; 16] = [
    [12.50, 0.00, 0.00],
    [10.20, 2.12, 1.52],
    [5.30, 3.00, 5.30],
    [1.52, 2.12, 10.20],
    [0.00, 0.00, 12.50],
    [-1.52, -2.12, 10.20],
    [-5.30, -3.00, 5.30],
    [-10.20, -2.12, 1.52],
    [-12.50, 0.00, 0.00],
    [-10.20, 2.12, -1.52],
    [-5.30, 3.00, -5.30],
    [-1.52, 2.12, -10.20],
    [0.00, 0.00, -12.50],
    [1.52, -2.12, -10.20],
    [5.30, -3.00, -5.30],
    [10.20, -2.12, -1.52],
];

// --- Flight ---

/// Path-time units per wall-clock second.
pub const TRAVERSAL_RATE: f32 = 0.1;

/// Path-time units per full loop. One loop takes `LOOP_PERIOD_SECS / TRAVERSAL_RATE` seconds.
pub const LOOP_PERIOD_SECS: f32 = 10.0;

/// Fraction of the loop the camera looks ahead of its own position.
pub const LOOK_AHEAD_FRACTION: f32 = 0.03;

// --- Targets ---

/// Number of asteroids scattered along the path.
pub const TARGET_COUNT: usize = 55;

/// Upper bound (exclusive) of the random offset added to each target's base parameter.
pub const TARGET_PARAM_JITTER: f32 = 0.1;

/// Lateral (X and Z) offset range applied to each target.
pub const TARGET_LATERAL_OFFSET_MIN: f32 = -0.4;
pub const TARGET_LATERAL_OFFSET_MAX: f32 = 0.6;

/// Point value range (inclusive).
pub const TARGET_POINTS_MIN: u32 = 1;
pub const TARGET_POINTS_MAX: u32 = 10;

/// Asteroid mesh radius (world units).
pub const TARGET_RADIUS: f32 = 0.075;

/// Extra slack added to the target radius when ray picking.
pub const PICK_MARGIN: f32 = 0.05;

// --- Camera (matches the presentation canvas) ---

/// Vertical field of view in degrees.
pub const CAMERA_FOV_DEGREES: f32 = 75.0;

/// Near clipping plane.
pub const CAMERA_NEAR: f32 = 0.1;

/// Far clipping plane.
pub const CAMERA_FAR: f32 = 1000.0;

/// Default viewport aspect ratio (width / height).
pub const CAMERA_ASPECT: f32 = 16.0 / 9.0;

// --- Debrief ---

/// Fact images shown after the countdown ends.
pub const DEFAULT_FACT_IMAGES: [&str; 3] = ["/fact1.jpg", "/fact2.jpg", "/fact3.jpg"];
