// Firework Engine Constants - SINGLE SOURCE OF TRUTH
//
// Every tuning value shared between the arena, the emission generator and the
// instance scheduler lives here.
//
// Do NOT redefine these values locally in a subsystem.

/// Particle arena sizing
pub mod pool_constants {
    /// Positions kept per slot in the trail ring buffer
    pub const TRAIL_SAMPLES: usize = 16;

    /// Default arena capacity when no configuration is supplied
    pub const DEFAULT_CAPACITY: usize = 10_000;
}

/// Free-flight integration constants
pub mod physics_constants {
    /// Base gravitational acceleration (m/s²), scaled per particle
    pub const GRAVITY: f32 = -9.81;

    /// Damping below this is treated as zero and integrated with explicit Euler
    pub const DAMPING_EPSILON: f32 = 1e-6;
}

/// Trail ring-buffer sampling
pub mod trail_constants {
    /// Sample period used when a particle has no trail
    pub const DEFAULT_SAMPLE_PERIOD: f32 = 1.0 / 60.0;

    /// Fastest allowed trail sampling (seconds)
    pub const MIN_SAMPLE_PERIOD: f32 = 1.0 / 240.0;

    /// Slowest allowed trail sampling (seconds)
    pub const MAX_SAMPLE_PERIOD: f32 = 1.0 / 10.0;

    /// Global visibility knob applied on top of each particle's trail opacity
    pub const BASE_OPACITY: f32 = 0.15;

    /// Maps a fractional trail width (<= 1) from particle pixels to world units
    pub const PIXEL_TO_WORLD: f32 = 0.0025;
}

/// Branch layout limits
pub mod layout_constants {
    /// Largest accepted grid side; a full grid is `MAX_GRID_SIDE²` branches
    pub const MAX_GRID_SIDE: i32 = 256;
}

/// Branch emission constants
pub mod emission_constants {
    /// Smallest spawn interval for timed emitters (seconds)
    pub const MIN_EMIT_INTERVAL: f32 = 1.0 / 240.0;

    /// Lower bound of the head/tail speed multiplier
    pub const SPEED_MULTIPLIER_BASE: f32 = 0.6;

    /// Width of the head/tail speed multiplier range
    pub const SPEED_MULTIPLIER_RANGE: f32 = 0.8;
}

/// Death-triggered smoke and sparkle spawning
pub mod secondary_constants {
    /// Smoke particles spawned for a smoke amount of zero (before the cutoff)
    pub const SMOKE_MIN_COUNT: usize = 3;

    /// Additional smoke particles at full smoke amount
    pub const SMOKE_EXTRA_COUNT: usize = 12;

    /// Muted smoke tint (alpha is computed from the smoke amount)
    pub const SMOKE_COLOR: [f32; 3] = [0.65, 0.65, 0.70];

    /// Particles in one sparkle burst
    pub const SPARKLE_COUNT: usize = 6;

    /// Lifetime of every sparkle particle (seconds)
    pub const SPARKLE_LIFETIME: f32 = 0.6;

    /// Smallest sparkle render size
    pub const SPARKLE_MIN_SIZE: f32 = 2.0;
}

/// Scene-mode peak preview
pub mod preview_constants {
    /// Simulation step used while fast-forwarding a preview
    pub const STEP: f32 = 1.0 / 30.0;

    /// Upper bound on preview steps per rebuild
    pub const MAX_STEPS: u32 = 120;

    /// Shortest preview offset (seconds)
    pub const MIN_PEAK_OFFSET: f32 = 0.1;

    /// Longest preview offset (seconds)
    pub const MAX_PEAK_OFFSET: f32 = 4.0;
}
