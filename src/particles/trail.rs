//! Trail ring-buffer sampling
//!
//! Each arena slot owns `TRAIL_SAMPLES` consecutive positions in a flat
//! buffer. `head` points at the newest sample and `count` says how many are
//! valid; older samples wrap backwards from the head.

use glam::Vec3;

use crate::constants::pool_constants::TRAIL_SAMPLES;
use crate::particles::TrailState;

/// Record samples for one particle after integration.
///
/// The first call after a reset always stores the current position. Further
/// samples are taken once per elapsed `sample_period`.
pub fn sample(trail: &mut TrailState, ring: &mut [Vec3], position: Vec3, dt: f32) {
    if !trail.is_sampling() {
        trail.count = 0;
        return;
    }

    trail.sample_accum += dt;

    if trail.count == 0 {
        trail.head = 0;
        trail.count = 1;
        ring[0] = position;
        trail.sample_accum = 0.0;
    }

    while trail.sample_accum >= trail.sample_period {
        trail.sample_accum -= trail.sample_period;
        trail.head = ((trail.head as usize + 1) % TRAIL_SAMPLES) as u8;
        ring[trail.head as usize] = position;
        if (trail.count as usize) < TRAIL_SAMPLES {
            trail.count += 1;
        }
    }
}

/// Valid samples ordered oldest to newest
pub fn ordered(ring: &[Vec3], head: u8, count: u8) -> impl Iterator<Item = Vec3> + '_ {
    let count = (count as usize).min(TRAIL_SAMPLES).min(ring.len());
    let head = head as usize;
    // Oldest sample sits count-1 steps behind the head
    let start = (head + TRAIL_SAMPLES + 1 - count) % TRAIL_SAMPLES;
    (0..count).map(move |k| ring[(start + k) % TRAIL_SAMPLES])
}

/// Sample period that spreads the ring over the trail duration
pub fn sample_period_for(enabled: bool, duration: f32) -> f32 {
    use crate::constants::trail_constants::{
        DEFAULT_SAMPLE_PERIOD, MAX_SAMPLE_PERIOD, MIN_SAMPLE_PERIOD,
    };

    if enabled && duration > 0.0 {
        (duration / (TRAIL_SAMPLES - 1) as f32).clamp(MIN_SAMPLE_PERIOD, MAX_SAMPLE_PERIOD)
    } else {
        DEFAULT_SAMPLE_PERIOD
    }
}
