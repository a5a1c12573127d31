//! Particle shape generators — pure functions that produce the positions a
//! cosmetic effect should spawn particles at. Spawning itself is the
//! host's job; nothing here touches a world.

use std::f64::consts::PI;

use rand::Rng;

use crate::math::Vec3;

/// The built-in shapes, in the order effects pick them by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleShape {
    Line,
    Helix,
    WavyLine,
    BurstSpiral,
    ConvergingLines,
    Ripples,
    FallingLeaves,
    ExplodingStars,
    PulseWaves,
    OscillatingRings,
}

/// How ripple circles are spaced outwards from the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpacingMode {
    Linear,
    Exponential,
}

/// A straight run of points offset from the origin by `radius`.
#[must_use]
pub fn line(origin: Vec3, radius: f64, count: usize) -> Vec<Vec3> {
    (0..count)
        .map(|_| Vec3::new(origin.x + radius, origin.y, origin.z + radius))
        .collect()
}

/// A helix winding upwards around the origin.
#[must_use]
pub fn helix(origin: Vec3, radius: f64, height_step: f64, angle: f64, count: usize) -> Vec<Vec3> {
    let step = 2.0 * PI / count.max(1) as f64;
    (0..count)
        .map(|i| {
            let theta = angle + i as f64 * step;
            let local = Vec3::new(
                radius * theta.cos(),
                i as f64 * height_step / count.max(1) as f64,
                radius * theta.sin(),
            );
            origin + local
        })
        .collect()
}

/// Flat concentric circles rippling outwards. The `angle` parameter scales
/// the ring sizes; spacing picks linear or exponential radii growth.
#[must_use]
pub fn ripples(
    origin: Vec3,
    radius: f64,
    angle: f64,
    count: usize,
    spacing: SpacingMode,
    num_circles: usize,
) -> Vec<Vec3> {
    if num_circles == 0 {
        return Vec::new();
    }

    const MIN_POINTS_PER_CIRCLE: usize = 6;
    let mut positions = vec![origin; count];
    let points_per_circle = (count / num_circles).max(MIN_POINTS_PER_CIRCLE);

    for circle_index in 0..num_circles {
        let size_factor = (angle / 360.0).clamp(0.4 * radius, 1.2 * radius);
        let mut circle_radius = match spacing {
            SpacingMode::Linear => radius * (circle_index + 1) as f64 / num_circles as f64,
            SpacingMode::Exponential => {
                radius * (1.0 + (circle_index as f64).powf(1.5) / (num_circles as f64).powf(1.5))
            }
        };
        circle_radius *= size_factor;

        let theta_step = 2.0 * PI / points_per_circle as f64;
        for i in 0..points_per_circle {
            let theta = i as f64 * theta_step;
            let local = Vec3::new(circle_radius * theta.cos(), 0.0, circle_radius * theta.sin());
            let index = circle_index * points_per_circle + i;
            if index < positions.len() {
                positions[index] = origin + local;
            }
        }
    }
    positions
}

/// A line that waves sideways as it climbs.
#[must_use]
pub fn wavy_line(
    origin: Vec3,
    radius: f64,
    height_step: f64,
    angle: f64,
    count: usize,
) -> Vec<Vec3> {
    let step = 2.0 * PI / count.max(1) as f64;
    (0..count)
        .map(|i| {
            let theta = angle + i as f64 * step;
            Vec3::new(
                origin.x + radius * theta.cos() * angle.sin(),
                origin.y + theta * height_step,
                origin.z + radius * theta.sin() * angle.cos(),
            )
        })
        .collect()
}

/// A spiral whose radius grows as it rises, bursting outwards.
#[must_use]
pub fn burst_spiral(
    origin: Vec3,
    radius: f64,
    height_step: f64,
    angle: f64,
    count: usize,
) -> Vec<Vec3> {
    let step = 2.0 * PI / count.max(1) as f64;
    (0..count)
        .map(|i| {
            let theta = angle + i as f64 * step;
            let spiral_radius = radius * (i as f64 / count.max(1) as f64);
            Vec3::new(
                origin.x + spiral_radius * theta.cos(),
                origin.y + theta * height_step,
                origin.z + spiral_radius * theta.sin(),
            )
        })
        .collect()
}

/// Lines spiralling inwards toward the origin as they climb.
#[must_use]
pub fn converging_lines(
    origin: Vec3,
    radius: f64,
    height_step: f64,
    angle: f64,
    count: usize,
) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let t = i as f64 / count.max(1) as f64;
            let theta = angle + t * 2.0 * PI;
            Vec3::new(
                origin.x + (radius - radius * t) * theta.cos(),
                origin.y + theta * height_step,
                origin.z + (radius - radius * t) * theta.sin(),
            )
        })
        .collect()
}

/// A ring of points drifting downwards like falling leaves.
#[must_use]
pub fn falling_leaves(
    origin: Vec3,
    radius: f64,
    height_step: f64,
    angle: f64,
    count: usize,
) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let t = i as f64 / count.max(1) as f64;
            let theta = angle + t * 2.0 * PI;
            Vec3::new(
                origin.x + radius * theta.cos(),
                origin.y - t * height_step,
                origin.z + radius * theta.sin(),
            )
        })
        .collect()
}

/// Randomized radial scatter at a fixed height, like an exploding star.
#[must_use]
pub fn exploding_stars(
    origin: Vec3,
    radius: f64,
    height_step: f64,
    angle: f64,
    count: usize,
) -> Vec<Vec3> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let t = i as f64 / count.max(1) as f64;
            let theta = angle + t * 2.0 * PI;
            let explosion_radius = radius * rng.gen::<f64>();
            Vec3::new(
                origin.x + explosion_radius * theta.cos(),
                origin.y + height_step,
                origin.z + explosion_radius * theta.sin(),
            )
        })
        .collect()
}

/// Rings whose radius pulses with the phase frequency.
#[must_use]
pub fn pulse_waves(
    origin: Vec3,
    radius: f64,
    height_step: f64,
    angle: f64,
    count: usize,
    pulse_freq: f64,
) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let t = i as f64 / count.max(1) as f64;
            let theta = angle + t * 2.0 * PI;
            let wave_radius = radius * (angle + i as f64 * pulse_freq).sin();
            Vec3::new(
                origin.x + wave_radius * theta.cos(),
                origin.y + height_step,
                origin.z + wave_radius * theta.sin(),
            )
        })
        .collect()
}

/// Rings oscillating in and out around the origin.
#[must_use]
pub fn oscillating_rings(
    origin: Vec3,
    radius: f64,
    height_step: f64,
    angle: f64,
    count: usize,
    ring_freq: f64,
) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let t = i as f64 / count.max(1) as f64;
            let theta = angle + t * 2.0 * PI;
            let oscillation_radius = radius * (angle + i as f64 * ring_freq).sin();
            Vec3::new(
                origin.x + oscillation_radius * theta.cos(),
                origin.y + height_step,
                origin.z + oscillation_radius * theta.sin(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generators_produce_requested_counts() {
        let origin = Vec3::new(10.0, 64.0, -5.0);
        assert_eq!(line(origin, 1.0, 16).len(), 16);
        assert_eq!(helix(origin, 2.0, 3.0, 0.0, 32).len(), 32);
        assert_eq!(wavy_line(origin, 2.0, 0.5, 0.3, 20).len(), 20);
        assert_eq!(burst_spiral(origin, 2.0, 0.1, 0.0, 24).len(), 24);
        assert_eq!(converging_lines(origin, 2.0, 0.1, 0.0, 24).len(), 24);
        assert_eq!(falling_leaves(origin, 2.0, 1.5, 0.0, 12).len(), 12);
        assert_eq!(exploding_stars(origin, 2.0, 1.0, 0.0, 12).len(), 12);
        assert_eq!(pulse_waves(origin, 2.0, 1.0, 0.0, 12, 0.4).len(), 12);
        assert_eq!(oscillating_rings(origin, 2.0, 1.0, 0.0, 12, 0.4).len(), 12);
    }

    #[test]
    fn ripples_empty_without_circles() {
        assert!(ripples(Vec3::ZERO, 3.0, 180.0, 24, SpacingMode::Linear, 0).is_empty());
    }

    #[test]
    fn ripples_fill_all_slots() {
        let positions = ripples(Vec3::ZERO, 3.0, 180.0, 24, SpacingMode::Exponential, 3);
        assert_eq!(positions.len(), 24);
    }

    #[test]
    fn helix_stays_on_radius() {
        let origin = Vec3::new(0.0, 0.0, 0.0);
        for p in helix(origin, 2.0, 0.0, 0.0, 16) {
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!((r - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn exploding_stars_within_radius() {
        let origin = Vec3::ZERO;
        for p in exploding_stars(origin, 2.0, 1.0, 0.0, 64) {
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!(r <= 2.0 + 1e-9);
            assert!((p.y - 1.0).abs() < 1e-12);
        }
    }
}
