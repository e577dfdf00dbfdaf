//! Confetti fired from both sides of the window once the prompt is accepted.

use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::time::Duration;

use bevy::color::Color;
use bevy::math::Vec2;
use rand::Rng;

pub const CELEBRATION_DURATION: Duration = Duration::from_secs(5);
pub const BURST_INTERVAL: Duration = Duration::from_millis(250);
/// Pieces per origin for a burst fired right at the start; later bursts get fewer.
pub const BURST_PARTICLES: f32 = 50.0;

/// Horizontal bands (fractions of the window width) the two bursts come from.
const LEFT_BAND: (f32, f32) = (0.1, 0.3);
const RIGHT_BAND: (f32, f32) = (0.7, 0.9);

pub const START_VELOCITY: f32 = 30.0;
pub const SPREAD: f32 = TAU;
pub const DECAY: f32 = 0.9;
pub const GRAVITY: f32 = 3.0;
pub const CONFETTO_TICKS: u32 = 60;
pub const CONFETTO_SIZE: Vec2 = Vec2::new(8.0, 6.0);
/// Radius of the little circle each piece flutters around.
pub const WOBBLE_RADIUS: f32 = 10.0;
const TILT_STEP: f32 = 0.1;

pub const CONFETTI_COLORS: [[u8; 3]; 7] = [
    [0x26, 0xcc, 0xff],
    [0xa2, 0x5a, 0xfd],
    [0xff, 0x5e, 0x7e],
    [0x88, 0xff, 0x5a],
    [0xfc, 0xff, 0x42],
    [0xff, 0xa6, 0x2d],
    [0xff, 0x36, 0xff],
];

/// One emission: `particle_count` pieces from `origin`, given as fractions of the window
/// size (y down, may be slightly above the top edge).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Burst {
    pub origin: Vec2,
    pub particle_count: usize,
}

/// Fires paired bursts every `BURST_INTERVAL` with a count proportional to the time left.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BurstSchedule {
    elapsed: Duration,
    fired: u32,
}

impl BurstSchedule {
    pub fn is_finished(&self) -> bool {
        self.elapsed >= CELEBRATION_DURATION
    }

    /// Advances the schedule and returns every burst that came due in the meantime.
    pub fn advance(&mut self, delta: Duration, rng: &mut impl Rng) -> Vec<Burst> {
        let mut bursts = Vec::new();
        if self.is_finished() {
            return bursts;
        }
        self.elapsed += delta;

        loop {
            let due = BURST_INTERVAL * (self.fired + 1);
            if due > self.elapsed {
                break;
            }
            self.fired += 1;
            let Some(time_left) = CELEBRATION_DURATION.checked_sub(due).filter(|t| !t.is_zero()) else {
                self.elapsed = CELEBRATION_DURATION;
                break;
            };

            let fraction = time_left.as_secs_f32() / CELEBRATION_DURATION.as_secs_f32();
            let particle_count = (BURST_PARTICLES * fraction).floor() as usize;
            for (lo, hi) in [LEFT_BAND, RIGHT_BAND] {
                bursts.push(Burst {
                    origin: Vec2::new(rng.random::<f32>() * (hi - lo) + lo, rng.random::<f32>() - 0.2),
                    particle_count,
                });
            }
        }
        bursts
    }
}

/// A single piece of confetti, in window coordinates (y down). Advances once per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Confetto {
    pub position: Vec2,
    pub angle: f32,
    pub velocity: f32,
    pub tick: u32,
    pub color: Color,
    pub wobble: f32,
    pub wobble_speed: f32,
    pub tilt_angle: f32,
}

impl Confetto {
    pub fn launch(origin: Vec2, rng: &mut impl Rng) -> Confetto {
        let [r, g, b] = CONFETTI_COLORS[rng.random_range(0..CONFETTI_COLORS.len())];
        Confetto {
            position: origin,
            angle: -FRAC_PI_2 + (0.5 * SPREAD - rng.random::<f32>() * SPREAD),
            velocity: START_VELOCITY * 0.5 + rng.random::<f32>() * START_VELOCITY,
            tick: 0,
            color: Color::srgb_u8(r, g, b),
            wobble: rng.random::<f32>() * 10.0,
            wobble_speed: (rng.random::<f32>() * 0.1 + 0.05).min(0.11),
            tilt_angle: (rng.random::<f32>() * 0.5 + 0.25) * PI,
        }
    }

    /// Moves the piece by one tick. Returns false once it has burnt out.
    pub fn update(&mut self) -> bool {
        self.position.x += self.angle.cos() * self.velocity;
        self.position.y += self.angle.sin() * self.velocity + GRAVITY;
        self.velocity *= DECAY;
        self.wobble += self.wobble_speed;
        self.tilt_angle += TILT_STEP;
        self.tick += 1;
        self.tick < CONFETTO_TICKS
    }

    /// Where the trailing edge of the piece sits relative to `position`.
    pub fn wobble_offset(&self) -> Vec2 {
        Vec2::from_angle(self.wobble) * WOBBLE_RADIUS
    }

    /// How much of the piece faces the viewer as it tumbles, in `0..=1`.
    pub fn face(&self) -> f32 {
        self.tilt_angle.sin().abs()
    }

    pub fn opacity(&self) -> f32 {
        1.0 - (self.tick as f32 / CONFETTO_TICKS as f32).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn fires_nineteen_paired_bursts() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut schedule = BurstSchedule::default();
        let mut bursts = Vec::new();
        // Frames at roughly 60 fps.
        for _ in 0..400 {
            bursts.extend(schedule.advance(Duration::from_millis(16), &mut rng));
        }

        assert!(schedule.is_finished());
        assert_eq!(bursts.len(), 19 * 2);
        assert_eq!(bursts[0].particle_count, 47);
        assert_eq!(bursts[37].particle_count, 2);
        for pair in bursts.chunks(2) {
            assert_eq!(pair[0].particle_count, pair[1].particle_count);
            assert!(pair[0].origin.x >= 0.1 && pair[0].origin.x < 0.3);
            assert!(pair[1].origin.x >= 0.7 && pair[1].origin.x < 0.9);
            assert!(pair[0].origin.y >= -0.2 && pair[0].origin.y < 0.8);
        }
        assert!(bursts.windows(2).all(|w| w[0].particle_count >= w[1].particle_count));
    }

    #[test]
    fn nothing_fires_before_the_first_interval() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut schedule = BurstSchedule::default();
        assert!(schedule.advance(Duration::from_millis(249), &mut rng).is_empty());
        assert_eq!(schedule.advance(Duration::from_millis(1), &mut rng).len(), 2);
    }

    #[test]
    fn long_frame_catches_up() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut schedule = BurstSchedule::default();
        assert_eq!(schedule.advance(Duration::from_secs(1), &mut rng).len(), 8);
        assert_eq!(schedule.advance(Duration::from_secs(10), &mut rng).len(), 30);
        assert!(schedule.is_finished());
        assert!(schedule.advance(Duration::from_secs(1), &mut rng).is_empty());
    }

    #[test]
    fn confetto_burns_out_after_sixty_ticks() {
        let mut rng = StdRng::seed_from_u64(14);
        let mut confetto = Confetto::launch(Vec2::new(100.0, 100.0), &mut rng);
        assert_eq!(confetto.opacity(), 1.0);
        assert!(confetto.velocity >= 15.0 && confetto.velocity < 45.0);

        let mut ticks = 1;
        while confetto.update() {
            ticks += 1;
        }
        assert_eq!(ticks, CONFETTO_TICKS);
        assert_eq!(confetto.opacity(), 0.0);
    }

    #[test]
    fn confetto_slows_down_and_falls() {
        let mut rng = StdRng::seed_from_u64(15);
        let mut confetto = Confetto::launch(Vec2::ZERO, &mut rng);
        let v0 = confetto.velocity;
        confetto.update();
        assert!((confetto.velocity - v0 * DECAY).abs() < 1e-5);

        // Once the launch velocity has decayed, gravity dominates.
        for _ in 0..40 {
            confetto.update();
        }
        let y = confetto.position.y;
        confetto.update();
        assert!(confetto.position.y > y);
        assert!(confetto.opacity() < 1.0);
    }

    #[test]
    fn confetto_flutters_while_it_falls() {
        let mut rng = StdRng::seed_from_u64(16);
        let mut confetto = Confetto::launch(Vec2::ZERO, &mut rng);
        assert!(confetto.wobble_speed >= 0.05 && confetto.wobble_speed <= 0.11);
        assert!(confetto.tilt_angle >= 0.25 * PI && confetto.tilt_angle < 0.75 * PI);
        let (wobble, tilt) = (confetto.wobble, confetto.tilt_angle);

        confetto.update();

        assert!((confetto.wobble - wobble - confetto.wobble_speed).abs() < 1e-5);
        assert!((confetto.tilt_angle - tilt - 0.1).abs() < 1e-5);
        assert!((confetto.wobble_offset().length() - WOBBLE_RADIUS).abs() < 1e-4);
        assert!((0.0..=1.0).contains(&confetto.face()));
    }
}
