use std::f32::consts::TAU;

use bevy::color::Color;
use bevy::math::Vec2;
use rand::Rng;

use crate::heart_shape::HEART_VIEWBOX;

pub const SIZE_MIN: f32 = 10.0;
pub const SIZE_RANGE: f32 = 20.0;
pub const SPEED_MIN: f32 = 0.5;
pub const SPEED_RANGE: f32 = 1.5;
pub const OPACITY_MIN: f32 = 0.2;
pub const OPACITY_RANGE: f32 = 0.5;
pub const ROTATION_SPEED_RANGE: f32 = 0.05;
/// How far past the top edge a heart travels before it is sent back below the bottom edge.
pub const WRAP_MARGIN: f32 = 50.0;

/// The shades of pink a heart can be painted with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeartColor {
    LightPink,
    HotPink,
    Pink,
    Salmon,
}

impl HeartColor {
    pub const PALETTE: [HeartColor; 4] = [
        HeartColor::LightPink,
        HeartColor::HotPink,
        HeartColor::Pink,
        HeartColor::Salmon,
    ];

    pub fn rgb(self) -> [u8; 3] {
        match self {
            HeartColor::LightPink => [255, 182, 193],
            HeartColor::HotPink => [255, 105, 180],
            HeartColor::Pink => [255, 192, 203],
            HeartColor::Salmon => [250, 128, 114],
        }
    }

    pub fn with_opacity(self, opacity: f32) -> Color {
        let [r, g, b] = self.rgb();
        Color::srgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, opacity)
    }
}

/// One decorative heart. Only `position` and `rotation` change after it is spawned.
///
/// Coordinates are canvas-style: origin at the top-left of the surface, y growing downwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Heart {
    pub position: Vec2,
    pub size: f32,
    pub speed: f32,
    pub opacity: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub color: HeartColor,
}

impl Heart {
    /// Creates a heart somewhere on a surface of the given size.
    pub fn spawn(rng: &mut impl Rng, bounds: Vec2) -> Heart {
        let color_index = rng.random_range(0..HeartColor::PALETTE.len());
        Heart {
            position: Vec2::new(rng.random::<f32>() * bounds.x, rng.random::<f32>() * bounds.y),
            size: rng.random::<f32>() * SIZE_RANGE + SIZE_MIN,
            speed: rng.random::<f32>() * SPEED_RANGE + SPEED_MIN,
            opacity: rng.random::<f32>() * OPACITY_RANGE + OPACITY_MIN,
            rotation: rng.random::<f32>() * TAU,
            rotation_speed: (rng.random::<f32>() - 0.5) * ROTATION_SPEED_RANGE,
            color: HeartColor::PALETTE[color_index],
        }
    }

    /// Moves the heart up by one tick. Returns true if it went off the top and was recycled.
    pub fn update(&mut self, rng: &mut impl Rng, bounds: Vec2) -> bool {
        self.position.y -= self.speed;
        self.rotation += self.rotation_speed;

        if self.position.y < -WRAP_MARGIN {
            self.position.y = bounds.y + WRAP_MARGIN;
            self.position.x = rng.random::<f32>() * bounds.x;
            return true;
        }
        false
    }

    /// Uniform scale from the heart outline's viewbox to this heart's size.
    pub fn scale(&self) -> f32 {
        self.size / HEART_VIEWBOX
    }

    pub fn fill_color(&self) -> Color {
        self.color.with_opacity(self.opacity)
    }
}

#[cfg(test)]
mod tests {
    use bevy::color::Alpha;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    const BOUNDS: Vec2 = Vec2::new(1000.0, 800.0);

    #[test]
    fn spawned_hearts_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let heart = Heart::spawn(&mut rng, BOUNDS);
            assert!(heart.size >= SIZE_MIN && heart.size < SIZE_MIN + SIZE_RANGE);
            assert!(heart.speed >= SPEED_MIN && heart.speed < SPEED_MIN + SPEED_RANGE);
            assert!(heart.opacity > 0.0 && heart.opacity < 1.0);
            assert!(heart.rotation_speed.abs() <= ROTATION_SPEED_RANGE / 2.0);
            assert!(heart.position.x >= 0.0 && heart.position.x < BOUNDS.x);
            assert!(heart.position.y >= 0.0 && heart.position.y < BOUNDS.y);
            assert!(HeartColor::PALETTE.contains(&heart.color));
        }
    }

    #[test]
    fn update_moves_up_and_rotates() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut heart = Heart::spawn(&mut rng, BOUNDS);
        heart.position = Vec2::new(300.0, 400.0);
        let before = heart.clone();

        let wrapped = heart.update(&mut rng, BOUNDS);

        assert!(!wrapped);
        assert_eq!(heart.position.x, 300.0);
        assert_eq!(heart.position.y, 400.0 - before.speed);
        assert_eq!(heart.rotation, before.rotation + before.rotation_speed);
    }

    #[test]
    fn wraps_to_bottom_once_past_margin() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut heart = Heart::spawn(&mut rng, BOUNDS);
        heart.position = Vec2::new(123.0, -51.0);
        let before = heart.clone();

        let wrapped = heart.update(&mut rng, BOUNDS);

        assert!(wrapped);
        assert_eq!(heart.position.y, BOUNDS.y + WRAP_MARGIN);
        assert!(heart.position.x >= 0.0 && heart.position.x < BOUNDS.x);
        assert_eq!(heart.size, before.size);
        assert_eq!(heart.speed, before.speed);
        assert_eq!(heart.opacity, before.opacity);
        assert_eq!(heart.color, before.color);
        assert_eq!(heart.rotation_speed, before.rotation_speed);
    }

    #[test]
    fn stays_put_at_the_margin() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut heart = Heart::spawn(&mut rng, BOUNDS);
        heart.speed = 0.5;
        heart.position.y = -49.5;

        assert!(!heart.update(&mut rng, BOUNDS));
        assert_eq!(heart.position.y, -50.0);
    }

    #[test]
    fn fill_color_carries_opacity() {
        let mut rng = StdRng::seed_from_u64(4);
        let heart = Heart::spawn(&mut rng, BOUNDS);
        assert!((heart.fill_color().alpha() - heart.opacity).abs() < 1e-6);
        assert!((heart.scale() - heart.size / 24.0).abs() < 1e-6);
    }
}
