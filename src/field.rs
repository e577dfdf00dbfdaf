use std::fmt::{Debug, Formatter};

use bevy::math::Vec2;
use rand::rngs::StdRng;

use crate::canvas::Canvas;
use crate::particle::Heart;

/// A fixed-size set of hearts drifting up a surface. Hearts are recycled in place,
/// so the slot count never changes for the lifetime of the field.
pub struct HeartField {
    hearts: Vec<Heart>,
    bounds: Vec2,
    rng: StdRng,
}

impl Debug for HeartField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "HeartField:")?;
        writeln!(f, "    hearts: {}", self.hearts.len())?;
        writeln!(f, "    bounds: {}x{}", self.bounds.x, self.bounds.y)
    }
}

impl HeartField {
    pub fn new(count: usize, bounds: Vec2, mut rng: StdRng) -> HeartField {
        let hearts = (0..count).map(|_| Heart::spawn(&mut rng, bounds)).collect();
        HeartField { hearts, bounds, rng }
    }

    pub fn hearts(&self) -> &[Heart] {
        &self.hearts
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    /// Matches the surface to a new viewport size. Positions are left alone; hearts that
    /// end up outside the surface simply drift back in or wrap.
    pub fn resize(&mut self, bounds: Vec2) {
        self.bounds = bounds;
    }

    /// Runs one tick: clears the canvas, then moves and draws every heart in slot order.
    /// Returns how many hearts wrapped back to the bottom.
    pub fn advance(&mut self, canvas: &mut impl Canvas) -> usize {
        canvas.clear(self.bounds);
        let mut wrapped = 0;
        for (slot, heart) in self.hearts.iter_mut().enumerate() {
            if heart.update(&mut self.rng, self.bounds) {
                wrapped += 1;
            }
            canvas.fill_heart(slot, heart);
        }
        wrapped
    }
}
