use bevy::math::Vec2;

use crate::particle::Heart;

/// A full-viewport drawing surface the heart field repaints every tick.
///
/// Coordinates handed to a canvas are canvas-style: origin at the top-left, y down.
pub trait Canvas {
    /// Wipes the whole surface, which is `size` units across.
    fn clear(&mut self, size: Vec2);

    /// Fills the heart outline for the heart in `slot`, centred on its position,
    /// rotated by its rotation and scaled by `size / 24`.
    fn fill_heart(&mut self, slot: usize, heart: &Heart);
}

/// Maps a canvas point (origin top-left, y down) on a surface of `size` to bevy world
/// space for a 2D camera centred on that surface (origin centre, y up).
pub fn canvas_to_world(point: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(point.x - size.x / 2.0, size.y / 2.0 - point.y)
}

#[cfg(test)]
pub use recording::RecordingCanvas;

#[cfg(test)]
mod recording {
    use super::*;

    /// Remembers what was drawn during the last frame.
    #[derive(Default)]
    pub struct RecordingCanvas {
        pub clears: usize,
        pub size: Vec2,
        pub drawn: Vec<(usize, Vec2)>,
    }

    impl Canvas for RecordingCanvas {
        fn clear(&mut self, size: Vec2) {
            self.clears += 1;
            self.size = size;
            self.drawn.clear();
        }

        fn fill_heart(&mut self, slot: usize, heart: &Heart) {
            self.drawn.push((slot, heart.position));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_corners_map_to_world_corners() {
        let size = Vec2::new(1000.0, 800.0);
        assert_eq!(canvas_to_world(Vec2::ZERO, size), Vec2::new(-500.0, 400.0));
        assert_eq!(canvas_to_world(size, size), Vec2::new(500.0, -400.0));
        assert_eq!(canvas_to_world(size / 2.0, size), Vec2::ZERO);
    }
}
