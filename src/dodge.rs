//! The prompt state and the geometry that keeps the "No" button out of reach.

use bevy::log::info;
use bevy::math::{Rect, Vec2};
use bevy::prelude::Resource;
use rand::Rng;

/// Half-size of the region around the viewport centre the "No" button may jump to.
pub const DODGE_SPREAD: f32 = 250.0;
/// Minimum distance between the button and the viewport edges.
pub const DODGE_MARGIN: f32 = 20.0;

/// The area the button's top-left corner may land in, in viewport coordinates (y down).
///
/// When the viewport is too small for the margins, the range collapses onto its lower bound.
pub fn dodge_bounds(viewport: Vec2, button: Vec2) -> Rect {
    let center = viewport / 2.0;
    let min = center - DODGE_SPREAD;
    let max = center + DODGE_SPREAD - button;

    let safe_min = min.max(Vec2::splat(DODGE_MARGIN));
    let safe_max = max.min(viewport - button - DODGE_MARGIN);
    Rect {
        min: safe_min,
        max: safe_max.max(safe_min),
    }
}

/// Picks a new top-left corner for the button, snapped down to whole pixels.
pub fn dodge_position(viewport: Vec2, button: Vec2, rng: &mut impl Rng) -> Vec2 {
    let bounds = dodge_bounds(viewport, button);
    let span = bounds.max - bounds.min;
    Vec2::new(
        (rng.random::<f32>() * span.x + bounds.min.x).floor(),
        (rng.random::<f32>() * span.y + bounds.min.y).floor(),
    )
}

/// Whether the prompt was accepted, and where the "No" button currently floats.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct Prompt {
    accepted: bool,
    evasive_position: Option<Vec2>,
}

impl Prompt {
    pub fn accepted(&self) -> bool {
        self.accepted
    }

    pub fn evasive_position(&self) -> Option<Vec2> {
        self.evasive_position
    }

    /// Says yes. Returns true the first time, when the celebration should start.
    pub fn accept(&mut self) -> bool {
        self.evasive_position = None;
        if self.accepted {
            return false;
        }
        self.accepted = true;
        info!("Prompt accepted");
        true
    }

    /// Moves the "No" button somewhere else. Does nothing once accepted, or when the
    /// button's size is unknown.
    pub fn evade(&mut self, viewport: Vec2, button: Option<Vec2>, rng: &mut impl Rng) -> Option<Vec2> {
        if self.accepted {
            return None;
        }
        let button = button?;
        let position = dodge_position(viewport, button, rng);
        self.evasive_position = Some(position);
        Some(position)
    }

    pub fn reset(&mut self) {
        self.accepted = false;
        self.evasive_position = None;
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    const BUTTON: Vec2 = Vec2::new(110.0, 60.0);

    #[test]
    fn bounds_stay_near_the_centre_on_large_screens() {
        let bounds = dodge_bounds(Vec2::new(1920.0, 1080.0), BUTTON);
        assert_eq!(bounds.min, Vec2::new(710.0, 290.0));
        assert_eq!(bounds.max, Vec2::new(1100.0, 730.0));
    }

    #[test]
    fn bounds_respect_the_margin_on_small_screens() {
        let viewport = Vec2::new(375.0, 667.0);
        let bounds = dodge_bounds(viewport, BUTTON);
        assert_eq!(bounds.min.x, DODGE_MARGIN);
        assert_eq!(bounds.max.x, viewport.x - BUTTON.x - DODGE_MARGIN);
        assert_eq!(bounds.min.y, 83.5);
        assert_eq!(bounds.max.y, 523.5);
    }

    #[test]
    fn tiny_viewport_collapses_onto_lower_bound() {
        let bounds = dodge_bounds(Vec2::new(100.0, 50.0), BUTTON);
        assert_eq!(bounds.min, bounds.max);
    }

    #[test]
    fn evade_never_leaves_the_safe_area() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut prompt = Prompt::default();
        for viewport in [Vec2::new(1000.0, 800.0), Vec2::new(390.0, 844.0), Vec2::new(2560.0, 1440.0)] {
            for _ in 0..500 {
                let pos = prompt.evade(viewport, Some(BUTTON), &mut rng).unwrap();
                assert!(pos.x >= DODGE_MARGIN && pos.x <= viewport.x - BUTTON.x - DODGE_MARGIN);
                assert!(pos.y >= DODGE_MARGIN && pos.y <= viewport.y - BUTTON.y - DODGE_MARGIN);
                assert!(pos.x >= viewport.x / 2.0 - DODGE_SPREAD - 1.0);
                assert!(pos.x <= viewport.x / 2.0 + DODGE_SPREAD - BUTTON.x);
                assert_eq!(pos, pos.floor());
                assert_eq!(prompt.evasive_position(), Some(pos));
            }
        }
    }

    #[test]
    fn evade_recomputes_on_every_trigger() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut prompt = Prompt::default();
        let positions: Vec<Vec2> = (0..20)
            .filter_map(|_| prompt.evade(Vec2::new(1000.0, 800.0), Some(BUTTON), &mut rng))
            .collect();
        assert_eq!(positions.len(), 20);
        assert!(positions.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn evade_without_button_is_a_no_op() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut prompt = Prompt::default();
        assert_eq!(prompt.evade(Vec2::new(1000.0, 800.0), None, &mut rng), None);
        assert_eq!(prompt.evasive_position(), None);
    }

    #[test]
    fn accept_clears_the_floating_button() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut prompt = Prompt::default();
        prompt.evade(Vec2::new(1000.0, 800.0), Some(BUTTON), &mut rng);

        assert!(prompt.accept());
        assert!(prompt.accepted());
        assert_eq!(prompt.evasive_position(), None);
        assert!(!prompt.accept());
        assert_eq!(prompt.evade(Vec2::new(1000.0, 800.0), Some(BUTTON), &mut rng), None);
        assert_eq!(prompt.evasive_position(), None);
    }

    #[test]
    fn reset_starts_over() {
        let mut prompt = Prompt::default();
        prompt.accept();
        prompt.reset();
        assert_eq!(prompt, Prompt::default());
    }
}
