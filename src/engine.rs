use bevy::log::{debug, info};
use bevy::math::Vec2;
use bevy::prelude::Resource;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::canvas::Canvas;
use crate::field::HeartField;
use crate::frame_loop::{FrameDriver, FrameRequest, ResizeListener};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("no drawing surface is available")]
    SurfaceUnavailable,
    #[error("viewport {0} has no drawable area")]
    EmptyViewport(Vec2),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Inactive,
    Active,
}

/// The floating-hearts background: a heart field plus the frame request and resize
/// listener that keep it animated while it is mounted.
#[derive(Resource, Debug)]
pub struct FloatingHearts {
    count: usize,
    field: Option<HeartField>,
    next_frame: Option<FrameRequest>,
    resize_listener: Option<ResizeListener>,
}

impl FloatingHearts {
    pub fn new(count: usize) -> FloatingHearts {
        FloatingHearts {
            count,
            field: None,
            next_frame: None,
            resize_listener: None,
        }
    }

    pub fn state(&self) -> EngineState {
        if self.field.is_some() {
            EngineState::Active
        } else {
            EngineState::Inactive
        }
    }

    pub fn field(&self) -> Option<&HeartField> {
        self.field.as_ref()
    }

    /// Mounts the engine on a viewport of the given size (`None` if there is no surface).
    ///
    /// Starting an already active engine does nothing.
    pub fn start(
        &mut self,
        viewport: Option<Vec2>,
        rng: StdRng,
        driver: &mut impl FrameDriver,
    ) -> Result<(), EngineError> {
        if self.state() == EngineState::Active {
            return Ok(());
        }
        let viewport = viewport.ok_or(EngineError::SurfaceUnavailable)?;
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return Err(EngineError::EmptyViewport(viewport));
        }

        self.field = Some(HeartField::new(self.count, viewport, rng));
        self.resize_listener = Some(driver.add_resize_listener());
        self.next_frame = Some(driver.request_frame());
        info!("Floating hearts started: {} hearts on {}x{}", self.count, viewport.x, viewport.y);
        Ok(())
    }

    /// Runs one tick if `request` is the frame this engine is waiting for, then re-arms.
    /// Returns false for stale or cancelled requests, which draw nothing.
    pub fn on_frame(
        &mut self,
        request: FrameRequest,
        driver: &mut impl FrameDriver,
        canvas: &mut impl Canvas,
    ) -> bool {
        if self.next_frame != Some(request) {
            return false;
        }
        let Some(field) = self.field.as_mut() else {
            return false;
        };
        field.advance(canvas);
        self.next_frame = Some(driver.request_frame());
        true
    }

    pub fn on_resize(&mut self, viewport: Vec2) {
        if let Some(field) = self.field.as_mut() {
            debug!("Resizing heart surface to {}x{}", viewport.x, viewport.y);
            field.resize(viewport);
        }
    }

    /// Unmounts the engine, cancelling its frame request and resize listener.
    pub fn stop(&mut self, driver: &mut impl FrameDriver) {
        if let Some(request) = self.next_frame.take() {
            driver.cancel_frame(request);
        }
        if let Some(listener) = self.resize_listener.take() {
            driver.remove_resize_listener(listener);
        }
        if self.field.take().is_some() {
            info!("Floating hearts stopped");
        }
    }
}
