use bevy::prelude::Resource;

/// Handle for one requested display-refresh callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

/// Handle for one registered viewport-resize listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResizeListener(pub u64);

/// What an engine needs from its host to run a refresh-driven loop.
pub trait FrameDriver {
    /// Asks for one callback at the next display refresh.
    fn request_frame(&mut self) -> FrameRequest;
    fn cancel_frame(&mut self, request: FrameRequest);
    fn add_resize_listener(&mut self) -> ResizeListener;
    fn remove_resize_listener(&mut self, listener: ResizeListener);
}

/// Single-shot frame scheduling on top of bevy's update loop.
///
/// At most one frame request is outstanding at a time; a request is consumed by
/// `take_due` on the next update and must be re-armed to keep the loop going.
#[derive(Resource, Debug, Default)]
pub struct FrameLoop {
    next_id: u64,
    pending: Option<FrameRequest>,
    resize_listeners: Vec<ResizeListener>,
}

impl FrameLoop {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Hands out the pending request, if any. It will not be handed out again.
    pub fn take_due(&mut self) -> Option<FrameRequest> {
        self.pending.take()
    }

    pub fn resize_listener_count(&self) -> usize {
        self.resize_listeners.len()
    }
}

impl FrameDriver for FrameLoop {
    fn request_frame(&mut self) -> FrameRequest {
        let request = FrameRequest(self.next_id());
        self.pending = Some(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.pending == Some(request) {
            self.pending = None;
        }
    }

    fn add_resize_listener(&mut self) -> ResizeListener {
        let listener = ResizeListener(self.next_id());
        self.resize_listeners.push(listener);
        listener
    }

    fn remove_resize_listener(&mut self, listener: ResizeListener) {
        self.resize_listeners.retain(|l| *l != listener);
    }
}
