use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::{
    effects::Effect,
    foundation::{core::SurfaceSize, error::BackdropResult},
    host::scheduler::{FrameScheduler, FrameToken, HostEvent, ListenerId, ResizeEvents},
    mount::FieldHandle,
    render::context::RenderTarget,
};

/// Counters kept by [`HeadlessHost`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Frame requests received.
    pub requested: u64,
    /// Requests withdrawn before they fired.
    pub cancelled: u64,
    /// Frame callbacks handed out by [`HeadlessHost::poll_event`].
    pub fired: u64,
    /// Resize notifications discarded because nobody was listening.
    pub dropped_resizes: u64,
}

/// Deterministic in-process host: a frame scheduler and resize event source driven by the
/// caller instead of a display.
///
/// Pending frames fire in request order. Every listener gets its own copy of each resize, and
/// a listener's queued resizes are delivered before its frame.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    next_id: u64,
    pending: BTreeSet<FrameToken>,
    listeners: BTreeMap<ListenerId, VecDeque<SurfaceSize>>,
    stats: SchedulerStats,
}

impl HeadlessHost {
    /// An idle host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters since construction.
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Number of requested frames that have neither fired nor been cancelled.
    pub fn pending_frames(&self) -> usize {
        self.pending.len()
    }

    /// Number of registered resize listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Simulate a container resize, queued for every registered listener. Dropped when no
    /// listener is registered.
    pub fn push_resize(&mut self, size: SurfaceSize) {
        if self.listeners.is_empty() {
            self.stats.dropped_resizes += 1;
            return;
        }
        for queue in self.listeners.values_mut() {
            queue.push_back(size);
        }
    }

    /// Next signal for anyone, or `None` when the host is idle: the first listener with a
    /// queued resize, then the oldest pending frame.
    ///
    /// Meant for hosts with a single mounted handle; with several, use
    /// [`HeadlessHost::poll_event_for`] so no handle receives another's signals.
    pub fn poll_event(&mut self) -> Option<HostEvent> {
        if let Some(size) = self.listeners.values_mut().find_map(VecDeque::pop_front) {
            return Some(HostEvent::Resize(size));
        }
        let token = self.pending.pop_first()?;
        self.stats.fired += 1;
        Some(HostEvent::Frame(token))
    }

    /// Next signal addressed to one handle: a resize queued for `listener`, then `frame` if it
    /// is still pending. Other listeners' resizes and other frames stay queued.
    pub fn poll_event_for(
        &mut self,
        listener: Option<ListenerId>,
        frame: Option<FrameToken>,
    ) -> Option<HostEvent> {
        if let Some(size) = listener.and_then(|id| self.listeners.get_mut(&id)?.pop_front()) {
            return Some(HostEvent::Resize(size));
        }
        let token = frame.filter(|t| self.pending.remove(t))?;
        self.stats.fired += 1;
        Some(HostEvent::Frame(token))
    }

    /// Deliver `handle`'s own signals until it has drawn `frames` more frames or it has nothing
    /// left to receive. Returns the number of frames drawn. Frames and resizes addressed to
    /// other handles on this host are left in place.
    pub fn run<E: Effect, T: RenderTarget>(
        &mut self,
        handle: &mut FieldHandle<E, T>,
        frames: u64,
    ) -> BackdropResult<u64> {
        let mut drawn = 0;
        while drawn < frames {
            let (listener, frame) = (handle.resize_listener(), handle.pending_frame());
            let Some(event) = self.poll_event_for(listener, frame) else {
                break;
            };
            if handle.handle_event(event, self)? {
                drawn += 1;
            }
        }
        Ok(drawn)
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl FrameScheduler for HeadlessHost {
    fn request_frame(&mut self) -> FrameToken {
        let token = FrameToken(self.next_id());
        self.pending.insert(token);
        self.stats.requested += 1;
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if self.pending.remove(&token) {
            self.stats.cancelled += 1;
        }
    }
}

impl ResizeEvents for HeadlessHost {
    fn add_resize_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id());
        self.listeners.insert(id, VecDeque::new());
        id
    }

    fn remove_resize_listener(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/headless.rs"]
mod tests;
