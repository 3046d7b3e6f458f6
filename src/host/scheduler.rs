use crate::foundation::core::SurfaceSize;

/// Handle of one requested frame callback. Tokens are never reused by a host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameToken(pub u64);

/// Registration of one resize listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u64);

/// Display-refresh scheduling primitive: request or cancel a one-shot callback that runs
/// just before the next repaint.
pub trait FrameScheduler {
    /// Ask for one callback on the next frame.
    fn request_frame(&mut self) -> FrameToken;

    /// Withdraw a request. Cancelling a fired or unknown token is a no-op.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Source of viewport/container resize notifications.
pub trait ResizeEvents {
    /// Start delivering resize events.
    fn add_resize_listener(&mut self) -> ListenerId;

    /// Stop delivering resize events to `id`. Unknown ids are ignored.
    fn remove_resize_listener(&mut self, id: ListenerId);
}

/// Everything a mounted effect needs from its environment.
pub trait Host: FrameScheduler + ResizeEvents {}

impl<T: FrameScheduler + ResizeEvents + ?Sized> Host for T {}

/// A signal delivered by the host to a mounted effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostEvent {
    /// A previously requested frame is due.
    Frame(FrameToken),
    /// The surface container changed size.
    Resize(SurfaceSize),
}
