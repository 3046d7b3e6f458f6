//! backdrop drives decorative 2D background animations one display frame at a time.
//!
//! Two effects ship with the crate:
//!
//! - [`ParticleField`]: a fixed-size set of points that drift, wrap at the surface edges and
//!   fade along a `sin(life * pi)` envelope.
//! - [`RetroGrid`]: a static cell grid with rectangles sweeping outward from the center,
//!   driven by a single scalar clock.
//!
//! # Lifecycle
//!
//! 1. **Mount**: [`create`] (or [`create_grid`]) builds the effect at the target's size,
//!    registers a resize listener and requests the first frame from the [`Host`]. A missing
//!    target or 2D context aborts silently with `None`.
//! 2. **Tick**: each due frame runs [`FieldHandle::on_frame`]: clear, update, draw, present,
//!    request the next frame. At most one frame request is outstanding per handle.
//! 3. **Resize**: [`FieldHandle::on_resize`] forwards container size changes.
//! 4. **Destroy**: [`FieldHandle::destroy`] cancels the pending frame and removes the listener.
//!
//! Drawing goes through the [`DrawContext`] trait. [`CpuTarget`] rasterizes with `vello_cpu`;
//! [`RecordingTarget`] logs [`DrawCmd`]s. [`HeadlessHost`] is a deterministic scheduler for
//! tests, offline rendering and the `backdrop` CLI.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod effects;
mod foundation;
mod host;
mod mount;
mod render;

pub use config::JsonConfig;
pub use config::capabilities::{CapabilityTable, Configurable, Getter, Setter};
pub use effects::Effect;
pub use effects::grid::{GridConfig, RetroGrid, Ring};
pub use effects::particles::{
    Expiry, FieldConfig, Opacity, Particle, ParticleField, ResizePolicy,
};
pub use foundation::color::Color;
pub use foundation::core::{Point, Rect, SurfaceSize, Vec2};
pub use foundation::error::{BackdropError, BackdropResult};
pub use host::headless::{HeadlessHost, SchedulerStats};
pub use host::scheduler::{
    FrameScheduler, FrameToken, Host, HostEvent, ListenerId, ResizeEvents,
};
pub use mount::{FieldHandle, create, create_grid};
pub use render::FrameRGBA;
pub use render::context::{DrawContext, RenderTarget};
pub use render::cpu::{CpuCanvas, CpuTarget};
pub use render::recording::{DrawCmd, Recorder, RecordingTarget};
