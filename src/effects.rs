pub(crate) mod grid;
pub(crate) mod particles;

use crate::{foundation::core::SurfaceSize, render::context::DrawContext};

/// A decorative animation advanced one display frame at a time.
///
/// Implementations own all of their state; the mounted handle only forwards host signals.
pub trait Effect {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Surface dimensions the effect currently simulates against.
    fn surface_size(&self) -> SurfaceSize;

    /// React to a new surface size.
    fn resize(&mut self, size: SurfaceSize);

    /// One clear-update-draw pass.
    fn tick(&mut self, ctx: &mut dyn DrawContext);
}
