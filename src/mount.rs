use crate::{
    effects::{
        Effect,
        grid::{GridConfig, RetroGrid},
        particles::{FieldConfig, ParticleField},
    },
    foundation::{
        core::SurfaceSize,
        error::{BackdropError, BackdropResult},
    },
    host::scheduler::{FrameToken, Host, HostEvent, ListenerId},
    render::context::RenderTarget,
};

/// Host registrations owned by a mounted effect.
#[derive(Debug, Default)]
struct Registration {
    frame: Option<FrameToken>,
    listener: Option<ListenerId>,
}

impl Drop for Registration {
    fn drop(&mut self) {
        if self.frame.is_some() || self.listener.is_some() {
            tracing::warn!(
                frame = ?self.frame,
                listener = ?self.listener,
                "mounted effect dropped without destroy(); host callbacks leak"
            );
        }
    }
}

/// An effect mounted on a render target and wired to a host.
///
/// The handle owns at most one pending frame request: every accepted frame draws one tick and
/// requests the next, so frames are strictly sequential. [`FieldHandle::destroy`] must be called
/// before the handle goes away to cancel that request and remove the resize listener.
#[must_use = "a mounted effect keeps host callbacks alive until `destroy` is called"]
#[derive(Debug)]
pub struct FieldHandle<E: Effect, T: RenderTarget> {
    effect: E,
    target: T,
    registration: Registration,
    frames: u64,
}

/// Mount a [`ParticleField`] on `target`.
///
/// A missing target, or one without a 2D context, aborts silently: nothing is registered with
/// the host and `None` is returned.
pub fn create<T, H>(
    config: FieldConfig,
    target: Option<T>,
    host: &mut H,
) -> Option<FieldHandle<ParticleField, T>>
where
    T: RenderTarget,
    H: Host + ?Sized,
{
    mount_or_abort(FieldHandle::try_mount(target, host, |size| {
        ParticleField::new(config, size)
    }))
}

/// Mount a [`RetroGrid`] on `target`, with the same silent abort as [`create`].
pub fn create_grid<T, H>(
    config: GridConfig,
    target: Option<T>,
    host: &mut H,
) -> Option<FieldHandle<RetroGrid, T>>
where
    T: RenderTarget,
    H: Host + ?Sized,
{
    mount_or_abort(FieldHandle::try_mount(target, host, |size| {
        RetroGrid::new(config, size)
    }))
}

fn mount_or_abort<E: Effect, T: RenderTarget>(
    mounted: BackdropResult<FieldHandle<E, T>>,
) -> Option<FieldHandle<E, T>> {
    match mounted {
        Ok(handle) => Some(handle),
        Err(err) => {
            tracing::debug!(%err, "effect not mounted");
            None
        }
    }
}

impl<E: Effect, T: RenderTarget> FieldHandle<E, T> {
    /// Build the effect at the target's size, register a resize listener and request the
    /// first frame.
    ///
    /// Fails with [`BackdropError::MissingSurface`] when there is no target or it has no 2D
    /// context; the host is left untouched in that case.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn try_mount<H: Host + ?Sized>(
        target: Option<T>,
        host: &mut H,
        build: impl FnOnce(SurfaceSize) -> E,
    ) -> BackdropResult<Self> {
        let Some(mut target) = target else {
            return Err(BackdropError::missing_surface("no target surface"));
        };
        if target.context_2d().is_none() {
            return Err(BackdropError::missing_surface(
                "target surface has no 2D context",
            ));
        }

        let effect = build(target.size());
        let registration = Registration {
            listener: Some(host.add_resize_listener()),
            frame: Some(host.request_frame()),
        };
        tracing::debug!(effect = effect.name(), size = %target.size(), "effect mounted");

        Ok(Self {
            effect,
            target,
            registration,
            frames: 0,
        })
    }

    /// Run the frame callback for `token`.
    ///
    /// Returns `Ok(true)` when a tick was drawn and the next frame requested. Tokens other than
    /// the pending one (already cancelled or superseded) are ignored with `Ok(false)`. A target
    /// that lost its context stops the loop. If presenting fails the error is returned and no
    /// further frame is requested.
    pub fn on_frame<H: Host + ?Sized>(
        &mut self,
        token: FrameToken,
        host: &mut H,
    ) -> BackdropResult<bool> {
        if self.registration.frame != Some(token) {
            tracing::trace!(?token, "ignoring stale frame token");
            return Ok(false);
        }
        self.registration.frame = None;

        let Some(ctx) = self.target.context_2d() else {
            tracing::debug!(
                effect = self.effect.name(),
                "target lost its 2D context; animation stopped"
            );
            return Ok(false);
        };
        self.effect.tick(ctx);
        self.target.present()?;
        self.frames += 1;

        self.registration.frame = Some(host.request_frame());
        tracing::trace!(effect = self.effect.name(), frame = self.frames, "tick");
        Ok(true)
    }

    /// Apply a container resize to the target and the effect.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn on_resize(&mut self, size: SurfaceSize) -> BackdropResult<()> {
        self.target.set_size(size)?;
        self.effect.resize(size);
        Ok(())
    }

    /// Dispatch a host signal. Returns whether a frame was drawn.
    pub fn handle_event<H: Host + ?Sized>(
        &mut self,
        event: HostEvent,
        host: &mut H,
    ) -> BackdropResult<bool> {
        match event {
            HostEvent::Frame(token) => self.on_frame(token, host),
            HostEvent::Resize(size) => self.on_resize(size).map(|()| false),
        }
    }

    /// Cancel the pending frame, remove the resize listener and hand the target back.
    pub fn destroy<H: Host + ?Sized>(self, host: &mut H) -> T {
        let Self {
            effect,
            target,
            mut registration,
            frames,
        } = self;

        if let Some(token) = registration.frame.take() {
            host.cancel_frame(token);
        }
        if let Some(id) = registration.listener.take() {
            host.remove_resize_listener(id);
        }
        tracing::debug!(effect = effect.name(), frames, "effect destroyed");
        target
    }

    /// The mounted effect.
    pub fn effect(&self) -> &E {
        &self.effect
    }

    /// The render target.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Frames drawn so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// The frame request currently outstanding, if the loop is running.
    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.registration.frame
    }

    /// The resize listener registered at mount.
    pub fn resize_listener(&self) -> Option<ListenerId> {
        self.registration.listener
    }
}
