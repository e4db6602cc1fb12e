use std::time::Instant;

use ocean_input::InputEvent;
use ocean_render::Backend;

/// Largest time step fed to a single update, in seconds.
pub const DEFAULT_MAX_STEP: f32 = 0.1;

/// Clamp a frame delta into `[0, max_step]`. Negative and non-finite deltas
/// become zero.
pub fn clamp_delta(dt: f32, max_step: f32) -> f32 {
    if !dt.is_finite() || dt < 0.0 {
        return 0.0;
    }
    dt.min(max_step)
}

/// Wall-clock frame timer.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    max_step: f32,
}

impl FrameClock {
    pub fn new(max_step: f32) -> Self {
        Self {
            last: None,
            max_step,
        }
    }

    pub fn max_step(&self) -> f32 {
        self.max_step
    }

    /// Delta since the previous tick, clamped. The first tick returns zero.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = match self.last {
            // A `now` earlier than the previous tick saturates to zero.
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => 0.0,
        };
        self.last = Some(now);
        clamp_delta(dt, self.max_step)
    }

    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Forget the previous tick so the next one returns zero.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STEP)
    }
}

/// Something the driver advances once per frame. [`Scene`](crate::Scene)
/// implements it; applications wrap a scene and forward.
pub trait FrameHandler {
    fn update(&mut self, dt: f32);

    fn render(&mut self, backend: &mut dyn Backend);

    fn handle_event(&mut self, _event: &InputEvent) {}

    /// Called once before the first frame.
    fn on_enter(&mut self, _backend: &mut dyn Backend) {}

    fn on_exit(&mut self) {}
}

/// Result of one driven frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// 1-based frame number.
    pub frame: u64,
    /// Clamped delta fed to `update`.
    pub dt: f32,
    /// Sum of all clamped deltas so far.
    pub elapsed: f64,
}

/// Owns the backend and frame bookkeeping; runs input, update, render.
pub struct FrameDriver<B: Backend> {
    backend: B,
    clock: FrameClock,
    frame: u64,
    elapsed: f64,
}

impl<B: Backend> FrameDriver<B> {
    pub fn new(backend: B, max_step: f32) -> Self {
        Self {
            backend,
            clock: FrameClock::new(max_step),
            frame: 0,
            elapsed: 0.0,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn enter<H: FrameHandler + ?Sized>(&mut self, handler: &mut H) {
        tracing::debug!("entering frame loop");
        handler.on_enter(&mut self.backend);
        self.clock.reset();
    }

    pub fn exit<H: FrameHandler + ?Sized>(&mut self, handler: &mut H) {
        handler.on_exit();
        tracing::debug!(frames = self.frame, elapsed = self.elapsed, "left frame loop");
    }

    /// Run one frame timed by the wall clock.
    pub fn run_frame<H: FrameHandler + ?Sized>(
        &mut self,
        handler: &mut H,
        events: &[InputEvent],
    ) -> FrameReport {
        let dt = self.clock.tick();
        self.advance(handler, dt, events)
    }

    /// Run one frame with an explicit delta, clamped like a measured one.
    pub fn step<H: FrameHandler + ?Sized>(
        &mut self,
        handler: &mut H,
        dt: f32,
        events: &[InputEvent],
    ) -> FrameReport {
        let dt = clamp_delta(dt, self.clock.max_step());
        self.advance(handler, dt, events)
    }

    fn advance<H: FrameHandler + ?Sized>(
        &mut self,
        handler: &mut H,
        dt: f32,
        events: &[InputEvent],
    ) -> FrameReport {
        self.frame += 1;
        let _span = tracing::info_span!("frame", frame = self.frame).entered();

        for event in events {
            handler.handle_event(event);
        }
        handler.update(dt);
        handler.render(&mut self.backend);

        self.elapsed += f64::from(dt);
        tracing::trace!(dt, events = events.len(), "frame complete");
        FrameReport {
            frame: self.frame,
            dt,
            elapsed: self.elapsed,
        }
    }
}
