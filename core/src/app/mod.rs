//! Application framework: settings, the [`App`] trait, and the run loop.

pub mod config;
pub mod context;
pub mod event_loop;

pub use config::{
    BackendPreference, ConfigError, ProjectSettings, RendererConfig, VsyncMode, WindowConfig,
};
pub use context::Context;
pub use event_loop::run;

/// Application callbacks, invoked by [`run`].
///
/// Every method has an empty default so applications only implement what
/// they use. `load` runs once after the window and renderer exist; the
/// rest run once per frame, in declaration order.
pub trait App {
    /// One-time setup: bind actions, set the clear color, load assets.
    /// Returning an error aborts the run.
    fn load(&mut self, _ctx: &mut Context) -> anyhow::Result<()> {
        Ok(())
    }

    /// Runs before the clock advances, for work that must see the frame's
    /// raw events first.
    fn poll_events(&mut self, _ctx: &mut Context) {}

    /// Per-frame logic. `delta` is the seconds elapsed since the previous
    /// frame.
    fn update(&mut self, _ctx: &mut Context, _delta: f32) {}

    /// Record draw commands for the frame already cleared by the
    /// renderer.
    fn render(&mut self, _ctx: &mut Context) {}
}
