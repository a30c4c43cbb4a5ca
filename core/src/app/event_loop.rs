//! Application event loop
//!
//! Owns the winit event loop and drives the fixed per-frame sequence:
//! gamepad pump, `poll_events`, clock update, `update`, device refresh,
//! haptics, cursor flag, then `begin_frame` / `render` / `end_frame`.

use std::sync::Arc;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Fullscreen, Window, WindowId},
};

#[cfg(feature = "gamepad")]
use crate::input::GamepadBackend;
use crate::input::DeviceManager;
use crate::render::Renderer;

use super::config::ProjectSettings;
use super::context::Context;
use super::App;

/// Wheel pixel deltas (touchpads, high-resolution wheels) are folded into
/// line units at this many pixels per line.
const PIXELS_PER_LINE: f32 = 16.0;

/// winit handler wrapping a user [`App`]. The [`Context`] is created once
/// the window exists; events arriving before that are dropped.
struct EngineHandler<A: App> {
    settings: ProjectSettings,
    app: A,
    ctx: Option<Context>,
    #[cfg(feature = "gamepad")]
    backend: Option<GamepadBackend>,
}

impl<A: App> EngineHandler<A> {
    fn new(settings: ProjectSettings, app: A) -> Self {
        Self {
            settings,
            app,
            ctx: None,
            #[cfg(feature = "gamepad")]
            backend: None,
        }
    }
}

impl<A: App> ApplicationHandler for EngineHandler<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.ctx.is_some() {
            return;
        }

        let mut attributes = Window::default_attributes()
            .with_title(self.settings.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.settings.window.width,
                self.settings.window.height,
            ))
            .with_resizable(self.settings.window.resizable);
        if self.settings.window.fullscreen {
            attributes = attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match Renderer::new(window.clone(), &self.settings.renderer) {
            Ok(renderer) => renderer,
            Err(e) => {
                tracing::error!("Failed to initialize renderer: {}", e);
                event_loop.exit();
                return;
            }
        };

        let devices = DeviceManager::new(self.settings.input);
        let mut ctx = Context::new(window, renderer, devices);

        #[cfg(feature = "gamepad")]
        {
            self.backend = Some(GamepadBackend::new(&mut ctx.devices));
        }

        if let Err(e) = self.app.load(&mut ctx) {
            tracing::error!("Failed to load application: {}", e);
            event_loop.exit();
            return;
        }

        self.ctx = Some(ctx);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(ctx) = &mut self.ctx else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                ctx.renderer.resize(size.width, size.height);
            }
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if let PhysicalKey::Code(code) = key_event.physical_key {
                    ctx.devices
                        .handle_key_event(code, key_event.state.is_pressed());
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                ctx.devices
                    .handle_cursor_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::MouseInput { state, button, .. } => {
                ctx.devices.handle_mouse_button(button, state.is_pressed());
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(x, y) => Vec2::new(x, y),
                    MouseScrollDelta::PixelDelta(pos) => {
                        Vec2::new(pos.x as f32, pos.y as f32) / PIXELS_PER_LINE
                    }
                };
                ctx.devices.handle_wheel_event(delta);
            }
            WindowEvent::RedrawRequested => {
                #[cfg(feature = "gamepad")]
                if let Some(backend) = &mut self.backend {
                    backend.pump(&mut ctx.devices);
                }

                self.app.poll_events(ctx);

                ctx.time.update();
                let delta = ctx.time.delta();
                self.app.update(ctx, delta);

                ctx.devices.update();

                #[cfg(feature = "gamepad")]
                if let Some(backend) = &mut self.backend {
                    backend.service_haptics(&mut ctx.devices);
                }

                ctx.window
                    .set_cursor_visible(ctx.devices.mouse().cursor_visible());

                ctx.renderer.begin_frame();
                self.app.render(ctx);
                ctx.renderer.end_frame();

                if ctx.exit_requested {
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Poll);
        if let Some(ctx) = &self.ctx {
            ctx.window.request_redraw();
        }
    }
}

/// Run an application with the given settings. Blocks until the window
/// closes or the application requests exit.
pub fn run(settings: ProjectSettings, app: impl App) -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;

    let mut handler = EngineHandler::new(settings, app);
    event_loop.run_app(&mut handler)?;

    Ok(())
}
