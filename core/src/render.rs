//! wgpu renderer: surface ownership, clear, and frame presentation.
//!
//! The engine clears at `begin_frame` and presents at `end_frame`;
//! applications draw in between by recording their own passes against
//! [`Renderer::device`], [`Renderer::queue`], and [`Renderer::frame_view`]
//! with `LoadOp::Load`.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use winit::window::Window;

use crate::app::config::{BackendPreference, RendererConfig, VsyncMode};
use crate::color::Color;

struct Frame {
    surface_texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
}

pub struct Renderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    clear_color: Color,
    current_frame: Option<Frame>,
}

impl Renderer {
    /// Create a renderer for the given window.
    pub fn new(window: Arc<Window>, config: &RendererConfig) -> Result<Self> {
        let backends = match config.backend {
            BackendPreference::Auto => wgpu::Backends::all(),
            BackendPreference::Vulkan => wgpu::Backends::VULKAN,
            BackendPreference::Metal => wgpu::Backends::METAL,
            BackendPreference::Dx12 => wgpu::Backends::DX12,
            BackendPreference::Gl => wgpu::Backends::GL,
        };

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("Failed to find suitable GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("Talvi Device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: wgpu::MemoryHints::Performance,
            experimental_features: Default::default(),
            trace: wgpu::Trace::Off,
        }))
        .context("Failed to create GPU device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let present_mode = match config.vsync {
            VsyncMode::Enabled => wgpu::PresentMode::AutoVsync,
            VsyncMode::Disabled => wgpu::PresentMode::AutoNoVsync,
        };

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &surface_config);

        tracing::info!(
            "Renderer initialized: {}x{}, format: {:?}, present mode: {:?}",
            surface_config.width,
            surface_config.height,
            surface_format,
            present_mode
        );

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            clear_color: Color::BLACK,
            current_frame: None,
        })
    }

    /// Get the wgpu device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Get the wgpu queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Get the surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }

    /// Get the current surface width.
    pub fn width(&self) -> u32 {
        self.surface_config.width
    }

    /// Get the current surface height.
    pub fn height(&self) -> u32 {
        self.surface_config.height
    }

    /// Background color for the clear pass. Takes effect next frame.
    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Resize the surface.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.surface_config.width = width;
            self.surface_config.height = height;
            self.surface.configure(&self.device, &self.surface_config);
            tracing::debug!("Surface resized to {}x{}", width, height);
        }
    }

    /// Acquire the next surface texture and clear it. A lost or outdated
    /// surface is reconfigured and retried once; other acquire failures
    /// skip the frame (`end_frame` then presents nothing).
    pub fn begin_frame(&mut self) {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.surface_config);
                match self.surface.get_current_texture() {
                    Ok(frame) => frame,
                    Err(e) => {
                        tracing::error!("Failed to acquire frame after reconfigure: {:?}", e);
                        return;
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Failed to get surface texture: {}", e);
                return;
            }
        };

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Clear Encoder"),
            });

        {
            let _render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        self.current_frame = Some(Frame {
            surface_texture,
            view,
        });
    }

    /// View of the frame acquired by `begin_frame`, for application render
    /// passes. `None` outside a frame or when the acquire failed.
    pub fn frame_view(&self) -> Option<&wgpu::TextureView> {
        self.current_frame.as_ref().map(|frame| &frame.view)
    }

    /// Present the frame acquired by `begin_frame`. No-op when the
    /// acquire failed.
    pub fn end_frame(&mut self) {
        if let Some(frame) = self.current_frame.take() {
            frame.surface_texture.present();
        }
    }
}
