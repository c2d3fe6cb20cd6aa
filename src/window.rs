// ============================================================================
// WINDOW HOST
// ============================================================================

use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;
use std::time::Instant;

use bon::Builder;
use pixels::{Pixels, SurfaceTexture};
use rusttype::Font;
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::config::Color;
use crate::error::{Error, Result};
use crate::raster::Canvas;
use crate::{StatesView, ViewCommand};

#[derive(Debug, Clone, Builder)]
pub struct WindowOptions {
    #[builder(default = "States".to_string())]
    pub title: String,
    #[builder(default = 300)]
    pub width: u32,
    #[builder(default = 300)]
    pub height: u32,
    #[builder(default = 60.0)]
    pub max_framerate: f64,
    #[builder(default = Color::WHITE)]
    pub background: Color,
    /// TrueType/OpenType font for the center label.
    pub font_path: Option<PathBuf>,
}

pub fn load_font(path: &Path) -> Result<Font<'static>> {
    let bytes = std::fs::read(path).map_err(|err| Error::Font {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    Font::try_from_vec(bytes).ok_or_else(|| Error::Font {
        path: path.to_path_buf(),
        reason: "not a TrueType or OpenType font".to_string(),
    })
}

/// Open a window and drive `view` until it is closed.
///
/// `make_view` receives the window's scale factor so density-dependent
/// style values can be resolved for the actual display. Data arrives through
/// `commands` and is applied on the event loop thread.
pub fn run(
    options: WindowOptions,
    commands: Option<Receiver<ViewCommand>>,
    make_view: impl FnOnce(f64) -> Result<StatesView>,
) -> Result<()> {
    let font = options.font_path.as_deref().map(load_font).transpose()?;
    if font.is_none() {
        tracing::warn!("no font configured, the percentage label will not be drawn");
    }

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(&options.title)
        .with_inner_size(LogicalSize::new(
            f64::from(options.width),
            f64::from(options.height),
        ))
        .build(&event_loop)?;
    let window = std::sync::Arc::new(window);

    let mut view = make_view(window.scale_factor())?;
    let size = window.inner_size();
    view.on_size_changed(size.width, size.height);
    tracing::info!(
        width = size.width,
        height = size.height,
        scale_factor = window.scale_factor(),
        mode = ?view.style().animation,
        "window opened"
    );

    let window_clone = window.clone();
    let mut fb_width = size.width as usize;
    let mut fb_height = size.height as usize;
    let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
    let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

    let frame_duration = std::time::Duration::from_secs_f64(1.0 / options.max_framerate);
    let mut last_frame = Instant::now();
    let background = options.background;

    event_loop.run(move |event, window_target| {
        window_target.set_control_flow(ControlFlow::Poll);
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if new_size.width == 0 || new_size.height == 0 {
                        return;
                    }
                    fb_width = new_size.width as usize;
                    fb_height = new_size.height as usize;
                    if let Err(err) = pixels.resize_buffer(new_size.width, new_size.height) {
                        tracing::warn!(%err, "failed to resize pixel buffer");
                    }
                    if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                        tracing::warn!(%err, "failed to resize surface");
                    }
                    view.on_size_changed(new_size.width, new_size.height);
                    window_clone.request_redraw();
                }
                WindowEvent::RedrawRequested => {
                    let scene = view.draw();
                    let mut canvas = Canvas::new(pixels.frame_mut(), fb_width, fb_height);
                    scene.render(&mut canvas, font.as_ref(), background);
                    if let Err(err) = pixels.render() {
                        tracing::error!(%err, "render failed");
                        window_target.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                if let Some(ref receiver) = commands {
                    while let Ok(command) = receiver.try_recv() {
                        match command {
                            ViewCommand::SetData(dataset) => {
                                view.set_dataset(dataset);
                                // New generation starts its clock now.
                                last_frame = Instant::now();
                                window_clone.request_redraw();
                            }
                        }
                    }
                }

                let elapsed = last_frame.elapsed();
                if elapsed >= frame_duration {
                    last_frame = Instant::now();
                    // winit coalesces requests, so one per batch of ticks is enough.
                    if !view.advance(elapsed).is_empty() {
                        window_clone.request_redraw();
                    }
                }
            }
            _ => {}
        }
    })?;

    Ok(())
}
