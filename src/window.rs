// ============================================================================
// WINDOW HOST
// ============================================================================

use log::{debug, error, warn};
use pixels::{Pixels, SurfaceTexture};
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::surface::Canvas;
use crate::{BarCommand, PassOutcome, ProgressBar};

/// When the loop should wake next to poll for commands. Never in the past,
/// so an idle bar waits a whole frame instead of spinning.
fn next_wake(last_frame: Instant, frame_duration: Duration, now: Instant) -> Instant {
    let next_frame = last_frame + frame_duration;
    if next_frame > now {
        next_frame
    } else {
        now + frame_duration
    }
}

pub(crate) fn run_window(
    bar: &mut ProgressBar,
    receiver: Option<Receiver<BarCommand>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let logical_width = bar.config().window_width;
    let logical_height = bar.config().window_height;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(&bar.config().title)
        .with_inner_size(LogicalSize::new(
            logical_width as f64,
            logical_height as f64,
        ))
        .build(&event_loop)?;

    let window = std::sync::Arc::new(window);

    let window_clone = window.clone();
    let size = window.inner_size();
    let mut fb_width = size.width as usize;
    let mut fb_height = size.height as usize;
    let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
    let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

    // Cloned so the canvas can borrow the font while the bar is borrowed mutably.
    let font_data = bar.config().font_data.clone();
    let frame_duration = Duration::from_secs_f64(1.0 / bar.config().max_framerate.max(1.0));
    let mut last_frame = Instant::now();
    bar.request_redraw();

    event_loop.run(move |event, window_target| {
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    fb_width = new_size.width as usize;
                    fb_height = new_size.height as usize;
                    if let Err(err) = pixels.resize_buffer(new_size.width, new_size.height) {
                        warn!("resizing frame buffer failed: {err}");
                    }
                    if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                        warn!("resizing surface failed: {err}");
                    }
                    bar.request_redraw();
                }
                WindowEvent::RedrawRequested => {
                    let background = bar.style().background_color;
                    let quality = bar.style().quality;

                    let frame = pixels.frame_mut();
                    let mut canvas = Canvas::new(frame, fb_width, fb_height)
                        .with_font(font_data.as_deref())
                        .with_quality(quality);
                    canvas.clear(background);
                    let outcome = bar.render(&mut canvas, fb_width as i32, fb_height as i32);
                    if outcome == PassOutcome::Faulted {
                        debug!("fault log now holds {} records", bar.faults().len());
                    }

                    if let Err(err) = pixels.render() {
                        error!("presenting frame failed: {err}");
                        window_target.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                if let Some(ref receiver) = receiver {
                    for command in receiver.try_iter() {
                        bar.apply(command);
                    }
                }
                if last_frame.elapsed() >= frame_duration && bar.take_redraw_request() {
                    window_clone.request_redraw();
                    last_frame = Instant::now();
                }
                let deadline = next_wake(last_frame, frame_duration, Instant::now());
                window_target.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
            _ => {}
        }
    })?;

    Ok(())
}
