// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod config;
pub mod error;
pub mod face;
pub mod font;
pub mod logging;
pub mod raster;
pub mod scene;
pub mod ticker;
pub mod transform;

// External crate imports
use bon::Builder;
use log::{error, info, trace};
use pixels::{Pixels, SurfaceTexture};
use rusttype::Font;

// Standard library imports
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoopBuilder};
use winit::window::WindowBuilder;

pub use config::{Color, FaceGeometry, Palette};
pub use error::ClockError;
pub use raster::Canvas;
pub use scene::{DrawCommand, Scene};
pub use ticker::{Ticker, TickerHandle};

// ============================================================================
// CLOCK STATE
// ============================================================================

/// Seconds counted since the widget started.
///
/// Minutes and hours are derived from the same counter by integer division;
/// they are not wall-clock values and nothing here looks at the system time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockState {
    elapsed_seconds: u64,
}

impl ClockState {
    pub const fn new() -> Self {
        Self { elapsed_seconds: 0 }
    }

    /// A counter seeded at `elapsed_seconds` instead of zero.
    pub const fn starting_at(elapsed_seconds: u64) -> Self {
        Self { elapsed_seconds }
    }

    /// Advances the counter by one second, wrapping at `u64::MAX`.
    pub fn tick(&mut self) {
        self.elapsed_seconds = self.elapsed_seconds.wrapping_add(1);
    }

    pub const fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub const fn minutes(&self) -> u64 {
        self.elapsed_seconds / 60
    }

    pub const fn hours(&self) -> u64 {
        self.minutes() / 60
    }

    pub fn hand_angles(&self) -> HandAngles {
        HandAngles::from_state(self)
    }
}

/// Hand rotations in whole degrees, normalized to `[0, 360)`, including the
/// +180° that turns a downward-modelled hand to point at 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandAngles {
    pub second: u16,
    pub minute: u16,
    pub hour: u16,
}

impl HandAngles {
    /// Second: `6·s + 180`, minute: `6·m + 180`, hour: `30·h + m/2 + 180`,
    /// all mod 360 and in integer arithmetic. Each counter is reduced by its
    /// period first so no product can overflow.
    pub fn from_state(state: &ClockState) -> Self {
        let seconds = state.elapsed_seconds();
        let minutes = state.minutes();
        let hours = state.hours();
        Self {
            second: ((6 * (seconds % 60) + 180) % 360) as u16,
            minute: ((6 * (minutes % 60) + 180) % 360) as u16,
            hour: ((30 * (hours % 12) + (minutes / 2) % 360 + 180) % 360) as u16,
        }
    }
}

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Events delivered to the window loop from other threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    Tick,
}

#[derive(Debug, Clone, Builder)]
pub struct ClockConfig {
    #[builder(default = "Analog Clock".to_string())]
    pub title: String,
    /// Side of the square window in logical pixels.
    #[builder(default = 600)]
    pub window_size: u32,
    #[builder(default = Duration::from_millis(1000))]
    pub tick_interval: Duration,
    /// Font for the numerals; system fallbacks are tried when unset.
    pub font_path: Option<PathBuf>,
    #[builder(default = 24.0)]
    pub numeral_font_size: f32,
    #[builder(default)]
    pub geometry: FaceGeometry,
    #[builder(default)]
    pub palette: Palette,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Main clock struct - the primary public interface
#[derive(Debug, Clone)]
pub struct AnalogClock {
    config: ClockConfig,
    state: ClockState,
}

impl AnalogClock {
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config,
            state: ClockState::new(),
        }
    }

    /// Seeds the counter, e.g. for previews of a particular hand position.
    pub fn starting_at(mut self, elapsed_seconds: u64) -> Self {
        self.state = ClockState::starting_at(elapsed_seconds);
        self
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn tick(&mut self) {
        self.state.tick();
        trace!("elapsed {}s", self.state.elapsed_seconds());
    }

    /// The face for the current state as a retained scene.
    pub fn scene(&self, width: usize, height: usize) -> Scene {
        face::build_face_scene(&self.state, &self.config, width, height)
    }

    /// Rasterizes the current face into an RGBA8 `frame`.
    pub fn render_frame(&self, frame: &mut [u8], width: usize, height: usize, font: Option<&Font>) {
        let scene = self.scene(width, height);
        let mut canvas = Canvas::new(frame, width, height);
        scene.render(&mut canvas, font);
    }

    /// Opens a window and runs the clock until the window is closed.
    ///
    /// The ticker thread only posts `ClockEvent::Tick`; the counter is
    /// incremented and the face redrawn on the event loop thread. A failed
    /// surface resize or present closes the window and is returned.
    pub fn show(&mut self) -> Result<(), ClockError> {
        let font = font::resolve_font(self.config.font_path.as_deref())?;

        let event_loop = EventLoopBuilder::<ClockEvent>::with_user_event().build()?;
        let side = self.config.window_size as f64;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(side, side))
            .build(&event_loop)?;
        let window = Arc::new(window);
        let window_clone = window.clone();

        let size = window.inner_size();
        let mut fb_width = size.width as usize;
        let mut fb_height = size.height as usize;
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;
        info!("window ready at {}x{} px", size.width, size.height);

        let proxy = event_loop.create_proxy();
        let mut ticker = Some(Ticker::new(self.config.tick_interval).start(move || {
            // Fails only once the loop is gone, and then the ticker is next.
            let _ = proxy.send_event(ClockEvent::Tick);
        })?);

        // Surface failures end the loop; the first one is returned from here.
        let mut failure: Option<ClockError> = None;
        let failure_slot = &mut failure;
        let clock = self;
        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Wait);
            match event {
                Event::UserEvent(ClockEvent::Tick) => {
                    clock.tick();
                    window_clone.request_redraw();
                }
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        if let Some(ticker) = ticker.take() {
                            ticker.cancel();
                        }
                        info!(
                            "closing after {} elapsed seconds",
                            clock.state.elapsed_seconds()
                        );
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        if new_size.width == 0 || new_size.height == 0 {
                            return;
                        }
                        fb_width = new_size.width as usize;
                        fb_height = new_size.height as usize;
                        let resized = pixels
                            .resize_buffer(new_size.width, new_size.height)
                            .and_then(|_| pixels.resize_surface(new_size.width, new_size.height));
                        if let Err(err) = resized {
                            error!("resize to {}x{} failed: {err}", new_size.width, new_size.height);
                            failure_slot.get_or_insert(ClockError::from(err));
                            window_target.exit();
                            return;
                        }
                        window_clone.request_redraw();
                    }
                    WindowEvent::RedrawRequested => {
                        clock.render_frame(pixels.frame_mut(), fb_width, fb_height, Some(&font));
                        if let Err(err) = pixels.render() {
                            error!("render failed: {err}");
                            failure_slot.get_or_insert(ClockError::from(err));
                            window_target.exit();
                        }
                    }
                    _ => {}
                },
                Event::LoopExiting => {
                    if let Some(ticker) = ticker.take() {
                        ticker.cancel();
                    }
                }
                _ => {}
            }
        })?;

        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
