//! Window, event loop and frame callback.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

#[cfg(feature = "egui")]
use crate::gpu::egui_integration::EguiIntegration;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::gpu::Display;
use crate::input::Command;
use crate::simulation::Simulation;
use crate::time::FrameClock;

/// Seconds between debug log lines with population statistics.
const STATS_INTERVAL: f32 = 1.0;

/// Open a window and run the emitter until it is closed.
pub fn run(config: AppConfig) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct App {
    title: String,
    initial_size: (u32, u32),
    sim: Simulation,
    clock: FrameClock,
    window: Option<Arc<Window>>,
    display: Option<Display>,
    #[cfg(feature = "egui")]
    egui: Option<EguiIntegration>,
    stats_elapsed: f32,
    error: Option<AppError>,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let initial_size = (config.width, config.height);
        Self {
            title: format!("swirlfx {}", env!("CARGO_PKG_VERSION")),
            initial_size,
            sim: Simulation::new(config),
            clock: FrameClock::new(),
            window: None,
            display: None,
            #[cfg(feature = "egui")]
            egui: None,
            stats_elapsed: 0.0,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let (width, height) = self.initial_size;
        let window_attrs = Window::default_attributes()
            .with_title(self.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let display = pollster::block_on(Display::new(window.clone()))?;

        let size = window.inner_size();
        self.sim.resize(size.width, size.height);

        #[cfg(feature = "egui")]
        {
            self.egui = Some(EguiIntegration::new(&display.device, display.format(), &window));
        }

        self.window = Some(window);
        self.display = Some(display);
        self.clock = FrameClock::new();
        Ok(())
    }

    fn handle(&mut self, command: Command, event_loop: &ActiveEventLoop) {
        match command {
            Command::ClearScreen => self.sim.clear_screen(),
            Command::Reset => self.sim.reset(),
            Command::TogglePause => {
                self.clock.toggle_pause();
                tracing::info!(paused = self.clock.is_paused(), "pause toggled");
            }
            Command::Snapshot => {
                if let Err(err) = self.sim.snapshot() {
                    tracing::warn!(%err, "snapshot failed");
                }
            }
            Command::Quit => event_loop.exit(),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let dt = self.clock.tick();
        if !self.clock.is_paused() {
            self.sim.frame(dt);
        }

        self.stats_elapsed += dt;
        if self.stats_elapsed >= STATS_INTERVAL {
            self.stats_elapsed = 0.0;
            tracing::debug!(
                live = self.sim.population().live(),
                fps = self.clock.fps(),
                frame = self.clock.frame(),
                "population"
            );
        }

        #[cfg(feature = "egui")]
        let panel_output = self.run_panel();

        let Some(display) = &mut self.display else {
            return;
        };

        display.upload(self.sim.buffer());

        #[cfg(feature = "egui")]
        let result = match (&mut self.egui, &panel_output) {
            (Some(egui), Some(output)) => {
                let size = [display.config.width, display.config.height];
                display.render_with(|device, queue, encoder, view| {
                    egui.paint(device, queue, encoder, view, size, output);
                })
            }
            _ => display.render(),
        };
        #[cfg(not(feature = "egui"))]
        let result = display.render();

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::warn!("surface lost, reconfiguring");
                display.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                tracing::error!("out of GPU memory");
                event_loop.exit();
            }
            Err(err) => tracing::warn!(?err, "render error"),
        }
    }

    #[cfg(feature = "egui")]
    fn run_panel(&mut self) -> Option<crate::gpu::egui_integration::EguiFrameOutput> {
        use crate::panel::{self, PanelStats};

        let window = self.window.as_ref()?;
        let egui = self.egui.as_mut()?;

        let stats = PanelStats {
            live: self.sim.population().live(),
            fps: self.clock.fps(),
        };
        let mut actions = panel::PanelActions::default();
        let mut born_count = self.sim.population().birth_accumulator();
        let (params, style) = self.sim.controls_mut();
        let output = egui.run(window, |ctx| {
            actions = panel::show(ctx, params, style, &mut born_count, &stats);
        });

        if actions.born_count_changed {
            self.sim.set_birth_accumulator(born_count);
        }
        if actions.clear {
            self.sim.clear_screen();
        }
        if actions.reset {
            self.sim.reset();
        }
        Some(output)
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            tracing::error!(%err, "failed to start");
            self.error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        #[cfg(feature = "egui")]
        if let (Some(egui), Some(window)) = (&mut self.egui, &self.window) {
            if egui.on_window_event(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(display) = &mut self.display {
                    display.resize(physical_size);
                }
                if physical_size.width > 0 && physical_size.height > 0 {
                    self.sim.resize(physical_size.width, physical_size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(command) = Command::from_event(&event) {
                    self.handle(command, event_loop);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
