use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use pixel_wave::config::BACKGROUND;
use pixel_wave::{
    EngineConfig, FrameHandle, FrameOutcome, FrameScheduler, PixelEngine, RasterSurface,
    ResizeSource,
};

use crate::error::AppError;
use crate::gpu::{BlitPipeline, FrameTexture, GpuContext};

/// Frame callbacks backed by `Window::request_redraw`.
///
/// winit cannot withdraw a redraw request, so cancelling only disarms the
/// handle and the next `RedrawRequested` is ignored.
pub struct WindowScheduler {
    window: Arc<Window>,
    next_id: u64,
    armed: Option<FrameHandle>,
}

impl WindowScheduler {
    fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            next_id: 0,
            armed: None,
        }
    }

    /// Consume the armed frame, if any
    fn fire(&mut self) -> bool {
        self.armed.take().is_some()
    }
}

impl FrameScheduler for WindowScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id = self.next_id.wrapping_add(1);
        let handle = FrameHandle::new(self.next_id);
        self.armed = Some(handle);
        self.window.request_redraw();
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.armed == Some(handle) {
            self.armed = None;
        }
    }
}

/// The window's client area as the engine's container.
/// winit always delivers `Resized`; `connected` decides whether we forward it.
struct WindowSize {
    window: Arc<Window>,
    connected: bool,
}

impl ResizeSource for WindowSize {
    fn observe(&mut self) -> (f64, f64) {
        self.connected = true;
        let size = self.window.inner_size();
        (f64::from(size.width), f64::from(size.height))
    }

    fn disconnect(&mut self) {
        self.connected = false;
    }
}

type WindowEngine = PixelEngine<RasterSurface, WindowScheduler>;

/// Application state
pub struct App {
    config: EngineConfig,
    initial_size: (u32, u32),
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    blit: Option<BlitPipeline>,
    frame: Option<FrameTexture>,
    engine: Option<WindowEngine>,
    size_source: Option<WindowSize>,
    fps_counter: FpsCounter,
    error: Option<AppError>,
}

impl App {
    pub fn new(config: EngineConfig, initial_size: (u32, u32)) -> Self {
        Self {
            config,
            initial_size,
            window: None,
            gpu: None,
            blit: None,
            frame: None,
            engine: None,
            size_source: None,
            fps_counter: FpsCounter::new(),
            error: None,
        }
    }

    /// Error that ended the event loop, if any
    pub fn take_error(&mut self) -> Option<AppError> {
        self.error.take()
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        log::info!("Initializing pixel wave...");

        let (width, height) = self.initial_size;
        let window_attrs = Window::default_attributes()
            .with_title("Pixel Wave")
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        log::info!("Creating GPU context...");
        let gpu = pollster::block_on(GpuContext::new(window.clone()))?;
        let blit = BlitPipeline::new(&gpu.device, gpu.format());

        let mut engine = PixelEngine::with_surface(
            self.config.clone(),
            RasterSurface::default(),
            WindowScheduler::new(window.clone()),
        );
        let mut size_source = WindowSize {
            window: window.clone(),
            connected: false,
        };
        engine.start(&mut size_source);
        log::info!("Grid cells: {}", engine.pixels().len());

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.blit = Some(blit);
        self.engine = Some(engine);
        self.size_source = Some(size_source);
        Ok(())
    }

    fn teardown(&mut self) {
        if let (Some(engine), Some(source)) = (self.engine.as_mut(), self.size_source.as_mut()) {
            engine.stop(source);
        }
        self.frame = None;
    }

    fn handle_resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        log::info!("Window resized to {}x{}", new_size.width, new_size.height);
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(new_size);
        }
        if !self.size_source.as_ref().is_some_and(|s| s.connected) {
            return;
        }
        if let Some(engine) = self.engine.as_mut() {
            engine.handle_resize(f64::from(new_size.width), f64::from(new_size.height));
        }
    }

    fn redraw(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if !engine.scheduler_mut().fire() {
            return;
        }

        // tick re-arms request_redraw even when throttled, so the loop keeps
        // spinning at the display rate and only renders at the target fps
        if let FrameOutcome::Rendered { .. } = engine.tick(Instant::now()) {
            self.present();
        }
    }

    /// Upload the raster and blit it to the window
    fn present(&mut self) {
        let (Some(gpu), Some(blit), Some(engine)) =
            (self.gpu.as_ref(), self.blit.as_ref(), self.engine.as_ref())
        else {
            return;
        };
        let Some(raster) = engine.surface() else {
            return;
        };
        if !gpu.is_configured() {
            return;
        }

        if !self.frame.as_ref().is_some_and(|f| f.matches(raster)) {
            self.frame = FrameTexture::new(
                &gpu.device,
                &gpu.queue,
                raster.width(),
                raster.height(),
                BACKGROUND,
            );
        }
        let Some(frame) = self.frame.as_ref() else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.reconfigure();
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };

        frame.upload(&gpu.queue, raster);

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });
        let bind_group = blit.create_bind_group(&gpu.device, frame);
        blit.draw(&mut encoder, &view, &bind_group);

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        if let Some(fps) = self.fps_counter.tick() {
            if let Some(window) = &self.window {
                window.set_title(&format!(
                    "Pixel Wave - {:.0} FPS - {} cells",
                    fps,
                    engine.pixels().len()
                ));
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init(event_loop) {
            log::error!("Initialization failed: {}", e);
            self.error = Some(e);
            event_loop.exit();
            return;
        }
        log::info!("Initialization complete! Press Escape to quit");
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                self.teardown();
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed()
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    log::info!("Escape pressed, exiting...");
                    self.teardown();
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(new_size) => self.handle_resize(new_size),
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.teardown();
    }
}

/// Simple FPS counter
struct FpsCounter {
    last_update: Instant,
    frame_count: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last_update: Instant::now(),
            frame_count: 0,
        }
    }

    /// Tick the counter, returns Some(fps) every second
    fn tick(&mut self) -> Option<f64> {
        self.frame_count += 1;
        let elapsed = self.last_update.elapsed();

        if elapsed.as_secs_f64() >= 1.0 {
            let fps = self.frame_count as f64 / elapsed.as_secs_f64();
            self.frame_count = 0;
            self.last_update = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}
