use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{CursorGrabMode, Window, WindowId};

use crate::batch::GpuBatch;
use crate::camera::Camera;
use crate::config::ViewerConfig;
use crate::controls::{Command, Controls};
use crate::error::{Result, ViewerError};
use crate::gpu::GpuContext;
use crate::model::Model;
use crate::player::Player;
use crate::render::{FrameStatus, ScenePass};
use crate::texture::TextureLoader;

/// Open a window and show `model` until the user quits.
///
/// The mouse is captured for looking around; Escape or closing the window
/// ends the loop.
///
/// # Example
/// ```no_run
/// let model = blockview::Model::grass_cube()?;
/// blockview::run(blockview::ViewerConfig::new().title("Grass"), model)?;
/// # Ok::<(), blockview::ViewerError>(())
/// ```
pub fn run(config: ViewerConfig, model: Model) -> Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ViewerApp::Pending { config, model };
    event_loop.run_app(&mut app)?;

    match app {
        ViewerApp::Exited(Some(err)) => Err(err),
        _ => Ok(()),
    }
}

enum ViewerApp {
    Pending { config: ViewerConfig, model: Model },
    Running(Box<Running>),
    Exited(Option<ViewerError>),
}

struct Running {
    window: Arc<Window>,
    gpu: GpuContext,
    pass: ScenePass,
    batch: GpuBatch,
    player: Player,
    controls: Controls,
    config: ViewerConfig,
    last_frame: Instant,
}

impl Running {
    fn start(event_loop: &ActiveEventLoop, config: ViewerConfig, model: Model) -> Result<Self> {
        let window_attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height))
            .with_resizable(config.resizable);

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu = GpuContext::new(window.clone())?;

        let textures = TextureLoader::new(&config.asset_root)
            .procedural(config.procedural)
            .load_all(&gpu, model.texture_files())?;

        let pass = ScenePass::new(&gpu);
        let batch = model.batch.upload(&gpu, &pass, &textures);

        capture_cursor(&window);

        tracing::info!(
            title = %config.title,
            quads = model.batch.quad_count(),
            textures = textures.len(),
            "viewer ready"
        );

        Ok(Self {
            window,
            gpu,
            pass,
            batch,
            player: Player::new(),
            controls: Controls::new(config.bindings.clone()),
            config,
            last_frame: Instant::now(),
        })
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.player.update(dt);

        let camera = Camera::from_player(&self.player).with_projection(self.config.projection);
        if self.pass.render(&self.gpu, &camera, &self.batch, self.config.clear_color())
            == FrameStatus::Skipped
        {
            tracing::trace!("frame skipped");
        }
    }

    fn key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };

        match self.controls.key_event(code, event.state, event.repeat) {
            Some(Command::Quit) => {
                tracing::info!("escape pressed, closing");
                event_loop.exit();
            }
            Some(Command::Press(movement)) => self.player.press(movement),
            Some(Command::Release(movement)) => self.player.release(movement),
            None => {}
        }
    }
}

/// Lock the pointer to the window and hide it.
fn capture_cursor(window: &Window) {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    if let Err(err) = grabbed {
        tracing::warn!(%err, "could not capture the mouse");
    }
    window.set_cursor_visible(false);
}

/// Convert raw mouse motion to a look delta.
///
/// Raw motion is positive downward; [`Player::mouse_motion`] wants up
/// positive.
fn look_delta((dx, dy): (f64, f64)) -> (f32, f32) {
    (dx as f32, -dy as f32)
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !matches!(self, ViewerApp::Pending { .. }) {
            return;
        }
        let ViewerApp::Pending { config, model } = std::mem::replace(self, ViewerApp::Exited(None))
        else {
            return;
        };

        match Running::start(event_loop, config, model) {
            Ok(running) => *self = ViewerApp::Running(Box::new(running)),
            Err(err) => {
                tracing::error!(%err, "failed to start viewer");
                *self = ViewerApp::Exited(Some(err));
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let ViewerApp::Running(running) = self else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                running.gpu.resize(size.width, size.height);
            }
            WindowEvent::Focused(true) => {
                capture_cursor(&running.window);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                running.key(event_loop, &event);
            }
            WindowEvent::RedrawRequested => {
                running.redraw();
            }
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        let ViewerApp::Running(running) = self else {
            return;
        };

        if let DeviceEvent::MouseMotion { delta } = event {
            let (dx, dy) = look_delta(delta);
            running.player.mouse_motion(dx, dy);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let ViewerApp::Running(running) = self {
            running.window.request_redraw();
        }
    }
}
