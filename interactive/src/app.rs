use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContextSurfaceAccessor,
    PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, WindowSurface};

use glutin_winit::DisplayBuilder;

use raw_window_handle::HasRawWindowHandle;

use std::ffi::{CStr, CString};
use std::num::NonZeroU32;
use std::path::Path;

use cgmath::Vector4;

use thiserror::Error;

use winit::dpi::{PhysicalPosition, PhysicalSize, Size};
use winit::event::{
    ElementState, Event, MouseButton, MouseScrollDelta, VirtualKeyCode, WindowEvent,
};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use deepimage::camera::OrbitCamera;
use deepimage::TriMesh;

use gl_wrapper::checkerboard::{CheckerBoard, CheckerBoardError};
use gl_wrapper::geometry::{GBError, Geometry};
use gl_wrapper::program::PBError;
use gl_wrapper::renderer::GlRenderer;
use gl_wrapper::shaders::{ShaderSet, ShaderSource};

use crate::scene::{Floor, GridOverrides, MeshKind, Scene};
use crate::scene_loader::SceneLoader;

const ROTATE_SPEED: f32 = 0.25;
const ZOOM_STEP: f32 = 0.9;

pub struct App {
    event_loop: EventLoop<()>,
    viewer: Viewer,
}

impl App {
    pub fn new(
        width: u32,
        height: u32,
        scene: Scene,
        shader_source: ShaderSource,
        overrides: GridOverrides,
    ) -> Result<Self, AppError> {
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(width, height)))
            .with_min_inner_size(Size::Physical(PhysicalSize::new(32, 32)))
            .with_title("DeepImage viewer");
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let template = ConfigTemplateBuilder::new().with_depth_size(24);

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |mut configs| {
                configs.next().expect("display offered no GL config")
            })
            .map_err(|e| AppError::Window(e.to_string()))?;

        let window = window.ok_or_else(|| AppError::Window("no window created".into()))?;

        let handle = Some(window.raw_window_handle());
        let gl_display = gl_config.display();

        let context_attr = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(4, 5))))
            .build(handle);

        let gl_window = GlWindow::new(window, &gl_config)?;

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attr)? }
            .make_current(&gl_window.surface)?;

        gl::load_with(|s| match CString::new(s) {
            Ok(s) => gl_display.get_proc_address(s.as_c_str()).cast(),
            Err(_) => std::ptr::null(),
        });

        log_gl_info();

        let shaders = ShaderSet::new(&shader_source)?;
        let cube = Geometry::from_mesh(&TriMesh::cube(1.0, Vector4::new(1.0, 1.0, 1.0, 1.0)))?;
        let board = build_board(scene.floor.as_ref())?;

        let renderer = GlRenderer::new();
        renderer.enable_depth_test();
        renderer.resize(width, height);

        let viewer = Viewer {
            renderer,
            shaders,
            cube,
            board,
            initial_camera: scene.camera,
            scene,
            overrides,
            size: (width, height),
            last_pos: PhysicalPosition::new(0.0, 0.0),
            rmb_pressed: false,
            gl_context,
            gl_window,
        };

        Ok(Self { event_loop, viewer })
    }

    pub fn run(self) -> ! {
        let App {
            event_loop,
            mut viewer,
        } = self;

        viewer.gl_window.window.request_redraw();

        event_loop.run(move |event, _window_target, control_flow| {
            *control_flow = ControlFlow::Wait;
            viewer.handle_event(event, control_flow);
        })
    }
}

/// Everything the event loop needs.
///
/// Field order matters: GL objects are dropped while the context is still alive.
struct Viewer {
    renderer: GlRenderer,
    shaders: ShaderSet,
    cube: Geometry,
    board: Option<CheckerBoard>,
    scene: Scene,
    initial_camera: OrbitCamera,
    overrides: GridOverrides,
    size: (u32, u32),
    last_pos: PhysicalPosition<f64>,
    rmb_pressed: bool,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
}

impl Viewer {
    fn handle_event(&mut self, event: Event<'_, ()>, control_flow: &mut ControlFlow) {
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Resized(size) => self.resize(size),
                WindowEvent::CursorMoved { position, .. } => {
                    let delta = (self.last_pos.x - position.x, self.last_pos.y - position.y);

                    if self.rmb_pressed {
                        self.scene.camera.rotate(
                            delta.0 as f32 * ROTATE_SPEED,
                            -delta.1 as f32 * ROTATE_SPEED,
                        );
                        self.gl_window.window.request_redraw();
                    }

                    self.last_pos = position;
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    if let MouseButton::Right = button {
                        self.rmb_pressed = state == ElementState::Pressed
                    }
                }
                WindowEvent::MouseWheel { delta, .. } => {
                    let steps = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y,
                        MouseScrollDelta::PixelDelta(p) => p.y as f32 / 40.0,
                    };

                    self.scene.camera.zoom(ZOOM_STEP.powf(steps));
                    self.gl_window.window.request_redraw();
                }
                WindowEvent::KeyboardInput { input, .. } => {
                    if input.state != ElementState::Pressed {
                        return;
                    }

                    match input.virtual_keycode {
                        Some(VirtualKeyCode::Escape) => control_flow.set_exit(),
                        Some(VirtualKeyCode::R) => {
                            self.scene.camera = self.initial_camera;
                            self.gl_window.window.request_redraw();
                        }
                        _ => {}
                    }
                }
                WindowEvent::DroppedFile(path) => self.load_scene(&path),
                WindowEvent::CloseRequested => control_flow.set_exit(),
                _ => (),
            },
            Event::RedrawRequested(_) => self.redraw(),
            _ => (),
        }
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return;
        };

        self.gl_window
            .surface
            .resize(&self.gl_context, width, height);
        self.renderer.resize(size.width, size.height);
        self.size = (size.width, size.height);
        self.gl_window.window.request_redraw();
    }

    fn load_scene(&mut self, path: &Path) {
        let mut scene = match SceneLoader::load_from_path(path) {
            Ok(s) => s,
            Err(e) => {
                log::error!("Could not read scene description: {e}");
                return;
            }
        };

        self.overrides.apply(&mut scene);

        match build_board(scene.floor.as_ref()) {
            Ok(board) => self.board = board,
            Err(e) => {
                log::error!("Could not build checkerboard: {e}");
                return;
            }
        }

        log::info!("Read scene file from {:?}", path);

        self.initial_camera = scene.camera;
        self.scene = scene;
        self.gl_window.window.request_redraw();
    }

    fn redraw(&mut self) {
        let (width, height) = self.size;
        let aspect = width as f32 / height.max(1) as f32;

        let view = self.scene.camera.view_matrix();
        let proj = self.scene.camera.projection(aspect);

        self.renderer.clear_color(0.08, 0.08, 0.1);

        if let (Some(board), Some(floor)) = (&self.board, &self.scene.floor) {
            let shader = self.shaders.get(floor.shader);

            if let Err(e) = board.draw(&mut self.renderer, &view, &proj, shader) {
                log::error!("Could not draw checkerboard: {e}");
            }
        }

        for object in &self.scene.objects {
            let geometry = match object.mesh {
                MeshKind::Cube => &self.cube,
            };

            self.renderer.draw_model(
                geometry,
                self.shaders.get(object.shader),
                &view,
                &proj,
                &object.model,
            );
        }

        if let Err(e) = self.gl_window.surface.swap_buffers(&self.gl_context) {
            log::error!("Could not swap buffers: {e}");
        }
    }
}

fn build_board(floor: Option<&Floor>) -> Result<Option<CheckerBoard>, CheckerBoardError> {
    let Some(floor) = floor else {
        return Ok(None);
    };

    let mut board = CheckerBoard::with_pattern(floor.pattern);
    board.init()?;

    Ok(Some(board))
}

fn log_gl_info() {
    let get = |name| unsafe {
        let ptr = gl::GetString(name);
        if ptr.is_null() {
            String::from("unknown")
        } else {
            CStr::from_ptr(ptr.cast()).to_string_lossy().into_owned()
        }
    };

    log::info!("OpenGL {} on {}", get(gl::VERSION), get(gl::RENDERER));
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    pub fn new(window: Window, config: &Config) -> Result<Self, AppError> {
        let (width, height): (u32, u32) = window.inner_size().into();
        let raw_window_handle = window.raw_window_handle();

        let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return Err(AppError::Window("window has zero size".into()));
        };

        let attrs =
            SurfaceAttributesBuilder::<WindowSurface>::new().build(raw_window_handle, width, height);

        let surface = unsafe { config.display().create_window_surface(config, &attrs)? };

        Ok(Self { window, surface })
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("cannot create window: {0}")]
    Window(String),
    #[error("OpenGL: {0}")]
    Gl(#[from] glutin::error::Error),
    #[error("shader: {0}")]
    Shader(#[from] PBError),
    #[error("geometry: {0}")]
    Geometry(#[from] GBError),
    #[error("checkerboard: {0}")]
    CheckerBoard(#[from] CheckerBoardError),
}
