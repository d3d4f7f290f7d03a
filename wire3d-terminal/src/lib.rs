/// Terminal frontend for the wire3d renderer
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseEvent, MouseEventKind},
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::io::{stdout, Write};
use std::time::{Duration, Instant};
use tracing::debug;
use wire3d_core::{Camera, Color, ModelManager, Renderer};

pub mod canvas;
pub mod config;

pub use canvas::TermCanvas;
pub use config::SceneConfig;

/// Scaling factor to slow down mouse movements
const SCALE_FACTOR: f64 = 40.0;
/// Prevent overly erratic mouse movements
const MOTION_THRESHOLD: i32 = 200;
/// Camera movement speed in world units per second
const MOVE_SPEED: f64 = 10.0;

/// Directional/vertical movement keys pressed during one frame, plus the
/// relative mouse delta. This is the per-frame input contract the core
/// expects from the platform layer.
#[derive(Debug, Default, Clone, Copy)]
struct InputFrame {
    forward: bool,
    back: bool,
    left: bool,
    right: bool,
    up: bool,
    down: bool,
    mouse_delta: (i32, i32),
    quit: bool,
}

/// Main application for terminal scene rendering: owns the model manager,
/// renderer, and cell canvas, and drives the advance-then-render loop.
pub struct SceneApp {
    config: SceneConfig,
    manager: ModelManager,
    renderer: Renderer,
    canvas: TermCanvas,
    last_mouse: Option<(u16, u16)>,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f64,
}

impl SceneApp {
    pub fn new(config: SceneConfig, manager: ModelManager) -> anyhow::Result<Self> {
        let (term_width, term_height) = terminal::size()?;
        let width = config.width.unwrap_or(term_width) as u32;
        let height = config.height.unwrap_or(term_height) as u32;

        let mut camera = Camera::new();
        camera.viewpoint = nalgebra::Vector3::new(
            config.viewpoint[0],
            config.viewpoint[1],
            config.viewpoint[2],
        );
        camera.rotation = (config.rotation[0], config.rotation[1]);
        camera.clip_distance = config.clip_distance;
        camera.set_viewport(width, height, config.fov);

        let background = Color::rgb(
            config.background[0],
            config.background[1],
            config.background[2],
        );

        debug!(width, height, title = %config.title, "configured scene viewport");

        Ok(Self {
            renderer: Renderer::new(camera, width, height),
            canvas: TermCanvas::new(width as usize, height as usize, background),
            config,
            manager,
            last_mouse: None,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    /// Run the scene for `duration` seconds; 0 runs indefinitely.
    pub fn run(&mut self, duration: f64) -> anyhow::Result<()> {
        debug!(duration, "starting scene loop");
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;

        let result = self.main_loop(duration);

        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self, duration: f64) -> anyhow::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target
        let mut time = 0.0;
        let mut last_tick = Instant::now();

        while self.running {
            let frame_start = Instant::now();
            let dt = frame_start.duration_since(last_tick).as_secs_f64();
            last_tick = frame_start;
            time += dt;
            if duration > 0.0 && time > duration {
                break;
            }

            let input = self.poll_input()?;
            if input.quit {
                break;
            }
            self.update_camera(dt, &input);

            self.render(time)?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f64 / (now - self.last_frame).as_secs_f64();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// Drain pending events into one per-frame input record.
    fn poll_input(&mut self) -> anyhow::Result<InputFrame> {
        let mut input = InputFrame::default();
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(KeyEvent { code, .. }) => match code {
                    KeyCode::Char('q') | KeyCode::Esc => input.quit = true,
                    KeyCode::Char('w') | KeyCode::Up => input.forward = true,
                    KeyCode::Char('s') | KeyCode::Down => input.back = true,
                    KeyCode::Char('a') | KeyCode::Left => input.left = true,
                    KeyCode::Char('d') | KeyCode::Right => input.right = true,
                    KeyCode::Char(' ') => input.down = true,
                    KeyCode::Char('e') => input.up = true,
                    _ => {}
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Moved,
                    column,
                    row,
                    ..
                }) => {
                    if let Some((last_col, last_row)) = self.last_mouse {
                        input.mouse_delta.0 += column as i32 - last_col as i32;
                        input.mouse_delta.1 += row as i32 - last_row as i32;
                    }
                    self.last_mouse = Some((column, row));
                }
                _ => {}
            }
        }
        Ok(input)
    }

    /// Apply one frame of camera movement: strafing is relative to the
    /// camera yaw, vertical movement is world-aligned, and the mouse delta
    /// feeds the (pitch, yaw) rotation.
    fn update_camera(&mut self, dt: f64, input: &InputFrame) {
        let camera = &mut self.renderer.camera;
        let s = dt * MOVE_SPEED;
        let x = s * camera.rotation.1.sin();
        let z = s * camera.rotation.1.cos();

        if input.forward {
            camera.viewpoint.x += x;
            camera.viewpoint.z += z;
        }
        if input.back {
            camera.viewpoint.x -= x;
            camera.viewpoint.z -= z;
        }
        if input.left {
            camera.viewpoint.x -= z;
            camera.viewpoint.z += x;
        }
        if input.right {
            camera.viewpoint.x += z;
            camera.viewpoint.z -= x;
        }
        if input.up {
            camera.viewpoint.y += s;
        }
        if input.down {
            camera.viewpoint.y -= s;
        }

        let (dx, dy) = input.mouse_delta;
        if dx.abs() <= MOTION_THRESHOLD && dy.abs() <= MOTION_THRESHOLD {
            camera.rotation.0 += dy as f64 / SCALE_FACTOR;
            camera.rotation.1 += dx as f64 / SCALE_FACTOR;
        }
    }

    fn render(&mut self, time: f64) -> anyhow::Result<()> {
        self.canvas.clear();
        self.renderer
            .render_frame(&mut self.manager, time, &mut self.canvas)?;

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.canvas.draw(&mut stdout)?;

        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(TermColor::Yellow),
            Print(format!(
                "{} | FPS: {:.1} | WASD=Move E/Space=Up/Down Mouse=Look Q=Quit",
                self.config.title, self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
