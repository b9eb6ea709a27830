//! Terminal front end: a character-cell canvas and an interactive viewer loop
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::io::{self, stdout, Stdout, Write};
use std::time::{Duration, Instant};
use wire3d_core::{Action, Flow, FrameStats, Renderer, Scene};

pub mod canvas;
pub mod config;
pub mod demo;

pub use canvas::TerminalCanvas;
pub use config::{KeyBindings, Steps, ViewerConfig};

/// Main application struct for terminal 3D viewing
pub struct TerminalApp<W: Write = Stdout> {
    scene: Scene,
    renderer: Renderer,
    canvas: TerminalCanvas<W>,
    bindings: KeyBindings,
    frame_time: Duration,
    show_hud: bool,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
    last_stats: FrameStats,
}

impl TerminalApp<Stdout> {
    /// Viewer sized to the current terminal, drawing to stdout
    pub fn new(scene: Scene, config: ViewerConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let canvas = TerminalCanvas::new(
            width as usize,
            height as usize,
            config.render.viewport,
            stdout(),
        );
        Ok(Self::with_canvas(scene, config, canvas))
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            // Drain pending input
            let mut events = Vec::new();
            while event::poll(Duration::from_millis(0))? {
                events.push(event::read()?);
            }
            self.frame(events)?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_time {
                std::thread::sleep(self.frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
                log::debug!("{:.1} fps, last frame {:?}", self.fps, self.last_stats);
            }
        }

        Ok(())
    }
}

impl<W: Write> TerminalApp<W> {
    pub fn with_canvas(scene: Scene, config: ViewerConfig, canvas: TerminalCanvas<W>) -> Self {
        let ViewerConfig {
            render,
            bindings,
            frame_rate,
            show_hud,
        } = config;

        Self {
            scene,
            renderer: Renderer::new(render),
            canvas,
            bindings,
            frame_time: Duration::from_millis(1000 / frame_rate.max(1) as u64),
            show_hud,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            last_stats: FrameStats::default(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// One frame: apply input, render and present, then run update hooks.
    ///
    /// Nothing is drawn or updated once an event has stopped the viewer.
    pub fn frame<I>(&mut self, events: I) -> io::Result<()>
    where
        I: IntoIterator<Item = Event>,
    {
        for event in events {
            self.handle_event(event);
            if !self.running {
                return Ok(());
            }
        }

        self.render()?;
        self.scene.update();
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers,
                ..
            }) if modifiers.contains(KeyModifiers::CONTROL) => self.running = false,
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => {
                if let Some(action) = self.bindings.action(&code) {
                    self.dispatch(action);
                }
            }
            Event::Resize(cols, rows) => self.canvas.resize(cols as usize, rows as usize),
            _ => {}
        }
    }

    /// Apply one action; failures are logged and the viewer keeps running
    pub fn dispatch(&mut self, action: Action) {
        match action.apply(&mut self.scene, &mut self.renderer) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => self.running = false,
            Err(e) => log::warn!("Ignoring {:?}: {}", action, e),
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.last_stats = self.renderer.render_frame(&self.scene, &mut self.canvas)?;

        // Draw UI overlay
        if self.show_hud {
            let stats = self.last_stats;
            let out = self.canvas.writer();
            queue!(
                out,
                cursor::MoveTo(0, 0),
                SetForegroundColor(Color::Yellow),
                Print(format!(
                    "Wire3D | FPS: {:.1} | {} faces {} edges | Arrows=Move +/-=Scale Q/W A/S Z/X=Rotate F/E/N/P=Toggle Esc=Quit",
                    self.fps, stats.faces_drawn, stats.edges_drawn
                )),
                ResetColor
            )?;
            out.flush()?;
        }
        Ok(())
    }
}
