//! Viewer settings and the key-binding table
use crossterm::event::KeyCode;
use std::collections::HashMap;
use wire3d_core::{Action, Axis, RenderOptions, Viewport};

/// Step sizes used to build the default bindings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steps {
    pub translate: f64,
    pub scale: f64,
    pub rotate: f64,
    pub focal_distance: f64,
}

impl Default for Steps {
    fn default() -> Self {
        Self {
            translate: 10.0,
            scale: 1.25,
            rotate: std::f64::consts::PI / 12.0,
            focal_distance: 300.0,
        }
    }
}

/// Mapping from key to viewer action, handed to the event loop
#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    map: HashMap<KeyCode, Action>,
}

impl KeyBindings {
    /// No bindings at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Arrows move, `=`/`-` scale, `q`/`w`, `a`/`s`, `z`/`x` rotate about
    /// x, y and z, `j`/`k` swing the light, `f`/`e`/`n` toggle faces, edges
    /// and nodes, `p` toggles perspective and Esc quits.
    pub fn with_steps(steps: Steps) -> Self {
        let Steps {
            translate: t,
            scale: s,
            rotate: r,
            focal_distance,
        } = steps;

        let mut bindings = Self::empty();
        bindings
            .bind(KeyCode::Left, Action::Translate(-t, 0.0, 0.0))
            .bind(KeyCode::Right, Action::Translate(t, 0.0, 0.0))
            .bind(KeyCode::Up, Action::Translate(0.0, -t, 0.0))
            .bind(KeyCode::Down, Action::Translate(0.0, t, 0.0))
            .bind(KeyCode::PageUp, Action::Translate(0.0, 0.0, t))
            .bind(KeyCode::PageDown, Action::Translate(0.0, 0.0, -t))
            .bind(KeyCode::Char('='), Action::Scale(s))
            .bind(KeyCode::Char('+'), Action::Scale(s))
            .bind(KeyCode::Char('-'), Action::Scale(1.0 / s))
            .bind(KeyCode::Char('q'), Action::rotate(Axis::X, -r))
            .bind(KeyCode::Char('w'), Action::rotate(Axis::X, r))
            .bind(KeyCode::Char('a'), Action::rotate(Axis::Y, -r))
            .bind(KeyCode::Char('s'), Action::rotate(Axis::Y, r))
            .bind(KeyCode::Char('z'), Action::rotate(Axis::Z, -r))
            .bind(KeyCode::Char('x'), Action::rotate(Axis::Z, r))
            .bind(KeyCode::Char('j'), Action::RotateLight(Axis::Y, -r))
            .bind(KeyCode::Char('k'), Action::RotateLight(Axis::Y, r))
            .bind(KeyCode::Char('f'), Action::ToggleFaces)
            .bind(KeyCode::Char('e'), Action::ToggleEdges)
            .bind(KeyCode::Char('n'), Action::ToggleNodes)
            .bind(KeyCode::Char('p'), Action::TogglePerspective(focal_distance))
            .bind(KeyCode::Esc, Action::Quit);
        bindings
    }

    /// Bind `key`, replacing any earlier action
    pub fn bind(&mut self, key: KeyCode, action: Action) -> &mut Self {
        self.map.insert(key, action);
        self
    }

    pub fn unbind(&mut self, key: &KeyCode) -> Option<Action> {
        self.map.remove(key)
    }

    pub fn action(&self, key: &KeyCode) -> Option<Action> {
        self.map.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Everything the terminal viewer needs besides the scene
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub render: RenderOptions,
    pub bindings: KeyBindings,
    pub frame_rate: u32,
    pub show_hud: bool,
}

impl ViewerConfig {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            render: RenderOptions {
                viewport,
                ..RenderOptions::default()
            },
            ..Self::default()
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            bindings: KeyBindings::with_steps(Steps::default()),
            frame_rate: 30,
            show_hud: true,
        }
    }
}
