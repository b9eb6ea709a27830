//! Character-cell canvas for terminal rendering
use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::{self, Write};
use wire3d_core::{Canvas, Color, Viewport};

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

const DISC_GLYPH: char = 'o';

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Color,
}

/// Canvas that rasterizes viewport coordinates onto a grid of terminal cells.
///
/// Nothing reaches the writer until [`Canvas::present`]; later draws simply
/// overwrite earlier ones.
pub struct TerminalCanvas<W: Write> {
    cols: usize,
    rows: usize,
    viewport: Viewport,
    background: Color,
    cells: Vec<Cell>,
    out: W,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(cols: usize, rows: usize, viewport: Viewport, out: W) -> Self {
        let background = Color::BLACK;
        Self {
            cols,
            rows,
            viewport,
            background,
            cells: vec![Cell { glyph: ' ', color: background }; cols * rows],
            out,
        }
    }

    /// Change the cell grid, e.g. after the terminal was resized
    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![Cell { glyph: ' ', color: self.background }; cols * rows];
    }

    pub fn size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    pub fn glyph_at(&self, col: usize, row: usize) -> Option<char> {
        self.index(col as i64, row as i64).map(|i| self.cells[i].glyph)
    }

    pub fn color_at(&self, col: usize, row: usize) -> Option<Color> {
        self.index(col as i64, row as i64).map(|i| self.cells[i].color)
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    /// Viewport position to fractional cell position
    fn to_cell(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (
            x * self.cols as f64 / self.viewport.width,
            y * self.rows as f64 / self.viewport.height,
        )
    }

    fn index(&self, col: i64, row: i64) -> Option<usize> {
        if col < 0 || row < 0 || col as usize >= self.cols || row as usize >= self.rows {
            return None;
        }
        Some(row as usize * self.cols + col as usize)
    }

    fn plot(&mut self, col: i64, row: i64, glyph: char, color: Color) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = Cell { glyph, color };
        }
    }
}

/// Ramp character for a fill colour's brightness
fn shade_glyph(color: Color) -> char {
    let last = LUMINOSITY_RAMP.len() - 1;
    let index = (color.luminance() * last as f64).round() as usize;
    LUMINOSITY_RAMP[index.min(last)]
}

/// Line character for a direction in cell space (y grows downward)
fn line_glyph(dx: f64, dy: f64) -> char {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ay < ax * 0.5 {
        '-'
    } else if ax < ay * 0.5 {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

/// Liang-Barsky clip of a segment to `[0, width] x [0, height]` in cell space
fn clip_segment(
    (x0, y0): (f64, f64),
    (x1, y1): (f64, f64),
    width: f64,
    height: f64,
) -> Option<((f64, f64), (f64, f64))> {
    if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
        return None;
    }
    let (dx, dy) = (x1 - x0, y1 - y0);
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [(-dx, x0), (dx, width - x0), (-dy, y0), (dy, height - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some(((x0 + t0 * dx, y0 + t0 * dy), (x0 + t1 * dx, y0 + t1 * dy)))
}

fn to_term(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    type Error = io::Error;

    fn clear(&mut self, background: Color) {
        self.background = background;
        for cell in &mut self.cells {
            *cell = Cell { glyph: ' ', color: background };
        }
    }

    fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color) {
        let from = self.to_cell(from);
        let to = self.to_cell(to);
        let glyph = line_glyph(to.0 - from.0, to.1 - from.1);
        let Some(((x0, y0), (x1, y1))) = clip_segment(from, to, self.cols as f64, self.rows as f64) else {
            return;
        };
        let (dx, dy) = (x1 - x0, y1 - y0);

        // DDA: one sample per cell along the longer axis
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        for step in 0..=steps {
            let t = step as f64 / steps as f64;
            let x = x0 + dx * t;
            let y = y0 + dy * t;
            self.plot(x.floor() as i64, y.floor() as i64, glyph, color);
        }
    }

    fn draw_filled_polygon(&mut self, points: &[(f64, f64)], color: Color) {
        if points.len() < 3 {
            return;
        }
        let cells: Vec<(f64, f64)> = points.iter().map(|&p| self.to_cell(p)).collect();
        let glyph = shade_glyph(color);

        let min_y = cells.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max_y = cells.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        let first_row = (min_y.floor() as i64).max(0);
        let last_row = (max_y.ceil() as i64).min(self.rows as i64 - 1);

        // Scanline fill through cell centres, even-odd rule
        let mut crossings = Vec::with_capacity(cells.len());
        for row in first_row..=last_row {
            let y = row as f64 + 0.5;
            crossings.clear();
            for (i, &(ax, ay)) in cells.iter().enumerate() {
                let (bx, by) = cells[(i + 1) % cells.len()];
                if (ay <= y) != (by <= y) {
                    crossings.push(ax + (y - ay) / (by - ay) * (bx - ax));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));

            for span in crossings.chunks_exact(2) {
                let start = (span[0] - 0.5).ceil() as i64;
                let end = (span[1] - 0.5).floor() as i64;
                for col in start.max(0)..=end.min(self.cols as i64 - 1) {
                    self.plot(col, row, glyph, color);
                }
            }
        }
    }

    fn draw_disc(&mut self, centre: (f64, f64), radius: f64, color: Color) {
        let (cx, cy) = self.to_cell(centre);
        let rx = radius * self.cols as f64 / self.viewport.width;
        let ry = radius * self.rows as f64 / self.viewport.height;

        if rx < 0.5 && ry < 0.5 {
            self.plot(cx.floor() as i64, cy.floor() as i64, DISC_GLYPH, color);
            return;
        }
        for row in (cy - ry).floor() as i64..=(cy + ry).ceil() as i64 {
            for col in (cx - rx).floor() as i64..=(cx + rx).ceil() as i64 {
                let nx = (col as f64 + 0.5 - cx) / rx.max(0.5);
                let ny = (row as f64 + 0.5 - cy) / ry.max(0.5);
                if nx * nx + ny * ny <= 1.0 {
                    self.plot(col, row, DISC_GLYPH, color);
                }
            }
        }
    }

    fn present(&mut self) -> io::Result<()> {
        self.out.queue(SetBackgroundColor(to_term(self.background)))?;
        let mut current = None;
        for row in 0..self.rows {
            self.out.queue(cursor::MoveTo(0, row as u16))?;
            for cell in &self.cells[row * self.cols..(row + 1) * self.cols] {
                if current != Some(cell.color) {
                    self.out.queue(SetForegroundColor(to_term(cell.color)))?;
                    current = Some(cell.color);
                }
                self.out.queue(Print(cell.glyph))?;
            }
        }
        self.out.queue(ResetColor)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn canvas() -> TerminalCanvas<Vec<u8>> {
        // One cell per 10x10 viewport units
        TerminalCanvas::new(20, 10, Viewport::new(200, 100), Vec::new())
    }

    #[test]
    fn test_horizontal_line() {
        let mut c = canvas();
        c.draw_line((5.0, 55.0), (95.0, 55.0), Color::WHITE);
        for col in 0..=9 {
            assert_eq!(c.glyph_at(col, 5), Some('-'));
        }
        assert_eq!(c.glyph_at(10, 5), Some(' '));
    }

    #[test]
    fn test_huge_line_is_clipped_to_the_grid() {
        let mut c = canvas();
        let start = Instant::now();
        c.draw_line((-1e12, -1e12), (1e12, 1e12), Color::WHITE);
        c.draw_line((5.0, 55.0), (1e10, 55.0), Color::WHITE);
        c.draw_line((0.0, 0.0), (1e10, 0.0), Color::WHITE);
        assert!(start.elapsed() < Duration::from_millis(500));

        for col in 0..20 {
            assert_eq!(c.glyph_at(col, 5), Some('-'));
            assert_eq!(c.glyph_at(col, 0), Some('-'));
        }
        assert_eq!(c.glyph_at(7, 7), Some('\\'));
    }

    #[test]
    fn test_edge_just_inside_near_guard_renders_promptly() {
        use wire3d_core::{Mesh, Projection, RenderOptions, Renderer, Scene};

        let viewport = Viewport::new(600, 400);
        let mut mesh = Mesh::from_nodes([[300.0, 200.0, 0.0], [600.0, 200.0, -299.99999]]);
        mesh.add_edge(0, 1).unwrap();
        let mut scene = Scene::new();
        scene.add_mesh("edge", mesh);

        let renderer = Renderer::new(RenderOptions {
            viewport,
            projection: Projection::perspective(300.0),
            ..RenderOptions::default()
        });
        let mut c = TerminalCanvas::new(80, 24, viewport, Vec::new());
        let start = Instant::now();
        let stats = renderer.render_frame(&scene, &mut c).unwrap();
        assert!(start.elapsed() < Duration::from_millis(500));
        assert_eq!(stats.edges_drawn, 1);
        assert_eq!(c.glyph_at(79, 12), Some('-'));
    }

    #[test]
    fn test_clip_segment() {
        assert_eq!(
            clip_segment((-10.0, 5.0), (30.0, 5.0), 20.0, 10.0),
            Some(((0.0, 5.0), (20.0, 5.0)))
        );
        assert_eq!(clip_segment((-10.0, -5.0), (-1.0, 3.0), 20.0, 10.0), None);
        assert_eq!(clip_segment((0.0, 0.0), (f64::INFINITY, 0.0), 20.0, 10.0), None);
        assert_eq!(
            clip_segment((2.0, 3.0), (4.0, 6.0), 20.0, 10.0),
            Some(((2.0, 3.0), (4.0, 6.0)))
        );
    }

    #[test]
    fn test_line_glyphs() {
        assert_eq!(line_glyph(0.0, 5.0), '|');
        assert_eq!(line_glyph(3.0, 3.0), '\\');
        assert_eq!(line_glyph(3.0, -3.0), '/');
    }

    #[test]
    fn test_filled_square() {
        let mut c = canvas();
        let red = Color::new(255, 0, 0);
        c.draw_filled_polygon(&[(20.0, 20.0), (60.0, 20.0), (60.0, 60.0), (20.0, 60.0)], red);
        assert_eq!(c.color_at(2, 2), Some(red));
        assert_eq!(c.color_at(5, 5), Some(red));
        assert_eq!(c.glyph_at(6, 6), Some(' '));
        assert_eq!(c.glyph_at(1, 2), Some(' '));
        assert_eq!(c.glyph_at(3, 3), Some(shade_glyph(red)));
    }

    #[test]
    fn test_later_polygons_overwrite() {
        let mut c = canvas();
        let square = [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)];
        c.draw_filled_polygon(&square, Color::new(0, 0, 255));
        c.draw_filled_polygon(&square, Color::WHITE);
        assert_eq!(c.color_at(4, 4), Some(Color::WHITE));
        assert_eq!(c.glyph_at(4, 4), Some('@'));
    }

    #[test]
    fn test_small_disc_marks_one_cell() {
        let mut c = canvas();
        c.draw_disc((55.0, 35.0), 2.0, Color::WHITE);
        assert_eq!(c.glyph_at(5, 3), Some(DISC_GLYPH));
        assert_eq!(c.glyph_at(6, 3), Some(' '));
    }

    #[test]
    fn test_out_of_bounds_draws_are_clipped() {
        let mut c = canvas();
        c.draw_line((-500.0, -500.0), (1000.0, 1000.0), Color::WHITE);
        c.draw_disc((-50.0, -50.0), 30.0, Color::WHITE);
        c.draw_filled_polygon(&[(-100.0, -100.0), (300.0, -100.0), (300.0, 300.0)], Color::WHITE);
    }

    #[test]
    fn test_present_writes_frame() {
        let mut c = canvas();
        c.clear(Color::BLACK);
        c.draw_line((0.0, 5.0), (190.0, 5.0), Color::WHITE);
        c.present().unwrap();
        let text = String::from_utf8_lossy(c.writer());
        assert!(text.contains("--------------------"));
    }

    #[test]
    fn test_resize() {
        let mut c = canvas();
        c.resize(4, 2);
        assert_eq!(c.size(), (4, 2));
        assert_eq!(c.glyph_at(3, 1), Some(' '));
        assert_eq!(c.glyph_at(4, 1), None);
    }
}
