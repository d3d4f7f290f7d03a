/// Terminal cell canvas implementing the core draw collaborator
use crossterm::{
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor},
    QueueableCommand,
};
use std::io::Write;
use wire3d_core::{Color, DrawTarget, ScreenPoint};

/// An RGB cell buffer that fills polygons with a scanline sweep and strokes
/// outlines with Bresenham lines, then presents one background-coloured
/// space per cell.
pub struct TermCanvas {
    width: usize,
    height: usize,
    background: Color,
    cells: Vec<Color>,
}

impl TermCanvas {
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        Self {
            width,
            height,
            background,
            cells: vec![background; width * height],
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(self.background);
    }

    fn put(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.cells[y as usize * self.width + x as usize] = color;
        }
    }

    /// Even-odd scanline fill over the closed polygon.
    fn fill_polygon(&mut self, points: &[ScreenPoint], color: Color) {
        if points.len() < 3 {
            return;
        }
        let min_y = points.iter().map(|p| p.1).min().unwrap_or(0).max(0);
        let max_y = points
            .iter()
            .map(|p| p.1)
            .max()
            .unwrap_or(0)
            .min(self.height as i32 - 1);

        for y in min_y..=max_y {
            let yc = y as f64 + 0.5;
            let mut crossings: Vec<f64> = Vec::new();
            for i in 0..points.len() {
                let (x0, y0) = points[i];
                let (x1, y1) = points[(i + 1) % points.len()];
                let (y0, y1) = (y0 as f64, y1 as f64);
                if (y0 <= yc) != (y1 <= yc) {
                    let t = (yc - y0) / (y1 - y0);
                    crossings.push(x0 as f64 + t * (x1 - x0) as f64);
                }
            }
            crossings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            for pair in crossings.chunks_exact(2) {
                let start = pair[0].round() as i32;
                let end = pair[1].round() as i32;
                for x in start..=end {
                    self.put(x, y, color);
                }
            }
        }
    }

    fn line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Color) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x, y, color);
            if x == to.0 && y == to.1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Present the buffer, one coloured cell at a time.
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current: Option<Color> = None;
        for y in 0..self.height {
            for x in 0..self.width {
                let color = self.cells[y * self.width + x];
                if current != Some(color) {
                    writer.queue(SetBackgroundColor(TermColor::Rgb {
                        r: color.r,
                        g: color.g,
                        b: color.b,
                    }))?;
                    current = Some(color);
                }
                writer.queue(Print(' '))?;
            }
            writer.queue(ResetColor)?;
            writer.queue(Print("\r\n"))?;
            current = None;
        }
        Ok(())
    }

    #[cfg(test)]
    fn cell(&self, x: usize, y: usize) -> Color {
        self.cells[y * self.width + x]
    }
}

impl DrawTarget for TermCanvas {
    fn draw_polygon(&mut self, points: &[ScreenPoint], fill: Color, outline: Option<Color>) {
        self.fill_polygon(points, fill);
        if let Some(outline) = outline {
            for i in 0..points.len() {
                self.line(points[i], points[(i + 1) % points.len()], outline);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Color = Color::rgb(0, 0, 0);
    const FILL: Color = Color::rgb(200, 0, 0);
    const EDGE: Color = Color::rgb(255, 255, 255);

    #[test]
    fn fill_covers_the_interior() {
        let mut canvas = TermCanvas::new(20, 20, BG);
        canvas.draw_polygon(&[(2, 2), (17, 2), (17, 17), (2, 17)], FILL, None);
        assert_eq!(canvas.cell(10, 10), FILL);
        assert_eq!(canvas.cell(0, 0), BG);
        assert_eq!(canvas.cell(19, 19), BG);
    }

    #[test]
    fn outline_overdraws_the_fill() {
        let mut canvas = TermCanvas::new(20, 20, BG);
        canvas.draw_polygon(&[(2, 2), (17, 2), (17, 17), (2, 17)], FILL, Some(EDGE));
        assert_eq!(canvas.cell(2, 2), EDGE);
        assert_eq!(canvas.cell(10, 2), EDGE);
        assert_eq!(canvas.cell(10, 10), FILL);
    }

    #[test]
    fn offscreen_points_are_clamped_silently() {
        let mut canvas = TermCanvas::new(10, 10, BG);
        canvas.draw_polygon(&[(-5, -5), (15, -5), (15, 15), (-5, 15)], FILL, Some(EDGE));
        assert_eq!(canvas.cell(5, 5), FILL);
    }

    #[test]
    fn clear_restores_the_background() {
        let mut canvas = TermCanvas::new(10, 10, BG);
        canvas.draw_polygon(&[(0, 0), (9, 0), (9, 9), (0, 9)], FILL, None);
        canvas.clear();
        assert_eq!(canvas.cell(5, 5), BG);
    }

    #[test]
    fn degenerate_polygons_are_ignored() {
        let mut canvas = TermCanvas::new(10, 10, BG);
        canvas.fill_polygon(&[(1, 1), (8, 8)], FILL);
        assert_eq!(canvas.cell(4, 4), BG);
    }
}
