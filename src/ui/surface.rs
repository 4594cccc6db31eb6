//! Character-grid drawing surface.
//!
//! Games draw in board coordinates (pixels of a 500x500 board, y pointing
//! down). The surface scales those onto terminal cells: a cell is covered
//! when its centre lies inside the shape.

use ratatui::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    style: Style,
}

pub struct Surface {
    cols: usize,
    rows: usize,
    board_w: f32,
    board_h: f32,
    background: Color,
    cells: Vec<Cell>,
}

impl Surface {
    pub fn new(cols: usize, rows: usize, board_w: f32, board_h: f32, background: Color) -> Self {
        let blank = Cell { ch: ' ', style: Style::default().bg(background) };
        Self {
            cols,
            rows,
            board_w,
            board_h,
            background,
            cells: vec![blank; cols * rows],
        }
    }

    pub fn clear(&mut self) {
        let blank = Cell { ch: ' ', style: Style::default().bg(self.background) };
        self.cells.fill(blank);
    }

    fn cell_w(&self) -> f32 {
        self.board_w / self.cols as f32
    }

    fn cell_h(&self) -> f32 {
        self.board_h / self.rows as f32
    }

    /// Board coordinates of the centre of a cell.
    fn centre(&self, col: usize, row: usize) -> (f32, f32) {
        ((col as f32 + 0.5) * self.cell_w(), (row as f32 + 0.5) * self.cell_h())
    }

    fn col_of(&self, x: f32) -> Option<usize> {
        if x < 0.0 || x >= self.board_w || self.cols == 0 {
            return None;
        }
        Some(((x / self.cell_w()) as usize).min(self.cols - 1))
    }

    fn row_of(&self, y: f32) -> Option<usize> {
        if y < 0.0 || y >= self.board_h || self.rows == 0 {
            return None;
        }
        Some(((y / self.cell_h()) as usize).min(self.rows - 1))
    }

    fn put(&mut self, col: usize, row: usize, ch: char, fg: Color) {
        if col < self.cols && row < self.rows {
            let bg = self.background;
            self.cells[row * self.cols + col] = Cell { ch, style: Style::default().fg(fg).bg(bg) };
        }
    }

    /// Range of cells whose centres fall in `[lo, hi)` along one axis.
    fn span(lo: f32, hi: f32, cell: f32, count: usize) -> std::ops::Range<usize> {
        let first = ((lo / cell) - 0.5).ceil().max(0.0) as usize;
        let last = ((hi / cell) - 0.5).ceil().max(0.0) as usize;
        first.min(count)..last.min(count)
    }

    fn normalize(x: f32, y: f32, w: f32, h: f32) -> (f32, f32, f32, f32) {
        let (x, w) = if w < 0.0 { (x + w, -w) } else { (x, w) };
        let (y, h) = if h < 0.0 { (y + h, -h) } else { (y, h) };
        (x, y, w, h)
    }

    /// Fill a rectangle. Negative width or height extends left or up.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let (x, y, w, h) = Self::normalize(x, y, w, h);
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let cols = Self::span(x, x + w, self.cell_w(), self.cols);
        let rows = Self::span(y, y + h, self.cell_h(), self.rows);
        for row in rows {
            for col in cols.clone() {
                self.put(col, row, '█', color);
            }
        }
    }

    /// Outline a rectangle with box-drawing characters.
    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let (x, y, w, h) = Self::normalize(x, y, w, h);
        let (Some(c0), Some(r0)) = (self.col_of(x), self.row_of(y)) else {
            return;
        };
        let c1 = self.col_of(x + w).unwrap_or(self.cols.saturating_sub(1));
        let r1 = self.row_of(y + h).unwrap_or(self.rows.saturating_sub(1));
        for col in c0..=c1 {
            self.put(col, r0, '─', color);
            self.put(col, r1, '─', color);
        }
        for row in r0..=r1 {
            self.put(c0, row, '│', color);
            self.put(c1, row, '│', color);
        }
        self.put(c0, r0, '┌', color);
        self.put(c1, r0, '┐', color);
        self.put(c0, r1, '└', color);
        self.put(c1, r1, '┘', color);
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: Color) {
        let mut any = false;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let (px, py) = self.centre(col, row);
                if (px - cx).powi(2) + (py - cy).powi(2) <= r * r {
                    self.put(col, row, '█', color);
                    any = true;
                }
            }
        }
        // Smaller than a cell: still show where it is
        if !any {
            if let (Some(col), Some(row)) = (self.col_of(cx), self.row_of(cy)) {
                self.put(col, row, '●', color);
            }
        }
    }

    pub fn stroke_circle(&mut self, cx: f32, cy: f32, r: f32, color: Color) {
        let tolerance = self.cell_w().max(self.cell_h()) / 2.0;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let (px, py) = self.centre(col, row);
                let d = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
                if (d - r).abs() <= tolerance {
                    self.put(col, row, '○', color);
                }
            }
        }
    }

    /// Write text with its anchor at a board position. Clipped at the edges.
    pub fn text(&mut self, x: f32, y: f32, text: &str, color: Color, align: Align) {
        let Some(row) = self.row_of(y) else { return };
        let anchor = (x / self.cell_w()) as isize;
        let len = text.chars().count() as isize;
        let start = match align {
            Align::Left => anchor,
            Align::Center => anchor - len / 2,
        };
        for (i, ch) in text.chars().enumerate() {
            let col = start + i as isize;
            if col >= 0 {
                self.put(col as usize, row, ch, color);
            }
        }
    }

    pub fn into_lines(self) -> Vec<Line<'static>> {
        self.cells
            .chunks(self.cols.max(1))
            .take(self.rows)
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .iter()
                    .map(|cell| Span::styled(String::from(cell.ch), cell.style))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    #[cfg(test)]
    pub fn char_at(&self, col: usize, row: usize) -> char {
        self.cells[row * self.cols + col].ch
    }

    #[cfg(test)]
    pub fn count(&self, ch: char) -> usize {
        self.cells.iter().filter(|c| c.ch == ch).count()
    }
}
