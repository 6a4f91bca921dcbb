use crate::controls::Button;
use crate::game::FrameView;
use crate::grid::Grid;
use crate::ScreenOffset;
use crate::ScreenSize;

/// Characters used to draw cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub alive: char,
    pub dead: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            alive: '█',
            dead: ' ',
        }
    }
}

/// Plain ASCII glyphs, readable in logs and snapshots
pub const ASCII: Glyphs = Glyphs {
    alive: '#',
    dead: '.',
};

/// A text framebuffer where every character is one pixel of the viewport.
pub struct Canvas {
    /// The character buffer
    cb: Vec<char>,

    /// The frame buffer.
    fb: String,

    /// Width of the framebuffer
    w: usize,

    /// Height of the framebuffer
    h: usize,

    glyphs: Glyphs,
}

impl Canvas {
    pub fn new(w: ScreenSize, h: ScreenSize) -> Self {
        let glyphs = Glyphs::default();
        let (w, h) = (w as usize, h as usize);

        Self {
            cb: vec![glyphs.dead; w * h],
            // every character is at most 3 bytes, plus one newline per line
            fb: String::with_capacity(3 * w * h + h),
            w,
            h,
            glyphs,
        }
    }

    pub fn with_glyphs(mut self, glyphs: Glyphs) -> Self {
        self.glyphs = glyphs;
        self.reset();
        self
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn resize(&mut self, w: ScreenSize, h: ScreenSize) {
        self.w = w as usize;
        self.h = h as usize;
        self.cb = vec![self.glyphs.dead; self.w * self.h];
    }

    /// Reset the character buffer
    pub fn reset(&mut self) {
        self.cb.fill(self.glyphs.dead);
    }

    /// Draw the whole frame: cells, then the generation counter, then the buttons on top.
    pub fn draw(&mut self, view: &FrameView) {
        self.reset();
        self.draw_grid(view.grid, view.cell_size);
        self.draw_text(0, 0, &format!("Generation: {}", view.generation));

        for button in view.buttons {
            self.draw_button(button);
        }
    }

    /// Every live cell is a `cell_size` square of pixels. Parts of the grid that fall off the
    /// canvas are clipped.
    pub fn draw_grid(&mut self, grid: &Grid, cell_size: ScreenSize) {
        let s = cell_size.max(1) as usize;

        for (row, cells) in grid.iter_rows().enumerate() {
            for (col, &alive) in cells.iter().enumerate() {
                if !alive {
                    continue;
                }

                for dy in 0..s {
                    for dx in 0..s {
                        self.put(col * s + dx, row * s + dy, self.glyphs.alive);
                    }
                }
            }
        }
    }

    /// Write `text` on one line starting at `(x, y)`. Characters off the canvas are dropped.
    pub fn draw_text(&mut self, x: ScreenOffset, y: ScreenOffset, text: &str) {
        let Ok(y) = usize::try_from(y) else {
            return;
        };

        for (i, c) in text.chars().enumerate() {
            if let Ok(x) = usize::try_from(x as i64 + i as i64) {
                self.put(x, y, c);
            }
        }
    }

    /// A button is a `width` by `height` box with brackets on its sides and the label on its
    /// first line. Labels that do not fit are cut.
    pub fn draw_button(&mut self, button: &Button) {
        let (w, h) = (button.width as i64, button.height as i64);
        if w < 2 || h < 1 {
            return;
        }

        for dy in 0..h {
            let y = button.y as i64 + dy;
            let line: String = (0..w)
                .map(|dx| match dx {
                    0 => '[',
                    dx if dx == w - 1 => ']',
                    _ => ' ',
                })
                .collect();

            self.draw_text(button.x, y as ScreenOffset, &line);
        }

        let label: String = button.label.chars().take((w - 2) as usize).collect();
        self.draw_text(button.x + 1, button.y, &label);
    }

    /// Turns the character buffer into text, one line per row of pixels.
    pub fn render(&mut self) -> &str {
        self.fb.clear();

        if self.w > 0 {
            for line in self.cb.chunks(self.w) {
                self.fb.extend(line);
                self.fb.push('\n');
            }
        }

        &self.fb
    }

    fn put(&mut self, x: usize, y: usize, c: char) {
        if x < self.w && y < self.h {
            self.cb[y * self.w + x] = c;
        }
    }
}
