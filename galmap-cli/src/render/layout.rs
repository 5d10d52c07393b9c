/// Cells `rows.0..rows.1` x `cols.0..cols.1` of a [`GridSpec`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub rows: (u32, u32),
    pub cols: (u32, u32),
}

impl Span {
    pub const fn new(rows: (u32, u32), cols: (u32, u32)) -> Self {
        Self { rows, cols }
    }
}

/// Pixel rectangle on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn offset_from(&self, origin: &Rect) -> (u32, u32) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// Divides a canvas into `rows` x `cols` equal cells.
#[derive(Clone, Copy, Debug)]
pub struct GridSpec {
    rows: u32,
    cols: u32,
    width: u32,
    height: u32,
}

impl GridSpec {
    pub fn new(rows: u32, cols: u32, (width, height): (u32, u32)) -> Self {
        Self {
            rows,
            cols,
            width,
            height,
        }
    }

    fn col_edge(&self, col: u32) -> u32 {
        (u64::from(col.min(self.cols)) * u64::from(self.width) / u64::from(self.cols)) as u32
    }

    fn row_edge(&self, row: u32) -> u32 {
        (u64::from(row.min(self.rows)) * u64::from(self.height) / u64::from(self.rows)) as u32
    }

    pub fn rect(&self, span: Span) -> Rect {
        let x = self.col_edge(span.cols.0);
        let y = self.row_edge(span.rows.0);
        Rect {
            x,
            y,
            width: self.col_edge(span.cols.1) - x,
            height: self.row_edge(span.rows.1) - y,
        }
    }

    /// Smallest rectangle covering all spans, so that unused cells can be
    /// cropped away.
    pub fn bounding_box(&self, spans: &[Span]) -> Rect {
        let row_start = spans.iter().map(|span| span.rows.0).min().unwrap_or(0);
        let row_end = spans.iter().map(|span| span.rows.1).max().unwrap_or(self.rows);
        let col_start = spans.iter().map(|span| span.cols.0).min().unwrap_or(0);
        let col_end = spans.iter().map(|span| span.cols.1).max().unwrap_or(self.cols);
        self.rect(Span::new((row_start, row_end), (col_start, col_end)))
    }
}
