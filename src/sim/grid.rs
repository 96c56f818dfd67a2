/// Integer cell coordinate. Signed so a candidate step off the left or
/// bottom edge is representable before the bounds check rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Row-major field of "last visited" tick stamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<u32>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn center(&self) -> Position {
        Position::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// `y * width + x`, or `None` outside the field.
    pub fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.width as usize + pos.x as usize)
    }

    pub fn get(&self, pos: Position) -> Option<u32> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Writes `tick` into the cell; returns false (and writes nothing) when
    /// `pos` is out of bounds.
    pub fn stamp(&mut self, pos: Position, tick: u32) -> bool {
        match self.index(pos) {
            Some(i) => {
                self.cells[i] = tick;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    pub fn cells(&self) -> &[u32] {
        &self.cells
    }
}
