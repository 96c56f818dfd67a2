/// Heading of the snake head. The discriminants are the values the
/// autopilot rotates through, so `Left -> Up -> Right -> Down` is a
/// clockwise quarter turn each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    Left = 0,
    Up = 1,
    Right = 2,
    Down = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Up, Direction::Right, Direction::Down];

    pub fn from_index(index: i32) -> Direction {
        Self::ALL[index.rem_euclid(4) as usize]
    }

    pub fn index(self) -> i32 {
        self as i32
    }

    /// Unit step in grid coordinates. `Up` is +y, matching GL's y-up
    /// framebuffer so the trail moves up the screen.
    pub fn vector(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Up => (0, 1),
            Direction::Right => (1, 0),
            Direction::Down => (0, -1),
        }
    }

    /// Quarter turn; `+1` and `-1` are the only offsets the autopilot uses.
    pub fn rotated(self, quarter_turns: i32) -> Direction {
        Self::from_index(self.index() + quarter_turns)
    }
}
