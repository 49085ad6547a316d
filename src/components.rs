#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl TetrominoType {
    pub const ALL: [TetrominoType; 7] = [
        TetrominoType::I,
        TetrominoType::O,
        TetrominoType::T,
        TetrominoType::L,
        TetrominoType::J,
        TetrominoType::S,
        TetrominoType::Z,
    ];

    /// Picks one of the seven types uniformly. Independent draws, so repeats are possible.
    #[must_use]
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self::ALL[rng.usize(0..Self::ALL.len())]
    }

    /// Board cell value for this type (1..=7). Zero is reserved for empty cells.
    #[must_use]
    pub fn id(self) -> u8 {
        match self {
            TetrominoType::I => 1,
            TetrominoType::O => 2,
            TetrominoType::T => 3,
            TetrominoType::L => 4,
            TetrominoType::J => 5,
            TetrominoType::S => 6,
            TetrominoType::Z => 7,
        }
    }

    #[must_use]
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[usize::from(id - 1)]),
            _ => None,
        }
    }

    /// Base orientation. Rotations are computed from it, never tabulated.
    #[must_use]
    pub fn base_pattern(self) -> &'static [&'static [u8]] {
        match self {
            TetrominoType::I => &[&[1, 1, 1]],
            TetrominoType::O => &[&[1, 1], &[1, 1]],
            TetrominoType::T => &[&[0, 1, 0], &[1, 1, 1]],
            TetrominoType::L => &[&[1, 0, 0], &[1, 1]],
            TetrominoType::J => &[&[0, 0, 1], &[1, 1, 1]],
            TetrominoType::S => &[&[1, 1, 0], &[0, 1, 1]],
            TetrominoType::Z => &[&[0, 1, 1], &[1, 1, 0]],
        }
    }

    #[must_use]
    pub fn get_color(self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            TetrominoType::I => Color::Rgb(0xF5, 0x38, 0xFF),
            TetrominoType::O => Color::Rgb(0xFF, 0x8E, 0x0D),
            TetrominoType::T => Color::Rgb(0xFF, 0xE1, 0x38),
            TetrominoType::L => Color::Rgb(0x38, 0x77, 0xFF),
            TetrominoType::J => Color::Cyan,
            TetrominoType::S => Color::Green,
            TetrominoType::Z => Color::Red,
        }
    }
}

/// Rectangular occupancy matrix of a piece in its current orientation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    rows: Vec<Vec<bool>>,
}

impl Shape {
    /// Builds a shape from rows of 0/1 values. Short rows are padded with empty cells.
    #[must_use]
    pub fn from_pattern(pattern: &[&[u8]]) -> Self {
        let width = pattern.iter().map(|row| row.len()).max().unwrap_or(0);
        let rows = pattern
            .iter()
            .map(|row| {
                (0..width)
                    .map(|col| row.get(col).is_some_and(|&cell| cell != 0))
                    .collect()
            })
            .collect();
        Self { rows }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// Offsets `(dx, dy)` of every filled cell relative to the top-left corner.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.rows.iter().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, filled)| **filled)
                .map(move |(dx, _)| (dx as i32, dy as i32))
        })
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells().count()
    }

    /// Quarter turn clockwise: `new[i][j] = old[rows - 1 - j][i]`.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        let old_rows = self.height();
        let old_cols = self.width();
        let rows = (0..old_cols)
            .map(|i| (0..old_rows).map(|j| self.rows[old_rows - 1 - j][i]).collect())
            .collect();
        Self { rows }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: TetrominoType,
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// New piece in its base orientation, horizontally centred on the top row.
    #[must_use]
    pub fn spawn(kind: TetrominoType) -> Self {
        let shape = Shape::from_pattern(kind.base_pattern());
        let x = (BOARD_WIDTH / 2) as i32 - (shape.width() / 2) as i32;
        Self {
            kind,
            shape,
            x,
            y: 0,
        }
    }

    /// Absolute board coordinates of every filled cell.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    #[must_use]
    pub fn collides(&self, board: &Board) -> bool {
        self.cells().any(|(x, y)| board.is_occupied(x, y))
    }

    /// The piece shifted by `(dx, dy)`, or `None` if it would not fit there.
    #[must_use]
    pub fn try_move(&self, board: &Board, dx: i32, dy: i32) -> Option<Self> {
        let moved = Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self.clone()
        };
        (!moved.collides(board)).then_some(moved)
    }

    /// The piece turned clockwise in place, or `None` if the turned shape does not fit.
    /// No wall kicks are attempted.
    #[must_use]
    pub fn try_rotate(&self, board: &Board) -> Option<Self> {
        let rotated = Self {
            shape: self.shape.rotated_clockwise(),
            ..self.clone()
        };
        (!rotated.collides(board)).then_some(rotated)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<TetrominoType>; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: [[None; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    #[must_use]
    pub fn rows(&self) -> &[[Option<TetrominoType>; BOARD_WIDTH]; BOARD_HEIGHT] {
        &self.cells
    }

    /// Cell content, `None` for empty or out-of-bounds coordinates.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<TetrominoType> {
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i32 || y >= BOARD_HEIGHT as i32 {
            return None;
        }
        self.cells[y as usize][x as usize]
    }

    /// Walls and floor count as occupied. Rows above the top edge are open.
    #[must_use]
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i32 || y >= BOARD_HEIGHT as i32 {
            return true;
        }
        y >= 0 && self.cells[y as usize][x as usize].is_some()
    }

    /// Writes a single cell. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, kind: Option<TetrominoType>) {
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i32 || y >= BOARD_HEIGHT as i32 {
            return;
        }
        self.cells[y as usize][x as usize] = kind;
    }

    /// Copies the piece into the board. The piece is consumed: once locked it is gone.
    pub fn lock_piece(&mut self, piece: Piece) {
        for (x, y) in piece.cells() {
            self.set(x, y, Some(piece.kind));
        }
    }

    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        self.cells[y].iter().all(Option::is_some)
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Removes every full row and returns how many were removed.
    ///
    /// Rows are scanned bottom-up. After a removal everything above shifts down one
    /// row, so the same index is checked again before moving up.
    pub fn clear_lines(&mut self) -> u32 {
        let mut lines_cleared = 0;
        let mut y = BOARD_HEIGHT;

        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                // Move all lines above down one
                for above in (1..=row).rev() {
                    self.cells[above] = self.cells[above - 1];
                }
                self.cells[0] = [None; BOARD_WIDTH];
                lines_cleared += 1;
            } else {
                y -= 1;
            }
        }

        lines_cleared
    }
}
