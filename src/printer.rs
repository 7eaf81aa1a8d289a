//! Text rendering of mazes

use std::fmt;
use std::io;

use crate::direction::Direction::{Down, Left, Right, Up};
use crate::grid::{Grid, Position};

/// Glyphs used to draw a maze.
///
/// `corners` is indexed by the walls meeting at a junction: bit 0 for a
/// wall going up, 1 right, 2 down and 3 left. `solution` is indexed the same
/// way by the directions in which the solution path leaves a cell, and holds
/// the three characters drawn inside the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharSet {
    corners: [char; 16],
    solution: [&'static str; 16],
}

impl CharSet {
    /// Unicode box drawing characters
    pub const UNICODE: CharSet = CharSet {
        corners: [
            ' ', '╹', '╺', '┗', '╻', '┃', '┏', '┣', //
            '╸', '┛', '━', '┻', '┓', '┫', '┳', '╋',
        ],
        solution: [
            "   ", "   ", "   ", " ╰┄", //
            "   ", " ┆ ", " ╭┄", "   ", //
            "   ", "┄╯ ", "┄┄┄", "   ", //
            "┄╮ ", "   ", "   ", "   ",
        ],
    };

    /// Plain ASCII characters
    pub const ASCII: CharSet = CharSet {
        corners: [
            ' ', '+', '+', '+', '+', '|', '+', '+', //
            '+', '+', '-', '+', '+', '+', '+', '+',
        ],
        solution: [
            "   ", "   ", "   ", " XX", //
            "   ", " X ", " XX", "   ", //
            "   ", "XX ", "XXX", "   ", //
            "XX ", "   ", "   ", "   ",
        ],
    };

    /// Custom character set. Solution entries should be three characters
    /// wide.
    pub const fn new(corners: [char; 16], solution: [&'static str; 16]) -> Self {
        Self { corners, solution }
    }

    fn horizontal_wall(&self) -> char {
        self.corners[0b1010]
    }

    fn vertical_wall(&self) -> char {
        self.corners[0b0101]
    }

    /// Path crossing a vertical wall opening
    fn horizontal_path(&self) -> char {
        self.solution[0b1010].chars().nth(1).unwrap_or(' ')
    }

    /// Path crossing a horizontal wall opening
    fn vertical_path(&self) -> &'static str {
        self.solution[0b0101]
    }
}

impl Default for CharSet {
    fn default() -> Self {
        Self::UNICODE
    }
}

/// Write the maze to `out`.
///
/// The output has `2 * rows + 1` lines: a wall line above each row, a line
/// with the cells of the row, and the bottom wall.
pub fn render<W: io::Write>(grid: &Grid, charset: &CharSet, mut out: W) -> io::Result<()> {
    write!(out, "{}", grid.display(charset))
}

impl Grid {
    /// Displayable text form of the maze, see [render]
    pub fn display<'a>(&'a self, charset: &'a CharSet) -> MazeDisplay<'a> {
        MazeDisplay {
            grid: self,
            charset,
        }
    }
}

/// Maze drawn with a particular [CharSet]
pub struct MazeDisplay<'a> {
    grid: &'a Grid,
    charset: &'a CharSet,
}

impl fmt::Display for MazeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.grid.all_rows() {
            self.write_row_separator(f, row.clone())?;
            self.write_row(f, row)?;
        }
        self.write_bottom(f)
    }
}

impl MazeDisplay<'_> {
    fn write_horizontal_wall(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bar = self.charset.horizontal_wall();
        write!(f, "{bar}{bar}{bar}")
    }

    /// Wall line above a row, with the path drawn through open doors
    fn write_row_separator(
        &self,
        f: &mut fmt::Formatter<'_>,
        row: impl Iterator<Item = Position>,
    ) -> fmt::Result {
        let grid = self.grid;
        let mut last = None;
        for cell in row {
            write!(f, "{}", self.corner(cell))?;
            if !grid.can_go(cell, Up) {
                self.write_horizontal_wall(f)?;
            } else if grid.is_solution(cell) && grid.is_solution(grid.step(cell, Up)) {
                f.write_str(self.charset.vertical_path())?;
            } else {
                f.write_str("   ")?;
            }
            last = Some(cell);
        }
        if let Some(cell) = last {
            write!(f, "{}", self.row_separator_end(cell))?;
        }
        writeln!(f)
    }

    /// Junction at the top-left corner of `cell`
    fn corner(&self, cell: Position) -> char {
        let grid = self.grid;
        let up = grid.step(cell, Up);
        let left = grid.step(cell, Left);

        let mut index = 0;
        if !(grid.contains(up) && grid.can_go(up, Left)) {
            index |= 1;
        }
        if !grid.can_go(cell, Up) {
            index |= 2;
        }
        if !(grid.is_entrance(cell) || grid.can_go(cell, Left)) {
            index |= 4;
        }
        if !(grid.contains(left) && grid.can_go(left, Up)) {
            index |= 8;
        }

        if cell.row == 0 {
            index &= 0b1110;
        }
        if cell.col == 0 {
            index &= 0b0111;
        }
        self.charset.corners[index]
    }

    /// Junction on the right border at the top-right corner of `cell`
    fn row_separator_end(&self, cell: Position) -> char {
        let grid = self.grid;
        let up = grid.step(cell, Up);

        let mut index = 0;
        if !(grid.contains(up) && grid.is_exit(up)) {
            index |= 1;
        }
        if !grid.is_exit(cell) {
            index |= 4;
        }
        if !grid.can_go(cell, Up) {
            index |= 8;
        }

        if cell.row == 0 {
            index &= 0b1110;
        }
        self.charset.corners[index]
    }

    /// Side walls and contents of the cells in a row
    fn write_row(
        &self,
        f: &mut fmt::Formatter<'_>,
        row: impl Iterator<Item = Position>,
    ) -> fmt::Result {
        let grid = self.grid;
        let mut last = None;
        for cell in row {
            let on_path = grid.is_solution(cell);
            if grid.is_entrance(cell) {
                self.write_opening(f, on_path)?;
            } else if grid.can_go(cell, Left) {
                self.write_opening(f, on_path && grid.is_solution(grid.step(cell, Left)))?;
            } else {
                write!(f, "{}", self.charset.vertical_wall())?;
            }
            f.write_str(self.cell_contents(cell))?;
            last = Some(cell);
        }

        match last {
            Some(cell) if grid.is_exit(cell) => self.write_opening(f, grid.is_solution(cell))?,
            _ => write!(f, "{}", self.charset.vertical_wall())?,
        }
        writeln!(f)
    }

    /// Gap in a vertical wall, crossed by the path or blank
    fn write_opening(&self, f: &mut fmt::Formatter<'_>, on_path: bool) -> fmt::Result {
        if on_path {
            write!(f, "{}", self.charset.horizontal_path())
        } else {
            f.write_str(" ")
        }
    }

    fn cell_contents(&self, cell: Position) -> &'static str {
        let grid = self.grid;
        if !grid.is_solution(cell) {
            return "   ";
        }
        let path_towards = |d| grid.can_go(cell, d) && grid.is_solution(grid.step(cell, d));

        let mut index = 0;
        if path_towards(Up) {
            index |= 1;
        }
        if grid.is_exit(cell) || path_towards(Right) {
            index |= 2;
        }
        if path_towards(Down) {
            index |= 4;
        }
        if grid.is_entrance(cell) || path_towards(Left) {
            index |= 8;
        }
        self.charset.solution[index]
    }

    fn write_bottom(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.grid;
        let bottom = grid.rows() as isize - 1;
        for cell in grid.row(bottom) {
            let mut index = 0b1010;
            if !grid.can_go(cell, Left) {
                index |= 1;
            }
            if cell.col == 0 {
                index &= 0b0111;
            }
            write!(f, "{}", self.charset.corners[index])?;
            self.write_horizontal_wall(f)?;
        }

        let last = Position::new(bottom, grid.cols() as isize - 1);
        let mut index = 0b1000;
        if !grid.can_go(last, Right) {
            index |= 1;
        }
        writeln!(f, "{}", self.charset.corners[index])
    }
}
