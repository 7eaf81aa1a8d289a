//! Maze grid: cells and the doors between them

use crate::direction::Direction;
use crate::error::MazeError;

/// Location in the maze
///
/// Positions are plain coordinates and may point outside the grid; every
/// query goes through [Grid], which treats such positions as "no cell".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: isize,
    pub col: isize,
}

impl Position {
    pub fn new(row: isize, col: isize) -> Self {
        Self { row, col }
    }
}

/// State of a single cell
#[derive(Debug, Clone, Copy, Default)]
struct Cell {
    /// Open doors, one [Direction::door_mask] bit per direction
    doors: u8,
    /// Reached by the generator
    visited: bool,
    /// Lies on the entrance-to-exit path
    on_solution_path: bool,
}

/// Rectangular maze
///
/// Cells are stored row-major in one vector. Opening a door always opens
/// the matching door of the neighbouring cell, so both sides of a wall
/// agree.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with all doors closed.
    ///
    /// Returns [MazeError::InvalidDimensions] if either dimension is zero.
    pub fn new(rows: usize, cols: usize) -> Result<Self, MazeError> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::default(); rows * cols],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false, grids have at least one cell
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.rows as isize).contains(&pos.row) && (0..self.cols as isize).contains(&pos.col)
    }

    /// Row-major index of an in-bounds position
    pub(crate) fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.row as usize * self.cols + pos.col as usize)
    }

    fn cell(&self, pos: Position) -> Option<&Cell> {
        let i = self.index(pos)?;
        Some(&self.cells[i])
    }

    fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        let i = self.index(pos)?;
        Some(&mut self.cells[i])
    }

    /// Door mask of the cell, 0 outside the grid
    pub fn doors(&self, pos: Position) -> u8 {
        self.cell(pos).map_or(0, |c| c.doors)
    }

    /// Is there an open door from `pos` towards `d`
    pub fn can_go(&self, pos: Position, d: Direction) -> bool {
        self.doors(pos) & d.door_mask() != 0
    }

    /// Open the door from `pos` towards `d`.
    ///
    /// The neighbour, if inside the grid, gets the opposite door opened.
    /// Doors on the outer boundary lead out of the maze and only touch
    /// `pos`. Does nothing if `pos` is outside the grid.
    pub fn open_door(&mut self, pos: Position, d: Direction) {
        let Some(cell) = self.cell_mut(pos) else {
            return;
        };
        cell.doors |= d.door_mask();

        let neighbor = self.step(pos, d);
        if let Some(cell) = self.cell_mut(neighbor) {
            cell.doors |= d.opposite().door_mask();
        }
    }

    /// Position one step from `pos` towards `d`, ignoring doors.
    ///
    /// If `pos` is already outside the grid, it is returned as is.
    pub fn step(&self, pos: Position, d: Direction) -> Position {
        if !self.contains(pos) {
            return pos;
        }
        let (dy, dx) = d.delta();
        Position::new(pos.row + dy, pos.col + dx)
    }

    /// Cells reachable from `pos` through a single open door, in the order
    /// up, down, left, right
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + Clone + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |&d| self.can_go(pos, d))
            .map(move |d| self.step(pos, d))
            .filter(move |&n| self.contains(n))
    }

    pub fn is_entrance(&self, pos: Position) -> bool {
        pos.col == 0 && self.can_go(pos, Direction::Left)
    }

    pub fn is_exit(&self, pos: Position) -> bool {
        pos.col == self.cols as isize - 1 && self.can_go(pos, Direction::Right)
    }

    /// Topmost cell of the first column with a door leading out to the left
    pub fn entrance(&self) -> Option<Position> {
        self.col(0).find(|&pos| self.is_entrance(pos))
    }

    /// Topmost cell of the last column with a door leading out to the right
    pub fn exit(&self) -> Option<Position> {
        self.col(self.cols as isize - 1)
            .find(|&pos| self.is_exit(pos))
    }

    pub fn is_visited(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(|c| c.visited)
    }

    pub fn set_visited(&mut self, pos: Position, visited: bool) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.visited = visited;
        }
    }

    /// Reset generation state of every cell
    pub fn clear_visited(&mut self) {
        self.cells.iter_mut().for_each(|c| c.visited = false);
    }

    /// Does the cell lie on the marked solution path
    pub fn is_solution(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(|c| c.on_solution_path)
    }

    pub fn set_solution(&mut self, pos: Position, on_path: bool) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.on_solution_path = on_path;
        }
    }

    /// Remove any marked solution path
    pub fn clear_solution(&mut self) {
        self.cells.iter_mut().for_each(|c| c.on_solution_path = false);
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: isize) -> impl Iterator<Item = Position> + Clone {
        (0..self.cols as isize).map(move |col| Position::new(row, col))
    }

    /// Cells of one column, top to bottom
    pub fn col(&self, col: isize) -> impl Iterator<Item = Position> + Clone {
        (0..self.rows as isize).map(move |row| Position::new(row, col))
    }

    /// All cells from top-left to bottom-right, row by row
    pub fn cells(&self) -> impl Iterator<Item = Position> + Clone {
        let cols = self.cols as isize;
        (0..self.rows as isize)
            .flat_map(move |row| (0..cols).map(move |col| Position::new(row, col)))
    }

    /// Every row as its own sequence of cells
    pub fn all_rows(
        &self,
    ) -> impl Iterator<Item = impl Iterator<Item = Position> + Clone> + Clone {
        let cols = self.cols as isize;
        (0..self.rows as isize)
            .map(move |row| (0..cols).map(move |col| Position::new(row, col)))
    }

    /// Every column as its own sequence of cells
    pub fn all_cols(
        &self,
    ) -> impl Iterator<Item = impl Iterator<Item = Position> + Clone> + Clone {
        let rows = self.rows as isize;
        (0..self.cols as isize)
            .map(move |col| (0..rows).map(move |row| Position::new(row, col)))
    }
}
