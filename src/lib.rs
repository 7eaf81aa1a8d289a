//! Generate perfect mazes, find the way through them and draw them as text
//!
//! A maze is a [Grid] of cells with doors between neighbouring cells. The
//! generator carves a maze in which every two cells are joined by exactly
//! one path, with an entrance on the left border and an exit on the right
//! border. The solver marks the path between them, and the printer draws
//! walls and path with box drawing or plain ASCII characters.
//!
//! # Examples
//! ## Seeded maze with solution
//! ```
//! use mazey::{solve, CharSet, MazeGenerator};
//!
//! let mut generator = MazeGenerator::new(Some(7));
//! let mut grid = generator.generate_maze(5, 8).unwrap();
//! let path = solve(&mut grid).unwrap();
//!
//! assert_eq!(path.first().copied(), grid.entrance());
//! assert_eq!(path.last().copied(), grid.exit());
//!
//! let text = grid.display(&CharSet::UNICODE).to_string();
//! assert_eq!(text.lines().count(), 2 * 5 + 1);
//! print!("{text}");
//! ```
//!
//! ## Rendering into any writer
//! ```
//! use mazey::{generate, render, CharSet};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut random = StdRng::seed_from_u64(1);
//! let grid = generate(1, 1, &mut random).unwrap();
//!
//! let mut out = Vec::new();
//! render(&grid, &CharSet::ASCII, &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "+---+\n     \n+---+\n");
//! ```

pub mod direction;
pub mod error;
pub mod grid;
pub mod maze_generator;
pub mod printer;
pub mod solver;

pub use direction::Direction;
pub use error::MazeError;
pub use grid::{Grid, Position};
pub use maze_generator::{generate, MazeGenerator, RandomSource};
pub use printer::{render, CharSet, MazeDisplay};
pub use solver::solve;
