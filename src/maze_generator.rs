//! Maze generation

use itertools::Itertools;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::debug;

use crate::direction::Direction;
use crate::error::MazeError;
use crate::grid::{Grid, Position};

/// Source of randomness for maze generation.
///
/// Implemented for every [rand::Rng]; tests can supply scripted choices.
pub trait RandomSource {
    /// Uniform integer in `0..bound`, `bound` is never zero
    fn below(&mut self, bound: usize) -> usize;

    /// Uniformly random permutation of `0..len`
    fn permutation(&mut self, len: usize) -> Vec<usize>;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn below(&mut self, bound: usize) -> usize {
        self.gen_range(0..bound)
    }

    fn permutation(&mut self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(self);
        order
    }
}

/// Maze generator owning its random number generator.
pub struct MazeGenerator<R = StdRng> {
    random: R,
}

impl MazeGenerator<StdRng> {
    /// Seeded generator, or seeded from OS entropy when `seed` is `None`
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }
}

impl<R: RandomSource> MazeGenerator<R> {
    pub fn from_rng(random: R) -> Self {
        Self { random }
    }

    /// Generate a perfect maze of the given size, see [generate]
    pub fn generate_maze(&mut self, rows: usize, cols: usize) -> Result<Grid, MazeError> {
        generate(rows, cols, &mut self.random)
    }
}

/// Generate a perfect maze: every pair of cells is joined by exactly one
/// path.
///
/// Passages are carved depth-first from a random cell, visiting the
/// neighbours of each cell in random order. Afterwards an entrance is
/// opened on the left border and an exit on the right border, each on a
/// random row.
///
/// Randomness is consumed in a fixed order: start row, start column, one
/// permutation per carved cell, entrance row, exit row.
pub fn generate<R: RandomSource + ?Sized>(
    rows: usize,
    cols: usize,
    random: &mut R,
) -> Result<Grid, MazeError> {
    let mut grid = Grid::new(rows, cols)?;

    let start = Position::new(random.below(rows) as isize, random.below(cols) as isize);
    debug!(rows, cols, ?start, "carving maze");
    carve(&mut grid, start, random);

    let entrance_row = random.below(rows) as isize;
    grid.open_door(Position::new(entrance_row, 0), Direction::Left);
    let exit_row = random.below(rows) as isize;
    grid.open_door(Position::new(exit_row, cols as isize - 1), Direction::Right);
    debug!(entrance_row, exit_row, "opened entrance and exit");

    Ok(grid)
}

/// Carving state of one cell on the stack
struct Frame {
    pos: Position,
    /// In-bounds directions, in random visiting order
    directions: Vec<Direction>,
    next: usize,
}

impl Frame {
    /// Mark `pos` visited and shuffle the directions leading to its
    /// in-bounds neighbours
    fn enter<R: RandomSource + ?Sized>(grid: &mut Grid, pos: Position, random: &mut R) -> Self {
        grid.set_visited(pos, true);

        let available = Direction::ALL
            .into_iter()
            .filter(|&d| grid.contains(grid.step(pos, d)))
            .collect_vec();
        let directions = random
            .permutation(available.len())
            .into_iter()
            .map(|i| available[i])
            .collect_vec();

        Self {
            pos,
            directions,
            next: 0,
        }
    }
}

/// Depth-first carving from `start` with an explicit stack.
///
/// Visits every cell reachable from `start`, which is the whole grid.
fn carve<R: RandomSource + ?Sized>(grid: &mut Grid, start: Position, random: &mut R) {
    let mut stack = vec![Frame::enter(grid, start, random)];

    while let Some(frame) = stack.last_mut() {
        let Some(&d) = frame.directions.get(frame.next) else {
            stack.pop();
            continue;
        };
        frame.next += 1;

        let pos = frame.pos;
        let neighbor = grid.step(pos, d);
        if !grid.is_visited(neighbor) {
            grid.open_door(pos, d);
            stack.push(Frame::enter(grid, neighbor, random));
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;

    use petgraph::algo::{connected_components, is_cyclic_undirected};
    use petgraph::graph::UnGraph;
    use rand::{rngs::StdRng, SeedableRng};

    use crate::direction::Direction::{self, *};
    use crate::error::MazeError;
    use crate::grid::{Grid, Position};
    use crate::maze_generator::{generate, MazeGenerator, RandomSource};

    /// Random source replaying recorded choices
    pub(crate) struct Scripted {
        below: VecDeque<usize>,
        permutations: VecDeque<Vec<usize>>,
    }

    impl Scripted {
        pub(crate) fn new(below: &[usize], permutations: &[&[usize]]) -> Self {
            Self {
                below: below.iter().copied().collect(),
                permutations: permutations.iter().map(|p| p.to_vec()).collect(),
            }
        }
    }

    impl RandomSource for Scripted {
        fn below(&mut self, bound: usize) -> usize {
            let value = self.below.pop_front().expect("script ran out of numbers");
            assert!(value < bound);
            value
        }

        fn permutation(&mut self, len: usize) -> Vec<usize> {
            let order = self
                .permutations
                .pop_front()
                .expect("script ran out of permutations");
            assert_eq!(order.len(), len);
            order
        }
    }

    /// Choices producing the 2x2 maze
    ///
    /// ```text
    /// (0,0) (0,1)->
    ///   |     |
    /// ->(1,0)-(1,1)
    /// ```
    pub(crate) fn scripted_2x2() -> Scripted {
        Scripted::new(&[0, 0, 1, 0], &[&[0, 1], &[1, 0], &[0, 1], &[0, 1]])
    }

    /// Open-door graph between cells, boundary doors excluded
    fn door_graph(grid: &Grid) -> UnGraph<Position, ()> {
        let mut graph = UnGraph::new_undirected();
        let nodes: Vec<_> = grid.cells().map(|p| graph.add_node(p)).collect();
        let cols = grid.cols();
        for p in grid.cells() {
            for d in [Down, Right] {
                let n = grid.step(p, d);
                if grid.can_go(p, d) && grid.contains(n) {
                    let a = p.row as usize * cols + p.col as usize;
                    let b = n.row as usize * cols + n.col as usize;
                    graph.add_edge(nodes[a], nodes[b], ());
                }
            }
        }
        graph
    }

    #[test]
    fn scripted_2x2_has_known_doors() {
        let grid = generate(2, 2, &mut scripted_2x2()).unwrap();
        let doors: Vec<u8> = grid.cells().map(|p| grid.doors(p)).collect();
        assert_eq!(doors, vec![2, 10, 13, 5]);
        assert_eq!(grid.entrance(), Some(Position::new(1, 0)));
        assert_eq!(grid.exit(), Some(Position::new(0, 1)));
    }

    #[test]
    fn generated_mazes_are_spanning_trees() {
        for (rows, cols) in [(1, 1), (1, 7), (6, 1), (2, 2), (5, 8), (13, 21)] {
            for seed in 0..5 {
                let grid = MazeGenerator::new(Some(seed))
                    .generate_maze(rows, cols)
                    .unwrap();
                let graph = door_graph(&grid);

                assert_eq!(graph.edge_count(), rows * cols - 1, "{rows}x{cols} seed {seed}");
                assert_eq!(connected_components(&graph), 1);
                assert!(!is_cyclic_undirected(&graph));
                assert!(grid.cells().all(|p| grid.is_visited(p)));
            }
        }
    }

    #[test]
    fn doors_are_reciprocal() {
        let grid = MazeGenerator::new(Some(3)).generate_maze(9, 11).unwrap();
        for p in grid.cells() {
            for d in Direction::ALL {
                let n = grid.step(p, d);
                if grid.contains(n) {
                    assert_eq!(grid.can_go(p, d), grid.can_go(n, d.opposite()));
                }
            }
        }
    }

    #[test]
    fn exactly_one_entrance_and_one_exit() {
        for seed in 0..10 {
            let grid = MazeGenerator::new(Some(seed)).generate_maze(7, 4).unwrap();
            let last = grid.cols() as isize - 1;

            assert_eq!(grid.col(0).filter(|&p| grid.can_go(p, Left)).count(), 1);
            assert_eq!(grid.col(last).filter(|&p| grid.can_go(p, Right)).count(), 1);
            assert_eq!(grid.row(0).filter(|&p| grid.can_go(p, Up)).count(), 0);
            let bottom = grid.rows() as isize - 1;
            assert_eq!(grid.row(bottom).filter(|&p| grid.can_go(p, Down)).count(), 0);
        }
    }

    #[test]
    fn single_cell_has_only_entrance_and_exit() {
        let grid = MazeGenerator::new(Some(0)).generate_maze(1, 1).unwrap();
        let cell = Position::new(0, 0);
        assert_eq!(grid.doors(cell), Left.door_mask() | Right.door_mask());
        assert_eq!(grid.entrance(), Some(cell));
        assert_eq!(grid.exit(), Some(cell));
    }

    #[test]
    fn same_seed_same_maze() {
        let a = MazeGenerator::new(Some(42)).generate_maze(10, 10).unwrap();
        let b = MazeGenerator::new(Some(42)).generate_maze(10, 10).unwrap();
        assert!(a.cells().all(|p| a.doors(p) == b.doors(p)));
    }

    #[test]
    fn zero_sized_maze_is_rejected() {
        let mut random = StdRng::seed_from_u64(0);
        assert_eq!(
            generate(0, 5, &mut random).unwrap_err(),
            MazeError::InvalidDimensions { rows: 0, cols: 5 }
        );
    }

    #[test]
    fn large_maze_does_not_overflow_stack() {
        let grid = MazeGenerator::new(Some(1)).generate_maze(300, 300).unwrap();
        assert_eq!(door_graph(&grid).edge_count(), 300 * 300 - 1);
    }
}
