use crate::grid::Cell;

/// Cost of a horizontal or vertical step
pub const ORTHOGONAL_COST: f64 = 1.0;
/// Cost of a diagonal step
pub const DIAGONAL_COST: f64 = 1.5;

/// Octile-like distance between two cells: as many diagonal steps as possible, the rest straight.
///
/// For neighbouring cells this is exactly the cost of moving between them, for cells further
/// apart it is the estimate used to guide the search towards the finish.
#[inline]
pub fn distance(a: Cell, b: Cell) -> f64 {
    let dr = a.row.abs_diff(b.row);
    let dc = a.col.abs_diff(b.col);

    dr.min(dc) as f64 * DIAGONAL_COST + dr.abs_diff(dc) as f64 * ORTHOGONAL_COST
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::grid::Kind;

    fn at(row: usize, col: usize) -> Cell {
        Cell::new(row, col, Kind::Open)
    }

    #[test]
    fn test_step_costs() {
        assert_eq!(distance(at(1, 1), at(1, 1)), 0.0);
        assert_eq!(distance(at(1, 1), at(0, 1)), 1.0);
        assert_eq!(distance(at(1, 1), at(1, 2)), 1.0);
        assert_eq!(distance(at(1, 1), at(0, 0)), 1.5);
        assert_eq!(distance(at(1, 1), at(2, 2)), 1.5);
    }

    #[test]
    fn test_long_range() {
        assert_eq!(distance(at(0, 0), at(3, 5)), 3.0 * 1.5 + 2.0);
        assert_eq!(distance(at(3, 5), at(0, 0)), distance(at(0, 0), at(3, 5)));
        assert_eq!(distance(at(0, 0), at(0, 7)), 7.0);
        assert_eq!(distance(at(4, 0), at(0, 4)), 6.0);
    }

    #[test]
    fn test_ignores_kind() {
        let a = Cell::new(2, 2, Kind::Start);
        let b = Cell::new(4, 3, Kind::Finish);
        assert_eq!(distance(a, b), distance(at(2, 2), at(4, 3)));
    }

    #[test]
    fn test_triangle_inequality() {
        for r in 0..5 {
            for c in 0..5 {
                let m = at(r, c);
                let a = at(0, 4);
                let b = at(4, 1);
                assert!(distance(a, b) <= distance(a, m) + distance(m, b));
            }
        }
    }
}
