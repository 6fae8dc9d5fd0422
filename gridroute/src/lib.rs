//! Shortest routes through character maps.
//!
//! A map is text made of `.` (open), `S` (start), `X` (finish) and `B` (blocked) cells. Moves go
//! to any of the 8 surrounding cells, straight steps cost 1 and diagonal steps 1.5.
//!
//! ```
//! assert_eq!(gridroute::solve("S.\n.X").unwrap(), "*.\n.*");
//! ```

pub mod distance;
pub mod error;
pub mod find;
pub mod grid;
pub mod legend;
pub mod render;

pub use error::{Endpoint, Result, RouteError};
pub use find::{find_path, PathFinder, PathFinderState, PathResult};
pub use grid::{Cell, Grid, Kind};
pub use legend::Legend;

/// Parse the map text and find the cheapest route from its start to its finish
pub fn find_route(text: &str) -> Result<PathResult> {
    find_path(&Grid::parse(text)?)
}

/// Parse the map text, find the route and return the map with the route marked by `*`
pub fn solve(text: &str) -> Result<String> {
    solve_with(text, &Legend::default())
}

/// Same as [`solve`], reading and marking the map with the symbols of `legend`
pub fn solve_with(text: &str, legend: &Legend) -> Result<String> {
    legend.validate()?;

    let grid = Grid::parse_with(text, legend)?;
    let result = find_path(&grid)?;

    Ok(render::render_with(text, &result.path, legend.path))
}
