use log::debug;

use crate::grid::Cell;

/// Marks the route on a copy of the map text using `*`
pub fn render(text: &str, path: &[Cell]) -> String {
    render_with(text, path, '*')
}

/// Marks the route on a copy of the map text.
///
/// Every character on the path is replaced by `marker`, everything else (including the line
/// separators and a trailing newline) is kept as it was.
pub fn render_with(text: &str, path: &[Cell], marker: char) -> String {
    let mut lines: Vec<Vec<char>> = text.split('\n').map(|l| l.chars().collect()).collect();

    for cell in path {
        match lines.get_mut(cell.row).and_then(|l| l.get_mut(cell.col)) {
            Some(symbol) => *symbol = marker,
            None => debug!("{} is outside the map text, not marked", cell),
        }
    }

    lines
        .iter()
        .map(|l| l.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::grid::Kind;

    #[test]
    fn test_marks_path_cells() {
        let path = [Cell::new(0, 0, Kind::Start), Cell::new(1, 1, Kind::Finish)];
        assert_eq!(render("S.\n.X", &path), "*.\n.*");
    }

    #[test]
    fn test_keeps_everything_else() {
        let text = "S..B\r\n.B..\r\n...X\r\n";
        let path = [
            Cell::new(0, 0, Kind::Start),
            Cell::new(1, 0, Kind::Open),
            Cell::new(2, 1, Kind::Open),
            Cell::new(2, 2, Kind::Open),
            Cell::new(2, 3, Kind::Finish),
        ];
        let output = render_with(text, &path, 'o');

        assert_eq!(output, "o..B\r\noB..\r\n.ooo\r\n");
        assert_eq!(output.len(), text.len());
    }

    #[test]
    fn test_does_not_change_input() {
        let text = String::from("S.X");
        let output = render(&text, &[Cell::new(0, 1, Kind::Open)]);
        assert_eq!(text, "S.X");
        assert_eq!(output, "S*X");
    }

    #[test]
    fn test_ignores_cells_outside_text() {
        assert_eq!(render("S.X", &[Cell::new(4, 4, Kind::Open)]), "S.X");
    }
}
