use crate::board::{Board, Color, Legality, Placement};
use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Side length of the standard NoGo board.
pub const DEFAULT_SIZE: usize = 9;

/// An implementation of the `Board` trait for NoGo.
///
/// NoGo is played like Go, except that capturing is forbidden: a placement is illegal if it
/// would take the last liberty of an opponent group, or of the placing group itself. The side
/// that runs out of legal placements loses.
///
/// Cells are numbered row by row, `cell = y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoGoBoard {
    width: usize,
    height: usize,
    field: Vec<Option<Color>>,
}

impl NoGoBoard {
    /// Creates an empty board.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            field: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stone on `cell`, if any.
    pub fn stone(&self, cell: usize) -> Option<Color> {
        self.field.get(cell).copied().flatten()
    }

    fn neighbors(&self, cell: usize) -> impl Iterator<Item = usize> + use<> {
        let (x, y) = (cell % self.width, cell / self.width);
        [
            (x > 0).then(|| cell - 1),
            (x + 1 < self.width).then(|| cell + 1),
            (y > 0).then(|| cell - self.width),
            (y + 1 < self.height).then(|| cell + self.width),
        ]
        .into_iter()
        .flatten()
    }

    /// Flood fills the group containing `start` and reports whether it touches an empty cell.
    fn group_has_liberty(&self, start: usize) -> bool {
        let Some(color) = self.field[start] else {
            return true;
        };

        let mut visited = vec![false; self.field.len()];
        let mut stack = vec![start];
        visited[start] = true;
        while let Some(cell) = stack.pop() {
            for neighbor in self.neighbors(cell) {
                match self.field[neighbor] {
                    None => return true,
                    Some(stone) if stone == color && !visited[neighbor] => {
                        visited[neighbor] = true;
                        stack.push(neighbor);
                    }
                    _ => {}
                }
            }
        }
        false
    }
}

impl Default for NoGoBoard {
    /// Creates an empty 9x9 board.
    fn default() -> Self {
        NoGoBoard::new(DEFAULT_SIZE, DEFAULT_SIZE)
    }
}

impl Board for NoGoBoard {
    fn cell_count(&self) -> usize {
        self.field.len()
    }

    fn place(&mut self, placement: Placement) -> Legality {
        let cell = placement.cell;
        if self.field.get(cell) != Some(&None) {
            return Legality::Illegal;
        }

        self.field[cell] = Some(placement.color);
        let opponent = Some(placement.color.opponent());
        let captures = self
            .neighbors(cell)
            .any(|n| self.field[n] == opponent && !self.group_has_liberty(n));
        if captures || !self.group_has_liberty(cell) {
            self.field[cell] = None;
            return Legality::Illegal;
        }

        Legality::Legal
    }
}

impl FromStr for NoGoBoard {
    type Err = Error;

    /// Parses rows of `.` (empty), `X` (black) and `O` (white), separated by `/` or newlines.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| Error::InvalidBoard {
            text: text.to_string(),
            reason,
        };

        let rows: Vec<&str> = text
            .split(['/', '\n'])
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(invalid("no rows".to_string()));
        };

        let width = first.chars().count();
        let mut field = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(invalid(format!("row {y} is not {width} cells wide")));
            }
            for c in row.chars() {
                field.push(match c {
                    '.' => None,
                    'X' => Some(Color::Black),
                    'O' => Some(Color::White),
                    other => return Err(invalid(format!("unexpected '{other}' in row {y}"))),
                });
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            field,
        })
    }
}

impl fmt::Display for NoGoBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.field.chunks(self.width.max(1)) {
            for cell in row {
                let c = match cell {
                    None => '.',
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
