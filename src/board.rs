use std::fmt;

/// The rules oracle the search is built on.
///
/// A board knows how many cells it has and whether a placement is legal. The search never
/// inspects the position itself: it only copies boards, probes placements on the copies and
/// applies the ones that turned out to be legal.
pub trait Board: Clone {
    /// Returns the number of cells on the board. Cells are addressed by `0..cell_count()`.
    fn cell_count(&self) -> usize;

    /// Tries to apply a placement.
    ///
    /// On [`Legality::Legal`] the board holds the resulting position. On [`Legality::Illegal`]
    /// the board must be left as it was.
    fn place(&mut self, placement: Placement) -> Legality;

    /// Checks a placement against a copy, leaving `self` untouched.
    fn is_legal(&self, placement: Placement) -> bool {
        let mut after = self.clone();
        after.place(placement).is_legal()
    }

    /// Returns every cell, in ascending order, on which `color` could legally place right now.
    fn legal_cells(&self, color: Color) -> Vec<usize> {
        (0..self.cell_count())
            .filter(|&cell| self.is_legal(Placement::new(cell, color)))
            .collect()
    }
}

/// Result of asking the oracle to apply a placement.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Legality {
    /// The placement was applied.
    Legal,
    /// The placement was rejected and the board is unchanged.
    Illegal,
}

impl Legality {
    pub fn is_legal(self) -> bool {
        self == Legality::Legal
    }
}

/// One of the two sides.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Returns the other side.
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Parses the role labels used in agent arguments.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "black" => Some(Color::Black),
            "white" => Some(Color::White),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::White => "white",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A stone of `color` placed on `cell`.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub struct Placement {
    pub cell: usize,
    pub color: Color,
}

impl Placement {
    pub const fn new(cell: usize, color: Color) -> Self {
        Self { cell, color }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.color, self.cell)
    }
}
