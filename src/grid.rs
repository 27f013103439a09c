use std::fmt;
use serde::{Deserialize, Serialize};
use crate::{crossword::CrosswordError, placed_word::PlacedWord, word::Position};

/// A single uppercase letter `A`-`Z` stored in a [grid](Grid) cell
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Letter(u8);

impl Letter
{
    pub fn new(c: char) -> Option<Letter>
    {
        c.is_ascii_uppercase().then_some(Letter(c as u8))
    }

    // callers guarantee the byte is in b'A'..=b'Z'
    pub(crate) fn from_ascii_uppercase(b: u8) -> Letter
    {
        debug_assert!(b.is_ascii_uppercase());
        Letter(b)
    }
}

impl TryFrom<char> for Letter
{
    type Error = CrosswordError;

    fn try_from(c: char) -> Result<Self, Self::Error>
    {
        Letter::new(c).ok_or(CrosswordError::InvalidLetter(c))
    }
}

impl From<Letter> for char
{
    fn from(letter: Letter) -> Self
    {
        letter.0 as char
    }
}

impl fmt::Display for Letter
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}", char::from(*self))
    }
}

/// A grid cell, either empty or holding a [letter](Letter)
pub type Cell = Option<Letter>;

/// # Represents the letter matrix of a crossword
///
/// `height` rows of `width` cells each. The dimensions are fixed at construction.
///
/// Placing a word never changes a grid in place, [Grid::with_word] returns a new grid instead,
/// so the grids of different attempts can be kept around and compared.
///
/// ```
/// # use crossword_synth::grid::Grid;
/// # use crossword_synth::placed_word::PlacedWord;
/// # use crossword_synth::word::{Direction, Position, Word};
/// let empty = Grid::new(5, 3).unwrap();
/// let filled = empty.with_word(&PlacedWord::new(Word::new("hello").unwrap(), Position::new(1, 0), Direction::Across)).unwrap();
///
/// assert_eq!(empty.filled_count(), 0);
/// assert_eq!(filled.to_string(), ".....\nHELLO\n.....\n");
/// ```
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct Grid
{
    width: usize,
    height: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid
{
    /// Largest number of cells a grid may have
    pub const MAX_CELLS: usize = 1 << 20;

    /// Creates an empty grid
    ///
    /// # Errors
    ///
    /// [CrosswordError::InvalidDimensions] - width or height is zero, or the grid has more than [Grid::MAX_CELLS] cells
    pub fn new(width: usize, height: usize) -> Result<Grid, CrosswordError>
    {
        check_dimensions(width, height)?;
        Ok(Grid { width, height, cells: vec![vec![None; width]; height] })
    }

    pub fn width(&self) -> usize
    {
        self.width
    }

    pub fn height(&self) -> usize
    {
        self.height
    }

    pub fn contains(&self, pos: Position) -> bool
    {
        pos.row >= 0 && pos.col >= 0 && (pos.row as usize) < self.height && (pos.col as usize) < self.width
    }

    /// Returns the letter at the position, None if the cell is empty or out of the grid
    pub fn letter_at(&self, pos: Position) -> Cell
    {
        if !self.contains(pos) { return None; }
        self.cells[pos.row as usize][pos.col as usize]
    }

    /// True if the cell is empty or out of the grid
    pub fn is_open(&self, pos: Position) -> bool
    {
        self.letter_at(pos).is_none()
    }

    /// Sets a single cell (used when letters are edited by hand)
    ///
    /// # Errors
    ///
    /// [CrosswordError::CellOutOfBounds] - the position is not in the grid
    pub fn set_letter(&mut self, pos: Position, cell: Cell) -> Result<(), CrosswordError>
    {
        if !self.contains(pos)
        {
            return Err(CrosswordError::CellOutOfBounds { row: pos.row, col: pos.col });
        }
        self.cells[pos.row as usize][pos.col as usize] = cell;
        Ok(())
    }

    /// Returns a copy of this grid with the letters of the word written in
    ///
    /// # Errors
    ///
    /// [CrosswordError::OutOfBounds] - some letter falls outside of the grid\
    /// [CrosswordError::ConflictingLetter] - some cell already holds a different letter
    pub fn with_word(&self, word: &PlacedWord) -> Result<Grid, CrosswordError>
    {
        let mut grid = self.clone();
        for (pos, letter) in word.cells()
        {
            if !grid.contains(pos)
            {
                return Err(CrosswordError::OutOfBounds { word: word.value.to_string(), row: pos.row, col: pos.col });
            }
            let cell = &mut grid.cells[pos.row as usize][pos.col as usize];
            match *cell
            {
                Some(existing) if existing != letter =>
                    return Err(CrosswordError::ConflictingLetter { word: word.value.to_string(), row: pos.row, col: pos.col }),
                _ => *cell = Some(letter),
            }
        }
        Ok(grid)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]>
    {
        self.cells.iter().map(|row| row.as_slice())
    }

    pub fn filled_count(&self) -> usize
    {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }
}

// positions are i32, so every side has to fit one as well
fn check_dimensions(width: usize, height: usize) -> Result<(), CrosswordError>
{
    let fits = width > 0
        && height > 0
        && i32::try_from(width).is_ok()
        && i32::try_from(height).is_ok()
        && width.checked_mul(height).is_some_and(|cells| cells <= Grid::MAX_CELLS);

    if fits { Ok(()) } else { Err(CrosswordError::InvalidDimensions { width, height }) }
}

impl TryFrom<Vec<Vec<Cell>>> for Grid
{
    type Error = CrosswordError;

    fn try_from(cells: Vec<Vec<Cell>>) -> Result<Self, Self::Error>
    {
        let height = cells.len();
        let width = cells.first().map_or(0, Vec::len);
        check_dimensions(width, height)?;
        if cells.iter().any(|row| row.len() != width)
        {
            return Err(CrosswordError::RaggedGrid);
        }
        Ok(Grid { width, height, cells })
    }
}

impl From<Grid> for Vec<Vec<Cell>>
{
    fn from(grid: Grid) -> Self
    {
        grid.cells
    }
}

impl fmt::Display for Grid
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        for row in self.rows()
        {
            for cell in row
            {
                match cell
                {
                    Some(letter) => write!(f, "{letter}")?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
