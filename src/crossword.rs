use std::{cmp::Reverse, collections::BTreeSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::{grid::Grid, placed_word::PlacedWord, word::{Direction, Position, Word}};

/// Error type for possible errors when working with crosswords
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrosswordError
{
    #[error("Grid dimensions {width}x{height} are out of range, each side must be positive and the grid at most {} cells.", Grid::MAX_CELLS)]
    InvalidDimensions { width: usize, height: usize },
    #[error("{0:?} is not an uppercase letter A-Z.")]
    InvalidLetter(char),
    #[error("{0:?} is not a word made of letters A-Z.")]
    InvalidWord(String),
    #[error("Grid rows have different lengths.")]
    RaggedGrid,
    #[error("Cell ({row}, {col}) is outside of the grid.")]
    CellOutOfBounds { row: i32, col: i32 },
    #[error("The word {word} does not fit in the grid at ({row}, {col}).")]
    OutOfBounds { word: String, row: i32, col: i32 },
    #[error("The word {word} conflicts with another letter at ({row}, {col}).")]
    ConflictingLetter { word: String, row: i32, col: i32 },
    #[error("Cannot add the word {0} to the crossword.")]
    CantAddWord(String),
    #[error("The word {0} is already in the crossword.")]
    WordAlreadyExists(String),
}

/// Weight of a reused letter against the distance from the center when ranking [candidates](CandidatePlacement)
///
/// Must stay larger than any distance in a reasonably sized grid.
pub const INTERSECTION_WEIGHT: i64 = 100;

/// Checks if a [word](Word) can be placed on the [grid](Grid) starting at `position`
///
/// All of the following must hold:
/// - every letter lies inside the grid
/// - the cells right before the first letter and right after the last one are empty (or outside the grid),
///   so the word never runs into another word end to end
/// - every cell is either empty or already holds the same letter (this is how words cross)
/// - every empty cell that the word fills has empty neighbours on both sides across the word's direction,
///   so the word never runs alongside another one without crossing it
///
/// ```
/// # use crossword_synth::crossword::is_valid_placement;
/// # use crossword_synth::grid::Grid;
/// # use crossword_synth::placed_word::PlacedWord;
/// # use crossword_synth::word::{Direction, Position, Word};
/// let hello = Word::new("hello").unwrap();
/// let grid = Grid::new(5, 5).unwrap()
///     .with_word(&PlacedWord::new(hello, Position::new(0, 0), Direction::Across)).unwrap();
///                                                                                       //     -----
/// let halo = Word::new("halo").unwrap();                                                //    |HELLO|
/// assert!(is_valid_placement(&grid, &halo, Position::new(0, 0), Direction::Down));      //    |A    |
/// assert!(!is_valid_placement(&grid, &halo, Position::new(1, 0), Direction::Across));   //    |L    |
/// assert!(!is_valid_placement(&grid, &halo, Position::new(2, 1), Direction::Down));     //    |O    |
///                                                                                       //     -----
/// ```
pub fn is_valid_placement(grid: &Grid, word: &Word, position: Position, direction: Direction) -> bool
{
    let placed = PlacedWord::new(word.clone(), position, direction);
    let across = direction.opposite();

    if !grid.contains(placed.position) || !grid.contains(placed.after_end().step(direction, -1)) { return false; }
    if !grid.is_open(placed.before_start()) || !grid.is_open(placed.after_end()) { return false; }

    let fits = placed.cells().all(|(pos, letter)| match grid.letter_at(pos)
    {
        Some(existing) => existing == letter,
        None => grid.is_open(pos.step(across, -1)) && grid.is_open(pos.step(across, 1)),
    });
    fits
}

/// A legal way to put a word on the grid, with what is needed to rank it against the others
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePlacement
{
    pub placed_word: PlacedWord,
    /// Count of letters of the word that are already on the grid
    pub intersections: usize,
    /// Manhattan distance from the word's [midpoint](PlacedWord::midpoint) to the grid center
    pub distance_from_center: i64,
}

impl CandidatePlacement
{
    fn new(grid: &Grid, placed_word: PlacedWord) -> CandidatePlacement
    {
        let intersections = placed_word.cells().filter(|(pos, _)| grid.letter_at(*pos).is_some()).count();
        let center = grid_center(grid);
        let mid = placed_word.midpoint();
        let distance_from_center = ((mid.row - center.row).abs() + (mid.col - center.col).abs()) as i64;

        CandidatePlacement { placed_word, intersections, distance_from_center }
    }

    pub fn score(&self) -> i64
    {
        self.intersections as i64 * INTERSECTION_WEIGHT - self.distance_from_center
    }
}

fn grid_center(grid: &Grid) -> Position
{
    Position::new((grid.height() / 2) as i32, (grid.width() / 2) as i32)
}

/// Where a word that opens the puzzle goes: centered on the middle row (or column)
fn centered_placement(grid: &Grid, word: &Word, direction: Direction) -> PlacedWord
{
    let (width, height, len) = (grid.width() as i32, grid.height() as i32, word.len() as i32);
    let position = match direction
    {
        Direction::Across => Position::new(height / 2, (width - len).div_euclid(2)),
        Direction::Down => Position::new((height - len).div_euclid(2), width / 2),
    };
    PlacedWord::new(word.clone(), position, direction)
}

/// # Represents a crossword under construction
///
/// A [grid](Grid) together with the [words](PlacedWord) committed to it, in commit order.
/// A crossword can't have two words with the same value in it.
///
/// ```
/// # use crossword_synth::crossword::Crossword;
/// # use crossword_synth::word::{Direction, Word};
/// let mut cw = Crossword::new(7, 5).unwrap();
///
/// let cat = cw.best_placement(&Word::new("cat").unwrap(), Some(Direction::Across)).unwrap();
/// cw.add_word(cat.placed_word).unwrap();
/// let car = cw.best_placement(&Word::new("car").unwrap(), None).unwrap();
/// cw.add_word(car.placed_word).unwrap();
///
/// assert_eq!(cw.grid().to_string(), ".......\n...C...\n..CAT..\n...R...\n.......\n");
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
pub struct Crossword
{
    grid: Grid,
    placements: Vec<PlacedWord>,
}

impl Crossword
{
    /// Creates a new empty crossword
    pub fn new(width: usize, height: usize) -> Result<Crossword, CrosswordError>
    {
        Ok(Crossword { grid: Grid::new(width, height)?, placements: vec![] })
    }

    /// Rebuilds a crossword by writing the letters of every placement onto a blank grid
    ///
    /// The placements are not checked against the crossword rules, only against the grid bounds,
    /// the letters already written and each other's values.
    ///
    /// # Errors
    ///
    /// [CrosswordError::InvalidDimensions] - width or height is zero, or the grid is [too large](Grid::MAX_CELLS)\
    /// [CrosswordError::OutOfBounds] - a placement does not fit in the grid\
    /// [CrosswordError::ConflictingLetter] - two placements put different letters in the same cell\
    /// [CrosswordError::WordAlreadyExists] - a word is placed twice
    pub fn from_placements(width: usize, height: usize, placements: impl IntoIterator<Item = PlacedWord>) -> Result<Crossword, CrosswordError>
    {
        let mut cw = Crossword::new(width, height)?;
        for placed in placements
        {
            if cw.find_word(&placed.value).is_some()
            {
                return Err(CrosswordError::WordAlreadyExists(placed.value.to_string()));
            }
            cw.grid = cw.grid.with_word(&placed)?;
            cw.placements.push(placed);
        }
        Ok(cw)
    }

    pub fn grid(&self) -> &Grid
    {
        &self.grid
    }

    pub fn placements(&self) -> &[PlacedWord]
    {
        &self.placements
    }

    pub fn into_parts(self) -> (Grid, Vec<PlacedWord>)
    {
        (self.grid, self.placements)
    }

    /// Finds the [word](PlacedWord) given its value.
    pub fn find_word(&self, word: &Word) -> Option<&PlacedWord>
    {
        self.placements.iter().find(|w| w.value == *word)
    }

    /// Checks the word against the current grid, see [is_valid_placement]
    pub fn can_word_be_placed(&self, word: &PlacedWord) -> bool
    {
        is_valid_placement(&self.grid, &word.value, word.position, word.direction)
    }

    /// Returns every legal placement of the [word](Word), in the order they were found
    ///
    /// With `first_word` set, the only candidate is the word centered on the grid in that direction
    /// (and there is none if it doesn't fit).
    /// Otherwise the word has to cross an already placed word: every pair of equal letters between the word and a
    /// placed word gives one position, and positions reached through several pairs are kept once.
    pub fn calculate_possible_placements(&self, word: &Word, first_word: Option<Direction>) -> Vec<CandidatePlacement>
    {
        if let Some(direction) = first_word
        {
            let placed = centered_placement(&self.grid, word, direction);
            return if self.can_word_be_placed(&placed) { vec![CandidatePlacement::new(&self.grid, placed)] } else { vec![] };
        }

        let mut seen = BTreeSet::new();
        self.placements.iter()
            .flat_map(|cur_word| cur_word.calculate_possible_ways_to_add_word(word))
            .filter(|w| seen.insert((w.position, w.direction)))
            .filter(|w| self.can_word_be_placed(w))
            .map(|w| CandidatePlacement::new(&self.grid, w))
            .collect()
    }

    /// Returns the highest scoring [candidate](CandidatePlacement), the first one found on ties
    pub fn best_placement(&self, word: &Word, first_word: Option<Direction>) -> Option<CandidatePlacement>
    {
        self.calculate_possible_placements(word, first_word)
            .into_iter()
            .min_by_key(|candidate| Reverse(candidate.score()))
    }

    /// Adds the [word](PlacedWord) to the crossword
    ///
    /// # Errors
    ///
    /// [CrosswordError::WordAlreadyExists] - a word with same value already exists in the crossword\
    /// [CrosswordError::CantAddWord] - the placement breaks the crossword rules on the current grid
    pub fn add_word(&mut self, word: PlacedWord) -> Result<(), CrosswordError>
    {
        if self.find_word(&word.value).is_some() { return Err(CrosswordError::WordAlreadyExists(word.value.to_string())); }
        if !self.can_word_be_placed(&word) { return Err(CrosswordError::CantAddWord(word.value.to_string())); }

        self.grid = self.grid.with_word(&word)?;
        self.placements.push(word);
        Ok(())
    }
}


#[cfg(test)]
mod tests
{
    use super::*;

    fn word(value: &str) -> Word
    {
        Word::new(value).unwrap()
    }

    fn placed(value: &str, row: i32, col: i32, direction: Direction) -> PlacedWord
    {
        PlacedWord::new(word(value), Position::new(row, col), direction)
    }

    fn crossword(width: usize, height: usize, words: Vec<PlacedWord>) -> Crossword
    {
        Crossword::from_placements(width, height, words).unwrap()
    }

    #[test]
    fn test_validator_bounds()
    {
        let grid = Grid::new(5, 5).unwrap();

        assert!(is_valid_placement(&grid, &word("hello"), Position::new(4, 0), Direction::Across));
        assert!(!is_valid_placement(&grid, &word("hello"), Position::new(4, 1), Direction::Across));
        assert!(!is_valid_placement(&grid, &word("hello"), Position::new(1, 0), Direction::Down));
        assert!(!is_valid_placement(&grid, &word("hi"), Position::new(-1, 0), Direction::Down));
        assert!(!is_valid_placement(&grid, &word("toolong"), Position::new(0, 0), Direction::Across));
    }

    #[test]
    fn test_validator_terminator_cells()
    {
        let cw = crossword(7, 3, vec![placed("cat", 1, 0, Direction::Across)]);

        //  .......
        //  CATDOG.   <- DOG would make CATDOG
        //  .......
        assert!(!is_valid_placement(cw.grid(), &word("dog"), Position::new(1, 3), Direction::Across));
        assert!(is_valid_placement(cw.grid(), &word("dog"), Position::new(1, 4), Direction::Across));
    }

    #[test]
    fn test_validator_letter_compatibility()
    {
        let cw = crossword(5, 5, vec![placed("cat", 2, 1, Direction::Across)]);

        assert!(is_valid_placement(cw.grid(), &word("ban"), Position::new(1, 2), Direction::Down));
        assert!(!is_valid_placement(cw.grid(), &word("bun"), Position::new(1, 2), Direction::Down));
    }

    #[test]
    fn test_validator_parallel_adjacency()
    {
        let cw = crossword(6, 6, vec![placed("cat", 2, 1, Direction::Across)]);

        // running right under CAT
        assert!(!is_valid_placement(cw.grid(), &word("dog"), Position::new(3, 1), Direction::Across));
        // touching its side with a single letter
        assert!(!is_valid_placement(cw.grid(), &word("dog"), Position::new(3, 3), Direction::Across));
        // one free row between them
        assert!(is_valid_placement(cw.grid(), &word("dog"), Position::new(4, 1), Direction::Across));
        // a vertical word next to the C, not crossing
        assert!(!is_valid_placement(cw.grid(), &word("ox"), Position::new(1, 0), Direction::Down));
    }

    #[test]
    fn test_first_word_is_centered()
    {
        let cw = Crossword::new(9, 9).unwrap();

        let across = cw.calculate_possible_placements(&word("hello"), Some(Direction::Across));
        let down = cw.calculate_possible_placements(&word("hello"), Some(Direction::Down));

        assert_eq!(across.len(), 1);
        assert_eq!(across[0].placed_word, placed("hello", 4, 2, Direction::Across));
        assert_eq!(down[0].placed_word, placed("hello", 2, 4, Direction::Down));
        assert_eq!(across[0].intersections, 0);
        assert_eq!(across[0].distance_from_center, 0);
    }

    #[test]
    fn test_first_word_too_long()
    {
        let cw = Crossword::new(5, 5).unwrap();

        assert!(cw.calculate_possible_placements(&word("banana"), Some(Direction::Across)).is_empty());
        assert!(cw.best_placement(&word("banana"), Some(Direction::Down)).is_none());
    }

    #[test]
    fn test_search_needs_a_crossing()
    {
        let cw = crossword(10, 10, vec![placed("cat", 5, 3, Direction::Across)]);

        assert!(cw.calculate_possible_placements(&word("dog"), None).is_empty());
    }

    #[test]
    fn test_search_finds_crossings()
    {
        let cw = crossword(10, 10, vec![placed("cat", 5, 3, Direction::Across)]);
        let candidates = cw.calculate_possible_placements(&word("car"), None);

        assert_eq!(candidates, vec![
            CandidatePlacement { placed_word: placed("car", 5, 3, Direction::Down), intersections: 1, distance_from_center: 3 },
            CandidatePlacement { placed_word: placed("car", 4, 4, Direction::Down), intersections: 1, distance_from_center: 1 },
        ]);
        assert_eq!(cw.best_placement(&word("car"), None).unwrap().placed_word, placed("car", 4, 4, Direction::Down));
    }

    #[test]
    fn test_search_deduplicates_positions()
    {
        //  .......
        //  .C.B...
        //  .A.A...
        //  .TAD...   <- reached through the T of CAT and through the D of BAD
        let cw = crossword(7, 7, vec![
            placed("cat", 1, 1, Direction::Down),
            placed("bad", 1, 3, Direction::Down),
        ]);
        let candidates = cw.calculate_possible_placements(&word("tad"), None);

        assert_eq!(candidates, vec![
            CandidatePlacement { placed_word: placed("tad", 3, 1, Direction::Across), intersections: 2, distance_from_center: 1 },
        ]);
    }

    #[test]
    fn test_score_prefers_intersections()
    {
        let near = CandidatePlacement { placed_word: placed("tad", 7, 6, Direction::Across), intersections: 1, distance_from_center: 0 };
        let far = CandidatePlacement { placed_word: placed("tad", 0, 0, Direction::Across), intersections: 2, distance_from_center: 14 };

        assert_eq!(near.score(), 100);
        assert_eq!(far.score(), 186);
        assert!(far.score() > near.score());
    }

    #[test]
    fn test_best_placement_keeps_first_of_equal_scores()
    {
        //  .........
        //  ...ABA...
        //  ...C.C...   <- both ways of hanging AC score the same
        let cw = crossword(9, 9, vec![placed("aba", 4, 3, Direction::Across)]);
        let candidates = cw.calculate_possible_placements(&word("ac"), None);

        assert_eq!(candidates.iter().map(|c| c.placed_word.position).collect::<Vec<_>>(), vec![Position::new(4, 3), Position::new(4, 5)]);
        assert_eq!(candidates[0].score(), candidates[1].score());
        assert_eq!(cw.best_placement(&word("ac"), None).unwrap().placed_word, placed("ac", 4, 3, Direction::Down));
    }

    #[test]
    fn test_add_word_errors()
    {
        let mut cw = crossword(10, 10, vec![placed("cat", 5, 3, Direction::Across)]);

        assert_eq!(cw.add_word(placed("cat", 0, 0, Direction::Across)), Err(CrosswordError::WordAlreadyExists("CAT".to_owned())));
        assert_eq!(cw.add_word(placed("dog", 6, 3, Direction::Across)), Err(CrosswordError::CantAddWord("DOG".to_owned())));
        assert!(cw.add_word(placed("car", 5, 3, Direction::Down)).is_ok());
        assert_eq!(cw.placements().len(), 2);
    }

    #[test]
    fn test_from_placements_errors()
    {
        assert!(matches!(Crossword::from_placements(3, 3, vec![placed("cats", 0, 0, Direction::Across)]), Err(CrosswordError::OutOfBounds { .. })));
        assert!(matches!(Crossword::from_placements(3, 3, vec![placed("cat", 0, 0, Direction::Across), placed("dog", 0, 0, Direction::Down)]), Err(CrosswordError::ConflictingLetter { .. })));
        assert!(matches!(Crossword::from_placements(3, 3, vec![placed("cat", 0, 0, Direction::Across), placed("cat", 1, 0, Direction::Across)]), Err(CrosswordError::WordAlreadyExists(_))));
        assert!(matches!(Crossword::from_placements(0, 3, vec![]), Err(CrosswordError::InvalidDimensions { .. })));
    }
}
