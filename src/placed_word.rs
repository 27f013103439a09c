use itertools::Itertools;
use serde::{Deserialize, Serialize};
use crate::{crossword::CrosswordError, grid::Letter, word::{Direction, Position, Word}};

/// Represents a [word](Word) committed to a [crossword](crate::crossword::Crossword)
///
/// `position` is the cell of the first letter, the rest of the letters follow in `direction`.
///
/// Serialized as the record `{word, row, col, isHorizontal}`:
/// ```
/// # use crossword_synth::placed_word::PlacedWord;
/// # use crossword_synth::word::{Direction, Position, Word};
/// let placed = PlacedWord::new(Word::new("hello").unwrap(), Position::new(4, 2), Direction::Across);
///
/// assert_eq!(serde_json::to_string(&placed).unwrap(), r#"{"word":"HELLO","row":4,"col":2,"isHorizontal":true}"#);
/// ```
#[derive(Clone, Eq, PartialEq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "PlacementRecord", into = "PlacementRecord")]
pub struct PlacedWord
{
    pub position: Position,
    pub direction: Direction,
    pub value: Word,
}

/// Exchange form of a [PlacedWord]
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlacementRecord
{
    word: String,
    row: i32,
    col: i32,
    is_horizontal: bool,
}

impl TryFrom<PlacementRecord> for PlacedWord
{
    type Error = CrosswordError;

    fn try_from(record: PlacementRecord) -> Result<Self, Self::Error>
    {
        Ok(PlacedWord::new(Word::new(&record.word)?, Position::new(record.row, record.col), Direction::from_horizontal(record.is_horizontal)))
    }
}

impl From<PlacedWord> for PlacementRecord
{
    fn from(word: PlacedWord) -> Self
    {
        PlacementRecord
        {
            row: word.position.row,
            col: word.position.col,
            is_horizontal: word.direction.is_horizontal(),
            word: word.value.into(),
        }
    }
}

impl PlacedWord
{
    pub fn new(val: Word, pos: Position, dir: Direction) -> PlacedWord
    {
        PlacedWord { value: val, position: pos, direction: dir }
    }

    pub fn len(&self) -> usize
    {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.value.is_empty()
    }

    pub fn is_horizontal(&self) -> bool
    {
        self.direction.is_horizontal()
    }

    /// Positions and letters of every cell of the word, from the first letter to the last
    pub fn cells(&self) -> impl Iterator<Item = (Position, Letter)> + '_
    {
        self.value.letters().enumerate().map(|(index, letter)| (self.position.step(self.direction, index as i32), letter))
    }

    /// The cell right before the first letter
    pub fn before_start(&self) -> Position
    {
        self.position.step(self.direction, -1)
    }

    /// The cell right after the last letter
    pub fn after_end(&self) -> Position
    {
        self.position.step(self.direction, self.len() as i32)
    }

    /// The middle cell of the word (the later one for words of even length)
    pub fn midpoint(&self) -> Position
    {
        self.position.step(self.direction, (self.len() / 2) as i32)
    }

    pub fn covers(&self, pos: Position) -> bool
    {
        self.cells().any(|(cell, _)| cell == pos)
    }

    /// Returns the cell shared with the other word if the two cross
    pub fn crossing_with(&self, other: &PlacedWord) -> Option<Position>
    {
        if self.direction == other.direction { return None; }
        self.cells().map(|(pos, _)| pos).find(|pos| other.covers(*pos))
    }

    /// Returns all the ways to put another [word](Word) across this one, so that two equal letters line up
    ///
    /// The result follows the letters of the new word, then the letters of this word, and may contain placements
    /// that do not fit in any grid.
    ///
    /// ## Examples
    /// ```
    /// # use crossword_synth::placed_word::PlacedWord;
    /// # use crossword_synth::word::{Direction, Position, Word};
    /// let hello = PlacedWord::new(Word::new("hello").unwrap(), Position::new(3, 0), Direction::Across);
    ///
    /// //     w w
    /// //     o o
    /// //     r r w
    /// // h e l l o ---> 3 ways
    /// //     d d r
    /// //         l
    /// //         d
    ///
    /// let world = Word::new("world").unwrap();
    /// assert_eq!(hello.calculate_possible_ways_to_add_word(&world), vec![
    ///     PlacedWord::new(world.clone(), Position::new(2, 4), Direction::Down),
    ///     PlacedWord::new(world.clone(), Position::new(0, 2), Direction::Down),
    ///     PlacedWord::new(world.clone(), Position::new(0, 3), Direction::Down),
    /// ]);
    /// ```
    pub fn calculate_possible_ways_to_add_word(&self, word: &Word) -> Vec<PlacedWord>
    {
        word.letters().enumerate()
            .cartesian_product(self.value.letters().enumerate().collect_vec())
            .filter(|((_, word_char), (_, self_char))| word_char == self_char)
            .map(|((word_ind, _), (self_ind, _))|
            {
                let crossing = self.position.step(self.direction, self_ind as i32);
                PlacedWord::new(
                    word.clone(),
                    crossing.step(self.direction.opposite(), -(word_ind as i32)),
                    self.direction.opposite(),
                )
            })
            .collect()
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

    #[test]
    fn test_placed_word_cells()
    {
        let down = PlacedWord::new(word("car"), Position::new(1, 2), Direction::Down);

        assert_eq!(down.cells().map(|(pos, letter)| (pos, char::from(letter))).collect_vec(), vec![
            (Position::new(1, 2), 'C'),
            (Position::new(2, 2), 'A'),
            (Position::new(3, 2), 'R'),
        ]);
        assert_eq!(down.before_start(), Position::new(0, 2));
        assert_eq!(down.after_end(), Position::new(4, 2));
        assert_eq!(down.midpoint(), Position::new(2, 2));
    }

    #[test]
    fn test_placed_word_crossing_with()
    {
        let across = PlacedWord::new(word("cat"), Position::new(5, 3), Direction::Across);
        let down = PlacedWord::new(word("car"), Position::new(4, 4), Direction::Down);
        let parallel = PlacedWord::new(word("cow"), Position::new(6, 3), Direction::Across);

        assert_eq!(across.crossing_with(&down), Some(Position::new(5, 4)));
        assert_eq!(down.crossing_with(&across), Some(Position::new(5, 4)));
        assert_eq!(across.crossing_with(&parallel), None);
    }

    #[test]
    fn test_placed_word_ways_across_vertical_word()
    {
        let down = PlacedWord::new(word("ada"), Position::new(0, 5), Direction::Down);

        // every A of the new word against every A of the placed one
        assert_eq!(down.calculate_possible_ways_to_add_word(&word("bad")), vec![
            PlacedWord::new(word("bad"), Position::new(0, 4), Direction::Across),
            PlacedWord::new(word("bad"), Position::new(2, 4), Direction::Across),
            PlacedWord::new(word("bad"), Position::new(1, 3), Direction::Across),
        ]);
        assert!(down.calculate_possible_ways_to_add_word(&word("xyz")).is_empty());
    }

    #[test]
    fn test_placed_word_record()
    {
        let placed: PlacedWord = serde_json::from_str(r#"{"word":"dog","row":1,"col":7,"isHorizontal":false}"#).unwrap();

        assert_eq!(placed, PlacedWord::new(word("DOG"), Position::new(1, 7), Direction::Down));
        assert!(serde_json::from_str::<PlacedWord>(r#"{"word":"d g","row":1,"col":7,"isHorizontal":false}"#).is_err());
        assert!(serde_json::from_str::<PlacedWord>(r#"{"word":"dog","row":1}"#).is_err());
    }
}
