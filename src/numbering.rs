use serde::{Deserialize, Serialize};
use crate::{grid::Grid, word::{Direction, Position}};

/// An entry of the grid that got a number: the word read from its first cell
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct NumberedEntry
{
    pub number: u32,
    pub word: String,
    pub row: i32,
    pub col: i32,
}

/// # Represents the numbering of a grid
///
/// `cell_numbers` has the dimensions of the grid and holds a number for every cell that starts an
/// across or a down entry. Entries are sorted by number.
///
/// Numbering is a function of the grid letters only, so after any change of the grid it is simply
/// generated again.
///
/// ```
/// # use crossword_synth::grid::Grid;
/// # use crossword_synth::numbering::Numbering;
/// # use crossword_synth::placed_word::PlacedWord;
/// # use crossword_synth::word::{Direction, Position, Word};
/// let grid = Grid::new(3, 3).unwrap()                                                                   //     ---
///     .with_word(&PlacedWord::new(Word::new("ab").unwrap(), Position::new(0, 0), Direction::Across))     //    |AB.|
///     .unwrap()                                                                                         //    |C..|
///     .with_word(&PlacedWord::new(Word::new("ac").unwrap(), Position::new(0, 0), Direction::Down))       //    |...|
///     .unwrap();                                                                                        //     ---
///
/// let numbering = Numbering::generate(&grid);
///
/// assert_eq!(numbering.number_at(Position::new(0, 0)), Some(1));
/// assert_eq!(numbering.across_words[0].word, "AB");
/// assert_eq!(numbering.down_words[0].word, "AC");
/// ```
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Numbering
{
    pub cell_numbers: Vec<Vec<Option<u32>>>,
    pub across_words: Vec<NumberedEntry>,
    pub down_words: Vec<NumberedEntry>,
}

impl Numbering
{
    /// Scans the grid row by row and numbers every cell that starts an entry
    ///
    /// A cell starts an entry in a direction if it holds a letter, the cell before it is empty (or outside
    /// of the grid) and the cell after it holds a letter, so lone letters never count as words.
    /// A cell starting both an across and a down entry gets a single number.
    pub fn generate(grid: &Grid) -> Numbering
    {
        let mut numbering = Numbering
        {
            cell_numbers: vec![vec![None; grid.width()]; grid.height()],
            across_words: vec![],
            down_words: vec![],
        };
        let mut next_number = 1;

        for row in 0..grid.height() as i32
        {
            for col in 0..grid.width() as i32
            {
                let pos = Position::new(row, col);
                let starts_across = starts_entry(grid, pos, Direction::Across);
                let starts_down = starts_entry(grid, pos, Direction::Down);
                if !starts_across && !starts_down { continue; }

                let number = next_number;
                next_number += 1;
                numbering.cell_numbers[row as usize][col as usize] = Some(number);

                if starts_across
                {
                    numbering.across_words.push(NumberedEntry { number, word: read_entry(grid, pos, Direction::Across), row, col });
                }
                if starts_down
                {
                    numbering.down_words.push(NumberedEntry { number, word: read_entry(grid, pos, Direction::Down), row, col });
                }
            }
        }

        numbering
    }

    pub fn number_at(&self, pos: Position) -> Option<u32>
    {
        if pos.row < 0 || pos.col < 0 { return None; }
        self.cell_numbers.get(pos.row as usize)?.get(pos.col as usize).copied().flatten()
    }

    pub fn entries(&self, direction: Direction) -> &[NumberedEntry]
    {
        match direction
        {
            Direction::Across => &self.across_words,
            Direction::Down => &self.down_words,
        }
    }
}

fn starts_entry(grid: &Grid, pos: Position, direction: Direction) -> bool
{
    grid.letter_at(pos).is_some()
        && grid.is_open(pos.step(direction, -1))
        && grid.letter_at(pos.step(direction, 1)).is_some()
}

fn read_entry(grid: &Grid, start: Position, direction: Direction) -> String
{
    (0..)
        .map(|index| grid.letter_at(start.step(direction, index)))
        .take_while(Option::is_some)
        .flatten()
        .map(char::from)
        .collect()
}


#[cfg(test)]
mod tests
{
    use super::*;
    use crate::{placed_word::PlacedWord, word::Word};

    fn grid(width: usize, height: usize, words: &[(&str, i32, i32, Direction)]) -> Grid
    {
        words.iter().fold(Grid::new(width, height).unwrap(), |grid, (value, row, col, direction)|
        {
            grid.with_word(&PlacedWord::new(Word::new(value).unwrap(), Position::new(*row, *col), *direction)).unwrap()
        })
    }

    #[test]
    fn test_numbering_shared_start()
    {
        let grid = grid(4, 4, &[("ab", 0, 0, Direction::Across), ("ac", 0, 0, Direction::Down)]);
        let numbering = Numbering::generate(&grid);

        assert_eq!(numbering.across_words, vec![NumberedEntry { number: 1, word: "AB".to_owned(), row: 0, col: 0 }]);
        assert_eq!(numbering.down_words, vec![NumberedEntry { number: 1, word: "AC".to_owned(), row: 0, col: 0 }]);
        assert_eq!(numbering.cell_numbers.iter().flatten().flatten().count(), 1);
    }

    #[test]
    fn test_numbering_scan_order()
    {
        //  ..C....
        //  .BAT...
        //  ..T.D..
        //  ..SHE..
        let grid = grid(7, 4, &[
            ("cats", 0, 2, Direction::Down),
            ("bat", 1, 1, Direction::Across),
            ("she", 3, 2, Direction::Across),
            ("de", 2, 4, Direction::Down),
        ]);
        let numbering = Numbering::generate(&grid);

        assert_eq!(numbering.number_at(Position::new(0, 2)), Some(1));
        assert_eq!(numbering.number_at(Position::new(1, 1)), Some(2));
        assert_eq!(numbering.number_at(Position::new(2, 4)), Some(3));
        assert_eq!(numbering.number_at(Position::new(3, 2)), Some(4));
        assert_eq!(numbering.number_at(Position::new(1, 2)), None);
        assert_eq!(numbering.number_at(Position::new(9, 9)), None);
        assert_eq!(numbering.across_words.iter().map(|e| (e.number, e.word.as_str())).collect::<Vec<_>>(), vec![(2, "BAT"), (4, "SHE")]);
        assert_eq!(numbering.down_words.iter().map(|e| (e.number, e.word.as_str())).collect::<Vec<_>>(), vec![(1, "CATS"), (3, "DE")]);
    }

    #[test]
    fn test_numbering_ignores_single_letters()
    {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_letter(Position::new(1, 1), crate::grid::Letter::new('X')).unwrap();
        let numbering = Numbering::generate(&grid);

        assert!(numbering.across_words.is_empty());
        assert!(numbering.down_words.is_empty());
        assert_eq!(numbering.number_at(Position::new(1, 1)), None);
    }

    #[test]
    fn test_numbering_is_idempotent()
    {
        let grid = grid(6, 6, &[("hello", 2, 0, Direction::Across), ("world", 1, 4, Direction::Down)]);

        assert_eq!(Numbering::generate(&grid), Numbering::generate(&grid));
    }

    #[test]
    fn test_numbering_follows_edits()
    {
        let mut grid = grid(5, 5, &[("hello", 2, 0, Direction::Across)]);
        let before = Numbering::generate(&grid);
        grid.set_letter(Position::new(3, 0), crate::grid::Letter::new('A')).unwrap();
        let after = Numbering::generate(&grid);

        assert!(before.down_words.is_empty());
        assert_eq!(after.entries(Direction::Down)[0].word, "HA");
        assert_eq!(after.number_at(Position::new(2, 0)), Some(1));
    }
}
