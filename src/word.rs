use std::{collections::BTreeSet, fmt};
use serde::{Deserialize, Serialize};
use crate::{crossword::CrosswordError, grid::Letter, traits::RawWord};

/// Represents the position of a cell in a [grid](crate::grid::Grid), or of the first character of a [placed word](crate::placed_word::PlacedWord)
///
/// Coordinates are signed so that positions computed while searching (which can fall outside of the grid) are representable.
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash, Default, Debug, Serialize, Deserialize)]
pub struct Position
{
    pub row: i32,
    pub col: i32,
}

impl Position
{
    pub fn new(row: i32, col: i32) -> Position
    {
        Position { row, col }
    }

    /// Returns the position `steps` cells away in the given [direction](Direction) (negative steps go backwards)
    pub fn step(&self, direction: Direction, steps: i32) -> Position
    {
        match direction
        {
            Direction::Across => Position { row: self.row, col: self.col + steps },
            Direction::Down => Position { row: self.row + steps, col: self.col },
        }
    }
}

/// Represents the direction of a [word](crate::placed_word::PlacedWord) placed in a [crossword](crate::crossword::Crossword)
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction
{
    #[default]
    Across,
    Down,
}

impl Direction
{
    pub fn opposite(&self) -> Direction
    {
        match *self
        {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }

    pub fn from_horizontal(is_horizontal: bool) -> Direction
    {
        if is_horizontal { Direction::Across } else { Direction::Down }
    }

    pub fn is_horizontal(&self) -> bool
    {
        *self == Direction::Across
    }
}

impl fmt::Display for Direction
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self
        {
            Direction::Across => write!(f, "across"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Represents a word outside of a [crossword](crate::crossword::Crossword): a non empty string of uppercase letters `A`-`Z`
///
/// ```
/// # use crossword_synth::word::Word;
/// assert_eq!(Word::new("  hello ").unwrap().as_str(), "HELLO");
/// assert!(Word::new("it's").is_err());
/// assert!(Word::new("   ").is_err());
/// ```
#[derive(Clone, Eq, PartialEq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word
{
    value: String,
}

impl Word
{
    /// Normalizes (trims and uppercases) the string and checks that only letters remain
    pub fn new(raw: &str) -> Result<Word, CrosswordError>
    {
        let value = normalize(raw);
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_uppercase())
        {
            return Err(CrosswordError::InvalidWord(raw.to_owned()));
        }
        Ok(Word { value })
    }

    pub fn as_str(&self) -> &str
    {
        &self.value
    }

    pub fn len(&self) -> usize
    {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.value.is_empty()
    }

    pub fn letters(&self) -> impl Iterator<Item = Letter> + '_
    {
        self.value.bytes().map(Letter::from_ascii_uppercase)
    }

    pub fn letter(&self, index: usize) -> Option<Letter>
    {
        self.value.as_bytes().get(index).copied().map(Letter::from_ascii_uppercase)
    }
}

impl TryFrom<String> for Word
{
    type Error = CrosswordError;

    fn try_from(value: String) -> Result<Self, Self::Error>
    {
        Word::new(&value)
    }
}

impl From<Word> for String
{
    fn from(word: Word) -> Self
    {
        word.value
    }
}

impl fmt::Display for Word
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(&self.value)
    }
}

/// Canonical form of a raw word: trimmed and uppercased
pub fn normalize(raw: &str) -> String
{
    raw.trim().to_ascii_uppercase()
}

/// Result of [normalizing](normalize_words) the raw input of a generation request
#[derive(Clone, Eq, PartialEq, Default, Debug)]
pub struct NormalizedWords
{
    /// Words that can be placed, in input order
    pub words: Vec<Word>,
    /// Normalized strings that contain something other than `A`-`Z`, in input order
    pub rejected: Vec<String>,
}

/// Trims and uppercases every raw word, drops the empty ones and the duplicates (first occurrence wins)
/// and separates the strings that are not valid [words](Word)
///
/// ```
/// # use crossword_synth::word::normalize_words;
/// let normalized = normalize_words(["cat", " Dog", "", "CAT", "no-go"]);
///
/// assert_eq!(normalized.words.iter().map(|w| w.as_str()).collect::<Vec<_>>(), vec!["CAT", "DOG"]);
/// assert_eq!(normalized.rejected, vec!["NO-GO".to_owned()]);
/// ```
pub fn normalize_words<I>(raw_words: I) -> NormalizedWords
where
    I: IntoIterator,
    I::Item: RawWord,
{
    let mut seen = BTreeSet::new();
    let mut normalized = NormalizedWords::default();

    for raw in raw_words
    {
        let value = normalize(raw.as_ref());
        if value.is_empty() || !seen.insert(value.clone()) { continue; }

        match Word::new(&value)
        {
            Ok(word) => normalized.words.push(word),
            Err(_) =>
            {
                log::warn!("word {value:?} contains characters other than A-Z and will not be placed");
                normalized.rejected.push(value);
            }
        }
    }

    normalized
}
