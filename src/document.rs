use std::{collections::{BTreeMap, BTreeSet}, fs, io, path::Path};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::{crossword::{Crossword, CrosswordError}, generator::CrosswordLayout, placed_word::PlacedWord, traits::RawWord, word::{normalize, Direction}};

/// Error type for loading and saving [documents](CrosswordDocument)
#[derive(Error, Debug)]
pub enum DocumentError
{
    #[error("Malformed crossword document: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Crossword(#[from] CrosswordError),
    #[error("The placed word {0} is not in the word list.")]
    UnlistedWord(String),
    #[error("The word {0} is placed more than once.")]
    DuplicatePlacement(String),
}

/// Clues keyed by direction, then by canonical word
pub type Clues = BTreeMap<Direction, BTreeMap<String, String>>;

/// # Represents a saved crossword
///
/// Holds everything needed to bring a crossword back: the grid size, the words with the way they were typed,
/// the placements and the clues. The grid itself is not stored, it is rebuilt from the placements.
///
/// ```
/// # use crossword_synth::document::CrosswordDocument;
/// # use crossword_synth::generator::{CrosswordGenerator, CrosswordGeneratorSettings};
/// # use crossword_synth::word::Direction;
/// let words = ["Cat", "car"];
/// let layout = CrosswordGenerator::new(CrosswordGeneratorSettings { seed: Some(1), ..Default::default() })
///     .generate(words, 10, 10).unwrap();
///
/// let mut doc = CrosswordDocument::from_layout(&layout, words);
/// doc.set_clue(Direction::Across, "cat", "Purring pet");
///
/// let loaded = CrosswordDocument::from_json(&doc.to_json().unwrap()).unwrap();
/// assert_eq!(loaded.reconstruct().unwrap().grid(), &layout.grid);
/// assert_eq!(loaded.display_forms["CAT"], "Cat");
/// assert_eq!(loaded.clue(Direction::Across, "CAT"), Some("Purring pet"));
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosswordDocument
{
    pub width: usize,
    pub height: usize,
    /// Canonical words, placed and unplaced
    pub words: Vec<String>,
    /// Canonical word to the form it was typed in
    pub display_forms: BTreeMap<String, String>,
    pub placements: Vec<PlacedWord>,
    #[serde(default)]
    pub clues: Clues,
}

impl CrosswordDocument
{
    /// Creates a document for a generated layout, `raw_words` are the words as they were typed
    pub fn from_layout<I>(layout: &CrosswordLayout, raw_words: I) -> CrosswordDocument
    where
        I: IntoIterator,
        I::Item: RawWord,
    {
        let mut display_forms = BTreeMap::new();
        for raw in raw_words
        {
            let display = raw.as_ref().trim();
            if !display.is_empty()
            {
                display_forms.entry(normalize(display)).or_insert_with(|| display.to_owned());
            }
        }

        let words = layout.placements.iter().map(|p| p.value.to_string())
            .chain(layout.unplaced_words.iter().cloned())
            .collect();

        CrosswordDocument
        {
            width: layout.grid.width(),
            height: layout.grid.height(),
            words,
            display_forms,
            placements: layout.placements.clone(),
            clues: Clues::new(),
        }
    }

    pub fn set_clue(&mut self, direction: Direction, word: &str, clue: &str)
    {
        self.clues.entry(direction).or_default().insert(normalize(word), clue.to_owned());
    }

    pub fn clue(&self, direction: Direction, word: &str) -> Option<&str>
    {
        self.clues.get(&direction)?.get(&normalize(word)).map(String::as_str)
    }

    /// The form a word should be shown in, the canonical form if none was recorded
    pub fn display_form<'a>(&'a self, word: &'a str) -> &'a str
    {
        self.display_forms.get(word).map_or(word, String::as_str)
    }

    /// Rebuilds the crossword from the placements, checking them against the document first
    ///
    /// # Errors
    ///
    /// [DocumentError::UnlistedWord] - a placed word is missing from the word list\
    /// [DocumentError::DuplicatePlacement] - a word is placed twice\
    /// [DocumentError::Crossword] - the dimensions are not positive, or a placement leaves the grid or conflicts with another one
    pub fn reconstruct(&self) -> Result<Crossword, DocumentError>
    {
        let listed: BTreeSet<&str> = self.words.iter().map(String::as_str).collect();
        let mut placed = BTreeSet::new();
        for placement in self.placements.iter()
        {
            let word = placement.value.as_str();
            if !listed.contains(word) { return Err(DocumentError::UnlistedWord(word.to_owned())); }
            if !placed.insert(word) { return Err(DocumentError::DuplicatePlacement(word.to_owned())); }
        }

        Ok(Crossword::from_placements(self.width, self.height, self.placements.iter().cloned())?)
    }

    pub fn to_json(&self) -> Result<String, DocumentError>
    {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a document and checks that it can be [reconstructed](CrosswordDocument::reconstruct)
    pub fn from_json(json: &str) -> Result<CrosswordDocument, DocumentError>
    {
        let doc: CrosswordDocument = serde_json::from_str(json)?;
        doc.reconstruct()?;
        Ok(doc)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError>
    {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<CrosswordDocument, DocumentError>
    {
        CrosswordDocument::from_json(&fs::read_to_string(path)?)
    }
}
