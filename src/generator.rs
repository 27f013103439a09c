use std::cmp::Reverse;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};
use crate::{crossword::{Crossword, CrosswordError}, grid::Grid, numbering::Numbering, placed_word::PlacedWord, traits::RawWord, word::{normalize_words, Direction, Word}};

/// Represents all settings for a [generator](CrosswordGenerator).
#[derive(Clone, Eq, PartialEq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CrosswordGeneratorSettings
{
    /// How many random word orders are tried after the sorted ones (each in both directions)
    pub shuffle_rounds: u32,
    /// Seed for the random word orders, None seeds from the system entropy
    pub seed: Option<u64>,
}

impl Default for CrosswordGeneratorSettings
{
    fn default() -> Self
    {
        CrosswordGeneratorSettings
        {
            shuffle_rounds: 4,
            seed: None,
        }
    }
}

/// The order in which a [strategy](GenerationStrategy) feeds the words to the [layout builder](attempt_placement)
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum WordOrder
{
    LongestFirst,
    ShortestFirst,
    Shuffled,
}

/// One way of running the [layout builder](attempt_placement): a word order and the direction of the first word
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct GenerationStrategy
{
    pub order: WordOrder,
    pub first_word_direction: Direction,
}

impl CrosswordGeneratorSettings
{
    /// The word orders in the order they are tried, each one is tried opening across and then down
    pub fn word_orders(&self) -> Vec<WordOrder>
    {
        [WordOrder::LongestFirst, WordOrder::ShortestFirst].into_iter()
            .chain(std::iter::repeat(WordOrder::Shuffled).take(self.shuffle_rounds as usize))
            .collect()
    }
}

/// # Represents the result of a generation
///
/// Every input word is either in `placements` (in the order they were committed) or in `unplaced_words`, never both.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosswordLayout
{
    pub grid: Grid,
    pub placements: Vec<PlacedWord>,
    pub unplaced_words: Vec<String>,
}

impl CrosswordLayout
{
    fn empty(width: usize, height: usize) -> Result<CrosswordLayout, CrosswordError>
    {
        Ok(CrosswordLayout { grid: Grid::new(width, height)?, placements: vec![], unplaced_words: vec![] })
    }

    pub fn placed_count(&self) -> usize
    {
        self.placements.len()
    }

    pub fn is_complete(&self) -> bool
    {
        self.unplaced_words.is_empty()
    }

    pub fn numbering(&self) -> Numbering
    {
        Numbering::generate(&self.grid)
    }

    /// Replays the placements onto a blank grid of the same size
    pub fn reconstruct(&self) -> Result<Grid, CrosswordError>
    {
        let (grid, _) = Crossword::from_placements(self.grid.width(), self.grid.height(), self.placements.iter().cloned())?.into_parts();
        Ok(grid)
    }
}

/// Builds one layout by placing the words greedily in the given order
///
/// The first pass tries every word once, a word that has nowhere to go is put aside.
/// While the board is still empty a word is tried as the opening word, centered in `first_word_direction`.
/// Then the words put aside are swept again and again (they may cross letters placed after them)
/// until a sweep places nothing.
///
/// A committed word is never moved or removed.
///
/// ```
/// # use crossword_synth::generator::attempt_placement;
/// # use crossword_synth::word::{Direction, Word};
/// let words = ["cat", "dog", "toga"].map(|w| Word::new(w).unwrap());
/// let layout = attempt_placement(&words, 9, 9, Direction::Across).unwrap();
///
/// // DOG has nothing to cross until TOGA is placed
/// assert_eq!(layout.placements.iter().map(|p| p.value.as_str()).collect::<Vec<_>>(), vec!["CAT", "TOGA", "DOG"]);
/// assert!(layout.is_complete());
/// ```
pub fn attempt_placement(words: &[Word], width: usize, height: usize, first_word_direction: Direction) -> Result<CrosswordLayout, CrosswordError>
{
    let mut cw = Crossword::new(width, height)?;
    let mut unplaced = vec![];

    for word in words
    {
        let first_word = cw.placements().is_empty().then_some(first_word_direction);
        match cw.best_placement(word, first_word)
        {
            Some(candidate) => cw.add_word(candidate.placed_word)?,
            None =>
            {
                log::debug!("deferring {word}");
                unplaced.push(word.clone());
            }
        }
    }

    let mut progress = true;
    while progress && !unplaced.is_empty()
    {
        progress = false;
        let mut still_unplaced = vec![];
        for word in unplaced
        {
            match cw.best_placement(&word, None)
            {
                Some(candidate) =>
                {
                    log::debug!("placed deferred word {word}");
                    cw.add_word(candidate.placed_word)?;
                    progress = true;
                }
                None => still_unplaced.push(word),
            }
        }
        unplaced = still_unplaced;
    }

    let (grid, placements) = cw.into_parts();
    Ok(CrosswordLayout { grid, placements, unplaced_words: unplaced.into_iter().map(String::from).collect() })
}

/// Represents a crossword generator
///
/// Runs the [layout builder](attempt_placement) under several [strategies](GenerationStrategy) and keeps the layout
/// with the most placed words. The words longest first and shortest first, each opening across and then down,
/// then a few random orders (again in both directions). The first layout that places every word is returned right away.
///
/// This is a heuristic: it does not guarantee that the largest possible number of words gets placed.
///
/// # Example
/// ```
/// # use crossword_synth::generator::{CrosswordGenerator, CrosswordGeneratorSettings};
/// let generator = CrosswordGenerator { settings: CrosswordGeneratorSettings { seed: Some(7), ..Default::default() } };
/// let layout = generator.generate(["hello"], 9, 9).unwrap();
///
/// assert_eq!(layout.grid.to_string().lines().nth(4), Some("..HELLO.."));
/// ```
#[derive(Clone, Eq, PartialEq, PartialOrd, Ord, Default, Debug, Serialize, Deserialize)]
pub struct CrosswordGenerator
{
    pub settings: CrosswordGeneratorSettings,
}

impl CrosswordGenerator
{
    pub fn new(settings: CrosswordGeneratorSettings) -> CrosswordGenerator
    {
        CrosswordGenerator { settings }
    }

    /// Lays out the words on a `width` x `height` grid
    ///
    /// The words are trimmed and uppercased, empty ones and repeats are dropped. Words with characters other than
    /// `A`-`Z` are never placed and end up in [CrosswordLayout::unplaced_words].
    ///
    /// # Errors
    ///
    /// [CrosswordError::InvalidDimensions] - width or height is zero, or the grid is [too large](Grid::MAX_CELLS)
    pub fn generate<I>(&self, words: I, width: usize, height: usize) -> Result<CrosswordLayout, CrosswordError>
    where
        I: IntoIterator,
        I::Item: RawWord,
    {
        let mut best = CrosswordLayout::empty(width, height)?;
        let normalized = normalize_words(words);
        if normalized.words.is_empty()
        {
            best.unplaced_words = normalized.rejected;
            return Ok(best);
        }

        let mut rng = match self.settings.seed
        {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut best_strategy = None;
        'orders: for order in self.settings.word_orders()
        {
            let mut ordered = normalized.words.clone();
            match order
            {
                WordOrder::LongestFirst => ordered.sort_by_key(|w| Reverse(w.len())),
                WordOrder::ShortestFirst => ordered.sort_by_key(Word::len),
                WordOrder::Shuffled => ordered.shuffle(&mut rng),
            }

            for first_word_direction in [Direction::Across, Direction::Down]
            {
                let strategy = GenerationStrategy { order, first_word_direction };
                let layout = attempt_placement(&ordered, width, height, first_word_direction)?;
                log::debug!("{strategy:?} placed {} of {} words", layout.placed_count(), ordered.len());

                if best_strategy.is_none() || layout.placed_count() > best.placed_count()
                {
                    best = layout;
                    best_strategy = Some(strategy);
                }
                if best.is_complete() { break 'orders; }
            }
        }

        log::info!("placed {} of {} words with {:?}", best.placed_count(), normalized.words.len(), best_strategy);
        best.unplaced_words.extend(normalized.rejected);
        Ok(best)
    }
}
