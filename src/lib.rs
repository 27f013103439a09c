//! Lays out a list of words as an interlocking crossword on a grid of fixed size.
//!
//! ```
//! let layout = crossword_synth::generate(["cat", "car", "tar"], 10, 10).unwrap();
//! let numbering = crossword_synth::number(&layout.grid);
//!
//! assert!(layout.placed_count() >= 2);
//! assert_eq!(numbering, layout.numbering());
//! ```

pub mod traits;
pub mod grid;
pub mod word;
pub mod placed_word;
pub mod crossword;
pub mod generator;
pub mod numbering;
pub mod document;
pub mod suggestion;
pub mod logging;

use crate::{crossword::CrosswordError, generator::{CrosswordGenerator, CrosswordLayout}, grid::Grid, numbering::Numbering, traits::RawWord};

/// Lays out the words with the default [settings](generator::CrosswordGeneratorSettings), see [CrosswordGenerator::generate]
pub fn generate<I>(words: I, width: usize, height: usize) -> Result<CrosswordLayout, CrosswordError>
where
    I: IntoIterator,
    I::Item: RawWord,
{
    CrosswordGenerator::default().generate(words, width, height)
}

/// Numbers the grid, see [Numbering::generate]
pub fn number(grid: &Grid) -> Numbering
{
    Numbering::generate(grid)
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::{document::CrosswordDocument, suggestion::{Pattern, SuggestionRequest, SuggestionStream, WordListSource}, word::Direction};
    use std::time::Duration;
    use tokio_stream::StreamExt;

    #[test]
    fn test_generate_then_number()
    {
        let layout = generate(["ab", "ac"], 3, 3).unwrap();
        let numbering = number(&layout.grid);

        assert!(layout.is_complete());
        assert_eq!(numbering, number(&layout.grid));
        assert_eq!(numbering.across_words.len(), 1);
        assert_eq!(numbering.down_words.len(), 1);
        assert_eq!(numbering.across_words[0].number, numbering.down_words[0].number);
    }

    #[test]
    fn test_document_round_trip()
    {
        let words = ["planet", "orbit", "comet", "moon", "star"];
        let layout = generate(words, 11, 11).unwrap();
        let doc = CrosswordDocument::from_json(&CrosswordDocument::from_layout(&layout, words).to_json().unwrap()).unwrap();
        let (grid, placements) = doc.reconstruct().unwrap().into_parts();

        assert_eq!(grid, layout.grid);
        assert_eq!(placements, layout.placements);
        assert_eq!(number(&grid), layout.numbering());
    }

    #[tokio::test(start_paused = true)]
    async fn test_suggestions_for_a_cleared_entry()
    {
        let layout = generate(["crane", "ocean"], 9, 9).unwrap();
        let mut grid = layout.grid.clone();
        let placed = layout.placements.iter().find(|p| p.direction == Direction::Across).unwrap().clone();
        // clear every cell of the entry that no other word uses
        for (pos, _) in placed.cells()
        {
            if !layout.placements.iter().any(|other| other != &placed && other.covers(pos))
            {
                grid.set_letter(pos, None).unwrap();
            }
        }
        let pattern = Pattern::from_placement(&grid, &placed);

        let mut stream = SuggestionStream::new(WordListSource::new(["crane", "ocean", "otter", "apple"]), Duration::from_millis(100));
        stream.request_suggestions(SuggestionRequest::Lookup(pattern.clone())).await;
        let answer = stream.next().await.unwrap();

        assert_eq!(answer.pattern, pattern);
        assert!(answer.words.contains(&placed.value.to_string()));
    }
}
