use std::{fmt, pin::Pin, task::{Context, Poll}, time::Duration};

use futures::future::{self, BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::{sync::mpsc::{self, Receiver, Sender}, task};
use tokio_stream::Stream;

use crate::{grid::{Grid, Letter}, placed_word::PlacedWord, traits::SuggestionFuture, word::Word};

/// Error type for word suggestion lookups
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SuggestionError
{
    #[error("{0:?} is not a pattern of letters and '?' wildcards.")]
    InvalidPattern(String),
    #[error("Suggestion lookup failed: {0}")]
    Lookup(String),
}

/// A fixed length word shape: known letters and unknown cells
///
/// ```
/// # use crossword_synth::suggestion::Pattern;
/// let pattern = Pattern::parse("c?t").unwrap();
///
/// assert_eq!(pattern.to_string(), "C?T");
/// assert!(pattern.matches("CAT"));
/// assert!(!pattern.matches("CART"));
/// ```
#[derive(Clone, Eq, PartialEq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pattern
{
    cells: Vec<Option<Letter>>,
}

impl Pattern
{
    pub const WILDCARD: char = '?';

    pub fn parse(raw: &str) -> Result<Pattern, SuggestionError>
    {
        let cells = raw.trim().to_ascii_uppercase().chars()
            .map(|c| if c == Pattern::WILDCARD { Ok(None) } else { Letter::new(c).map(Some).ok_or(()) })
            .collect::<Result<Vec<_>, ()>>()
            .map_err(|_| SuggestionError::InvalidPattern(raw.to_owned()))?;

        if cells.is_empty() { return Err(SuggestionError::InvalidPattern(raw.to_owned())); }
        Ok(Pattern { cells })
    }

    /// The pattern of the cells a placed word covers, as they are now on the grid (letters may have been edited or cleared)
    pub fn from_placement(grid: &Grid, placed: &PlacedWord) -> Pattern
    {
        Pattern { cells: placed.cells().map(|(pos, _)| grid.letter_at(pos)).collect() }
    }

    pub fn len(&self) -> usize
    {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.cells.is_empty()
    }

    pub fn matches(&self, candidate: &str) -> bool
    {
        candidate.chars().count() == self.len()
            && candidate.chars().all(|c| c.is_ascii_uppercase())
            && candidate.chars().zip(self.cells.iter()).all(|(c, cell)| cell.map_or(true, |letter| char::from(letter) == c))
    }
}

impl fmt::Display for Pattern
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        self.cells.iter().try_for_each(|cell| write!(f, "{}", cell.map_or(Pattern::WILDCARD, char::from)))
    }
}

impl TryFrom<String> for Pattern
{
    type Error = SuggestionError;

    fn try_from(value: String) -> Result<Self, Self::Error>
    {
        Pattern::parse(&value)
    }
}

impl From<Pattern> for String
{
    fn from(pattern: Pattern) -> Self
    {
        pattern.to_string()
    }
}

/// Something that can look up words fitting a [pattern](Pattern), usually a remote dictionary service
///
/// Any `Fn(Pattern) -> impl Future<Output = Result<Vec<String>, SuggestionError>>` is a source.
pub trait SuggestionSource: Send + Sync + 'static
{
    fn lookup(&self, pattern: Pattern) -> BoxFuture<'static, Result<Vec<String>, SuggestionError>>;
}

impl<F, Fut> SuggestionSource for F
where
    F: Fn(Pattern) -> Fut + Send + Sync + 'static,
    Fut: SuggestionFuture,
{
    fn lookup(&self, pattern: Pattern) -> BoxFuture<'static, Result<Vec<String>, SuggestionError>>
    {
        self(pattern).boxed()
    }
}

/// A [source](SuggestionSource) backed by an in-memory word list
#[derive(Clone, Eq, PartialEq, Default, Debug)]
pub struct WordListSource
{
    words: Vec<Word>,
}

impl WordListSource
{
    /// Keeps the valid words of the list (normalized), drops the rest
    pub fn new<I>(words: I) -> WordListSource
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        WordListSource { words: words.into_iter().filter_map(|w| Word::new(w.as_ref()).ok()).collect() }
    }
}

impl SuggestionSource for WordListSource
{
    fn lookup(&self, pattern: Pattern) -> BoxFuture<'static, Result<Vec<String>, SuggestionError>>
    {
        let found: Vec<String> = self.words.iter().filter(|w| pattern.matches(w.as_str())).map(Word::to_string).collect();
        future::ready(Ok(found)).boxed()
    }
}

/// Represents a request to [SuggestionStream].
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum SuggestionRequest
{
    /// Look up the words of a pattern, superseding any lookup still waiting or running.
    Lookup(Pattern),
    /// Finish the current lookup (if any) and end the stream.
    Stop,
}

/// The answer to a [lookup](SuggestionRequest::Lookup)
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Suggestions
{
    pub pattern: Pattern,
    pub words: Vec<String>,
}

/// A stream of [suggestions](Suggestions), runs in an async runtime.
///
/// A lookup starts only after the pattern stayed unchanged for the debounce period. A newer request drops the
/// lookup of the previous pattern, whether it is still waiting or already running, so an outdated answer is never
/// yielded. A failed lookup yields an empty word list for its pattern.
///
/// # Example
/// ```
/// use crossword_synth::suggestion::{Pattern, SuggestionRequest, SuggestionStream, WordListSource};
/// use std::time::Duration;
/// use tokio_stream::StreamExt;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main()
/// {
///     let source = WordListSource::new(["cat", "cot", "dog", "cart"]);
///     let mut stream = SuggestionStream::new(source, Duration::from_millis(10));
///
///     stream.request_suggestions(SuggestionRequest::Lookup(Pattern::parse("c?t").unwrap())).await;
///     stream.request_suggestions(SuggestionRequest::Stop).await;
///
///     let answer = stream.next().await.unwrap();
///     assert_eq!(answer.words, vec!["CAT", "COT"]);
///     assert!(stream.next().await.is_none());
/// }
/// ```
pub struct SuggestionStream
{
    request_sender: Sender<SuggestionRequest>,
    suggestion_receiver: Receiver<Suggestions>,
}

impl SuggestionStream
{
    pub fn new<S: SuggestionSource>(source: S, debounce: Duration) -> SuggestionStream
    {
        let (rs, rr) = mpsc::channel(100);
        let (ss, sr) = mpsc::channel(100);

        task::spawn(serve_suggestions(source, debounce, rr, ss));

        SuggestionStream { request_sender: rs, suggestion_receiver: sr }
    }

    /// Sends a request to the lookup task
    ///
    /// Requests sent after [SuggestionRequest::Stop] are ignored.
    pub async fn request_suggestions(&self, req: SuggestionRequest)
    {
        if self.request_sender.send(req).await.is_err()
        {
            log::debug!("suggestion task already stopped");
        }
    }
}

impl Stream for SuggestionStream
{
    type Item = Suggestions;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context) -> Poll<Option<Self::Item>>
    {
        self.suggestion_receiver.poll_recv(cx)
    }
}

async fn serve_suggestions<S: SuggestionSource>(source: S, debounce: Duration, mut rr: Receiver<SuggestionRequest>, ss: Sender<Suggestions>)
{
    let mut open = true;
    let mut pending: Option<Pattern> = None;

    'requests: loop
    {
        let pattern = match pending.take()
        {
            Some(pattern) => pattern,
            None if !open => return,
            None => match rr.recv().await
            {
                Some(SuggestionRequest::Lookup(pattern)) => pattern,
                None | Some(SuggestionRequest::Stop) => return,
            },
        };

        let lookup = {
            let source = &source;
            let query = pattern.clone();
            async move
            {
                tokio::time::sleep(debounce).await;
                source.lookup(query).await
            }
        };
        tokio::pin!(lookup);

        let result = loop
        {
            tokio::select!
            {
                biased;
                req = rr.recv(), if open => match req
                {
                    Some(SuggestionRequest::Lookup(next)) =>
                    {
                        log::debug!("lookup for {pattern} superseded by {next}");
                        pending = Some(next);
                        continue 'requests;
                    }
                    None | Some(SuggestionRequest::Stop) => open = false,
                },
                result = &mut lookup => break result,
            }
        };

        let words = match result
        {
            Ok(words) => words.iter()
                .map(|w| w.trim().to_ascii_uppercase())
                .filter(|w| pattern.matches(w))
                .collect(),
            Err(err) =>
            {
                log::warn!("lookup for {pattern} failed: {err}");
                vec![]
            }
        };

        if ss.send(Suggestions { pattern, words }).await.is_err() { return; }
    }
}
