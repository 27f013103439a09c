use std::{fmt::Debug, future::Future};
use trait_set::trait_set;
use crate::suggestion::SuggestionError;

trait_set!
{
    /// Trait for anything that can be handed to the [generator](crate::generator::CrosswordGenerator) as a raw word.
    pub trait RawWord = AsRef<str> + Debug;

    /// Trait for the future a [suggestion source](crate::suggestion::SuggestionSource) resolves a lookup with.
    pub trait SuggestionFuture = Future<Output = Result<Vec<String>, SuggestionError>> + Send + 'static;
}
