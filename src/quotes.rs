//! Quote sourcing for the share cards.

use std::collections::VecDeque;

use crate::foundation::error::{DoodleError, DoodleResult};
use crate::foundation::rng::{RandomSource, Rng64};

/// Anything that can hand out the next quote.
pub trait QuoteSource {
    fn next_quote(&mut self) -> DoodleResult<String>;
}

/// Quotes shipped with the crate, used when no other source answers.
pub const BUNDLED_QUOTES: [&str; 35] = [
    "The only way to do great work is to love what you do.",
    "Believe you can and you're halfway there.",
    "Success is not final, failure is not fatal: it is the courage to continue that counts.",
    "The future belongs to those who believe in the beauty of their dreams.",
    "It does not matter how slowly you go as long as you do not stop.",
    "Everything you've ever wanted is on the other side of fear.",
    "The only impossible journey is the one you never begin.",
    "You are never too old to set another goal or to dream a new dream.",
    "What you get by achieving your goals is not as important as what you become by achieving your goals.",
    "The best time to plant a tree was twenty years ago. The second best time is now.",
    "Your limitation is only your imagination.",
    "Push yourself, because no one else is going to do it for you.",
    "Great things never come from comfort zones.",
    "Dream it. Wish it. Do it.",
    "Success doesn't just find you. You have to go out and get it.",
    "The harder you work for something, the greater you'll feel when you achieve it.",
    "Don't stop when you're tired. Stop when you're done.",
    "Wake up with determination. Go to bed with satisfaction.",
    "Do something today that your future self will thank you for.",
    "Little things make big days.",
    "Stay patient and trust the journey.",
    "Every moment is a fresh beginning.",
    "Turn your wounds into wisdom.",
    "The secret of getting ahead is getting started.",
    "It always seems impossible until it's done.",
    "Act as if what you do makes a difference. It does.",
    "What we think, we become.",
    "In the middle of difficulty lies opportunity.",
    "Happiness is not something ready made. It comes from your own actions.",
    "The mind is everything. What you think you become.",
    "Strive not to be a success, but rather to be of value.",
    "The best revenge is massive success.",
    "I have not failed. I've just found ten thousand ways that won't work.",
    "A person who never made a mistake never tried anything new.",
    "The only person you are destined to become is the person you decide to be.",
];

/// How many recently shown quotes are kept out of rotation.
pub const RECENT_LIMIT: usize = 5;

/// Random pick from a fixed list.
#[derive(Clone, Debug)]
pub struct BundledQuotes<R: RandomSource = Rng64> {
    quotes: Vec<String>,
    rng: R,
}

impl BundledQuotes<Rng64> {
    /// The built-in list with an entropy-seeded generator.
    pub fn builtin() -> Self {
        Self::with_rng(Rng64::from_entropy())
    }
}

impl<R: RandomSource> BundledQuotes<R> {
    /// The built-in list drawing from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self {
            quotes: BUNDLED_QUOTES.iter().map(|q| (*q).to_owned()).collect(),
            rng,
        }
    }

    /// A custom list. Empty lists are rejected.
    pub fn from_list(quotes: Vec<String>, rng: R) -> DoodleResult<Self> {
        if quotes.is_empty() {
            return Err(DoodleError::validation("quote list must not be empty"));
        }
        Ok(Self { quotes, rng })
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Random quote that is not in `recent`; any quote once every entry is recent.
    pub fn pick_avoiding<'a>(&mut self, recent: impl Iterator<Item = &'a str> + Clone) -> String {
        let available: Vec<&String> = self
            .quotes
            .iter()
            .filter(|q| !recent.clone().any(|r| r == q.as_str()))
            .collect();
        if available.is_empty() {
            let i = self.rng.index(self.quotes.len());
            return self.quotes[i].clone();
        }
        let i = self.rng.index(available.len());
        available[i].clone()
    }
}

impl<R: RandomSource> QuoteSource for BundledQuotes<R> {
    fn next_quote(&mut self) -> DoodleResult<String> {
        Ok(self.pick_avoiding(std::iter::empty()))
    }
}

/// Asks an optional primary source first and falls back to the bundled list, never repeating one
/// of the last [`RECENT_LIMIT`] quotes it handed out.
pub struct QuoteFeed<R: RandomSource = Rng64> {
    primary: Option<Box<dyn QuoteSource>>,
    backup: BundledQuotes<R>,
    recent: VecDeque<String>,
}

impl<R: RandomSource> std::fmt::Debug for QuoteFeed<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteFeed")
            .field("has_primary", &self.primary.is_some())
            .field("backup_len", &self.backup.len())
            .field("recent", &self.recent)
            .finish()
    }
}

impl QuoteFeed<Rng64> {
    /// Feed over the built-in list only.
    pub fn bundled() -> Self {
        Self::new(None, BundledQuotes::builtin())
    }
}

impl<R: RandomSource> QuoteFeed<R> {
    pub fn new(primary: Option<Box<dyn QuoteSource>>, backup: BundledQuotes<R>) -> Self {
        Self {
            primary,
            backup,
            recent: VecDeque::with_capacity(RECENT_LIMIT + 1),
        }
    }

    /// Recently shown quotes, newest first.
    pub fn recent(&self) -> impl Iterator<Item = &str> {
        self.recent.iter().map(String::as_str)
    }

    fn remember(&mut self, quote: &str) {
        self.recent.push_front(quote.to_owned());
        self.recent.truncate(RECENT_LIMIT);
    }
}

impl<R: RandomSource> QuoteSource for QuoteFeed<R> {
    fn next_quote(&mut self) -> DoodleResult<String> {
        let fetched = match self.primary.as_mut().map(|p| p.next_quote()) {
            Some(Ok(q)) if !q.trim().is_empty() => Some(q),
            Some(Ok(_)) => {
                tracing::warn!("primary quote source returned an empty quote");
                None
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, "primary quote source failed, using bundled quotes");
                None
            }
            None => None,
        };

        let quote = match fetched {
            Some(q) if !self.recent.contains(&q) => q,
            _ => {
                let recent = self.recent.iter().map(String::as_str);
                self.backup.pick_avoiding(recent)
            }
        };
        self.remember(&quote);
        Ok(quote)
    }
}

#[cfg(test)]
#[path = "../tests/unit/quotes/quotes.rs"]
mod tests;
