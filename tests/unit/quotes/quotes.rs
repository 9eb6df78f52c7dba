use std::collections::BTreeSet;

use super::*;

struct Scripted(VecDeque<DoodleResult<String>>);

impl QuoteSource for Scripted {
    fn next_quote(&mut self) -> DoodleResult<String> {
        self.0
            .pop_front()
            .unwrap_or_else(|| Err(DoodleError::validation("script exhausted")))
    }
}

fn scripted(items: Vec<DoodleResult<String>>) -> Option<Box<dyn QuoteSource>> {
    Some(Box::new(Scripted(items.into())))
}

#[test]
fn bundled_list_is_unique_and_non_empty() {
    let set: BTreeSet<_> = BUNDLED_QUOTES.iter().collect();
    assert_eq!(set.len(), BUNDLED_QUOTES.len());
    assert!(BUNDLED_QUOTES.iter().all(|q| !q.trim().is_empty()));
}

#[test]
fn empty_custom_list_is_rejected() {
    assert!(BundledQuotes::from_list(Vec::new(), Rng64::new(0)).is_err());
}

#[test]
fn pick_avoids_recent_until_exhausted() {
    let list = vec!["a".to_owned(), "b".to_owned(), "c".to_owned()];
    let mut src = BundledQuotes::from_list(list, Rng64::new(1)).unwrap();
    for _ in 0..50 {
        assert_eq!(src.pick_avoiding(["a", "b"].into_iter()), "c");
    }
    let any = src.pick_avoiding(["a", "b", "c"].into_iter());
    assert!(["a", "b", "c"].contains(&any.as_str()));
}

#[test]
fn feed_never_repeats_within_five() {
    let mut feed = QuoteFeed::new(None, BundledQuotes::with_rng(Rng64::new(4)));
    let mut shown: Vec<String> = Vec::new();
    for _ in 0..200 {
        let q = feed.next_quote().unwrap();
        let window = shown.iter().rev().take(RECENT_LIMIT);
        assert!(window.clone().all(|prev| *prev != q), "{q} repeated");
        shown.push(q);
    }
    assert_eq!(feed.recent().count(), RECENT_LIMIT);
}

#[test]
fn primary_answers_first_and_failures_fall_back() {
    let primary = scripted(vec![
        Ok("Fresh from the network.".to_owned()),
        Err(DoodleError::validation("offline")),
        Ok("   ".to_owned()),
    ]);
    let mut feed = QuoteFeed::new(primary, BundledQuotes::with_rng(Rng64::new(8)));

    assert_eq!(feed.next_quote().unwrap(), "Fresh from the network.");
    for _ in 0..2 {
        let q = feed.next_quote().unwrap();
        assert!(BUNDLED_QUOTES.contains(&q.as_str()));
    }
    assert_eq!(feed.recent().count(), 3);
}

#[test]
fn repeated_primary_quote_is_replaced() {
    let primary = scripted(vec![Ok("Same.".to_owned()), Ok("Same.".to_owned())]);
    let mut feed = QuoteFeed::new(primary, BundledQuotes::with_rng(Rng64::new(2)));
    assert_eq!(feed.next_quote().unwrap(), "Same.");
    let second = feed.next_quote().unwrap();
    assert_ne!(second, "Same.");
    assert_eq!(feed.recent().collect::<Vec<_>>(), vec![second.as_str(), "Same."]);
}
