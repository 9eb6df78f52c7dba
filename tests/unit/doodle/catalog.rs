use std::collections::BTreeSet;

use super::*;
use crate::foundation::rng::Rng64;

#[test]
fn palette_is_six_distinct_colors() {
    let set: BTreeSet<_> = PALETTE.iter().map(|c| c.to_string()).collect();
    assert_eq!(set.len(), 6);
    assert_eq!(PALETTE[0].to_string(), "#ff6b9d");
}

#[test]
fn share_kinds_exclude_circle_and_triangle() {
    assert!(!SHARE_KINDS.contains(&ShapeKind::Circle));
    assert!(!SHARE_KINDS.contains(&ShapeKind::Triangle));
    assert_eq!(SHARE_KINDS.len(), ShapeKind::ALL.len() - 2);
}

#[test]
fn random_helpers_cover_their_sets() {
    let mut rng = Rng64::new(42);
    let mut kinds = BTreeSet::new();
    let mut colors = BTreeSet::new();
    let mut share = BTreeSet::new();
    for _ in 0..2_000 {
        kinds.insert(random_kind(&mut rng));
        colors.insert(random_color(&mut rng).to_string());
        share.insert(random_share_kind(&mut rng));
    }
    assert_eq!(kinds.len(), 12);
    assert_eq!(colors.len(), 6);
    assert_eq!(share.len(), 10);
}

#[test]
fn cycled_colors_wrap() {
    assert_eq!(cycled_color(0), PALETTE[0]);
    assert_eq!(cycled_color(7), PALETTE[1]);
}
