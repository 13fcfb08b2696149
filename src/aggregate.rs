use std::collections::BTreeMap;

use crate::token::{BBox, WordToken};

/// One enclosing rectangle per line, keyed by line id.
pub type LineBoxes = BTreeMap<u32, BBox>;

/// Groups tokens by `line_id` and unions their boxes.
///
/// Tokens from different blocks that happen to share a line id end up in
/// the same rectangle; see [`aggregate_by_block`] for the stricter keying.
/// Ill-formed boxes (`min > max` on either axis) are skipped.
pub fn aggregate(span: &[&WordToken]) -> LineBoxes {
    group_by(span, |token| token.line_id)
}

/// Like [`aggregate`] but keyed by `(block_id, line_id)`.
pub fn aggregate_by_block(span: &[&WordToken]) -> BTreeMap<(u32, u32), BBox> {
    group_by(span, |token| (token.block_id, token.line_id))
}

/// Number of tokens [`aggregate`] would skip.
pub fn ill_formed_count(span: &[&WordToken]) -> usize {
    span.iter().filter(|t| !t.bbox.is_well_formed()).count()
}

fn group_by<K: Ord>(span: &[&WordToken], key: impl Fn(&WordToken) -> K) -> BTreeMap<K, BBox> {
    let mut boxes: BTreeMap<K, BBox> = BTreeMap::new();
    for token in span.iter().filter(|t| t.bbox.is_well_formed()) {
        boxes
            .entry(key(*token))
            .and_modify(|b| *b = b.union(&token.bbox))
            .or_insert(token.bbox);
    }
    boxes
}
