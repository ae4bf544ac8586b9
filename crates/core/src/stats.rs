//! Ranking used by the statistics endpoint.
//!
//! The repository hands over full row sets; these helpers pick the top
//! entries in-process with deterministic tie-breaking.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::types::{DbId, Timestamp};

/// Length of every ranked list in the statistics payload.
pub const TOP_N: usize = 5;

/// A product as seen by the ranking helpers.
pub trait RankedProduct {
    fn id(&self) -> DbId;
    fn price(&self) -> Decimal;
    fn created_at(&self) -> Timestamp;
}

/// A category as seen by the ranking helpers.
pub trait RankedCategory {
    fn name(&self) -> &str;
    fn product_count(&self) -> i64;
}

/// The `n` most expensive products, price descending, then id ascending.
pub fn most_expensive<T: RankedProduct + Clone>(items: &[T], n: usize) -> Vec<T> {
    top_n_by(items, n, |a, b| {
        b.price().cmp(&a.price()).then_with(|| a.id().cmp(&b.id()))
    })
}

/// The `n` newest products, creation time descending, then id descending.
pub fn most_recent<T: RankedProduct + Clone>(items: &[T], n: usize) -> Vec<T> {
    top_n_by(items, n, |a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.id().cmp(&a.id()))
    })
}

/// The `n` categories with the most products, then by name.
pub fn most_popular<T: RankedCategory + Clone>(items: &[T], n: usize) -> Vec<T> {
    top_n_by(items, n, |a, b| {
        b.product_count()
            .cmp(&a.product_count())
            .then_with(|| a.name().cmp(b.name()))
    })
}

fn top_n_by<T: Clone, F>(items: &[T], n: usize, compare: F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut sorted = items.to_vec();
    sorted.sort_by(compare);
    sorted.truncate(n);
    sorted
}
