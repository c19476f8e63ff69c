//! Count how often each symbol occurs in an input sequence.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{HuffmanError, Result};

/// Anything that can be counted, coded and decoded.
/// Identity is by equality only; no ordering is required.
pub trait Symbol: Eq + Hash + Clone + Debug {}

impl<T: Eq + Hash + Clone + Debug> Symbol for T {}

/// Mapping from symbol to its number of occurrences.
///
/// Entries iterate in order of first occurrence, so everything built from the
/// table (tree, codes) is reproducible from run to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<S: Symbol> {
    entries: Vec<(S, usize)>,
    index: HashMap<S, usize>,
}

impl<S: Symbol> FrequencyTable<S> {
    /// Count every symbol of `symbols`.
    /// An empty input gives an empty table.
    pub fn count<I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        let mut table = Self::default();
        // One per input symbol: the sum is bounded by the input length.
        symbols
            .into_iter()
            .for_each(|symbol| *table.slot(symbol) += 1);
        log::trace!("frequency table: {:?}", table.entries);
        table
    }

    /// Build a table from explicit `(symbol, count)` pairs.
    /// Repeated symbols are merged. A zero count, or counts whose sum does not
    /// fit in a `usize`, are rejected.
    pub fn from_counts<I>(counts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, usize)>,
    {
        let mut table = Self::default();
        let mut total = 0usize;
        for (symbol, count) in counts {
            if count == 0 {
                return Err(HuffmanError::invalid_input(format!(
                    "zero count for symbol {:?}",
                    symbol
                )));
            }
            total = total
                .checked_add(count)
                .ok_or_else(|| count_overflow(&symbol))?;
            table.add(symbol, count)?;
        }
        Ok(table)
    }

    fn add(&mut self, symbol: S, count: usize) -> Result<()> {
        let slot = self.slot(symbol.clone());
        *slot = slot
            .checked_add(count)
            .ok_or_else(|| count_overflow(&symbol))?;
        Ok(())
    }

    /// Count of `symbol`, inserting a zero entry on first sight.
    fn slot(&mut self, symbol: S) -> &mut usize {
        let i = match self.index.get(&symbol) {
            Some(&i) => i,
            None => {
                self.index.insert(symbol.clone(), self.entries.len());
                self.entries.push((symbol, 0));
                self.entries.len() - 1
            }
        };
        &mut self.entries[i].1
    }

    /// Occurrence count of `symbol`, if it was seen.
    pub fn get(&self, symbol: &S) -> Option<usize> {
        self.index.get(symbol).map(|&i| self.entries[i].1)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the length of the counted input.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, usize)> + '_ {
        self.entries.iter().map(|(symbol, count)| (symbol, *count))
    }
}

fn count_overflow<S: Symbol>(symbol: &S) -> HuffmanError {
    HuffmanError::invalid_input(format!(
        "total count overflows at symbol {:?}",
        symbol
    ))
}

impl<S: Symbol> Default for FrequencyTable<S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}
