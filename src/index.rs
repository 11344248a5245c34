//! Per-record cache of translation rows keyed by `(key, locale)`.
//!
//! The index starts out [`Stale`](IndexState::Stale) and is filled once from
//! the store. Anything that reloads or rewrites an owner's rows behind the
//! index's back must call [`TranslationIndex::invalidate`].

use crate::translation::TranslationRow;
use std::collections::HashMap;

/// Lookup key of a row: attribute key and locale, kept apart so that
/// `("meta", "title_en")` and `("meta_title", "en")` never collide.
type Slot = (String, String);

fn slot(key: &str, locale: &str) -> Slot {
    (key.to_string(), locale.to_string())
}

fn row_slot(row: &TranslationRow) -> Slot {
    slot(&row.key, &row.locale)
}

#[derive(Debug, Clone, Default)]
enum IndexState {
    #[default]
    Stale,
    Ready {
        rows: Vec<TranslationRow>,
        positions: HashMap<Slot, usize>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct TranslationIndex {
    state: IndexState,
}

impl TranslationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ready index from rows in store order.
    ///
    /// If two rows share the same key and locale the later one wins.
    pub fn from_rows(rows: Vec<TranslationRow>) -> Self {
        let mut index = Self::new();
        index.load(rows);
        index
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, IndexState::Ready { .. })
    }

    pub fn load(&mut self, rows: Vec<TranslationRow>) {
        let mut kept: Vec<TranslationRow> = Vec::with_capacity(rows.len());
        let mut positions = HashMap::with_capacity(rows.len());

        for row in rows {
            let row_key = row_slot(&row);
            match positions.get(&row_key) {
                Some(&pos) => kept[pos] = row,
                None => {
                    positions.insert(row_key, kept.len());
                    kept.push(row);
                }
            }
        }

        self.state = IndexState::Ready {
            rows: kept,
            positions,
        };
    }

    pub fn invalidate(&mut self) {
        self.state = IndexState::Stale;
    }

    pub fn get(&self, key: &str, locale: &str) -> Option<&TranslationRow> {
        match &self.state {
            IndexState::Ready { rows, positions } => {
                positions.get(&slot(key, locale)).map(|&pos| &rows[pos])
            }
            IndexState::Stale => None,
        }
    }

    pub fn contains(&self, key: &str, locale: &str) -> bool {
        self.get(key, locale).is_some()
    }

    /// Insert or replace a row, keeping its original position on replace.
    ///
    /// A stale index is left stale: the next load picks the row up from the
    /// store anyway.
    pub fn upsert(&mut self, row: TranslationRow) {
        if let IndexState::Ready { rows, positions } = &mut self.state {
            let row_key = row_slot(&row);
            match positions.get(&row_key) {
                Some(&pos) => rows[pos] = row,
                None => {
                    positions.insert(row_key, rows.len());
                    rows.push(row);
                }
            }
        }
    }

    pub fn remove(&mut self, key: &str, locale: &str) -> Option<TranslationRow> {
        let IndexState::Ready { rows, positions } = &mut self.state else {
            return None;
        };

        let pos = positions.remove(&slot(key, locale))?;
        let removed = rows.remove(pos);
        for slot in positions.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    /// Rows for one attribute key, in store order.
    pub fn rows_for_key<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a TranslationRow> + 'a {
        self.rows().iter().filter(move |row| row.key == key)
    }

    pub fn locales_for_key(&self, key: &str) -> Vec<String> {
        self.rows_for_key(key).map(|row| row.locale.clone()).collect()
    }

    pub fn rows(&self) -> &[TranslationRow] {
        match &self.state {
            IndexState::Ready { rows, .. } => rows,
            IndexState::Stale => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }
}
