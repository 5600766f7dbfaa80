//! Per-process session state: recent conversions and favorite unit pairs

use std::collections::{BTreeSet, VecDeque};
use chrono::{DateTime, Local};
use serde::Serialize;
use unitconv_units::{Category, Unit};

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Local>,
    pub category: Category,
    pub value: f64,
    pub from_unit: &'static str,
    pub to_unit: &'static str,
    pub result: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Favorite {
    pub category: Category,
    pub from_unit: &'static str,
    pub to_unit: &'static str,
}

pub struct Session {
    history: VecDeque<HistoryEntry>,
    history_limit: usize,
    favorites: BTreeSet<Favorite>,
}

impl Session {
    pub fn new(history_limit: usize) -> Self {
        Session {
            history: VecDeque::with_capacity(history_limit),
            history_limit: history_limit.max(1),
            favorites: BTreeSet::new(),
        }
    }

    /// Record a successful conversion; the oldest entry drops off at the limit
    pub fn record(&mut self, from: &'static Unit, to: &'static Unit, value: f64, result: f64) {
        self.history.push_front(HistoryEntry {
            timestamp: Local::now(),
            category: from.category,
            value,
            from_unit: from.key,
            to_unit: to.key,
            result,
        });
        self.history.truncate(self.history_limit);
    }

    /// Recent conversions, newest first
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    /// Add the pair if absent, remove it if present. Returns whether it is now a favorite.
    pub fn toggle_favorite(&mut self, from: &'static Unit, to: &'static Unit) -> bool {
        let favorite = Favorite {
            category: from.category,
            from_unit: from.key,
            to_unit: to.key,
        };
        if self.favorites.remove(&favorite) {
            false
        } else {
            self.favorites.insert(favorite);
            true
        }
    }

    /// Favorite pairs in category order
    pub fn favorites(&self) -> impl Iterator<Item = &Favorite> {
        self.favorites.iter()
    }
}
