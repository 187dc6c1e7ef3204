use crate::types::BillRecord;
use bills_text::push_unique;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::BTreeMap;

/// Normalized title → bills carrying it.
///
/// Safe to insert into from many tasks; each insert is atomic per title.
#[derive(Debug, Default)]
pub struct TitleIndex {
    entries: DashMap<String, Vec<String>>,
}

impl TitleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `bill` under `title`. Returns `true` when the title was new.
    pub fn insert(&self, title: &str, bill: &str) -> bool {
        match self.entries.entry(title.to_string()) {
            Entry::Occupied(mut occupied) => {
                push_unique(occupied.get_mut(), bill.to_string());
                false
            }
            Entry::Vacant(vacant) => {
                vacant.insert(vec![bill.to_string()]);
                true
            }
        }
    }

    pub fn get(&self, title: &str) -> Option<Vec<String>> {
        self.entries.get(title).map(|bills| bills.value().clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sorted snapshot of `(title, bills)` pairs
    pub fn groups(&self) -> Vec<(String, Vec<String>)> {
        self.to_map().into_iter().collect()
    }

    pub fn to_map(&self) -> BTreeMap<String, Vec<String>> {
        self.entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

/// In-memory aggregate of extracted records and their title indexes
#[derive(Debug, Default)]
pub struct BillStore {
    records: DashMap<String, BillRecord>,
    titles: TitleIndex,
    main_titles: TitleIndex,
}

impl BillStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `record` and index its titles. Returns the record it replaced, if any.
    pub fn insert_record(&self, record: BillRecord) -> Option<BillRecord> {
        let bill = record.bill_congress_type_number.clone();
        for title in record.indexed_titles() {
            self.titles.insert(&title, &bill);
        }
        for title in record.indexed_main_titles() {
            self.main_titles.insert(&title, &bill);
        }
        self.records.insert(bill, record)
    }

    pub fn get(&self, bill: &str) -> Option<BillRecord> {
        self.records.get(bill).map(|record| record.value().clone())
    }

    pub fn contains(&self, bill: &str) -> bool {
        self.records.contains_key(bill)
    }

    /// Mutate one record in place; `None` when the bill is not stored.
    pub fn update<R>(&self, bill: &str, f: impl FnOnce(&mut BillRecord) -> R) -> Option<R> {
        self.records
            .get_mut(bill)
            .map(|mut record| f(record.value_mut()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stored identifiers, sorted
    pub fn bill_numbers(&self) -> Vec<String> {
        let mut bills: Vec<String> = self.records.iter().map(|r| r.key().clone()).collect();
        bills.sort();
        bills
    }

    /// Sorted snapshot of every record
    pub fn records(&self) -> BTreeMap<String, BillRecord> {
        self.records
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    pub const fn titles(&self) -> &TitleIndex {
        &self.titles
    }

    pub const fn main_titles(&self) -> &TitleIndex {
        &self.main_titles
    }
}
