// Search filtering for personnel records

use crate::record::PersonnelRecord;

/// Case-insensitive substring query over national id and full name
///
/// An empty query matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    needle: String,
}

impl Query {
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, record: &PersonnelRecord) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        record.id.to_lowercase().contains(&self.needle) || record.full_name.to_lowercase().contains(&self.needle)
    }
}

/// Lazy iterator over the records matching a [`Query`], in collection order
///
/// Cloning yields an independent iterator that restarts from the current position.
#[derive(Debug, Clone)]
pub struct Matches<'a> {
    records: std::slice::Iter<'a, PersonnelRecord>,
    query: Query,
}

impl<'a> Matches<'a> {
    pub(crate) fn new(records: &'a [PersonnelRecord], query: Query) -> Self {
        Self {
            records: records.iter(),
            query,
        }
    }
}

impl<'a> Iterator for Matches<'a> {
    type Item = &'a PersonnelRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let query = &self.query;
        self.records.by_ref().find(|record| query.matches(record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.records.size_hint().1)
    }
}
