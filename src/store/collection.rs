use std::cmp::Ordering;

/// A record field exposed for filtering and sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(i64),
}

impl FieldValue<'_> {
    /// Exact match ignoring case; numbers compare against their decimal form.
    pub fn eq_ignore_case(&self, expected: &str) -> bool {
        match self {
            FieldValue::Text(text) => text.to_lowercase() == expected.to_lowercase(),
            FieldValue::Number(number) => number.to_string() == expected.trim(),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Number(a), FieldValue::Number(b)) => a.cmp(b),
            (FieldValue::Number(_), FieldValue::Text(_)) => Ordering::Less,
            (FieldValue::Text(_), FieldValue::Number(_)) => Ordering::Greater,
        }
    }
}

/// An entry stored in a [`Collection`].
pub trait Record: Clone {
    /// Human-readable resource name used in error messages.
    const KIND: &'static str;
    /// Field names accepted by [`Record::field`].
    const FIELDS: &'static [&'static str];

    fn id(&self) -> u64;

    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

/// Filter, sort and limit applied by [`Collection::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// `(field, value)`: keep entries whose field equals value, ignoring case.
    pub filter: Option<(String, String)>,
    /// Ascending sort key; unknown fields leave insertion order.
    pub sort: Option<String>,
    /// Keep the first N entries; N <= 0 keeps none.
    pub limit: Option<i64>,
}

/// Insertion-ordered entries with a monotonically increasing id counter.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    entries: Vec<T>,
    next_id: u64,
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Start from fixed rows; the next id follows the largest seeded id.
    pub fn seeded(entries: Vec<T>) -> Self {
        let next_id = entries.iter().map(Record::id).max().unwrap_or(0) + 1;
        Self { entries, next_id }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    /// Id the next inserted entry will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn list(&self, query: &ListQuery) -> Vec<T> {
        let mut items: Vec<T> = match &query.filter {
            Some((field, value)) => self
                .entries
                .iter()
                .filter(|entry| {
                    entry
                        .field(field)
                        .is_some_and(|actual| actual.eq_ignore_case(value))
                })
                .cloned()
                .collect(),
            None => self.entries.clone(),
        };

        if let Some(sort) = query.sort.as_deref() {
            if T::FIELDS.contains(&sort) {
                items.sort_by(|a, b| match (a.field(sort), b.field(sort)) {
                    (Some(a), Some(b)) => a.compare(&b),
                    _ => Ordering::Equal,
                });
            }
        }

        if let Some(limit) = query.limit {
            items.truncate(usize::try_from(limit).unwrap_or(0));
        }

        items
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut T> {
        self.entries.iter_mut().find(|entry| entry.id() == id)
    }

    /// Append the entry built for the next id and return a copy of it.
    pub fn insert_with(&mut self, build: impl FnOnce(u64) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let entry = build(id);
        self.entries.push(entry.clone());
        entry
    }

    pub fn remove(&mut self, id: u64) -> Option<T> {
        let position = self.entries.iter().position(|entry| entry.id() == id)?;
        Some(self.entries.remove(position))
    }
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}
