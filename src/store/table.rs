use std::collections::HashSet;

use crate::error::AppError;
use crate::models::{Assignment, Course, Grade};

pub trait Record: Clone {
    const KIND: &'static str;

    fn id(&self) -> u32;
}

impl Record for Course {
    const KIND: &'static str = "Course";

    fn id(&self) -> u32 {
        self.id
    }
}

impl Record for Assignment {
    const KIND: &'static str = "Assignment";

    fn id(&self) -> u32 {
        self.id
    }
}

impl Record for Grade {
    const KIND: &'static str = "Grade";

    fn id(&self) -> u32 {
        self.id
    }
}

/// One in-memory collection in insertion order.
///
/// Ids come from a counter that starts past the largest seeded id and only
/// moves forward, so a deleted id is never handed out again. `None` means
/// the id space is used up.
#[derive(Debug)]
pub struct Table<T> {
    rows: Vec<T>,
    next_id: Option<u32>,
}

impl<T: Record> Table<T> {
    pub fn empty() -> Self {
        Self { rows: Vec::new(), next_id: Some(1) }
    }

    /// Fails if two rows share an id.
    pub fn new(rows: Vec<T>) -> Result<Self, AppError> {
        let mut seen = HashSet::with_capacity(rows.len());
        if let Some(dup) = rows.iter().map(Record::id).find(|id| !seen.insert(*id)) {
            return Err(AppError::DuplicateId { entity: T::KIND, id: dup });
        }

        let next_id = match rows.iter().map(Record::id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        };
        Ok(Self { rows, next_id })
    }

    pub fn all(&self) -> Vec<T> {
        self.rows.clone()
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn get(&self, id: u32) -> Result<T, AppError> {
        self.rows
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| AppError::not_found(T::KIND, id))
    }

    pub fn insert_with(&mut self, build: impl FnOnce(u32) -> T) -> Result<T, AppError> {
        let id = self.next_id.ok_or(AppError::IdsExhausted { entity: T::KIND })?;
        self.next_id = id.checked_add(1);
        let row = build(id);
        self.rows.push(row.clone());
        Ok(row)
    }

    pub fn update_with(&mut self, id: u32, apply: impl FnOnce(&mut T)) -> Result<T, AppError> {
        let row = self
            .rows
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| AppError::not_found(T::KIND, id))?;
        apply(row);
        Ok(row.clone())
    }

    pub fn for_each_mut(&mut self, mut apply: impl FnMut(&mut T)) {
        self.rows.iter_mut().for_each(|r| apply(r));
    }

    pub fn remove(&mut self, id: u32) -> Result<T, AppError> {
        let index = self
            .rows
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| AppError::not_found(T::KIND, id))?;
        Ok(self.rows.remove(index))
    }
}
