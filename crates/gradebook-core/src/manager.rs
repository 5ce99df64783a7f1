//! In-memory student repository.
//!
//! Keys are opaque, case-sensitive strings; callers normalize ids and check
//! for duplicates before storing.

use std::collections::HashMap;

use tracing::debug;

use crate::model::{ModuleMarks, Student};

/// Owns every [`Student`], keyed by id.
#[derive(Debug, Default)]
pub struct StudentManager {
    students: HashMap<String, Student>,
}

impl StudentManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, overwriting any existing one at `id`.
    pub fn store(&mut self, id: &str, name: &str, year: &str, modules: ModuleMarks) {
        let record = Student::new(id, name, year, modules);
        debug!(student = %record, "storing student record");
        let replaced = self.students.insert(id.to_string(), record).is_some();
        debug!(id, replaced, "stored student record");
    }

    /// Delete the record at `id` if there is one.
    pub fn remove(&mut self, id: &str) -> Option<Student> {
        let removed = self.students.remove(id);
        match &removed {
            Some(record) => debug!(student = %record, "removed student record"),
            None => debug!(id, "no student record to remove"),
        }
        removed
    }

    /// Replace the record at `id` wholesale. Same operation as [`store`];
    /// no fields of the old record survive.
    ///
    /// [`store`]: StudentManager::store
    pub fn modify(&mut self, id: &str, name: &str, year: &str, modules: ModuleMarks) {
        self.store(id, name, year, modules);
    }

    pub fn get(&self, id: &str) -> Option<&Student> {
        self.students.get(id)
    }

    pub fn all(&self) -> &HashMap<String, Student> {
        &self.students
    }

    pub fn contains(&self, id: &str) -> bool {
        self.students.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Every record, sorted by id.
    pub fn sorted(&self) -> Vec<&Student> {
        let mut students: Vec<&Student> = self.students.values().collect();
        students.sort_by(|a, b| a.id().cmp(b.id()));
        students
    }

    /// Records whose id or name contains `term` (case-insensitive), sorted
    /// by id.
    pub fn search(&self, term: &str) -> Vec<&Student> {
        let mut hits = self.sorted();
        hits.retain(|s| s.matches(term));
        hits
    }
}
