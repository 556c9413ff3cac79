use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::cast::descriptor::{FieldTable, RecordShape};

/// Memoized field-table lookup, keyed by record shape identity.
///
/// The cache is injected into every engine entry point rather than hidden in
/// a global, so callers can share one across threads or reset it in tests.
/// Reads never mutate existing entries; a miss builds the table outside the
/// lock and races at most on a duplicate insert of the same content.
#[derive(Debug, Default)]
pub struct HintCache {
	tables: RwLock<HashMap<usize, Arc<FieldTable>>>,
}

impl HintCache {
	/// Empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Field table for `shape`, building and memoizing it on first use.
	pub fn hints_of(&self, shape: &'static RecordShape) -> Arc<FieldTable> {
		let key = std::ptr::from_ref(shape) as usize;
		if let Some(table) = self.tables.read().unwrap_or_else(PoisonError::into_inner).get(&key) {
			return Arc::clone(table);
		}

		let table = Arc::new((shape.type_hints)());
		let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
		Arc::clone(tables.entry(key).or_insert(table))
	}

	/// Drop all memoized tables.
	pub fn reset(&self) {
		self.tables.write().unwrap_or_else(PoisonError::into_inner).clear();
	}

	/// Number of memoized record types.
	pub fn len(&self) -> usize {
		self.tables.read().unwrap_or_else(PoisonError::into_inner).len()
	}

	/// True when nothing is memoized yet.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
