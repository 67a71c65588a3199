//! Row records and the stable row wrapper.

use serde_json::{Map, Value};

// =============================================================================
// Record Trait
// =============================================================================

/// An opaque source record the grid can read fields from.
///
/// The grid never inspects records beyond [`Record::field`]; everything else
/// goes through column callbacks.
///
/// # Example
///
/// ```ignore
/// #[derive(Clone)]
/// struct Customer {
///     name: String,
///     age: u32,
/// }
///
/// impl Record for Customer {
///     fn field(&self, name: &str) -> Option<Value> {
///         match name {
///             "name" => Some(Value::from(self.name.clone())),
///             "age" => Some(Value::from(self.age)),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Record: Clone {
    /// Read a field by key. `None` means the record has no such field.
    fn field(&self, name: &str) -> Option<Value>;
}

impl Record for Value {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl Record for Map<String, Value> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

// =============================================================================
// GridRow
// =============================================================================

/// A source record paired with its position in the original input.
///
/// `source_index` is the row's identity for selection, editing, and
/// animation keys. It never changes as rows are filtered, sorted, or paged.
#[derive(Debug)]
pub struct GridRow<'a, T> {
    pub source: &'a T,
    pub source_index: usize,
}

impl<T> Clone for GridRow<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for GridRow<'_, T> {}

/// Wrap each record with its index in `data`. Order and length are preserved.
pub fn create_rows<T>(data: &[T]) -> Vec<GridRow<'_, T>> {
    data.iter()
        .enumerate()
        .map(|(source_index, source)| GridRow {
            source,
            source_index,
        })
        .collect()
}
