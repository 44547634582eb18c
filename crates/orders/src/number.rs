//! Order-number suppliers.

use uuid::Uuid;

/// Produces order numbers on demand.
///
/// Each call must produce a fresh value; the catalog never caches results.
/// Any `FnMut() -> String` closure is a supplier.
pub trait OrderNumberSupplier {
    fn next_order_number(&mut self) -> String;
}

impl<F> OrderNumberSupplier for F
where
    F: FnMut() -> String,
{
    fn next_order_number(&mut self) -> String {
        self()
    }
}

/// `PREFIX-000001`, `PREFIX-000002`, ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequentialOrderNumbers {
    prefix: String,
    next: u64,
    width: usize,
}

impl SequentialOrderNumbers {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
            width: 6,
        }
    }

    pub fn starting_at(mut self, next: u64) -> Self {
        self.next = next;
        self
    }

    /// Minimum number of digits; shorter counters are zero-padded.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

impl OrderNumberSupplier for SequentialOrderNumbers {
    fn next_order_number(&mut self) -> String {
        let number = format!("{}-{:0width$}", self.prefix, self.next, width = self.width);
        self.next = self.next.wrapping_add(1);
        number
    }
}

/// Time-ordered UUIDv7 order numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UuidOrderNumbers;

impl OrderNumberSupplier for UuidOrderNumbers {
    fn next_order_number(&mut self) -> String {
        Uuid::now_v7().to_string()
    }
}
