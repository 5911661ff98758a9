use crate::error::Result;
use crate::{EntityMap, FromValue, ReaderError, Value, ValueType};

/// The sequential tabular-read contract driven by a bulk-load consumer.
///
/// Readers are forward-only and single-pass: [`advance`] moves to the next
/// row, and the getters address the current row by column position or by
/// case-insensitive column name. There is no random access, no re-reading,
/// and a single result set.
///
/// Operations that stream raw bytes or characters, look up sink-side type
/// names, or materialize a schema table are part of the contract surface but
/// deliberately unimplemented; they always fail with
/// [`ReaderError::NotSupported`].
///
/// [`advance`]: RecordRead::advance
pub trait RecordRead {
    /// Advances to the next row. Returns `false` once the source is
    /// exhausted; no further values are valid after that, though the row
    /// buffer intentionally retains the last row's data.
    fn advance(&mut self) -> Result<bool>;

    /// Returns the number of columns.
    fn field_count(&self) -> Result<usize>;

    /// Returns the column name at the given position.
    fn name(&self, col: usize) -> Result<&str>;

    /// Returns the position of the named column. The lookup ignores ASCII
    /// case; an unregistered name fails with [`ReaderError::ColumnNotFound`].
    fn ordinal(&self, name: &str) -> Result<usize>;

    /// Returns the declared type of the column's mapped property, resolved
    /// per call. Auto-generated columns resolve like any other, as long as
    /// the mapping still names a property the entity declares.
    fn field_type(&self, col: usize) -> Result<ValueType>;

    /// Returns the current row's value at the given position.
    fn value(&self, col: usize) -> Result<&Value>;

    /// Returns the current row's value at the named column.
    fn value_by_name(&self, name: &str) -> Result<&Value> {
        let col = self.ordinal(name)?;
        self.value(col)
    }

    /// Copies all of the current row's values into `dest` and returns the
    /// column count. Fails with [`ReaderError::InvalidArgument`] if `dest`
    /// holds fewer slots than there are columns.
    fn values(&self, dest: &mut [Value]) -> Result<usize>;

    /// Returns whether the current row's value at the given position is the
    /// absent marker.
    fn is_null(&self, col: usize) -> Result<bool> {
        Ok(self.value(col)?.is_null())
    }

    /// Advances to the next result set. Readers of this contract expose a
    /// single result set, so this always reports `false`.
    fn next_result(&mut self) -> bool {
        false
    }

    /// Nesting depth of the current result. Always 0: nested results are not
    /// produced.
    fn depth(&self) -> usize {
        0
    }

    /// Number of rows changed by the operation. Always -1: this is a forward
    /// read, not a mutation result.
    fn records_affected(&self) -> i64 {
        -1
    }

    /// Returns a nested reader for the given column: the reader itself for
    /// column 0, absent for any other column.
    fn nested_reader(&mut self, col: usize) -> Option<&mut dyn RecordRead>;

    /// Returns whether the reader has been closed.
    fn is_closed(&self) -> bool;

    /// Releases all held state. Safe to call more than once; every reading
    /// operation afterwards fails with [`ReaderError::Closed`].
    fn close(&mut self);

    /// Extracts the current row's value at the given position as `V`.
    /// The stored type must match exactly; a mismatch fails with
    /// [`ReaderError::TypeCast`].
    fn get<V: FromValue>(&self, col: usize) -> Result<V>
    where
        Self: Sized,
    {
        let value = self.value(col)?;
        V::extract(value)
            .ok_or_else(|| ReaderError::TypeCast(value.value_type(), std::any::type_name::<V>()))
    }

    fn bytes(&self, _col: usize, _offset: u64, _dest: &mut [u8]) -> Result<u64> {
        Err(ReaderError::NotSupported("byte streaming"))
    }

    fn chars(&self, _col: usize, _offset: u64, _dest: &mut [char]) -> Result<u64> {
        Err(ReaderError::NotSupported("character streaming"))
    }

    fn schema_table(&self) -> Result<&EntityMap> {
        Err(ReaderError::NotSupported("schema table retrieval"))
    }

    fn data_type_name(&self, _col: usize) -> Result<&str> {
        Err(ReaderError::NotSupported("data type name lookup"))
    }
}
