use std::collections::HashMap;

use crate::error::Result;
use crate::{
    Accessor, Entity, EntityMap, PropertyMap, ReaderError, RecordRead, Value, ValueType,
};

/// A forward-only [`RecordRead`] over an in-memory entity sequence.
///
/// The reader borrows an [`EntityMap`] and consumes any iterable sequence of
/// entities, projecting each entity's mapped properties into a reusable row
/// buffer as the consumer advances. Nothing is materialized up front: one
/// entity is pulled per [`advance`] call.
///
/// Column positions are assigned at construction by walking the mapping's
/// bindings in reverse declaration order; position 0 is the last binding.
/// This mirrors the mapping layout the bulk-load consumer was written
/// against. All metadata accessors honor the same reversed assignment.
///
/// Slots for auto-generated columns are never written by [`advance`]; they
/// hold [`Value::Null`] until the first row and whatever was last written
/// afterwards. The buffer likewise keeps the final row's values after the
/// sequence is exhausted; it is only valid between an [`advance`] that
/// returned `true` and the next one.
///
/// The reader is strictly single-consumer: it holds the only cursor into the
/// source sequence and the only row buffer, with no internal locking.
///
/// [`advance`]: RecordRead::advance
pub struct EntityReader<'m, E: Entity, I: Iterator<Item = E>> {
    // None once closed; close drops the source, the map borrow, the index,
    // the accessor table, the buffer, and the current entity in one step.
    inner: Option<Inner<'m, E, I>>,
}

struct Inner<'m, E, I> {
    entities: I,
    map: &'m EntityMap,
    ordinals: HashMap<String, usize>,
    accessors: Vec<Option<Accessor<E>>>,
    values: Vec<Value>,
    current: Option<E>,
}

impl<'m, E: Entity, I: Iterator<Item = E>> EntityReader<'m, E, I> {
    /// Creates a reader over `entities`, mapped to columns by `map`.
    ///
    /// Iteration starts from the beginning of the sequence. For every
    /// non-auto-generated binding, the entity's accessor is resolved here,
    /// once; a property the entity does not declare leaves its slot without
    /// an accessor, so that column behaves like an auto-generated one.
    pub fn new<S>(entities: S, map: &'m EntityMap) -> Self
    where
        S: IntoIterator<Item = E, IntoIter = I>,
    {
        let count = map.len();
        let mut ordinals = HashMap::with_capacity(count);
        let mut accessors: Vec<Option<Accessor<E>>> = vec![None; count];
        for (pos, binding) in map.property_maps().iter().rev().enumerate() {
            ordinals.insert(binding.column_name().to_ascii_lowercase(), pos);
            if !binding.is_auto_generated() {
                accessors[pos] = E::accessor(binding.property_name());
            }
        }
        Self {
            inner: Some(Inner {
                entities: entities.into_iter(),
                map,
                ordinals,
                accessors,
                values: vec![Value::Null; count],
                current: None,
            }),
        }
    }

    /// Returns the entity produced by the last successful [`advance`], if
    /// any. Absent before the first advance, after exhaustion, and after
    /// close.
    ///
    /// [`advance`]: RecordRead::advance
    pub fn current(&self) -> Option<&E> {
        self.inner.as_ref().and_then(|inner| inner.current.as_ref())
    }

    fn inner(&self) -> Result<&Inner<'m, E, I>> {
        self.inner.as_ref().ok_or(ReaderError::Closed)
    }

    fn inner_mut(&mut self) -> Result<&mut Inner<'m, E, I>> {
        self.inner.as_mut().ok_or(ReaderError::Closed)
    }
}

impl<'m, E, I> Inner<'m, E, I> {
    // Positions were assigned in reverse declaration order, so position 0 is
    // the last binding.
    fn binding(&self, col: usize) -> Result<&'m PropertyMap> {
        let count = self.map.len();
        if col >= count {
            return Err(ReaderError::IndexOutOfRange(col, count));
        }
        Ok(&self.map.property_maps()[count - 1 - col])
    }
}

impl<'m, E: Entity, I: Iterator<Item = E>> RecordRead for EntityReader<'m, E, I> {
    fn advance(&mut self) -> Result<bool> {
        let inner = self.inner_mut()?;
        inner.current = inner.entities.next();
        match &inner.current {
            Some(entity) => {
                for (slot, accessor) in inner.values.iter_mut().zip(&inner.accessors) {
                    if let Some(read) = accessor {
                        *slot = read(entity);
                    }
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn field_count(&self) -> Result<usize> {
        Ok(self.inner()?.map.len())
    }

    fn name(&self, col: usize) -> Result<&str> {
        Ok(self.inner()?.binding(col)?.column_name())
    }

    fn ordinal(&self, name: &str) -> Result<usize> {
        self.inner()?
            .ordinals
            .get(&name.to_ascii_lowercase())
            .copied()
            .ok_or_else(|| ReaderError::ColumnNotFound(name.to_string()))
    }

    fn field_type(&self, col: usize) -> Result<ValueType> {
        let property = self.inner()?.binding(col)?.property_name();
        E::field_type(property).ok_or_else(|| ReaderError::UnknownProperty(property.to_string()))
    }

    fn value(&self, col: usize) -> Result<&Value> {
        let inner = self.inner()?;
        let count = inner.values.len();
        inner
            .values
            .get(col)
            .ok_or(ReaderError::IndexOutOfRange(col, count))
    }

    fn values(&self, dest: &mut [Value]) -> Result<usize> {
        let inner = self.inner()?;
        let count = inner.values.len();
        if dest.len() < count {
            return Err(ReaderError::InvalidArgument(
                "destination buffer is smaller than the column count",
            ));
        }
        dest[..count].clone_from_slice(&inner.values);
        Ok(count)
    }

    fn nested_reader(&mut self, col: usize) -> Option<&mut dyn RecordRead> {
        if col == 0 {
            Some(self)
        } else {
            None
        }
    }

    fn is_closed(&self) -> bool {
        self.inner.is_none()
    }

    fn close(&mut self) {
        self.inner = None;
    }
}
