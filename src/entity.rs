use crate::{Value, ValueType};

/// A resolved field accessor: reads one property off an entity and boxes it
/// into a dynamic [`Value`].
///
/// Plain function pointers keep the accessor table `Copy` and dispatch-free;
/// non-capturing closures coerce, so implementations stay one-liners.
pub type Accessor<E> = fn(&E) -> Value;

/// A source record for the tabular reader.
///
/// Implementations bind property names to field accessors at registration
/// time; the reader resolves each mapped property exactly once, at
/// construction, and then drives the returned accessors row by row.
///
/// ```
/// use bulkrow::{Accessor, Entity, Value, ValueType};
///
/// struct User {
///     id: i32,
///     name: String,
/// }
///
/// impl Entity for User {
///     fn accessor(property: &str) -> Option<Accessor<Self>> {
///         match property {
///             "Id" => Some(|u| Value::Int32(u.id)),
///             "Name" => Some(|u| Value::String(u.name.clone())),
///             _ => None,
///         }
///     }
///
///     fn field_type(property: &str) -> Option<ValueType> {
///         match property {
///             "Id" => Some(ValueType::Int32),
///             "Name" => Some(ValueType::String),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Entity {
    /// Resolves an accessor for the named property, or [`None`] if the entity
    /// declares no such property.
    fn accessor(property: &str) -> Option<Accessor<Self>>
    where
        Self: Sized;

    /// Returns the declared type of the named property, or [`None`] if the
    /// entity declares no such property.
    fn field_type(property: &str) -> Option<ValueType>;
}
