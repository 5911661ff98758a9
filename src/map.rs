/// A single column binding: destination column name, source property name,
/// and whether the column's value is generated by the data sink.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyMap {
    column_name: String,
    property_name: String,
    auto_generated: bool,
}

/// An ordered entity-to-table mapping: the destination table name and the
/// column bindings, in declaration order.
///
/// The reader borrows the map for its whole lifetime and never mutates it.
/// Column names are expected to be unique ignoring ASCII case.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityMap {
    table_name: String,
    property_maps: Vec<PropertyMap>,
}

/// A builder interface for [`EntityMap`].
pub struct EntityMapBuilder(EntityMap);

impl PropertyMap {
    /// Creates a binding for a column whose value is read from the entity.
    pub fn new(column_name: impl Into<String>, property_name: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            property_name: property_name.into(),
            auto_generated: false,
        }
    }

    /// Creates a binding for an auto-generated column. Its value is produced
    /// by the data sink (identity, default) and is never read from the entity.
    pub fn generated(column_name: impl Into<String>, property_name: impl Into<String>) -> Self {
        Self {
            auto_generated: true,
            ..Self::new(column_name, property_name)
        }
    }

    /// Returns the destination column name.
    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    /// Returns the source property name.
    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    /// Returns whether the column's value is generated by the data sink.
    pub fn is_auto_generated(&self) -> bool {
        self.auto_generated
    }
}

impl EntityMap {
    /// Returns the destination table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Returns the column bindings in declaration order.
    pub fn property_maps(&self) -> &[PropertyMap] {
        &self.property_maps
    }

    /// Returns the number of mapped columns.
    pub fn len(&self) -> usize {
        self.property_maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.property_maps.is_empty()
    }
}

impl EntityMapBuilder {
    pub fn with_table(table_name: impl Into<String>) -> Self {
        Self(EntityMap {
            table_name: table_name.into(),
            property_maps: vec![],
        })
    }

    pub fn add_column(mut self, map: PropertyMap) -> Self {
        self.0.property_maps.push(map);
        self
    }

    pub fn set_columns(mut self, maps: Vec<PropertyMap>) -> Self {
        self.0.property_maps = maps;
        self
    }

    pub fn build(self) -> EntityMap {
        self.0
    }
}

impl FromIterator<PropertyMap> for EntityMap {
    fn from_iter<T: IntoIterator<Item = PropertyMap>>(iter: T) -> Self {
        Self {
            table_name: String::new(),
            property_maps: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_declaration_order() {
        let map = EntityMapBuilder::with_table("users")
            .add_column(PropertyMap::generated("id", "Id"))
            .add_column(PropertyMap::new("name", "Name"))
            .build();

        assert_eq!("users", map.table_name());
        assert_eq!(2, map.len());
        assert_eq!("id", map.property_maps()[0].column_name());
        assert!(map.property_maps()[0].is_auto_generated());
        assert_eq!("Name", map.property_maps()[1].property_name());
        assert!(!map.property_maps()[1].is_auto_generated());
    }
}
