use bulkrow::{
    Accessor, Decimal, Entity, EntityMapBuilder, EntityReader, PropertyMap, ReaderError,
    RecordRead, Value, ValueType,
};
use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

struct Sale {
    id: i64,
    region: String,
    amount: Decimal,
    sold_at: NaiveDateTime,
    batch: Uuid,
    flagged: bool,
}

impl Entity for Sale {
    fn accessor(property: &str) -> Option<Accessor<Self>> {
        match property {
            "Id" => Some(|s| Value::Int64(s.id)),
            "Region" => Some(|s| Value::String(s.region.clone())),
            "Amount" => Some(|s| Value::Decimal(s.amount)),
            "SoldAt" => Some(|s| Value::DateTime(s.sold_at)),
            "Batch" => Some(|s| Value::Guid(s.batch)),
            "Flagged" => Some(|s| Value::Bool(s.flagged)),
            _ => None,
        }
    }

    fn field_type(property: &str) -> Option<ValueType> {
        match property {
            "Id" => Some(ValueType::Int64),
            "Region" => Some(ValueType::String),
            "Amount" => Some(ValueType::Decimal),
            "SoldAt" => Some(ValueType::DateTime),
            "Batch" => Some(ValueType::Guid),
            "Flagged" => Some(ValueType::Bool),
            _ => None,
        }
    }
}

fn sold_at(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, day)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn sales() -> Vec<Sale> {
    vec![
        Sale {
            id: 1,
            region: "north".to_string(),
            amount: Decimal::new(125_00, 2),
            sold_at: sold_at(1),
            batch: Uuid::from_u128(0xa1),
            flagged: false,
        },
        Sale {
            id: 2,
            region: "south".to_string(),
            amount: Decimal::new(7_50, 2),
            sold_at: sold_at(2),
            batch: Uuid::from_u128(0xa2),
            flagged: true,
        },
    ]
}

/// Declaration order: id, region, amount, sold_at, batch, flagged.
/// Positions are assigned in reverse, so column 0 is "flagged".
fn sale_map() -> bulkrow::EntityMap {
    EntityMapBuilder::with_table("sales")
        .add_column(PropertyMap::generated("id", "Id"))
        .add_column(PropertyMap::new("region", "Region"))
        .add_column(PropertyMap::new("amount", "Amount"))
        .add_column(PropertyMap::new("sold_at", "SoldAt"))
        .add_column(PropertyMap::new("batch", "Batch"))
        .add_column(PropertyMap::new("flagged", "Flagged"))
        .build()
}

#[test]
fn reversed_column_assignment() {
    let map = sale_map();
    let reader = EntityReader::new(sales(), &map);

    assert_eq!(6, reader.field_count().unwrap());
    assert_eq!("flagged", reader.name(0).unwrap());
    assert_eq!("batch", reader.name(1).unwrap());
    assert_eq!("sold_at", reader.name(2).unwrap());
    assert_eq!("amount", reader.name(3).unwrap());
    assert_eq!("region", reader.name(4).unwrap());
    assert_eq!("id", reader.name(5).unwrap());

    for col in 0..6 {
        assert_eq!(col, reader.ordinal(reader.name(col).unwrap()).unwrap());
    }
    assert!(matches!(
        reader.name(6),
        Err(ReaderError::IndexOutOfRange(6, 6))
    ));
}

#[test]
fn ordinal_ignores_case() {
    let map = sale_map();
    let reader = EntityReader::new(sales(), &map);

    assert_eq!(
        reader.ordinal("region").unwrap(),
        reader.ordinal("REGION").unwrap()
    );
    assert_eq!(
        reader.ordinal("Sold_At").unwrap(),
        reader.ordinal("sold_at").unwrap()
    );
    assert!(matches!(
        reader.ordinal("nope"),
        Err(ReaderError::ColumnNotFound(_))
    ));
}

#[test]
fn advance_walks_the_sequence_once() {
    let map = sale_map();
    let mut reader = EntityReader::new(sales(), &map);

    assert!(reader.current().is_none());
    assert!(reader.advance().unwrap());
    assert_eq!(1, reader.current().unwrap().id);
    assert!(reader.advance().unwrap());
    assert_eq!(2, reader.current().unwrap().id);
    assert!(!reader.advance().unwrap());
    assert!(reader.current().is_none());

    // The buffer intentionally keeps the last row after exhaustion.
    let region = reader.value_by_name("region").unwrap();
    assert_eq!(&Value::String("south".to_string()), region);
    assert!(!reader.is_null(reader.ordinal("region").unwrap()).unwrap());
}

#[test]
fn auto_generated_slot_is_never_written() {
    let map = sale_map();
    let mut reader = EntityReader::new(sales(), &map);
    let id_col = reader.ordinal("id").unwrap();

    assert!(reader.advance().unwrap());
    assert!(reader.is_null(id_col).unwrap());
    assert!(reader.advance().unwrap());
    // Still untouched on later rows, even though the entities carry an id.
    assert_eq!(&Value::Null, reader.value(id_col).unwrap());
}

#[test]
fn typed_getters() {
    let map = sale_map();
    let mut reader = EntityReader::new(sales(), &map);
    assert!(reader.advance().unwrap());

    let region: String = reader.get(reader.ordinal("region").unwrap()).unwrap();
    assert_eq!("north", region);
    let amount: Decimal = reader.get(reader.ordinal("amount").unwrap()).unwrap();
    assert_eq!(Decimal::new(125_00, 2), amount);
    let when: NaiveDateTime = reader.get(reader.ordinal("sold_at").unwrap()).unwrap();
    assert_eq!(sold_at(1), when);
    let batch: Uuid = reader.get(reader.ordinal("batch").unwrap()).unwrap();
    assert_eq!(Uuid::from_u128(0xa1), batch);
    let flagged: bool = reader.get(reader.ordinal("flagged").unwrap()).unwrap();
    assert!(!flagged);

    // The stored type must match exactly.
    let cast = reader.get::<i32>(reader.ordinal("region").unwrap());
    assert!(matches!(
        cast,
        Err(ReaderError::TypeCast(ValueType::String, _))
    ));
}

#[test]
fn bulk_value_copy() {
    let map = sale_map();
    let mut reader = EntityReader::new(sales(), &map);
    assert!(reader.advance().unwrap());

    let mut short = vec![Value::Null; 5];
    assert!(matches!(
        reader.values(&mut short),
        Err(ReaderError::InvalidArgument(_))
    ));

    // Oversized destinations are fine; slots past the column count stay put.
    let mut dest = vec![Value::Bool(true); 8];
    assert_eq!(6, reader.values(&mut dest).unwrap());
    assert_eq!(&Value::Bool(false), &dest[0]); // flagged
    assert_eq!(&Value::Null, &dest[5]); // auto-generated id
    assert_eq!(&Value::Bool(true), &dest[6]);
    assert_eq!(&Value::Bool(true), &dest[7]);
}

#[test]
fn field_type_resolves_per_call() {
    let map = sale_map();
    let reader = EntityReader::new(sales(), &map);

    assert_eq!(ValueType::Bool, reader.field_type(0).unwrap());
    // Auto-generated columns resolve like any other.
    let id_col = reader.ordinal("id").unwrap();
    assert_eq!(ValueType::Int64, reader.field_type(id_col).unwrap());
}

#[test]
fn unresolvable_property_behaves_like_auto_generated() {
    let map = EntityMapBuilder::with_table("sales")
        .add_column(PropertyMap::new("ghost", "Missing"))
        .add_column(PropertyMap::new("region", "Region"))
        .build();
    let mut reader = EntityReader::new(sales(), &map);

    assert!(reader.advance().unwrap());
    let ghost_col = reader.ordinal("ghost").unwrap();
    assert!(reader.is_null(ghost_col).unwrap());
    assert!(matches!(
        reader.field_type(ghost_col),
        Err(ReaderError::UnknownProperty(_))
    ));
}

#[test]
fn unsupported_operations() {
    let map = sale_map();
    let reader = EntityReader::new(sales(), &map);

    let mut bytes = [0u8; 4];
    assert!(matches!(
        reader.bytes(0, 0, &mut bytes),
        Err(ReaderError::NotSupported(_))
    ));
    let mut chars = [' '; 4];
    assert!(matches!(
        reader.chars(0, 0, &mut chars),
        Err(ReaderError::NotSupported(_))
    ));
    assert!(matches!(
        reader.schema_table(),
        Err(ReaderError::NotSupported(_))
    ));
    assert!(matches!(
        reader.data_type_name(0),
        Err(ReaderError::NotSupported(_))
    ));
}

#[test]
fn fixed_protocol_values() {
    let map = sale_map();
    let mut reader = EntityReader::new(sales(), &map);

    assert_eq!(0, reader.depth());
    assert_eq!(-1, reader.records_affected());
    assert!(!reader.next_result());
    assert!(reader.nested_reader(0).is_some());
    assert!(reader.nested_reader(1).is_none());
}

#[test]
fn close_releases_everything() {
    let map = sale_map();
    let mut reader = EntityReader::new(sales(), &map);
    assert!(reader.advance().unwrap());
    assert!(!reader.is_closed());

    reader.close();
    assert!(reader.is_closed());
    assert!(reader.current().is_none());
    assert!(matches!(reader.advance(), Err(ReaderError::Closed)));
    assert!(matches!(reader.field_count(), Err(ReaderError::Closed)));
    assert!(matches!(reader.value(0), Err(ReaderError::Closed)));
    assert!(matches!(reader.ordinal("region"), Err(ReaderError::Closed)));

    // Closing again is a no-op.
    reader.close();
    assert!(reader.is_closed());
}

#[test]
fn empty_sequence() {
    let map = sale_map();
    let mut reader = EntityReader::new(Vec::<Sale>::new(), &map);

    assert!(!reader.advance().unwrap());
    // Nothing was ever projected.
    for col in 0..reader.field_count().unwrap() {
        assert!(reader.is_null(col).unwrap());
    }
}

mod two_column_example {
    use super::*;

    struct User {
        id: i32,
        name: String,
    }

    impl Entity for User {
        fn accessor(property: &str) -> Option<Accessor<Self>> {
            match property {
                "Id" => Some(|u| Value::Int32(u.id)),
                "Name" => Some(|u| Value::String(u.name.clone())),
                _ => None,
            }
        }

        fn field_type(property: &str) -> Option<ValueType> {
            match property {
                "Id" => Some(ValueType::Int32),
                "Name" => Some(ValueType::String),
                _ => None,
            }
        }
    }

    #[test]
    fn generated_id_and_name() {
        let map = EntityMapBuilder::with_table("users")
            .add_column(PropertyMap::generated("Id", "Id"))
            .add_column(PropertyMap::new("Name", "Name"))
            .build();
        let users = vec![User {
            id: 5,
            name: "Ann".to_string(),
        }];
        let mut reader = EntityReader::new(users, &map);

        assert_eq!("Name", reader.name(0).unwrap());
        assert_eq!("Id", reader.name(1).unwrap());

        assert!(reader.advance().unwrap());
        assert_eq!(
            &Value::String("Ann".to_string()),
            reader.value_by_name("Name").unwrap()
        );
        assert_eq!(&Value::Null, reader.value_by_name("Id").unwrap());
        assert!(!reader.advance().unwrap());
    }
}

#[cfg(feature = "serde")]
#[test]
fn map_round_trips_through_json() {
    let map = sale_map();
    let json = serde_json::to_string(&map).unwrap();
    let back: bulkrow::EntityMap = serde_json::from_str(&json).unwrap();
    assert_eq!(map, back);
}
