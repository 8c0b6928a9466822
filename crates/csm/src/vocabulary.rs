//! Fixed mapping between Cassandra marshal classes and CQL type names.
//!
//! Validators are fully qualified class names from the
//! `org.apache.cassandra.db.marshal` package. Lookups match the whole
//! identifier exactly (case-sensitive), so a class from another package or a
//! bare class name is not recognised.

use std::fmt;

/// Package every known validator class lives in, including the trailing dot.
pub const MARSHAL_PACKAGE: &str = "org.apache.cassandra.db.marshal.";

macro_rules! marshal {
    ($class:literal) => {
        concat!("org.apache.cassandra.db.marshal.", $class)
    };
}

/// Wrapper validator marking a clustering column as sorted in descending order.
pub const REVERSED_TYPE: &str = marshal!("ReversedType");

/// Strip the marshal package, leaving the bare class name.
fn marshal_class(validator: &str) -> Option<&str> {
    validator.strip_prefix(MARSHAL_PACKAGE)
}

/// Non-collection CQL types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    Ascii,
    BigInt,
    Blob,
    Boolean,
    Counter,
    Decimal,
    Double,
    Float,
    Inet,
    Int,
    Text,
    Timestamp,
    TimeUuid,
    Uuid,
    VarInt,
}

impl Primitive {
    /// Every primitive, in CQL name order.
    pub const ALL: [Primitive; 15] = [
        Primitive::Ascii,
        Primitive::BigInt,
        Primitive::Blob,
        Primitive::Boolean,
        Primitive::Counter,
        Primitive::Decimal,
        Primitive::Double,
        Primitive::Float,
        Primitive::Inet,
        Primitive::Int,
        Primitive::Text,
        Primitive::Timestamp,
        Primitive::TimeUuid,
        Primitive::Uuid,
        Primitive::VarInt,
    ];

    /// The CQL name of this type.
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Ascii => "ascii",
            Primitive::BigInt => "bigint",
            Primitive::Blob => "blob",
            Primitive::Boolean => "boolean",
            Primitive::Counter => "counter",
            Primitive::Decimal => "decimal",
            Primitive::Double => "double",
            Primitive::Float => "float",
            Primitive::Inet => "inet",
            Primitive::Int => "int",
            Primitive::Text => "text",
            Primitive::Timestamp => "timestamp",
            Primitive::TimeUuid => "timeuuid",
            Primitive::Uuid => "uuid",
            Primitive::VarInt => "varint",
        }
    }

    /// The fully qualified validator class for this type.
    pub fn validator(&self) -> &'static str {
        match self {
            Primitive::Ascii => marshal!("AsciiType"),
            Primitive::BigInt => marshal!("LongType"),
            Primitive::Blob => marshal!("BytesType"),
            Primitive::Boolean => marshal!("BooleanType"),
            Primitive::Counter => marshal!("CounterColumnType"),
            Primitive::Decimal => marshal!("DecimalType"),
            Primitive::Double => marshal!("DoubleType"),
            Primitive::Float => marshal!("FloatType"),
            Primitive::Inet => marshal!("InetAddressType"),
            Primitive::Int => marshal!("Int32Type"),
            Primitive::Text => marshal!("UTF8Type"),
            Primitive::Timestamp => marshal!("TimestampType"),
            Primitive::TimeUuid => marshal!("TimeUUIDType"),
            Primitive::Uuid => marshal!("UUIDType"),
            Primitive::VarInt => marshal!("IntegerType"),
        }
    }

    /// Look up a primitive by its CQL name. `varchar` is an alias of `text`.
    pub fn from_name(name: &str) -> Option<Self> {
        let primitive = match name {
            "ascii" => Primitive::Ascii,
            "bigint" => Primitive::BigInt,
            "blob" => Primitive::Blob,
            "boolean" => Primitive::Boolean,
            "counter" => Primitive::Counter,
            "decimal" => Primitive::Decimal,
            "double" => Primitive::Double,
            "float" => Primitive::Float,
            "inet" => Primitive::Inet,
            "int" => Primitive::Int,
            "text" | "varchar" => Primitive::Text,
            "timestamp" => Primitive::Timestamp,
            "timeuuid" => Primitive::TimeUuid,
            "uuid" => Primitive::Uuid,
            "varint" => Primitive::VarInt,
            _ => return None,
        };
        Some(primitive)
    }

    /// Look up a primitive by its fully qualified validator class.
    pub fn from_validator(validator: &str) -> Option<Self> {
        let primitive = match marshal_class(validator)? {
            "AsciiType" => Primitive::Ascii,
            "LongType" => Primitive::BigInt,
            "BytesType" => Primitive::Blob,
            "BooleanType" => Primitive::Boolean,
            "CounterColumnType" => Primitive::Counter,
            "DecimalType" => Primitive::Decimal,
            "DoubleType" => Primitive::Double,
            "FloatType" => Primitive::Float,
            "InetAddressType" => Primitive::Inet,
            "Int32Type" => Primitive::Int,
            "UTF8Type" => Primitive::Text,
            "TimestampType" => Primitive::Timestamp,
            "TimeUUIDType" => Primitive::TimeUuid,
            "UUIDType" => Primitive::Uuid,
            "IntegerType" => Primitive::VarInt,
            _ => return None,
        };
        Some(primitive)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Collection type constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    List,
    Map,
    Set,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::List, Collection::Map, Collection::Set];

    /// The CQL keyword for this collection.
    pub fn keyword(&self) -> &'static str {
        match self {
            Collection::List => "list",
            Collection::Map => "map",
            Collection::Set => "set",
        }
    }

    /// Number of type parameters the constructor takes.
    pub fn arity(&self) -> usize {
        match self {
            Collection::List | Collection::Set => 1,
            Collection::Map => 2,
        }
    }

    /// The fully qualified validator class for this constructor.
    pub fn validator(&self) -> &'static str {
        match self {
            Collection::List => marshal!("ListType"),
            Collection::Map => marshal!("MapType"),
            Collection::Set => marshal!("SetType"),
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "list" => Some(Collection::List),
            "map" => Some(Collection::Map),
            "set" => Some(Collection::Set),
            _ => None,
        }
    }

    pub fn from_validator(validator: &str) -> Option<Self> {
        match marshal_class(validator)? {
            "ListType" => Some(Collection::List),
            "MapType" => Some(Collection::Map),
            "SetType" => Some(Collection::Set),
            _ => None,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
