//! Validator parsing.
//!
//! A validator is the storage-layer type of a column, for example
//! `org.apache.cassandra.db.marshal.MapType(org.apache.cassandra.db.marshal.Int32Type,org.apache.cassandra.db.marshal.UTF8Type)`.
//! Parsing resolves it to the CQL type (`map<int,text>`) and records whether
//! it was wrapped in `ReversedType(...)`, which marks a descending clustering
//! column.
//!
//! Collection parameters must be primitives: `list<list<int>>` and friends are
//! not part of the vocabulary.

use crate::vocabulary::{Collection, Primitive, REVERSED_TYPE};
use crate::{Error, Result, SortOrder};
use std::fmt;
use tracing::debug;

/// A resolved CQL type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CqlType {
    Primitive(Primitive),
    List(Primitive),
    Set(Primitive),
    Map(Primitive, Primitive),
}

impl CqlType {
    /// The collection constructor, if this is a collection type.
    pub fn collection(&self) -> Option<Collection> {
        match self {
            CqlType::Primitive(_) => None,
            CqlType::List(_) => Some(Collection::List),
            CqlType::Set(_) => Some(Collection::Set),
            CqlType::Map(_, _) => Some(Collection::Map),
        }
    }

    fn from_collection(collection: Collection, params: &[Primitive]) -> Option<Self> {
        match (collection, params) {
            (Collection::List, [item]) => Some(CqlType::List(*item)),
            (Collection::Set, [item]) => Some(CqlType::Set(*item)),
            (Collection::Map, [key, value]) => Some(CqlType::Map(*key, *value)),
            _ => None,
        }
    }
}

impl fmt::Display for CqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CqlType::Primitive(p) => write!(f, "{}", p),
            CqlType::List(item) => write!(f, "list<{}>", item),
            CqlType::Set(item) => write!(f, "set<{}>", item),
            CqlType::Map(key, value) => write!(f, "map<{},{}>", key, value),
        }
    }
}

impl From<Primitive> for CqlType {
    fn from(p: Primitive) -> Self {
        CqlType::Primitive(p)
    }
}

/// Result of parsing a validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedValidator {
    pub cqltype: CqlType,
    /// True when an odd number of `ReversedType` wrappers surrounded the type.
    pub is_reversed: bool,
}

impl ParsedValidator {
    /// Sort direction implied by the reversed flag.
    pub fn order(&self) -> SortOrder {
        if self.is_reversed {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

/// Parse a validator into its CQL type and reversed flag.
///
/// # Errors
///
/// - [`Error::InvalidValidator`] if the base class (or a collection
///   parameter) is not in the vocabulary.
/// - [`Error::IncompleteValidator`] if a collection or `ReversedType` has no
///   parameters, or a collection has the wrong number of them.
pub fn parse_validator(validator: &str) -> Result<ParsedValidator> {
    debug!(validator, "parsing cql type from validator");
    let (base, params) = split_validator(validator);
    debug!(base, "base validator");

    if base == REVERSED_TYPE {
        let inner = params.ok_or_else(|| Error::incomplete(validator))?;
        let parsed = parse_validator(inner)?;
        return Ok(ParsedValidator {
            cqltype: parsed.cqltype,
            is_reversed: !parsed.is_reversed,
        });
    }

    if let Some(primitive) = Primitive::from_validator(base) {
        return Ok(ParsedValidator {
            cqltype: CqlType::Primitive(primitive),
            is_reversed: false,
        });
    }

    let collection = Collection::from_validator(base).ok_or_else(|| Error::invalid(base))?;
    let params = params.ok_or_else(|| Error::incomplete(validator))?;

    let subtypes = params
        .split(',')
        .map(|sub| Primitive::from_validator(sub).ok_or_else(|| Error::invalid(sub)))
        .collect::<Result<Vec<_>>>()?;

    if subtypes.len() != collection.arity() {
        return Err(Error::incomplete(validator));
    }
    let cqltype =
        CqlType::from_collection(collection, &subtypes).ok_or_else(|| Error::incomplete(validator))?;

    Ok(ParsedValidator {
        cqltype,
        is_reversed: false,
    })
}

/// Split `Base(params)` at the outermost parentheses.
///
/// Returns no parameters when there is no `(`, when the closing `)` is
/// missing, or when the parentheses are empty.
fn split_validator(validator: &str) -> (&str, Option<&str>) {
    let Some((base, rest)) = validator.split_once('(') else {
        return (validator, None);
    };
    let params = rest.strip_suffix(')').filter(|p| !p.is_empty());
    (base, params)
}
