//! # Schema Field Extractor
//!
//! Derives the accepted field set of a schema: the wire names of every
//! field that is not skipped, case-sensitive. The set is recomputed from the
//! static table on each call.

use std::collections::BTreeSet;

use crate::schema::{Schema, SchemaDescription};

/// Set of wire names a schema accepts.
pub type AcceptedFields = BTreeSet<&'static str>;

/// Accepted field set of the schema type `S`.
///
/// Non-record schemas accept nothing and yield the empty set.
pub fn accepted_fields<S: Schema + ?Sized>() -> AcceptedFields {
    accepted_fields_in(S::schema())
}

/// Accepted field set of the schema type of `value`.
pub fn accepted_fields_of<S: Schema + ?Sized>(_value: &S) -> AcceptedFields {
    accepted_fields::<S>()
}

/// Accepted field set of a schema description.
pub fn accepted_fields_in(schema: &SchemaDescription) -> AcceptedFields {
    schema.fields().iter().filter_map(|f| f.wire_name()).collect()
}
