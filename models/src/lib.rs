// models/src/lib.rs

//! Core domain types for the rolling-median stream processor: validated
//! vertex identifiers, input records, typed interaction events, and the
//! error taxonomy shared by the graph store and the processor binary.

pub mod errors;
pub mod events;
pub mod identifiers;

pub use errors::{GraphError, GraphResult, RecordError, ValidationError, ValidationResult};
pub use events::{InteractionEvent, RawEvent, parse_timestamp};
pub use identifiers::VertexId;
