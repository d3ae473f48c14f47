// graph/src/lib.rs

//! The in-memory windowed graph store. This is the whole engine: an
//! undirected interaction graph restricted to a trailing time window, with
//! degree and median-degree queries recomputed from the live adjacency on
//! every call. Data never touches disk and the store is owned by exactly
//! one caller; there is no interior locking.

pub mod windowed;

pub use windowed::{InsertOutcome, WindowedGraph};
