// graph/src/windowed.rs

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use log::debug;
use once_cell::sync::Lazy;

use models::errors::{GraphError, GraphResult};
use models::identifiers::VertexId;

/// Trailing window within which an edge is considered active. Sixty seconds
/// behind the latest event time seen so far.
static DEFAULT_WINDOW: Lazy<Duration> = Lazy::new(|| Duration::seconds(60));

/// Outcome of attempting to add an edge to the store.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InsertOutcome {
    /// The edge was created or refreshed; the window may have advanced.
    Accepted,
    /// The event was older than the trailing window and was dropped
    /// without mutating the store.
    Rejected,
}

/// An undirected interaction graph restricted to a trailing time window.
///
/// Adjacency is a map from vertex to a map from neighbor to the timestamp
/// of the most recent event that established or refreshed that edge. The
/// nested map gives O(1) duplicate-edge detection and O(1) refresh, and it
/// is kept symmetric: `b` appears under `a` with timestamp `t` iff `a`
/// appears under `b` with the same timestamp.
///
/// The window boundary is half-open: an edge is active while its age
/// relative to the latest event time is strictly below the window duration,
/// so an edge exactly one window old is expired and an event exactly one
/// window stale is rejected.
#[derive(Debug)]
pub struct WindowedGraph {
    adjacency: HashMap<VertexId, HashMap<VertexId, DateTime<Utc>>>,
    latest_timestamp: Option<DateTime<Utc>>,
    window: Duration,
}

impl Default for WindowedGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowedGraph {
    /// Creates an empty store with the standard sixty second window.
    pub fn new() -> Self {
        Self::with_window(*DEFAULT_WINDOW)
    }

    /// Creates an empty store with a caller-chosen window.
    pub fn with_window(window: Duration) -> Self {
        Self {
            adjacency: HashMap::new(),
            latest_timestamp: None,
            window,
        }
    }

    /// Adds or refreshes the undirected edge between `actor` and `target`.
    ///
    /// An event older than the window relative to the latest observed event
    /// time is rejected without touching the store. An accepted event
    /// upserts both adjacency directions; when it also carries the newest
    /// timestamp seen so far the window advances and expired entries are
    /// swept. A refresh that does not advance the window never sweeps.
    pub fn insert(
        &mut self,
        actor: VertexId,
        target: VertexId,
        timestamp: DateTime<Utc>,
    ) -> InsertOutcome {
        if let Some(latest) = self.latest_timestamp {
            if latest - timestamp >= self.window {
                return InsertOutcome::Rejected;
            }
        }

        self.adjacency
            .entry(actor.clone())
            .or_default()
            .insert(target.clone(), timestamp);
        self.adjacency
            .entry(target)
            .or_default()
            .insert(actor, timestamp);

        if self.latest_timestamp.is_none_or(|latest| timestamp >= latest) {
            self.latest_timestamp = Some(timestamp);
            self.sweep();
        }

        InsertOutcome::Accepted
    }

    /// Purges every adjacency entry that has aged out of the window, then
    /// drops vertices left with no entries. Runs only when the window
    /// advances.
    fn sweep(&mut self) {
        let Some(latest) = self.latest_timestamp else {
            return;
        };
        let window = self.window;
        let mut expired = 0usize;
        self.adjacency.retain(|_, neighbors| {
            let before = neighbors.len();
            neighbors.retain(|_, stamp| latest - *stamp < window);
            expired += before - neighbors.len();
            !neighbors.is_empty()
        });
        if expired > 0 {
            debug!(
                "swept {} adjacency entries older than {}s",
                expired,
                window.num_seconds()
            );
        }
    }

    /// Returns the degree of `vertex`: the count of its current adjacency
    /// entries, with a self-loop counted twice.
    ///
    /// # Errors
    /// `GraphError::NotFound` if the vertex has no active edges.
    pub fn degree(&self, vertex: &VertexId) -> GraphResult<usize> {
        let neighbors = self
            .adjacency
            .get(vertex)
            .ok_or_else(|| GraphError::NotFound(vertex.clone()))?;
        Ok(entry_degree(vertex, neighbors))
    }

    /// Returns the statistical median of the degree of every live vertex:
    /// the middle value for an odd count, the mean of the two middle values
    /// for an even count.
    ///
    /// # Errors
    /// `GraphError::EmptyGraph` if no vertex has an active edge.
    pub fn median_degree(&self) -> GraphResult<f64> {
        if self.adjacency.is_empty() {
            return Err(GraphError::EmptyGraph);
        }

        let mut degrees: Vec<usize> = self
            .adjacency
            .iter()
            .map(|(vertex, neighbors)| entry_degree(vertex, neighbors))
            .collect();
        degrees.sort_unstable();

        let mid = degrees.len() / 2;
        if degrees.len() % 2 == 0 {
            Ok((degrees[mid - 1] + degrees[mid]) as f64 / 2.0)
        } else {
            Ok(degrees[mid] as f64)
        }
    }

    /// Number of vertices with at least one active edge.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// The maximum event time observed so far, `None` before the first
    /// accepted insert. Monotonically non-decreasing.
    pub fn latest_timestamp(&self) -> Option<DateTime<Utc>> {
        self.latest_timestamp
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

fn entry_degree(vertex: &VertexId, neighbors: &HashMap<VertexId, DateTime<Utc>>) -> usize {
    neighbors.len() + usize::from(neighbors.contains_key(vertex))
}

impl fmt::Display for WindowedGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} vertices in window:", self.adjacency.len())?;
        for (vertex, neighbors) in &self.adjacency {
            write!(f, "  {vertex}:")?;
            for (neighbor, stamp) in neighbors {
                write!(f, " {}@{}", neighbor, stamp.format("%H:%M:%S"))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
