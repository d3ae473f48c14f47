// processor/src/processor.rs

//! The event loop: read one record per line, feed accepted events to the
//! windowed graph store, and write the median degree after each one.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, trace, warn};

use graph::{InsertOutcome, WindowedGraph};
use models::events::InteractionEvent;

/// Per-run tallies, logged once at the end of a run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RunStats {
    /// Accepted inserts, each of which produced one output line.
    pub emitted: u64,
    /// Late events dropped by the store.
    pub rejected: u64,
    /// Malformed or incomplete records discarded before reaching the store.
    pub skipped: u64,
}

/// Opens `input` and `output` and processes the whole stream. An unreadable
/// input or unwritable output is fatal and names the offending path.
pub fn run(input: &Path, output: &Path) -> Result<RunStats> {
    let reader = BufReader::new(
        File::open(input)
            .with_context(|| format!("could not read input file {}", input.display()))?,
    );
    let writer = BufWriter::new(
        File::create(output)
            .with_context(|| format!("could not create output file {}", output.display()))?,
    );
    process(reader, writer)
}

/// Processes one event stream. For every line: parse, validate, insert.
/// Accepted inserts emit the current median degree with two decimals; bad
/// records are logged and skipped; late events are dropped silently apart
/// from a debug line. Output order matches input order.
pub fn process<R: BufRead, W: Write>(reader: R, mut writer: W) -> Result<RunStats> {
    let mut store = WindowedGraph::new();
    let mut stats = RunStats::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line.context("failed to read input line")?;
        let event = match InteractionEvent::from_json(&line) {
            Ok(event) => event,
            Err(err) => {
                warn!("skipping record on line {}: {}", index + 1, err);
                stats.skipped += 1;
                continue;
            }
        };

        match store.insert(event.actor, event.target, event.created_time) {
            InsertOutcome::Accepted => {
                let median = store
                    .median_degree()
                    .context("median query after an accepted insert")?;
                writeln!(writer, "{median:.2}").context("failed to write output line")?;
                stats.emitted += 1;
                trace!("{store}");
            }
            InsertOutcome::Rejected => {
                debug!("dropped late event on line {}", index + 1);
                stats.rejected += 1;
            }
        }
    }

    writer.flush().context("failed to flush output")?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::{process, run};
    use std::io::{Cursor, Write};
    use std::path::Path;
    use tempfile::{NamedTempFile, tempdir};

    fn record(actor: &str, target: &str, time: &str) -> String {
        format!(r#"{{"actor":"{actor}","target":"{target}","created_time":"{time}"}}"#)
    }

    #[test]
    fn should_emit_one_median_per_accepted_event() {
        let input = [
            record("a", "b", "2016-04-07T03:33:19Z"),
            record("a", "c", "2016-04-07T03:33:20Z"),
            record("b", "c", "2016-04-07T03:33:21Z"),
        ]
        .join("\n");
        let mut out = Vec::new();
        let stats = process(Cursor::new(input), &mut out).unwrap();
        assert_eq!(stats.emitted, 3);
        assert_eq!(String::from_utf8(out).unwrap(), "1.00\n1.00\n2.00\n");
    }

    #[test]
    fn should_recompute_median_after_expiry() {
        let input = [
            record("a", "b", "2016-04-07T03:33:19Z"),
            record("a", "c", "2016-04-07T03:33:20Z"),
            record("b", "c", "2016-04-07T03:33:21Z"),
            // 65s after the first event: every earlier edge has aged out
            record("d", "e", "2016-04-07T03:34:24Z"),
        ]
        .join("\n");
        let mut out = Vec::new();
        process(Cursor::new(input), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1.00\n1.00\n2.00\n1.00\n");
    }

    #[test]
    fn should_skip_bad_records_without_output() {
        let input = [
            "definitely not json".to_string(),
            record("", "x", "2016-04-07T03:33:19Z"),
            record("a", "b", "2016-04-07T03:33:19Z"),
            record("a", "b", "not-a-timestamp"),
        ]
        .join("\n");
        let mut out = Vec::new();
        let stats = process(Cursor::new(input), &mut out).unwrap();
        assert_eq!(stats.skipped, 3);
        assert_eq!(stats.emitted, 1);
        assert_eq!(String::from_utf8(out).unwrap(), "1.00\n");
    }

    #[test]
    fn should_drop_late_events_silently() {
        let input = [
            record("a", "b", "2016-04-07T03:33:19Z"),
            record("c", "d", "2016-04-07T03:34:20Z"),
            // 61s behind the latest event: rejected, no output line
            record("e", "f", "2016-04-07T03:33:19Z"),
        ]
        .join("\n");
        let mut out = Vec::new();
        let stats = process(Cursor::new(input), &mut out).unwrap();
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.emitted, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "1.00\n1.00\n");
    }

    #[test]
    fn should_process_files_end_to_end() {
        let mut input = NamedTempFile::new().unwrap();
        writeln!(input, "{}", record("a", "b", "2016-04-07T03:33:19Z")).unwrap();
        writeln!(input, "garbage line").unwrap();
        writeln!(input, "{}", record("a", "c", "2016-04-07T03:33:20Z")).unwrap();

        let dir = tempdir().unwrap();
        let out_path = dir.path().join("output.txt");
        let stats = run(input.path(), &out_path).unwrap();

        assert_eq!(stats.emitted, 2);
        assert_eq!(stats.skipped, 1);
        let written = std::fs::read_to_string(&out_path).unwrap();
        assert_eq!(written, "1.00\n1.00\n");
    }

    #[test]
    fn should_fail_on_unreadable_input() {
        let dir = tempdir().unwrap();
        let err = run(
            Path::new("/no/such/input.txt"),
            &dir.path().join("output.txt"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("could not read input file"));
    }
}
