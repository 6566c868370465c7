//! Per-generation fitness history and its persistence sinks.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Best and average fitness recorded for a run of consecutive generations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryBatch {
    /// Generation number of the first entry.
    pub first_generation: usize,
    /// Best fitness per generation.
    pub best: Vec<usize>,
    /// Average fitness per generation.
    pub average: Vec<f64>,
}

impl HistoryBatch {
    /// Number of generations in the batch.
    pub fn len(&self) -> usize {
        self.best.len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }
}

/// Destination for flushed history batches.
pub trait HistorySink: Send {
    /// Persists one batch.
    fn write_batch(&mut self, batch: &HistoryBatch) -> Result<()>;
}

/// Discards all history.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl HistorySink for NullSink {
    fn write_batch(&mut self, _batch: &HistoryBatch) -> Result<()> {
        Ok(())
    }
}

/// Keeps batches in memory; clones share the same storage.
///
/// # Examples
///
/// ```
/// use u_coloring::ga::{HistoryBatch, HistorySink, MemorySink};
///
/// let sink = MemorySink::new();
/// let mut writer = sink.clone();
/// writer.write_batch(&HistoryBatch { first_generation: 1, best: vec![3], average: vec![4.5] }).unwrap();
/// assert_eq!(sink.batches().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    batches: Arc<Mutex<Vec<HistoryBatch>>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies of all batches written so far.
    pub fn batches(&self) -> Vec<HistoryBatch> {
        self.batches.lock().clone()
    }
}

impl HistorySink for MemorySink {
    fn write_batch(&mut self, batch: &HistoryBatch) -> Result<()> {
        self.batches.lock().push(batch.clone());
        Ok(())
    }
}

/// Writes each batch as one JSON object per line.
pub struct JsonLinesSink<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> JsonLinesSink<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> HistorySink for JsonLinesSink<W> {
    fn write_batch(&mut self, batch: &HistoryBatch) -> Result<()> {
        serde_json::to_writer(&mut self.writer, batch)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Buffers per-generation values and hands them to a sink in batches.
pub struct FitnessHistory {
    pending: HistoryBatch,
    flush_interval: usize,
    sink: Box<dyn HistorySink>,
}

impl FitnessHistory {
    /// Flushes every `flush_interval` generations into `sink`.
    pub fn new(flush_interval: usize, sink: Box<dyn HistorySink>) -> Self {
        Self {
            pending: HistoryBatch::default(),
            flush_interval: flush_interval.max(1),
            sink,
        }
    }

    /// Records one generation, flushing when the batch is full.
    pub fn record(&mut self, generation: usize, best: usize, average: f64) -> Result<()> {
        if self.pending.is_empty() {
            self.pending.first_generation = generation;
        }
        self.pending.best.push(best);
        self.pending.average.push(average);
        if self.pending.len() >= self.flush_interval {
            self.flush()?;
        }
        Ok(())
    }

    /// Writes any buffered generations.
    pub fn flush(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let batch = std::mem::take(&mut self.pending);
        log::debug!(
            "flushing fitness history for generations {}..{}",
            batch.first_generation,
            batch.first_generation + batch.len()
        );
        self.sink.write_batch(&batch)
    }

    /// Generations recorded but not yet flushed.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flush_every_interval() {
        let sink = MemorySink::new();
        let mut h = FitnessHistory::new(3, Box::new(sink.clone()));
        for g in 1..=7 {
            h.record(g, 10 - g, 12.0).expect("record");
        }
        let batches = sink.batches();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].first_generation, 1);
        assert_eq!(batches[0].best, vec![9, 8, 7]);
        assert_eq!(batches[1].first_generation, 4);
        assert_eq!(h.pending(), 1);

        h.flush().expect("flush");
        let batches = sink.batches();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[2].first_generation, 7);
        assert_eq!(h.pending(), 0);
    }

    #[test]
    fn test_empty_flush_is_noop() {
        let sink = MemorySink::new();
        let mut h = FitnessHistory::new(5, Box::new(sink.clone()));
        h.flush().expect("flush");
        assert!(sink.batches().is_empty());
    }

    #[test]
    fn test_json_lines_output() {
        let mut sink = JsonLinesSink::new(Vec::new());
        let batch = HistoryBatch {
            first_generation: 2,
            best: vec![5, 4],
            average: vec![6.5, 5.0],
        };
        sink.write_batch(&batch).expect("write");
        sink.write_batch(&batch).expect("write");
        let text = String::from_utf8(sink.into_inner()).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: HistoryBatch = serde_json::from_str(lines[0]).expect("json");
        assert_eq!(parsed, batch);
    }

    #[test]
    fn test_null_sink() {
        let mut h = FitnessHistory::new(1, Box::new(NullSink));
        h.record(1, 0, 0.0).expect("record");
        assert_eq!(h.pending(), 0);
    }
}
