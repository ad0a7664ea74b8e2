//! File sinks for batch output.
//!
//! Every batch lands in the output directory as a timestamped pair: a
//! per-game JSONL stream (optionally gzip-compressed) with one
//! [`GameMetrics`] document per line, and a flat summary CSV with one
//! row per game. The CSV is always written; the JSONL stream only for
//! the `jsonl` output format.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::metrics::{csv_header, csv_row, GameMetrics};
use crate::types::OutputFormat;

type BoxedSink = Box<dyn Write + Send>;

pub struct OutputWriter {
    jsonl: Option<(BoxedSink, PathBuf)>,
    csv: csv::Writer<BufWriter<File>>,
    csv_path: PathBuf,
}

impl OutputWriter {
    /// Open the batch's output files under `output_dir`, creating the
    /// directory if needed.
    pub fn new(
        output_dir: &str,
        format: &OutputFormat,
        compress: bool,
        seat_count: usize,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let dir = Path::new(output_dir);
        std::fs::create_dir_all(dir)?;
        let stamp = timestamp_slug();

        let jsonl = match format {
            OutputFormat::Jsonl => Some(jsonl_sink(dir, &stamp, compress)?),
            OutputFormat::Csv => None,
        };

        let csv_path = dir.join(format!("simulation_{stamp}_summary.csv"));
        let mut csv = csv::Writer::from_writer(BufWriter::new(File::create(&csv_path)?));
        csv.write_record(csv_header(seat_count))?;

        Ok(Self {
            jsonl,
            csv,
            csv_path,
        })
    }

    /// Write one finished game to every open sink.
    ///
    /// Sinks are flushed per game so an interrupted batch still leaves
    /// every completed game on disk.
    pub fn write_game(&mut self, metrics: &GameMetrics) -> Result<(), Box<dyn std::error::Error>> {
        if let Some((writer, _)) = &mut self.jsonl {
            serde_json::to_writer(&mut *writer, metrics)?;
            writeln!(writer)?;
            writer.flush()?;
        }
        self.csv.write_record(csv_row(metrics))?;
        self.csv.flush()?;
        Ok(())
    }

    /// Flush and close the sinks. Dropping the gzip encoder writes the
    /// stream trailer.
    pub fn finish(mut self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some((writer, _)) = &mut self.jsonl {
            writer.flush()?;
        }
        self.csv.flush()?;
        Ok(())
    }

    /// Paths of the JSONL stream (when open) and the summary CSV.
    pub fn output_paths(&self) -> (Option<&Path>, &Path) {
        (
            self.jsonl.as_ref().map(|(_, path)| path.as_path()),
            &self.csv_path,
        )
    }
}

/// Filesystem-safe timestamp for the batch's filenames.
fn timestamp_slug() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Iso8601::DEFAULT)
        .unwrap_or_else(|_| "unknown".to_string())
        .replace(':', "-")
}

fn jsonl_sink(
    dir: &Path,
    stamp: &str,
    compress: bool,
) -> Result<(BoxedSink, PathBuf), Box<dyn std::error::Error>> {
    if compress {
        let path = dir.join(format!("simulation_{stamp}.jsonl.gz"));
        let encoder = GzEncoder::new(File::create(&path)?, Compression::default());
        Ok((Box::new(BufWriter::new(encoder)), path))
    } else {
        let path = dir.join(format!("simulation_{stamp}.jsonl"));
        Ok((Box::new(BufWriter::new(File::create(&path)?)), path))
    }
}
