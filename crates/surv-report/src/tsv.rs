//! Tab-separated serialization of result frames.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv::WriterBuilder;
use polars::prelude::DataFrame;

use surv_ingest::any_to_string;

/// Writes `frame` with a header row to `writer`; nulls become empty cells.
pub fn write_frame<W: Write>(frame: &DataFrame, writer: W) -> Result<()> {
    let mut out = WriterBuilder::new()
        .delimiter(b'\t')
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    let columns = frame.get_columns();
    out.write_record(columns.iter().map(|column| column.name().as_str()))
        .context("write header")?;
    for row in 0..frame.height() {
        let mut record = Vec::with_capacity(columns.len());
        for column in columns {
            let value = column
                .get(row)
                .with_context(|| format!("read {}[{row}]", column.name()))?;
            record.push(any_to_string(value));
        }
        out.write_record(&record)
            .with_context(|| format!("write row {row}"))?;
    }
    out.flush().context("flush tsv")?;
    Ok(())
}

/// Renders `frame` as TSV text.
pub fn frame_to_string(frame: &DataFrame) -> Result<String> {
    let mut buffer = Vec::new();
    write_frame(frame, &mut buffer)?;
    String::from_utf8(buffer).context("tsv output is not utf-8")
}

/// Writes `frame` to `path`, replacing any existing file.
pub fn write_tsv(frame: &DataFrame, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("create {}", path.display()))?;
    write_frame(frame, file).with_context(|| format!("write {}", path.display()))
}
