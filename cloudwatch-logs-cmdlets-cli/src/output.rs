//! JSON output written to stdout

use clap::ValueEnum;
use cloudwatch_logs_cmdlets_core::Emitter;
use serde_json::Value;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// One compact JSON document per line
    #[default]
    Json,
    /// Indented JSON documents
    JsonPretty,
}

/// Writes each emitted object as its own JSON document, flushing as it goes
pub(crate) struct JsonEmitter<W> {
    writer: W,
    format: OutputFormat,
}

impl<W: Write + Send> JsonEmitter<W> {
    pub(crate) fn new(writer: W, format: OutputFormat) -> Self {
        Self { writer, format }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Emitter for JsonEmitter<W> {
    fn emit(&mut self, value: Value) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => serde_json::to_writer(&mut self.writer, &value)?,
            OutputFormat::JsonPretty => serde_json::to_writer_pretty(&mut self.writer, &value)?,
        }
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}
