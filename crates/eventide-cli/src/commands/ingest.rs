//! Ingest command implementation.

use crate::path;
use crate::record;
use eventide_containers::ContainerKind;
use eventide_output::{DualSinkWriter, StandardFieldFormatter};
use eventide_store::JournalStore;
use serde_json::Value;
use std::io::{self, Read, Write};
use std::path::PathBuf;

pub fn run(
    input: Option<String>,
    store: Option<String>,
    stream: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Read JSONL from file or stdin
    let text = if let Some(path) = input {
        std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read file {}: {}", path, e))?
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    };

    // Without a store path the durable sink is backed by a scratch file,
    // removed when the writer closes.
    let (store_path, scratch_path): (PathBuf, Option<PathBuf>) = match store {
        Some(path) => {
            let resolved = path::validate_store_path(&path, false)
                .map_err(|e| format!("Invalid store path: {}", e))?;
            (resolved, None)
        }
        None => {
            let scratch = tempfile::Builder::new()
                .prefix("eventide-")
                .suffix(".evs")
                .tempfile()?;
            let kept = scratch.into_temp_path().keep()?;
            (kept.clone(), Some(kept))
        }
    };

    let sink: Box<dyn Write> = if stream {
        Box::new(io::stdout())
    } else {
        Box::new(io::sink())
    };

    let mut writer = DualSinkWriter::new(
        JournalStore::new(&store_path),
        StandardFieldFormatter::new(),
        sink,
    );
    if let Some(ref scratch) = scratch_path {
        writer = writer.with_scratch_path(scratch);
    }
    writer.open().map_err(|e| {
        let sanitized = path::sanitize_path_for_error(&store_path);
        format!("Failed to open store: {}: {}", sanitized, e)
    })?;

    let mut total: u64 = 0;
    let mut events: u64 = 0;
    for (line_number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let value: Value = serde_json::from_str(line)
            .map_err(|e| format!("Invalid JSON on line {}: {}", line_number + 1, e))?;
        let mut container = record::record_from_json(&value)
            .map_err(|e| format!("Invalid record on line {}: {}", line_number + 1, e))?;

        if container.kind() == ContainerKind::Event {
            events += 1;
        }
        writer.add_container(&mut container).map_err(|e| {
            let sanitized = path::sanitize_path_for_error(&store_path);
            format!("Failed to add record from line {}: {}: {}", line_number + 1, sanitized, e)
        })?;
        total += 1;
    }

    writer.close().map_err(|e| {
        let sanitized = path::sanitize_path_for_error(&store_path);
        format!("Failed to close store: {}: {}", sanitized, e)
    })?;

    // Keep stdout clean for the JSON stream
    if !stream {
        println!("Ingested {} containers ({} events)", total, events);
    }

    Ok(())
}
