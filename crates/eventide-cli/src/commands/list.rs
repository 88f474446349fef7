//! List command implementation.

use crate::output;
use crate::path;
use eventide_containers::ContainerKind;
use eventide_store::{ContainerStore, JournalStore};

pub fn run(
    store: String,
    kind: Option<String>,
    json: bool,
    max_containers: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store_path = path::validate_store_path(&store, true)
        .map_err(|e| format!("Invalid store path: {}", e))?;

    let kind: ContainerKind = match kind {
        Some(name) => name.parse()?,
        None => ContainerKind::Event,
    };

    let mut store = JournalStore::new(&store_path);
    store.open().map_err(|e| {
        let sanitized = path::sanitize_path_for_error(&store_path);
        format!("Failed to open store file: {}: {}", sanitized, e)
    })?;

    if !json {
        output::print_table_header();
    }

    let mut container_count: u64 = 0;
    for container in store.containers(kind, None)? {
        if let Some(max) = max_containers {
            if container_count >= max {
                break;
            }
        }

        if json {
            println!("{}", output::format_json(&container));
        } else {
            println!("{}", output::format_table_row(&container));
        }
        container_count += 1;
    }

    store.close()?;
    Ok(())
}
