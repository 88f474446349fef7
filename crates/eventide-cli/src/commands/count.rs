//! Count command implementation.

use crate::path;
use eventide_containers::ContainerKind;
use eventide_store::{ContainerStore, JournalStore};

pub fn run(store: String, kind: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let store_path = path::validate_store_path(&store, true)
        .map_err(|e| format!("Invalid store path: {}", e))?;

    let mut store = JournalStore::new(&store_path);
    store.open().map_err(|e| {
        let sanitized = path::sanitize_path_for_error(&store_path);
        format!("Failed to open store file: {}: {}", sanitized, e)
    })?;

    match kind {
        Some(name) => {
            let kind: ContainerKind = name.parse()?;
            println!("{}", store.container_count(kind)?);
        }
        None => {
            for kind in ContainerKind::ALL {
                println!("{:<20} {}", kind, store.container_count(kind)?);
            }
        }
    }

    store.close()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventide_containers::AttributeContainer;
    use tempfile::TempDir;

    #[test]
    fn test_count_existing_store() {
        let directory = TempDir::new().unwrap();
        let store_path = directory.path().join("session.evs");
        let mut store = JournalStore::new(&store_path);
        store.open().unwrap();
        let mut container = AttributeContainer::new(ContainerKind::EventData);
        store.add_container(&mut container).unwrap();
        store.close().unwrap();

        let result = run(
            store_path.to_str().unwrap().to_string(),
            Some("event_data".to_string()),
        );
        assert!(result.is_ok(), "Count failed: {:?}", result.err());
    }

    #[test]
    fn test_count_missing_store_fails() {
        let directory = TempDir::new().unwrap();
        let missing = directory.path().join("missing.evs");
        assert!(run(missing.to_str().unwrap().to_string(), None).is_err());
    }
}
