//! End-to-end pipeline tests over the journal-backed store.

use eventide_containers::{names, AttributeContainer, ContainerKind, PathSpec, Timestamp};
use eventide_output::{DualSinkWriter, StandardFieldFormatter};
use eventide_store::{ContainerStore, JournalStore};
use serde_json::Value;
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use tempfile::TempDir;

#[derive(Clone, Default)]
struct SharedSink(Rc<RefCell<Vec<u8>>>);

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn emitted_lines(sink: &SharedSink) -> Vec<Value> {
    String::from_utf8(sink.0.borrow().clone())
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn full_session_projects_and_persists() {
    let directory = TempDir::new().unwrap();
    let store_path = directory.path().join("session.evs");
    let sink = SharedSink::default();
    let mut writer = DualSinkWriter::new(
        JournalStore::new(&store_path),
        StandardFieldFormatter::new(),
        sink.clone(),
    );
    writer.open().unwrap();

    let mut stream = AttributeContainer::new(ContainerKind::EventDataStream).with_attribute(
        names::PATH_SPEC,
        PathSpec::new("OS").with_location("/var/log/syslog"),
    );
    let stream_identifier = writer.add_container(&mut stream).unwrap();

    let mut event_data = AttributeContainer::new(ContainerKind::EventData)
        .with_attribute("hostname", "acserver")
        .with_attribute("body", "session opened for user root")
        .with_attribute(names::PARSER_CHAIN, "syslog")
        .with_attribute(names::EVENT_DATA_STREAM_IDENTIFIER, stream_identifier);
    let data_identifier = writer.add_container(&mut event_data).unwrap();

    let mut tag = AttributeContainer::new(ContainerKind::EventTag)
        .with_attribute("labels", eventide_containers::AttributeValue::List(vec!["triage".into()]));
    let tag_identifier = writer.add_container(&mut tag).unwrap();

    let mut event = AttributeContainer::new(ContainerKind::Event)
        .with_attribute("timestamp", 1_700_000_000_000_000_i64)
        .with_attribute("timestamp_desc", "Content Modification Time")
        .with_attribute(names::DATE_TIME, Timestamp::from_micros(1_700_000_000_000_000))
        .with_attribute(names::EVENT_DATA_IDENTIFIER, data_identifier)
        .with_attribute(names::EVENT_TAG_IDENTIFIER, tag_identifier);
    writer.add_container(&mut event).unwrap();
    writer.close().unwrap();

    let lines = emitted_lines(&sink);
    assert_eq!(lines.len(), 1);
    let line = &lines[0];

    assert_eq!(line["__container_type__"], "event");
    assert_eq!(line["__type__"], "AttributeContainer");
    assert_eq!(line["hostname"], "acserver");
    assert_eq!(line["parser"], "syslog");
    assert!(line.get(names::PARSER_CHAIN).is_none());
    assert_eq!(line["pathspec"]["type"], "OS");
    assert!(line.get(names::PATH_SPEC).is_none());
    assert_eq!(line["display_name"], "OS:/var/log/syslog");
    assert_eq!(line["tag"]["__container_type__"], "event_tag");
    assert_eq!(line["tag"]["labels"][0], "triage");
    assert_eq!(line["date_time"]["timestamp"], 1_700_000_000_000_000_i64);
    assert!(line["message"].is_string());

    // The durable sink holds all four containers after reopen.
    let mut store = JournalStore::new(&store_path);
    store.open().unwrap();
    assert_eq!(store.container_count(ContainerKind::Event).unwrap(), 1);
    assert_eq!(store.container_count(ContainerKind::EventData).unwrap(), 1);
    assert_eq!(
        store.container_count(ContainerKind::EventDataStream).unwrap(),
        1
    );
    assert_eq!(store.container_count(ContainerKind::EventTag).unwrap(), 1);
}

#[test]
fn unresolvable_links_still_emit_and_persist() {
    let directory = TempDir::new().unwrap();
    let sink = SharedSink::default();
    let mut writer = DualSinkWriter::new(
        JournalStore::new(directory.path().join("session.evs")),
        StandardFieldFormatter::new(),
        sink.clone(),
    );
    writer.open().unwrap();

    let mut event = AttributeContainer::new(ContainerKind::Event)
        .with_attribute("timestamp", 42_i64)
        .with_attribute(
            names::EVENT_DATA_IDENTIFIER,
            eventide_containers::ContainerIdentifier::new(ContainerKind::EventData, 99),
        );
    writer.add_container(&mut event).unwrap();

    let lines = emitted_lines(&sink);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["timestamp"], 42);
    assert!(lines[0].get("tag").is_none());
    assert_eq!(writer.container_count(ContainerKind::Event).unwrap(), 1);
}

#[test]
fn each_event_yields_exactly_one_line() {
    let directory = TempDir::new().unwrap();
    let sink = SharedSink::default();
    let mut writer = DualSinkWriter::new(
        JournalStore::new(directory.path().join("session.evs")),
        StandardFieldFormatter::new(),
        sink.clone(),
    );
    writer.open().unwrap();

    for timestamp in 0..5_i64 {
        let mut event =
            AttributeContainer::new(ContainerKind::Event).with_attribute("timestamp", timestamp);
        writer.add_container(&mut event).unwrap();
    }
    writer.close().unwrap();

    let lines = emitted_lines(&sink);
    assert_eq!(lines.len(), 5);
    for (index, line) in lines.iter().enumerate() {
        assert_eq!(line["timestamp"], index as i64);
    }
}
