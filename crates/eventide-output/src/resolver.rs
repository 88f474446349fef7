//! Related-container resolution.

use eventide_containers::{names, AttributeContainer, ContainerKind};
use eventide_store::ContainerStore;
use tracing::debug;

/// The containers linked to one event, each best-effort.
#[derive(Debug, Default)]
pub struct RelatedRecords {
    /// Secondary data linked through the event's data identifier.
    pub event_data: Option<AttributeContainer>,
    /// Stream metadata linked through the event data's stream identifier.
    pub event_data_stream: Option<AttributeContainer>,
    /// Annotation linked through the event's tag identifier.
    pub event_tag: Option<AttributeContainer>,
}

/// Resolves the containers linked to an event.
///
/// Each lookup is independent and best-effort: an absent linkage attribute,
/// a non-identifier value under the attribute name, a store failure, or a
/// lookup miss all leave that slot `None`. A missing related container is
/// never fatal to the pipeline.
pub fn resolve_related<S: ContainerStore>(
    store: &S,
    event: &AttributeContainer,
) -> RelatedRecords {
    let event_data = lookup(
        store,
        event,
        names::EVENT_DATA_IDENTIFIER,
        ContainerKind::EventData,
    );

    let event_data_stream = event_data.as_ref().and_then(|event_data| {
        lookup(
            store,
            event_data,
            names::EVENT_DATA_STREAM_IDENTIFIER,
            ContainerKind::EventDataStream,
        )
    });

    let event_tag = lookup(
        store,
        event,
        names::EVENT_TAG_IDENTIFIER,
        ContainerKind::EventTag,
    );

    RelatedRecords {
        event_data,
        event_data_stream,
        event_tag,
    }
}

fn lookup<S: ContainerStore>(
    store: &S,
    source: &AttributeContainer,
    attribute_name: &str,
    kind: ContainerKind,
) -> Option<AttributeContainer> {
    let identifier = source.linked_identifier(attribute_name)?;
    match store.container_by_identifier(kind, &identifier) {
        Ok(container) => {
            if container.is_none() {
                debug!(%identifier, "linked container not found");
            }
            container
        }
        Err(error) => {
            debug!(%identifier, %error, "linked container lookup failed");
            None
        }
    }
}
