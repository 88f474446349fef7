//! Container filtering API for selective enumeration.

use eventide_containers::{AttributeContainer, AttributeValue};

/// Trait for filtering containers during enumeration.
pub trait ContainerFilter {
    /// Returns true if the container matches the filter criteria.
    fn matches(&self, container: &AttributeContainer) -> bool;
}

/// Filter matching containers whose attribute equals a value.
#[derive(Debug, Clone)]
pub struct AttributeEqualsFilter {
    /// Attribute name to compare.
    pub name: String,
    /// Value the attribute must equal.
    pub value: AttributeValue,
}

impl ContainerFilter for AttributeEqualsFilter {
    fn matches(&self, container: &AttributeContainer) -> bool {
        container
            .attribute(&self.name)
            .map(|value| *value == self.value)
            .unwrap_or(false)
    }
}

/// Filter matching containers that carry an attribute at all.
#[derive(Debug, Clone)]
pub struct HasAttributeFilter {
    /// Attribute name that must be present.
    pub name: String,
}

impl ContainerFilter for HasAttributeFilter {
    fn matches(&self, container: &AttributeContainer) -> bool {
        container.attribute(&self.name).is_some()
    }
}

/// Composite filter: all filters must match (AND).
pub struct AndFilter {
    /// Filters to combine with AND logic.
    pub filters: Vec<Box<dyn ContainerFilter>>,
}

impl ContainerFilter for AndFilter {
    fn matches(&self, container: &AttributeContainer) -> bool {
        self.filters.iter().all(|f| f.matches(container))
    }
}

/// Composite filter: any filter must match (OR).
pub struct OrFilter {
    /// Filters to combine with OR logic.
    pub filters: Vec<Box<dyn ContainerFilter>>,
}

impl ContainerFilter for OrFilter {
    fn matches(&self, container: &AttributeContainer) -> bool {
        self.filters.iter().any(|f| f.matches(container))
    }
}
