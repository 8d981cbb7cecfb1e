use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tracked shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub tracking_id: String,
    /// Free-text description of what is being shipped.
    pub contents: String,
    /// Shipping state ("placed", "in-transit", "delivered", ...). Not a closed set.
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Package {
    /// Creates a new package stamped with the current time.
    pub fn new(
        tracking_id: impl Into<String>,
        contents: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            tracking_id: tracking_id.into(),
            contents: contents.into(),
            status: status.into(),
            origin: None,
            destination: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the origin address.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Sets the destination address.
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Overrides both timestamps (useful for testing and for stores that
    /// keep the original creation time).
    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    /// Marks the package as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_package_has_equal_timestamps() {
        let package = Package::new("T1", "books", "placed");
        assert_eq!(package.created_at, package.updated_at);
        assert!(package.origin.is_none());
    }

    #[test]
    fn test_optional_addresses_are_not_serialized_when_absent() {
        let package = Package::new("T1", "books", "placed");
        let json = serde_json::to_value(&package).unwrap();

        assert_eq!(json["tracking_id"], "T1");
        assert!(json.get("origin").is_none());
        assert!(json.get("destination").is_none());
    }

    #[test]
    fn test_builder_sets_addresses() {
        let package = Package::new("T1", "books", "placed")
            .with_origin("Montevideo")
            .with_destination("Lisbon");
        assert_eq!(package.origin.as_deref(), Some("Montevideo"));
        assert_eq!(package.destination.as_deref(), Some("Lisbon"));
    }

    #[test]
    fn test_touch_moves_updated_at_only() {
        let created = DateTime::<Utc>::UNIX_EPOCH;
        let mut package = Package::new("T1", "books", "placed").with_timestamps(created, created);

        package.touch();

        assert_eq!(package.created_at, created);
        assert!(package.updated_at > created);
    }
}
