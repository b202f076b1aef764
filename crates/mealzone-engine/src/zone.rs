//! Zone data model for the meal-timing timeline.
//!
//! A zone is a labelled, coloured sub-range of the 24-hour day with a
//! long-form description that the tooltip shows on hover.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// First hour of the chart domain.
pub const DAY_START: f64 = 0.0;

/// Last hour of the chart domain.
pub const DAY_END: f64 = 24.0;

/// Label that renders as two stacked lines.
pub const DANGER_ZONE: &str = "Danger Zone";

/// Hours that get a dashed interval marker.
pub const INTERVAL_HOURS: [f64; 8] = [6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0];

const CONSISTENT_FAILURE_TEXT: &str = "This zone represents the early hours where starting to eat consistently leads to poor results. Due to an increased number of meals spread throughout the day, this window is strongly associated with weight gain and a loss of control over meal frequency.";

const DANGER_ZONE_TEXT: &str = "This window poses a high risk of inconsistency. Eating in these hours often results in an additional meal that disrupts the eating schedule. While it's possible to maintain control, this zone can easily lead to hunger and a higher meal count.";

const REASONABLE_SUCCESS_TEXT: &str = "This window represents a period where timing aligns well with the goal of consuming only 3 meals per day. Eating in this window has shown a higher likelihood of successful adherence to the planned meal count and contributes to weight loss.";

const CONSISTENT_SUCCESS_TEXT: &str = "This zone aligns with the eating pattern that brought consistent results in Egypt. Starting meals later in the day allows for better control over hunger and meal frequency, making it easier to maintain a leaner physique and avoid overeating.";

/// A labelled time range on the 24-hour axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Display label, also the tooltip heading.
    pub label: String,
    /// Start hour (inclusive).
    pub start: f64,
    /// End hour (exclusive).
    pub end: f64,
    /// CSS colour used to fill the band.
    pub color: String,
    /// Long-form tooltip text.
    pub description: String,
}

impl Zone {
    /// Create a zone. The description is taken from the built-in catalogue.
    pub fn new(label: impl Into<String>, start: f64, end: f64, color: impl Into<String>) -> Self {
        let label = label.into();
        let description = zone_description(&label).to_string();
        Self {
            label,
            start,
            end,
            color: color.into(),
            description,
        }
    }

    /// Length of the zone in hours.
    pub fn duration_hours(&self) -> f64 {
        self.end - self.start
    }

    /// Whether `hour` falls inside `[start, end)`.
    pub fn contains(&self, hour: f64) -> bool {
        hour >= self.start && hour < self.end
    }

    /// Label lines as they are drawn on the chart.
    ///
    /// The danger zone is the only label split over two lines.
    pub fn label_lines(&self) -> Vec<&str> {
        if self.label == DANGER_ZONE {
            vec!["Danger", "Zone"]
        } else {
            vec![self.label.as_str()]
        }
    }
}

/// Look up the built-in description for a zone label.
///
/// Unknown labels yield an empty string rather than an error.
pub fn zone_description(label: &str) -> &'static str {
    match label {
        "Consistent Failure Zone" => CONSISTENT_FAILURE_TEXT,
        DANGER_ZONE => DANGER_ZONE_TEXT,
        "Reasonable Success" => REASONABLE_SUCCESS_TEXT,
        "Consistent Success" => CONSISTENT_SUCCESS_TEXT,
        _ => "",
    }
}

/// The four zones drawn on the chart.
pub fn default_zones() -> Vec<Zone> {
    vec![
        Zone::new("Consistent Failure Zone", 0.0, 8.0, "#FF4C4C"),
        Zone::new(DANGER_ZONE, 8.0, 10.0, "#FF8C42"),
        Zone::new("Reasonable Success", 10.0, 14.0, "#FFD700"),
        Zone::new("Consistent Success", 14.0, 20.0, "#4CAF50"),
    ]
}

/// Label -> description map built from a zone list.
///
/// Lookups for labels that are not in the list return `""`.
#[derive(Debug, Clone, Default)]
pub struct DescriptionLookup {
    entries: HashMap<String, String>,
}

impl DescriptionLookup {
    /// Build the lookup from zones.
    pub fn from_zones(zones: &[Zone]) -> Self {
        let entries = zones
            .iter()
            .map(|z| (z.label.clone(), z.description.clone()))
            .collect();
        Self { entries }
    }

    /// Description for `label`, or `""` if unknown.
    pub fn get(&self, label: &str) -> &str {
        let found = self.entries.get(label).map_or("", String::as_str);
        if found.is_empty() {
            tracing::trace!(label, "no description for zone label");
        }
        found
    }
}

/// An ordered, non-overlapping list of zones inside the day.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneSet {
    zones: Vec<Zone>,
}

impl ZoneSet {
    /// Validate and wrap a zone list.
    pub fn new(zones: Vec<Zone>) -> Result<Self, ZoneError> {
        for zone in &zones {
            if zone.start.is_nan() || zone.end.is_nan() || zone.start >= zone.end {
                return Err(ZoneError::InvalidRange {
                    label: zone.label.clone(),
                    start: zone.start,
                    end: zone.end,
                });
            }
            if zone.start < DAY_START || zone.end > DAY_END {
                return Err(ZoneError::OutOfDomain {
                    label: zone.label.clone(),
                });
            }
        }

        for pair in zones.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.start < prev.start {
                return Err(ZoneError::Unordered {
                    label: next.label.clone(),
                });
            }
            if next.start < prev.end {
                return Err(ZoneError::Overlap {
                    first: prev.label.clone(),
                    second: next.label.clone(),
                });
            }
        }

        Ok(Self { zones })
    }

    /// The validated zones, in start order.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Zone containing `hour`, if any.
    pub fn zone_at(&self, hour: f64) -> Option<&Zone> {
        self.zones.iter().find(|z| z.contains(hour))
    }

    /// Consume the set, returning the zones.
    pub fn into_zones(self) -> Vec<Zone> {
        self.zones
    }
}

impl Default for ZoneSet {
    fn default() -> Self {
        Self {
            zones: default_zones(),
        }
    }
}

/// Errors raised when validating a zone list.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ZoneError {
    /// Start is not strictly before end.
    #[error("zone '{label}' has an empty or inverted range {start}..{end}")]
    InvalidRange { label: String, start: f64, end: f64 },

    /// Zone reaches outside 0..24.
    #[error("zone '{label}' lies outside the 0..24 hour domain")]
    OutOfDomain { label: String },

    /// Zone starts before its predecessor.
    #[error("zone '{label}' is out of start order")]
    Unordered { label: String },

    /// Two consecutive zones overlap.
    #[error("zones '{first}' and '{second}' overlap")]
    Overlap { first: String, second: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_zones_validate() {
        let set = ZoneSet::new(default_zones()).unwrap();
        assert_eq!(set.zones().len(), 4);
        assert_eq!(set.zones()[1].label, DANGER_ZONE);
    }

    #[test]
    fn test_zone_description_lookup() {
        assert!(!zone_description("Danger Zone").is_empty());
        assert!(zone_description("Danger Zone").starts_with("This window poses a high risk"));
        assert_eq!(zone_description("Unknown"), "");
        assert_eq!(zone_description(""), "");
    }

    #[test]
    fn test_description_lookup_from_zones() {
        let lookup = DescriptionLookup::from_zones(&default_zones());
        assert_eq!(lookup.get("Reasonable Success"), zone_description("Reasonable Success"));
        assert_eq!(lookup.get("Unknown"), "");
    }

    #[test]
    fn test_custom_zone_without_catalogue_entry_has_empty_description() {
        let zone = Zone::new("Brunch", 10.0, 12.0, "#123456");
        assert_eq!(zone.description, "");
    }

    #[test]
    fn test_label_lines() {
        let zones = default_zones();
        assert_eq!(zones[0].label_lines(), vec!["Consistent Failure Zone"]);
        assert_eq!(zones[1].label_lines(), vec!["Danger", "Zone"]);
        assert_eq!(zones[2].label_lines(), vec!["Reasonable Success"]);
    }

    #[test]
    fn test_zone_at() {
        let set = ZoneSet::default();
        assert_eq!(set.zone_at(0.0).unwrap().label, "Consistent Failure Zone");
        assert_eq!(set.zone_at(9.5).unwrap().label, DANGER_ZONE);
        assert_eq!(set.zone_at(10.0).unwrap().label, "Reasonable Success");
        assert_eq!(set.zone_at(19.99).unwrap().label, "Consistent Success");
        assert!(set.zone_at(21.0).is_none());
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = ZoneSet::new(vec![Zone::new("A", 5.0, 5.0, "#000")]).unwrap_err();
        assert!(matches!(err, ZoneError::InvalidRange { .. }));
    }

    #[test]
    fn test_rejects_out_of_domain() {
        let err = ZoneSet::new(vec![Zone::new("A", 20.0, 25.0, "#000")]).unwrap_err();
        assert_eq!(err, ZoneError::OutOfDomain { label: "A".into() });
    }

    #[test]
    fn test_rejects_overlap_and_disorder() {
        let overlap = ZoneSet::new(vec![
            Zone::new("A", 0.0, 5.0, "#000"),
            Zone::new("B", 4.0, 6.0, "#000"),
        ])
        .unwrap_err();
        assert!(matches!(overlap, ZoneError::Overlap { .. }));

        let unordered = ZoneSet::new(vec![
            Zone::new("A", 6.0, 8.0, "#000"),
            Zone::new("B", 1.0, 2.0, "#000"),
        ])
        .unwrap_err();
        assert_eq!(unordered, ZoneError::Unordered { label: "B".into() });
    }

    #[test]
    fn test_interval_hours() {
        assert_eq!(INTERVAL_HOURS.len(), 8);
        assert!(INTERVAL_HOURS.windows(2).all(|w| w[1] - w[0] == 2.0));
    }
}
