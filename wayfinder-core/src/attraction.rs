use geo::Coord;

use crate::VertexId;

/// Descriptive metadata carried alongside an attraction.
///
/// None of these fields influence routing; they are surfaced to callers that
/// render results.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttractionDetails {
    /// Visitor rating, typically on a five-point scale.
    pub rating: f64,
    /// Suggested time to spend on site, in minutes.
    pub visit_duration: f64,
    /// Entry fee in the dataset's currency.
    pub entry_fee: f64,
    /// Relative popularity score.
    pub popularity: i64,
    /// Free-form labels.
    pub tags: Vec<String>,
    /// Human-readable description.
    pub description: String,
    /// Opening hours as published.
    pub opening_hours: String,
}

/// A vertex of the routing graph: a place worth visiting.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. A missing
/// location is `None`; there is no sentinel coordinate.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayfinder_core::Attraction;
///
/// let gate = Attraction::new(0, "Main Gate", "Entrance")
///     .with_location(Coord { x: 73.11, y: 26.47 });
///
/// assert_eq!(gate.id, 0);
/// assert!(gate.location.is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attraction {
    /// Dense identifier assigned on load.
    pub id: VertexId,
    /// Display name, unique within a graph.
    pub name: String,
    /// Category label such as "Museum" or "Hostel".
    pub category: String,
    /// Geographic position, when known.
    pub location: Option<Coord<f64>>,
    /// Metadata irrelevant to routing.
    pub details: AttractionDetails,
}

impl Attraction {
    /// Construct an attraction without a location or details.
    #[must_use]
    pub fn new(id: VertexId, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            location: None,
            details: AttractionDetails::default(),
        }
    }

    /// Attach a geographic position.
    #[must_use]
    pub const fn with_location(mut self, location: Coord<f64>) -> Self {
        self.location = Some(location);
        self
    }

    /// Attach descriptive metadata.
    #[must_use]
    pub fn with_details(mut self, details: AttractionDetails) -> Self {
        self.details = details;
        self
    }
}
