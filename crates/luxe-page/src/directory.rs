#![forbid(unsafe_code)]

//! Project catalogue backing the detail modal.
//!
//! Records are keyed by display name because the markup carries the
//! name as the card's `.project-name` text, not an id.

use std::collections::BTreeMap;

/// A single marketed project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    pub name: String,
    pub location: String,
    pub description: String,
    pub highlights: Vec<String>,
}

/// Lookup table from project name to its record.
#[derive(Debug, Clone, Default)]
pub struct ProjectDirectory {
    records: BTreeMap<String, ProjectRecord>,
}

impl ProjectDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The three flagship projects shipped with the site.
    #[must_use]
    pub fn seed() -> Self {
        let mut dir = Self::new();
        dir.insert(ProjectRecord {
            name: "Nova Haven Heights".into(),
            location: "Mumbai, Maharashtra".into(),
            description: "Nova Haven Heights represents the pinnacle of luxury living in \
                Mumbai's most prestigious location. This architectural masterpiece combines \
                contemporary design with timeless elegance, offering residents an unparalleled \
                lifestyle experience with breathtaking city views and world-class amenities."
                .into(),
            highlights: vec![
                "360-degree panoramic views of the Mumbai skyline".into(),
                "Smart home automation with voice control".into(),
                "Exclusive rooftop infinity pool and lounge".into(),
            ],
        });
        dir.insert(ProjectRecord {
            name: "Nova Haven Vista".into(),
            location: "Pune, Maharashtra".into(),
            description: "Nestled in the heart of Pune's thriving IT corridor, Nova Haven \
                Vista offers a perfect blend of urban convenience and serene living. Designed \
                for modern professionals and families, this project features sustainable \
                architecture and cutting-edge amenities."
                .into(),
            highlights: vec![
                "Proximity to major IT parks and educational institutions".into(),
                "Extensive green spaces and walking trails".into(),
                "Advanced security with AI-powered surveillance".into(),
            ],
        });
        dir.insert(ProjectRecord {
            name: "Nova Haven Central".into(),
            location: "Bengaluru, Karnataka".into(),
            description: "Nova Haven Central sets new standards for luxury living in \
                Bengaluru's prime business district. This landmark development combines \
                sophisticated design with sustainable practices, creating an oasis of \
                tranquility amidst the bustling city."
                .into(),
            highlights: vec![
                "Walking distance to metro station and business hubs".into(),
                "Rainwater harvesting and solar power systems".into(),
                "Wellness center with spa and meditation facilities".into(),
            ],
        });
        dir
    }

    pub fn insert(&mut self, record: ProjectRecord) {
        self.records.insert(record.name.clone(), record);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ProjectRecord> {
        self.records.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
