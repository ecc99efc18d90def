//! Collections served by the remote API and their per-collection query setup.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// Page size used for every list view.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One entity type served by the remote query API.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Launches,
    Payloads,
    Cores,
    Rockets,
    Ships,
    LaunchPads,
}

impl Collection {
    /// Every collection in navigation order.
    pub const ALL: [Collection; 6] = [
        Collection::Launches,
        Collection::Payloads,
        Collection::Cores,
        Collection::Rockets,
        Collection::Ships,
        Collection::LaunchPads,
    ];

    /// Path segment used both by the remote API and by local routes.
    pub const fn as_str(self) -> &'static str {
        match self {
            Collection::Launches => "launches",
            Collection::Payloads => "payloads",
            Collection::Cores => "cores",
            Collection::Rockets => "rockets",
            Collection::Ships => "ships",
            Collection::LaunchPads => "launchpads",
        }
    }

    /// Human readable title for headings and navigation.
    pub const fn title(self) -> &'static str {
        match self {
            Collection::Launches => "Launches",
            Collection::Payloads => "Payloads",
            Collection::Cores => "Cores",
            Collection::Rockets => "Rockets",
            Collection::Ships => "Ships",
            Collection::LaunchPads => "Launch Pads",
        }
    }

    /// Query setup for this collection.
    pub fn config(self) -> &'static CollectionConfig {
        match self {
            Collection::Launches => &LAUNCHES,
            Collection::Payloads => &PAYLOADS,
            Collection::Cores => &CORES,
            Collection::Rockets => &ROCKETS,
            Collection::Ships => &SHIPS,
            Collection::LaunchPads => &LAUNCH_PADS,
        }
    }

    /// Resolves the collection a populated relation points into.
    ///
    /// Relations are named either after the target collection (`launches`) or
    /// after a single reference to it (`launch`).
    pub fn from_relation(relation: &str) -> Option<Collection> {
        match relation {
            "launch" | "launches" => Some(Collection::Launches),
            "payload" | "payloads" => Some(Collection::Payloads),
            "core" | "cores" => Some(Collection::Cores),
            "rocket" | "rockets" => Some(Collection::Rockets),
            "ship" | "ships" => Some(Collection::Ships),
            "launchpad" | "launchpads" => Some(Collection::LaunchPads),
            _ => None,
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|collection| collection.as_str() == s)
            .ok_or_else(|| TypeConstraintError::InvalidValue(s.to_string()))
    }
}

/// Everything that differs between the list and detail views of two collections.
#[derive(Debug, PartialEq, Eq)]
pub struct CollectionConfig {
    pub collection: Collection,
    /// Field matched case-insensitively by the search box, if the view has one.
    pub search_field: Option<&'static str>,
    /// Relations expanded inline on every list query.
    pub list_populate: &'static [&'static str],
    /// Relations expanded inline on the detail query.
    pub detail_populate: &'static [&'static str],
    pub page_size: usize,
}

impl CollectionConfig {
    pub fn has_search(&self) -> bool {
        self.search_field.is_some()
    }
}

static LAUNCHES: CollectionConfig = CollectionConfig {
    collection: Collection::Launches,
    search_field: Some("name"),
    list_populate: &[],
    detail_populate: &["rocket", "launchpad", "payloads"],
    page_size: DEFAULT_PAGE_SIZE,
};

static PAYLOADS: CollectionConfig = CollectionConfig {
    collection: Collection::Payloads,
    search_field: Some("name"),
    list_populate: &["launch"],
    detail_populate: &["launch"],
    page_size: DEFAULT_PAGE_SIZE,
};

static CORES: CollectionConfig = CollectionConfig {
    collection: Collection::Cores,
    search_field: Some("serial"),
    list_populate: &["launches"],
    detail_populate: &["launches"],
    page_size: DEFAULT_PAGE_SIZE,
};

static ROCKETS: CollectionConfig = CollectionConfig {
    collection: Collection::Rockets,
    search_field: None,
    list_populate: &[],
    detail_populate: &[],
    page_size: DEFAULT_PAGE_SIZE,
};

static SHIPS: CollectionConfig = CollectionConfig {
    collection: Collection::Ships,
    search_field: None,
    list_populate: &[],
    detail_populate: &["launches"],
    page_size: DEFAULT_PAGE_SIZE,
};

static LAUNCH_PADS: CollectionConfig = CollectionConfig {
    collection: Collection::LaunchPads,
    search_field: None,
    list_populate: &[],
    detail_populate: &["rockets"],
    page_size: DEFAULT_PAGE_SIZE,
};
