use crate::error::FetchError;
use crate::parsers::SiteFields;
use crate::table::{Row, Table, Value};
use serde::{Deserialize, Serialize};

/// Link from the listing page to a tourist-site detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLink {
    pub url: String,
}

/// One scraped tourist site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouristSite {
    /// Address of the detail page the site was scraped from
    pub url: String,

    /// Name of the site (if available)
    pub title: Option<String>,

    /// Image address (if available)
    pub picture: Option<String>,

    /// Free-text description (if available)
    pub description: Option<String>,
}

impl TouristSite {
    /// Column names, in table order
    pub const COLUMNS: [&'static str; 4] = ["url", "title", "picture", "description"];

    /// Create a site record from a link and the fields found on its page
    pub fn new(link: DetailLink, fields: SiteFields) -> Self {
        Self {
            url: link.url,
            title: fields.title,
            picture: fields.picture,
            description: fields.description,
        }
    }

    /// Cells keyed by column name
    pub fn into_row(self) -> [(&'static str, Value); 4] {
        [
            ("url", Some(self.url)),
            ("title", self.title),
            ("picture", self.picture),
            ("description", self.description),
        ]
    }

    /// Read a site back from a table row; `None` when the row has no `url`
    pub fn from_row(row: &Row<'_>) -> Option<Self> {
        Some(Self {
            url: row.get("url")?.to_string(),
            title: row.get("title").map(str::to_string),
            picture: row.get("picture").map(str::to_string),
            description: row.get("description").map(str::to_string),
        })
    }
}

/// Why a detail link produced no row
#[derive(Debug)]
pub enum SkipReason {
    /// The detail page has no detail container
    MissingContainer,
    /// The detail page could not be fetched
    Fetch(FetchError),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingContainer => write!(f, "no detail container on page"),
            SkipReason::Fetch(err) => write!(f, "{}", err),
        }
    }
}

/// A detail link that produced no row
#[derive(Debug)]
pub struct SkippedLink {
    pub url: String,
    pub reason: SkipReason,
}

/// Outcome of a scrape run
#[derive(Debug, Default)]
pub struct ScrapeReport {
    /// One row per detail page that had a detail container, in listing order
    pub table: Table,

    /// Links that produced no row
    pub skipped: Vec<SkippedLink>,
}

impl ScrapeReport {
    /// Rows of the table as typed records
    pub fn sites(&self) -> Vec<TouristSite> {
        self.table
            .rows()
            .filter_map(|row| TouristSite::from_row(&row))
            .collect()
    }
}
