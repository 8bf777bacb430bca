use crate::config::ScraperConfig;
use crate::error::ConfigError;
use crate::parsers::html::{Document, Element};
use scraper::Selector;

/// Picks the description out of a detail container
pub trait DescriptionStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Description text, or `None` when the container has none
    fn describe(&self, container: &Element<'_>) -> Option<String>;
}

/// Text of the container's second-to-last direct child
///
/// The tourism portal lays out a detail block as title, picture, description
/// and one trailing element, so the description sits right before the end.
/// Containers with fewer than two children have no description.
#[derive(Debug, Default, Clone, Copy)]
pub struct SecondToLastChild;

impl DescriptionStrategy for SecondToLastChild {
    fn name(&self) -> &'static str {
        "second-to-last-child"
    }

    fn describe(&self, container: &Element<'_>) -> Option<String> {
        container
            .child_from_end(2)
            .map(|node| node.text().trim().to_string())
    }
}

/// Text of the first element matching a CSS selector inside the container
#[derive(Debug)]
pub struct SelectorDescription {
    selector: Selector,
}

impl SelectorDescription {
    pub fn parse(css: &str) -> Result<Self, ConfigError> {
        let selector = Selector::parse(css).map_err(|_| ConfigError::Selector(css.to_string()))?;
        Ok(Self { selector })
    }
}

impl DescriptionStrategy for SelectorDescription {
    fn name(&self) -> &'static str {
        "selector"
    }

    fn describe(&self, container: &Element<'_>) -> Option<String> {
        container
            .select_first(&self.selector)
            .map(|element| element.text().trim().to_string())
    }
}

/// Fields scraped from one detail page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteFields {
    pub title: Option<String>,
    pub picture: Option<String>,
    pub description: Option<String>,
}

/// Locates the detail container on a page and pulls the site fields out of it
pub struct DetailExtractor {
    container_tag: String,
    container_class: String,
    description: Box<dyn DescriptionStrategy>,
}

impl DetailExtractor {
    pub fn new(
        container_tag: &str,
        container_class: &str,
        description: Box<dyn DescriptionStrategy>,
    ) -> Self {
        Self {
            container_tag: container_tag.to_string(),
            container_class: container_class.to_string(),
            description,
        }
    }

    /// Build an extractor from the container and description settings
    pub fn from_config(config: &ScraperConfig) -> Result<Self, ConfigError> {
        let description: Box<dyn DescriptionStrategy> = match &config.description_selector {
            Some(css) => Box::new(SelectorDescription::parse(css)?),
            None => Box::new(SecondToLastChild),
        };
        Ok(Self::new(
            &config.container_tag,
            &config.container_class,
            description,
        ))
    }

    /// Extract the site fields, or `None` if the page has no detail container
    pub fn extract(&self, page: &Document) -> Option<SiteFields> {
        let container = page.find_by_class(&self.container_tag, &self.container_class)?;

        let title = container
            .find_first("a")
            .map(|a| a.text().trim().to_string())
            .filter(|t| !t.is_empty());

        let picture = container
            .find_first("img")
            .and_then(|img| img.attr("src"))
            .map(str::to_string);

        let description = self.description.describe(&container);

        ::log::trace!(
            "Extracted title={:?} picture={:?} description via {}",
            title,
            picture,
            self.description.name()
        );

        Some(SiteFields {
            title,
            picture,
            description,
        })
    }
}

impl Default for DetailExtractor {
    fn default() -> Self {
        Self::new("div", "news_content", Box::new(SecondToLastChild))
    }
}
