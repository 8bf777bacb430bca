pub mod extract;
pub mod html;


pub use extract::{
    DescriptionStrategy, DetailExtractor, SecondToLastChild, SelectorDescription, SiteFields,
};
pub use html::{Document, Element, Node};
