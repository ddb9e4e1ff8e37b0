//! Content document model.
//!
//! The content document is a hand-authored JSON file describing the page
//! copy: navigation links, grouped card lists, panel-type names, and
//! showcase step descriptors. No schema is enforced; every field is
//! optional and hydrates to an empty default when absent, so a partial
//! document still produces a usable page.

use serde::{Deserialize, Serialize};

/// `id` of the inline script element carrying the content document in the
/// built page.
pub const CONTENT_DATA_ID: &str = "content-data";

/// The whole content document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Content {
    /// Links rendered into the navigation, footer, and mobile menu.
    pub nav_links: Vec<NavLink>,

    /// Card lists, grouped by page section.
    pub cards: CardGroups,

    /// Panel type names for the type picker. `None` falls back to the
    /// built-in icon set; an explicit empty list renders nothing.
    pub panel_types: Option<Vec<String>>,

    /// Showcase step descriptors, in display order.
    pub showcase: Vec<ShowcaseStep>,
}

/// One navigation link.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavLink {
    pub href: String,
    pub label: String,
}

/// Card lists keyed by the page section that renders them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardGroups {
    pub features: Vec<Card>,
    pub data: Vec<Card>,
    pub pricing: Vec<Card>,
}

/// One card in a card grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Card {
    pub label: String,
    pub title: String,
    pub body: String,
    pub tone: String,
    pub featured: bool,

    /// Text shown in the media block when there is no image.
    pub media_label: Option<String>,
    pub image_src: Option<String>,
    pub image_alt: Option<String>,

    /// Price line, rendered only for containers with `data-price="true"`.
    pub price: Option<String>,
    pub price_note: Option<String>,
    pub features: Option<Vec<String>>,
}

/// One showcase step descriptor.
///
/// Only `title` and `desc` are required in practice; the remaining fields
/// default from them at render time (see [`crate::stepper::StepDetail`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseStep {
    pub title: String,
    pub desc: String,
    pub label: Option<String>,
    pub tag: Option<String>,
    pub chip: Option<String>,
    pub note: Option<String>,
    pub tone: Option<String>,
}
