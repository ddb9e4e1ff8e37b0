/*
 * hydrate.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Build-time hydration of page containers from the content document.
 */

//! Build-time hydration.
//!
//! Hydration turns the content document into rendered markup inside the
//! expanded page's container elements. The content document is obtained from
//! the inline `content-data` script block when the page carries one, and
//! otherwise read from `content.json` at the site root. Both paths failing
//! is not an error: the page shell stays usable, every container is simply
//! left empty.
//!
//! Each render is an idempotent full replacement of one container's inner
//! markup; a container id missing from the page is skipped silently. Text
//! and attribute values are HTML-escaped - the built-in panel icons are the
//! only intentionally raw markup.

use serde_json::Value;
use tracing::warn;

use crate::content::{CONTENT_DATA_ID, Card, Content, NavLink, ShowcaseStep};
use crate::scan::{self, Element, escape_html};
use crate::site::SiteContext;
use crate::stepper::{ShowcaseStepper, StepDetail};

/// Containers bound to the navigation link list.
const LINK_CONTAINERS: [&str; 3] = ["navLinks", "footerLinks", "mobileMenu"];

/// Built-in panel type icons, keyed by type name.
const PANEL_ICONS: [(&str, &str); 6] = [
    (
        "Text",
        "<svg viewBox=\"0 0 24 24\" fill=\"none\"><path d=\"M4 6h16M9 6v14M15 6v14\" stroke=\"rgba(255,255,255,.9)\" stroke-width=\"2\" stroke-linecap=\"round\"/></svg>",
    ),
    (
        "Image",
        "<svg viewBox=\"0 0 24 24\" fill=\"none\"><path d=\"M4 7h16v12H4z\" stroke=\"rgba(255,255,255,.9)\" stroke-width=\"2\"/><path d=\"M7 15l3-3 4 4 3-2 3 3\" stroke=\"rgba(255,255,255,.9)\" stroke-width=\"2\" stroke-linecap=\"round\" stroke-linejoin=\"round\"/></svg>",
    ),
    (
        "Chart",
        "<svg viewBox=\"0 0 24 24\" fill=\"none\"><path d=\"M5 19V9M10 19V5M15 19v-7M20 19v-11\" stroke=\"rgba(255,255,255,.9)\" stroke-width=\"2\" stroke-linecap=\"round\"/></svg>",
    ),
    (
        "Timeline",
        "<svg viewBox=\"0 0 24 24\" fill=\"none\"><path d=\"M6 7h12M6 12h8M6 17h12\" stroke=\"rgba(255,255,255,.9)\" stroke-width=\"2\" stroke-linecap=\"round\"/></svg>",
    ),
    (
        "KPI",
        "<svg viewBox=\"0 0 24 24\" fill=\"none\"><path d=\"M6 19h12M8 16l3-3 2 2 5-6\" stroke=\"rgba(255,255,255,.9)\" stroke-width=\"2\" stroke-linecap=\"round\" stroke-linejoin=\"round\"/></svg>",
    ),
    (
        "Quote",
        "<svg viewBox=\"0 0 24 24\" fill=\"none\"><path d=\"M7 11h4v8H5v-6l2-2zm10 0h4v8h-6v-6l2-2z\" stroke=\"rgba(255,255,255,.9)\" stroke-width=\"2\" stroke-linejoin=\"round\"/></svg>",
    ),
];

/// Icon markup for a panel type name.
pub fn panel_icon(name: &str) -> Option<&'static str> {
    PANEL_ICONS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, svg)| *svg)
}

/// The built-in panel type names, in display order.
pub fn default_panel_types() -> Vec<String> {
    PANEL_ICONS.iter().map(|(key, _)| (*key).to_string()).collect()
}

/// Obtain the content document for a page.
///
/// The inline script block wins; a page without one (or with malformed
/// inline JSON) falls back to `content.json` at the site root. Failures are
/// warnings, never errors.
pub fn load_content(page: &str, ctx: &SiteContext) -> Option<Value> {
    if let Some(el) = scan::find_element_by_id(page, CONTENT_DATA_ID) {
        match serde_json::from_str(el.inner_text(page)) {
            Ok(value) => return Some(value),
            Err(err) => warn!(%err, "Invalid inline content-data JSON"),
        }
    }

    let path = ctx.content_path();
    if !path.exists() {
        return None;
    }
    match std::fs::read_to_string(&path) {
        Ok(text) => match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(%err, path = %path.display(), "Unable to parse content document");
                None
            }
        },
        Err(err) => {
            warn!(%err, path = %path.display(), "Unable to read content document");
            None
        }
    }
}

/// Per-container card rendering switches, read off the container's
/// `data-*` attributes.
#[derive(Debug, Clone, Copy)]
pub struct CardRenderOptions {
    /// Media block shown unless the container says `data-media="false"`.
    pub media: bool,
    /// Price line and feature list shown only for `data-price="true"`.
    pub price: bool,
}

impl CardRenderOptions {
    fn from_container(el: &Element) -> Self {
        Self {
            media: el.data("media") != Some("false"),
            price: el.data("price") == Some("true"),
        }
    }
}

/// Render a link list.
pub fn render_links(links: &[NavLink]) -> String {
    links
        .iter()
        .map(|link| {
            format!(
                "<a href=\"{}\">{}</a>",
                escape_html(&link.href),
                escape_html(&link.label)
            )
        })
        .collect()
}

/// Render a card grid.
pub fn render_cards(cards: &[Card], opts: CardRenderOptions) -> String {
    let mut out = String::new();
    for card in cards {
        let featured = if card.featured { " card--featured" } else { "" };
        let tone = escape_html(&card.tone);
        out.push_str(&format!("<div class=\"card{featured}\" data-tone=\"{tone}\">"));

        if opts.media {
            let label = card.media_label.as_deref().unwrap_or(&card.title);
            match &card.image_src {
                Some(src) => {
                    let alt = card.image_alt.as_deref().unwrap_or(label);
                    out.push_str(&format!(
                        "<div class=\"cardMedia\" data-tone=\"{tone}\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\" decoding=\"async\" /></div>",
                        escape_html(src),
                        escape_html(alt)
                    ));
                }
                None => {
                    out.push_str(&format!(
                        "<div class=\"cardMedia\" data-tone=\"{tone}\"><span>{}</span></div>",
                        escape_html(label)
                    ));
                }
            }
        }

        if opts.price {
            if let Some(price) = &card.price {
                out.push_str("<div class=\"cardPrice\">");
                out.push_str(&format!(
                    "<span class=\"priceValue\">{}</span>",
                    escape_html(price)
                ));
                if let Some(note) = &card.price_note {
                    out.push_str(&format!(
                        "<span class=\"priceNote\">{}</span>",
                        escape_html(note)
                    ));
                }
                out.push_str("</div>");
            }
            if let Some(features) = &card.features {
                out.push_str("<ul class=\"cardList\">");
                for item in features {
                    out.push_str(&format!("<li>{}</li>", escape_html(item)));
                }
                out.push_str("</ul>");
            }
        }

        out.push_str(&format!(
            "<strong>{}</strong><h3>{}</h3><p>{}</p></div>",
            escape_html(&card.label),
            escape_html(&card.title),
            escape_html(&card.body)
        ));
    }
    out
}

/// Render the type picker's button palette.
pub fn render_type_picker(types: &[String]) -> String {
    types
        .iter()
        .map(|name| {
            format!(
                "<button class=\"typeItem\" type=\"button\" data-type=\"{}\">{}{}</button>",
                escape_html(name),
                panel_icon(name).unwrap_or(""),
                escape_html(name)
            )
        })
        .collect()
}

/// Render the showcase step strip. The first step is active; each step
/// carries its detail metadata as `data-*` attributes.
pub fn render_showcase(steps: &[ShowcaseStep]) -> String {
    let mut out = String::new();
    for (index, step) in steps.iter().enumerate() {
        let detail = StepDetail::from(step);
        let active = if index == 0 { " is-active" } else { "" };
        out.push_str(&format!(
            "<button class=\"showcaseStep{active}\" type=\"button\" data-tone=\"{}\" data-label=\"{}\" data-tag=\"{}\" data-chip=\"{}\" data-note=\"{}\" data-desc=\"{}\">",
            escape_html(&detail.tone),
            escape_html(&detail.label),
            escape_html(&detail.tag),
            escape_html(&detail.chip),
            escape_html(&detail.note),
            escape_html(&detail.desc)
        ));
        out.push_str(&format!(
            "<span class=\"showcaseIndex\">{:02}</span>",
            index + 1
        ));
        out.push_str(&format!(
            "<div class=\"showcaseBody\"><h3>{}</h3><p>{}</p></div></button>",
            escape_html(&step.title),
            escape_html(&step.desc)
        ));
    }
    out
}

/// Hydrate every known container in `page` from the content document.
///
/// `content` is the raw JSON value (so unknown fields survive the inline
/// round trip); `None` means no content loaded, which renders every
/// container empty.
pub fn hydrate(page: &str, content: Option<&Value>) -> String {
    let model = match content {
        Some(value) => match serde_json::from_value::<Content>(value.clone()) {
            Ok(model) => Some(model),
            Err(err) => {
                warn!(%err, "Content document has an unexpected shape");
                None
            }
        },
        None => None,
    };

    let empty = Content::default();
    let loaded = model.is_some();
    let model = model.as_ref().unwrap_or(&empty);

    // Panel types default to the built-in set only for a loaded document
    // that omits them; no document at all renders nothing.
    let panel_types = match (&model.panel_types, loaded) {
        (Some(types), _) => types.clone(),
        (None, true) => default_panel_types(),
        (None, false) => Vec::new(),
    };

    let mut page = page.to_string();

    let links = render_links(&model.nav_links);
    for id in LINK_CONTAINERS {
        page = replace_container(page, id, |_| links.clone());
    }

    for (id, cards) in [
        ("featuresCards", &model.cards.features),
        ("dataCards", &model.cards.data),
        ("pricingCards", &model.cards.pricing),
    ] {
        page = replace_container(page, id, |el| {
            render_cards(cards, CardRenderOptions::from_container(el))
        });
    }

    page = replace_container(page, "typeGrid", |_| render_type_picker(&panel_types));
    page = replace_container(page, "showcaseSteps", |_| render_showcase(&model.showcase));
    apply_showcase_detail(page, &model.showcase)
}

/// Replace one container's inner markup, skipping silently when the id is
/// absent from the page.
fn replace_container<F>(page: String, id: &str, render: F) -> String
where
    F: FnOnce(&Element) -> String,
{
    match scan::find_element_by_id(&page, id) {
        Some(el) => {
            let markup = render(&el);
            scan::replace_inner(&page, &el, &markup)
        }
        None => page,
    }
}

/// Fill the showcase detail panel from the initially active step.
///
/// With no steps the static placeholder copy is left alone, matching the
/// strip itself staying empty.
fn apply_showcase_detail(page: String, steps: &[ShowcaseStep]) -> String {
    let Some(stepper) = ShowcaseStepper::new(steps) else {
        return page;
    };
    let detail = stepper.detail().clone();

    let mut page = page;
    if let Some(frame) = scan::find_element_by_id(&page, "showcaseFrame") {
        page = scan::set_attr(&page, &frame, "data-tone", &detail.tone);
    }
    for (id, text) in [
        ("showcaseLabel", &detail.label),
        ("showcaseTag", &detail.tag),
        ("showcaseChip", &detail.chip),
        ("showcaseNote", &detail.note),
        ("showcaseDesc", &detail.desc),
    ] {
        page = replace_container(page, id, |_| escape_html(text));
    }
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    fn ctx_without_content() -> (TempDir, SiteContext) {
        let temp = TempDir::new().unwrap();
        let ctx = SiteContext::discover(temp.path()).unwrap();
        (temp, ctx)
    }

    #[test]
    fn test_load_content_prefers_inline() {
        let (temp, ctx) = ctx_without_content();
        std::fs::write(temp.path().join("content.json"), r#"{"from":"file"}"#).unwrap();

        let page = "<script type=\"application/json\" id=\"content-data\">\n{\"from\":\"inline\"}\n</script>";
        let value = load_content(page, &ctx).unwrap();
        assert_eq!(value, json!({"from": "inline"}));
    }

    #[test]
    fn test_load_content_falls_back_to_file() {
        let (temp, ctx) = ctx_without_content();
        std::fs::write(temp.path().join("content.json"), r#"{"from":"file"}"#).unwrap();

        let value = load_content("<html></html>", &ctx).unwrap();
        assert_eq!(value, json!({"from": "file"}));
    }

    #[test]
    fn test_load_content_malformed_inline_falls_back() {
        let (temp, ctx) = ctx_without_content();
        std::fs::write(temp.path().join("content.json"), r#"{"from":"file"}"#).unwrap();

        let page = "<script type=\"application/json\" id=\"content-data\">{oops</script>";
        let value = load_content(page, &ctx).unwrap();
        assert_eq!(value, json!({"from": "file"}));
    }

    #[test]
    fn test_load_content_absent_everywhere() {
        let (_temp, ctx) = ctx_without_content();
        assert!(load_content("<html></html>", &ctx).is_none());
    }

    #[test]
    fn test_inline_round_trip_is_deep_equal() {
        let document = json!({
            "navLinks": [{"href": "/a", "label": "A"}],
            "custom": {"nested": [1, 2, {"deep": true}]}
        });
        let raw = serde_json::to_string_pretty(&document).unwrap();
        let page = crate::inject::content_partial(&raw);

        let (_temp, ctx) = ctx_without_content();
        let value = load_content(&page, &ctx).unwrap();
        assert_eq!(value, document);
    }

    #[test]
    fn test_render_links_single() {
        let links = [NavLink {
            href: "/a".to_string(),
            label: "A".to_string(),
        }];
        assert_eq!(render_links(&links), r#"<a href="/a">A</a>"#);
    }

    #[test]
    fn test_render_links_escapes() {
        let links = [NavLink {
            href: "/a?x=1&y=2".to_string(),
            label: "<A>".to_string(),
        }];
        assert_eq!(render_links(&links), r#"<a href="/a?x=1&amp;y=2">&lt;A&gt;</a>"#);
    }

    #[test]
    fn test_render_cards_media_and_featured() {
        let cards = [Card {
            label: "L".to_string(),
            title: "T".to_string(),
            body: "B".to_string(),
            tone: "blue".to_string(),
            featured: true,
            ..Default::default()
        }];
        let out = render_cards(&cards, CardRenderOptions { media: true, price: false });
        assert!(out.starts_with(r#"<div class="card card--featured" data-tone="blue">"#));
        // No media label set: falls back to the title.
        assert!(out.contains(r#"<div class="cardMedia" data-tone="blue"><span>T</span></div>"#));
        assert!(out.ends_with("<strong>L</strong><h3>T</h3><p>B</p></div>"));
        assert!(!out.contains("cardPrice"));
    }

    #[test]
    fn test_render_cards_media_suppressed() {
        let cards = [Card {
            tone: "coral".to_string(),
            ..Default::default()
        }];
        let out = render_cards(&cards, CardRenderOptions { media: false, price: false });
        assert!(!out.contains("cardMedia"));
    }

    #[test]
    fn test_render_cards_image_media() {
        let cards = [Card {
            title: "T".to_string(),
            tone: "blue".to_string(),
            image_src: Some("hero.webp".to_string()),
            ..Default::default()
        }];
        let out = render_cards(&cards, CardRenderOptions { media: true, price: false });
        assert!(out.contains(r#"<img src="hero.webp" alt="T" loading="lazy" decoding="async" />"#));
    }

    #[test]
    fn test_render_cards_price_block() {
        let cards = [Card {
            tone: "blue".to_string(),
            price: Some("$12".to_string()),
            price_note: Some("/mo".to_string()),
            features: Some(vec!["Two seats".to_string()]),
            ..Default::default()
        }];
        let out = render_cards(&cards, CardRenderOptions { media: false, price: true });
        assert!(out.contains(
            r#"<div class="cardPrice"><span class="priceValue">$12</span><span class="priceNote">/mo</span></div>"#
        ));
        assert!(out.contains(r#"<ul class="cardList"><li>Two seats</li></ul>"#));
    }

    #[test]
    fn test_render_type_picker_known_and_unknown() {
        let types = ["Text".to_string(), "Mystery".to_string()];
        let out = render_type_picker(&types);
        assert!(out.contains(r#"data-type="Text"><svg"#));
        // Unknown types render without an icon.
        assert!(out.contains(r#"data-type="Mystery">Mystery</button>"#));
    }

    #[test]
    fn test_render_showcase_first_step_active() {
        let steps = [
            ShowcaseStep {
                title: "One".to_string(),
                desc: "First".to_string(),
                ..Default::default()
            },
            ShowcaseStep {
                title: "Two".to_string(),
                desc: "Second".to_string(),
                tone: Some("coral".to_string()),
                ..Default::default()
            },
        ];
        let out = render_showcase(&steps);
        assert!(out.contains(r#"class="showcaseStep is-active" type="button" data-tone="blue""#));
        assert!(out.contains(r#"class="showcaseStep" type="button" data-tone="coral""#));
        assert!(out.contains(r#"<span class="showcaseIndex">01</span>"#));
        assert!(out.contains(r#"<span class="showcaseIndex">02</span>"#));
        assert!(out.contains("<h3>Two</h3><p>Second</p>"));
    }

    #[test]
    fn test_hydrate_nav_links_into_each_bound_container() {
        let page = r#"<nav id="navLinks"></nav><div id="footerLinks"></div><div id="mobileMenu"></div>"#;
        let content = json!({"navLinks": [{"href": "/a", "label": "A"}]});
        let out = hydrate(page, Some(&content));
        assert_eq!(out.matches(r#"<a href="/a">A</a>"#).count(), 3);
    }

    #[test]
    fn test_hydrate_missing_containers_skipped() {
        let page = "<main>nothing to fill</main>";
        let content = json!({"navLinks": [{"href": "/a", "label": "A"}]});
        assert_eq!(hydrate(page, Some(&content)), page);
    }

    #[test]
    fn test_hydrate_absent_content_leaves_containers_empty() {
        let page = r#"<nav id="navLinks"></nav><div id="typeGrid"></div><div id="showcaseSteps"></div>"#;
        let out = hydrate(page, None);
        assert_eq!(out, page);
    }

    #[test]
    fn test_hydrate_empty_document_clears_stale_markup() {
        let page = r#"<nav id="navLinks"><a href="/old">Old</a></nav>"#;
        let out = hydrate(page, Some(&json!({})));
        assert_eq!(out, r#"<nav id="navLinks"></nav>"#);
    }

    #[test]
    fn test_hydrate_panel_types_default_when_document_present() {
        let page = r#"<div id="typeGrid"></div>"#;
        let out = hydrate(page, Some(&json!({})));
        for name in ["Text", "Image", "Chart", "Timeline", "KPI", "Quote"] {
            assert!(out.contains(&format!("data-type=\"{name}\"")));
        }
    }

    #[test]
    fn test_hydrate_explicit_empty_panel_types() {
        let page = r#"<div id="typeGrid"></div>"#;
        let out = hydrate(page, Some(&json!({"panelTypes": []})));
        assert_eq!(out, page);
    }

    #[test]
    fn test_hydrate_card_container_attributes() {
        let page = r#"<div id="pricingCards" data-media="false" data-price="true"></div>"#;
        let content = json!({"cards": {"pricing": [
            {"label": "L", "title": "T", "body": "B", "tone": "blue", "price": "$0"}
        ]}});
        let out = hydrate(page, Some(&content));
        assert!(out.contains("cardPrice"));
        assert!(!out.contains("cardMedia"));
    }

    #[test]
    fn test_hydrate_showcase_detail_panel() {
        let page = concat!(
            r#"<div id="showcaseFrame" data-tone="blue">"#,
            r#"<span id="showcaseLabel">placeholder</span>"#,
            r#"<span id="showcaseTag">placeholder</span>"#,
            r#"<span id="showcaseChip">placeholder</span>"#,
            r#"<span id="showcaseNote">placeholder</span>"#,
            r#"<p id="showcaseDesc">placeholder</p>"#,
            r#"</div><div id="showcaseSteps"></div>"#,
        );
        let content = json!({"showcase": [
            {"title": "Charts", "desc": "Plot it", "tone": "coral", "tag": "Panel A"}
        ]});
        let out = hydrate(page, Some(&content));
        assert!(out.contains(r#"<div id="showcaseFrame" data-tone="coral">"#));
        assert!(out.contains(r#"<span id="showcaseLabel">Charts</span>"#));
        assert!(out.contains(r#"<span id="showcaseTag">Panel A</span>"#));
        assert!(out.contains(r#"<p id="showcaseDesc">Plot it</p>"#));
        assert!(out.contains("showcaseStep is-active"));
    }

    #[test]
    fn test_hydrate_no_steps_keeps_placeholder_detail() {
        let page = r#"<div id="showcaseFrame" data-tone="blue"><span id="showcaseLabel">keep</span></div>"#;
        let out = hydrate(page, Some(&json!({})));
        assert_eq!(out, page);
    }

    #[test]
    fn test_hydrate_is_idempotent() {
        let page = concat!(
            r#"<nav id="navLinks"></nav>"#,
            r#"<div id="featuresCards" data-scroll="true"></div>"#,
            r#"<div id="typeGrid"></div>"#,
        );
        let content = json!({
            "navLinks": [{"href": "/a", "label": "A"}],
            "cards": {"features": [{"label": "L", "title": "T", "body": "B", "tone": "blue"}]}
        });
        let once = hydrate(page, Some(&content));
        let twice = hydrate(&once, Some(&content));
        assert_eq!(once, twice);
    }
}
