// Mietubl-specific HTML parsing
use crate::model::{ExtractionResult, ModelGroup, ParserError};
use crate::utils::{collapse_whitespace, decode_html_entities};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tracing::debug;

const PANEL_SELECTOR: &str = ".wrapper.compatible-panel .compatible-models";
const TITLE_SELECTOR: &str = ".clear h3";
const GROUP_SELECTOR: &str = ".data-wrapper .mbox";
const MODEL_SELECTOR: &str = "span.model";

pub trait ModelExtractor {
    /// Malformed or unexpected markup yields an empty result, never an error.
    fn extract(&self, html: &str, panel_title: Option<&str>) -> Result<ExtractionResult, ParserError>;
}

pub struct MietublParser;

impl MietublParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MietublParser {
    fn default() -> Self {
        Self::new()
    }
}

fn selector(css: &str) -> Result<Selector, ParserError> {
    Selector::parse(css).map_err(|e| ParserError::Selector(e.to_string()))
}

/// First panel whose heading matches `title` case-insensitively, else the first panel.
fn select_panel<'a>(
    panels: &[ElementRef<'a>],
    title: Option<&str>,
    title_selector: &Selector,
) -> Option<ElementRef<'a>> {
    if let Some(wanted) = title.map(str::to_lowercase).filter(|t| !t.is_empty()) {
        let found = panels.iter().copied().find(|panel| {
            panel
                .select(title_selector)
                .next()
                .map(|h3| h3.text().collect::<String>().trim().to_lowercase() == wanted)
                .unwrap_or(false)
        });
        if found.is_some() {
            debug!("Selected panel {:?}", wanted);
            return found;
        }
        debug!("No panel titled {:?}, falling back to the first panel", wanted);
    }
    panels.first().copied()
}

fn extract_group(mbox: ElementRef<'_>, model_selector: &Selector) -> ModelGroup {
    let mut seen = HashSet::new();
    let mut models = Vec::new();

    for span in mbox.select(model_selector) {
        let raw = span.text().collect::<String>();
        // collapse before decoding: an encoded entity never contributes whitespace
        let text = decode_html_entities(&collapse_whitespace(&raw));
        if !text.is_empty() && seen.insert(text.clone()) {
            models.push(text);
        }
    }

    models
}

impl ModelExtractor for MietublParser {
    fn extract(&self, html: &str, panel_title: Option<&str>) -> Result<ExtractionResult, ParserError> {
        let panel_selector = selector(PANEL_SELECTOR)?;
        let title_selector = selector(TITLE_SELECTOR)?;
        let group_selector = selector(GROUP_SELECTOR)?;
        let model_selector = selector(MODEL_SELECTOR)?;

        let document = Html::parse_document(html);
        let panels: Vec<ElementRef<'_>> = document.select(&panel_selector).collect();

        let Some(panel) = select_panel(&panels, panel_title, &title_selector) else {
            debug!("No compatible-models panels in document");
            return Ok(Vec::new());
        };

        let groups: ExtractionResult = panel
            .select(&group_selector)
            .map(|mbox| extract_group(mbox, &model_selector))
            .filter(|group| !group.is_empty())
            .collect();

        debug!("Extracted {} groups from {} candidate panels", groups.len(), panels.len());
        Ok(groups)
    }
}
