//! In-page navigation
//!
//! Smooth scrolling for fragment anchors and the mobile menu toggle. The
//! toggle's `aria-expanded` attribute is the single source of truth for
//! whether the menu is open.

use web_sys::{Document, Element, Event, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::config::{NavigationConfig, SiteConfig};
use crate::dom::{self, Listener};
use crate::error::{Result, SiteError};

/// Open/closed state of the mobile menu, mirrored in `aria-expanded`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Open,
    Closed,
}

impl MenuState {
    /// Reads the state from an `aria-expanded` value
    ///
    /// Anything other than `"true"` (including a missing attribute) is closed.
    #[must_use]
    pub fn from_aria(value: Option<&str>) -> Self {
        match value {
            Some("true") => Self::Open,
            _ => Self::Closed,
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }

    #[must_use]
    pub const fn as_aria(self) -> &'static str {
        match self {
            Self::Open => "true",
            Self::Closed => "false",
        }
    }

    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// What a fragment-anchor click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOutcome {
    /// Target found and scrolled into view
    Scrolled,
    /// Fragment names no element; nothing happens
    NoTarget,
    /// `href` missing or not a fragment
    NotFragment,
}

/// Extracts the element id from a fragment `href`
///
/// `"#about"` yields `Some("about")`; a bare `"#"` or a non-fragment
/// `href` yields `None`.
#[must_use]
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Resolves `href` against the document and hands the target to `scroll`
///
/// `scroll` is called at most once, and only when the target exists.
pub fn scroll_to_fragment<F>(document: &Document, href: Option<&str>, scroll: F) -> ScrollOutcome
where
    F: FnOnce(&Element),
{
    let Some(href) = href else {
        return ScrollOutcome::NotFragment;
    };
    if !href.starts_with('#') {
        return ScrollOutcome::NotFragment;
    }

    match fragment_id(href).and_then(|id| document.get_element_by_id(id)) {
        Some(target) => {
            scroll(&target);
            ScrollOutcome::Scrolled
        }
        None => ScrollOutcome::NoTarget,
    }
}

/// Scrolls `target` into view with smooth easing, aligned to the top
pub fn smooth_scroll(target: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Current menu state as recorded on the toggle control
#[must_use]
pub fn menu_state(toggle: &Element) -> MenuState {
    MenuState::from_aria(toggle.get_attribute("aria-expanded").as_deref())
}

/// Flips the menu: `aria-expanded` on the toggle, active class on the menu
///
/// The menu container is looked up on every call. When it is missing
/// neither element is touched.
///
/// # Errors
///
/// Returns `SiteError::ElementNotFound` if the menu container is absent,
/// or `SiteError::Dom` if an attribute or class update throws.
pub fn toggle_menu(document: &Document, toggle: &Element, config: &NavigationConfig) -> Result<MenuState> {
    let menu = dom::element_by_id(document, &config.menu_id)?;
    let next = menu_state(toggle).toggled();

    toggle
        .set_attribute("aria-expanded", next.as_aria())
        .map_err(|e| SiteError::dom(&e))?;
    menu.class_list()
        .toggle(&config.active_class)
        .map_err(|e| SiteError::dom(&e))?;

    Ok(next)
}

/// Listeners installed by [`init`]
#[derive(Debug)]
pub struct Navigation {
    anchors: Vec<Listener>,
    toggle: Option<Listener>,
}

impl Navigation {
    /// Number of anchors wired for smooth scrolling
    #[must_use]
    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    /// Whether the page provided a menu toggle
    #[must_use]
    pub const fn has_menu_toggle(&self) -> bool {
        self.toggle.is_some()
    }
}

/// Wires smooth scrolling and the mobile menu toggle
///
/// A page without a menu toggle only gets smooth scrolling.
///
/// # Errors
///
/// Returns an error if the anchor selector is invalid or a listener
/// cannot be attached.
pub fn init(document: &Document, config: &SiteConfig) -> Result<Navigation> {
    let anchors = dom::query_all(document, &config.navigation.anchor_selector)?
        .into_iter()
        .map(|anchor| bind_anchor(document, anchor))
        .collect::<Result<Vec<_>>>()?;

    let toggle = match dom::element_by_id(document, &config.navigation.menu_toggle_id) {
        Ok(toggle) => Some(bind_toggle(document, toggle, &config.navigation)?),
        Err(SiteError::ElementNotFound { id }) => {
            tracing::debug!(%id, "no mobile menu toggle on this page");
            None
        }
        Err(e) => return Err(e),
    };

    tracing::debug!(anchors = anchors.len(), toggle = toggle.is_some(), "navigation ready");
    Ok(Navigation { anchors, toggle })
}

fn bind_anchor(document: &Document, anchor: Element) -> Result<Listener> {
    let document = document.clone();
    let target = anchor.clone();

    Listener::new(&target, "click", move |event: Event| {
        event.prevent_default();
        let href = anchor.get_attribute("href");
        let outcome = scroll_to_fragment(&document, href.as_deref(), smooth_scroll);
        tracing::trace!(?href, ?outcome, "anchor click");
    })
}

fn bind_toggle(document: &Document, toggle: Element, config: &NavigationConfig) -> Result<Listener> {
    let document = document.clone();
    let config = config.clone();
    let target = toggle.clone();

    Listener::new(&target, "click", move |_event: Event| {
        match toggle_menu(&document, &toggle, &config) {
            Ok(state) => tracing::debug!(?state, "mobile menu toggled"),
            Err(e) => tracing::warn!(error = %e, "mobile menu toggle failed"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_state_from_aria() {
        assert_eq!(MenuState::from_aria(Some("true")), MenuState::Open);
        assert_eq!(MenuState::from_aria(Some("false")), MenuState::Closed);
        assert_eq!(MenuState::from_aria(None), MenuState::Closed);
        assert_eq!(MenuState::from_aria(Some("TRUE")), MenuState::Closed);
    }

    #[test]
    fn test_menu_state_round_trip() {
        for state in [MenuState::Open, MenuState::Closed] {
            assert_eq!(state.toggled().toggled(), state);
            assert_eq!(MenuState::from_aria(Some(state.as_aria())), state);
        }
    }

    #[test]
    fn test_fragment_id() {
        assert_eq!(fragment_id("#features"), Some("features"));
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id("/about#team"), None);
        assert_eq!(fragment_id(""), None);
    }
}
