//! Scroll-triggered reveal
//!
//! Elements matching the reveal selector gain the reveal class the first
//! time they are at least `threshold` visible. The class is never removed.

use web_sys::{Document, Element, IntersectionObserverEntry};

use crate::config::{RevealConfig, SiteConfig};
use crate::dom::{self, Observer};
use crate::error::{Result, SiteError};

/// Result of handling one intersection entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Class added on this entry
    Revealed,
    /// Element already carried the class
    AlreadyRevealed,
    /// Below the visibility threshold
    Hidden,
}

/// Visibility predicate shared with the lazy loader
#[must_use]
pub fn is_visible(is_intersecting: bool, ratio: f64, threshold: f64) -> bool {
    is_intersecting && ratio >= threshold
}

/// Adds the reveal class to `element` if it is visible and not yet revealed
///
/// # Errors
///
/// Returns `SiteError::Dom` if the class list rejects the class name.
pub fn reveal(element: &Element, visible: bool, config: &RevealConfig) -> Result<RevealOutcome> {
    if !visible {
        return Ok(RevealOutcome::Hidden);
    }

    let classes = element.class_list();
    if classes.contains(&config.class) {
        return Ok(RevealOutcome::AlreadyRevealed);
    }

    classes.add_1(&config.class).map_err(|e| SiteError::dom(&e))?;
    Ok(RevealOutcome::Revealed)
}

/// Observer owning the reveal subscriptions
#[derive(Debug)]
pub struct Animations {
    _observer: Observer,
    watched: usize,
}

impl Animations {
    #[must_use]
    pub const fn watched(&self) -> usize {
        self.watched
    }
}

/// Starts watching every reveal element on the page
///
/// # Errors
///
/// Returns an error if the selector is invalid or the observer cannot be created.
pub fn init(document: &Document, config: &SiteConfig) -> Result<Animations> {
    let threshold = config.intersection_threshold;
    let reveal_config = config.reveal.clone();

    let observer = Observer::new(threshold, move |entry: &IntersectionObserverEntry, _observer| {
        let visible = is_visible(entry.is_intersecting(), entry.intersection_ratio(), threshold);
        if let Err(e) = reveal(&entry.target(), visible, &reveal_config) {
            tracing::warn!(error = %e, "reveal failed");
        }
    })?;

    let targets = dom::query_all(document, &config.reveal.selector)?;
    observer.observe_all(&targets);

    tracing::debug!(watched = targets.len(), "scroll reveal ready");
    Ok(Animations {
        _observer: observer,
        watched: targets.len(),
    })
}
