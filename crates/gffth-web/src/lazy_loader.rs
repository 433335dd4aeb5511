//! Deferred image loading
//!
//! When a marked image becomes visible its deferred-source attribute is
//! copied into `src`, the marker class is dropped and the image is
//! unobserved. One trigger per image.

use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry};

use crate::animations::is_visible;
use crate::config::{LazyConfig, SiteConfig};
use crate::dom::{self, Observer};
use crate::error::{Result, SiteError};

/// Something an image can be unsubscribed from
pub trait Unobserve {
    fn unobserve(&self, target: &Element);
}

impl Unobserve for IntersectionObserver {
    fn unobserve(&self, target: &Element) {
        Self::unobserve(self, target);
    }
}

/// Result of handling one intersection entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// `src` now holds the deferred URL
    Loaded(String),
    /// Marker cleared but no deferred URL was present
    MissingSource,
    /// Marker already gone; nothing changed
    AlreadyLoaded,
    /// Below the visibility threshold
    Pending,
}

/// Promotes the deferred source of `image` and unsubscribes it
///
/// # Errors
///
/// Returns `SiteError::Dom` if setting `src` or editing the class list throws.
pub fn load_image<U>(image: &Element, visible: bool, config: &LazyConfig, subscription: &U) -> Result<LoadOutcome>
where
    U: Unobserve + ?Sized,
{
    if !visible {
        return Ok(LoadOutcome::Pending);
    }

    let classes = image.class_list();
    if !classes.contains(&config.marker_class) {
        subscription.unobserve(image);
        return Ok(LoadOutcome::AlreadyLoaded);
    }

    let outcome = match image.get_attribute(&config.source_attribute) {
        Some(src) => {
            image.set_attribute("src", &src).map_err(|e| SiteError::dom(&e))?;
            LoadOutcome::Loaded(src)
        }
        None => LoadOutcome::MissingSource,
    };

    classes
        .remove_1(&config.marker_class)
        .map_err(|e| SiteError::dom(&e))?;
    subscription.unobserve(image);

    Ok(outcome)
}

/// Observer owning the pending images
#[derive(Debug)]
pub struct LazyLoader {
    _observer: Observer,
    pending: usize,
}

impl LazyLoader {
    /// Images watched at start-up
    #[must_use]
    pub const fn pending(&self) -> usize {
        self.pending
    }
}

/// Starts watching every deferred image on the page
///
/// # Errors
///
/// Returns an error if the selector is invalid or the observer cannot be created.
pub fn init(document: &Document, config: &SiteConfig) -> Result<LazyLoader> {
    let threshold = config.intersection_threshold;
    let lazy_config = config.lazy.clone();

    let observer = Observer::new(
        threshold,
        move |entry: &IntersectionObserverEntry, observer: &IntersectionObserver| {
            let visible = is_visible(entry.is_intersecting(), entry.intersection_ratio(), threshold);
            match load_image(&entry.target(), visible, &lazy_config, observer) {
                Ok(LoadOutcome::Loaded(src)) => tracing::trace!(%src, "image loaded"),
                Ok(LoadOutcome::MissingSource) => {
                    tracing::warn!(
                        attribute = %lazy_config.source_attribute,
                        "lazy image has no deferred source"
                    );
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "lazy load failed"),
            }
        },
    )?;

    let images = dom::query_all(document, &config.lazy.selector)?;
    observer.observe_all(&images);

    tracing::debug!(pending = images.len(), "lazy loader ready");
    Ok(LazyLoader {
        _observer: observer,
        pending: images.len(),
    })
}
