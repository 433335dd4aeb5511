//! Site configuration
//!
//! `SiteConfig` is the context object handed to every module initializer.
//! Defaults describe the markup contract of the marketing pages; a page can
//! override any subset through an inline JSON block or a JS object.

use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;

use crate::error::{Result, SiteError};

/// Id of the optional inline `<script type="application/json">` config block
pub const INLINE_CONFIG_ID: &str = "gffth-config";

/// Selectors and ids used by [`crate::navigation`] and [`crate::accessibility`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavigationConfig {
    /// In-page anchors eligible for smooth scrolling
    pub anchor_selector: String,
    /// Id of the hamburger button
    pub menu_toggle_id: String,
    /// Id of the collapsible menu container
    pub menu_id: String,
    /// Class toggled on the menu container while open
    pub active_class: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            anchor_selector: r##"a[href^="#"]"##.to_string(),
            menu_toggle_id: "mobile-menu-toggle".to_string(),
            menu_id: "mobile-menu".to_string(),
            active_class: "active".to_string(),
        }
    }
}

/// Scroll-reveal markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevealConfig {
    pub selector: String,
    pub class: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".animate-on-scroll".to_string(),
            class: "animate".to_string(),
        }
    }
}

/// Deferred image markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LazyConfig {
    pub selector: String,
    /// Marker class removed once the image is promoted
    pub marker_class: String,
    /// Attribute holding the real source URL
    pub source_attribute: String,
}

impl Default for LazyConfig {
    fn default() -> Self {
        Self {
            selector: "img.lazy".to_string(),
            marker_class: "lazy".to_string(),
            source_attribute: "data-src".to_string(),
        }
    }
}

/// Parallax markers and the fallback speed factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParallaxConfig {
    pub selector: String,
    pub speed_attribute: String,
    pub default_speed: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            selector: ".parallax".to_string(),
            speed_attribute: "data-parallax-speed".to_string(),
            default_speed: 0.5,
        }
    }
}

/// Full configuration passed to each module's `init`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub navigation: NavigationConfig,
    pub reveal: RevealConfig,
    pub lazy: LazyConfig,
    pub parallax: ParallaxConfig,
    /// Elements that receive the ARIA sweep
    pub interactive_selector: String,
    /// Visibility ratio shared by the reveal and lazy-load observers
    pub intersection_threshold: f64,
    /// `tracing` level name (`error`, `warn`, `info`, `debug`, `trace`)
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            navigation: NavigationConfig::default(),
            reveal: RevealConfig::default(),
            lazy: LazyConfig::default(),
            parallax: ParallaxConfig::default(),
            interactive_selector: r#"button, [role="button"]"#.to_string(),
            intersection_threshold: 0.1,
            log_level: "info".to_string(),
        }
    }
}

impl SiteConfig {
    /// Parses and validates a JSON document
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Config` if the JSON is malformed or fails
    /// [`SiteConfig::validate`].
    ///
    /// # Example
    ///
    /// ```
    /// use gffth_web::config::SiteConfig;
    ///
    /// let config = SiteConfig::from_json(r#"{ "intersectionThreshold": 0.25 }"#)?;
    /// assert!((config.intersection_threshold - 0.25).abs() < f64::EPSILON);
    /// assert_eq!(config.reveal.class, "animate");
    /// # Ok::<(), gffth_web::error::SiteError>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SiteError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks ranges and required strings
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Config` naming the first offending field. A log
    /// level of `off` is rejected since captured page errors are reported
    /// at error level.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.intersection_threshold) {
            return Err(SiteError::Config(format!(
                "intersectionThreshold must be within [0, 1], got {}",
                self.intersection_threshold
            )));
        }
        if !self.parallax.default_speed.is_finite() {
            return Err(SiteError::Config(
                "parallax.defaultSpeed must be finite".to_string(),
            ));
        }

        let required = [
            ("navigation.anchorSelector", &self.navigation.anchor_selector),
            ("navigation.menuToggleId", &self.navigation.menu_toggle_id),
            ("navigation.menuId", &self.navigation.menu_id),
            ("navigation.activeClass", &self.navigation.active_class),
            ("reveal.selector", &self.reveal.selector),
            ("reveal.class", &self.reveal.class),
            ("lazy.selector", &self.lazy.selector),
            ("lazy.markerClass", &self.lazy.marker_class),
            ("lazy.sourceAttribute", &self.lazy.source_attribute),
            ("parallax.selector", &self.parallax.selector),
            ("parallax.speedAttribute", &self.parallax.speed_attribute),
            ("interactiveSelector", &self.interactive_selector),
        ];
        if let Some((name, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(SiteError::Config(format!("{name} must not be empty")));
        }

        if self.level_filter()? == LevelFilter::OFF {
            return Err(SiteError::Config(
                "logLevel 'off' would silence uncaught error reports".to_string(),
            ));
        }
        Ok(())
    }

    /// Parsed form of [`SiteConfig::log_level`]
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Config` for an unknown level name.
    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.log_level
            .trim()
            .parse::<LevelFilter>()
            .map_err(|_| SiteError::Config(format!("unknown log level '{}'", self.log_level)))
    }
}

/// Reads the inline JSON config block, if the page provides one
///
/// Returns `Ok(None)` when no block exists so callers fall back to defaults.
///
/// # Errors
///
/// Returns `SiteError::Config` when the block exists but does not parse.
pub fn load_inline(document: &web_sys::Document) -> Result<Option<SiteConfig>> {
    document
        .get_element_by_id(INLINE_CONFIG_ID)
        .and_then(|el| el.text_content())
        .map(|json| SiteConfig::from_json(&json))
        .transpose()
}

/// Converts a JS object into a validated config
///
/// # Errors
///
/// Returns `SiteError::Config` if deserialization or validation fails.
pub fn from_js(value: wasm_bindgen::JsValue) -> Result<SiteConfig> {
    let config: SiteConfig =
        serde_wasm_bindgen::from_value(value).map_err(|e| SiteError::Config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}
