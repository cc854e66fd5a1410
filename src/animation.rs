//! Declarative scroll and hero animations.
//!
//! Every animation on the page is one [`Trigger`] row: which elements, how
//! they move, and when. The table is rendered twice:
//!
//! - [`render_css`] emits the start/end states and transitions, scoped to
//!   `html.js` and `prefers-reduced-motion: no-preference` so the page is
//!   fully visible without script or with reduced motion.
//! - [`render_config_json`] emits the same rows for the in-page script, which
//!   only decides *when* to add `is-revealed` (load, viewport entry) and
//!   drives parallax offsets from scroll position.
//!
//! Elements rendered from the content document (gallery items, event images)
//! are matched by class like the static ones, so they need no extra wiring.

use crate::config::AnimationConfig;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ease {
    Power3Out,
    Power4Out,
}

impl Ease {
    pub fn css(self) -> &'static str {
        match self {
            Ease::Power3Out => "cubic-bezier(0.215, 0.61, 0.355, 1)",
            Ease::Power4Out => "cubic-bezier(0.165, 0.84, 0.44, 1)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TriggerKind {
    /// Plays once on page load.
    Entrance,
    /// Plays once when the element crosses `start` of the viewport height.
    Reveal,
    /// Reveal where matched elements start one after another.
    Stagger {
        #[serde(rename = "staggerMs")]
        stagger_ms: u32,
    },
    /// Translates with scroll progress through the viewport.
    Parallax {
        /// Peak offset in px (or % of own height when `percent` is set).
        amount: i32,
        percent: bool,
        /// Flip the direction on every other matched element.
        alternate: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    pub selector: &'static str,
    #[serde(flatten)]
    pub kind: TriggerKind,
    /// Vertical start offset in px.
    pub y: i32,
    pub duration_ms: u32,
    pub delay_ms: u32,
    /// Fraction of viewport height (from the top) the element must reach.
    pub start: f64,
    pub ease: Ease,
}

impl Trigger {
    fn reveal(selector: &'static str, y: i32, duration_ms: u32, start: f64) -> Self {
        Self {
            selector,
            kind: TriggerKind::Reveal,
            y,
            duration_ms,
            delay_ms: 0,
            start,
            ease: Ease::Power3Out,
        }
    }

    fn entrance(selector: &'static str, y: i32, duration_ms: u32, delay_ms: u32) -> Self {
        Self {
            selector,
            kind: TriggerKind::Entrance,
            y,
            duration_ms,
            delay_ms,
            start: 1.0,
            ease: Ease::Power4Out,
        }
    }

    fn parallax(selector: &'static str, amount: i32, percent: bool, alternate: bool) -> Self {
        Self {
            selector,
            kind: TriggerKind::Parallax {
                amount,
                percent,
                alternate,
            },
            y: 0,
            duration_ms: 0,
            delay_ms: 0,
            start: 1.0,
            ease: Ease::Power3Out,
        }
    }

    fn with_delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    fn scaled(&self, scale: f64) -> Self {
        let ms = |v: u32| (f64::from(v) * scale).round() as u32;
        let kind = match self.kind {
            TriggerKind::Stagger { stagger_ms } => TriggerKind::Stagger {
                stagger_ms: ms(stagger_ms),
            },
            ref other => other.clone(),
        };
        Self {
            kind,
            duration_ms: ms(self.duration_ms),
            delay_ms: ms(self.delay_ms),
            ..self.clone()
        }
    }

    fn is_parallax(&self) -> bool {
        matches!(self.kind, TriggerKind::Parallax { .. })
    }
}

/// The page's animation table.
pub fn default_triggers() -> Vec<Trigger> {
    vec![
        // Hero entrance
        Trigger::entrance(".hero-title", 80, 1200, 200),
        Trigger::entrance(".hero-subtitle", 60, 1000, 400),
        Trigger {
            ease: Ease::Power3Out,
            ..Trigger::entrance(".hero-scroll-cue", 0, 800, 1000)
        },
        Trigger::parallax(".hero-image", 10, true, false),
        // About
        Trigger::reveal(".about-content", 40, 800, 0.75),
        Trigger::reveal(".about-image", 60, 1000, 0.75),
        // Portfolio
        Trigger::reveal(".portfolio-title", 40, 800, 0.80),
        Trigger {
            kind: TriggerKind::Stagger { stagger_ms: 100 },
            ..Trigger::reveal(".gallery-item", 60, 800, 0.75)
        },
        // Events
        Trigger::parallax(".event-image", 50, false, true),
        Trigger::reveal(".events-title", 40, 800, 0.80),
        // Contact
        Trigger::reveal(".contact-title", 40, 800, 0.75),
        Trigger::reveal(".contact-form", 30, 800, 0.75).with_delay(200),
        // Generic helpers usable from about.md or custom markup
        Trigger::reveal(".scroll-reveal", 60, 800, 0.80),
        Trigger::reveal(".scroll-reveal-fast", 40, 600, 0.85),
    ]
}

/// Triggers with durations scaled by config, or nothing when disabled.
pub fn resolve_triggers(config: &AnimationConfig) -> Vec<Trigger> {
    if !config.enabled {
        return Vec::new();
    }
    default_triggers()
        .iter()
        .map(|t| t.scaled(config.duration_scale))
        .collect()
}

/// CSS start/end states for the given triggers.
pub fn render_css(triggers: &[Trigger]) -> String {
    if triggers.is_empty() {
        return String::new();
    }

    let mut rules = Vec::new();
    for t in triggers {
        if t.is_parallax() {
            rules.push(format!(
                "    html.js {sel} {{ will-change: transform; }}",
                sel = t.selector
            ));
            continue;
        }
        rules.push(format!(
            "    html.js {sel} {{ opacity: 0; transform: translateY({y}px); \
             transition: opacity {d}ms {ease} {delay}ms, transform {d}ms {ease} {delay}ms; }}\n    \
             html.js {sel}.is-revealed {{ opacity: 1; transform: none; }}",
            sel = t.selector,
            y = t.y,
            d = t.duration_ms,
            delay = t.delay_ms,
            ease = t.ease.css(),
        ));
    }

    format!(
        "@media (prefers-reduced-motion: no-preference) {{\n{}\n}}",
        rules.join("\n")
    )
}

/// JSON trigger table embedded in the page for the in-page script.
pub fn render_config_json(triggers: &[Trigger]) -> Result<String, serde_json::Error> {
    serde_json::to_string(triggers)
}
