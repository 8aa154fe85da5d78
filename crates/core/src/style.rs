//! Block styling options and their render-ready resolution.
//!
//! A [`StyleOptions`] record is attached 1:1 to every typed content block.
//! The resolver turns it into two artifacts consumed by the render layer:
//! an inline `style` attribute value and a list of CSS classes.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::choice::string_choice;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Largest accepted border radius, in pixels.
pub const MAX_BORDER_RADIUS: i32 = 50;

/// Maximum length of the free-form custom class string.
pub const MAX_CUSTOM_CLASS_LEN: usize = 200;

static HEX_COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").expect("valid hex color regex")
});

// ---------------------------------------------------------------------------
// Choice enums
// ---------------------------------------------------------------------------

string_choice! {
    /// How the block background is painted.
    BackgroundType { Color => "color", Gradient => "gradient", Image => "image" }
}

string_choice! {
    TextAlign { Left => "left", Center => "center", Right => "right", Justify => "justify" }
}

string_choice! {
    /// Named spacing steps used for both padding and margin.
    Spacing { None => "none", Small => "small", Medium => "medium", Large => "large", Xl => "xl" }
}

string_choice! {
    ContainerWidth { Full => "full", Boxed => "boxed", Narrow => "narrow" }
}

string_choice! {
    HoverEffect { None => "none", Lift => "lift", Zoom => "zoom", Fade => "fade", Glow => "glow" }
}

impl Spacing {
    /// CSS length for this step. `none` is a bare `0`.
    pub fn css_value(self) -> &'static str {
        match self {
            Spacing::None => "0",
            Spacing::Small => "20px",
            Spacing::Medium => "40px",
            Spacing::Large => "80px",
            Spacing::Xl => "120px",
        }
    }
}

impl ContainerWidth {
    pub fn css_class(self) -> &'static str {
        match self {
            ContainerWidth::Full => "container-fluid",
            ContainerWidth::Narrow => "container-narrow",
            ContainerWidth::Boxed => "container",
        }
    }
}

impl HoverEffect {
    /// Class for the effect. `fade` has no stylesheet rule and emits nothing.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            HoverEffect::Lift => Some("hover-lift"),
            HoverEffect::Zoom => Some("hover-zoom"),
            HoverEffect::Glow => Some("hover-glow"),
            HoverEffect::None | HoverEffect::Fade => None,
        }
    }
}

// ---------------------------------------------------------------------------
// StyleOptions
// ---------------------------------------------------------------------------

/// Styling configuration for one block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOptions {
    pub background_type: BackgroundType,
    pub background_color: String,
    pub background_gradient: String,
    /// Reference (URL or storage path) to an externally hosted image.
    pub background_image: Option<String>,
    pub background_image_opacity: f64,
    pub text_color: String,
    pub text_align: TextAlign,
    pub padding_top: Spacing,
    pub padding_bottom: Spacing,
    pub padding_left: Spacing,
    pub padding_right: Spacing,
    pub margin_top: Spacing,
    pub margin_bottom: Spacing,
    pub container_width: ContainerWidth,
    pub border_radius: i32,
    pub shadow: bool,
    pub animate_on_scroll: bool,
    pub hover_effect: HoverEffect,
    pub custom_class: String,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            background_type: BackgroundType::Color,
            background_color: "#FFFFFF".to_string(),
            background_gradient: String::new(),
            background_image: None,
            background_image_opacity: 1.0,
            text_color: "#212529".to_string(),
            text_align: TextAlign::Left,
            padding_top: Spacing::Medium,
            padding_bottom: Spacing::Medium,
            padding_left: Spacing::None,
            padding_right: Spacing::None,
            margin_top: Spacing::None,
            margin_bottom: Spacing::None,
            container_width: ContainerWidth::Boxed,
            border_radius: 0,
            shadow: false,
            animate_on_scroll: true,
            hover_effect: HoverEffect::None,
            custom_class: String::new(),
        }
    }
}

/// Render-ready form of a [`StyleOptions`] record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedStyle {
    pub inline: String,
    pub classes: Vec<String>,
    pub animate_on_scroll: bool,
}

impl StyleOptions {
    /// Build the inline style declarations, joined with `"; "`.
    ///
    /// Padding and margin sides are only emitted when they differ from the
    /// stored defaults (40px top/bottom padding, 0 everywhere else).
    pub fn inline_styles(&self) -> String {
        let mut styles: Vec<String> = Vec::new();

        match self.background_type {
            BackgroundType::Color => {
                if !self.background_color.trim().is_empty() {
                    styles.push(format!("background-color: {}", self.background_color));
                }
            }
            BackgroundType::Gradient => {
                if !self.background_gradient.trim().is_empty() {
                    styles.push(format!("background: {}", self.background_gradient));
                }
            }
            BackgroundType::Image => {
                if let Some(image) = self.background_image.as_deref().filter(|s| !s.is_empty()) {
                    styles.push(format!("background-image: url('{image}')"));
                    styles.push("background-size: cover".to_string());
                    styles.push("background-position: center".to_string());
                    styles.push("background-repeat: no-repeat".to_string());
                    if !self.background_color.trim().is_empty() {
                        styles.push(format!("background-color: {}", self.background_color));
                    }
                    if self.background_image_opacity < 1.0 {
                        styles.push(format!("opacity: {}", self.background_image_opacity));
                    }
                }
            }
        }

        if !self.text_color.trim().is_empty() {
            styles.push(format!("color: {}", self.text_color));
        }
        styles.push(format!("text-align: {}", self.text_align));

        let sides = [
            ("padding-top", self.padding_top, Spacing::Medium),
            ("padding-bottom", self.padding_bottom, Spacing::Medium),
            ("padding-left", self.padding_left, Spacing::None),
            ("padding-right", self.padding_right, Spacing::None),
            ("margin-top", self.margin_top, Spacing::None),
            ("margin-bottom", self.margin_bottom, Spacing::None),
        ];
        for (property, value, default) in sides {
            if value.css_value() != default.css_value() {
                styles.push(format!("{property}: {}", value.css_value()));
            }
        }

        if self.border_radius > 0 {
            styles.push(format!("border-radius: {}px", self.border_radius));
        }

        styles.join("; ")
    }

    /// CSS classes: container width, shadow, hover effect, then custom classes.
    pub fn css_classes(&self) -> Vec<String> {
        let mut classes = vec![self.container_width.css_class().to_string()];

        if self.shadow {
            classes.push("shadow-lg".to_string());
        }
        if let Some(hover) = self.hover_effect.css_class() {
            classes.push(hover.to_string());
        }
        classes.extend(self.custom_class.split_whitespace().map(str::to_string));

        classes
    }

    /// [`Self::css_classes`] joined with single spaces.
    pub fn css_class_string(&self) -> String {
        self.css_classes().join(" ")
    }

    pub fn resolve(&self) -> ResolvedStyle {
        ResolvedStyle {
            inline: self.inline_styles(),
            classes: self.css_classes(),
            animate_on_scroll: self.animate_on_scroll,
        }
    }

    /// Reject values outside the ranges the resolver assumes.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_color("background_color", &self.background_color)?;
        validate_color("text_color", &self.text_color)?;

        if !(0.0..=1.0).contains(&self.background_image_opacity) {
            return Err(CoreError::Validation(format!(
                "background_image_opacity must be between 0.0 and 1.0, got {}",
                self.background_image_opacity
            )));
        }
        if !(0..=MAX_BORDER_RADIUS).contains(&self.border_radius) {
            return Err(CoreError::Validation(format!(
                "border_radius must be between 0 and {MAX_BORDER_RADIUS}, got {}",
                self.border_radius
            )));
        }
        if self.custom_class.len() > MAX_CUSTOM_CLASS_LEN {
            return Err(CoreError::Validation(format!(
                "custom_class must be at most {MAX_CUSTOM_CLASS_LEN} characters"
            )));
        }
        Ok(())
    }
}

/// A blank color is allowed (no declaration is emitted); anything else must be hex.
fn validate_color(field: &str, value: &str) -> Result<(), CoreError> {
    if value.is_empty() || HEX_COLOR_RE.is_match(value) {
        return Ok(());
    }
    Err(CoreError::Validation(format!(
        "{field} must be a hex color like #1A2B3C, got '{value}'"
    )))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
