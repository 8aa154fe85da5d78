//! Style options row and patch DTO.

use clubsite_core::style::{
    BackgroundType, ContainerWidth, HoverEffect, Spacing, StyleOptions, TextAlign,
};
use clubsite_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `style_options` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StyleOptionsRow {
    pub id: DbId,
    #[sqlx(try_from = "String")]
    pub background_type: BackgroundType,
    pub background_color: String,
    pub background_gradient: String,
    pub background_image: Option<String>,
    pub background_image_opacity: f64,
    pub text_color: String,
    #[sqlx(try_from = "String")]
    pub text_align: TextAlign,
    #[sqlx(try_from = "String")]
    pub padding_top: Spacing,
    #[sqlx(try_from = "String")]
    pub padding_bottom: Spacing,
    #[sqlx(try_from = "String")]
    pub padding_left: Spacing,
    #[sqlx(try_from = "String")]
    pub padding_right: Spacing,
    #[sqlx(try_from = "String")]
    pub margin_top: Spacing,
    #[sqlx(try_from = "String")]
    pub margin_bottom: Spacing,
    #[sqlx(try_from = "String")]
    pub container_width: ContainerWidth,
    pub border_radius: i32,
    pub shadow: bool,
    pub animate_on_scroll: bool,
    #[sqlx(try_from = "String")]
    pub hover_effect: HoverEffect,
    pub custom_class: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StyleOptionsRow {
    /// The styling configuration without row metadata.
    pub fn options(&self) -> StyleOptions {
        StyleOptions {
            background_type: self.background_type,
            background_color: self.background_color.clone(),
            background_gradient: self.background_gradient.clone(),
            background_image: self.background_image.clone(),
            background_image_opacity: self.background_image_opacity,
            text_color: self.text_color.clone(),
            text_align: self.text_align,
            padding_top: self.padding_top,
            padding_bottom: self.padding_bottom,
            padding_left: self.padding_left,
            padding_right: self.padding_right,
            margin_top: self.margin_top,
            margin_bottom: self.margin_bottom,
            container_width: self.container_width,
            border_radius: self.border_radius,
            shadow: self.shadow,
            animate_on_scroll: self.animate_on_scroll,
            hover_effect: self.hover_effect,
            custom_class: self.custom_class.clone(),
        }
    }
}

/// DTO for partially updating a block's style options.
///
/// An empty `background_image` string clears the image reference.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStyleOptions {
    pub background_type: Option<BackgroundType>,
    pub background_color: Option<String>,
    pub background_gradient: Option<String>,
    pub background_image: Option<String>,
    pub background_image_opacity: Option<f64>,
    pub text_color: Option<String>,
    pub text_align: Option<TextAlign>,
    pub padding_top: Option<Spacing>,
    pub padding_bottom: Option<Spacing>,
    pub padding_left: Option<Spacing>,
    pub padding_right: Option<Spacing>,
    pub margin_top: Option<Spacing>,
    pub margin_bottom: Option<Spacing>,
    pub container_width: Option<ContainerWidth>,
    pub border_radius: Option<i32>,
    pub shadow: Option<bool>,
    pub animate_on_scroll: Option<bool>,
    pub hover_effect: Option<HoverEffect>,
    pub custom_class: Option<String>,
}

impl UpdateStyleOptions {
    /// Overlay the provided fields onto `base`.
    pub fn apply_to(self, mut base: StyleOptions) -> StyleOptions {
        macro_rules! overlay {
            ($($field:ident),+ $(,)?) => {
                $(if let Some(value) = self.$field {
                    base.$field = value;
                })+
            };
        }
        overlay!(
            background_type,
            background_color,
            background_gradient,
            background_image_opacity,
            text_color,
            text_align,
            padding_top,
            padding_bottom,
            padding_left,
            padding_right,
            margin_top,
            margin_bottom,
            container_width,
            border_radius,
            shadow,
            animate_on_scroll,
            hover_effect,
            custom_class,
        );
        if let Some(image) = self.background_image {
            base.background_image = if image.is_empty() { None } else { Some(image) };
        }
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_only_touches_given_fields() {
        let patch = UpdateStyleOptions {
            shadow: Some(true),
            padding_top: Some(Spacing::Xl),
            ..Default::default()
        };
        let style = patch.apply_to(StyleOptions::default());
        assert!(style.shadow);
        assert_eq!(style.padding_top, Spacing::Xl);
        assert_eq!(style.padding_bottom, Spacing::Medium);
        assert_eq!(style.text_color, "#212529");
    }

    #[test]
    fn empty_background_image_clears_reference() {
        let base = StyleOptions {
            background_image: Some("/media/a.jpg".into()),
            ..StyleOptions::default()
        };
        let patch = UpdateStyleOptions {
            background_image: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(patch.apply_to(base).background_image, None);
    }
}
