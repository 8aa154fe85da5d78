//! Typed content block registry: kinds, payload shapes, child item shapes.
//!
//! Every typed block is stored as one row with a `kind` discriminant and a
//! JSON payload. This module owns the closed set of kinds and the schema of
//! each payload, so a payload is always parsed against the kind it claims.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::choice::string_choice;
use crate::error::CoreError;

/// Template used for generic (free-form) blocks.
pub const GENERIC_TEMPLATE_KEY: &str = "blocks/rich_text.html";

pub const MAX_HEADING_LEN: usize = 200;
pub const MAX_SUBHEADING_LEN: usize = 300;
pub const MAX_BUTTON_TEXT_LEN: usize = 50;
pub const MAX_NAME_LEN: usize = 120;
pub const MAX_ITEM_TITLE_LEN: usize = 150;

string_choice! {
    /// Discriminant of a typed content block.
    BlockKind {
        HeroBanner => "hero_banner",
        TextImage => "text_image",
        FeatureHighlights => "feature_highlights",
        Testimonial => "testimonial",
        CallToAction => "call_to_action",
        Gallery => "gallery",
        VideoEmbed => "video_embed",
        Faq => "faq",
        CounterStats => "counter_stats",
        ContactForm => "contact_form",
        TeamMember => "team_member",
        BlogPreview => "blog_preview",
        TwoColumnText => "two_column_text",
        Timeline => "timeline",
        FooterInfo => "footer_info",
        StyledContent => "styled_content",
    }
}

string_choice! {
    /// Which side the image sits on in a text + image block.
    ImageAlignment { Left => "left", Right => "right" }
}

impl Default for ImageAlignment {
    fn default() -> Self {
        ImageAlignment::Left
    }
}

impl BlockKind {
    /// Template rendering this kind. Each kind has its own template; there is
    /// no fallback between typed templates.
    pub fn template_key(self) -> &'static str {
        match self {
            BlockKind::HeroBanner => "blocks/herobannerblock.html",
            BlockKind::TextImage => "blocks/textimageblock.html",
            BlockKind::FeatureHighlights => "blocks/featurehighlightsblock.html",
            BlockKind::Testimonial => "blocks/testimonialblock.html",
            BlockKind::CallToAction => "blocks/calltoactionblock.html",
            BlockKind::Gallery => "blocks/galleryblock.html",
            BlockKind::VideoEmbed => "blocks/videoembedblock.html",
            BlockKind::Faq => "blocks/faqblock.html",
            BlockKind::CounterStats => "blocks/counterstatsblock.html",
            BlockKind::ContactForm => "blocks/contactformblock.html",
            BlockKind::TeamMember => "blocks/teammemberblock.html",
            BlockKind::BlogPreview => "blocks/blogpreviewblock.html",
            BlockKind::TwoColumnText => "blocks/twocolumntextblock.html",
            BlockKind::Timeline => "blocks/timelineblock.html",
            BlockKind::FooterInfo => "blocks/footerinfoblock.html",
            BlockKind::StyledContent => "blocks/styledcontentblock.html",
        }
    }

    /// Whether blocks of this kind own an ordered child collection.
    pub fn accepts_items(self) -> bool {
        matches!(
            self,
            BlockKind::HeroBanner
                | BlockKind::FeatureHighlights
                | BlockKind::Testimonial
                | BlockKind::Gallery
                | BlockKind::Faq
                | BlockKind::CounterStats
                | BlockKind::TeamMember
                | BlockKind::Timeline
        )
    }
}

/// Registry entry exposed to editors.
#[derive(Debug, Clone, Serialize)]
pub struct BlockKindInfo {
    pub kind: BlockKind,
    pub template: &'static str,
    pub accepts_items: bool,
}

/// Describe every registered block kind.
pub fn registry() -> Vec<BlockKindInfo> {
    BlockKind::ALL
        .iter()
        .map(|&kind| BlockKindInfo {
            kind,
            template: kind.template_key(),
            accepts_items: kind.accepts_items(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Block payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeadingOnly {
    pub heading: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeadingWithSubheading {
    pub heading: String,
    pub subheading: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextImage {
    pub heading: String,
    pub text: String,
    pub image: Option<String>,
    pub alignment: ImageAlignment,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CallToAction {
    pub heading: String,
    pub text: String,
    pub button_text: String,
    pub button_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VideoEmbed {
    pub title: String,
    pub embed_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactForm {
    pub heading: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlogPreview {
    pub heading: String,
    pub count: i32,
}

impl Default for BlogPreview {
    fn default() -> Self {
        Self {
            heading: String::new(),
            count: 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TwoColumnText {
    pub heading: String,
    pub left_text: String,
    pub right_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FooterLink {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FooterInfo {
    pub address: String,
    pub phone: String,
    pub email: String,
    pub links: Option<Vec<FooterLink>>,
    pub copyright_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyledContent {
    pub title: String,
    pub content: String,
}

/// Kind-specific fields of a typed block.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockPayload {
    HeroBanner(HeadingOnly),
    TextImage(TextImage),
    FeatureHighlights(HeadingWithSubheading),
    Testimonial(HeadingOnly),
    CallToAction(CallToAction),
    Gallery(HeadingOnly),
    VideoEmbed(VideoEmbed),
    Faq(HeadingOnly),
    CounterStats(HeadingOnly),
    ContactForm(ContactForm),
    TeamMember(HeadingWithSubheading),
    BlogPreview(BlogPreview),
    TwoColumnText(TwoColumnText),
    Timeline(HeadingOnly),
    FooterInfo(FooterInfo),
    StyledContent(StyledContent),
}

fn parse_shape<T: DeserializeOwned>(kind: &str, value: serde_json::Value) -> Result<T, CoreError> {
    // A missing payload means "all defaults".
    let value = if value.is_null() {
        serde_json::Value::Object(Default::default())
    } else {
        value
    };
    serde_json::from_value(value)
        .map_err(|e| CoreError::Validation(format!("Invalid payload for '{kind}': {e}")))
}

impl BlockPayload {
    /// Parse a JSON payload against the schema of `kind`.
    pub fn parse(kind: BlockKind, value: serde_json::Value) -> Result<Self, CoreError> {
        let k = kind.as_str();
        Ok(match kind {
            BlockKind::HeroBanner => Self::HeroBanner(parse_shape(k, value)?),
            BlockKind::TextImage => Self::TextImage(parse_shape(k, value)?),
            BlockKind::FeatureHighlights => Self::FeatureHighlights(parse_shape(k, value)?),
            BlockKind::Testimonial => Self::Testimonial(parse_shape(k, value)?),
            BlockKind::CallToAction => Self::CallToAction(parse_shape(k, value)?),
            BlockKind::Gallery => Self::Gallery(parse_shape(k, value)?),
            BlockKind::VideoEmbed => Self::VideoEmbed(parse_shape(k, value)?),
            BlockKind::Faq => Self::Faq(parse_shape(k, value)?),
            BlockKind::CounterStats => Self::CounterStats(parse_shape(k, value)?),
            BlockKind::ContactForm => Self::ContactForm(parse_shape(k, value)?),
            BlockKind::TeamMember => Self::TeamMember(parse_shape(k, value)?),
            BlockKind::BlogPreview => Self::BlogPreview(parse_shape(k, value)?),
            BlockKind::TwoColumnText => Self::TwoColumnText(parse_shape(k, value)?),
            BlockKind::Timeline => Self::Timeline(parse_shape(k, value)?),
            BlockKind::FooterInfo => Self::FooterInfo(parse_shape(k, value)?),
            BlockKind::StyledContent => Self::StyledContent(parse_shape(k, value)?),
        })
    }

    /// Parse and validate in one step.
    pub fn parse_valid(kind: BlockKind, value: serde_json::Value) -> Result<Self, CoreError> {
        let payload = Self::parse(kind, value)?;
        payload.validate()?;
        Ok(payload)
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            Self::HeroBanner(_) => BlockKind::HeroBanner,
            Self::TextImage(_) => BlockKind::TextImage,
            Self::FeatureHighlights(_) => BlockKind::FeatureHighlights,
            Self::Testimonial(_) => BlockKind::Testimonial,
            Self::CallToAction(_) => BlockKind::CallToAction,
            Self::Gallery(_) => BlockKind::Gallery,
            Self::VideoEmbed(_) => BlockKind::VideoEmbed,
            Self::Faq(_) => BlockKind::Faq,
            Self::CounterStats(_) => BlockKind::CounterStats,
            Self::ContactForm(_) => BlockKind::ContactForm,
            Self::TeamMember(_) => BlockKind::TeamMember,
            Self::BlogPreview(_) => BlockKind::BlogPreview,
            Self::TwoColumnText(_) => BlockKind::TwoColumnText,
            Self::Timeline(_) => BlockKind::Timeline,
            Self::FooterInfo(_) => BlockKind::FooterInfo,
            Self::StyledContent(_) => BlockKind::StyledContent,
        }
    }

    /// Serialize back to the JSON stored in the `payload` column.
    pub fn to_json(&self) -> Result<serde_json::Value, CoreError> {
        let value = match self {
            Self::HeroBanner(p)
            | Self::Testimonial(p)
            | Self::Gallery(p)
            | Self::Faq(p)
            | Self::CounterStats(p)
            | Self::Timeline(p) => serde_json::to_value(p),
            Self::FeatureHighlights(p) | Self::TeamMember(p) => serde_json::to_value(p),
            Self::TextImage(p) => serde_json::to_value(p),
            Self::CallToAction(p) => serde_json::to_value(p),
            Self::VideoEmbed(p) => serde_json::to_value(p),
            Self::ContactForm(p) => serde_json::to_value(p),
            Self::BlogPreview(p) => serde_json::to_value(p),
            Self::TwoColumnText(p) => serde_json::to_value(p),
            Self::FooterInfo(p) => serde_json::to_value(p),
            Self::StyledContent(p) => serde_json::to_value(p),
        };
        value.map_err(|e| CoreError::Internal(format!("Failed to serialize block payload: {e}")))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            Self::HeroBanner(p)
            | Self::Testimonial(p)
            | Self::Gallery(p)
            | Self::Faq(p)
            | Self::CounterStats(p)
            | Self::Timeline(p) => max_len("heading", &p.heading, MAX_HEADING_LEN),
            Self::FeatureHighlights(p) | Self::TeamMember(p) => {
                max_len("heading", &p.heading, MAX_HEADING_LEN)?;
                max_len("subheading", &p.subheading, MAX_SUBHEADING_LEN)
            }
            Self::TextImage(p) => max_len("heading", &p.heading, MAX_HEADING_LEN),
            Self::CallToAction(p) => {
                required("heading", &p.heading)?;
                max_len("heading", &p.heading, MAX_HEADING_LEN)?;
                max_len("button_text", &p.button_text, MAX_BUTTON_TEXT_LEN)?;
                optional_url("button_url", &p.button_url)
            }
            Self::VideoEmbed(p) => {
                max_len("title", &p.title, MAX_HEADING_LEN)?;
                required("embed_url", &p.embed_url)?;
                optional_url("embed_url", &p.embed_url)
            }
            Self::ContactForm(p) => max_len("heading", &p.heading, MAX_HEADING_LEN),
            Self::BlogPreview(p) => {
                max_len("heading", &p.heading, MAX_HEADING_LEN)?;
                if p.count < 0 {
                    return Err(CoreError::Validation("count must not be negative".into()));
                }
                Ok(())
            }
            Self::TwoColumnText(p) => max_len("heading", &p.heading, MAX_HEADING_LEN),
            Self::FooterInfo(p) => {
                max_len("address", &p.address, 255)?;
                max_len("phone", &p.phone, 20)?;
                max_len("copyright_text", &p.copyright_text, 255)?;
                if !p.email.is_empty() && !p.email.contains('@') {
                    return Err(CoreError::Validation(format!(
                        "email '{}' is not a valid address",
                        p.email
                    )));
                }
                for link in p.links.iter().flatten() {
                    required("links.name", &link.name)?;
                    required("links.url", &link.url)?;
                }
                Ok(())
            }
            Self::StyledContent(p) => max_len("title", &p.title, MAX_HEADING_LEN),
        }
    }
}

// ---------------------------------------------------------------------------
// Child item payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeroSlide {
    pub background_image: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub button_text: String,
    pub button_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeatureItem {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TestimonialItem {
    pub name: String,
    pub designation: String,
    pub message: String,
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryImage {
    pub image: String,
    pub caption: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CounterItem {
    pub number: String,
    pub label: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TeamMemberItem {
    pub photo: Option<String>,
    pub name: String,
    pub role: String,
    pub bio: String,
    pub facebook: String,
    pub twitter: String,
    pub instagram: String,
    pub linkedin: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimelineStep {
    pub icon: String,
    pub title: String,
    pub detail: String,
}

/// A child row of a typed block (slide, FAQ entry, gallery image, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum ItemPayload {
    HeroSlide(HeroSlide),
    Feature(FeatureItem),
    Testimonial(TestimonialItem),
    GalleryImage(GalleryImage),
    Faq(FaqItem),
    Counter(CounterItem),
    TeamMember(TeamMemberItem),
    TimelineStep(TimelineStep),
}

impl ItemPayload {
    /// Parse a child item for a parent block of `parent`.
    pub fn parse(parent: BlockKind, value: serde_json::Value) -> Result<Self, CoreError> {
        let k = parent.as_str();
        Ok(match parent {
            BlockKind::HeroBanner => Self::HeroSlide(parse_shape(k, value)?),
            BlockKind::FeatureHighlights => Self::Feature(parse_shape(k, value)?),
            BlockKind::Testimonial => Self::Testimonial(parse_shape(k, value)?),
            BlockKind::Gallery => Self::GalleryImage(parse_shape(k, value)?),
            BlockKind::Faq => Self::Faq(parse_shape(k, value)?),
            BlockKind::CounterStats => Self::Counter(parse_shape(k, value)?),
            BlockKind::TeamMember => Self::TeamMember(parse_shape(k, value)?),
            BlockKind::Timeline => Self::TimelineStep(parse_shape(k, value)?),
            other => {
                return Err(CoreError::Validation(format!(
                    "Blocks of kind '{other}' do not have child items"
                )))
            }
        })
    }

    pub fn parse_valid(parent: BlockKind, value: serde_json::Value) -> Result<Self, CoreError> {
        let item = Self::parse(parent, value)?;
        item.validate()?;
        Ok(item)
    }

    pub fn parent_kind(&self) -> BlockKind {
        match self {
            Self::HeroSlide(_) => BlockKind::HeroBanner,
            Self::Feature(_) => BlockKind::FeatureHighlights,
            Self::Testimonial(_) => BlockKind::Testimonial,
            Self::GalleryImage(_) => BlockKind::Gallery,
            Self::Faq(_) => BlockKind::Faq,
            Self::Counter(_) => BlockKind::CounterStats,
            Self::TeamMember(_) => BlockKind::TeamMember,
            Self::TimelineStep(_) => BlockKind::Timeline,
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value, CoreError> {
        let value = match self {
            Self::HeroSlide(p) => serde_json::to_value(p),
            Self::Feature(p) => serde_json::to_value(p),
            Self::Testimonial(p) => serde_json::to_value(p),
            Self::GalleryImage(p) => serde_json::to_value(p),
            Self::Faq(p) => serde_json::to_value(p),
            Self::Counter(p) => serde_json::to_value(p),
            Self::TeamMember(p) => serde_json::to_value(p),
            Self::TimelineStep(p) => serde_json::to_value(p),
        };
        value.map_err(|e| CoreError::Internal(format!("Failed to serialize item payload: {e}")))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            Self::HeroSlide(p) => {
                required("title", &p.title)?;
                max_len("title", &p.title, MAX_HEADING_LEN)?;
                max_len("subtitle", &p.subtitle, MAX_SUBHEADING_LEN)?;
                max_len("button_text", &p.button_text, MAX_BUTTON_TEXT_LEN)?;
                optional_url("button_url", &p.button_url)
            }
            Self::Feature(p) => {
                required("title", &p.title)?;
                max_len("title", &p.title, MAX_ITEM_TITLE_LEN)
            }
            Self::Testimonial(p) => {
                required("name", &p.name)?;
                required("message", &p.message)?;
                max_len("name", &p.name, MAX_NAME_LEN)?;
                max_len("designation", &p.designation, MAX_NAME_LEN)
            }
            Self::GalleryImage(p) => {
                required("image", &p.image)?;
                max_len("caption", &p.caption, MAX_HEADING_LEN)
            }
            Self::Faq(p) => {
                required("question", &p.question)?;
                required("answer", &p.answer)?;
                max_len("question", &p.question, 255)
            }
            Self::Counter(p) => {
                required("number", &p.number)?;
                required("label", &p.label)?;
                max_len("number", &p.number, 50)?;
                max_len("label", &p.label, MAX_ITEM_TITLE_LEN)
            }
            Self::TeamMember(p) => {
                required("name", &p.name)?;
                max_len("name", &p.name, MAX_NAME_LEN)?;
                max_len("role", &p.role, MAX_NAME_LEN)?;
                for (field, url) in [
                    ("facebook", &p.facebook),
                    ("twitter", &p.twitter),
                    ("instagram", &p.instagram),
                    ("linkedin", &p.linkedin),
                ] {
                    optional_url(field, url)?;
                }
                Ok(())
            }
            Self::TimelineStep(p) => {
                required("title", &p.title)?;
                max_len("title", &p.title, MAX_ITEM_TITLE_LEN)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn required(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn max_len(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

fn optional_url(field: &str, value: &str) -> Result<(), CoreError> {
    if value.is_empty() || value.starts_with("http://") || value.starts_with("https://") {
        return Ok(());
    }
    Err(CoreError::Validation(format!(
        "{field} must be an absolute http(s) URL, got '{value}'"
    )))
}
