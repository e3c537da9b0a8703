//! Content blocks: the reusable pieces of email content.
//!
//! A [`ContentBlock`] is stored sparsely: the record carries the superset of
//! every block type's fields and [`BlockType`] decides which of them are
//! meaningful. Fields belonging to an inactive type are kept, not erased, so
//! switching a block's type and back is lossless. Renderers should read a
//! block through [`ContentBlock::view`], which yields a typed [`BlockView`]
//! with every type default resolved.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{new_id, BlockId, Percent};

// ---------------------------------------------------------------------------
// Block type
// ---------------------------------------------------------------------------

/// The kind of content a block renders as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockType {
    #[default]
    Text,
    Image,
    Button,
    Table,
    Social,
    InfoCard,
    DividerBlock,
    Spacer,
    Hero,
}

impl BlockType {
    /// All block types, in the order the builder offers them.
    pub const ALL: [BlockType; 9] = [
        Self::Text,
        Self::Image,
        Self::Button,
        Self::Table,
        Self::Social,
        Self::InfoCard,
        Self::DividerBlock,
        Self::Spacer,
        Self::Hero,
    ];

    /// Wire name of the block type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Button => "button",
            Self::Table => "table",
            Self::Social => "social",
            Self::InfoCard => "infoCard",
            Self::DividerBlock => "dividerBlock",
            Self::Spacer => "spacer",
            Self::Hero => "hero",
        }
    }

    /// Parse a wire name.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid block type '{s}'. Must be one of: {}",
                    Self::ALL.map(|t| t.as_str()).join(", ")
                ))
            })
    }

    /// Human-readable label for the block picker.
    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Image => "Image",
            Self::Button => "Button",
            Self::Table => "Table",
            Self::Social => "Social Links",
            Self::InfoCard => "Info Card",
            Self::DividerBlock => "Divider",
            Self::Spacer => "Spacer",
            Self::Hero => "Hero",
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Style enums
// ---------------------------------------------------------------------------

/// Horizontal alignment of text and inline content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Button placement; `Full` stretches the button across the cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonAlign {
    Left,
    Center,
    Right,
    #[default]
    Full,
}

/// Relative text size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    Small,
    #[default]
    Medium,
    Large,
    XLarge,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    #[default]
    Primary,
    Secondary,
    Outline,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfoCardStyle {
    Simple,
    #[default]
    Bordered,
    Shaded,
}

/// Stroke style for divider lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Networks a social block can link to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialNetwork {
    Facebook,
    Instagram,
    Twitter,
    Linkedin,
    Youtube,
    Tiktok,
}

// ---------------------------------------------------------------------------
// Nested records
// ---------------------------------------------------------------------------

/// One column of a table block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    /// Field path read from each row of the data source.
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub align: Option<Align>,
    /// Display format hint (`"currency"`, `"date"`, ...), opaque to the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// One label/value line of an info card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoCardItem {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_BUTTON_TEXT: &str = "Click here";
pub const DEFAULT_TABLE_ROW_LIMIT: u32 = 5;
pub const DEFAULT_TABLE_SHOW_MORE: &str = "and {{ remaining }} more";
pub const DEFAULT_DIVIDER_COLOR: &str = "#e5e7eb";
pub const DEFAULT_DIVIDER_HEIGHT_PX: u32 = 1;
pub const DEFAULT_DIVIDER_WIDTH: Percent = 100.0;
pub const DEFAULT_SPACER_HEIGHT_PX: u32 = 20;
pub const DEFAULT_HERO_BG_COLOR: &str = "#6b21a8";
pub const DEFAULT_HERO_TEXT_COLOR: &str = "#ffffff";
pub const DEFAULT_HERO_MIN_HEIGHT_PX: u32 = 300;

// ---------------------------------------------------------------------------
// Content block
// ---------------------------------------------------------------------------

/// A single piece of email content.
///
/// Only `id` and `block_type` are always meaningful; every other field is
/// optional and belongs to one block type (see the section comments).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlock {
    /// Stored blocks without an id get a fresh one on load.
    #[serde(default = "crate::types::new_id")]
    pub id: BlockId,
    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub block_type: BlockType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    // -- text --
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub title_align: Option<Align>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub subtitle_align: Option<Align>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description_align: Option<Align>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub title_size: Option<TextSize>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub subtitle_size: Option<TextSize>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description_size: Option<TextSize>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_quote: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub border_width: Option<u32>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub border_radius: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    // -- image --
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_link: Option<String>,

    // -- button --
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_url: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub button_style: Option<ButtonStyle>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub button_align: Option<ButtonAlign>,

    // -- table --
    #[serde(
        default,
        deserialize_with = "crate::lenient::option_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub table_columns: Option<Vec<TableColumn>>,
    /// Key of the backend data source that feeds the table rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_data_source: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub table_row_limit: Option<u32>,
    /// Template for the overflow line, e.g. `"and {{ remaining }} more"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_show_more_text: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub table_striped: Option<bool>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub table_bordered: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_header_color: Option<String>,

    // -- social --
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_tiktok: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub social_icon_size: Option<IconSize>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub social_align: Option<Align>,

    // -- info card --
    #[serde(
        default,
        deserialize_with = "crate::lenient::option_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub info_card_items: Option<Vec<InfoCardItem>>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub info_card_style: Option<InfoCardStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_card_bg_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_card_border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_card_label_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_card_value_color: Option<String>,

    // -- divider --
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub divider_style: Option<LineStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divider_color: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub divider_height: Option<u32>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub divider_width: Option<Percent>,

    // -- spacer --
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub spacer_height: Option<u32>,

    // -- hero --
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_bg_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_bg_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_text_color: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub hero_min_height: Option<u32>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub hero_align: Option<Align>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_button_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_button_url: Option<String>,
}

impl ContentBlock {
    /// Create a block of the given type with a fresh id and the type's
    /// defaults filled in.
    pub fn new(block_type: BlockType) -> Self {
        let mut block = Self {
            id: new_id(),
            block_type,
            ..Default::default()
        };
        block.apply_defaults();
        block
    }

    /// Copy this block under a fresh id. Nested lists are owned copies.
    pub fn duplicate(&self) -> Self {
        Self {
            id: new_id(),
            ..self.clone()
        }
    }

    /// Switch the block type, keeping every existing field and filling in
    /// the new type's defaults where unset.
    pub fn with_block_type(mut self, block_type: BlockType) -> Self {
        self.block_type = block_type;
        self.apply_defaults();
        self
    }

    /// Display name: the user label if set, otherwise a type-based fallback.
    pub fn display_name(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.trim().is_empty() => label,
            _ => self.block_type.label(),
        }
    }

    /// Fill in any unset default-bearing field of the current block type.
    fn apply_defaults(&mut self) {
        match self.block_type {
            BlockType::Text => {
                self.title_align.get_or_insert(Align::Left);
                self.subtitle_align.get_or_insert(Align::Left);
                self.description_align.get_or_insert(Align::Left);
                self.title_size.get_or_insert(TextSize::Large);
                self.subtitle_size.get_or_insert(TextSize::Medium);
                self.description_size.get_or_insert(TextSize::Medium);
                self.is_quote.get_or_insert(false);
            }
            BlockType::Image => {
                self.image_alt.get_or_insert_with(String::new);
            }
            BlockType::Button => {
                self.button_text
                    .get_or_insert_with(|| DEFAULT_BUTTON_TEXT.to_string());
                self.button_style.get_or_insert(ButtonStyle::Primary);
                self.button_align.get_or_insert(ButtonAlign::Full);
            }
            BlockType::Table => {
                self.table_columns.get_or_insert_with(Vec::new);
                self.table_row_limit.get_or_insert(DEFAULT_TABLE_ROW_LIMIT);
                self.table_show_more_text
                    .get_or_insert_with(|| DEFAULT_TABLE_SHOW_MORE.to_string());
                self.table_striped.get_or_insert(true);
                self.table_bordered.get_or_insert(false);
            }
            BlockType::Social => {
                self.social_icon_size.get_or_insert(IconSize::Medium);
                self.social_align.get_or_insert(Align::Center);
            }
            BlockType::InfoCard => {
                self.info_card_items.get_or_insert_with(Vec::new);
                self.info_card_style.get_or_insert(InfoCardStyle::Bordered);
            }
            BlockType::DividerBlock => {
                self.divider_style.get_or_insert(LineStyle::Solid);
                self.divider_color
                    .get_or_insert_with(|| DEFAULT_DIVIDER_COLOR.to_string());
                self.divider_height.get_or_insert(DEFAULT_DIVIDER_HEIGHT_PX);
                self.divider_width.get_or_insert(DEFAULT_DIVIDER_WIDTH);
            }
            BlockType::Spacer => {
                self.spacer_height.get_or_insert(DEFAULT_SPACER_HEIGHT_PX);
            }
            BlockType::Hero => {
                self.hero_bg_color
                    .get_or_insert_with(|| DEFAULT_HERO_BG_COLOR.to_string());
                self.hero_text_color
                    .get_or_insert_with(|| DEFAULT_HERO_TEXT_COLOR.to_string());
                self.hero_min_height.get_or_insert(DEFAULT_HERO_MIN_HEIGHT_PX);
                self.hero_align.get_or_insert(Align::Center);
            }
        }
    }

    /// Social links that have a URL, in display order.
    pub fn social_links(&self) -> Vec<(SocialNetwork, &str)> {
        [
            (SocialNetwork::Facebook, &self.social_facebook),
            (SocialNetwork::Instagram, &self.social_instagram),
            (SocialNetwork::Twitter, &self.social_twitter),
            (SocialNetwork::Linkedin, &self.social_linkedin),
            (SocialNetwork::Youtube, &self.social_youtube),
            (SocialNetwork::Tiktok, &self.social_tiktok),
        ]
        .into_iter()
        .filter_map(|(network, url)| match url.as_deref() {
            Some(url) if !url.is_empty() => Some((network, url)),
            _ => None,
        })
        .collect()
    }

    /// Typed read view of the active block type, defaults resolved.
    pub fn view(&self) -> BlockView<'_> {
        match self.block_type {
            BlockType::Text => BlockView::Text(TextView {
                title: text_or_empty(&self.title),
                subtitle: text_or_empty(&self.subtitle),
                description: text_or_empty(&self.description),
                title_align: self.title_align.unwrap_or_default(),
                subtitle_align: self.subtitle_align.unwrap_or_default(),
                description_align: self.description_align.unwrap_or_default(),
                title_size: self.title_size.unwrap_or(TextSize::Large),
                subtitle_size: self.subtitle_size.unwrap_or_default(),
                description_size: self.description_size.unwrap_or_default(),
                is_quote: self.is_quote.unwrap_or(false),
                background_color: self.background_color.as_deref(),
                border_color: self.border_color.as_deref(),
                border_width: self.border_width.unwrap_or(0),
                border_radius: self.border_radius.unwrap_or(0),
                text_color: self.text_color.as_deref(),
                font_family: self.font_family.as_deref(),
            }),
            BlockType::Image => BlockView::Image(ImageView {
                url: self.image_url.as_deref().filter(|u| !u.is_empty()),
                alt: text_or_empty(&self.image_alt),
                link: self.image_link.as_deref().filter(|l| !l.is_empty()),
            }),
            BlockType::Button => BlockView::Button(ButtonView {
                text: self.button_text.as_deref().unwrap_or(DEFAULT_BUTTON_TEXT),
                url: text_or_empty(&self.button_url),
                style: self.button_style.unwrap_or_default(),
                align: self.button_align.unwrap_or_default(),
            }),
            BlockType::Table => BlockView::Table(TableView {
                columns: self.table_columns.as_deref().unwrap_or_default(),
                data_source: self.table_data_source.as_deref(),
                row_limit: self.table_row_limit.unwrap_or(DEFAULT_TABLE_ROW_LIMIT),
                show_more_text: self
                    .table_show_more_text
                    .as_deref()
                    .unwrap_or(DEFAULT_TABLE_SHOW_MORE),
                striped: self.table_striped.unwrap_or(true),
                bordered: self.table_bordered.unwrap_or(false),
                header_color: self.table_header_color.as_deref(),
            }),
            BlockType::Social => BlockView::Social(SocialView {
                links: self.social_links(),
                icon_size: self.social_icon_size.unwrap_or_default(),
                align: self.social_align.unwrap_or(Align::Center),
            }),
            BlockType::InfoCard => BlockView::InfoCard(InfoCardView {
                items: self.info_card_items.as_deref().unwrap_or_default(),
                style: self.info_card_style.unwrap_or_default(),
                bg_color: self.info_card_bg_color.as_deref(),
                border_color: self.info_card_border_color.as_deref(),
                label_color: self.info_card_label_color.as_deref(),
                value_color: self.info_card_value_color.as_deref(),
            }),
            BlockType::DividerBlock => BlockView::Divider(DividerLineView {
                style: self.divider_style.unwrap_or_default(),
                color: self.divider_color.as_deref().unwrap_or(DEFAULT_DIVIDER_COLOR),
                height: self.divider_height.unwrap_or(DEFAULT_DIVIDER_HEIGHT_PX),
                width: self.divider_width.unwrap_or(DEFAULT_DIVIDER_WIDTH),
            }),
            BlockType::Spacer => BlockView::Spacer {
                height: self.spacer_height.unwrap_or(DEFAULT_SPACER_HEIGHT_PX),
            },
            BlockType::Hero => BlockView::Hero(HeroView {
                bg_color: self.hero_bg_color.as_deref().unwrap_or(DEFAULT_HERO_BG_COLOR),
                bg_image: self.hero_bg_image.as_deref().filter(|u| !u.is_empty()),
                title: text_or_empty(&self.hero_title),
                subtitle: text_or_empty(&self.hero_subtitle),
                text_color: self
                    .hero_text_color
                    .as_deref()
                    .unwrap_or(DEFAULT_HERO_TEXT_COLOR),
                min_height: self.hero_min_height.unwrap_or(DEFAULT_HERO_MIN_HEIGHT_PX),
                align: self.hero_align.unwrap_or(Align::Center),
                button: match (self.hero_button_text.as_deref(), self.hero_button_url.as_deref()) {
                    (Some(text), url) if !text.is_empty() => Some((text, url.unwrap_or(""))),
                    _ => None,
                },
            }),
        }
    }
}

fn text_or_empty(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("")
}

// ---------------------------------------------------------------------------
// Typed views
// ---------------------------------------------------------------------------

/// A block as its active type sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockView<'a> {
    Text(TextView<'a>),
    Image(ImageView<'a>),
    Button(ButtonView<'a>),
    Table(TableView<'a>),
    Social(SocialView<'a>),
    InfoCard(InfoCardView<'a>),
    Divider(DividerLineView<'a>),
    Spacer { height: u32 },
    Hero(HeroView<'a>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextView<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub description: &'a str,
    pub title_align: Align,
    pub subtitle_align: Align,
    pub description_align: Align,
    pub title_size: TextSize,
    pub subtitle_size: TextSize,
    pub description_size: TextSize,
    pub is_quote: bool,
    pub background_color: Option<&'a str>,
    pub border_color: Option<&'a str>,
    pub border_width: u32,
    pub border_radius: u32,
    pub text_color: Option<&'a str>,
    pub font_family: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageView<'a> {
    /// `None` until an asset has been picked.
    pub url: Option<&'a str>,
    pub alt: &'a str,
    pub link: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonView<'a> {
    pub text: &'a str,
    pub url: &'a str,
    pub style: ButtonStyle,
    pub align: ButtonAlign,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a> {
    pub columns: &'a [TableColumn],
    pub data_source: Option<&'a str>,
    pub row_limit: u32,
    pub show_more_text: &'a str,
    pub striped: bool,
    pub bordered: bool,
    pub header_color: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SocialView<'a> {
    pub links: Vec<(SocialNetwork, &'a str)>,
    pub icon_size: IconSize,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfoCardView<'a> {
    pub items: &'a [InfoCardItem],
    pub style: InfoCardStyle,
    pub bg_color: Option<&'a str>,
    pub border_color: Option<&'a str>,
    pub label_color: Option<&'a str>,
    pub value_color: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DividerLineView<'a> {
    pub style: LineStyle,
    pub color: &'a str,
    pub height: u32,
    pub width: Percent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeroView<'a> {
    pub bg_color: &'a str,
    pub bg_image: Option<&'a str>,
    pub title: &'a str,
    pub subtitle: &'a str,
    pub text_color: &'a str,
    pub min_height: u32,
    pub align: Align,
    /// Call-to-action `(text, url)`, present when button text is set.
    pub button: Option<(&'a str, &'a str)>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    // -- Factory --

    #[test]
    fn factory_defaults_identical_except_id() {
        let a = ContentBlock::new(BlockType::Text);
        let b = ContentBlock::new(BlockType::Text);
        assert_ne!(a.id, b.id);
        assert_eq!(ContentBlock { id: String::new(), ..a }, ContentBlock { id: String::new(), ..b });
    }

    #[test]
    fn factory_applies_type_defaults() {
        assert_eq!(ContentBlock::new(BlockType::Text).title_align, Some(Align::Left));
        assert_eq!(
            ContentBlock::new(BlockType::Button).button_align,
            Some(ButtonAlign::Full)
        );
        assert_eq!(
            ContentBlock::new(BlockType::Hero).hero_bg_color.as_deref(),
            Some("#6b21a8")
        );
        assert_eq!(ContentBlock::new(BlockType::Spacer).spacer_height, Some(20));
    }

    #[test]
    fn factory_leaves_other_types_fields_unset() {
        let block = ContentBlock::new(BlockType::Image);
        assert!(block.title_align.is_none());
        assert!(block.hero_bg_color.is_none());
    }

    // -- Duplicate --

    #[test]
    fn duplicate_gets_new_id_and_owned_lists() {
        let mut original = ContentBlock::new(BlockType::InfoCard);
        original.info_card_items = Some(vec![InfoCardItem {
            label: "Date".into(),
            value: "{{ booking.date }}".into(),
        }]);

        let mut clone = original.duplicate();
        assert_ne!(clone.id, original.id);
        clone.info_card_items.as_mut().unwrap().push(InfoCardItem::default());

        assert_eq!(original.info_card_items.as_ref().unwrap().len(), 1);
        assert_eq!(clone.info_card_items.as_ref().unwrap().len(), 2);
    }

    // -- Type switching --

    #[test]
    fn switching_type_keeps_old_fields() {
        let mut block = ContentBlock::new(BlockType::Text);
        block.title = Some("Welcome".into());
        let block = block.with_block_type(BlockType::Image).with_block_type(BlockType::Text);
        assert_eq!(block.title.as_deref(), Some("Welcome"));
        assert_eq!(block.image_alt.as_deref(), Some(""));
    }

    // -- Block type parsing --

    #[test]
    fn block_type_parse_valid() {
        assert_eq!(BlockType::parse("infoCard").unwrap(), BlockType::InfoCard);
        assert_eq!(BlockType::parse("dividerBlock").unwrap(), BlockType::DividerBlock);
    }

    #[test]
    fn block_type_parse_invalid() {
        let err = BlockType::parse("video").unwrap_err();
        assert!(err.to_string().contains("video"));
    }

    #[test]
    fn block_type_wire_names_match_serde() {
        for ty in BlockType::ALL {
            assert_eq!(serde_json::to_value(ty).unwrap(), json!(ty.as_str()));
        }
    }

    // -- Serialization --

    #[test]
    fn unset_fields_are_omitted() {
        let block = ContentBlock::new(BlockType::Spacer);
        let value = serde_json::to_value(&block).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj["blockType"], "spacer");
        assert_eq!(obj["spacerHeight"], 20);
        assert!(!obj.contains_key("title"));
    }

    #[test]
    fn unreadable_fields_fall_back_to_defaults() {
        let block: ContentBlock = serde_json::from_value(json!({
            "id": "b1",
            "blockType": "text",
            "title": "Hi",
            "titleAlign": "justify",
            "borderWidth": "2px"
        }))
        .unwrap();
        assert_eq!(block.title_align, None);
        assert_eq!(block.border_width, None);
        assert_matches!(block.view(), BlockView::Text(v) if v.title_align == Align::Left && v.title == "Hi");
    }

    #[test]
    fn unknown_block_type_reads_as_text() {
        let block: ContentBlock =
            serde_json::from_value(json!({"id": "b1", "blockType": "carousel"})).unwrap();
        assert_eq!(block.block_type, BlockType::Text);
    }

    #[test]
    fn partial_nested_items_keep_their_siblings() {
        let block: ContentBlock = serde_json::from_value(json!({
            "id": "c1",
            "blockType": "infoCard",
            "infoCardItems": [
                {"label": "Date", "value": "{{ booking.date }}"},
                {"label": "Time"},
                "garbage"
            ],
            "tableColumns": [
                {"key": "name", "label": "Item"},
                {"key": "price"}
            ]
        }))
        .unwrap();

        let items = block.info_card_items.as_ref().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].value, "{{ booking.date }}");
        assert_eq!(items[1].label, "Time");
        assert_eq!(items[1].value, "");

        let columns = block.table_columns.as_ref().unwrap();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[1].key, "price");
        assert_eq!(columns[1].label, "");
    }

    #[test]
    fn block_without_id_gets_one() {
        let block: ContentBlock = serde_json::from_value(json!({"blockType": "button"})).unwrap();
        assert!(!block.id.is_empty());
        assert_eq!(block.block_type, BlockType::Button);
    }

    // -- Views --

    #[test]
    fn hero_view_resolves_defaults() {
        let block = ContentBlock {
            id: "h".into(),
            block_type: BlockType::Hero,
            ..Default::default()
        };
        assert_matches!(block.view(), BlockView::Hero(v) => {
            assert_eq!(v.bg_color, DEFAULT_HERO_BG_COLOR);
            assert_eq!(v.align, Align::Center);
            assert!(v.button.is_none());
        });
    }

    #[test]
    fn social_view_skips_empty_links() {
        let mut block = ContentBlock::new(BlockType::Social);
        block.social_instagram = Some("https://instagram.com/moon".into());
        block.social_facebook = Some(String::new());
        assert_matches!(block.view(), BlockView::Social(v) => {
            assert_eq!(v.links, vec![(SocialNetwork::Instagram, "https://instagram.com/moon")]);
        });
    }

    #[test]
    fn display_name_falls_back_to_type_label() {
        let mut block = ContentBlock::new(BlockType::InfoCard);
        assert_eq!(block.display_name(), "Info Card");
        block.label = Some("Booking details".into());
        assert_eq!(block.display_name(), "Booking details");
    }
}
