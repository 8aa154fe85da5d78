//! Render descriptors for the public page endpoint.
//!
//! The API does not render HTML. It hands the external render layer an
//! ordered list of block descriptors, each naming its template and carrying
//! resolved styling, the block's fields and its child items.

use std::collections::HashMap;

use clubsite_core::assembly::{assemble_page, BlockSource};
use clubsite_core::menu::MenuEntry;
use clubsite_core::style::ResolvedStyle;
use clubsite_core::types::{DbId, SortOrder};
use clubsite_db::models::block::Block;
use clubsite_db::models::block_type::BlockType;
use clubsite_db::models::content_block::{ContentBlock, ContentBlockItem};
use clubsite_db::models::page::Page;
use clubsite_db::models::style_options::StyleOptionsRow;
use serde::Serialize;
use serde_json::json;

/// Which table a block came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockOrigin {
    Typed,
    Generic,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemDescriptor {
    pub id: DbId,
    pub order: SortOrder,
    pub payload: serde_json::Value,
}

/// One renderable block of a page.
#[derive(Debug, Clone, Serialize)]
pub struct BlockDescriptor {
    pub source: BlockOrigin,
    pub id: DbId,
    /// Block kind for typed blocks, block type slug for generic ones.
    pub kind: String,
    pub order: SortOrder,
    pub template: &'static str,
    /// Only typed blocks carry styling.
    pub style: Option<ResolvedStyle>,
    pub payload: serde_json::Value,
    pub items: Vec<ItemDescriptor>,
}

/// Public fields of a page.
#[derive(Debug, Clone, Serialize)]
pub struct PageSummary {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub intro: String,
    pub content: String,
    pub template_name: String,
}

impl From<Page> for PageSummary {
    fn from(page: Page) -> Self {
        Self {
            id: page.id,
            title: page.title,
            slug: page.slug,
            intro: page.intro,
            content: page.content,
            template_name: page.template_name,
        }
    }
}

/// Response of `GET /api/v1/pages/{slug}`.
#[derive(Debug, Clone, Serialize)]
pub struct PageDetail {
    pub page: PageSummary,
    pub blocks: Vec<BlockDescriptor>,
    pub menu: Vec<MenuEntry>,
}

/// Everything loaded for one page, before assembly.
#[derive(Debug, Default)]
pub struct PageContent {
    pub typed: Vec<ContentBlock>,
    pub generic: Vec<Block>,
    pub styles: Vec<StyleOptionsRow>,
    pub items: Vec<ContentBlockItem>,
    pub block_types: Vec<BlockType>,
}

/// Assemble a page's blocks into ordered render descriptors.
pub fn describe_blocks(content: PageContent) -> Vec<BlockDescriptor> {
    let styles: HashMap<DbId, ResolvedStyle> = content
        .styles
        .iter()
        .map(|row| (row.id, row.options().resolve()))
        .collect();

    let mut items_by_block: HashMap<DbId, Vec<ItemDescriptor>> = HashMap::new();
    for item in content.items {
        items_by_block
            .entry(item.block_id)
            .or_default()
            .push(ItemDescriptor {
                id: item.id,
                order: item.sort_order,
                payload: item.payload,
            });
    }
    for items in items_by_block.values_mut() {
        items.sort_by_key(|i| (i.order, i.id));
    }

    let type_slugs: HashMap<DbId, &str> = content
        .block_types
        .iter()
        .map(|bt| (bt.id, bt.slug.as_str()))
        .collect();

    assemble_page(content.typed, content.generic)
        .into_iter()
        .map(|assembled| match assembled.block {
            BlockSource::Typed(block) => BlockDescriptor {
                source: BlockOrigin::Typed,
                id: block.id,
                kind: block.kind.to_string(),
                order: block.sort_order,
                template: assembled.template,
                style: block
                    .style_options_id
                    .and_then(|style_id| styles.get(&style_id).cloned()),
                payload: block.payload,
                items: items_by_block.remove(&block.id).unwrap_or_default(),
            },
            BlockSource::Generic(block) => BlockDescriptor {
                source: BlockOrigin::Generic,
                id: block.id,
                kind: type_slugs
                    .get(&block.block_type_id)
                    .copied()
                    .unwrap_or_default()
                    .to_string(),
                order: block.sort_order,
                template: assembled.template,
                style: None,
                payload: json!({
                    "title": block.title,
                    "content": block.content,
                }),
                items: Vec::new(),
            },
        })
        .collect()
}
