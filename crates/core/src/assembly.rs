//! Page assembly: merge a page's blocks into one ordered render list.
//!
//! Typed blocks and generic blocks live in different tables. Assembly keeps
//! the active ones, concatenates typed before generic, and sorts by
//! `(order, id)`. The sort is stable, so a typed and a generic block that
//! share both order and id keep typed-first placement.

use crate::types::{DbId, SortOrder};

/// The ordering / visibility contract shared by every block shape.
pub trait RenderBlock {
    fn id(&self) -> DbId;
    fn order(&self) -> SortOrder;
    fn is_active(&self) -> bool;
    fn template_key(&self) -> &'static str;
}

/// Either side of the typed / generic split.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockSource<T, G> {
    Typed(T),
    Generic(G),
}

impl<T: RenderBlock, G: RenderBlock> RenderBlock for BlockSource<T, G> {
    fn id(&self) -> DbId {
        match self {
            BlockSource::Typed(b) => b.id(),
            BlockSource::Generic(b) => b.id(),
        }
    }

    fn order(&self) -> SortOrder {
        match self {
            BlockSource::Typed(b) => b.order(),
            BlockSource::Generic(b) => b.order(),
        }
    }

    fn is_active(&self) -> bool {
        match self {
            BlockSource::Typed(b) => b.is_active(),
            BlockSource::Generic(b) => b.is_active(),
        }
    }

    fn template_key(&self) -> &'static str {
        match self {
            BlockSource::Typed(b) => b.template_key(),
            BlockSource::Generic(b) => b.template_key(),
        }
    }
}

/// A block paired with the template that renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembled<B> {
    pub template: &'static str,
    pub block: B,
}

/// Drop inactive blocks and order the rest by `(order, id)`.
pub fn assemble<B: RenderBlock>(blocks: impl IntoIterator<Item = B>) -> Vec<Assembled<B>> {
    let mut active: Vec<B> = blocks.into_iter().filter(|b| b.is_active()).collect();
    active.sort_by_key(|b| (b.order(), b.id()));
    active
        .into_iter()
        .map(|block| Assembled {
            template: block.template_key(),
            block,
        })
        .collect()
}

/// Assemble a page from its typed and generic blocks.
pub fn assemble_page<T, G>(typed: Vec<T>, generic: Vec<G>) -> Vec<Assembled<BlockSource<T, G>>>
where
    T: RenderBlock,
    G: RenderBlock,
{
    let merged = typed
        .into_iter()
        .map(BlockSource::Typed)
        .chain(generic.into_iter().map(BlockSource::Generic));
    assemble(merged)
}
