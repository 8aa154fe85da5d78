pub mod block;
pub mod block_kind;
pub mod block_type;
pub mod content_block;
pub mod menu;
pub mod page;
