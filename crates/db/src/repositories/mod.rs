//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod block_repo;
pub mod block_type_repo;
pub mod content_block_item_repo;
pub mod content_block_repo;
pub mod menu_item_repo;
pub mod page_repo;
pub mod style_options_repo;

pub use block_repo::BlockRepo;
pub use block_type_repo::BlockTypeRepo;
pub use content_block_item_repo::ContentBlockItemRepo;
pub use content_block_repo::ContentBlockRepo;
pub use menu_item_repo::MenuItemRepo;
pub use page_repo::PageRepo;
pub use style_options_repo::StyleOptionsRepo;
