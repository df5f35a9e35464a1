pub mod block_builder;
pub mod block_selector;
pub mod image_resolver;
pub mod quota;

pub use block_builder::build_blocks;
pub use block_selector::{select_blocks, Selection};
pub use image_resolver::ImageResolver;
pub use quota::target_for;
