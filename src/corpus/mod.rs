//! @ai:module:intent Benchmark corpus definitions and loading
//! @ai:module:layer domain
//! @ai:module:public_api CorpusItem, CorpusLoader

pub mod item;
pub mod loader;

pub use item::{parse_item_id, CorpusItem};
pub use loader::{CorpusLoader, CorpusLoaderTrait};
