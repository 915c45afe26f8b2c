pub mod store;
pub mod table;

pub use store::CorpusStore;
