pub mod store;

pub use store::DatasetStore;
