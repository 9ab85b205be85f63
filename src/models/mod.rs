pub mod row;
pub mod analysis;

pub use row::*;
pub use analysis::*;
