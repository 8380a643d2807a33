pub mod activity;
pub mod report;
pub mod repository;

pub use activity::*;
pub use report::*;
pub use repository::*;
