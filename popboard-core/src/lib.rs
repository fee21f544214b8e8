pub mod collection;
pub mod errors;
pub mod filters;
pub mod ids;
pub mod models;
pub mod repo;

pub use collection::*;
pub use errors::*;
pub use filters::*;
pub use ids::*;
pub use models::*;
pub use repo::*;
