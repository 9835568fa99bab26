pub mod audit;
pub mod loader;
pub mod schema;

pub use audit::*;
pub use loader::*;
pub use schema::*;
