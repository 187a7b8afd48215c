pub mod error;
pub mod scene;
pub mod types;

pub use error::UrdfError;
pub use scene::*;
pub use types::*;
