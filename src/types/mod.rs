mod assignment;
mod config;
mod course;
mod group;
mod ids;
mod instructor;
mod occurrence;
mod result;
mod room;
mod section;

pub use assignment::*;
pub use config::*;
pub use course::*;
pub use group::*;
pub use ids::*;
pub use instructor::*;
pub use occurrence::*;
pub use result::*;
pub use room::*;
pub use section::*;
