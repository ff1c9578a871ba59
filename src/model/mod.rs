pub mod config;
pub mod document;
pub mod notice;
pub mod selection;
pub mod task;

pub use config::*;
pub use document::*;
pub use notice::*;
pub use selection::*;
pub use task::*;
