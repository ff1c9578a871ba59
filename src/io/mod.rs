pub mod config_io;
pub mod document_io;
pub mod logging;
pub mod paths;
pub mod recent;
pub mod recovery;
pub mod session;
