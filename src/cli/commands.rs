use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "dudu",
    about = concat!("dudu v", env!("CARGO_PKG_VERSION"), " - todo lists in plain JSON files"),
    version
)]
pub struct Cli {
    /// Todo file to open. Omit it (or pass `.`) to start a new document
    pub file: Option<PathBuf>,
}

impl Cli {
    /// The file to load on launch, with `.` meaning none
    pub fn file_to_open(&self) -> Option<PathBuf> {
        self.file
            .as_ref()
            .filter(|p| p.as_os_str() != ".")
            .cloned()
    }
}
