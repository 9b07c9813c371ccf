use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

pub const INDEX_FILE: &str = "index.html";

/// Files under `dir`; unknown paths get `index.html` so client-side routes
/// survive a reload.
pub fn static_files(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join(INDEX_FILE)))
}
