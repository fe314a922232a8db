//! Home directory path helpers

use std::path::{Component, Path, PathBuf};

/// Replace a leading `~` component with `home`.
///
/// Returns `None` when the path starts with `~` and no home is known.
pub fn expand_tilde(path: &Path, home: Option<&Path>) -> Option<PathBuf> {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => {
            home.map(|home| home.join(components.as_path()))
        }
        _ => Some(path.to_path_buf()),
    }
}
