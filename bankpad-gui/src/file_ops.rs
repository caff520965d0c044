//! File operations using native dialogs.
//!
//! Uses the `rfd` crate for cross-platform file dialogs.

use std::path::PathBuf;

/// Open a file dialog to select a sound bank. `None` if the user cancels.
pub async fn open_bank_dialog(extensions: &[String]) -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title("Open Sound Bank")
        .add_filter("Sound Bank", extensions)
        .add_filter("All Files", &["*"])
        .pick_file()
        .await
        .map(|f| f.path().to_path_buf())
}
