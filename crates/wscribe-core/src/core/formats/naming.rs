use chrono::NaiveDateTime;

use crate::core::View;

/// Builds `wscribe_{sub|transcript}_YY_MM_DD_HH_MM_SS.{ext}`
pub fn export_file_name(view: View, extension: &str, at: NaiveDateTime) -> String {
    format!(
        "wscribe_{}_{}.{}",
        view.file_label(),
        at.format("%y_%m_%d_%H_%M_%S"),
        extension
    )
}
