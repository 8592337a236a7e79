pub mod path;
pub mod platform;

pub use path::{
    git_bash_drive, normalize_windows_path, normalize_windows_path_with, starts_with_drive_letter,
    to_git_bash_path,
};
pub use platform::{home_dir, Platform};
