//! Path normalization between Git-Bash and native Windows drive forms.

use crate::types::{DriveCase, NormalizeOptions};

/// Returns true if the path begins with a drive letter and colon (e.g. "C:", "d:").
pub fn starts_with_drive_letter(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Drive letter of a Git-Bash style path: `/c`, `/c/...`. `/usr` is not a drive.
pub fn git_bash_drive(path: &str) -> Option<char> {
    let bytes = path.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'/' || !bytes[1].is_ascii_alphabetic() {
        return None;
    }
    if bytes.len() == 2 || bytes[2] == b'/' {
        Some(bytes[1] as char)
    } else {
        None
    }
}

fn forward_slashes(s: &str) -> String {
    s.replace('\\', "/")
}

/// Normalize a path into native Windows form with forward slashes.
///
/// - `/c/Users/x` becomes `C:/Users/x` (the drive letter is always uppercased).
/// - `C:\Users\x` becomes `C:/Users/x` (the drive letter is kept as written).
/// - Anything else is returned unchanged, backslashes included.
pub fn normalize_windows_path(path: &str) -> String {
    normalize_windows_path_with(path, &NormalizeOptions::default())
}

/// Same as [`normalize_windows_path`], with the native drive letter case selectable.
pub fn normalize_windows_path_with(path: &str, options: &NormalizeOptions) -> String {
    if let Some(drive) = git_bash_drive(path) {
        // Bytes 0 and 1 are ASCII, so index 2 is a char boundary.
        let rest = &path[2..];
        return format!("{}:{}", drive.to_ascii_uppercase(), forward_slashes(rest));
    }

    if starts_with_drive_letter(path) {
        let (prefix, rest) = path.split_at(2);
        let prefix = match options.native_drive_case {
            DriveCase::Preserve => prefix.to_string(),
            DriveCase::Upper => prefix.to_ascii_uppercase(),
        };
        return format!("{}{}", prefix, forward_slashes(rest));
    }

    path.to_string()
}

/// Convert a native Windows drive path into Git-Bash form (`C:\Users` -> `/c/Users`).
/// Drive-relative paths such as `C:foo` have no Git-Bash spelling and are returned unchanged.
pub fn to_git_bash_path(path: &str) -> String {
    if !starts_with_drive_letter(path) {
        return path.to_string();
    }
    let bytes = path.as_bytes();
    if bytes.len() > 2 && bytes[2] != b'/' && bytes[2] != b'\\' {
        return path.to_string();
    }
    let drive = (bytes[0] as char).to_ascii_lowercase();
    format!("/{}{}", drive, forward_slashes(&path[2..]))
}
