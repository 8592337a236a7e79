//! Expand `ROLE_FILE: <path>` directives in a prompt with the referenced file's contents.

use std::path::{Path, PathBuf};

use anyhow::Context;
use regex::Regex;
use tokio::fs;

use crate::types::{NormalizeOptions, RoleInjection, WrapperConfig};
use crate::utils::platform::home_dir;
use crate::utils::{normalize_windows_path_with, Platform};

pub struct RoleFileInjector {
    directive: Regex,
    platform: Platform,
    options: NormalizeOptions,
    home: Option<PathBuf>,
}

impl RoleFileInjector {
    pub fn new(config: &WrapperConfig, platform: Platform) -> anyhow::Result<Self> {
        let directive = config.role_directive.trim();
        // `ROLE_FILE:` may touch its path; `@role` must not match `@roleplay`.
        let separator = match directive.chars().last() {
            Some(c) if c.is_alphanumeric() || c == '_' => r"\s+",
            _ => r"\s*",
        };
        let pattern = format!(
            r"^\s*{}{}(\S.*?)\s*$",
            regex::escape(directive),
            separator
        );
        let directive = Regex::new(&pattern)
            .with_context(|| format!("invalid role directive {:?}", config.role_directive))?;
        Ok(Self {
            directive,
            platform,
            options: config.normalize_options(),
            home: home_dir(),
        })
    }

    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    /// Path a directive refers to, as it should be opened on this platform.
    pub fn resolve(&self, raw: &str) -> PathBuf {
        resolve_role_path(raw, &self.platform, &self.options, self.home.as_deref())
    }

    /// Replace every directive line with the contents of its file.
    /// Lines whose file cannot be read are kept verbatim and reported as unresolved.
    pub async fn inject(&self, prompt: &str) -> RoleInjection {
        let mut result = RoleInjection::default();
        let mut out = String::with_capacity(prompt.len());

        for line in prompt.split_inclusive('\n') {
            let body = line.trim_end_matches(['\r', '\n']);
            let ending = &line[body.len()..];

            let Some(raw) = self.directive.captures(body).and_then(|c| c.get(1)) else {
                out.push_str(line);
                continue;
            };
            let raw = raw.as_str();
            let path = self.resolve(raw);

            match fs::read_to_string(&path).await {
                Ok(content) => {
                    log::debug!("Injected role file {}", path.display());
                    out.push_str(content.trim_end_matches(['\r', '\n']));
                    out.push_str(ending);
                    result.injected.push(path);
                }
                Err(err) => {
                    log::warn!("Could not read role file {}: {}", path.display(), err);
                    out.push_str(line);
                    result.unresolved.push(raw.to_string());
                }
            }
        }

        result.prompt = out;
        result
    }

    /// Read a prompt from disk and inject its directives.
    pub async fn inject_file(&self, prompt_path: &Path) -> anyhow::Result<RoleInjection> {
        let prompt = fs::read_to_string(prompt_path)
            .await
            .with_context(|| format!("failed to read prompt {}", prompt_path.display()))?;
        Ok(self.inject(&prompt).await)
    }
}

/// Turn a directive argument into a filesystem path.
///
/// Surrounding quotes are dropped and a leading `~` is expanded against `home`.
/// On Windows the result is normalized so Git-Bash paths like `/c/Users/..` open correctly.
pub fn resolve_role_path(
    raw: &str,
    platform: &Platform,
    options: &NormalizeOptions,
    home: Option<&Path>,
) -> PathBuf {
    let trimmed = strip_quotes(raw.trim());

    let expanded = match (home, tilde_rest(trimmed)) {
        (Some(home), Some(rest)) if rest.is_empty() => home.to_path_buf(),
        (Some(home), Some(rest)) => home.join(rest),
        _ => PathBuf::from(trimmed),
    };

    if platform.is_windows() {
        PathBuf::from(normalize_windows_path_with(
            &expanded.to_string_lossy(),
            options,
        ))
    } else {
        expanded
    }
}

fn strip_quotes(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// `~` -> `""`, `~/x` or `~\x` -> `"x"`, anything else -> None.
fn tilde_rest(s: &str) -> Option<&str> {
    let rest = s.strip_prefix('~')?;
    if rest.is_empty() {
        return Some(rest);
    }
    rest.strip_prefix('/').or_else(|| rest.strip_prefix('\\'))
}
