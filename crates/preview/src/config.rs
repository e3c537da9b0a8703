use std::path::PathBuf;

/// Preview configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewConfig {
    /// Stored structure to load. `None` previews an empty structure.
    pub structure_path: Option<PathBuf>,
    /// Run structural cleanup before composing the preview (default: `true`).
    pub normalize: bool,
    /// Pretty-print the JSON output (default: `true`).
    pub pretty: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            structure_path: None,
            normalize: true,
            pretty: true,
        }
    }
}

impl PreviewConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default |
    /// |------------------------|---------|
    /// | `EMAIL_STRUCTURE_PATH` | --      |
    /// | `PREVIEW_NORMALIZE`    | `true`  |
    /// | `PREVIEW_PRETTY`       | `true`  |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            structure_path: lookup("EMAIL_STRUCTURE_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            normalize: parse_flag(lookup("PREVIEW_NORMALIZE"), defaults.normalize),
            pretty: parse_flag(lookup("PREVIEW_PRETTY"), defaults.pretty),
        }
    }

    /// A path given on the command line wins over the environment.
    pub fn with_path_arg(self, arg: Option<String>) -> Self {
        match arg {
            Some(path) => Self {
                structure_path: Some(PathBuf::from(path)),
                ..self
            },
            None => self,
        }
    }
}

fn parse_flag(value: Option<String>, default: bool) -> bool {
    match value.as_deref().map(str::trim) {
        Some("1") | Some("true") | Some("yes") | Some("on") => true,
        Some("0") | Some("false") | Some("no") | Some("off") => false,
        Some(other) => {
            tracing::warn!(value = other, default, "Unrecognised flag value, using default");
            default
        }
        None => default,
    }
}
