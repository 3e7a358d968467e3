//! Help rendering configuration

/// Environment variable overriding the help width
pub const WIDTH_ENV: &str = "ARGPARSE_HELP_WIDTH";

/// Layout settings for usage and help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpConfig {
    /// Column at which usage and help text wraps
    pub width: usize,

    /// Collapse options into `[options]` in the usage line
    pub short_usage: bool,
}

impl Default for HelpConfig {
    fn default() -> Self {
        Self {
            width: 80,
            short_usage: false,
        }
    }
}

impl HelpConfig {
    /// Narrowest width accepted; smaller values are clamped up
    pub const MIN_WIDTH: usize = 20;

    /// Load configuration from the environment, merging in priority order
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Terminal width as reported by the shell
        // 3. Explicit override
        for key in ["COLUMNS", WIDTH_ENV] {
            let Some(raw) = lookup(key) else {
                continue;
            };
            match raw.trim().parse::<usize>() {
                Ok(width) if width > 0 => config = config.width(width),
                _ => tracing::debug!(key, value = %raw, "ignoring invalid help width"),
            }
        }

        config
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = width.max(Self::MIN_WIDTH);
        self
    }

    pub fn short_usage(mut self, short_usage: bool) -> Self {
        self.short_usage = short_usage;
        self
    }
}
