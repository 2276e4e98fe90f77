use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Flags that may come from the command line or from a flag file.
///
/// File flags and CLI flags merge with [`ConfigFlags::union`]: booleans
/// accumulate, valued options prefer the right-hand (CLI) side.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub watch: bool,
    pub no_autoplay: bool,
    pub no_dots: bool,
    pub no_navigation: bool,
    pub autoplay_delay: Option<u64>,
    pub perf: bool,
    pub debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            watch: self.watch || other.watch,
            no_autoplay: self.no_autoplay || other.no_autoplay,
            no_dots: self.no_dots || other.no_dots,
            no_navigation: self.no_navigation || other.no_navigation,
            autoplay_delay: other.autoplay_delay.or(self.autoplay_delay),
            perf: self.perf || other.perf,
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("vitrine").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("vitrine")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("vitrine").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("vitrine")
                .join("config");
        }
    }

    PathBuf::from(".vitrinerc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".vitrinerc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# vitrine defaults (saved with --save)".to_string());
    if flags.watch {
        lines.push("--watch".to_string());
    }
    if flags.no_autoplay {
        lines.push("--no-autoplay".to_string());
    }
    if flags.no_dots {
        lines.push("--no-dots".to_string());
    }
    if flags.no_navigation {
        lines.push("--no-navigation".to_string());
    }
    if let Some(delay) = flags.autoplay_delay {
        lines.push(format!("--autoplay-delay {delay}"));
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(path) = &flags.debug_log {
        lines.push(format!("--debug-log {}", path.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--watch" {
            flags.watch = true;
        } else if token == "--no-autoplay" {
            flags.no_autoplay = true;
        } else if token == "--no-dots" {
            flags.no_dots = true;
        } else if token == "--no-navigation" {
            flags.no_navigation = true;
        } else if token == "--perf" {
            flags.perf = true;
        } else if token == "--autoplay-delay" {
            if let Some(next) = tokens.get(i + 1) {
                flags.autoplay_delay = parse_delay(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--autoplay-delay=") {
            flags.autoplay_delay = parse_delay(value);
        } else if token == "--debug-log" {
            if let Some(next) = tokens.get(i + 1) {
                flags.debug_log = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--debug-log=") {
            flags.debug_log = Some(PathBuf::from(value));
        }
        i += 1;
    }
    flags
}

// A delay of zero would disarm the timer instead of configuring it.
fn parse_delay(s: &str) -> Option<u64> {
    s.parse::<u64>().ok().filter(|ms| *ms > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = vec![
            "vitrine".to_string(),
            "--watch".to_string(),
            "--no-dots".to_string(),
            "--autoplay-delay".to_string(),
            "4000".to_string(),
            "--debug-log=events.log".to_string(),
            "--no-navigation".to_string(),
            "deck.json".to_string(),
        ];
        let flags = parse_flag_tokens(&args);
        assert!(flags.watch);
        assert!(flags.no_dots);
        assert!(flags.no_navigation);
        assert_eq!(flags.autoplay_delay, Some(4000));
        assert_eq!(flags.debug_log, Some(PathBuf::from("events.log")));
    }

    #[test]
    fn test_zero_delay_token_is_dropped() {
        let args = vec!["--autoplay-delay=0".to_string()];
        let flags = parse_flag_tokens(&args);
        assert_eq!(flags.autoplay_delay, None);
    }

    #[test]
    fn test_config_union_merges_cli_over_file_for_options() {
        let file = ConfigFlags {
            watch: true,
            autoplay_delay: Some(3000),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            no_dots: true,
            autoplay_delay: Some(6000),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.watch);
        assert!(merged.no_dots);
        assert_eq!(merged.autoplay_delay, Some(6000));
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".vitrinerc");
        let flags = ConfigFlags {
            watch: true,
            no_autoplay: true,
            no_dots: true,
            no_navigation: true,
            autoplay_delay: Some(2500),
            perf: true,
            debug_log: Some(PathBuf::from("events.log")),
        };

        save_config_flags(&path, &flags).unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded, flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
    }
}
