use console::style;
use serde::Serialize;
use std::path::Path;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

/// Echo a command before it runs.
pub fn print_command(command: &str) {
    println!("\n{}", style(command).white().bold());
}

pub fn print_cancelled() {
    println!("{}", style("cancelled").dim());
}

const HIGHLIGHTS: &[&str] = &["/opt/homebrew"];

/// Shorten `$HOME` to `~` and highlight well-known prefixes.
pub fn colorize_path(location: &str, home: Option<&Path>) -> String {
    if let Some(home) = home {
        let short = gcp_core::paths::tilde(location, home);
        if short != location {
            return style(short).bright().white().to_string();
        }
    }
    let mut out = location.to_string();
    for h in HIGHLIGHTS {
        if out.contains(h) {
            out = out.replace(h, &style(h).cyan().to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colorize_path_plain_text() {
        console::set_colors_enabled(false);
        let home = Path::new("/home/me");
        assert_eq!(colorize_path("/home/me/.cargo/bin", Some(home)), "~/.cargo/bin");
        assert_eq!(colorize_path("/opt/homebrew/bin", Some(home)), "/opt/homebrew/bin");
        assert_eq!(colorize_path("/usr/bin", None), "/usr/bin");
    }
}
