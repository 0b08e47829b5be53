//! Console rendering.
//!
//! Every method returns the text to print; nothing here writes to the
//! terminal or reads global color state. The output depends only on the
//! `color` flag, so escapes are written directly instead of through
//! `colored`'s environment-aware `Display`.

use colored::Color;

use crate::config::IpVersion;
use crate::{AsnMatches, PrefixSet};

/// Default banner width in columns.
pub const BANNER_WIDTH: usize = 65;

/// Renders lookup results for a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Console {
    color: bool,
}

impl Console {
    /// Create a renderer; `color` enables ANSI escapes.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            format!("\x1b[1;{}m{}\x1b[0m", color.to_fg_str(), text)
        } else {
            text.to_string()
        }
    }

    /// Section banner: a blank line, then the title centered in a box of
    /// asterisks.
    pub fn banner(&self, title: &str) -> String {
        let width = BANNER_WIDTH;
        let padding = width.saturating_sub(title.chars().count() + 4);
        let left = padding / 2;
        let right = padding - left;

        let rule = "*".repeat(width);
        let boxed = format!(
            "{rule}\n**{}{title}{}**\n{rule}",
            " ".repeat(left),
            " ".repeat(right)
        );
        format!("\n{}", self.paint(&boxed, Color::Yellow))
    }

    /// One `asn: organization` line per match.
    pub fn matches(&self, matches: &AsnMatches) -> String {
        matches
            .iter()
            .map(|(asn, org)| format!("  {} {}", self.paint(&format!("{}:", asn), Color::Green), org))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Prefix listing for every matched ASN, in match order.
    pub fn prefixes(&self, version: IpVersion, matches: &AsnMatches, prefixes: &PrefixSet) -> String {
        let mut out = String::new();

        for asn in matches.asns() {
            let blocks = prefixes.sorted_strings(asn.as_str());
            if blocks.is_empty() {
                let line = format!("No {} prefixes found for AS{}.", version, asn);
                out.push_str(&format!("\n  {}\n", self.paint(&line, Color::Red)));
                continue;
            }

            let header = format!("{} Prefixes announced by AS{}:", version, asn);
            out.push_str(&format!("\n  {}\n", self.paint(&header, Color::Green)));
            for block in blocks {
                out.push_str(&format!("    {}\n", block));
            }
        }

        out
    }

    /// Progress or completion message.
    pub fn notice(&self, message: &str) -> String {
        self.paint(message, Color::Yellow)
    }

    /// Failure message.
    pub fn error(&self, message: &str) -> String {
        self.paint(message, Color::Red)
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::sample_records;
    use crate::{collapse, Matcher};

    #[test]
    fn test_banner_plain() {
        let console = Console::new(false);
        let banner = console.banner("Matched ASNs for 'acme'");
        let lines: Vec<&str> = banner.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "*".repeat(65));
        assert_eq!(lines[2].chars().count(), 65);
        assert!(lines[2].starts_with("**"));
        assert!(lines[2].ends_with("**"));
        assert_eq!(lines[2].trim_matches('*').trim(), "Matched ASNs for 'acme'");
        assert_eq!(lines[3], lines[1]);
    }

    #[test]
    fn test_banner_centering() {
        let console = Console::new(false);
        // 65 - 4 - 5 = 56 spaces split 28/28
        let banner = console.banner("title");
        assert_eq!(
            banner.lines().nth(2).unwrap(),
            format!("**{}title{}**", " ".repeat(28), " ".repeat(28))
        );
    }

    #[test]
    fn test_banner_long_title() {
        let console = Console::new(false);
        let title = "x".repeat(80);
        let banner = console.banner(&title);
        assert_eq!(banner.lines().nth(2).unwrap(), format!("**{}**", title));
    }

    #[test]
    fn test_matches_plain() {
        let matches = Matcher::new("acme").unwrap().find(&sample_records());
        assert_eq!(
            Console::new(false).matches(&matches),
            "  100: ACME Inc\n  200: Acme Widgets\n  300: ACME Labs"
        );
    }

    #[test]
    fn test_prefixes_plain() {
        let records = sample_records();
        let matches = Matcher::new("acme").unwrap().find(&records);
        let v4 = collapse(&records[..3], matches.asns());

        let text = Console::new(false).prefixes(IpVersion::V4, &matches, &v4);
        assert_eq!(
            text,
            "\n  IPv4 Prefixes announced by AS100:\n    1.0.0.0/30\n\
             \n  IPv4 Prefixes announced by AS200:\n    2.0.0.0/24\n\
             \n  No IPv4 prefixes found for AS300.\n"
        );
    }

    #[test]
    fn test_colored_output_uses_escapes() {
        let console = Console::new(true);
        assert_eq!(console.notice("Downloading"), "\x1b[1;33mDownloading\x1b[0m");
        assert_eq!(console.error("failed"), "\x1b[1;31mfailed\x1b[0m");
        assert!(console.matches(&Matcher::new("widgets").unwrap().find(&sample_records()))
            .contains("\x1b[1;32m200:\x1b[0m"));
    }

    #[test]
    fn test_plain_output_has_no_escapes() {
        let console = Console::new(false);
        assert_eq!(console.notice("plain"), "plain");
        assert!(!console.banner("title").contains('\u{1b}'));
    }
}
