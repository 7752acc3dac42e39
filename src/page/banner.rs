use crossterm::style::Stylize;

// ============================================================================
// STARTUP BANNER
// ============================================================================

pub const BANNER_TITLE: &str = "LLM Feed Optimizer - Admin";
pub const BANNER_SUBTITLE: &str = "Ready to optimize your product feeds";

pub fn banner_lines() -> [String; 2] {
    [
        format!("{}", BANNER_TITLE.bold().cyan()),
        format!("{}", BANNER_SUBTITLE.dark_grey()),
    ]
}

/// Write the banner to stderr so command output on stdout stays clean.
pub fn print_banner() {
    for line in banner_lines() {
        eprintln!("{line}");
    }
}
