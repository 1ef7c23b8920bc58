use colored::{ColoredString, Colorize};
use indicatif::ProgressBar;
use std::time::Duration;

use crate::config::Theme;
use crate::deliver::DeliverySummary;
use crate::wire::PromptRequest;

fn accent(s: &str, theme: Theme) -> ColoredString {
    match theme {
        Theme::Light => s.blue().bold(),
        Theme::Dark => s.bright_magenta().bold(),
    }
}

/// Transient success notification, the toast analog.
pub fn notify_success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

pub fn notify_error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg.red());
}

/// Spinner shown while the provider call is in flight.
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// The Code tab: print the current artifact between accented rails.
pub fn print_code(html: &str, theme: Theme) {
    println!("\n{}", accent("=== CODE ===", theme));
    println!("{}", html);
    println!("{}", accent("=== END ===", theme));
}

pub fn print_summary_dashboard(sum: &DeliverySummary, req: &PromptRequest, bytes: usize, theme: Theme) {
    println!(
        "\n{}",
        accent("┏━━━━━━━━━━━━━━━━━━━━━━ Generation ━━━━━━━━━━━━━━━━━━━━━━┓", theme)
    );
    println!(
        "  {}: {}   {}: {}B   {}: {}",
        "Framework".bold(),
        req.framework,
        "Artifact".bold(),
        bytes,
        "Tx".bold(),
        req.transaction.id
    );
    println!(
        "  {}: {}   {}: {}   {}: {}",
        "Copied".green().bold(),
        if sum.copied { "yes" } else { "no" },
        "Saved".yellow().bold(),
        match &sum.saved {
            Some((path, n)) => format!("{} ({}B)", path.display(), n),
            None => "no".to_string(),
        },
        "Previews".cyan().bold(),
        sum.previews.len()
    );
    println!(
        "{}",
        accent("┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛", theme)
    );
}
