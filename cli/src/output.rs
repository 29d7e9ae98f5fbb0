use colored::Colorize;
use cr_core::types::{Citation, SectionStatus};

pub fn header(title: &str) {
    println!("{}", title.bold().underline());
}

pub fn info(msg: &str) {
    eprintln!("{} {}", "info:".blue().bold(), msg);
}

pub fn warn(msg: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

pub fn citation(cite: &Citation) {
    let title = if cite.title.is_empty() {
        "Book fragment"
    } else {
        &cite.title
    };
    println!("  {} {}", "▍".dimmed(), title.bold());
    if !cite.quote.is_empty() {
        println!("    {}", cite.quote.italic());
    }
    println!(
        "    {} {}",
        cite.file.split('/').next_back().unwrap_or(&cite.file).dimmed(),
        format!("#{}", cite.anchor).dimmed()
    );
}

pub fn status_tag(status: SectionStatus) -> colored::ColoredString {
    match status {
        SectionStatus::Done => "done".green(),
        SectionStatus::Current => "current".cyan().bold(),
        SectionStatus::Pending => "pending".dimmed(),
    }
}
