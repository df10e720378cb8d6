//! User-facing console output.
//!
//! Colored prefixes when stdout is a TTY, plain text otherwise. Summaries go
//! to stdout so they can be scripted against; notices and alerts go to stderr.

use owo_colors::OwoColorize;

use crate::report::Notice;

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Plain line without prefix.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

/// One warning per per-item failure.
pub fn print_notices(notices: &[Notice]) {
    for n in notices {
        print_warn(&n.to_string());
    }
}

/// Multi-line alert, e.g. the folder conflict list.
pub fn print_alert(alert: &str) {
    if is_tty() {
        eprintln!("{}", alert.yellow());
    } else {
        eprintln!("{}", alert);
    }
}
