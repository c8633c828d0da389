use colored::*;

use crate::terminal::print;

const LOGO: &str = r#"
                 ___  ___ ___  _ __  _ __
                / __|/ __/ _ \| '_ \| '__|
                \__ \ (_| (_) | |_) | |
                |___/\___\___/| .__/|_|
                              |_|
"#;

pub fn print() {
    for line in LOGO.lines().filter(|line| !line.trim().is_empty()) {
        print::print(&format!("{}", line.bright_green()));
    }
}
