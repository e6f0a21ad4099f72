use colored::Colorize;

use crate::app::App;

/// Prints the virtual files in set order. Shadowed duplicates (names that
/// `readfile` will never resolve to) are dimmed.
pub fn list(app: &App) -> bool {
    let records = app.bridge.files().records();
    if records.is_empty() {
        println!("{}", "(no files)".bright_black());
        return true;
    }

    let mut seen = std::collections::HashSet::new();
    for record in &records {
        let line = format!("{:<24} {:>6} bytes", record.name, record.content.len());
        if seen.insert(record.name.as_str()) {
            println!("{}", line);
        } else {
            println!("{}", format!("{} (shadowed)", line).bright_black());
        }
    }
    true
}
