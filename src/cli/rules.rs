//! Rules command - list the built-in rules

use console::style;
use gocheck::rules::all_rules;

pub fn run() {
    let rules = all_rules();
    let width = rules.iter().map(|r| r.name().len()).max().unwrap_or(0);

    for rule in &rules {
        println!(
            "{}  {}",
            style(format!("{:<width$}", rule.name())).bold(),
            rule.description()
        );
    }
}
