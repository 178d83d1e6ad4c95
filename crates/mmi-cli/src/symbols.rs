//! `symbols` command.

use std::fmt::Write as _;

use mmi_core::{Symbol, SymbolDirectory};

pub(crate) fn run_symbols(directory: &SymbolDirectory, search: Option<&str>, limit: usize) {
    let rows = directory.search(search.unwrap_or_default(), limit);
    if rows.is_empty() {
        println!(
            "no symbols found{}",
            search.map(|q| format!(" matching '{q}'")).unwrap_or_default()
        );
        return;
    }
    print!("{}", format_symbols(&rows));
}

pub(crate) fn format_symbols(rows: &[&Symbol]) -> String {
    let mut out = format!("{:<10}NAME\n", "TICKER");
    for symbol in rows {
        let _ = writeln!(out, "{:<10}{}", symbol.ticker, symbol.name);
    }
    out
}
