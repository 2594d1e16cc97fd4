/// Splits the comma separated symbol input, trimming whitespace and dropping
/// blanks and repeats. Order of first appearance is kept.
pub fn normalize_symbols(input: &str) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();

    for raw in input.split(',') {
        let symbol = normalize_symbol(raw);
        if symbol.is_empty() || symbols.contains(&symbol) {
            continue;
        }
        symbols.push(symbol);
    }

    symbols
}

pub fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_uppercase()
}
