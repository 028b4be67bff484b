/// Splits a block of text into URLs, one per line.
/// Lines are trimmed and blank lines dropped; order is kept.
pub fn parse_url_block(block: &str) -> Vec<String> {
    block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
