/// Remove `<...>` markup from an instruction string.
///
/// Each `<` starts a tag that runs to the nearest following `>`, the same
/// span a non-greedy `<[^>]*>` match would cover. A `<` with no closing `>`
/// after it is kept verbatim. HTML entities (`&amp;`, `&nbsp;`) are left
/// undecoded.
pub fn strip_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find('<') {
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        out.push_str(&rest[..open]);
        rest = &rest[open + close + 1..];
    }

    out.push_str(rest);
    out
}
