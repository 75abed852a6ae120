//! Console rendering of a pi approximation against a reference expansion.

use colored::Colorize;

use crate::reference::{matching_digits, matching_prefix_len};

/// Template used when none is given. `{pi}` is the rendered value, `{mdigit}` the
/// number of matching decimal places.
pub const DEFAULT_TEMPLATE: &str = "π = {pi} ({mdigit} digits match)";

/// Fills `template` with `computed` and its digit agreement with `reference`.
///
/// With `colorize` set, the prefix of `computed` that agrees with `reference` is
/// printed red.
pub fn render(computed: &str, reference: &str, template: &str, colorize: bool) -> String {
    let matched = matching_prefix_len(computed, reference);
    let (head, tail) = computed.split_at(matched);
    let pi = if colorize {
        format!("{}{}", head.red(), tail)
    } else {
        computed.to_string()
    };
    template
        .replace("{pi}", &pi)
        .replace("{mdigit}", &matching_digits(computed, reference).to_string())
}
