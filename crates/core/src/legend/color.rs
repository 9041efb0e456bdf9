/// Colour the host stores for "no stripe".
pub const EMPTY_STRIPE: &str = "#ffffff";

const CSS_COLORS: [&str; 22] = [
    "red", "green", "blue", "yellow", "orange", "purple", "pink", "cyan", "magenta", "white",
    "black", "gray", "grey", "brown", "navy", "teal", "olive", "maroon", "lime", "aqua",
    "fuchsia", "silver",
];

/// Canonical form of a host colour, or `None` when it is not a colour.
///
/// Hex colours (`#RGB`, `#RRGGBB`, `#RRGGBBAA`) come back lowercase with the
/// short form expanded, so `#FFF` and `#ffffff` compare equal. CSS names come
/// back lowercase.
pub fn normalize_color(color: &str) -> Option<String> {
    let color = color.trim();

    if let Some(hex) = color.strip_prefix('#') {
        if !matches!(hex.len(), 3 | 6 | 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let hex = hex.to_ascii_lowercase();
        if hex.len() == 3 {
            return Some(hex.chars().fold(String::from("#"), |mut out, c| {
                out.push(c);
                out.push(c);
                out
            }));
        }
        return Some(format!("#{hex}"));
    }

    let name = color.to_ascii_lowercase();
    CSS_COLORS.contains(&name.as_str()).then_some(name)
}

pub fn is_valid_color(color: &str) -> bool {
    normalize_color(color).is_some()
}

/// Whether a mapped colour should produce a stripe.
pub fn is_stripe_color(color: &str) -> bool {
    normalize_color(color).is_some_and(|color| color != EMPTY_STRIPE)
}
