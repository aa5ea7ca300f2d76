use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Kebab-case, accent-free file stem for a recipe title.
///
/// "Crème Brûlée (Mum's)" becomes "creme-brulee-mums".
pub fn from_title(title: &str) -> String {
    let unaccented: String = title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect::<String>()
        .to_lowercase()
        .replace('\'', "");

    let mut stem = String::with_capacity(unaccented.len());
    let mut pending_dash = false;
    for c in unaccented.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !stem.is_empty() {
                stem.push('-');
            }
            pending_dash = false;
            stem.push(c);
        } else {
            pending_dash = true;
        }
    }
    stem
}
