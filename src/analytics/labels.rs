//! Display labels for the dashboard breakdowns.

/// `8-ball` -> `8 BALL`, `free-training` -> `FREE TRAINING`
pub fn game_type_label(value: &str) -> String {
    value.replace('-', " ").to_uppercase()
}

/// `pocketed` -> `Pocketed`
pub fn outcome_label(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `out_of_line` -> `OUT OF LINE`, `3/8` -> `3/8`
pub fn category_label(value: &str) -> String {
    value.replace(['_', '-'], " ").to_uppercase()
}
