use eframe::egui::Color32;
use shared::domain::Outcome;

pub const GENERIC_ENTRY: Color32 = Color32::from_rgb(51, 65, 85);
pub const NOTE_TEXT: Color32 = Color32::from_gray(102);
pub const ERROR_TEXT: Color32 = Color32::from_rgb(185, 28, 28);
pub const ENTRY_TEXT: Color32 = Color32::WHITE;

/// Crest color for a sanitized entity label.
pub fn championship_color(style_key: &str) -> Option<Color32> {
    match style_key {
        "Texas_A_M" => Some(Color32::from_rgb(80, 0, 0)),
        "Alabama" => Some(Color32::from_rgb(158, 27, 50)),
        "Georgia" => Some(Color32::from_rgb(186, 12, 47)),
        "Ole_Miss" => Some(Color32::from_rgb(20, 33, 61)),
        _ => None,
    }
}

pub fn entry_fill(style_key: Option<&str>) -> Color32 {
    style_key
        .and_then(championship_color)
        .unwrap_or(GENERIC_ENTRY)
}

pub fn outcome_caption(outcome: &Outcome) -> String {
    let mut chars = outcome.as_str().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use client_core::style_key;

    use super::*;

    #[test]
    fn known_labels_map_to_crest_colors() {
        assert!(championship_color(&style_key("Texas A&M")).is_some());
        assert!(championship_color(&style_key("Ole Miss")).is_some());
        assert_eq!(entry_fill(Some("Vanderbilt")), GENERIC_ENTRY);
        assert_eq!(entry_fill(None), GENERIC_ENTRY);
    }

    #[test]
    fn captions_capitalize_outcome_labels() {
        assert_eq!(outcome_caption(&Outcome::win()), "Win");
        assert_eq!(outcome_caption(&Outcome::loss()), "Loss");
        assert_eq!(outcome_caption(&Outcome::from("")), "");
    }
}
