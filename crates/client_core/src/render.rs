//! Result rendering: qualifying list in, render descriptor out.

use std::fmt;

pub const VS_CONNECTOR: &str = "vs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryStyle {
    /// Per-entity treatment selected by a sanitized key.
    Keyed(String),
    Generic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    pub label: String,
    pub style: EntryStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultNote {
    SingleQualifier,
    NoQualifier,
    MultipleScenarios,
}

impl ResultNote {
    pub fn text(self) -> &'static str {
        match self {
            ResultNote::SingleQualifier => "Only one team qualifies under these conditions.",
            ResultNote::NoQualifier => {
                "No teams qualify for the championship under these conditions."
            }
            ResultNote::MultipleScenarios => "Multiple scenarios possible.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub entries: Vec<ResultEntry>,
    pub connector: Option<String>,
    pub note: Option<ResultNote>,
}

/// Replaces every character that is not an ASCII letter or digit with `_`.
pub fn style_key(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

pub fn render_results(qualifiers: &[String]) -> ResultView {
    let generic = |label: &String| ResultEntry {
        label: label.clone(),
        style: EntryStyle::Generic,
    };

    match qualifiers {
        [] => ResultView {
            entries: Vec::new(),
            connector: None,
            note: Some(ResultNote::NoQualifier),
        },
        [only] => ResultView {
            entries: vec![generic(only)],
            connector: None,
            note: Some(ResultNote::SingleQualifier),
        },
        [first, second] => ResultView {
            entries: [first, second]
                .into_iter()
                .map(|label| ResultEntry {
                    label: label.clone(),
                    style: EntryStyle::Keyed(style_key(label)),
                })
                .collect(),
            connector: Some(VS_CONNECTOR.to_string()),
            note: None,
        },
        many => ResultView {
            entries: many.iter().map(generic).collect(),
            connector: None,
            note: Some(ResultNote::MultipleScenarios),
        },
    }
}

impl fmt::Display for ResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.connector, self.entries.as_slice()) {
            (Some(connector), [left, right]) => {
                writeln!(f, "{} {connector} {}", left.label, right.label)?;
            }
            _ => {
                for entry in &self.entries {
                    writeln!(f, "{}", entry.label)?;
                }
            }
        }
        if let Some(note) = self.note {
            writeln!(f, "{}", note.text())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|label| label.to_string()).collect()
    }

    #[test]
    fn two_qualifiers_render_as_keyed_matchup() {
        let view = render_results(&labels(&["TAMU", "BAMA"]));
        assert_eq!(view.connector.as_deref(), Some("vs"));
        assert_eq!(view.note, None);
        assert_eq!(
            view.entries,
            vec![
                ResultEntry {
                    label: "TAMU".into(),
                    style: EntryStyle::Keyed("TAMU".into()),
                },
                ResultEntry {
                    label: "BAMA".into(),
                    style: EntryStyle::Keyed("BAMA".into()),
                },
            ]
        );
        assert_eq!(view.to_string(), "TAMU vs BAMA\n");
    }

    #[test]
    fn style_key_replaces_punctuation_and_spaces() {
        assert_eq!(style_key("Ole Miss!"), "Ole_Miss_");
        assert_eq!(style_key("Texas A&M"), "Texas_A_M");
        assert_eq!(style_key("uga"), "uga");
    }

    #[test]
    fn single_qualifier_gets_note() {
        let view = render_results(&labels(&["Georgia"]));
        assert_eq!(view.entries.len(), 1);
        assert_eq!(view.entries[0].style, EntryStyle::Generic);
        assert_eq!(view.note, Some(ResultNote::SingleQualifier));
    }

    #[test]
    fn empty_list_renders_no_qualifier_note() {
        let view = render_results(&[]);
        assert!(view.entries.is_empty());
        assert_eq!(view.note, Some(ResultNote::NoQualifier));
        assert_eq!(
            view.to_string(),
            "No teams qualify for the championship under these conditions.\n"
        );
    }

    #[test]
    fn many_qualifiers_render_generic_entries() {
        let view = render_results(&labels(&["A", "B", "C", "D", "E"]));
        assert_eq!(view.entries.len(), 5);
        assert!(view
            .entries
            .iter()
            .all(|entry| entry.style == EntryStyle::Generic));
        assert_eq!(view.connector, None);
        assert_eq!(view.note, Some(ResultNote::MultipleScenarios));
    }
}
