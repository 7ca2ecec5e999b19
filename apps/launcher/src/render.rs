//! Plain-text rendering of a ladder snapshot.

use std::fmt::Write as _;

use ladder_bridge::{CharacterRole, LadderModel, LadderSnapshot};

const WIDTHS: [(CharacterRole, usize); 6] = [
    (CharacterRole::Rank, 5),
    (CharacterRole::Name, 20),
    (CharacterRole::Class, 12),
    (CharacterRole::Level, 5),
    (CharacterRole::Experience, 12),
    (CharacterRole::Status, 8),
];

pub fn render_ladder(snapshot: &LadderSnapshot) -> String {
    let mut out = String::new();
    let mode = snapshot
        .displayed_mode
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "-".to_string());
    let _ = writeln!(out, "ladder: {mode} ({} characters)", snapshot.model.row_count());
    if let Some(updated_at) = snapshot.updated_at {
        let _ = writeln!(out, "updated: {}", updated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    }

    let header: Vec<String> = WIDTHS
        .iter()
        .map(|&(role, width)| format!("{:<width$}", role.name().to_ascii_uppercase()))
        .collect();
    let _ = writeln!(out, "{}", header.join(" ").trim_end());

    render_rows(&snapshot.model, &mut out);
    out
}

fn render_rows(model: &LadderModel, out: &mut String) {
    for row in 0..model.row_count() {
        let cells: Vec<String> = WIDTHS
            .iter()
            .map(|&(role, width)| {
                let value = model.data(row, role).unwrap_or_else(|| "-".to_string());
                format!("{value:<width$}")
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join(" ").trim_end());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::{CharacterRecord, LadderMode};

    #[test]
    fn renders_rows_in_model_order() {
        let snapshot = LadderSnapshot {
            generation: 1,
            loading: false,
            error: None,
            model: LadderModel::new(vec![
                CharacterRecord {
                    class: Some("amazon".into()),
                    level: Some(95),
                    ..CharacterRecord::new(1, "Javazon")
                },
                CharacterRecord::new(2, "Nobody"),
            ]),
            requested_mode: Some(LadderMode::from("1v1")),
            displayed_mode: Some(LadderMode::from("1v1")),
            updated_at: None,
        };

        let rendered = render_ladder(&snapshot);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "ladder: 1v1 (2 characters)");
        assert!(lines[1].starts_with("RANK"));
        assert!(lines[2].starts_with("1     Javazon"));
        assert!(lines[2].contains("amazon"));
        assert!(lines[3].starts_with("2     Nobody"));
        assert_eq!(lines.len(), 4);
    }
}
