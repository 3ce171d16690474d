use super::session_manager::{SessionSnapshot, TurnRole};
use anyhow::{Context, anyhow};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use uuid::Uuid;

const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const TOP: f64 = 270.0;
const BOTTOM: f64 = 20.0;
const LINE_HEIGHT: f64 = 6.0;
const WRAP_AT: usize = 90;

/// A line of the transcript and whether it is set in bold.
type Line = (String, bool);

/// The built-in fonts are used without an encoding table; non-ASCII becomes '?'.
fn printable(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '?' })
        .collect()
}

/// Greedy word wrap; words longer than the width are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word = word.to_string();
        while word.len() > width {
            let rest = word.split_off(width);
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word);
            word = rest;
        }
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn transcript_lines(snapshot: &SessionSnapshot) -> Vec<Line> {
    let config = &snapshot.config;
    let mut lines: Vec<Line> = vec![
        (
            format!(
                "{} | {} | {} | Role: {}",
                config.grade_level,
                config.subject,
                config.material_type.label(),
                config.role.label()
            ),
            false,
        ),
        (String::new(), false),
    ];
    for turn in &snapshot.history {
        let speaker = match turn.role {
            TurnRole::User => "You",
            TurnRole::Assistant => "Assistant",
        };
        lines.push((format!("{speaker}:"), true));
        for paragraph in printable(&turn.text).lines() {
            for line in wrap(paragraph, WRAP_AT) {
                lines.push((line, false));
            }
        }
        lines.push((String::new(), false));
    }
    lines
}

/// Writes the session's transcript to `<export_dir>/<session_id>.pdf` and
/// returns the public path it is served under.
pub async fn export_transcript_pdf(export_dir: &Path, snapshot: &SessionSnapshot) -> anyhow::Result<String> {
    tokio::fs::create_dir_all(export_dir)
        .await
        .with_context(|| format!("creating {}", export_dir.display()))?;

    // The file name comes from the parsed id so it can never leave `export_dir`.
    let id = Uuid::parse_str(&snapshot.session_id)
        .with_context(|| format!("session id {:?} is not a uuid", snapshot.session_id))?;
    let file_path = export_dir.join(format!("{id}.pdf"));
    let relative_path = format!("/exports/{id}.pdf");
    let session_id = id.to_string();
    let lines = transcript_lines(snapshot);

    // Run PDF generation in a blocking task (CPU intensive)
    tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
        let (doc, page1, layer1) =
            PdfDocument::new("Chat Transcript", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| anyhow!("loading font: {e:?}"))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| anyhow!("loading font: {e:?}"))?;

        let mut layer = doc.get_page(page1).get_layer(layer1);
        let mut y = TOP;

        layer.use_text("Classroom Chat Transcript", 20.0, Mm(20.0), Mm(y), &font_bold);
        y -= 12.0;

        for (text, bold) in lines {
            if y < BOTTOM {
                let (page, page_layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
                layer = doc.get_page(page).get_layer(page_layer);
                y = TOP;
            }
            if !text.is_empty() {
                let face = if bold { &font_bold } else { &font };
                layer.use_text(text, 10.0, Mm(20.0), Mm(y), face);
            }
            y -= LINE_HEIGHT;
        }

        layer.use_text(format!("Session ID: {session_id}"), 8.0, Mm(20.0), Mm(10.0), &font);

        let file = File::create(&file_path)
            .with_context(|| format!("creating {}", file_path.display()))?;
        let mut writer = BufWriter::new(file);
        doc.save(&mut writer)
            .map_err(|e| anyhow!("writing pdf: {e:?}"))?;
        Ok(())
    })
    .await
    .context("pdf export task failed")??;

    Ok(relative_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::session_config::SessionConfig;
    use crate::services::session_manager::Turn;

    #[test]
    fn wraps_long_text() {
        let text = "word ".repeat(40);
        let lines = wrap(text.trim(), 20);
        assert!(lines.iter().all(|l| l.len() <= 20));
        assert_eq!(lines.join(" "), text.trim());
        assert_eq!(wrap("", 20), vec![String::new()]);
        assert_eq!(wrap(&"x".repeat(25), 10).len(), 3);
    }

    #[test]
    fn replaces_unprintable_characters() {
        assert_eq!(printable("Hi 😊"), "Hi ?");
    }

    #[tokio::test]
    async fn writes_pdf_file() {
        let dir = std::env::temp_dir().join(format!("transcripts-{}", Uuid::new_v4()));
        let id = Uuid::new_v4();
        let snapshot = SessionSnapshot {
            session_id: id.to_string(),
            config: SessionConfig::default(),
            history: (0..60)
                .map(|i| Turn {
                    role: if i % 2 == 0 { TurnRole::User } else { TurnRole::Assistant },
                    text: format!("message number {i}\nsecond line"),
                })
                .collect(),
        };

        let url = export_transcript_pdf(&dir, &snapshot).await.unwrap();
        assert_eq!(url, format!("/exports/{id}.pdf"));
        let bytes = std::fs::read(dir.join(format!("{id}.pdf"))).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn refuses_non_uuid_session_ids() {
        let root = std::env::temp_dir().join(format!("transcripts-{}", Uuid::new_v4()));
        let dir = root.join("exports");
        let snapshot = SessionSnapshot {
            session_id: "../escaped".to_string(),
            config: SessionConfig::default(),
            history: Vec::new(),
        };

        assert!(export_transcript_pdf(&dir, &snapshot).await.is_err());
        assert!(!root.join("escaped.pdf").exists());
        std::fs::remove_dir_all(root).ok();
    }
}
