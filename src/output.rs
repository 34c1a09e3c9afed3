use crate::Report;

/// Render the report as readable text: summary first, then the transcript
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    if let Some(ref summary) = report.summary {
        out.push_str("--- Summary ---\n");
        out.push_str(summary);
        out.push_str("\n\n");
    }
    out.push_str("--- Transcript ---\n");
    out.push_str(&report.transcript);
    out
}

pub fn render_json(report: &Report) -> String {
    serde_json::to_string_pretty(report).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TranscriptSource;

    fn sample_report() -> Report {
        Report {
            video_id: Some("test1234567".to_string()),
            title: Some("Test Video".to_string()),
            language: "en".to_string(),
            source: TranscriptSource::Caption,
            transcript: "Hello world This is a test".to_string(),
            summary: Some("A short test.".to_string()),
        }
    }

    #[test]
    fn test_render_text() {
        let out = render_text(&sample_report());
        assert!(out.starts_with("--- Summary ---\nA short test."));
        assert!(out.contains("--- Transcript ---\nHello world This is a test"));
    }

    #[test]
    fn test_render_text_without_summary() {
        let mut report = sample_report();
        report.summary = None;
        let out = render_text(&report);
        assert!(!out.contains("--- Summary ---"));
        assert!(out.starts_with("--- Transcript ---"));
    }

    #[test]
    fn test_render_json() {
        let out = render_json(&sample_report());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["video_id"], "test1234567");
        assert_eq!(value["source"], "Caption");
        assert_eq!(value["summary"], "A short test.");
    }
}
