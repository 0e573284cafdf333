//! Report rendering: JSON, HTML and Markdown.

use infraudit_core::compliance::ComplianceReport;
use infraudit_core::diff::{Change, ChangeCounts, ChangeRecord};
use std::fmt::Write as _;

/// Pretty-printed JSON of any serializable result
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Standalone HTML compliance report
pub fn report_html(report: &ComplianceReport) -> String {
    let mut violations = String::new();
    for group in &report.violations {
        let _ = write!(
            violations,
            "    <div class=\"violation\">\n      <h3>{}: {}</h3>\n      <ul>\n",
            escape_html(&group.resource_type),
            escape_html(&group.resource_id)
        );
        for v in &group.violations {
            let _ = writeln!(
                violations,
                "        <li class=\"{}\">{}: {}</li>",
                v.severity,
                escape_html(&v.rule),
                escape_html(&v.description)
            );
        }
        violations.push_str("      </ul>\n    </div>\n");
    }
    if report.violations.is_empty() {
        violations.push_str("    <p>No violations.</p>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Infrastructure Compliance Report</title>
  <style>
    body {{ font-family: Arial, sans-serif; margin: 20px; }}
    .summary {{ margin: 20px 0; }}
    .violation {{ margin: 10px 0; padding: 10px; border: 1px solid #ddd; }}
    .high {{ color: red; }}
    .medium {{ color: orange; }}
    .low {{ color: #b59f00; }}
  </style>
</head>
<body>
  <h1>Infrastructure Compliance Report</h1>
  <div class="summary">
    <h2>Summary</h2>
    <p>Generated: {timestamp}</p>
    <p>Total Resources: {total}</p>
    <p>Compliant: {compliant}</p>
    <p>Non-Compliant: {non_compliant}</p>
  </div>
  <div class="violations">
    <h2>Violations</h2>
{violations}  </div>
</body>
</html>
"#,
        timestamp = report.timestamp.to_rfc3339(),
        total = report.summary.total_resources,
        compliant = report.summary.compliant,
        non_compliant = report.summary.non_compliant,
        violations = violations,
    )
}

/// Markdown summary of a change list for review.
pub fn changes_summary(changes: &[ChangeRecord]) -> String {
    let mut out = String::new();
    out.push_str("## Infrastructure Changes\n\n");

    let counts = ChangeCounts::from_changes(changes);
    if counts.total() == 0 {
        out.push_str("_No changes detected._\n");
        return out;
    }

    let _ = write!(
        out,
        "**Added**: {}  \n**Removed**: {}  \n**Modified**: {}\n",
        counts.added, counts.removed, counts.modified
    );

    let mut current_type: Option<&str> = None;
    for change in changes {
        if current_type != Some(change.resource_type.as_str()) {
            let _ = write!(out, "\n### {}\n\n", change.resource_type);
            current_type = Some(change.resource_type.as_str());
        }
        let _ = write!(out, "- **{}** `{}`", change.kind(), change.resource_id);
        if let Change::Modified { old, new } = &change.change {
            let fields = changed_fields(old.fields(), new.fields());
            if !fields.is_empty() {
                let _ = write!(out, ": {}", fields.join(", "));
            }
        }
        out.push('\n');
    }
    out
}

/// Top-level fields whose values differ between two records
fn changed_fields<'a, V: PartialEq>(
    old: &'a std::collections::BTreeMap<String, V>,
    new: &'a std::collections::BTreeMap<String, V>,
) -> Vec<&'a str> {
    let mut keys: Vec<&str> = old
        .keys()
        .chain(new.keys())
        .map(String::as_str)
        .filter(|k| old.get(*k) != new.get(*k))
        .collect();
    keys.sort_unstable();
    keys.dedup();
    keys
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use infraudit_core::compliance::{ComplianceSummary, ResourceViolations, Violation};
    use infraudit_core::model::Record;
    use infraudit_core::rules::Severity;

    fn report() -> ComplianceReport {
        ComplianceReport {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            summary: ComplianceSummary {
                total_resources: 3,
                compliant: 2,
                non_compliant: 1,
            },
            violations: vec![ResourceViolations {
                resource_type: "s3".to_string(),
                resource_id: "<script>".to_string(),
                violations: vec![Violation {
                    rule: "encryption_enabled".to_string(),
                    description: "Buckets & objects".to_string(),
                    severity: Severity::High,
                }],
            }],
        }
    }

    #[test]
    fn test_html_escapes_content() {
        let html = report_html(&report());
        assert!(html.contains("<h3>s3: &lt;script&gt;</h3>"));
        assert!(html.contains(r#"<li class="high">encryption_enabled: Buckets &amp; objects</li>"#));
        assert!(html.contains("<p>Non-Compliant: 1</p>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_html_without_violations() {
        let mut r = report();
        r.violations.clear();
        assert!(report_html(&r).contains("No violations."));
    }

    #[test]
    fn test_summary_lists_changed_fields() {
        let changes = vec![
            ChangeRecord {
                resource_type: "ec2".to_string(),
                resource_id: "i-1".to_string(),
                change: Change::Modified {
                    old: Record::new().with("id", "i-1").with("state", "running"),
                    new: Record::new()
                        .with("id", "i-1")
                        .with("state", "stopped")
                        .with("tags", "x"),
                },
            },
            ChangeRecord {
                resource_type: "s3".to_string(),
                resource_id: "logs".to_string(),
                change: Change::Removed {
                    details: Record::new().with("name", "logs"),
                },
            },
        ];

        let md = changes_summary(&changes);

        assert!(md.contains("**Added**: 0"));
        assert!(md.contains("### ec2\n\n- **modified** `i-1`: state, tags\n"));
        assert!(md.contains("### s3\n\n- **removed** `logs`\n"));
    }

    #[test]
    fn test_summary_empty() {
        assert!(changes_summary(&[]).contains("No changes detected"));
    }
}
