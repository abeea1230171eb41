use ciq_core::PlanRow;
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_value_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Report rows as a table in export column order.
#[must_use]
pub fn render_plan_table(rows: &[PlanRow]) -> String {
    if rows.is_empty() {
        return String::from("(no clusters with two or more keywords)");
    }
    let cells = rows
        .iter()
        .map(|row| row.to_record().to_vec())
        .collect::<Vec<_>>();
    table::render_table(&PlanRow::HEADERS, &cells, table_options())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_value_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    let rendered = match value {
        Value::Object(map) => {
            let rows = flatten_object("", &map);
            table::render_table(&["key", "value"], &rows, table_options())
        }
        scalar => table::render_table(&["value"], &[vec![value_to_cell(&scalar)]], table_options()),
    };
    Ok(rendered)
}

/// Nested objects become dotted keys, e.g. `clustering.threshold`.
fn flatten_object(prefix: &str, map: &serde_json::Map<String, Value>) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for (key, value) in map {
        let key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(inner) => rows.extend(flatten_object(&key, inner)),
            other => rows.push(vec![key, value_to_cell(other)]),
        }
    }
    rows
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use ciq_core::{PriorityTier, Role};
    use serde::Serialize;

    use super::{render, render_plan_table};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Nested {
        threshold: f64,
    }

    #[derive(Serialize)]
    struct Example {
        slug: &'static str,
        clustering: Nested,
    }

    fn example() -> Example {
        Example {
            slug: "/ao-dai",
            clustering: Nested { threshold: 1.2 },
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&example(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["slug"], "/ao-dai");
        assert_eq!(parsed["clustering"]["threshold"], 1.2);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&example(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_flattens_nested_keys() {
        let out = render(&example(), OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.starts_with("key")));
        assert!(out.contains("clustering.threshold"));
        assert!(out.contains("/ao-dai"));
    }

    #[test]
    fn plan_table_uses_report_headers() {
        let rows = vec![ciq_core::PlanRow {
            cluster_id: 0,
            role: Role::Pillar,
            keyword: "running shoes".into(),
            suggested_url: "/running-shoes".into(),
            link_target_url: String::new(),
            anchor_text: String::new(),
            intent: "commercial".into(),
            volume: "500".into(),
            difficulty: "4".into(),
            score: 120.0,
            priority: PriorityTier::Highest,
        }];
        let out = render_plan_table(&rows);
        let header = out.lines().next().unwrap();
        assert!(header.starts_with("Cluster ID  Role"));
        assert!(out.contains("Pillar Page"));
        assert!(out.contains("120.0"));
    }

    #[test]
    fn empty_plan_table_says_so() {
        assert!(render_plan_table(&[]).starts_with("(no clusters"));
    }
}
