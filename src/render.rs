//! HTML fragments for the task page. Everything that came out of a
//! spreadsheet cell is escaped before it is placed in markup.
use crate::models::SheetTab;

pub const NO_TASKS: &str = r#"<p class="no-tasks">No tasks assigned yet.</p>"#;

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Split on runs of newlines, trim, and drop blank entries.
pub fn parse_tasks(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|task| !task.is_empty())
        .collect()
}

pub fn render_task_list(text: &str) -> String {
    let tasks = parse_tasks(text);
    if tasks.is_empty() {
        return NO_TASKS.to_string();
    }

    tasks
        .iter()
        .enumerate()
        .map(|(index, task)| {
            format!(
                r#"<div class="task-item" style="animation: slideIn 0.3s ease-out {:.1}s both"><p><strong>{}.</strong> {}</p></div>"#,
                index as f64 * 0.1,
                index + 1,
                escape_html(task)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_tab_bar(tabs: &[SheetTab]) -> String {
    tabs.iter()
        .map(|tab| {
            let name = escape_html(&tab.name);
            format!(
                r#"<button type="button" class="sheet-tab{}" data-tab="{}">{}</button>"#,
                if tab.is_active { " active" } else { "" },
                name,
                name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Tab bar plus task list, the part of the page replaced on every tab click.
pub fn render_panel(tabs: &[SheetTab], tasks: &str) -> String {
    format!(
        "<div class=\"tab-bar\" id=\"sheetTabs\">{}</div>\n<div class=\"tasks-list\" id=\"tasksList\">{}</div>",
        render_tab_bar(tabs),
        render_task_list(tasks)
    )
}

/// Replace `{{key}}` placeholders in one pass. Substituted text is never
/// scanned again, and unknown placeholders are left as they are.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut filled = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        filled.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            filled.push_str(&rest[start..]);
            return filled;
        };
        let key = &after[..end];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => filled.push_str(value),
            None => filled.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }
    filled.push_str(rest);
    filled
}
