use std::borrow::Cow;

/// Quote a tab name for use in a range expression.
///
/// Names made only of ASCII letters and digits pass through untouched. Anything
/// else is wrapped in single quotes, with embedded quotes doubled.
pub fn quote_sheet_name(name: &str) -> Cow<'_, str> {
    if name.chars().all(|c| c.is_ascii_alphanumeric()) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("'{}'", name.replace('\'', "''")))
    }
}

/// Range covering column A of `tab`.
pub fn task_column_range(tab: &str) -> String {
    format!("{}!A:A", quote_sheet_name(tab))
}
