/// A selectable tab of the tasks workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTab {
    pub name: String,
    pub is_active: bool,
}

impl SheetTab {
    /// One tab per name with the first one active.
    pub fn from_names(names: Vec<String>) -> Vec<SheetTab> {
        names
            .into_iter()
            .enumerate()
            .map(|(i, name)| SheetTab { name, is_active: i == 0 })
            .collect()
    }
}
