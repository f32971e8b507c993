/// One row of the master sheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CredentialRecord {
    pub username: String,
    pub password: String,  // Plaintext, as stored in the sheet
    pub tasks_sheet_url: String,
}

impl CredentialRecord {
    /// Build a record from a sheet row, missing cells become empty strings.
    pub fn from_row(row: &[String]) -> Self {
        let cell = |i: usize| row.get(i).cloned().unwrap_or_default();
        Self {
            username: cell(0),
            password: cell(1),
            tasks_sheet_url: cell(2),
        }
    }
}

/// Snapshot of every credential row, in sheet order. Replaced wholesale on reload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CredentialStore {
    records: Vec<CredentialRecord>,
}

impl CredentialStore {
    pub fn new(records: Vec<CredentialRecord>) -> Self {
        Self { records }
    }

    /// First record with exactly this username.
    pub fn find(&self, username: &str) -> Option<&CredentialRecord> {
        self.records.iter().find(|r| r.username == username)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
