/// One row of the record file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentRecord {
    pub name: String,
    pub email: String,
    pub attended_sessions: u32,
}
