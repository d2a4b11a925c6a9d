use chrono::NaiveDateTime;

/// One recorded attendance event.
///
/// The default value doubles as the "not found" record returned by
/// [`WorkItemStore::get_by_id`](crate::repository::WorkItemStore::get_by_id).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkItem {
    pub id: i32,
    pub user_id: i32,
    pub work_datetime: NaiveDateTime,
    pub time_type: String,
}

impl WorkItem {
    /// Storage never assigns id 0, so a zero id marks a miss.
    pub fn is_empty(&self) -> bool {
        self.id == 0
    }
}
