use std::collections::HashMap;

use crate::models::Slot;

pub const UNKNOWN_DATE: &str = "Unknown Date";
const UNKNOWN_INTERVIEWER: &str = "Unknown Interviewer";

/// Slots sharing one `date` value, in the order they were listed.
#[derive(Debug, PartialEq)]
pub struct DateGroup<'a> {
    pub date: &'a str,
    pub slots: Vec<&'a Slot>,
}

impl DateGroup<'_> {
    pub fn heading(&self) -> &str {
        date_heading(self.date)
    }
}

/// Group slots by their raw `date`. Groups appear in order of first occurrence.
/// A missing or empty date is filed under [`UNKNOWN_DATE`].
pub fn group_by_date(slots: &[Slot]) -> Vec<DateGroup<'_>> {
    let mut groups: Vec<DateGroup<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for slot in slots {
        let date = slot
            .date
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(UNKNOWN_DATE);
        match index.get(date) {
            Some(&i) => groups[i].slots.push(slot),
            None => {
                index.insert(date, groups.len());
                groups.push(DateGroup {
                    date,
                    slots: vec![slot],
                });
            }
        }
    }
    groups
}

/// Everything before the first `T`, so `2024-05-01T00:00:00Z` shows as `2024-05-01`.
pub fn date_heading(date: &str) -> &str {
    date.split('T').next().unwrap_or(date)
}

impl Slot {
    pub fn time_range(&self) -> String {
        format!("{} - {}", self.start_time, self.end_time)
    }

    pub fn interviewer_label(&self) -> String {
        let name = self
            .interviewer
            .as_ref()
            .and_then(|i| i.name.as_deref())
            .filter(|n| !n.is_empty())
            .unwrap_or(UNKNOWN_INTERVIEWER);
        format!("with {name}")
    }
}
