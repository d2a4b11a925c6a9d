use std::collections::BTreeMap;

use chrono::Datelike;

use crate::model::WorkItem;

/// Display key for the listing: one cell per user, day of month and time type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndexKey {
    pub user_id: i32,
    pub day: u32,
    pub time_type: String,
}

impl IndexKey {
    pub fn for_item(item: &WorkItem) -> Self {
        Self {
            user_id: item.user_id,
            day: item.work_datetime.day(),
            time_type: item.time_type.clone(),
        }
    }
}

/// Listing data keyed by user, then day, then type.
pub type WorkIndex = BTreeMap<IndexKey, WorkItem>;

/// Groups items by [`IndexKey`], keeping the last item seen for each key.
///
/// Fed with the ascending output of `list_all`, this retains the
/// chronologically latest entry per key. Earlier entries under the same key
/// disappear from the view but stay in storage. Days of different months
/// collide as well.
pub fn aggregate<I>(items: I) -> WorkIndex
where
    I: IntoIterator<Item = WorkItem>,
{
    let mut index = WorkIndex::new();
    for item in items {
        index.insert(IndexKey::for_item(&item), item);
    }
    index
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;

    fn item(id: i32, user_id: i32, at: &str, time_type: &str) -> WorkItem {
        WorkItem {
            id,
            user_id,
            work_datetime: NaiveDateTime::parse_from_str(at, "%Y-%m-%dT%H:%M:%S")
                .expect("valid timestamp"),
            time_type: time_type.to_string(),
        }
    }

    fn key(user_id: i32, day: u32, time_type: &str) -> IndexKey {
        IndexKey {
            user_id,
            day,
            time_type: time_type.to_string(),
        }
    }

    #[test]
    fn later_item_replaces_earlier_under_same_key() {
        let a = item(1, 1, "2024-01-05T08:00:00", "in");
        let b = item(2, 1, "2024-01-05T09:30:00", "in");

        let index = aggregate(vec![a, b.clone()]);

        assert_eq!(index.len(), 1);
        assert_eq!(index.get(&key(1, 5, "in")), Some(&b));
    }

    #[test]
    fn distinct_users_days_and_types_are_kept_apart() {
        let items = vec![
            item(1, 1, "2024-01-05T09:00:00", "in"),
            item(2, 1, "2024-01-05T18:00:00", "out"),
            item(3, 2, "2024-01-05T09:05:00", "in"),
            item(4, 1, "2024-01-06T09:00:00", "in"),
        ];

        let index = aggregate(items);

        assert_eq!(index.len(), 4);
        assert_eq!(index[&key(1, 5, "out")].id, 2);
        assert_eq!(index[&key(2, 5, "in")].id, 3);
        assert_eq!(index[&key(1, 6, "in")].id, 4);
    }

    #[test]
    fn same_day_in_another_month_collides() {
        let january = item(1, 3, "2024-01-05T09:00:00", "in");
        let february = item(2, 3, "2024-02-05T09:00:00", "in");

        let index = aggregate(vec![january, february.clone()]);

        assert_eq!(index.len(), 1);
        assert_eq!(index[&key(3, 5, "in")], february);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let items = vec![
            item(1, 1, "2024-01-05T09:00:00", "in"),
            item(2, 1, "2024-01-05T12:00:00", "in"),
            item(3, 4, "2024-01-09T17:00:00", "out"),
        ];

        assert_eq!(aggregate(items.clone()), aggregate(items));
    }

    #[test]
    fn keys_iterate_by_user_then_day() {
        let items = vec![
            item(1, 2, "2024-01-01T09:00:00", "in"),
            item(2, 1, "2024-01-07T09:00:00", "in"),
            item(3, 1, "2024-01-03T09:00:00", "in"),
        ];

        let ids: Vec<i32> = aggregate(items).values().map(|item| item.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn empty_input_yields_empty_index() {
        assert!(aggregate(Vec::new()).is_empty());
    }
}
