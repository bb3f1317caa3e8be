//! Notification Center
//!
//! Filtering, grouping, counting and multi-select over the loaded
//! notification list. Pure functions; the page and the header dropdown both
//! render from these.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use crate::format::days_elapsed;
use crate::models::{Notification, NotificationCategory};

/// Number of items the header dropdown shows
pub const DROPDOWN_LIMIT: usize = 5;

const GROUP_OTHER: &str = "기타";
const GROUP_ALL: &str = "전체";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    All,
    Unread,
    Archived,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::All, Tab::Unread, Tab::Archived];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::All => "전체",
            Tab::Unread => "읽지 않음",
            Tab::Archived => "보관함",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl DateRange {
    pub const ALL: [DateRange; 4] = [DateRange::All, DateRange::Today, DateRange::Week, DateRange::Month];

    pub fn as_str(&self) -> &'static str {
        match self {
            DateRange::All => "all",
            DateRange::Today => "today",
            DateRange::Week => "week",
            DateRange::Month => "month",
        }
    }

    pub fn from_str(s: &str) -> Self {
        Self::ALL.into_iter().find(|d| d.as_str() == s).unwrap_or_default()
    }

    pub fn label(&self) -> &'static str {
        match self {
            DateRange::All => "전체 기간",
            DateRange::Today => "오늘",
            DateRange::Week => "최근 7일",
            DateRange::Month => "최근 30일",
        }
    }

    /// Whether an event `days` whole days old falls in the range
    pub fn contains(&self, days: i64) -> bool {
        match self {
            DateRange::All => true,
            DateRange::Today => days == 0,
            DateRange::Week => days <= 7,
            DateRange::Month => days <= 30,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationFilter {
    pub tab: Tab,
    /// `None` means every category
    pub category: Option<NotificationCategory>,
    pub query: String,
    pub date: DateRange,
}

impl NotificationFilter {
    pub fn matches(&self, n: &Notification, now: NaiveDateTime) -> bool {
        let tab_ok = match self.tab {
            Tab::Archived => n.is_archived,
            Tab::Unread => !n.is_archived && !n.is_read,
            Tab::All => !n.is_archived,
        };
        if !tab_ok {
            return false;
        }
        if self.category.is_some_and(|c| c != n.category) {
            return false;
        }
        let query = self.query.trim().to_lowercase();
        if !query.is_empty()
            && !n.title.to_lowercase().contains(&query)
            && !n.message.to_lowercase().contains(&query)
        {
            return false;
        }
        if self.date != DateRange::All {
            // Undated items only show without a date filter
            match n.timestamp() {
                Some(ts) if self.date.contains(days_elapsed(ts, now)) => {}
                _ => return false,
            }
        }
        true
    }

    pub fn apply<'a>(&self, notifications: &'a [Notification], now: NaiveDateTime) -> Vec<&'a Notification> {
        notifications.iter().filter(|n| self.matches(n, now)).collect()
    }
}

/// Named group of notifications, in first-appearance order
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationGroup<'a> {
    pub name: String,
    pub items: Vec<&'a Notification>,
}

/// Group by project name, or a single `전체` group when grouping is off
pub fn group_notifications<'a>(items: Vec<&'a Notification>, by_project: bool) -> Vec<NotificationGroup<'a>> {
    if !by_project {
        return vec![NotificationGroup { name: GROUP_ALL.to_string(), items }];
    }
    let mut groups: Vec<NotificationGroup<'a>> = Vec::new();
    for n in items {
        let name = n.project_name().filter(|p| !p.is_empty()).unwrap_or(GROUP_OTHER);
        match groups.iter_mut().find(|g| g.name == name) {
            Some(group) => group.items.push(n),
            None => groups.push(NotificationGroup { name: name.to_string(), items: vec![n] }),
        }
    }
    groups
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationCounts {
    pub all: usize,
    pub unread: usize,
    pub archived: usize,
}

pub fn count_notifications(notifications: &[Notification]) -> NotificationCounts {
    notifications.iter().fold(NotificationCounts::default(), |mut counts, n| {
        if n.is_archived {
            counts.archived += 1;
        } else {
            counts.all += 1;
            if !n.is_read {
                counts.unread += 1;
            }
        }
        counts
    })
}

/// Newest non-archived items for the header dropdown
pub fn dropdown_items(notifications: &[Notification]) -> Vec<Notification> {
    let mut items: Vec<Notification> = notifications.iter().filter(|n| !n.is_archived).cloned().collect();
    items.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
    items.truncate(DROPDOWN_LIMIT);
    items
}

/// Checked notification ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<u64>,
}

impl Selection {
    pub fn toggle(&mut self, id: u64) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids to delete, one request each; empties the selection
    pub fn take(&mut self) -> Vec<u64> {
        std::mem::take(&mut self.ids).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NotificationMetadata;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn make(id: u64, category: NotificationCategory, created_at: &str, project: Option<&str>) -> Notification {
        Notification {
            notification_id: id,
            kind: "donation".to_string(),
            category,
            title: format!("알림 {}", id),
            message: "새로운 기부가 도착했습니다".to_string(),
            link: None,
            is_read: false,
            is_archived: false,
            created_at: created_at.to_string(),
            metadata: project.map(|p| NotificationMetadata { project_name: Some(p.to_string()), ..Default::default() }),
        }
    }

    fn sample() -> Vec<Notification> {
        let mut list = vec![
            make(1, NotificationCategory::Donation, "2024-06-30T11:00:00", Some("급식 지원")),
            make(2, NotificationCategory::Community, "2024-06-27T09:00:00", None),
            make(3, NotificationCategory::Donation, "2024-06-10T09:00:00", Some("난방비")),
            make(4, NotificationCategory::Settlement, "2024-04-01T09:00:00", Some("급식 지원")),
            make(5, NotificationCategory::Project, "2024-06-30T08:00:00", None),
        ];
        list[1].is_read = true;
        list[4].is_archived = true;
        list
    }

    fn ids(items: &[&Notification]) -> Vec<u64> {
        items.iter().map(|n| n.notification_id).collect()
    }

    #[test]
    fn test_tabs() {
        let list = sample();
        let all = NotificationFilter::default();
        assert_eq!(ids(&all.apply(&list, now())), vec![1, 2, 3, 4]);

        let unread = NotificationFilter { tab: Tab::Unread, ..Default::default() };
        assert_eq!(ids(&unread.apply(&list, now())), vec![1, 3, 4]);

        let archived = NotificationFilter { tab: Tab::Archived, ..Default::default() };
        assert_eq!(ids(&archived.apply(&list, now())), vec![5]);
    }

    #[test]
    fn test_category_and_query() {
        let list = sample();
        let filter = NotificationFilter { category: Some(NotificationCategory::Donation), ..Default::default() };
        assert_eq!(ids(&filter.apply(&list, now())), vec![1, 3]);

        let filter = NotificationFilter { query: "알림 2".to_string(), ..Default::default() };
        assert_eq!(ids(&filter.apply(&list, now())), vec![2]);

        let filter = NotificationFilter { query: "기부가".to_string(), ..Default::default() };
        assert_eq!(filter.apply(&list, now()).len(), 4);
    }

    #[test]
    fn test_date_ranges() {
        let list = sample();
        let today = NotificationFilter { date: DateRange::Today, ..Default::default() };
        assert_eq!(ids(&today.apply(&list, now())), vec![1]);

        let week = NotificationFilter { date: DateRange::Week, ..Default::default() };
        assert_eq!(ids(&week.apply(&list, now())), vec![1, 2]);

        let month = NotificationFilter { date: DateRange::Month, ..Default::default() };
        assert_eq!(ids(&month.apply(&list, now())), vec![1, 2, 3]);

        let mut undated = sample();
        undated[0].created_at = String::new();
        assert_eq!(ids(&today.apply(&undated, now())), Vec::<u64>::new());
    }

    #[test]
    fn test_grouping_first_appearance() {
        let list = sample();
        let filtered = NotificationFilter::default().apply(&list, now());

        let groups = group_notifications(filtered.clone(), true);
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["급식 지원", "기타", "난방비"]);
        assert_eq!(ids(&groups[0].items), vec![1, 4]);

        let single = group_notifications(filtered, false);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].name, "전체");
        assert_eq!(single[0].items.len(), 4);
    }

    #[test]
    fn test_counts() {
        let counts = count_notifications(&sample());
        assert_eq!(counts, NotificationCounts { all: 4, unread: 3, archived: 1 });
    }

    #[test]
    fn test_dropdown_newest_five() {
        let mut list = sample();
        list.push(make(6, NotificationCategory::Donation, "2024-06-29T00:00:00", None));
        list.push(make(7, NotificationCategory::Donation, "2024-06-28T00:00:00", None));
        let items = dropdown_items(&list);
        let ids: Vec<u64> = items.iter().map(|n| n.notification_id).collect();
        assert_eq!(ids, vec![1, 6, 7, 2, 3]);
    }

    #[test]
    fn test_selection() {
        let mut selection = Selection::default();
        selection.toggle(3);
        selection.toggle(1);
        selection.toggle(3);
        assert!(selection.contains(1));
        assert!(!selection.contains(3));
        selection.toggle(9);
        assert_eq!(selection.take(), vec![1, 9]);
        assert!(selection.is_empty());
    }
}
