//! Day-bucketing of postings for the home screen list.
//!
//! The grouped list is always rebuilt from scratch from the full posting set
//! of a ledger; nothing here holds state between calls.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use pocket_api::endpoints::postings::Posting;
use serde::Deserialize;
use std::cmp::Reverse;

/// A run of postings that happened on the same calendar day
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    /// Local calendar day of the bucket, `None` for postings without any usable timestamp
    pub date: Option<NaiveDate>,
    pub postings: Vec<Posting>,
    pub index: usize,
}

/// Translatable labels used for relative section titles
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SectionLabels {
    pub today: String,
    pub yesterday: String,
    pub unknown_date: String,
}

impl Default for SectionLabels {
    fn default() -> Self {
        Self {
            today: "Today".to_string(),
            yesterday: "Yesterday".to_string(),
            unknown_date: "Unknown date".to_string(),
        }
    }
}

/// Group postings into day sections, newest day first.
///
/// Postings are ordered by their action key timestamp (newest first) and bucketed
/// by creation date, falling back to the action key when the creation timestamp is
/// missing or malformed. `now` supplies both the reference day for "Today"/"Yesterday"
/// and the time zone in which calendar days are compared.
pub fn group_by_day<Tz: TimeZone>(
    postings: Option<&[Posting]>,
    now: &DateTime<Tz>,
    labels: &SectionLabels,
) -> Vec<Section> {
    let Some(postings) = postings else {
        return Vec::new();
    };

    let tz = now.timezone();
    let today = now.date_naive();

    let mut sorted = postings.to_vec();
    // Unparseable keys compare as None and land after every dated posting
    sorted.sort_by_cached_key(|p| Reverse(p.action_time()));

    let mut sections: Vec<Section> = Vec::new();
    for posting in sorted {
        let day = posting
            .created_time()
            .or_else(|| posting.action_time())
            .map(|ts| ts.with_timezone(&tz).date_naive());

        match sections.iter_mut().find(|s| s.date == day) {
            Some(section) => section.postings.push(posting),
            None => {
                let index = sections.len();
                sections.push(Section {
                    title: section_title(day, today, labels),
                    date: day,
                    postings: vec![posting],
                    index,
                });
            }
        }
    }

    // A creation date can disagree with the action key order; keep days strictly descending
    if !sections.is_sorted_by(|a, b| Reverse(a.date) <= Reverse(b.date)) {
        sections.sort_by_key(|s| Reverse(s.date));
        for (index, section) in sections.iter_mut().enumerate() {
            section.index = index;
        }
    }

    sections
}

/// Title for a section anchored on `day`, relative to `today`
pub fn section_title(day: Option<NaiveDate>, today: NaiveDate, labels: &SectionLabels) -> String {
    let Some(day) = day else {
        return labels.unknown_date.clone();
    };

    if day == today {
        labels.today.clone()
    } else if today.pred_opt() == Some(day) {
        labels.yesterday.clone()
    } else if day.year() == today.year() {
        format!("{} {}", ordinal(day.day()), day.format("%B"))
    } else {
        format!("{} {} {}", ordinal(day.day()), day.format("%B"), day.year())
    }
}

/// English ordinal for a day of month: 1st, 2nd, 3rd, 4th, 11th, 22nd...
fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use pocket_api::endpoints::postings::PostingStatus;

    fn posting(action_key: &str, created: Option<&str>) -> Posting {
        Posting {
            action_key: action_key.to_string(),
            action: format!("posting {action_key}"),
            created: created.map(str::to_string),
            status: PostingStatus::Completed,
            currency: "EUR".to_string(),
            debit: None,
            credit: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn keys(section: &Section) -> Vec<&str> {
        section
            .postings
            .iter()
            .map(|p| p.action_key.as_str())
            .collect()
    }

    #[test]
    fn absent_or_empty_input_yields_no_sections() {
        let labels = SectionLabels::default();
        assert!(group_by_day(None, &now(), &labels).is_empty());
        assert!(group_by_day(Some(Vec::new().as_slice()), &now(), &labels).is_empty());
    }

    #[test]
    fn today_and_yesterday_titles() {
        let postings = vec![
            posting("2024-06-14T08:00:00Z", None),
            posting("2024-06-15T09:30:00Z", None),
        ];
        let sections = group_by_day(Some(postings.as_slice()), &now(), &SectionLabels::default());

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Today");
        assert_eq!(sections[1].title, "Yesterday");
        assert_eq!(sections[0].index, 0);
        assert_eq!(sections[1].index, 1);
    }

    #[test]
    fn year_suffix_only_for_other_years() {
        let postings = vec![
            posting("2023-12-03T10:00:00Z", None),
            posting("2024-01-02T10:00:00Z", None),
            posting("2024-01-02T18:00:00Z", None),
        ];
        let sections = group_by_day(Some(postings.as_slice()), &now(), &SectionLabels::default());

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "2nd January");
        assert_eq!(sections[0].postings.len(), 2);
        assert_eq!(sections[1].title, "3rd December 2023");
    }

    #[test]
    fn postings_within_a_day_are_newest_first() {
        let postings = vec![
            posting("2024-06-15T08:00:00Z", None),
            posting("2024-06-15T11:00:00Z", None),
            posting("2024-06-15T09:00:00Z", None),
        ];
        let sections = group_by_day(Some(postings.as_slice()), &now(), &SectionLabels::default());

        assert_eq!(sections.len(), 1);
        assert_eq!(
            keys(&sections[0]),
            vec![
                "2024-06-15T11:00:00Z",
                "2024-06-15T09:00:00Z",
                "2024-06-15T08:00:00Z"
            ]
        );
    }

    #[test]
    fn grouping_is_independent_of_input_order() {
        let mut postings = vec![
            posting("2024-06-15T08:00:00Z", None),
            posting("2024-06-10T08:00:00Z", None),
            posting("2024-06-14T23:00:00Z", None),
            posting("2024-06-15T10:00:00Z", None),
            posting("2024-05-01T08:00:00Z", None),
        ];
        let labels = SectionLabels::default();
        let expected = group_by_day(Some(postings.as_slice()), &now(), &labels);

        postings.reverse();
        assert_eq!(group_by_day(Some(postings.as_slice()), &now(), &labels), expected);

        postings.rotate_left(2);
        assert_eq!(group_by_day(Some(postings.as_slice()), &now(), &labels), expected);
    }

    #[test]
    fn every_posting_lands_in_exactly_one_section() {
        let postings = vec![
            posting("2024-06-15T08:00:00Z", None),
            posting("2024-06-10T08:00:00Z", None),
            posting("2024-06-10T09:00:00Z", None),
            posting("2024-01-01T08:00:00Z", None),
            posting("2023-06-15T08:00:00Z", None),
        ];
        let sections = group_by_day(Some(postings.as_slice()), &now(), &SectionLabels::default());

        let total: usize = sections.iter().map(|s| s.postings.len()).sum();
        assert_eq!(total, postings.len());
        for p in &postings {
            let hits = sections
                .iter()
                .filter(|s| s.postings.contains(p))
                .count();
            assert_eq!(hits, 1, "{} should be in exactly one section", p.action_key);
        }
    }

    #[test]
    fn sections_are_strictly_descending_with_matching_index() {
        let postings = vec![
            posting("2024-06-01T08:00:00Z", None),
            posting("2024-06-15T08:00:00Z", None),
            posting("2024-03-10T08:00:00Z", None),
            posting("2024-06-12T08:00:00Z", None),
        ];
        let sections = group_by_day(Some(postings.as_slice()), &now(), &SectionLabels::default());

        for (i, section) in sections.iter().enumerate() {
            assert_eq!(section.index, i);
        }
        for pair in sections.windows(2) {
            assert!(pair[0].date > pair[1].date);
        }
    }

    #[test]
    fn creation_date_takes_precedence_over_action_key() {
        let postings = vec![
            // Settled today but created yesterday
            posting("2024-06-15T01:00:00Z", Some("2024-06-14T22:00:00Z")),
            posting("2024-06-15T02:00:00Z", Some("garbage")),
        ];
        let sections = group_by_day(Some(postings.as_slice()), &now(), &SectionLabels::default());

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Today");
        assert_eq!(keys(&sections[0]), vec!["2024-06-15T02:00:00Z"]);
        assert_eq!(sections[1].title, "Yesterday");
    }

    #[test]
    fn undated_postings_form_a_trailing_unknown_section() {
        let postings = vec![
            posting("???", None),
            posting("2024-06-15T08:00:00Z", None),
            posting("also bad", Some("nope")),
        ];
        let sections = group_by_day(Some(postings.as_slice()), &now(), &SectionLabels::default());

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].title, "Unknown date");
        assert_eq!(sections[1].date, None);
        assert_eq!(sections[1].postings.len(), 2);
        assert_eq!(sections[1].index, 1);
    }

    #[test]
    fn days_are_compared_in_the_local_time_zone() {
        // 23:30 UTC on the 14th is already the 15th at UTC+2
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap();
        let postings = vec![posting("2024-06-14T23:30:00Z", None)];

        let sections = group_by_day(Some(postings.as_slice()), &now, &SectionLabels::default());
        assert_eq!(sections[0].title, "Today");
    }

    #[test]
    fn custom_labels_are_used() {
        let labels = SectionLabels {
            today: "Heute".to_string(),
            yesterday: "Gestern".to_string(),
            unknown_date: "Unbekannt".to_string(),
        };
        let today = now().date_naive();
        assert_eq!(section_title(Some(today), today, &labels), "Heute");
        assert_eq!(section_title(today.pred_opt(), today, &labels), "Gestern");
        assert_eq!(section_title(None, today, &labels), "Unbekannt");
    }

    #[test]
    fn ordinals() {
        let cases = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (22, "22nd"),
            (23, "23rd"),
            (30, "30th"),
            (31, "31st"),
        ];
        for (n, expected) in cases {
            assert_eq!(ordinal(n), expected);
        }
    }
}
