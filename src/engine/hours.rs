use crate::models::schedule::{IntervalGroup, LocalMoment, WeeklyInterval};

pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// 7 wraps back to 1.
pub fn next_weekday(weekday: u8) -> u8 {
    weekday % 7 + 1
}

pub fn day_name(weekday: u8) -> &'static str {
    DAY_NAMES[usize::from(weekday) - 1]
}

/// True iff `at` falls inside at least one interval. Start is inclusive,
/// end exclusive. An interval with `end <= start` spans midnight: it covers
/// its own weekday from `start` onwards plus the next weekday up to `end`.
pub fn is_open_at(intervals: &[WeeklyInterval], at: LocalMoment) -> bool {
    intervals.iter().any(|interval| {
        if interval.crosses_midnight() {
            (at.weekday == interval.weekday && at.minute >= interval.start_minute)
                || (at.weekday == next_weekday(interval.weekday)
                    && at.minute < interval.end_minute)
        } else {
            at.weekday == interval.weekday
                && interval.start_minute <= at.minute
                && at.minute < interval.end_minute
        }
    })
}

/// Partition intervals by exact (start, end) pair. Groups appear in the
/// order their pair was first seen; days inside a group keep input order.
pub fn group_intervals(intervals: &[WeeklyInterval]) -> Vec<IntervalGroup> {
    let mut groups: Vec<IntervalGroup> = Vec::new();

    for interval in intervals {
        let existing = groups.iter_mut().find(|group| {
            group.start_minute == interval.start_minute && group.end_minute == interval.end_minute
        });

        match existing {
            Some(group) => group.days.push(interval.weekday),
            None => groups.push(IntervalGroup {
                days: vec![interval.weekday],
                start_minute: interval.start_minute,
                end_minute: interval.end_minute,
            }),
        }
    }

    groups
}

/// "Monday", "Monday and Tuesday", "Monday, Tuesday and Wednesday", ...
pub fn day_list_label(days: &[u8]) -> String {
    match days {
        [] => String::new(),
        [only] => day_name(*only).to_string(),
        [head @ .., last] => {
            let head = head
                .iter()
                .map(|day| day_name(*day))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{} and {}", head, day_name(*last))
        }
    }
}

pub fn format_minutes(minute: u16) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

pub fn format_group_label(group: &IntervalGroup) -> String {
    format!(
        "{}: {}–{}",
        day_list_label(&group.days),
        format_minutes(group.start_minute),
        format_minutes(group.end_minute)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(weekday: u8, start_minute: u16, end_minute: u16) -> WeeklyInterval {
        WeeklyInterval {
            weekday,
            start_minute,
            end_minute,
        }
    }

    #[test]
    fn same_day_interval_bounds() {
        let schedule = vec![interval(2, 600, 900)];

        // Lower bound inclusive, upper bound exclusive.
        assert!(is_open_at(&schedule, LocalMoment::new(2, 600)));
        assert!(is_open_at(&schedule, LocalMoment::new(2, 899)));
        assert!(!is_open_at(&schedule, LocalMoment::new(2, 900)));
        assert!(!is_open_at(&schedule, LocalMoment::new(2, 599)));

        // Same minutes on another weekday.
        assert!(!is_open_at(&schedule, LocalMoment::new(3, 700)));
    }

    #[test]
    fn overnight_interval_spans_into_next_day() {
        // Friday 22:00 through Saturday 02:00.
        let schedule = vec![interval(5, 1320, 120)];

        assert!(is_open_at(&schedule, LocalMoment::new(5, 1350)));
        assert!(is_open_at(&schedule, LocalMoment::new(6, 60)));
        assert!(!is_open_at(&schedule, LocalMoment::new(6, 180)));
        assert!(!is_open_at(&schedule, LocalMoment::new(4, 1350)));
    }

    #[test]
    fn overnight_interval_wraps_sunday_to_monday() {
        let schedule = vec![interval(7, 1320, 120)];

        assert!(is_open_at(&schedule, LocalMoment::new(7, 1439)));
        assert!(is_open_at(&schedule, LocalMoment::new(1, 0)));
        assert!(is_open_at(&schedule, LocalMoment::new(1, 119)));
        assert!(!is_open_at(&schedule, LocalMoment::new(1, 120)));
    }

    #[test]
    fn equal_bounds_interval_is_treated_as_overnight() {
        let schedule = vec![interval(5, 600, 600)];

        assert!(is_open_at(&schedule, LocalMoment::new(5, 600)));
        assert!(is_open_at(&schedule, LocalMoment::new(5, 1439)));
        assert!(is_open_at(&schedule, LocalMoment::new(6, 0)));
        assert!(is_open_at(&schedule, LocalMoment::new(6, 599)));
        assert!(!is_open_at(&schedule, LocalMoment::new(6, 600)));
        assert!(!is_open_at(&schedule, LocalMoment::new(5, 599)));
    }

    #[test]
    fn midnight_anchored_interval_covers_whole_day() {
        // {weekday, 0, 0} covers its weekday end to end and nothing else.
        let schedule = vec![interval(3, 0, 0)];

        assert!(is_open_at(&schedule, LocalMoment::new(3, 0)));
        assert!(is_open_at(&schedule, LocalMoment::new(3, 1439)));
        assert!(!is_open_at(&schedule, LocalMoment::new(4, 0)));
        assert!(!is_open_at(&schedule, LocalMoment::new(2, 1439)));
    }

    #[test]
    fn empty_schedule_is_closed() {
        assert!(!is_open_at(&[], LocalMoment::new(1, 720)));
    }

    #[test]
    fn several_intervals_any_match_wins() {
        let schedule = vec![interval(1, 600, 900), interval(1, 1080, 1380)];

        assert!(is_open_at(&schedule, LocalMoment::new(1, 700)));
        assert!(is_open_at(&schedule, LocalMoment::new(1, 1100)));
        assert!(!is_open_at(&schedule, LocalMoment::new(1, 1000)));
    }

    #[test]
    fn grouping_collects_identical_pairs() {
        let schedule = vec![
            interval(1, 600, 900),
            interval(2, 600, 900),
            interval(3, 660, 900),
        ];

        let groups = group_intervals(&schedule);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].days, vec![1, 2]);
        assert_eq!(groups[0].start_minute, 600);
        assert_eq!(groups[0].end_minute, 900);
        assert_eq!(groups[1].days, vec![3]);
        assert_eq!(groups[1].start_minute, 660);
    }

    #[test]
    fn grouping_keeps_insertion_order_not_weekday_order() {
        let schedule = vec![
            interval(4, 600, 900),
            interval(6, 660, 900),
            interval(2, 600, 900),
        ];

        let groups = group_intervals(&schedule);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].days, vec![4, 2]);
        assert_eq!(groups[1].days, vec![6]);
    }

    #[test]
    fn grouping_empty_input() {
        assert!(group_intervals(&[]).is_empty());
    }

    #[test]
    fn regrouping_expanded_groups_is_idempotent() {
        let schedule = vec![
            interval(1, 600, 900),
            interval(2, 600, 900),
            interval(5, 1320, 120),
            interval(6, 1320, 120),
            interval(3, 660, 900),
        ];

        let groups = group_intervals(&schedule);

        let expanded: Vec<WeeklyInterval> = groups
            .iter()
            .flat_map(|group| {
                group
                    .days
                    .iter()
                    .map(|day| interval(*day, group.start_minute, group.end_minute))
            })
            .collect();

        assert_eq!(group_intervals(&expanded), groups);
    }

    #[test]
    fn day_list_label_join_rules() {
        assert_eq!(day_list_label(&[]), "");
        assert_eq!(day_list_label(&[1]), "Monday");
        assert_eq!(day_list_label(&[1, 2]), "Monday and Tuesday");
        assert_eq!(day_list_label(&[1, 2, 3]), "Monday, Tuesday and Wednesday");
        assert_eq!(
            day_list_label(&[1, 3, 5, 7]),
            "Monday, Wednesday, Friday and Sunday"
        );
    }

    #[test]
    fn group_labels_render_zero_padded_times() {
        let group = IntervalGroup {
            days: vec![1, 2, 3],
            start_minute: 660,
            end_minute: 900,
        };
        assert_eq!(
            format_group_label(&group),
            "Monday, Tuesday and Wednesday: 11:00–15:00"
        );

        let early = IntervalGroup {
            days: vec![6],
            start_minute: 545,
            end_minute: 65,
        };
        assert_eq!(format_group_label(&early), "Saturday: 09:05–01:05");
    }

    #[test]
    fn next_weekday_wraps() {
        assert_eq!(next_weekday(1), 2);
        assert_eq!(next_weekday(6), 7);
        assert_eq!(next_weekday(7), 1);
    }
}
