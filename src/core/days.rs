//! Availability-day parsing.
//!
//! Two deliberately different readings of the same free-text field live here:
//! [`parse_available_days`] is the calendar-correct parse used for "is this
//! special on today", while [`day_order`] is a coarse substring probe used only
//! for display ordering. They disagree on inputs such as `"monday"` (parsed as
//! Monday, but no `"Mon"` substring); keep them separate.

use chrono::Weekday;
use std::fmt;

const DAY_ABBREVIATIONS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// 沒有排程限制 (空白)，排最前
pub const DAY_ORDER_UNSCHEDULED: i32 = -1;
/// 有排程但無法辨識，排在所有有排程的商品之後
pub const DAY_ORDER_UNRECOGNIZED: i32 = DAY_ABBREVIATIONS.len() as i32;

/// 星期集合，bit 0 = Monday
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DaySet(u8);

impl DaySet {
    pub const fn empty() -> Self {
        DaySet(0)
    }

    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_monday()
    }

    fn insert(&mut self, day: Weekday) {
        self.0 |= Self::bit(day);
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Monday → Sunday
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        std::iter::successors(Some(Weekday::Mon), |d| Some(d.succ()))
            .take(7)
            .filter(|d| self.contains(*d))
    }
}

impl FromIterator<Weekday> for DaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = DaySet::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl fmt::Debug for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

pub fn not_blank(s: Option<&str>) -> bool {
    s.is_some_and(|s| !s.trim().is_empty())
}

/// 將單一星期名稱轉換為 [`Weekday`]，不分大小寫；無法辨識時回傳 `None`
pub fn parse_day(text: &str) -> Option<Weekday> {
    match text.trim().to_lowercase().as_str() {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tues" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thur" | "thurs" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Parses a comma-separated availability string such as `"Mon-Wed, Fri"` or
/// `"Sat-Mon"` into a [`DaySet`].
///
/// Ranges are split on the first hyphen and are inclusive; a range whose start
/// comes after its end wraps past Sunday. Unrecognized tokens are dropped.
pub fn parse_available_days(input: Option<&str>) -> DaySet {
    let mut result = DaySet::empty();
    let Some(input) = input.filter(|s| !s.trim().is_empty()) else {
        return result;
    };

    for part in input.split(',').map(str::trim) {
        match part.split_once('-') {
            Some((start, end)) => {
                if let (Some(start), Some(end)) = (parse_day(start), parse_day(end)) {
                    let mut day = start;
                    loop {
                        result.insert(day);
                        if day == end {
                            break;
                        }
                        day = day.succ();
                    }
                }
            }
            None => {
                if let Some(day) = parse_day(part) {
                    result.insert(day);
                }
            }
        }
    }
    result
}

/// 顯示排序用：回傳第一個出現的三字母縮寫索引 (0 = Mon … 6 = Sun)。
/// 空白為 [`DAY_ORDER_UNSCHEDULED`]，找不到為 [`DAY_ORDER_UNRECOGNIZED`]。
pub fn day_order(available_days: Option<&str>) -> i32 {
    let Some(text) = available_days.filter(|s| !s.trim().is_empty()) else {
        return DAY_ORDER_UNSCHEDULED;
    };
    DAY_ABBREVIATIONS
        .iter()
        .position(|abbr| text.contains(abbr))
        .map(|i| i as i32)
        .unwrap_or(DAY_ORDER_UNRECOGNIZED)
}
