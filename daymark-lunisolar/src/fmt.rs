//! Display names for lunisolar dates.
//!
//! Calendar cells label days with the traditional forms: sexagenary year
//! names, month names (with the intercalary prefix) and ordinal day names.

use crate::{LunarMonth, SolarTerm};

/// Chinese numerals; index 0 holds "十" so day names can be built by
/// suffixing `d % 10`.
const NUM: [&str; 10] = ["十", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

const STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];
const BRANCHES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

/// Sexagenary cycle name for an index in `0..60` (0 = 甲子).
#[must_use]
pub fn sexagenary_name(index: u8) -> String {
    let i = usize::from(index % 60);
    format!("{}{}", STEMS[i % 10], BRANCHES[i % 12])
}

/// Month name; the eleventh and twelfth months take their traditional
/// names 冬月 and 腊月, intercalary months get the 闰 prefix.
#[must_use]
pub fn month_name(month: LunarMonth) -> String {
    let mut name = String::new();
    if month.is_leap {
        name.push('闰');
    }
    name.push_str(match month.number {
        1 => "正",
        2..=9 => NUM[month.number as usize],
        10 => "十",
        11 => "冬",
        12 => "腊",
        _ => "?",
    });
    name.push('月');
    name
}

/// Day name for `1..=30`: 初一 through 初十, 十一 through 十九, 二十,
/// 廿一 through 廿九, 三十.
#[must_use]
pub fn day_name(day: u8) -> String {
    let prefix = match day {
        1..=10 => "初",
        11..=19 => "十",
        20 => "二",
        21..=29 => "廿",
        30 => "三",
        _ => "?",
    };
    format!("{}{}", prefix, NUM[usize::from(day % 10)])
}

/// Chinese name of a solar term.
#[must_use]
pub fn solar_term_name(term: SolarTerm) -> &'static str {
    const NAMES: [&str; 24] = [
        "立春", "雨水", "惊蛰", "春分", "清明", "谷雨", "立夏", "小满", "芒种", "夏至",
        "小暑", "大暑", "立秋", "处暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪",
        "大雪", "冬至", "小寒", "大寒",
    ];
    NAMES[usize::from(term.index())]
}
