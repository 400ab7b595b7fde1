use health_monitor_data::repository::parse_time_of_day;

/// Format an HHMMSS time as a 12-hour clock, e.g. `"131000"` -> `"1:10 PM"`
pub fn format_hhmmss_12h(time: &str) -> Option<String> {
    parse_time_of_day(time).map(|t| t.format("%-I:%M %p").to_string())
}
