const MINUTE: i64 = 60;
const HOUR: i64 = 3_600;
const DAY: i64 = 86_400;
const MONTH: i64 = 2_592_000;
const YEAR: i64 = 31_104_000;

/// Human-readable age of something created at `created_at`, seen at `now`.
///
/// Months are 30 days and years are 12 such months. Timestamps in the future
/// read as zero seconds.
pub fn humanize_age(created_at: i64, now: i64) -> String {
    let elapsed = now.saturating_sub(created_at).max(0);
    match elapsed {
        d if d < MINUTE => format!("{d} seconds"),
        d if d < HOUR => format!("{} minutes", d / MINUTE),
        d if d < DAY => format!("{} hours", d / HOUR),
        d if d < MONTH => format!("{} days", d / DAY),
        d if d < YEAR => format!("{} months", d / MONTH),
        d => format!("{} years", d / YEAR),
    }
}
