//! Static seasonal multipliers for social growth.

use crate::models::SeasonalAdjustment;

/// (month name, multiplier, reason) for January through December
const SEASONAL_TABLE: [(&str, f64, &str); 12] = [
    ("January", 1.1, "New-year resolutions push discovery and follow activity"),
    ("February", 1.0, "Steady activity; Valentine's content performs well"),
    ("March", 1.0, "Baseline activity as routines settle"),
    ("April", 1.05, "Spring campaigns and fresh content themes lift reach"),
    ("May", 1.0, "Baseline activity"),
    ("June", 0.95, "Early summer travel lowers time spent in feeds"),
    ("July", 0.9, "Summer holidays are the quietest period of the year"),
    ("August", 0.9, "Holiday season continues; engagement dips"),
    ("September", 1.05, "Back-to-school and back-to-work routines restore activity"),
    ("October", 1.1, "Autumn campaigns and seasonal events raise engagement"),
    ("November", 1.15, "Shopping events drive high platform usage"),
    ("December", 1.2, "Holiday season brings the year's peak activity"),
];

pub fn seasonal_adjustments() -> Vec<SeasonalAdjustment> {
    SEASONAL_TABLE
        .iter()
        .enumerate()
        .map(|(i, (name, multiplier, reason))| SeasonalAdjustment {
            month: i as u32 + 1,
            month_name: name.to_string(),
            multiplier: *multiplier,
            reason: reason.to_string(),
        })
        .collect()
}
