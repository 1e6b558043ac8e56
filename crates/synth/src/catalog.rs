//! Fixed chart axis labels and campaign names.

use dashboard_core::{Region, TimePeriod};

const TODAY_LABELS: &[&str] = &["9 AM", "11 AM", "1 PM", "3 PM", "5 PM", "7 PM"];
const INTRADAY_LABELS: &[&str] = &["10 AM", "12 PM", "2 PM", "4 PM", "6 PM", "8 PM"];
const WEEK_LABELS: &[&str] = &["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTH_LABELS: &[&str] = &["Week 1", "Week 2", "Week 3", "Week 4"];
const QUARTER_LABELS: &[&str] = &["Q1", "Q2", "Q3", "Q4"];

const NORTHEAST_CAMPAIGNS: &[&str] = &[
    "NY Performance Max",
    "MA Search Premier",
    "CT Display Network",
    "ME Responsive Search",
];
const MIDWEST_CAMPAIGNS: &[&str] = &[
    "IL Performance Max",
    "MI Search Premier",
    "OH Display Network",
    "WI Responsive Search",
];
const SOUTH_CAMPAIGNS: &[&str] = &[
    "FL Performance Max",
    "TX Search Premier",
    "GA Display Network",
    "NC Responsive Search",
];
const WEST_CAMPAIGNS: &[&str] = &[
    "CA Performance Max",
    "WA Search Premier",
    "OR Display Network",
    "NV Responsive Search",
];
const GLOBAL_CAMPAIGNS: &[&str] = &[
    "NY Performance Max",
    "FL Performance Max",
    "CA Performance Max",
    "TX Search Premier",
    "IL Performance Max",
    "GA Display Network",
];

/// Axis labels for a period. Unrecognized periods get the intraday set.
pub fn time_labels(period: &TimePeriod) -> &'static [&'static str] {
    match period {
        TimePeriod::Today => TODAY_LABELS,
        TimePeriod::Yesterday => INTRADAY_LABELS,
        TimePeriod::LastWeek => WEEK_LABELS,
        TimePeriod::LastMonth => MONTH_LABELS,
        TimePeriod::LastQuarter => QUARTER_LABELS,
        TimePeriod::Other(_) => INTRADAY_LABELS,
    }
}

/// Campaigns that can annotate a chart for this region. `All` and
/// unrecognized regions share the global list.
pub fn campaigns_for(region: &Region) -> &'static [&'static str] {
    match region {
        Region::Northeast => NORTHEAST_CAMPAIGNS,
        Region::Midwest => MIDWEST_CAMPAIGNS,
        Region::South => SOUTH_CAMPAIGNS,
        Region::West => WEST_CAMPAIGNS,
        Region::All | Region::Other(_) => GLOBAL_CAMPAIGNS,
    }
}
