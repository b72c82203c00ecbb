//! Shared constants for report formatting and chart styling

use plotters::style::RGBColor;

/// Day-of-week names indexed by the `order_dow` column (0 = Sunday)
pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Number of hour-of-day buckets in an order day
pub const HOURS_PER_DAY: usize = 24;

/// Busiest hours listed in the report
pub const PEAK_HOURS_REPORTED: usize = 5;

/// Products listed in the report ranking
pub const TOP_PRODUCTS_REPORTED: usize = 10;

/// Products drawn in the horizontal bar chart
pub const TOP_PRODUCTS_PLOTTED: usize = 15;

/// Aisles listed in the report ranking
pub const TOP_AISLES_REPORTED: usize = 10;

/// Departments drawn in the pie chart
pub const TOP_DEPARTMENTS_PLOTTED: usize = 10;

/// Bins in the cart size histogram
pub const CART_SIZE_BINS: usize = 50;

/// Bins in the days-since-prior-order histogram (one per day, 0..=30)
pub const ORDER_GAP_BINS: usize = 31;

// Chart palette
pub const STEEL_BLUE: RGBColor = RGBColor(70, 130, 180);
pub const CORAL: RGBColor = RGBColor(255, 127, 80);
pub const SEA_GREEN: RGBColor = RGBColor(46, 139, 87);
pub const PURPLE: RGBColor = RGBColor(128, 0, 128);
pub const TEAL: RGBColor = RGBColor(0, 128, 128);
pub const DODGER_BLUE: RGBColor = RGBColor(30, 144, 255);

/// Color of mean reference lines
pub const MEAN_LINE: RGBColor = RGBColor(255, 0, 0);

/// Color of median reference lines
pub const MEDIAN_LINE: RGBColor = RGBColor(255, 165, 0);

/// Wedge colors for the department pie chart, cycled when needed
pub const PIE_PALETTE: [RGBColor; 10] = [
    RGBColor(141, 211, 199),
    RGBColor(255, 255, 179),
    RGBColor(190, 186, 218),
    RGBColor(251, 128, 114),
    RGBColor(128, 177, 211),
    RGBColor(253, 180, 98),
    RGBColor(179, 222, 105),
    RGBColor(252, 205, 229),
    RGBColor(217, 217, 217),
    RGBColor(188, 128, 189),
];
