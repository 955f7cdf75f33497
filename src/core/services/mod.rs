pub mod summary_service;

pub use summary_service::{
    ActivityPoint, IncomeExpenseChart, ReportStatistics, SummaryService, Totals, Trend,
    RECENT_ACTIVITY_LEN,
};
