pub mod money;
pub mod time_utils;

pub use money::{decimal_to_f64, format_currency};
pub use time_utils::{days_in_month, today};
