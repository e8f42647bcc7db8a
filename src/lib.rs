//! 資料庫 / JSON / 二進位 / 字串表示的日期時間包裝型別
//!
//! 提供三種包裝型別：
//! - [`DateValue`]：日期，格式 `YYYY-MM-DD`，資料庫類型 `date`
//! - [`TimeOfDayValue`]：時刻，格式 `HH:MM`，資料庫類型 `time`
//! - [`TimestampValue`]：完整時間戳，RFC 3339 奈秒格式，資料庫類型 `timestamp with time zone`
//!
//! 三種型別的零值（0001-01-01T00:00:00Z）代表「未設定」，JSON 輸出為空字串 `""`。

// 模組定義
mod codec;
mod instant;
mod macros;

pub mod date;
pub mod error;
pub mod sql;
pub mod time_of_day;
pub mod timestamp;

// 重新導出常用類型
pub use date::DateValue;
pub use error::{DateTimeError, Result};
pub use sql::{SqlDataType, SqlValue};
pub use time_of_day::TimeOfDayValue;
pub use timestamp::TimestampValue;
