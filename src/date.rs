//! 日期型別
//!
//! 包裝完整時間點，但所有對外表示只使用日曆日期，標準格式為 `YYYY-MM-DD`。

use crate::error::{DateTimeError, Result};
use crate::instant;
use crate::macros::impl_datetime_wrapper;
use crate::sql::{self, SqlDataType};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo};
use sqlx::Postgres;
use std::fmt;

/// 日期值，時分秒不參與任何對外表示
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateValue(DateTime<FixedOffset>);

impl DateValue {
    /// 標準文字格式
    pub const LAYOUT: &'static str = "%Y-%m-%d";

    /// ORM 欄位類型提示
    pub const DATA_TYPE: &'static str = "date";

    pub fn new(dt: DateTime<FixedOffset>) -> Self {
        Self(dt)
    }

    /// 以本地時區的當前時間建立
    pub fn now() -> Self {
        Self(Local::now().fixed_offset())
    }

    /// 以年月日建立，時間為 UTC 00:00；日期不合法時回傳 None
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(|date| Self(date.and_time(NaiveTime::MIN).and_utc().fixed_offset()))
    }

    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }

    pub fn into_inner(self) -> DateTime<FixedOffset> {
        self.0
    }

    /// 是否為零值（未設定）
    pub fn is_zero(&self) -> bool {
        instant::is_zero(&self.0)
    }

    /// 依標準格式解析，結果為 UTC 00:00
    ///
    /// 只接受補零的四位年、兩位月、兩位日，例如 `2023-3-5` 會被拒絕。
    pub fn parse(s: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(s, Self::LAYOUT)
            .map_err(|e| DateTimeError::parse(s, Self::LAYOUT, e))?;
        if s.len() != 10 || date.format(Self::LAYOUT).to_string() != s {
            return Err(DateTimeError::non_canonical(s, Self::LAYOUT));
        }
        Ok(Self(date.and_time(NaiveTime::MIN).and_utc().fixed_offset()))
    }

    /// 寫入資料庫的值：保留日期與偏移量，時分秒歸零
    pub fn db_value(&self) -> DateTime<FixedOffset> {
        instant::anchor(self.0.date_naive(), NaiveTime::MIN, *self.0.offset())
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::LAYOUT))
    }
}

impl SqlDataType for DateValue {
    fn sql_data_type() -> &'static str {
        Self::DATA_TYPE
    }
}

impl sqlx::Type<Postgres> for DateValue {
    fn type_info() -> PgTypeInfo {
        <NaiveDate as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        sql::is_temporal(ty)
    }
}

impl<'q> sqlx::Encode<'q, Postgres> for DateValue {
    fn encode_by_ref(
        &self,
        buf: &mut PgArgumentBuffer,
    ) -> std::result::Result<IsNull, BoxDynError> {
        <NaiveDate as sqlx::Encode<Postgres>>::encode(self.db_value().date_naive(), buf)
    }
}

impl_datetime_wrapper!(DateValue);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::SqlValue;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_marshal_date() {
        let date = DateValue::from_ymd(2023, 3, 5).unwrap();
        assert_eq!(date.marshal_json(), b"\"2023-03-05\"");
        assert_eq!(date.to_string(), "2023-03-05");
    }

    #[test]
    fn test_marshal_ignores_time_of_day() {
        let dt = DateTime::parse_from_rfc3339("2023-03-05T23:59:59.999+08:00").unwrap();
        assert_eq!(DateValue::from(dt).marshal_json(), b"\"2023-03-05\"");
    }

    #[test]
    fn test_zero_value() {
        let zero = DateValue::default();
        assert!(zero.is_zero());
        assert_eq!(zero.marshal_json(), b"\"\"");
        // 字串輸出不特別處理零值
        assert_eq!(zero.to_string(), "0001-01-01");
    }

    #[test]
    fn test_unmarshal_invalid_overwrites_with_zero() {
        let mut date = DateValue::from_ymd(2023, 3, 5).unwrap();
        assert!(date.unmarshal_json(b"\"not-a-date\"").is_err());
        assert!(date.is_zero());
    }

    #[test]
    fn test_unmarshal_empty_gives_zero_and_error() {
        let mut date = DateValue::from_ymd(2023, 3, 5).unwrap();
        assert!(date.unmarshal_json(b"\"\"").is_err());
        assert_eq!(date, DateValue::default());
    }

    #[test]
    fn test_db_value_zeroes_time_and_keeps_offset() {
        let dt = DateTime::parse_from_rfc3339("2023-03-05T13:07:45.123-07:00").unwrap();
        let value = DateValue::from(dt).db_value();

        assert_eq!((value.year(), value.month(), value.day()), (2023, 3, 5));
        assert_eq!(value.hour(), 0);
        assert_eq!(value.minute(), 0);
        assert_eq!(value.second(), 0);
        assert_eq!(value.nanosecond(), 0);
        assert_eq!(value.offset().local_minus_utc(), -7 * 3600);
    }

    #[test]
    fn test_scan_null_and_mismatch() {
        let mut date = DateValue::from_ymd(2023, 3, 5).unwrap();
        date.scan(SqlValue::Null).unwrap();
        assert!(date.is_zero());

        let mut date = DateValue::from_ymd(2023, 3, 5).unwrap();
        assert!(date.scan(SqlValue::from("2023-03-05")).is_err());
        assert!(date.is_zero());

        date.scan(SqlValue::from(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()))
            .unwrap();
        assert_eq!(date.to_string(), "2024-02-29");
    }

    #[test]
    fn test_binary_keeps_full_precision() {
        let dt = DateTime::parse_from_rfc3339("2023-03-05T13:07:45.123456789+09:00").unwrap();
        let date = DateValue::from(dt);

        let mut decoded = DateValue::default();
        decoded.decode_binary(&date.encode_binary().unwrap()).unwrap();

        assert_eq!(decoded.into_inner(), dt);
        assert_eq!(decoded.as_datetime().offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn test_decode_binary_failure_keeps_target() {
        let mut date = DateValue::from_ymd(2023, 3, 5).unwrap();
        assert!(date.decode_binary(&[0xff]).is_err());
        assert_eq!(date.to_string(), "2023-03-05");
    }

    #[test]
    fn test_data_type() {
        assert_eq!(DateValue::sql_data_type(), "date");
    }
}
