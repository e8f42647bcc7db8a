// sql.rs - 資料庫邊界
//
// 提供與驅動無關的欄位值表示，以及 PostgreSQL (sqlx) 欄位的讀取。

use crate::error::{DateTimeError, Result};
use crate::instant;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgTypeInfo, PgValueRef};
use sqlx::{Decode, Postgres, Type, TypeInfo, ValueRef};
use tracing::{debug, trace};

/// ORM 建立或遷移資料表時使用的欄位類型提示
pub trait SqlDataType {
    /// 邏輯欄位類型，例如 `"date"`
    fn sql_data_type() -> &'static str;
}

/// 可為空的資料庫欄位值
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    /// `date`
    Date(NaiveDate),
    /// `time`
    Time(NaiveTime),
    /// `timestamp`
    Timestamp(NaiveDateTime),
    /// `timestamp with time zone`
    TimestampTz(DateTime<FixedOffset>),
}

impl SqlValue {
    /// 欄位值類型名稱，用於錯誤訊息
    pub fn type_name(&self) -> &'static str {
        match self {
            SqlValue::Null => "NULL",
            SqlValue::Bool(_) => "bool",
            SqlValue::Int(_) => "int64",
            SqlValue::Float(_) => "float64",
            SqlValue::Text(_) => "text",
            SqlValue::Bytes(_) => "bytes",
            SqlValue::Date(_) => "date",
            SqlValue::Time(_) => "time",
            SqlValue::Timestamp(_) => "timestamp",
            SqlValue::TimestampTz(_) => "timestamptz",
        }
    }

    /// 轉換為時間點
    ///
    /// NULL 轉為零值；不含偏移量的值視為 UTC；只有日期的值取當天 00:00；
    /// 只有時間的值附帶 0000-01-01。其他類型回傳 `Conversion` 錯誤。
    pub fn into_instant(self) -> Result<DateTime<FixedOffset>> {
        match self {
            SqlValue::Null => Ok(instant::zero()),
            SqlValue::Date(date) => Ok(date.and_time(NaiveTime::MIN).and_utc().fixed_offset()),
            SqlValue::Time(time) => Ok(instant::parse_epoch_date()
                .and_time(time)
                .and_utc()
                .fixed_offset()),
            SqlValue::Timestamp(naive) => Ok(naive.and_utc().fixed_offset()),
            SqlValue::TimestampTz(dt) => Ok(dt),
            other => Err(DateTimeError::Conversion {
                found: other.type_name().to_string(),
            }),
        }
    }

    /// 讀取 PostgreSQL 欄位值
    pub fn from_pg(value: PgValueRef<'_>) -> std::result::Result<Self, BoxDynError> {
        if value.is_null() {
            trace!("資料庫欄位為 NULL");
            return Ok(SqlValue::Null);
        }

        let ty = value.type_info().into_owned();
        trace!("讀取資料庫欄位, 類型={}", ty.name());

        let cell = if ty == <NaiveDate as Type<Postgres>>::type_info() {
            SqlValue::Date(<NaiveDate as Decode<Postgres>>::decode(value)?)
        } else if ty == <NaiveTime as Type<Postgres>>::type_info() {
            SqlValue::Time(<NaiveTime as Decode<Postgres>>::decode(value)?)
        } else if ty == <NaiveDateTime as Type<Postgres>>::type_info() {
            SqlValue::Timestamp(<NaiveDateTime as Decode<Postgres>>::decode(value)?)
        } else if ty == <DateTime<Utc> as Type<Postgres>>::type_info() {
            let dt = <DateTime<Utc> as Decode<Postgres>>::decode(value)?;
            SqlValue::TimestampTz(dt.fixed_offset())
        } else if <String as Type<Postgres>>::compatible(&ty) {
            SqlValue::Text(<String as Decode<Postgres>>::decode(value)?)
        } else {
            debug!("不支援的資料庫欄位類型: {}", ty.name());
            return Err(Box::new(DateTimeError::Conversion {
                found: ty.name().to_string(),
            }));
        };

        Ok(cell)
    }
}

/// 是否為可讀取成時間值的 PostgreSQL 欄位類型
pub(crate) fn is_temporal(ty: &PgTypeInfo) -> bool {
    *ty == <NaiveDate as Type<Postgres>>::type_info()
        || *ty == <NaiveTime as Type<Postgres>>::type_info()
        || *ty == <NaiveDateTime as Type<Postgres>>::type_info()
        || *ty == <DateTime<Utc> as Type<Postgres>>::type_info()
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlValue::Null, Into::into)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(value: Vec<u8>) -> Self {
        SqlValue::Bytes(value)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(value: NaiveDate) -> Self {
        SqlValue::Date(value)
    }
}

impl From<NaiveTime> for SqlValue {
    fn from(value: NaiveTime) -> Self {
        SqlValue::Time(value)
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(value: NaiveDateTime) -> Self {
        SqlValue::Timestamp(value)
    }
}

impl From<DateTime<FixedOffset>> for SqlValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        SqlValue::TimestampTz(value)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(value: DateTime<Utc>) -> Self {
        SqlValue::TimestampTz(value.fixed_offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_null_is_zero() {
        let dt = SqlValue::Null.into_instant().unwrap();
        assert!(instant::is_zero(&dt));

        let none: Option<NaiveDate> = None;
        assert_eq!(SqlValue::from(none), SqlValue::Null);
    }

    #[test]
    fn test_temporal_cells() {
        let date = NaiveDate::from_ymd_opt(2023, 3, 5).unwrap();
        let dt = SqlValue::from(date).into_instant().unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day(), dt.hour()), (2023, 3, 5, 0));

        let time = NaiveTime::from_hms_opt(13, 7, 45).unwrap();
        let dt = SqlValue::from(time).into_instant().unwrap();
        assert_eq!((dt.year(), dt.hour(), dt.minute(), dt.second()), (0, 13, 7, 45));

        let tz = DateTime::parse_from_rfc3339("2023-01-15T13:04:05-07:00").unwrap();
        let dt = SqlValue::from(tz).into_instant().unwrap();
        assert_eq!(dt.offset().local_minus_utc(), -7 * 3600);
    }

    #[test]
    fn test_non_temporal_cells_fail() {
        assert_matches!(
            SqlValue::from("2023-03-05").into_instant(),
            Err(DateTimeError::Conversion { found }) if found == "text"
        );
        assert_matches!(
            SqlValue::from(42i64).into_instant(),
            Err(DateTimeError::Conversion { .. })
        );
        assert_matches!(
            SqlValue::from(vec![1u8, 2]).into_instant(),
            Err(DateTimeError::Conversion { .. })
        );
    }

    #[test]
    fn test_temporal_type_infos() {
        assert!(is_temporal(&<NaiveDate as Type<Postgres>>::type_info()));
        assert!(is_temporal(&<DateTime<Utc> as Type<Postgres>>::type_info()));
        assert!(!is_temporal(&<String as Type<Postgres>>::type_info()));
    }
}
