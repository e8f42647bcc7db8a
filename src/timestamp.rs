//! 完整時間戳型別
//!
//! 不做任何截斷，文字格式為 RFC 3339 奈秒格式，例如
//! `2023-01-15T13:04:05.123456789-07:00`。

use crate::error::{DateTimeError, Result};
use crate::instant;
use crate::macros::impl_datetime_wrapper;
use crate::sql::{self, SqlDataType};
use chrono::{DateTime, FixedOffset, Local, Timelike, Utc};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo};
use sqlx::Postgres;
use std::borrow::Cow;
use std::fmt;

/// 時間戳值，保留奈秒精度與原始偏移量
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimestampValue(DateTime<FixedOffset>);

impl TimestampValue {
    /// 標準文字格式
    ///
    /// 輸出時小數秒會去掉尾端的 0，偏移量為 0 時輸出 `Z`。
    /// 解析時先把結尾的 `Z` 換成 `+00:00` 再套用此格式；`T` 與 `Z` 必須大寫，不接受閏秒。
    pub const LAYOUT: &'static str = "%Y-%m-%dT%H:%M:%S%.f%:z";

    /// ORM 欄位類型提示
    pub const DATA_TYPE: &'static str = "timestamp with time zone";

    pub fn new(dt: DateTime<FixedOffset>) -> Self {
        Self(dt)
    }

    /// 以本地時區的當前時間建立
    pub fn now() -> Self {
        Self(Local::now().fixed_offset())
    }

    /// 以 Unix 秒數與奈秒建立 (UTC)；超出範圍時回傳 None
    pub fn from_timestamp(secs: i64, nanos: u32) -> Option<Self> {
        DateTime::<Utc>::from_timestamp(secs, nanos).map(Self::from)
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

    pub fn parse(s: &str) -> Result<Self> {
        if !instant::is_rfc3339_nano_shape(s) {
            return Err(DateTimeError::non_canonical(s, Self::LAYOUT));
        }

        let normalized = match s.strip_suffix('Z') {
            Some(rest) => Cow::Owned(format!("{rest}+00:00")),
            None => Cow::Borrowed(s),
        };
        let dt = DateTime::parse_from_str(&normalized, Self::LAYOUT)
            .map_err(|e| DateTimeError::parse(s, Self::LAYOUT, e))?;

        // 秒數 60 (閏秒)
        if dt.nanosecond() >= 1_000_000_000 {
            return Err(DateTimeError::non_canonical(s, Self::LAYOUT));
        }
        Ok(Self(dt))
    }

    /// 寫入資料庫的值，原樣傳遞
    pub fn db_value(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

impl fmt::Display for TimestampValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        instant::write_rfc3339_nano(&self.0, f)
    }
}

impl SqlDataType for TimestampValue {
    fn sql_data_type() -> &'static str {
        Self::DATA_TYPE
    }
}

impl sqlx::Type<Postgres> for TimestampValue {
    fn type_info() -> PgTypeInfo {
        <DateTime<Utc> as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        sql::is_temporal(ty)
    }
}

impl<'q> sqlx::Encode<'q, Postgres> for TimestampValue {
    fn encode_by_ref(
        &self,
        buf: &mut PgArgumentBuffer,
    ) -> std::result::Result<IsNull, BoxDynError> {
        <DateTime<FixedOffset> as sqlx::Encode<Postgres>>::encode(self.db_value(), buf)
    }
}

impl_datetime_wrapper!(TimestampValue);
