//! 時間型別（一天中的時刻）
//!
//! 標準格式為 24 小時制的 `HH:MM`，只保留到分鐘。寫入資料庫時一律附帶
//! 參考日期 0001-01-01。

use crate::error::{DateTimeError, Result};
use crate::instant;
use crate::macros::impl_datetime_wrapper;
use crate::sql::{self, SqlDataType};
use chrono::{DateTime, FixedOffset, Local, NaiveTime, Timelike};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo};
use sqlx::Postgres;
use std::fmt;

/// 時刻值，日期與秒以下的部分不參與任何對外表示
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDayValue(DateTime<FixedOffset>);

impl TimeOfDayValue {
    /// 標準文字格式
    pub const LAYOUT: &'static str = "%H:%M";

    /// ORM 欄位類型提示
    pub const DATA_TYPE: &'static str = "time";

    pub fn new(dt: DateTime<FixedOffset>) -> Self {
        Self(dt)
    }

    /// 以本地時區的當前時間建立
    pub fn now() -> Self {
        Self(Local::now().fixed_offset())
    }

    /// 以時、分建立，日期為 0000-01-01 (UTC)
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self::at_parse_epoch)
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

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// 依標準格式解析，日期為 0000-01-01 (UTC)
    ///
    /// 時與分都必須是兩位數，例如 `9:05` 會被拒絕。
    pub fn parse(s: &str) -> Result<Self> {
        let time = NaiveTime::parse_from_str(s, Self::LAYOUT)
            .map_err(|e| DateTimeError::parse(s, Self::LAYOUT, e))?;
        if time.format(Self::LAYOUT).to_string() != s {
            return Err(DateTimeError::non_canonical(s, Self::LAYOUT));
        }
        Ok(Self::at_parse_epoch(time))
    }

    fn at_parse_epoch(time: NaiveTime) -> Self {
        Self(
            instant::parse_epoch_date()
                .and_time(time)
                .and_utc()
                .fixed_offset(),
        )
    }

    /// 寫入資料庫的值：參考日期 0001-01-01 加上原本的時、分，秒歸零，保留偏移量
    pub fn db_value(&self) -> DateTime<FixedOffset> {
        let time = NaiveTime::from_hms_opt(self.0.hour(), self.0.minute(), 0)
            .unwrap_or(NaiveTime::MIN);
        instant::anchor(instant::reference_date(), time, *self.0.offset())
    }
}

impl fmt::Display for TimeOfDayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::LAYOUT))
    }
}

impl SqlDataType for TimeOfDayValue {
    fn sql_data_type() -> &'static str {
        Self::DATA_TYPE
    }
}

impl sqlx::Type<Postgres> for TimeOfDayValue {
    fn type_info() -> PgTypeInfo {
        <NaiveTime as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        sql::is_temporal(ty)
    }
}

impl<'q> sqlx::Encode<'q, Postgres> for TimeOfDayValue {
    fn encode_by_ref(
        &self,
        buf: &mut PgArgumentBuffer,
    ) -> std::result::Result<IsNull, BoxDynError> {
        <NaiveTime as sqlx::Encode<Postgres>>::encode(self.db_value().time(), buf)
    }
}

impl_datetime_wrapper!(TimeOfDayValue);
