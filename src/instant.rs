// instant.rs - 三種包裝型別共用的底層時間輔助函數
//
// 底層時間值統一使用 DateTime<FixedOffset>，保留原始 UTC 偏移量。

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use std::fmt;

/// 零值距 Unix epoch 的秒數 (0001-01-01T00:00:00Z)
pub(crate) const ZERO_UNIX_SECONDS: i64 = -62_135_596_800;

/// 取得零值，代表「未設定 / 不存在」
pub(crate) fn zero() -> DateTime<FixedOffset> {
    DateTime::<Utc>::from_timestamp(ZERO_UNIX_SECONDS, 0)
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
        .fixed_offset()
}

/// 檢查是否為零值
///
/// 比較的是絕對時間點，與偏移量無關。
pub(crate) fn is_zero(dt: &DateTime<FixedOffset>) -> bool {
    dt.timestamp() == ZERO_UNIX_SECONDS && dt.timestamp_subsec_nanos() == 0
}

/// 資料庫寫入時間值時使用的參考日期 (0001-01-01)
pub(crate) fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// 只有時間、沒有日期的輸入所附帶的日期 (0000-01-01)
pub(crate) fn parse_epoch_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(0, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// 在指定偏移量下，以當地牆上時間建立時間點
pub(crate) fn anchor(
    date: NaiveDate,
    time: NaiveTime,
    offset: FixedOffset,
) -> DateTime<FixedOffset> {
    let local = date.and_time(time);
    offset
        .from_local_datetime(&local)
        .single()
        .unwrap_or_else(|| local.and_utc().with_timezone(&offset))
}

/// 去除前後所有的雙引號，不檢查 JSON 跳脫字元
pub(crate) fn trim_quotes(input: &str) -> &str {
    input.trim_matches('"')
}

/// 檢查是否為嚴格的 RFC 3339 寫法：`YYYY-MM-DDTHH:MM:SS[.f]Z` 或 `...±HH:MM`
///
/// `T` 與 `Z` 必須大寫，日期與時間之間不可用空白，小數秒為 1 到 9 位。
pub(crate) fn is_rfc3339_nano_shape(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() < 20 {
        return false;
    }

    let digits = |range: std::ops::Range<usize>| b[range].iter().all(u8::is_ascii_digit);
    let head = digits(0..4)
        && b[4] == b'-'
        && digits(5..7)
        && b[7] == b'-'
        && digits(8..10)
        && b[10] == b'T'
        && digits(11..13)
        && b[13] == b':'
        && digits(14..16)
        && b[16] == b':'
        && digits(17..19);
    if !head {
        return false;
    }

    let mut rest = &b[19..];
    if let Some((b'.', frac)) = rest.split_first() {
        let n = frac.iter().take_while(|c| c.is_ascii_digit()).count();
        if n == 0 || n > 9 {
            return false;
        }
        rest = &frac[n..];
    }

    match rest {
        [b'Z'] => true,
        [sign, h1, h2, b':', m1, m2] => {
            matches!(*sign, b'+' | b'-') && [h1, h2, m1, m2].iter().all(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}

/// 以 RFC 3339 奈秒格式輸出
///
/// 小數秒會去掉尾端的 0，整秒時不輸出小數部分；偏移量為 0 時輸出 `Z`。
pub(crate) fn write_rfc3339_nano(
    dt: &DateTime<FixedOffset>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S"))?;

    // 閏秒以 >= 1_000_000_000 的奈秒表示
    let nanos = dt.nanosecond() % 1_000_000_000;
    if nanos != 0 {
        let digits = format!("{:09}", nanos);
        write!(f, ".{}", digits.trim_end_matches('0'))?;
    }

    if dt.offset().local_minus_utc() == 0 {
        f.write_str("Z")
    } else {
        write!(f, "{}", dt.format("%:z"))
    }
}
