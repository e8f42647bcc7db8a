// codec.rs - 二進位自描述編碼
//
// 保存完整精度的時間點（含原始偏移量），Date / TimeOfDay 也不截斷。

use bincode::error::{DecodeError, EncodeError};
use bincode::{Decode, Encode};
use chrono::{DateTime, FixedOffset, Utc};

/// 目前的編碼版本
const WIRE_VERSION: u8 = 1;

/// 二進位傳輸結構
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub(crate) struct WireInstant {
    version: u8,
    seconds: i64,
    nanos: u32,
    offset_seconds: i32,
}

impl From<&DateTime<FixedOffset>> for WireInstant {
    fn from(dt: &DateTime<FixedOffset>) -> Self {
        Self {
            version: WIRE_VERSION,
            seconds: dt.timestamp(),
            nanos: dt.timestamp_subsec_nanos(),
            offset_seconds: dt.offset().local_minus_utc(),
        }
    }
}

impl WireInstant {
    /// 還原為時間點，版本或數值範圍不合法時回傳錯誤
    pub(crate) fn into_instant(self) -> Result<DateTime<FixedOffset>, DecodeError> {
        if self.version != WIRE_VERSION {
            return Err(DecodeError::OtherString(format!(
                "unsupported date/time payload version {}",
                self.version
            )));
        }

        let utc = DateTime::<Utc>::from_timestamp(self.seconds, self.nanos)
            .ok_or(DecodeError::Other("date/time payload out of range"))?;
        let offset = FixedOffset::east_opt(self.offset_seconds)
            .ok_or(DecodeError::Other("invalid UTC offset in date/time payload"))?;

        Ok(utc.with_timezone(&offset))
    }
}

/// 編碼為二進位內容
pub(crate) fn encode(dt: &DateTime<FixedOffset>) -> Result<Vec<u8>, EncodeError> {
    bincode::encode_to_vec(WireInstant::from(dt), bincode::config::standard())
}

/// 從二進位內容解碼，不允許多餘的尾端位元組
pub(crate) fn decode(bytes: &[u8]) -> Result<DateTime<FixedOffset>, DecodeError> {
    let (wire, read): (WireInstant, usize) =
        bincode::decode_from_slice(bytes, bincode::config::standard())?;
    if read != bytes.len() {
        return Err(DecodeError::OtherString(format!(
            "{} trailing bytes after date/time payload",
            bytes.len() - read
        )));
    }
    wire.into_instant()
}

/// 為包裝型別實作 bincode 的 Encode / Decode / BorrowDecode
macro_rules! impl_bincode_codec {
    ($ty:ident) => {
        impl bincode::Encode for $ty {
            fn encode<E: bincode::enc::Encoder>(
                &self,
                encoder: &mut E,
            ) -> std::result::Result<(), bincode::error::EncodeError> {
                bincode::Encode::encode(&$crate::codec::WireInstant::from(&self.0), encoder)
            }
        }

        impl<Context> bincode::Decode<Context> for $ty {
            fn decode<D: bincode::de::Decoder<Context = Context>>(
                decoder: &mut D,
            ) -> std::result::Result<Self, bincode::error::DecodeError> {
                let wire =
                    <$crate::codec::WireInstant as bincode::Decode<Context>>::decode(decoder)?;
                Ok(Self(wire.into_instant()?))
            }
        }

        impl<'de, Context> bincode::BorrowDecode<'de, Context> for $ty {
            fn borrow_decode<D: bincode::de::BorrowDecoder<'de, Context = Context>>(
                decoder: &mut D,
            ) -> std::result::Result<Self, bincode::error::DecodeError> {
                <Self as bincode::Decode<Context>>::decode(decoder)
            }
        }
    };
}

pub(crate) use impl_bincode_codec;
