// macros.rs - 包裝型別共用的 trait 實作
//
// 每個包裝型別需提供 `parse`、`is_zero` 以及 Display。

/// 為單欄位包裝型別實作資料庫讀取、JSON、二進位、serde 與 sqlx Decode
macro_rules! impl_datetime_wrapper {
    ($ty:ident) => {
        impl $ty {
            /// 從資料庫欄位值讀取
            ///
            /// NULL 讀取為零值。轉換失敗時目標會被設為零值，並回傳錯誤。
            pub fn scan(&mut self, value: $crate::sql::SqlValue) -> $crate::error::Result<()> {
                match value.into_instant() {
                    Ok(dt) => {
                        self.0 = dt;
                        Ok(())
                    }
                    Err(e) => {
                        self.0 = $crate::instant::zero();
                        Err(e)
                    }
                }
            }

            /// 二進位編碼，保留完整精度（不截斷日期或秒）
            pub fn encode_binary(&self) -> $crate::error::Result<Vec<u8>> {
                Ok($crate::codec::encode(&self.0)?)
            }

            /// 二進位解碼，失敗時不修改目標
            pub fn decode_binary(&mut self, bytes: &[u8]) -> $crate::error::Result<()> {
                self.0 = $crate::codec::decode(bytes)?;
                Ok(())
            }

            /// 輸出帶引號的 JSON 字串，零值輸出 `""`
            pub fn marshal_json(&self) -> Vec<u8> {
                if self.is_zero() {
                    return b"\"\"".to_vec();
                }
                format!("\"{}\"", self).into_bytes()
            }

            /// 解析帶引號的 JSON 字串
            ///
            /// 注意：解析失敗時目標仍會被覆寫為零值，再回傳錯誤。
            /// 因此 `""` 會得到零值與一個錯誤，呼叫端可視情況忽略該錯誤。
            pub fn unmarshal_json(&mut self, input: &[u8]) -> $crate::error::Result<()> {
                let text = String::from_utf8_lossy(input);
                match Self::parse($crate::instant::trim_quotes(&text)) {
                    Ok(parsed) => {
                        *self = parsed;
                        Ok(())
                    }
                    Err(e) => {
                        *self = Self::default();
                        Err(e)
                    }
                }
            }
        }

        impl Default for $ty {
            /// 零值
            fn default() -> Self {
                Self($crate::instant::zero())
            }
        }

        impl From<chrono::DateTime<chrono::FixedOffset>> for $ty {
            fn from(dt: chrono::DateTime<chrono::FixedOffset>) -> Self {
                Self(dt)
            }
        }

        impl From<chrono::DateTime<chrono::Utc>> for $ty {
            fn from(dt: chrono::DateTime<chrono::Utc>) -> Self {
                Self(dt.fixed_offset())
            }
        }

        impl From<$ty> for chrono::DateTime<chrono::FixedOffset> {
            fn from(value: $ty) -> Self {
                value.0
            }
        }

        impl std::str::FromStr for $ty {
            type Err = $crate::error::DateTimeError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                if self.is_zero() {
                    serializer.serialize_str("")
                } else {
                    serializer.collect_str(self)
                }
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                Self::parse(&s).map_err(serde::de::Error::custom)
            }
        }

        $crate::codec::impl_bincode_codec!($ty);

        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $ty {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> std::result::Result<Self, sqlx::error::BoxDynError> {
                let mut out = Self::default();
                out.scan($crate::sql::SqlValue::from_pg(value)?)?;
                Ok(out)
            }
        }
    };
}

pub(crate) use impl_datetime_wrapper;
