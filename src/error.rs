use thiserror::Error;

/// 日期時間包裝型別的錯誤類型
///
/// 錯誤一律原樣回傳給呼叫端，不記錄日誌、不重試。
#[derive(Error, Debug)]
pub enum DateTimeError {
    /// 資料庫欄位值無法轉換為時間值
    #[error("Conversion error: cannot store a {found} value into a date/time value")]
    Conversion { found: String },

    /// 文字內容不符合標準格式
    ///
    /// `source` 為 None 表示 chrono 可以解析，但內容不是標準寫法（例如位數不足）。
    #[error("Parse error: cannot parse {input:?} as {layout:?}")]
    Parse {
        input: String,
        layout: &'static str,
        #[source]
        source: Option<chrono::ParseError>,
    },

    /// 二進位內容格式錯誤
    #[error("Decode error: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    /// 二進位編碼失敗
    #[error("Encode error: {0}")]
    Encode(#[from] bincode::error::EncodeError),
}

impl DateTimeError {
    pub(crate) fn parse(input: &str, layout: &'static str, source: chrono::ParseError) -> Self {
        DateTimeError::Parse {
            input: input.to_string(),
            layout,
            source: Some(source),
        }
    }

    pub(crate) fn non_canonical(input: &str, layout: &'static str) -> Self {
        DateTimeError::Parse {
            input: input.to_string(),
            layout,
            source: None,
        }
    }
}

/// 本模組的 Result 型別
pub type Result<T> = std::result::Result<T, DateTimeError>;
