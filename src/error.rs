use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 抓取个人主页失败
    #[error("抓取错误: {0}")]
    Fetch(#[from] FetchError),
    /// 表格文件读写错误
    #[error("表格错误: {0}")]
    Sheet(#[from] SheetError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 徽章目录错误
    #[error("目录错误: {0}")]
    Catalog(#[from] CatalogError),
    /// 排行榜文件错误
    #[error("排行榜错误: {0}")]
    Leaderboard(#[from] LeaderboardError),
}

/// 抓取相关错误
///
/// 只在单行范围内出现，由行流程记录为错误标记，不会中断整个批次
#[derive(Debug, Error)]
pub enum FetchError {
    /// 创建 HTTP 客户端失败
    #[error("创建 HTTP 客户端失败: {source}")]
    ClientBuildFailed {
        #[source]
        source: reqwest::Error,
    },
    /// 网络请求失败
    #[error("请求失败 ({url}): {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// 请求超时
    #[error("请求超时 ({url})")]
    Timeout { url: String },
    /// 非 2xx 状态码
    #[error("HTTP 状态异常 ({url}): {status}")]
    BadStatus { url: String, status: u16 },
    /// 读取响应体失败
    #[error("读取响应失败 ({url}): {source}")]
    BodyReadFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// 出错的 URL（客户端构建错误没有 URL）
    pub fn url(&self) -> Option<&str> {
        match self {
            FetchError::ClientBuildFailed { .. } => None,
            FetchError::RequestFailed { url, .. }
            | FetchError::Timeout { url }
            | FetchError::BadStatus { url, .. }
            | FetchError::BodyReadFailed { url, .. } => Some(url),
        }
    }
}

/// 表格文件错误
#[derive(Debug, Error)]
pub enum SheetError {
    /// 读取工作簿失败
    #[error("无法读取工作簿 ({path}): {message}")]
    OpenFailed { path: String, message: String },
    /// 保存工作簿失败
    #[error("无法保存工作簿 ({path}): {message}")]
    SaveFailed { path: String, message: String },
    /// 工作簿中没有工作表
    #[error("工作簿中没有工作表: {path}")]
    NoWorksheet { path: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 字段取值不合法
    #[error("配置项 {field} 取值 '{value}' 不合法: {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
    /// CSS 选择器无法解析
    #[error("无法解析选择器 '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// 徽章目录错误
#[derive(Debug, Error)]
pub enum CatalogError {
    /// 两个条目归一化后得到相同的键
    #[error("{kind} 目录键冲突: '{first}' 与 '{second}' 都归一化为 '{key}'")]
    KeyCollision {
        kind: String,
        key: String,
        first: String,
        second: String,
    },
    /// 条目归一化后为空
    #[error("{kind} 目录条目 '{entry}' 归一化后为空")]
    EmptyKey { kind: String, entry: String },
}

/// 排行榜文件错误
#[derive(Debug, Error)]
pub enum LeaderboardError {
    /// 读取上一次的排行榜失败
    #[error("读取排行榜失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 排行榜 JSON 解析失败
    #[error("排行榜解析失败 ({path}): {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// 序列化排行榜失败
    #[error("排行榜序列化失败: {0}")]
    SerializeFailed(#[source] serde_json::Error),
    /// 写入排行榜失败
    #[error("写入排行榜失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建配置取值错误
    pub fn invalid_config(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        AppError::Config(ConfigError::InvalidValue {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        })
    }

    /// 创建工作簿读取错误
    pub fn sheet_open_failed(path: impl Into<String>, source: impl std::fmt::Display) -> Self {
        AppError::Sheet(SheetError::OpenFailed {
            path: path.into(),
            message: source.to_string(),
        })
    }

    /// 创建工作簿保存错误
    pub fn sheet_save_failed(path: impl Into<String>, source: impl std::fmt::Display) -> Self {
        AppError::Sheet(SheetError::SaveFailed {
            path: path.into(),
            message: source.to_string(),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
