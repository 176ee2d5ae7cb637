//! 游标分页
//!
//! `Cursor` 由查询参数 `page` / `size` / `sort` 构造，负责推导 offset 与总页数；
//! `CursorResponse` 是列表接口统一的分页信封。

use serde::{Deserialize, Serialize};

/// 默认每页条数（size 缺省或非正数时使用）
pub const DEFAULT_SIZE: u64 = 10;
/// 每页条数上限
pub const MAX_SIZE: u64 = 100;

// 排序方向（按创建时间）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Asc, // 升序
    #[default]
    Desc, // 降序
}

impl SortDirection {
    pub const ASC: &'static str = "asc";
    pub const DESC: &'static str = "desc";

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => Self::ASC,
            SortDirection::Desc => Self::DESC,
        }
    }
}

impl<'de> Deserialize<'de> for SortDirection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for SortDirection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            SortDirection::ASC => Ok(SortDirection::Asc),
            SortDirection::DESC => Ok(SortDirection::Desc),
            _ => Err(format!("无效的排序方向: '{s}'. 支持: asc, desc")),
        }
    }
}

// 游标查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize)]
pub struct CursorQuery {
    #[serde(
        default = "default_page",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub page: i64,
    #[serde(
        default = "default_size",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub size: i64,
    #[serde(default)]
    pub sort: SortDirection,
}

impl Default for CursorQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            size: default_size(),
            sort: SortDirection::default(),
        }
    }
}

/// 分页游标
///
/// 构造时完成归一化：`size <= 0` 回退到 [`DEFAULT_SIZE`]，超过 [`MAX_SIZE`] 截断，
/// `page < 1` 回退到 1。因此游标一旦存在，`size > 0` 恒成立。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    page: u64,
    size: u64,
    sort: SortDirection,
}

impl Cursor {
    pub fn new(page: i64, size: i64, sort: SortDirection) -> Self {
        let size = if size <= 0 {
            DEFAULT_SIZE
        } else {
            (size as u64).min(MAX_SIZE)
        };
        // offset 需能放进 i64，超出的页码收敛到最后一个可表示的页
        let max_page = i64::MAX as u64 / size + 1;
        let page = (page.max(1) as u64).min(max_page);

        Self { page, size, sort }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn sort(&self) -> SortDirection {
        self.sort
    }

    /// (page - 1) * size
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.size)
    }

    /// ceil(total / size)
    pub fn total_page(&self, total: u64) -> u64 {
        total.div_ceil(self.size)
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::from(CursorQuery::default())
    }
}

impl From<CursorQuery> for Cursor {
    fn from(query: CursorQuery) -> Self {
        Cursor::new(query.page, query.size, query.sort)
    }
}

/// 分页信封：`{size, page, sort, totalPage, totalData, data}`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorResponse<T> {
    pub size: u64,
    pub page: u64,
    pub sort: SortDirection,
    pub total_page: u64,
    pub total_data: u64,
    pub data: Vec<T>,
}

impl<T> CursorResponse<T> {
    pub fn new(cursor: &Cursor, data: Vec<T>, count: u64) -> Self {
        Self {
            size: cursor.size(),
            page: cursor.page(),
            sort: cursor.sort(),
            total_page: cursor.total_page(count),
            total_data: count,
            data,
        }
    }
}

// 自定义反序列化函数，支持字符串到i64的转换
fn deserialize_string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct I64Visitor;

    impl<'de> Visitor<'de> for I64Visitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            if value <= i64::MAX as u64 {
                Ok(value as i64)
            } else {
                Err(Error::invalid_value(Unexpected::Unsigned(value), &self))
            }
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            value
                .parse()
                .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(I64Visitor)
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    DEFAULT_SIZE as i64
}
