//! # オフセットページネーション
//!
//! 一覧 API の `page` / `limit` クエリパラメータの解釈と、
//! レスポンスの `meta` に載せるページネーション情報を提供する。
//!
//! ## ルール
//!
//! - `page` の既定値は 1、`limit` の既定値は 10
//! - 未指定・数値でない・0 以下の値は既定値にフォールバックする（エラーにしない）
//! - `offset = (page - 1) * limit`

use serde::{Deserialize, Serialize};

/// `page` の既定値
pub const DEFAULT_PAGE: u32 = 1;

/// `limit` の既定値
pub const DEFAULT_LIMIT: u32 = 10;

/// 解釈済みのページ指定
///
/// `page` と `limit` は常に 1 以上。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page:  u32,
    limit: u32,
}

impl Pagination {
    /// ページ指定を作成する（0 は既定値に置き換える）
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page:  if page == 0 { DEFAULT_PAGE } else { page },
            limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
        }
    }

    /// クエリパラメータの生文字列から作成する
    ///
    /// ```
    /// use roster_shared::Pagination;
    ///
    /// let pagination = Pagination::from_query(Some("2"), Some("abc"));
    /// assert_eq!(pagination.page(), 2);
    /// assert_eq!(pagination.limit(), 10);
    /// assert_eq!(pagination.offset(), 10);
    /// ```
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page:  parse_positive(page).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(limit).unwrap_or(DEFAULT_LIMIT),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// 読み飛ばす行数
    ///
    /// `u32 * u32` は `u64` に収まるためオーバーフローしない。
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw?.trim().parse::<u32>().ok().filter(|value| *value > 0)
}

/// 一覧レスポンスの `meta`
///
/// `total` はページ指定に関係なくテーブル全体の件数。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page:  u32,
    pub limit: u32,
    pub total: i64,
}

impl PaginationMeta {
    pub fn new(pagination: Pagination, total: i64) -> Self {
        Self {
            page: pagination.page(),
            limit: pagination.limit(),
            total,
        }
    }
}
