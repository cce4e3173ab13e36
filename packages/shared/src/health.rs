//! `GET /health` のレスポンス型。
//!
//! 生存確認用。ストレージへの疎通は確認しない。

use serde::{Deserialize, Serialize};

/// 稼働中を示す `status` の値
pub const HEALTHY: &str = "healthy";

/// 稼働状態とビルドのバージョン
///
/// ```
/// use roster_shared::HealthResponse;
///
/// let body = HealthResponse::healthy("1.2.3");
/// assert_eq!(body.version, "1.2.3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status:  String,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy(version: impl Into<String>) -> Self {
        Self {
            status:  HEALTHY.to_owned(),
            version: version.into(),
        }
    }
}
