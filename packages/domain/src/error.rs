//! # ドメイン層エラー定義
//!
//! 入力検証の失敗を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗（全フィールド分を集約済み） |

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、レスポンスエンベロープに変換する。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// メッセージは失敗したフィールドごとの文言を `", "` で連結したもの。
    #[error("{0}")]
    Validation(String),
}
