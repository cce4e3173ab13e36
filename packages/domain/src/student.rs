//! # 学生
//!
//! 学生エンティティと、その入力検証を定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`StudentId`] | 学生 ID | ストレージが採番するサロゲートキー |
//! | [`StudentDraft`] | 学生入力 | リクエストボディそのまま（未検証） |
//! | [`StudentProfile`] | 学生属性 | 検証済みの name / email / age |
//! | [`Student`] | 学生 | 永続化済みのエンティティ |
//!
//! ## 設計方針
//!
//! - **検証の集約**: 最初の失敗で打ち切らず、全フィールドの失敗を 1 つのメッセージにまとめる
//! - **ステートレスな検証**: `validator` の derive で生成される関数を使うため、
//!   リクエストごとにバリデータを生成しない
//! - **型による保証**: [`StudentProfile`] は [`StudentDraft::into_profile`] を通してのみ作られる

use std::{num::ParseIntError, str::FromStr};

use derive_more::Display;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::DomainError;

/// 学生 ID
///
/// SQLite の `INTEGER PRIMARY KEY AUTOINCREMENT` が採番する。
/// 作成後は不変。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[display("{_0}")]
#[serde(transparent)]
pub struct StudentId(i64);

impl StudentId {
    /// 既存の整数値から ID を作成する
    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    /// 内部の整数値を取得する
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl FromStr for StudentId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// 検証済みの学生属性
///
/// 作成・更新で書き換え可能な属性の組。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentProfile {
    name:  String,
    email: String,
    age:   i32,
}

impl StudentProfile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn age(&self) -> i32 {
        self.age
    }
}

/// 学生の作成・更新リクエストのペイロード
///
/// JSON のフィールド欠落を検出するため、全フィールドを `Option` で受ける。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct StudentDraft {
    #[validate(required, length(min = 1, code = "required"))]
    pub name:  Option<String>,
    #[validate(required, length(min = 1, code = "required"), email)]
    pub email: Option<String>,
    // 0 歳は許容する（欠落のみを拒否）
    #[validate(required)]
    pub age:   Option<i32>,
}

impl StudentDraft {
    /// エラーメッセージに並べる順序（フィールドの宣言順）
    const FIELDS: [&'static str; 3] = ["name", "email", "age"];

    /// 入力を検証し、[`StudentProfile`] に変換する
    ///
    /// # エラー
    ///
    /// いずれかのフィールドが不正な場合、失敗した全フィールドを列挙した
    /// `DomainError::Validation` を返す。
    ///
    /// ```text
    /// Field name is required, Field email is invalid
    /// ```
    pub fn into_profile(self) -> Result<StudentProfile, DomainError> {
        self.validate()
            .map_err(|errors| DomainError::Validation(describe_validation_errors(&errors)))?;

        match (self.name, self.email, self.age) {
            (Some(name), Some(email), Some(age)) => Ok(StudentProfile { name, email, age }),
            // required 検証を通過していれば到達しない
            _ => Err(DomainError::Validation("Field required".to_string())),
        }
    }
}

/// 検証エラーを 1 フィールド 1 メッセージの文字列に整形する
///
/// 欠落（空文字を含む）は `is required`、形式不正は `is invalid` とする。
fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();

    StudentDraft::FIELDS
        .iter()
        .filter_map(|field| {
            let errs = field_errors.get(*field)?;
            let missing = errs.iter().any(|e| e.code == "required");
            Some(if missing {
                format!("Field {field} is required")
            } else {
                format!("Field {field} is invalid")
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// 学生エンティティ
///
/// # 不変条件
///
/// - `id` はストレージ内で一意
/// - `profile` は検証済み
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    id:      StudentId,
    profile: StudentProfile,
}

impl Student {
    /// 採番済みの ID と検証済み属性から学生を組み立てる
    pub fn new(id: StudentId, profile: StudentProfile) -> Self {
        Self { id, profile }
    }

    /// データベースの行から復元する
    ///
    /// 書き込み時に検証済みのため、再検証は行わない。
    pub fn from_db(id: StudentId, name: String, email: String, age: i32) -> Self {
        Self {
            id,
            profile: StudentProfile { name, email, age },
        }
    }

    // Getter メソッド

    pub fn id(&self) -> StudentId {
        self.id
    }

    pub fn profile(&self) -> &StudentProfile {
        &self.profile
    }

    pub fn name(&self) -> &str {
        self.profile.name()
    }

    pub fn email(&self) -> &str {
        self.profile.email()
    }

    pub fn age(&self) -> i32 {
        self.profile.age()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn draft(name: Option<&str>, email: Option<&str>, age: Option<i32>) -> StudentDraft {
        StudentDraft {
            name:  name.map(str::to_string),
            email: email.map(str::to_string),
            age,
        }
    }

    fn validation_message(result: Result<StudentProfile, DomainError>) -> String {
        match result {
            Err(DomainError::Validation(msg)) => msg,
            other => panic!("Validation エラーを期待したが {other:?} だった"),
        }
    }

    #[test]
    fn test_正常な入力でプロフィールが作成される() {
        let profile = draft(Some("Ann"), Some("ann@x.com"), Some(20))
            .into_profile()
            .unwrap();

        assert_eq!(profile.name(), "Ann");
        assert_eq!(profile.email(), "ann@x.com");
        assert_eq!(profile.age(), 20);
    }

    #[test]
    fn test_年齢0は許容される() {
        let profile = draft(Some("Baby"), Some("baby@x.com"), Some(0))
            .into_profile()
            .unwrap();

        assert_eq!(profile.age(), 0);
    }

    #[test]
    fn test_name欠落とemail不正が1つのメッセージにまとまる() {
        let msg = validation_message(draft(None, Some("not-an-email"), Some(20)).into_profile());

        assert_eq!(msg, "Field name is required, Field email is invalid");
    }

    #[test]
    fn test_全フィールド欠落で宣言順に列挙される() {
        let msg = validation_message(StudentDraft::default().into_profile());

        assert_eq!(
            msg,
            "Field name is required, Field email is required, Field age is required"
        );
    }

    #[test]
    fn test_空文字は欠落として扱う() {
        let msg = validation_message(draft(Some(""), Some(""), Some(20)).into_profile());

        assert_eq!(msg, "Field name is required, Field email is required");
    }

    #[rstest]
    #[case("plainaddress")]
    #[case("@missing-local.com")]
    #[case("missing-domain@")]
    #[case("two@@signs.com")]
    fn test_不正なメールアドレスはinvalidになる(#[case] email: &str) {
        let msg = validation_message(draft(Some("Ann"), Some(email), Some(20)).into_profile());

        assert_eq!(msg, "Field email is invalid");
    }

    #[test]
    fn test_jsonの欠落フィールドはnoneになる() {
        let draft: StudentDraft = serde_json::from_str(r#"{"name": "Ann"}"#).unwrap();

        assert_eq!(draft.name.as_deref(), Some("Ann"));
        assert!(draft.email.is_none());
        assert!(draft.age.is_none());
    }

    #[test]
    fn test_student_idは整数文字列からパースできる() {
        assert_eq!("42".parse::<StudentId>().unwrap(), StudentId::from_i64(42));
        assert!("abc".parse::<StudentId>().is_err());
        assert!("1.5".parse::<StudentId>().is_err());
    }

    #[test]
    fn test_student_idはjsonで数値としてシリアライズされる() {
        let json = serde_json::to_value(StudentId::from_i64(7)).unwrap();

        assert_eq!(json, serde_json::json!(7));
    }

    #[test]
    fn test_from_dbで属性が復元される() {
        let student = Student::from_db(
            StudentId::from_i64(1),
            "Ann".to_string(),
            "ann@x.com".to_string(),
            20,
        );

        assert_eq!(student.id().as_i64(), 1);
        assert_eq!(student.name(), "Ann");
        assert_eq!(student.email(), "ann@x.com");
        assert_eq!(student.age(), 20);
    }
}
