//! # 学生ハンドラ
//!
//! 学生名簿の CRUD API を提供する。
//!
//! ## エンドポイント
//!
//! - `POST /api/students` - 学生作成
//! - `GET /api/students` - 学生一覧（`page` / `limit` クエリ）
//! - `GET /api/students/{id}` - 学生取得
//! - `PUT /api/students/{id}` - 学生更新（全属性の置き換え）
//! - `DELETE /api/students/{id}` - 学生削除
//!
//! 全レスポンスは [`ApiResponse`] エンベロープで返す。

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{
        Path,
        Query,
        State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use roster_domain::student::{Student, StudentDraft, StudentId};
use roster_shared::{ApiResponse, Pagination, PaginationMeta};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, usecase::StudentUseCaseImpl};

/// 学生 API の共有状態
pub struct StudentState {
    pub usecase: StudentUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 一覧のクエリパラメータ
///
/// 不正な値を既定値にフォールバックさせるため、文字列のまま受ける。
/// 同じキーが複数回現れた場合は最初の値を使う。
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListStudentsQuery {
    pub page:  Option<String>,
    pub limit: Option<String>,
}

impl ListStudentsQuery {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut query.page,
                "limit" => &mut query.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }
}

/// 学生 DTO
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentDto {
    pub id:    i64,
    pub name:  String,
    pub email: String,
    pub age:   i32,
}

impl From<&Student> for StudentDto {
    fn from(student: &Student) -> Self {
        let profile = student.profile();
        Self {
            id:    student.id().as_i64(),
            name:  profile.name().to_string(),
            email: profile.email().to_string(),
            age:   profile.age(),
        }
    }
}

/// 作成・更新・削除の結果として返す ID
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentIdDto {
    pub id: i64,
}

impl From<StudentId> for StudentIdDto {
    fn from(id: StudentId) -> Self {
        Self { id: id.as_i64() }
    }
}

// --- 入力の解釈 ---

/// パスパラメータを学生 ID として解釈し、現在のスパンの `id` に記録する
///
/// パーセントデコードに失敗したパスも `InvalidId` として扱う。
fn parse_student_id(path: Result<Path<String>, PathRejection>) -> Result<StudentId, ApiError> {
    let Path(raw) = path.map_err(|rejection| ApiError::InvalidId(rejection.body_text()))?;
    let id = raw
        .parse::<StudentId>()
        .map_err(|e| ApiError::InvalidId(e.to_string()))?;
    tracing::Span::current().record("id", id.as_i64());
    Ok(id)
}

/// リクエストボディを学生入力として解釈する
///
/// 空白のみのボディは空として扱い、JSON 構文エラーとは区別する。
fn decode_draft(body: &Bytes) -> Result<StudentDraft, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::EmptyBody);
    }
    serde_json::from_slice(body).map_err(|e| ApiError::MalformedBody(e.to_string()))
}

// --- ハンドラ ---

/// POST /api/students
///
/// ## レスポンス
///
/// - `201 Created`: `data = { "id": <採番された ID> }`
/// - `400 Bad Request`: 空ボディ、JSON 構文エラー、バリデーションエラー
/// - `500 Internal Server Error`: ストレージ障害
#[tracing::instrument(skip_all)]
pub async fn create_student(
    State(state): State<Arc<StudentState>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("学生を作成します");
    let draft = decode_draft(&body)?;

    let id = state.usecase.create_student(draft).await?;

    let response = ApiResponse::success(
        StatusCode::CREATED.as_u16(),
        "Student created successfully",
        StudentIdDto::from(id),
    );
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/students/{id}
///
/// ## レスポンス
///
/// - `200 OK`: 学生
/// - `400 Bad Request`: ID が整数でない
/// - `404 Not Found`: 学生が存在しない
/// - `500 Internal Server Error`: ストレージ障害
#[tracing::instrument(skip_all, fields(id = tracing::field::Empty))]
pub async fn get_student(
    State(state): State<Arc<StudentState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_student_id(path)?;

    let student = state.usecase.get_student(id).await?;

    let response = ApiResponse::success(
        StatusCode::OK.as_u16(),
        "Student retrieved successfully",
        StudentDto::from(&student),
    );
    Ok((StatusCode::OK, Json(response)))
}

/// GET /api/students?page=&limit=
///
/// `page` の既定値は 1、`limit` の既定値は 10。
/// 不正な値はエラーにせず既定値を使う。
#[tracing::instrument(skip_all)]
pub async fn list_students(
    State(state): State<Arc<StudentState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let query = query
        .map(|Query(pairs)| ListStudentsQuery::from_pairs(pairs))
        .unwrap_or_default();
    let pagination = Pagination::from_query(query.page.as_deref(), query.limit.as_deref());

    let page = state.usecase.list_students(pagination).await?;

    let items: Vec<StudentDto> = page.students.iter().map(StudentDto::from).collect();
    let response = ApiResponse::success(
        StatusCode::OK.as_u16(),
        "Students retrieved successfully",
        items,
    )
    .with_meta(PaginationMeta::new(pagination, page.total));
    Ok((StatusCode::OK, Json(response)))
}

/// PUT /api/students/{id}
///
/// 全属性を置き換える。対象が存在しない場合も 200 を返す。
#[tracing::instrument(skip_all, fields(id = tracing::field::Empty))]
pub async fn update_student(
    State(state): State<Arc<StudentState>>,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_student_id(path)?;
    let draft = decode_draft(&body)?;

    let id = state.usecase.update_student(id, draft).await?;

    let response = ApiResponse::success(
        StatusCode::OK.as_u16(),
        "Student updated successfully",
        StudentIdDto::from(id),
    );
    Ok((StatusCode::OK, Json(response)))
}

/// DELETE /api/students/{id}
///
/// 対象が存在しない場合も 200 を返す。
#[tracing::instrument(skip_all, fields(id = tracing::field::Empty))]
pub async fn delete_student(
    State(state): State<Arc<StudentState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_student_id(path)?;

    let id = state.usecase.delete_student(id).await?;

    let response = ApiResponse::success(
        StatusCode::OK.as_u16(),
        "Student deleted successfully",
        StudentIdDto::from(id),
    );
    Ok((StatusCode::OK, Json(response)))
}
