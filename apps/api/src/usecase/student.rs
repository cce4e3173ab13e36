//! 学生管理ユースケース

use std::sync::Arc;

use roster_domain::student::{Student, StudentDraft, StudentId};
use roster_infra::repository::StudentRepository;
use roster_shared::Pagination;

use crate::error::ApiError;

/// 学生一覧の 1 ページ分と全件数
#[derive(Debug)]
pub struct StudentPage {
    pub students: Vec<Student>,
    pub total:    i64,
}

/// 学生管理ユースケース
pub struct StudentUseCaseImpl {
    student_repository: Arc<dyn StudentRepository>,
}

impl StudentUseCaseImpl {
    pub fn new(student_repository: Arc<dyn StudentRepository>) -> Self {
        Self { student_repository }
    }

    /// 入力を検証して学生を作成し、採番された ID を返す
    pub async fn create_student(&self, draft: StudentDraft) -> Result<StudentId, ApiError> {
        let profile = draft.into_profile()?;

        let id = self
            .student_repository
            .create(&profile)
            .await
            .map_err(ApiError::storage("Failed to create student"))?;

        tracing::info!(student_id = %id, "学生を作成しました");
        Ok(id)
    }

    /// ID で学生を取得する
    pub async fn get_student(&self, id: StudentId) -> Result<Student, ApiError> {
        self.student_repository
            .find_by_id(id)
            .await
            .map_err(ApiError::storage("Failed to retrieve student"))?
            .ok_or(ApiError::NotFound(id))
    }

    /// ページ指定に従って学生一覧と全件数を取得する
    ///
    /// 一覧と件数は別クエリのため、間に書き込みが挟まると一致しないことがある。
    pub async fn list_students(&self, pagination: Pagination) -> Result<StudentPage, ApiError> {
        let students = self
            .student_repository
            .list(pagination.limit(), pagination.offset())
            .await
            .map_err(ApiError::storage("Failed to retrieve students"))?;

        let total = self
            .student_repository
            .count()
            .await
            .map_err(ApiError::storage("Failed to count students"))?;

        Ok(StudentPage { students, total })
    }

    /// 入力を検証して学生の全属性を上書きする
    ///
    /// 対象が存在しない場合もエラーにしない（影響行数 0 をログに残す）。
    pub async fn update_student(
        &self,
        id: StudentId,
        draft: StudentDraft,
    ) -> Result<StudentId, ApiError> {
        let profile = draft.into_profile()?;

        let affected = self
            .student_repository
            .update_by_id(id, &profile)
            .await
            .map_err(ApiError::storage("Failed to update student"))?;

        if affected == 0 {
            tracing::debug!(student_id = %id, "更新対象の学生が存在しません");
        }
        Ok(id)
    }

    /// 学生を削除する
    ///
    /// 対象が存在しない場合もエラーにしない（影響行数 0 をログに残す）。
    pub async fn delete_student(&self, id: StudentId) -> Result<StudentId, ApiError> {
        let affected = self
            .student_repository
            .delete_by_id(id)
            .await
            .map_err(ApiError::storage("Failed to delete student"))?;

        if affected == 0 {
            tracing::debug!(student_id = %id, "削除対象の学生が存在しません");
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use roster_infra::mock::MockStudentRepository;

    use super::*;

    fn draft(name: &str, email: &str, age: i32) -> StudentDraft {
        StudentDraft {
            name:  Some(name.to_string()),
            email: Some(email.to_string()),
            age:   Some(age),
        }
    }

    fn sut(repo: &MockStudentRepository) -> StudentUseCaseImpl {
        StudentUseCaseImpl::new(Arc::new(repo.clone()))
    }

    #[tokio::test]
    async fn test_作成した学生を取得できる() {
        let repo = MockStudentRepository::new();
        let usecase = sut(&repo);

        let id = usecase
            .create_student(draft("Ann", "ann@x.com", 20))
            .await
            .unwrap();
        let student = usecase.get_student(id).await.unwrap();

        assert_eq!(id, StudentId::from_i64(1));
        assert_eq!(student.name(), "Ann");
    }

    #[tokio::test]
    async fn test_検証エラーの場合は保存しない() {
        let repo = MockStudentRepository::new();
        let usecase = sut(&repo);

        let result = usecase
            .create_student(draft("", "not-an-email", 20))
            .await;

        assert!(matches!(
            result,
            Err(ApiError::Validation(msg))
                if msg == "Field name is required, Field email is invalid"
        ));
        assert!(repo.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_存在しないidはnot_foundを返す() {
        let usecase = sut(&MockStudentRepository::new());

        let result = usecase.get_student(StudentId::from_i64(99)).await;

        assert!(matches!(result, Err(ApiError::NotFound(id)) if id.as_i64() == 99));
    }

    #[tokio::test]
    async fn test_一覧はページ範囲と全件数を返す() {
        let repo = MockStudentRepository::new();
        let usecase = sut(&repo);
        for n in 1..=15 {
            usecase
                .create_student(draft(&format!("S{n}"), &format!("s{n}@x.com"), 18))
                .await
                .unwrap();
        }

        let page = usecase
            .list_students(Pagination::new(2, 10))
            .await
            .unwrap();

        assert_eq!(page.students.len(), 5);
        assert_eq!(page.total, 15);
    }

    #[tokio::test]
    async fn test_存在しないidの更新と削除は成功扱いになる() {
        let usecase = sut(&MockStudentRepository::new());
        let id = StudentId::from_i64(42);

        let updated = usecase
            .update_student(id, draft("Ann", "ann@x.com", 20))
            .await
            .unwrap();
        let deleted = usecase.delete_student(id).await.unwrap();

        assert_eq!(updated, id);
        assert_eq!(deleted, id);
    }

    #[tokio::test]
    async fn test_ストレージ障害は操作名付きのstorageエラーになる() {
        let usecase = sut(&MockStudentRepository::failing());

        let result = usecase.list_students(Pagination::default()).await;

        assert!(matches!(
            result,
            Err(ApiError::Storage { action, .. }) if action == "Failed to retrieve students"
        ));
    }
}
