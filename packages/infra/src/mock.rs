//! # テスト用モックリポジトリ
//!
//! ハンドラ・ユースケースのテストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! roster-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use roster_domain::student::{Student, StudentId, StudentProfile};

use crate::{error::InfraError, repository::StudentRepository};

// ===== MockStudentRepository =====

#[derive(Clone, Default)]
pub struct MockStudentRepository {
    students: Arc<Mutex<Vec<Student>>>,
    next_id:  Arc<Mutex<i64>>,
    failing:  bool,
}

impl MockStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 全操作がストレージエラーを返すモックを作成する
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// 既存データを持つモックを作成する
    ///
    /// 以降の採番は既存の最大 ID の次から始まる。
    pub fn with_students(students: Vec<Student>) -> Self {
        let max_id = students.iter().map(|s| s.id().as_i64()).max().unwrap_or(0);
        Self {
            students: Arc::new(Mutex::new(students)),
            next_id: Arc::new(Mutex::new(max_id)),
            failing: false,
        }
    }

    /// 現在保持している学生を ID 昇順で返す
    pub fn snapshot(&self) -> Vec<Student> {
        let mut students = self.students.lock().unwrap().clone();
        students.sort_by_key(Student::id);
        students
    }

    fn check(&self) -> Result<(), InfraError> {
        if self.failing {
            Err(InfraError::unexpected("mock storage failure"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl StudentRepository for MockStudentRepository {
    async fn create(&self, profile: &StudentProfile) -> Result<StudentId, InfraError> {
        self.check()?;
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let id = StudentId::from_i64(*next_id);
        self.students
            .lock()
            .unwrap()
            .push(Student::new(id, profile.clone()));
        Ok(id)
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, InfraError> {
        self.check()?;
        Ok(self
            .students
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id() == id)
            .cloned())
    }

    async fn list(&self, limit: u32, offset: u64) -> Result<Vec<Student>, InfraError> {
        self.check()?;
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        Ok(self
            .snapshot()
            .into_iter()
            .skip(offset)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> Result<i64, InfraError> {
        self.check()?;
        Ok(self.students.lock().unwrap().len() as i64)
    }

    async fn update_by_id(
        &self,
        id: StudentId,
        profile: &StudentProfile,
    ) -> Result<u64, InfraError> {
        self.check()?;
        let mut students = self.students.lock().unwrap();
        match students.iter_mut().find(|s| s.id() == id) {
            Some(student) => {
                *student = Student::new(id, profile.clone());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_by_id(&self, id: StudentId) -> Result<u64, InfraError> {
        self.check()?;
        let mut students = self.students.lock().unwrap();
        let before = students.len();
        students.retain(|s| s.id() != id);
        Ok((before - students.len()) as u64)
    }
}
