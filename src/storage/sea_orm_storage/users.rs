//! Identity storage: teachers, students and admins in separate tables.

use super::SeaOrmStorage;
use crate::entity::{admins, students, teachers};
use crate::errors::{LmsError, Result};
use crate::models::{
    PaginationInfo,
    users::{
        entities::{Principal, Student, Teacher},
        requests::{CreateStudentRequest, CreateTeacherRequest, UserQueryParams},
        responses::{StudentListResponse, TeacherListResponse},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl SeaOrmStorage {
    /// Allocate a fresh `<prefix>########` id, retrying on the rare clash.
    async fn allocate_user_id(&self, prefix: char) -> Result<String> {
        for _ in 0..16 {
            let digits: u32 = {
                use rand::Rng;
                rand::rng().random_range(10_000_000..100_000_000)
            };
            let candidate = format!("{prefix}{digits}");

            let taken = match prefix {
                'T' => teachers::Entity::find_by_id(&candidate)
                    .one(&self.db)
                    .await
                    .map_err(|e| {
                        LmsError::database_operation(format!("Id lookup failed: {e}"))
                    })?
                    .is_some(),
                'S' => students::Entity::find_by_id(&candidate)
                    .one(&self.db)
                    .await
                    .map_err(|e| {
                        LmsError::database_operation(format!("Id lookup failed: {e}"))
                    })?
                    .is_some(),
                _ => admins::Entity::find_by_id(&candidate)
                    .one(&self.db)
                    .await
                    .map_err(|e| {
                        LmsError::database_operation(format!("Id lookup failed: {e}"))
                    })?
                    .is_some(),
            };

            if !taken {
                return Ok(candidate);
            }
        }
        Err(LmsError::internal("Exhausted user id allocation retries"))
    }

    pub async fn create_teacher_impl(
        &self,
        req: CreateTeacherRequest,
        password_hash: String,
    ) -> Result<Teacher> {
        let now = chrono::Utc::now().timestamp();
        let id = self.allocate_user_id('T').await?;

        let model = teachers::ActiveModel {
            id: Set(id),
            full_name: Set(req.full_name),
            email: Set(req.email),
            password_hash: Set(password_hash),
            phone: Set(req.phone),
            specialization: Set(req.specialization),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(&self.db).await?;
        Ok(result.into_teacher())
    }

    pub async fn create_student_impl(
        &self,
        req: CreateStudentRequest,
        password_hash: String,
    ) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();
        let id = self.allocate_user_id('S').await?;

        let model = students::ActiveModel {
            id: Set(id),
            full_name: Set(req.full_name),
            email: Set(req.email),
            password_hash: Set(password_hash),
            phone: Set(req.phone),
            target_score: Set(req.target_score),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(&self.db).await?;
        Ok(result.into_student())
    }

    pub async fn create_admin_impl(
        &self,
        full_name: &str,
        email: &str,
        password_hash: String,
    ) -> Result<Principal> {
        let now = chrono::Utc::now().timestamp();
        let id = self.allocate_user_id('A').await?;

        let model = admins::ActiveModel {
            id: Set(id),
            full_name: Set(full_name.to_string()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(&self.db).await?;
        Ok(result.into_principal())
    }

    pub async fn get_teacher_by_id_impl(&self, id: &str) -> Result<Option<Teacher>> {
        let result = teachers::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Teacher lookup failed: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    pub async fn list_teachers_impl(&self, query: UserQueryParams) -> Result<TeacherListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.per_page.clamp(1, 100) as u64;

        let mut select = teachers::Entity::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(teachers::Column::FullName.contains(&escaped))
                    .add(teachers::Column::Email.contains(&escaped)),
            );
        }

        let paginator = select
            .order_by_asc(teachers::Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LmsError::database_operation(format!("Teacher count failed: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LmsError::database_operation(format!("Teacher page count failed: {e}")))?;
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LmsError::database_operation(format!("Teacher list failed: {e}")))?;

        Ok(TeacherListResponse {
            items: rows.into_iter().map(|m| m.into_teacher()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                per_page: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    pub async fn list_students_impl(&self, query: UserQueryParams) -> Result<StudentListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.per_page.clamp(1, 100) as u64;

        let mut select = students::Entity::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(students::Column::FullName.contains(&escaped))
                    .add(students::Column::Email.contains(&escaped)),
            );
        }

        let paginator = select
            .order_by_asc(students::Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LmsError::database_operation(format!("Student count failed: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LmsError::database_operation(format!("Student page count failed: {e}")))?;
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LmsError::database_operation(format!("Student list failed: {e}")))?;

        Ok(StudentListResponse {
            items: rows.into_iter().map(|m| m.into_student()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                per_page: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// Probe the three populations in teacher, student, admin order.
    pub async fn find_principal_by_email_impl(&self, email: &str) -> Result<Option<Principal>> {
        if let Some(m) = teachers::Entity::find()
            .filter(teachers::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Teacher lookup failed: {e}")))?
        {
            return Ok(Some(m.into_principal()));
        }

        if let Some(m) = students::Entity::find()
            .filter(students::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Student lookup failed: {e}")))?
        {
            return Ok(Some(m.into_principal()));
        }

        if let Some(m) = admins::Entity::find()
            .filter(admins::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Admin lookup failed: {e}")))?
        {
            return Ok(Some(m.into_principal()));
        }

        Ok(None)
    }

    /// The id prefix names the table.
    pub async fn find_principal_by_id_impl(&self, id: &str) -> Result<Option<Principal>> {
        match id.chars().next() {
            Some('T') => {
                let m = teachers::Entity::find_by_id(id).one(&self.db).await.map_err(|e| {
                    LmsError::database_operation(format!("Teacher lookup failed: {e}"))
                })?;
                Ok(m.map(|m| m.into_principal()))
            }
            Some('S') => {
                let m = students::Entity::find_by_id(id).one(&self.db).await.map_err(|e| {
                    LmsError::database_operation(format!("Student lookup failed: {e}"))
                })?;
                Ok(m.map(|m| m.into_principal()))
            }
            Some('A') => {
                let m = admins::Entity::find_by_id(id).one(&self.db).await.map_err(|e| {
                    LmsError::database_operation(format!("Admin lookup failed: {e}"))
                })?;
                Ok(m.map(|m| m.into_principal()))
            }
            _ => Ok(None),
        }
    }

    /// Emails are unique across all three populations.
    pub async fn email_in_use_impl(&self, email: &str) -> Result<bool> {
        Ok(self.find_principal_by_email_impl(email).await?.is_some())
    }

    pub async fn count_admins_impl(&self) -> Result<u64> {
        admins::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Admin count failed: {e}")))
    }

    /// Display names for scoreboard rows, one query for the whole roster.
    pub async fn student_names_impl(
        &self,
        student_ids: &[String],
    ) -> Result<std::collections::HashMap<String, String>> {
        if student_ids.is_empty() {
            return Ok(Default::default());
        }

        let rows = students::Entity::find()
            .filter(students::Column::Id.is_in(student_ids.iter().cloned()))
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Student lookup failed: {e}")))?;

        Ok(rows.into_iter().map(|m| (m.id, m.full_name)).collect())
    }
}
