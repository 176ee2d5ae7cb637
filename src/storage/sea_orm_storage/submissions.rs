//! 提交存储操作

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{AutogradError, Result};
use crate::models::{
    Cursor, SortDirection,
    submissions::entities::{NewSubmission, Submission},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建提交
    pub async fn create_submission_impl(&self, submission: NewSubmission) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            assignment_id: Set(submission.assignment_id),
            submitted_by: Set(submission.submitted_by),
            file_url: Set(submission.file_url.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(result) => Ok(result.into_submission()),
            Err(e) => {
                tracing::error!(
                    parent: &self.span,
                    submission = ?submission,
                    error = %e,
                    "创建提交失败"
                );
                Err(AutogradError::from(e))
            }
        }
    }

    /// 按作业分页查询提交
    ///
    /// 先计数、再取页，两次查询之间没有事务：并发写入时总数可能与当页数据略有出入。
    /// 计数失败时直接返回错误，不会发起取页查询。
    pub async fn find_submissions_by_assignment_id_impl(
        &self,
        cursor: &Cursor,
        assignment_id: i64,
    ) -> Result<(Vec<Submission>, u64)> {
        let count = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .count(&self.db)
            .await
            .map_err(|e| {
                tracing::error!(
                    parent: &self.span,
                    assignment_id,
                    error = %e,
                    "查询提交总数失败"
                );
                AutogradError::from(e)
            })?;

        let select = Submissions::find().filter(Column::AssignmentId.eq(assignment_id));

        // 同一秒内创建的记录按 ID 决定先后
        let select = match cursor.sort() {
            SortDirection::Asc => select
                .order_by_asc(Column::CreatedAt)
                .order_by_asc(Column::Id),
            SortDirection::Desc => select
                .order_by_desc(Column::CreatedAt)
                .order_by_desc(Column::Id),
        };

        let submissions = select
            .limit(cursor.size())
            .offset(cursor.offset())
            .all(&self.db)
            .await
            .map_err(|e| {
                tracing::error!(
                    parent: &self.span,
                    assignment_id,
                    cursor = ?cursor,
                    error = %e,
                    "查询提交列表失败"
                );
                AutogradError::from(e)
            })?;

        Ok((
            submissions.into_iter().map(|m| m.into_submission()).collect(),
            count,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::submissions::ActiveModel as SubmissionActiveModel;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::{memory_storage, seed_assignment};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, Value};
    use std::collections::BTreeMap;

    fn new_submission(assignment_id: i64, submitted_by: i64) -> NewSubmission {
        NewSubmission {
            assignment_id,
            submitted_by,
            file_url: format!("/api/v1/uploads/{submitted_by}.bin"),
        }
    }

    /// 直接写入一条带指定创建时间的提交
    async fn insert_at(storage: &SeaOrmStorage, assignment_id: i64, n: i64) -> i64 {
        insert_with_time(storage, assignment_id, n, 1_700_000_000 + n).await
    }

    async fn insert_with_time(
        storage: &SeaOrmStorage,
        assignment_id: i64,
        n: i64,
        created_at: i64,
    ) -> i64 {
        let model = SubmissionActiveModel {
            assignment_id: Set(assignment_id),
            submitted_by: Set(n),
            file_url: Set(format!("/api/v1/uploads/{n}.bin")),
            created_at: Set(created_at),
            updated_at: Set(created_at),
            ..Default::default()
        };
        model.insert(&storage.db).await.unwrap().id
    }

    #[tokio::test]
    async fn test_create_then_list_contains_submission_once() {
        let storage = memory_storage().await;
        let assignment_id = seed_assignment(&storage, "lab-1").await;

        let created = storage
            .create_submission(new_submission(assignment_id, 42))
            .await
            .unwrap();
        assert!(created.id > 0);
        assert_eq!(created.assignment_id, assignment_id);
        assert_eq!(created.submitted_by, 42);

        let (items, count) = storage
            .find_submissions_by_assignment_id(&Cursor::default(), assignment_id)
            .await
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(items.iter().filter(|s| s.id == created.id).count(), 1);
        assert_eq!(items[0], created);
    }

    #[tokio::test]
    async fn test_second_page_of_25() {
        let storage = memory_storage().await;
        let assignment_id = seed_assignment(&storage, "lab-2").await;
        let other_assignment = seed_assignment(&storage, "lab-3").await;

        let mut ids = Vec::new();
        for n in 1..=25 {
            ids.push(insert_at(&storage, assignment_id, n).await);
        }
        insert_at(&storage, other_assignment, 100).await;

        let cursor = Cursor::new(2, 10, SortDirection::Asc);
        let (items, count) = storage
            .find_submissions_by_assignment_id(&cursor, assignment_id)
            .await
            .unwrap();

        assert_eq!(count, 25);
        assert_eq!(cursor.total_page(count), 3);
        let got: Vec<i64> = items.iter().map(|s| s.id).collect();
        assert_eq!(got, ids[10..20].to_vec());
    }

    #[tokio::test]
    async fn test_descending_order() {
        let storage = memory_storage().await;
        let assignment_id = seed_assignment(&storage, "lab-4").await;
        for n in 1..=3 {
            insert_at(&storage, assignment_id, n).await;
        }

        let cursor = Cursor::new(1, 10, SortDirection::Desc);
        let (items, _) = storage
            .find_submissions_by_assignment_id(&cursor, assignment_id)
            .await
            .unwrap();
        let submitters: Vec<i64> = items.iter().map(|s| s.submitted_by).collect();
        assert_eq!(submitters, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_ties_on_created_at_are_ordered_by_id() {
        let storage = memory_storage().await;
        let assignment_id = seed_assignment(&storage, "lab-5").await;
        let first = insert_with_time(&storage, assignment_id, 1, 1_700_000_000).await;
        let second = insert_with_time(&storage, assignment_id, 2, 1_700_000_000).await;

        let (items, _) = storage
            .find_submissions_by_assignment_id(
                &Cursor::new(1, 10, SortDirection::Desc),
                assignment_id,
            )
            .await
            .unwrap();
        let got: Vec<i64> = items.iter().map(|s| s.id).collect();
        assert_eq!(got, vec![second, first]);

        let (items, _) = storage
            .find_submissions_by_assignment_id(
                &Cursor::new(1, 10, SortDirection::Asc),
                assignment_id,
            )
            .await
            .unwrap();
        let got: Vec<i64> = items.iter().map(|s| s.id).collect();
        assert_eq!(got, vec![first, second]);
    }

    #[tokio::test]
    async fn test_unknown_assignment_is_empty_not_error() {
        let storage = memory_storage().await;
        let (items, count) = storage
            .find_submissions_by_assignment_id(&Cursor::default(), 9_999)
            .await
            .unwrap();
        assert!(items.is_empty());
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_create_with_missing_assignment_violates_constraint() {
        let storage = memory_storage().await;
        let err = storage
            .create_submission(new_submission(12_345, 1))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E006");
    }

    #[tokio::test]
    async fn test_count_failure_skips_fetch() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let storage = SeaOrmStorage::from_connection(db.clone());

        let err = storage
            .find_submissions_by_assignment_id(&Cursor::default(), 1)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E005");

        // 只有计数查询被发出
        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_discards_count() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([vec![BTreeMap::from([(
                "num_items",
                Value::BigInt(Some(3)),
            )])]])
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let storage = SeaOrmStorage::from_connection(db.clone());

        let err = storage
            .find_submissions_by_assignment_id(&Cursor::default(), 1)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E005");

        // 计数与取页各一条
        assert_eq!(db.into_transaction_log().len(), 2);
    }
}
