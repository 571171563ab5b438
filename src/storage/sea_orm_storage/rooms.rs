//! Room storage and the availability query.

use super::SeaOrmStorage;
use crate::entity::{rooms, schedules};
use crate::errors::{LmsError, Result};
use crate::models::{
    PaginationInfo,
    rooms::{
        entities::{Room, RoomStatus},
        requests::{NewRoom, RoomPatch, RoomQueryParams},
        responses::RoomListResponse,
    },
};
use crate::utils::escape_like_pattern;
use chrono::{NaiveDate, NaiveTime};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_room_impl(&self, room: NewRoom) -> Result<Room> {
        let now = chrono::Utc::now().timestamp();

        let model = rooms::ActiveModel {
            name: Set(room.name),
            capacity: Set(room.capacity),
            room_type: Set(room.room_type),
            location: Set(room.location),
            status: Set(room.status.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;
        Ok(result.into_room())
    }

    pub async fn get_room_impl(&self, room_id: i64) -> Result<Option<Room>> {
        let result = rooms::Entity::find_by_id(room_id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Room lookup failed: {e}")))?;

        Ok(result.map(|m| m.into_room()))
    }

    pub async fn list_rooms_impl(&self, query: RoomQueryParams) -> Result<RoomListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.per_page.clamp(1, 100) as u64;

        let mut select = rooms::Entity::find();

        if let Some(ref status) = query.status {
            select = select.filter(rooms::Column::Status.eq(status.to_ascii_uppercase()));
        }

        if let Some(min_capacity) = query.min_capacity {
            select = select.filter(rooms::Column::Capacity.gte(min_capacity));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(rooms::Column::Name.contains(&escaped));
        }

        let paginator = select.order_by_asc(rooms::Column::Id).paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LmsError::database_operation(format!("Room count failed: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LmsError::database_operation(format!("Room page count failed: {e}")))?;
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LmsError::database_operation(format!("Room list failed: {e}")))?;

        Ok(RoomListResponse {
            items: rows.into_iter().map(|m| m.into_room()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                per_page: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    pub async fn update_room_impl(&self, room_id: i64, patch: RoomPatch) -> Result<Option<Room>> {
        let existing = self.get_room_impl(room_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();
        let mut model = rooms::ActiveModel {
            id: Set(room_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = patch.name {
            model.name = Set(name);
        }
        if let Some(capacity) = patch.capacity {
            model.capacity = Set(capacity);
        }
        if let Some(room_type) = patch.room_type {
            model.room_type = Set(Some(room_type));
        }
        if let Some(location) = patch.location {
            model.location = Set(Some(location));
        }
        if let Some(status) = patch.status {
            model.status = Set(status.as_str().to_string());
        }

        model.update(&self.db).await?;
        self.get_room_impl(room_id).await
    }

    /// Delete a room unless sessions are still booked into it.
    pub async fn delete_room_impl(&self, room_id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        let sessions = schedules::Entity::find()
            .filter(schedules::Column::RoomId.eq(room_id))
            .count(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Schedule count failed: {e}")))?;
        if sessions > 0 {
            return Err(LmsError::conflict(format!(
                "Room {room_id} still has {sessions} scheduled session(s)"
            )));
        }

        let result = rooms::Entity::delete_by_id(room_id)
            .exec(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("Room delete failed: {e}")))?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }

    /// AVAILABLE rooms with no session overlapping `[start_time, end_time)`
    /// on `date`, optionally filtered by a capacity floor.
    pub async fn find_available_rooms_impl(
        &self,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        min_capacity: Option<i32>,
    ) -> Result<Vec<Room>> {
        let busy: Vec<i64> = schedules::Entity::find()
            .select_only()
            .column(schedules::Column::RoomId)
            .filter(schedules::Column::ScheduleDate.eq(date))
            .filter(schedules::Column::StartTime.lt(end_time))
            .filter(schedules::Column::EndTime.gt(start_time))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Busy-room query failed: {e}")))?;

        let mut select = rooms::Entity::find()
            .filter(rooms::Column::Status.eq(RoomStatus::Available.as_str()));

        if let Some(min) = min_capacity {
            select = select.filter(rooms::Column::Capacity.gte(min));
        }

        if !busy.is_empty() {
            select = select.filter(rooms::Column::Id.is_not_in(busy));
        }

        let rows = select
            .order_by_asc(rooms::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("Room list failed: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_room()).collect())
    }
}
