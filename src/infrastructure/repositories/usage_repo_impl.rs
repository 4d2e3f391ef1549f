// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::models::usage::{DailyUsage, UsageKind};
use crate::domain::repositories::task_repository::RepositoryError;
use crate::domain::repositories::usage_repository::UsageRepository;
use crate::infrastructure::database::entities::daily_usage;

/// 每日用量账本仓库实现
pub struct UsageRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl UsageRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn column(kind: UsageKind) -> daily_usage::Column {
        match kind {
            UsageKind::LeadsSearched => daily_usage::Column::LeadsSearched,
            UsageKind::LeadsEnriched => daily_usage::Column::LeadsEnriched,
            UsageKind::LeadsInvestigated => daily_usage::Column::LeadsInvestigated,
            UsageKind::SearchRuns => daily_usage::Column::SearchRuns,
        }
    }
}

impl From<daily_usage::Model> for DailyUsage {
    fn from(model: daily_usage::Model) -> Self {
        Self {
            id: model.id,
            organization_id: model.organization_id,
            usage_date: model.usage_date,
            leads_searched: model.leads_searched,
            leads_enriched: model.leads_enriched,
            leads_investigated: model.leads_investigated,
            search_runs: model.search_runs,
            updated_at: model.updated_at,
        }
    }
}

#[async_trait]
impl UsageRepository for UsageRepositoryImpl {
    async fn get_or_create(
        &self,
        organization_id: Uuid,
        usage_date: NaiveDate,
    ) -> Result<DailyUsage, RepositoryError> {
        let existing = daily_usage::Entity::find()
            .filter(daily_usage::Column::OrganizationId.eq(organization_id))
            .filter(daily_usage::Column::UsageDate.eq(usage_date))
            .one(self.db.as_ref())
            .await?;

        if let Some(model) = existing {
            return Ok(model.into());
        }

        // Initialize with zero counters if not exists
        let fresh = DailyUsage::new(organization_id, usage_date);
        let active = daily_usage::ActiveModel {
            id: Set(fresh.id),
            organization_id: Set(fresh.organization_id),
            usage_date: Set(fresh.usage_date),
            leads_searched: Set(0),
            leads_enriched: Set(0),
            leads_investigated: Set(0),
            search_runs: Set(0),
            updated_at: Set(Utc::now().fixed_offset()),
        };
        active.insert(self.db.as_ref()).await?;

        Ok(fresh)
    }

    async fn try_consume(
        &self,
        organization_id: Uuid,
        usage_date: NaiveDate,
        kind: UsageKind,
        amount: i32,
        limit: i32,
    ) -> Result<bool, RepositoryError> {
        // 确保当日行存在，条件更新才有作用对象
        self.get_or_create(organization_id, usage_date).await?;

        let column = Self::column(kind);

        // 单条语句条件递增：仅在 count + amount <= limit 时生效
        let result = daily_usage::Entity::update_many()
            .col_expr(column, Expr::col(column).add(amount))
            .col_expr(
                daily_usage::Column::UpdatedAt,
                Expr::value(Utc::now().fixed_offset()),
            )
            .filter(daily_usage::Column::OrganizationId.eq(organization_id))
            .filter(daily_usage::Column::UsageDate.eq(usage_date))
            .filter(Expr::col(column).lte(limit - amount))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn record_search(
        &self,
        organization_id: Uuid,
        usage_date: NaiveDate,
        leads_found: i32,
        search_run_limit: i32,
    ) -> Result<bool, RepositoryError> {
        self.get_or_create(organization_id, usage_date).await?;

        // search_runs 与 leads_searched 在一条语句内一起递增
        let result = daily_usage::Entity::update_many()
            .col_expr(
                daily_usage::Column::SearchRuns,
                Expr::col(daily_usage::Column::SearchRuns).add(1),
            )
            .col_expr(
                daily_usage::Column::LeadsSearched,
                Expr::col(daily_usage::Column::LeadsSearched).add(leads_found),
            )
            .col_expr(
                daily_usage::Column::UpdatedAt,
                Expr::value(Utc::now().fixed_offset()),
            )
            .filter(daily_usage::Column::OrganizationId.eq(organization_id))
            .filter(daily_usage::Column::UsageDate.eq(usage_date))
            .filter(daily_usage::Column::SearchRuns.lt(search_run_limit))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected > 0)
    }
}
