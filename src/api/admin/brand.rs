use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use validator::Validate;

use crate::entities::{brand, mobile};
use crate::error::ApiError;
use crate::services::mobiles::delete_brand as delete_brand_cascade;

pub const BRAND_PAGE_SIZE: usize = 10;

pub fn brand_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/admin/brand", get(list_brands).post(create_brand))
        .route(
            "/admin/brand/:id",
            get(get_brand).patch(patch_brand).delete(delete_brand),
        )
        .layer(Extension(db))
}

async fn list_brands(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Query(query): Query<BrandQuery>,
) -> Result<Json<BrandPage>, ApiError> {
    let mut filter = Condition::all();
    if let Some(name) = &query.name {
        filter = filter.add(brand::Column::Name.eq(name.as_str()));
    }

    let brands = brand::Entity::find()
        .filter(filter)
        .order_by_asc(brand::Column::Id)
        .all(&*db)
        .await?;

    let counts: HashMap<i32, i64> = mobile::Entity::find()
        .select_only()
        .column(mobile::Column::BrandId)
        .column_as(mobile::Column::Id.count(), "mobile_count")
        .group_by(mobile::Column::BrandId)
        .into_tuple::<(i32, i64)>()
        .all(&*db)
        .await?
        .into_iter()
        .collect();

    let mut rows: Vec<BrandRow> = brands
        .into_iter()
        .map(|brand| BrandRow {
            mobile_count: counts.get(&brand.id).copied().unwrap_or(0),
            mobiles_url: format!("/admin/mobile?brand_id={}", brand.id),
            id: brand.id,
            name: brand.name,
        })
        .collect();

    match query.order.as_deref() {
        Some("mobile_count") => rows.sort_by_key(|row| (row.mobile_count, row.id)),
        Some("-mobile_count") => {
            rows.sort_by_key(|row| (std::cmp::Reverse(row.mobile_count), row.id))
        }
        Some(other) => {
            return Err(ApiError::BadRequest(format!(
                "Unsupported ordering '{other}'."
            )))
        }
        None => {}
    }

    let page = query.page.unwrap_or(1).max(1);
    let total = rows.len();
    let num_pages = total.div_ceil(BRAND_PAGE_SIZE).max(1);
    if page > num_pages {
        return Err(ApiError::NotFound(format!(
            "Page {page} is out of range, there are {num_pages} page(s)."
        )));
    }
    let results = rows
        .into_iter()
        .skip((page - 1) * BRAND_PAGE_SIZE)
        .take(BRAND_PAGE_SIZE)
        .collect();

    Ok(Json(BrandPage {
        count: total,
        page,
        num_pages,
        results,
    }))
}

async fn create_brand(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<BrandPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;

    let created = brand::ActiveModel {
        name: Set(payload.name),
        ..Default::default()
    }
    .insert(&*db)
    .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_brand(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Json<brand::Model>, ApiError> {
    Ok(Json(find_brand(&db, id).await?))
}

async fn patch_brand(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<BrandPayload>,
) -> Result<Json<brand::Model>, ApiError> {
    payload.validate()?;

    let mut active: brand::ActiveModel = find_brand(&db, id).await?.into();
    active.name = Set(payload.name);
    Ok(Json(active.update(&*db).await?))
}

async fn delete_brand(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<StatusCode, ApiError> {
    let txn = db.begin().await?;
    delete_brand_cascade(&txn, id).await?;
    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn find_brand(db: &DatabaseConnection, id: i32) -> Result<brand::Model, ApiError> {
    brand::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No brand with id {id} was found.")))
}

#[derive(Deserialize)]
struct BrandQuery {
    name: Option<String>,
    page: Option<usize>,
    order: Option<String>,
}

#[derive(Deserialize, Validate)]
struct BrandPayload {
    #[validate(length(min = 1, max = 100))]
    name: String,
}

#[derive(Serialize)]
struct BrandRow {
    id: i32,
    name: String,
    mobile_count: i64,
    /// Phone changelist pre-filtered to this brand.
    mobiles_url: String,
}

#[derive(Serialize)]
struct BrandPage {
    count: usize,
    page: usize,
    num_pages: usize,
    results: Vec<BrandRow>,
}
