use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use validator::Validate;

use crate::entities::{brand, mobile};
use crate::error::ApiError;
use crate::services::catalog::{mobile_detail, ProductDetail};
use crate::services::mobiles::{
    apply_inline_edits, color_ids, create_mobile, delete_mobile as delete_mobile_cascade,
    suggested_slug, update_mobile, InlineEdit, MobileForm, MobilePatch,
};

pub fn mobile_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route(
            "/admin/mobile",
            get(list_mobiles).post(create).patch(inline_edit),
        )
        .route(
            "/admin/mobile/:id",
            get(get_mobile).patch(patch_mobile).delete(delete_mobile),
        )
        .route("/admin/slugify", get(slugify))
        .layer(Extension(db))
}

async fn list_mobiles(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Query(query): Query<MobileQuery>,
) -> Result<Json<Vec<MobileRow>>, ApiError> {
    let mut filter = Condition::all();
    if let Some(brand_id) = query.brand_id {
        filter = filter.add(mobile::Column::BrandId.eq(brand_id));
    }
    if let Some(model_name) = &query.model_name {
        filter = filter.add(mobile::Column::ModelName.contains(model_name.as_str()));
    }
    if let Some(release_date) = query.release_date {
        filter = filter.add(mobile::Column::ReleaseDate.eq(release_date));
    }
    if let Some(year) = query.release_year {
        let (first, last) = year_bounds(year)?;
        filter = filter.add(mobile::Column::ReleaseDate.between(first, last));
    }
    if let Some(inventory) = query.inventory {
        filter = filter.add(mobile::Column::Inventory.eq(inventory));
    }

    let rows = mobile::Entity::find()
        .filter(filter)
        .find_also_related(brand::Entity)
        .order_by_asc(mobile::Column::Id)
        .all(&*db)
        .await?
        .into_iter()
        .map(|(mobile, brand)| MobileRow {
            id: mobile.id,
            brand: brand.map(|b| b.name),
            model_name: mobile.model_name,
            slug: mobile.slug,
            release_date: mobile.release_date,
            price: mobile.price,
            inventory: mobile.inventory,
        })
        .collect();

    Ok(Json(rows))
}

async fn create(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<MobileForm>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;

    let txn = db.begin().await?;
    let created = create_mobile(&txn, payload).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_mobile(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Json<AdminMobile>, ApiError> {
    let detail = mobile_detail(&*db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No mobile with id {id} was found.")))?;
    let color_ids = color_ids(&*db, id).await?;

    Ok(Json(AdminMobile { detail, color_ids }))
}

async fn patch_mobile(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<MobilePatch>,
) -> Result<Json<mobile::Model>, ApiError> {
    payload.validate()?;

    let txn = db.begin().await?;
    let updated = update_mobile(&txn, id, payload).await?;
    txn.commit().await?;

    Ok(Json(updated))
}

/// List-editable price and inventory, all rows or none.
async fn inline_edit(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<Vec<InlineEdit>>,
) -> Result<Json<Vec<mobile::Model>>, ApiError> {
    let txn = db.begin().await?;
    let updated = apply_inline_edits(&txn, payload).await?;
    txn.commit().await?;

    Ok(Json(updated))
}

async fn delete_mobile(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<StatusCode, ApiError> {
    let txn = db.begin().await?;
    delete_mobile_cascade(&txn, id).await?;
    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn slugify(Query(query): Query<SlugifyQuery>) -> Result<Json<Value>, ApiError> {
    let slug = suggested_slug(&query.model_name)?;
    Ok(Json(json!({ "slug": slug })))
}

fn year_bounds(year: i32) -> Result<(NaiveDate, NaiveDate), ApiError> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1);
    let last = NaiveDate::from_ymd_opt(year, 12, 31);
    match (first, last) {
        (Some(first), Some(last)) => Ok((first, last)),
        _ => Err(ApiError::BadRequest(format!("Invalid release year {year}."))),
    }
}

#[derive(Deserialize)]
struct MobileQuery {
    brand_id: Option<i32>,
    model_name: Option<String>,
    release_date: Option<NaiveDate>,
    release_year: Option<i32>,
    inventory: Option<bool>,
}

#[derive(Deserialize)]
struct SlugifyQuery {
    model_name: String,
}

#[derive(Serialize)]
struct MobileRow {
    id: i32,
    brand: Option<String>,
    model_name: String,
    slug: String,
    release_date: NaiveDate,
    price: Decimal,
    inventory: bool,
}

#[derive(Serialize)]
struct AdminMobile {
    #[serde(flatten)]
    detail: ProductDetail,
    color_ids: Vec<i32>,
}
