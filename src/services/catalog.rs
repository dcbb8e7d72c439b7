//! Read side of the public pages.
//!
//! The store gives no ordering guarantee, so every list here is sorted by
//! ascending primary key.

use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::Serialize;

use crate::entities::{brand, color, gallery_image, mobile, slider_image};
use crate::services::specs::SpecSheets;

/// How many same-brand phones the detail page suggests.
pub const SIMILAR_PRODUCTS_LIMIT: u64 = 3;

#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub mobile: mobile::Model,
    pub brand: Option<brand::Model>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogListing {
    pub mobiles: Vec<CatalogEntry>,
    pub slider_images: Vec<slider_image::Model>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    pub mobile: mobile::Model,
    pub brand: Option<brand::Model>,
    pub colors: Vec<color::Model>,
    pub gallery: Vec<gallery_image::Model>,
    pub specs: SpecSheets,
    pub similar: Vec<mobile::Model>,
}

pub async fn catalog_listing<C: ConnectionTrait>(db: &C) -> Result<CatalogListing, DbErr> {
    let mobiles = mobile::Entity::find()
        .find_also_related(brand::Entity)
        .order_by_asc(mobile::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(|(mobile, brand)| CatalogEntry { mobile, brand })
        .collect();

    Ok(CatalogListing {
        mobiles,
        slider_images: active_slider_images(db).await?,
    })
}

pub async fn active_slider_images<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<slider_image::Model>, DbErr> {
    slider_image::Entity::find()
        .filter(slider_image::Column::IsActive.eq(true))
        .order_by_asc(slider_image::Column::Id)
        .all(db)
        .await
}

/// Up to [`SIMILAR_PRODUCTS_LIMIT`] other phones of the same brand.
pub async fn similar_products<C: ConnectionTrait>(
    db: &C,
    product: &mobile::Model,
) -> Result<Vec<mobile::Model>, DbErr> {
    mobile::Entity::find()
        .filter(mobile::Column::BrandId.eq(product.brand_id))
        .filter(mobile::Column::Id.ne(product.id))
        .order_by_asc(mobile::Column::Id)
        .limit(SIMILAR_PRODUCTS_LIMIT)
        .all(db)
        .await
}

pub async fn product_detail<C: ConnectionTrait>(
    db: &C,
    slug: &str,
) -> Result<Option<ProductDetail>, DbErr> {
    let found = mobile::Entity::find()
        .filter(mobile::Column::Slug.eq(slug))
        .find_also_related(brand::Entity)
        .one(db)
        .await?;

    match found {
        Some((mobile, brand)) => Ok(Some(load_detail(db, mobile, brand).await?)),
        None => Ok(None),
    }
}

pub async fn mobile_detail<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<ProductDetail>, DbErr> {
    let found = mobile::Entity::find_by_id(id)
        .find_also_related(brand::Entity)
        .one(db)
        .await?;

    match found {
        Some((mobile, brand)) => Ok(Some(load_detail(db, mobile, brand).await?)),
        None => Ok(None),
    }
}

async fn load_detail<C: ConnectionTrait>(
    db: &C,
    mobile: mobile::Model,
    brand: Option<brand::Model>,
) -> Result<ProductDetail, DbErr> {
    let colors = mobile
        .find_related(color::Entity)
        .order_by_asc(color::Column::Id)
        .all(db)
        .await?;
    let gallery = mobile
        .find_related(gallery_image::Entity)
        .order_by_asc(gallery_image::Column::Id)
        .all(db)
        .await?;
    let specs = SpecSheets::load(db, mobile.id).await?;
    let similar = similar_products(db, &mobile).await?;

    Ok(ProductDetail {
        mobile,
        brand,
        colors,
        gallery,
        specs,
        similar,
    })
}
