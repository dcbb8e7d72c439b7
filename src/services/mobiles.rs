//! Write side of the phone catalog: validation, color links and the
//! cascade/protect deletion policy.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::entities::{
    battery, body, brand, color, display, function, gallery_image, image, main_camera, memory,
    mobile, mobile_color, network, other_features, selfie_camera, sound,
};
use crate::error::CatalogError;
use crate::services::slug::{slugify, SLUG_REGEX};
use crate::services::specs::{delete_sheet, sheet_exists, SpecSheet};

/// Largest price a `DECIMAL(10, 2)` column holds, exclusive.
const PRICE_CEILING: i64 = 100_000_000;

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct MobileForm {
    pub brand_id: i32,
    #[validate(length(min = 1, max = 100))]
    pub model_name: String,
    #[validate(length(min = 1))]
    pub description: String,
    /// Suggested from `model_name` when omitted.
    #[validate(regex(path = *SLUG_REGEX))]
    pub slug: Option<String>,
    #[serde(default)]
    pub inventory: bool,
    pub price: Decimal,
    #[validate(length(min = 1, max = 255))]
    pub screen_size: String,
    #[validate(length(min = 1, max = 255))]
    pub battery_capacity: String,
    #[validate(length(min = 1, max = 255))]
    pub camera_resolution: String,
    #[validate(length(min = 1, max = 255))]
    pub storage_capacity: String,
    #[validate(range(min = 0))]
    pub ram: i32,
    #[validate(length(min = 1, max = 50))]
    pub operating_system: String,
    pub image_default_id: i32,
    pub release_date: NaiveDate,
    #[serde(default)]
    pub colors: Vec<i32>,
}

#[derive(Deserialize, Validate, Debug, Clone, Default)]
pub struct MobilePatch {
    pub brand_id: Option<i32>,
    #[validate(length(min = 1, max = 100))]
    pub model_name: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(regex(path = *SLUG_REGEX))]
    pub slug: Option<String>,
    pub inventory: Option<bool>,
    pub price: Option<Decimal>,
    #[validate(length(min = 1, max = 255))]
    pub screen_size: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub battery_capacity: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub camera_resolution: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub storage_capacity: Option<String>,
    #[validate(range(min = 0))]
    pub ram: Option<i32>,
    #[validate(length(min = 1, max = 50))]
    pub operating_system: Option<String>,
    pub image_default_id: Option<i32>,
    pub release_date: Option<NaiveDate>,
    pub colors: Option<Vec<i32>>,
}

/// One row of the list-editable changelist columns.
#[derive(Deserialize, Debug, Clone)]
pub struct InlineEdit {
    pub id: i32,
    pub price: Option<Decimal>,
    pub inventory: Option<bool>,
}

pub async fn create_mobile<C: ConnectionTrait>(
    db: &C,
    form: MobileForm,
) -> Result<mobile::Model, CatalogError> {
    let slug = match form.slug {
        Some(slug) => slug,
        None => suggested_slug(&form.model_name)?,
    };

    check_price(&form.price)?;
    ensure_brand(db, form.brand_id).await?;
    ensure_image(db, form.image_default_id).await?;
    ensure_unique(db, Some(&form.model_name), Some(&slug), None).await?;

    let created = mobile::ActiveModel {
        brand_id: Set(form.brand_id),
        model_name: Set(form.model_name),
        description: Set(form.description),
        slug: Set(slug),
        inventory: Set(form.inventory),
        price: Set(form.price),
        screen_size: Set(form.screen_size),
        battery_capacity: Set(form.battery_capacity),
        camera_resolution: Set(form.camera_resolution),
        storage_capacity: Set(form.storage_capacity),
        ram: Set(form.ram),
        operating_system: Set(form.operating_system),
        image_default_id: Set(form.image_default_id),
        release_date: Set(form.release_date),
        ..Default::default()
    }
    .insert(db)
    .await?;

    set_colors(db, created.id, &form.colors).await?;
    info!(mobile_id = created.id, slug = %created.slug, "Created mobile");
    Ok(created)
}

pub async fn update_mobile<C: ConnectionTrait>(
    db: &C,
    id: i32,
    patch: MobilePatch,
) -> Result<mobile::Model, CatalogError> {
    let current = find_mobile(db, id).await?;

    if let Some(price) = &patch.price {
        check_price(price)?;
    }
    if let Some(brand_id) = patch.brand_id {
        ensure_brand(db, brand_id).await?;
    }
    if let Some(image_id) = patch.image_default_id {
        ensure_image(db, image_id).await?;
    }
    ensure_unique(
        db,
        patch.model_name.as_deref(),
        patch.slug.as_deref(),
        Some(id),
    )
    .await?;

    let mut active: mobile::ActiveModel = current.into();
    if let Some(brand_id) = patch.brand_id {
        active.brand_id = Set(brand_id);
    }
    if let Some(model_name) = patch.model_name {
        active.model_name = Set(model_name);
    }
    if let Some(description) = patch.description {
        active.description = Set(description);
    }
    if let Some(slug) = patch.slug {
        active.slug = Set(slug);
    }
    if let Some(inventory) = patch.inventory {
        active.inventory = Set(inventory);
    }
    if let Some(price) = patch.price {
        active.price = Set(price);
    }
    if let Some(screen_size) = patch.screen_size {
        active.screen_size = Set(screen_size);
    }
    if let Some(battery_capacity) = patch.battery_capacity {
        active.battery_capacity = Set(battery_capacity);
    }
    if let Some(camera_resolution) = patch.camera_resolution {
        active.camera_resolution = Set(camera_resolution);
    }
    if let Some(storage_capacity) = patch.storage_capacity {
        active.storage_capacity = Set(storage_capacity);
    }
    if let Some(ram) = patch.ram {
        active.ram = Set(ram);
    }
    if let Some(operating_system) = patch.operating_system {
        active.operating_system = Set(operating_system);
    }
    if let Some(image_default_id) = patch.image_default_id {
        active.image_default_id = Set(image_default_id);
    }
    if let Some(release_date) = patch.release_date {
        active.release_date = Set(release_date);
    }

    let updated = if active.is_changed() {
        active.update(db).await?
    } else {
        find_mobile(db, id).await?
    };

    if let Some(colors) = patch.colors {
        set_colors(db, id, &colors).await?;
    }
    Ok(updated)
}

/// Applies price/inventory edits for several rows. Callers run it in a transaction.
pub async fn apply_inline_edits<C: ConnectionTrait>(
    db: &C,
    edits: Vec<InlineEdit>,
) -> Result<Vec<mobile::Model>, CatalogError> {
    let mut updated = Vec::with_capacity(edits.len());
    for edit in edits {
        let patch = MobilePatch {
            price: edit.price,
            inventory: edit.inventory,
            ..Default::default()
        };
        updated.push(update_mobile(db, edit.id, patch).await?);
    }
    Ok(updated)
}

/// Replaces the phone's color links with `color_ids`.
pub async fn set_colors<C: ConnectionTrait>(
    db: &C,
    mobile_id: i32,
    color_ids: &[i32],
) -> Result<(), CatalogError> {
    let mut wanted = color_ids.to_vec();
    wanted.sort_unstable();
    wanted.dedup();

    let found = if wanted.is_empty() {
        0
    } else {
        color::Entity::find()
            .filter(color::Column::Id.is_in(wanted.clone()))
            .count(db)
            .await?
    };
    if found != wanted.len() as u64 {
        return Err(CatalogError::Validation(format!(
            "Select a valid choice. One of the colors {wanted:?} does not exist."
        )));
    }

    mobile_color::Entity::delete_many()
        .filter(mobile_color::Column::MobileId.eq(mobile_id))
        .exec(db)
        .await?;

    if !wanted.is_empty() {
        let links = wanted.into_iter().map(|color_id| mobile_color::ActiveModel {
            mobile_id: Set(mobile_id),
            color_id: Set(color_id),
        });
        mobile_color::Entity::insert_many(links)
            .exec_without_returning(db)
            .await?;
    }
    Ok(())
}

pub async fn color_ids<C: ConnectionTrait>(db: &C, mobile_id: i32) -> Result<Vec<i32>, CatalogError> {
    let links = mobile_color::Entity::find()
        .filter(mobile_color::Column::MobileId.eq(mobile_id))
        .order_by_asc(mobile_color::Column::ColorId)
        .all(db)
        .await?;
    Ok(links.into_iter().map(|link| link.color_id).collect())
}

/// Deletes a phone with its cascading sheets, gallery and color links.
///
/// Refused while a main or selfie camera sheet still points at the phone.
pub async fn delete_mobile<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), CatalogError> {
    let mobile = find_mobile(db, id).await?;
    ensure_deletable(db, &mobile).await?;
    purge_mobile(db, mobile.id).await?;
    info!(mobile_id = id, "Deleted mobile");
    Ok(())
}

/// Deletes a brand and all of its phones. Refused if any phone is protected.
pub async fn delete_brand<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), CatalogError> {
    let brand = brand::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(CatalogError::NotFound { entity: "brand", id })?;

    let mobiles = mobile::Entity::find()
        .filter(mobile::Column::BrandId.eq(brand.id))
        .order_by_asc(mobile::Column::Id)
        .all(db)
        .await?;

    for mobile in &mobiles {
        ensure_deletable(db, mobile).await?;
    }
    for mobile in &mobiles {
        purge_mobile(db, mobile.id).await?;
    }

    brand::Entity::delete_by_id(brand.id).exec(db).await?;
    info!(brand_id = id, mobiles = mobiles.len(), "Deleted brand");
    Ok(())
}

pub fn suggested_slug(model_name: &str) -> Result<String, CatalogError> {
    let slug = slugify(model_name);
    if slug.is_empty() {
        return Err(CatalogError::Validation(
            "Enter a slug: none can be derived from this model name.".to_string(),
        ));
    }
    Ok(slug)
}

pub fn check_price(price: &Decimal) -> Result<(), CatalogError> {
    if price.is_sign_negative() {
        return Err(CatalogError::Validation(
            "Ensure the price is greater than or equal to 0.".to_string(),
        ));
    }
    if price.normalize().scale() > 2 {
        return Err(CatalogError::Validation(
            "Ensure that there are no more than 2 decimal places.".to_string(),
        ));
    }
    if *price >= Decimal::from(PRICE_CEILING) {
        return Err(CatalogError::Validation(
            "Ensure that there are no more than 10 digits in total.".to_string(),
        ));
    }
    Ok(())
}

async fn find_mobile<C: ConnectionTrait>(db: &C, id: i32) -> Result<mobile::Model, CatalogError> {
    mobile::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(CatalogError::NotFound {
            entity: "mobile",
            id,
        })
}

/// Rejects a model name or slug another phone already uses.
async fn ensure_unique<C: ConnectionTrait>(
    db: &C,
    model_name: Option<&str>,
    slug: Option<&str>,
    exclude_id: Option<i32>,
) -> Result<(), CatalogError> {
    let checks = [
        ("model name", mobile::Column::ModelName, model_name),
        ("slug", mobile::Column::Slug, slug),
    ];

    for (label, column, value) in checks {
        let Some(value) = value else { continue };

        let mut condition = Condition::all().add(column.eq(value));
        if let Some(id) = exclude_id {
            condition = condition.add(mobile::Column::Id.ne(id));
        }

        let taken = mobile::Entity::find().filter(condition).count(db).await?;
        if taken > 0 {
            return Err(CatalogError::Validation(format!(
                "Mobile with this {label} already exists."
            )));
        }
    }
    Ok(())
}

async fn ensure_brand<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), CatalogError> {
    match brand::Entity::find_by_id(id).one(db).await? {
        Some(_) => Ok(()),
        None => Err(CatalogError::Validation(format!(
            "Select a valid choice. Brand {id} does not exist."
        ))),
    }
}

pub async fn ensure_image<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), CatalogError> {
    match image::Entity::find_by_id(id).one(db).await? {
        Some(_) => Ok(()),
        None => Err(CatalogError::Validation(format!(
            "Select a valid choice. Image {id} does not exist."
        ))),
    }
}

async fn ensure_deletable<C: ConnectionTrait>(
    db: &C,
    mobile: &mobile::Model,
) -> Result<(), CatalogError> {
    let mut blockers = Vec::new();
    if sheet_exists::<main_camera::Entity, _>(db, mobile.id).await? {
        blockers.push(main_camera::Entity::LABEL);
    }
    if sheet_exists::<selfie_camera::Entity, _>(db, mobile.id).await? {
        blockers.push(selfie_camera::Entity::LABEL);
    }

    if blockers.is_empty() {
        return Ok(());
    }
    Err(CatalogError::Protected(format!(
        "Cannot delete mobile '{}' because it is referenced by protected {} records.",
        mobile.model_name,
        blockers.join(" and ")
    )))
}

async fn purge_mobile<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), CatalogError> {
    delete_sheet::<network::Entity, _>(db, id).await?;
    delete_sheet::<memory::Entity, _>(db, id).await?;
    delete_sheet::<body::Entity, _>(db, id).await?;
    delete_sheet::<display::Entity, _>(db, id).await?;
    delete_sheet::<function::Entity, _>(db, id).await?;
    delete_sheet::<sound::Entity, _>(db, id).await?;
    delete_sheet::<battery::Entity, _>(db, id).await?;
    delete_sheet::<other_features::Entity, _>(db, id).await?;

    gallery_image::Entity::delete_many()
        .filter(gallery_image::Column::MobileId.eq(id))
        .exec(db)
        .await?;
    mobile_color::Entity::delete_many()
        .filter(mobile_color::Column::MobileId.eq(id))
        .exec(db)
        .await?;
    mobile::Entity::delete_by_id(id).exec(db).await?;
    Ok(())
}
