//! Image records and the files behind them.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use tokio::fs;
use tracing::{info, warn};
use uuid::Uuid;

use crate::entities::image::{self, FileExtension};
use crate::entities::{color, gallery_image, mobile, slider_image};
use crate::error::CatalogError;

/// Multipart field names double as display file names.
pub static FILE_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]{1,64}$").expect("file name regex is valid"));

pub fn stored_path(media_root: &Path, image: &image::Model) -> PathBuf {
    media_root.join(image.stored_name())
}

/// Writes `data` under a fresh uuid and records it. The file is removed again
/// if the insert fails.
pub async fn store_image<C: ConnectionTrait>(
    db: &C,
    media_root: &Path,
    file_name: String,
    extension: FileExtension,
    data: &[u8],
) -> Result<image::Model, CatalogError> {
    let path_name = Uuid::new_v4().to_string();
    let target = media_root.join(format!("{path_name}.{extension}"));

    fs::write(&target, data).await.map_err(|err| {
        CatalogError::Storage(format!("Failed to write {}: {err}", target.display()))
    })?;

    let record = image::ActiveModel {
        file_name: Set(file_name),
        path_name: Set(path_name),
        extension: Set(extension),
        ..Default::default()
    };

    match record.insert(db).await {
        Ok(model) => {
            info!(image_id = model.id, path = %target.display(), bytes = data.len(), "Stored image");
            Ok(model)
        }
        Err(err) => {
            let _ = fs::remove_file(&target).await;
            Err(err.into())
        }
    }
}

/// Number of rows that still point at the image, across every referencing table.
pub async fn image_references<C: ConnectionTrait>(db: &C, id: i32) -> Result<u64, CatalogError> {
    let mobiles = mobile::Entity::find()
        .filter(mobile::Column::ImageDefaultId.eq(id))
        .count(db)
        .await?;
    let colors = color::Entity::find()
        .filter(color::Column::ImageId.eq(id))
        .count(db)
        .await?;
    let gallery = gallery_image::Entity::find()
        .filter(gallery_image::Column::ImageId.eq(id))
        .count(db)
        .await?;
    let sliders = slider_image::Entity::find()
        .filter(slider_image::Column::ImageId.eq(id))
        .count(db)
        .await?;
    Ok(mobiles + colors + gallery + sliders)
}

/// Deletes an unreferenced image record. Returns the removed record; its file
/// stays on disk until [`remove_stored_file`] is called after commit.
pub async fn delete_image<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<image::Model, CatalogError> {
    let image = image::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(CatalogError::NotFound { entity: "image", id })?;

    let references = image_references(db, id).await?;
    if references > 0 {
        return Err(CatalogError::Protected(format!(
            "Cannot delete image '{}' because {references} record(s) still use it.",
            image.file_name
        )));
    }

    image::Entity::delete_by_id(id).exec(db).await?;
    Ok(image)
}

pub async fn remove_stored_file(media_root: &Path, image: &image::Model) {
    let path = stored_path(media_root, image);
    match fs::remove_file(&path).await {
        Ok(()) => info!(image_id = image.id, path = %path.display(), "Image file removed"),
        Err(err) => {
            warn!(image_id = image.id, path = %path.display(), error = %err, "Image file was already gone")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_regex() {
        assert!(FILE_NAME_REGEX.is_match("galaxy_s24-front"));
        assert!(FILE_NAME_REGEX.is_match("a"));
        assert!(!FILE_NAME_REGEX.is_match(""));
        assert!(!FILE_NAME_REGEX.is_match("front.jpg"));
        assert!(!FILE_NAME_REGEX.is_match(&"x".repeat(65)));
    }

    #[test]
    fn test_stored_path_joins_media_root() {
        let image = image::Model {
            id: 3,
            file_name: "front".into(),
            path_name: "abc".into(),
            extension: FileExtension::Webp,
        };
        assert_eq!(
            stored_path(Path::new("/srv/media"), &image),
            PathBuf::from("/srv/media/abc.webp")
        );
    }
}
