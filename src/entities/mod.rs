pub mod battery;
pub mod body;
pub mod brand;
pub mod color;
pub mod display;
pub mod function;
pub mod gallery_image;
pub mod image;
pub mod main_camera;
pub mod memory;
pub mod mobile;
pub mod mobile_color;
pub mod network;
pub mod other_features;
pub mod selfie_camera;
pub mod slider_image;
pub mod sound;
pub mod user;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Schema,
    Set,
};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::SetupError;

/// Creates every table that does not exist yet. Referenced tables come first.
pub async fn setup_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let statements = vec![
        ("users", schema.create_table_from_entity(user::Entity)),
        ("image", schema.create_table_from_entity(image::Entity)),
        ("brand", schema.create_table_from_entity(brand::Entity)),
        ("color", schema.create_table_from_entity(color::Entity)),
        ("mobile", schema.create_table_from_entity(mobile::Entity)),
        ("mobile_color", schema.create_table_from_entity(mobile_color::Entity)),
        ("gallery_image", schema.create_table_from_entity(gallery_image::Entity)),
        ("network", schema.create_table_from_entity(network::Entity)),
        ("memory", schema.create_table_from_entity(memory::Entity)),
        ("body", schema.create_table_from_entity(body::Entity)),
        ("display", schema.create_table_from_entity(display::Entity)),
        ("function", schema.create_table_from_entity(function::Entity)),
        ("main_camera", schema.create_table_from_entity(main_camera::Entity)),
        ("selfie_camera", schema.create_table_from_entity(selfie_camera::Entity)),
        ("sound", schema.create_table_from_entity(sound::Entity)),
        ("battery", schema.create_table_from_entity(battery::Entity)),
        ("other_features", schema.create_table_from_entity(other_features::Entity)),
        ("slider_image", schema.create_table_from_entity(slider_image::Entity)),
    ];

    for (name, mut statement) in statements {
        statement.if_not_exists();
        db.execute(backend.build(&statement)).await?;
        debug!(table = name, "Table checked/created");
    }

    Ok(())
}

/// Seeds the configured operator account unless it already exists.
pub async fn primary_setup(db: &DatabaseConnection, config: &AppConfig) -> Result<(), SetupError> {
    let existing = user::Entity::find()
        .filter(user::Column::Username.eq(config.admin_username.as_str()))
        .one(db)
        .await?;
    if existing.is_some() {
        debug!(username = %config.admin_username, "Operator account already present");
        return Ok(());
    }

    let password = config
        .admin_password
        .as_deref()
        .ok_or(SetupError::MissingAdminPassword)?;

    let operator = user::ActiveModel {
        username: Set(config.admin_username.clone()),
        password: Set(hash_password(password)?),
        ..Default::default()
    };
    user::Entity::insert(operator).exec(db).await?;

    info!(username = %config.admin_username, "Created operator account");
    Ok(())
}

pub fn hash_password(password: &str) -> Result<String, SetupError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| SetupError::PasswordHash(err.to_string()))
}
