//! Integration tests for the resource catalog repository.

use chrono::{TimeZone, Utc};
use deskbook_core::resource::{activation_change, NewResource, Position, ResourceType};
use deskbook_db::repositories::ResourceRepo;
use sqlx::PgPool;

fn new_resource(id: &str, resource_type: ResourceType) -> NewResource {
    NewResource {
        id: id.to_string(),
        resource_type,
        name: format!("Resource {id}"),
        capacity: 1,
        position: Position { x: 10.0, y: 20.0 },
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_list_by_type(pool: PgPool) {
    let desk = ResourceRepo::create(&pool, &new_resource("bureau_flex_1", ResourceType::Desk))
        .await
        .unwrap();
    assert_eq!(desk.resource_type, ResourceType::Desk);
    assert!(desk.is_active);
    assert_eq!(desk.position, Position { x: 10.0, y: 20.0 });

    ResourceRepo::create(&pool, &new_resource("salle_reunion_1", ResourceType::Room))
        .await
        .unwrap();

    let desks = ResourceRepo::list(&pool, Some(ResourceType::Desk)).await.unwrap();
    assert_eq!(desks.len(), 1);
    assert_eq!(desks[0].id, "bureau_flex_1");

    let all = ResourceRepo::list(&pool, None).await.unwrap();
    assert_eq!(all.len(), 14, "two created plus twelve seeded slots");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_id_rejected(pool: PgPool) {
    let input = new_resource("bureau_flex_1", ResourceType::Desk);
    ResourceRepo::create(&pool, &input).await.unwrap();

    let err = ResourceRepo::create(&pool, &input).await.unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_resources_id"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_block_and_reactivate(pool: PgPool) {
    ResourceRepo::create(&pool, &new_resource("bureau_flex_1", ResourceType::Desk))
        .await
        .unwrap();
    let until = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();

    let blocked = ResourceRepo::set_active(
        &pool,
        "bureau_flex_1",
        &activation_change(false, Some("Broken chair".into()), Some(until)),
    )
    .await
    .unwrap()
    .unwrap();
    assert!(!blocked.is_active);
    assert_eq!(blocked.block_reason.as_deref(), Some("Broken chair"));
    assert_eq!(blocked.block_until, Some(until));

    let active = ResourceRepo::set_active(&pool, "bureau_flex_1", &activation_change(true, None, None))
        .await
        .unwrap()
        .unwrap();
    assert!(active.is_active);
    assert!(active.block_reason.is_none());
    assert!(active.block_until.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_move_and_delete(pool: PgPool) {
    ResourceRepo::create(&pool, &new_resource("bureau_flex_1", ResourceType::Desk))
        .await
        .unwrap();

    let moved = ResourceRepo::update_position(&pool, "bureau_flex_1", Position { x: 1.5, y: 2.5 })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.position, Position { x: 1.5, y: 2.5 });

    assert!(ResourceRepo::delete(&pool, "bureau_flex_1").await.unwrap());
    assert!(!ResourceRepo::delete(&pool, "bureau_flex_1").await.unwrap());
    assert!(ResourceRepo::find_by_id(&pool, "bureau_flex_1").await.unwrap().is_none());

    let missing = ResourceRepo::update_position(&pool, "bureau_flex_1", Position::default())
        .await
        .unwrap();
    assert!(missing.is_none());
}
