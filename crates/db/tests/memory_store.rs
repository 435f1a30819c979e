//! Behaviour of the in-memory repositories and the aggregation on top.

use assert_matches::assert_matches;
use sanse_db::aggregate;
use sanse_db::models::category::CategoryFields;
use sanse_db::models::exercise::ExerciseFields;
use sanse_db::models::training::{TrainingExercise, TrainingFields};
use sanse_db::models::user::{NewUser, UserChanges};
use sanse_db::{Store, StoreError};

async fn seed_user(store: &Store, email: &str) -> i64 {
    store
        .users
        .create(&NewUser {
            email: email.into(),
            password_hash: "hash".into(),
            role: "trainer".into(),
            full_name: "Ana Trainer".into(),
        })
        .await
        .unwrap()
        .id
}

fn category(name: &str) -> CategoryFields {
    CategoryFields {
        name: name.into(),
        color: "bg-gray-100 text-gray-800".into(),
    }
}

fn exercise(name: &str, category_id: i64) -> ExerciseFields {
    ExerciseFields {
        name: name.into(),
        description: String::new(),
        estimated_time: 10,
        category_id,
    }
}

fn slot(exercise_id: i64, custom_time: i32, order: i32) -> TrainingExercise {
    TrainingExercise {
        exercise_id,
        custom_time,
        order,
    }
}

fn training(name: &str, exercises: Vec<TrainingExercise>) -> TrainingFields {
    TrainingFields::new(name.into(), vec![], exercises, String::new()).unwrap()
}

#[tokio::test]
async fn category_names_are_unique_ignoring_case() {
    let store = Store::in_memory();
    let user = seed_user(&store, "ana@sanse.test").await;

    store.categories.create(&category("Fuerza"), user).await.unwrap();
    let err = store
        .categories
        .create(&category("fuerza"), user)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Conflict(_));

    let found = store.categories.find_by_name("FUERZA").await.unwrap();
    assert_eq!(found.unwrap().name, "Fuerza");
}

#[tokio::test]
async fn referenced_category_cannot_be_deleted() {
    let store = Store::in_memory();
    let user = seed_user(&store, "ana@sanse.test").await;
    let fuerza = store.categories.create(&category("Fuerza"), user).await.unwrap();
    let squat = store
        .exercises
        .create(&exercise("Sentadillas", fuerza.id), user)
        .await
        .unwrap();

    assert_eq!(store.exercises.count_by_category(fuerza.id).await.unwrap(), 1);
    assert_matches!(
        store.categories.delete(fuerza.id).await,
        Err(StoreError::Conflict(_))
    );

    assert!(store.exercises.delete(squat.id).await.unwrap());
    assert!(store.categories.delete(fuerza.id).await.unwrap());
    assert!(!store.categories.delete(fuerza.id).await.unwrap());
}

#[tokio::test]
async fn exercise_requires_existing_category() {
    let store = Store::in_memory();
    let user = seed_user(&store, "ana@sanse.test").await;

    assert_matches!(
        store.exercises.create(&exercise("Sentadillas", 99), user).await,
        Err(StoreError::Conflict(_))
    );
}

#[tokio::test]
async fn training_keeps_share_id_across_updates() {
    let store = Store::in_memory();
    let user = seed_user(&store, "ana@sanse.test").await;

    let created = store
        .trainings
        .create(&training("T1", vec![slot(1, 12, 1)]), user, "shareABC")
        .await
        .unwrap();
    assert_eq!(created.total_time, 12);
    assert!(store.trainings.share_id_exists("shareABC").await.unwrap());
    assert!(!store.trainings.share_id_exists("shareabc").await.unwrap());

    let updated = store
        .trainings
        .update(created.id, &training("T1", vec![]))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.share_id, "shareABC");
    assert_eq!(updated.total_time, 0);
    assert!(updated.exercises.is_empty());

    assert!(store.trainings.update(999, &training("T1", vec![])).await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_share_id_is_rejected() {
    let store = Store::in_memory();
    let user = seed_user(&store, "ana@sanse.test").await;

    store
        .trainings
        .create(&training("T1", vec![]), user, "same")
        .await
        .unwrap();
    assert_matches!(
        store.trainings.create(&training("T2", vec![]), user, "same").await,
        Err(StoreError::Conflict(_))
    );
}

#[tokio::test]
async fn trainings_are_listed_per_creator_newest_first() {
    let store = Store::in_memory();
    let ana = seed_user(&store, "ana@sanse.test").await;
    let luis = seed_user(&store, "luis@sanse.test").await;

    store.trainings.create(&training("A1", vec![]), ana, "s1").await.unwrap();
    store.trainings.create(&training("L1", vec![]), luis, "s2").await.unwrap();
    store.trainings.create(&training("A2", vec![]), ana, "s3").await.unwrap();

    let names: Vec<String> = store
        .trainings
        .list_by_creator(ana)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["A2", "A1"]);
}

#[tokio::test]
async fn deleted_training_is_gone() {
    let store = Store::in_memory();
    let user = seed_user(&store, "ana@sanse.test").await;
    let created = store
        .trainings
        .create(&training("T1", vec![slot(1, 5, 1)]), user, "gone")
        .await
        .unwrap();

    assert!(store.trainings.delete(created.id).await.unwrap());
    assert!(store.trainings.find_by_id(created.id).await.unwrap().is_none());
    assert!(store.trainings.find_by_share_id("gone").await.unwrap().is_none());
}

#[tokio::test]
async fn aggregation_resolves_through_the_store() {
    let store = Store::in_memory();
    let user = seed_user(&store, "ana@sanse.test").await;
    let fuerza = store.categories.create(&category("Fuerza"), user).await.unwrap();
    let squat = store
        .exercises
        .create(&exercise("Sentadillas", fuerza.id), user)
        .await
        .unwrap();

    let fields = TrainingFields::new(
        "T1".into(),
        vec![fuerza.id],
        vec![slot(squat.id, 12, 2), slot(777, 3, 1)],
        String::new(),
    )
    .unwrap();
    let created = store.trainings.create(&fields, user, "agg").await.unwrap();

    let details = aggregate::load_details(&store, created).await.unwrap();
    assert_eq!(details.total_time, 15);
    assert_eq!(details.categories[0].name, "Fuerza");
    assert_eq!(details.exercises[0].exercise_id, 777);
    assert!(details.exercises[0].exercise.is_none());
    let resolved = details.exercises[1].exercise.as_ref().unwrap();
    assert_eq!(resolved.category.as_ref().unwrap().name, "Fuerza");
}

#[tokio::test]
async fn user_email_is_unique_and_changes_apply() {
    let store = Store::in_memory();
    let ana = seed_user(&store, "ana@sanse.test").await;
    seed_user(&store, "luis@sanse.test").await;

    let clash = UserChanges {
        email: Some("luis@sanse.test".into()),
        ..Default::default()
    };
    assert_matches!(store.users.update(ana, &clash).await, Err(StoreError::Conflict(_)));

    let changes = UserChanges {
        is_active: Some(false),
        full_name: Some("Ana G.".into()),
        ..Default::default()
    };
    let updated = store.users.update(ana, &changes).await.unwrap().unwrap();
    assert!(!updated.is_active);
    assert_eq!(updated.full_name, "Ana G.");
    assert_eq!(updated.email, "ana@sanse.test");
}
