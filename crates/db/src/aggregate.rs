//! Builds the denormalized read views of trainings and exercises.
//!
//! References are resolved in batches: one exercise query and one category
//! query per call, however many trainings are assembled. A slot whose
//! exercise no longer exists keeps its `exerciseId` and carries no
//! `exercise`; category tags that no longer resolve are dropped.

use std::collections::HashMap;

use sanse_core::types::DbId;

use crate::error::StoreResult;
use crate::models::category::Category;
use crate::models::exercise::{Exercise, ExerciseWithCategory};
use crate::models::training::{Training, TrainingDetails, TrainingExerciseDetails};
use crate::store::Store;

/// Exercises and categories referenced by a set of trainings, keyed by id.
#[derive(Debug, Default)]
pub struct Lookups {
    exercises: HashMap<DbId, Exercise>,
    categories: HashMap<DbId, Category>,
}

impl Lookups {
    pub fn from_parts(exercises: Vec<Exercise>, categories: Vec<Category>) -> Self {
        Self {
            exercises: exercises.into_iter().map(|e| (e.id, e)).collect(),
            categories: categories.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    /// Load everything the given trainings point at.
    pub async fn resolve(store: &Store, trainings: &[Training]) -> StoreResult<Self> {
        let exercise_ids = unique(
            trainings
                .iter()
                .flat_map(|t| t.exercises.iter().map(|te| te.exercise_id)),
        );
        let exercises = if exercise_ids.is_empty() {
            Vec::new()
        } else {
            store.exercises.find_by_ids(&exercise_ids).await?
        };

        let category_ids = unique(
            trainings
                .iter()
                .flat_map(|t| t.categories.iter().copied())
                .chain(exercises.iter().map(|e| e.category_id)),
        );
        let categories = if category_ids.is_empty() {
            Vec::new()
        } else {
            store.categories.find_by_ids(&category_ids).await?
        };

        Ok(Self::from_parts(exercises, categories))
    }

    pub fn exercise_with_category(&self, exercise: Exercise) -> ExerciseWithCategory {
        let category = self.categories.get(&exercise.category_id).cloned();
        ExerciseWithCategory { exercise, category }
    }

    /// Turn a stored training into its read view.
    ///
    /// Slots are sorted by `order`; ties keep their stored sequence.
    pub fn assemble(&self, training: Training) -> TrainingDetails {
        let categories = training
            .categories
            .iter()
            .filter_map(|id| self.categories.get(id).cloned())
            .collect();

        let mut slots = training.exercises;
        slots.sort_by_key(|te| te.order);
        let exercises = slots
            .into_iter()
            .map(|te| TrainingExerciseDetails {
                exercise: self
                    .exercises
                    .get(&te.exercise_id)
                    .cloned()
                    .map(|e| self.exercise_with_category(e)),
                exercise_id: te.exercise_id,
                custom_time: te.custom_time,
                order: te.order,
            })
            .collect();

        TrainingDetails {
            id: training.id,
            name: training.name,
            categories,
            exercises,
            total_time: training.total_time,
            observations: training.observations,
            created_by: training.created_by,
            created_by_name: None,
            share_id: training.share_id,
            created_at: training.created_at,
            updated_at: training.updated_at,
        }
    }
}

fn unique(ids: impl Iterator<Item = DbId>) -> Vec<DbId> {
    let mut ids: Vec<DbId> = ids.collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Read view of a single training.
pub async fn load_details(store: &Store, training: Training) -> StoreResult<TrainingDetails> {
    let lookups = Lookups::resolve(store, std::slice::from_ref(&training)).await?;
    Ok(lookups.assemble(training))
}

/// Read views of many trainings, keeping their order.
pub async fn load_many(
    store: &Store,
    trainings: Vec<Training>,
) -> StoreResult<Vec<TrainingDetails>> {
    let lookups = Lookups::resolve(store, &trainings).await?;
    Ok(trainings.into_iter().map(|t| lookups.assemble(t)).collect())
}

/// Attach each exercise's category.
pub async fn attach_categories(
    store: &Store,
    exercises: Vec<Exercise>,
) -> StoreResult<Vec<ExerciseWithCategory>> {
    let category_ids = unique(exercises.iter().map(|e| e.category_id));
    let categories = if category_ids.is_empty() {
        Vec::new()
    } else {
        store.categories.find_by_ids(&category_ids).await?
    };
    let lookups = Lookups::from_parts(Vec::new(), categories);
    Ok(exercises
        .into_iter()
        .map(|e| lookups.exercise_with_category(e))
        .collect())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::training::TrainingExercise;

    fn category(id: DbId, name: &str) -> Category {
        Category {
            id,
            name: name.into(),
            color: "bg-red-100 text-red-800".into(),
            created_by: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn exercise(id: DbId, name: &str, category_id: DbId) -> Exercise {
        Exercise {
            id,
            name: name.into(),
            description: String::new(),
            estimated_time: 10,
            category_id,
            created_by: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn slot(exercise_id: DbId, custom_time: i32, order: i32) -> TrainingExercise {
        TrainingExercise {
            exercise_id,
            custom_time,
            order,
        }
    }

    fn training(categories: Vec<DbId>, exercises: Vec<TrainingExercise>) -> Training {
        Training {
            id: 1,
            name: "T1".into(),
            categories,
            total_time: exercises.iter().map(|te| te.custom_time).sum(),
            exercises,
            observations: String::new(),
            created_by: 1,
            share_id: "abc123".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn slots_are_sorted_by_order() {
        let lookups = Lookups::default();
        let details = lookups.assemble(training(
            vec![],
            vec![slot(10, 1, 3), slot(11, 1, 1), slot(12, 1, 2)],
        ));
        let orders: Vec<i32> = details.exercises.iter().map(|e| e.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        let ids: Vec<DbId> = details.exercises.iter().map(|e| e.exercise_id).collect();
        assert_eq!(ids, vec![11, 12, 10]);
    }

    #[test]
    fn equal_orders_keep_stored_sequence() {
        let lookups = Lookups::default();
        let details = lookups.assemble(training(
            vec![],
            vec![slot(5, 1, 1), slot(3, 1, 1), slot(4, 1, 1)],
        ));
        let ids: Vec<DbId> = details.exercises.iter().map(|e| e.exercise_id).collect();
        assert_eq!(ids, vec![5, 3, 4]);
    }

    #[test]
    fn resolved_exercise_carries_its_category() {
        let lookups = Lookups::from_parts(
            vec![exercise(10, "Sentadillas", 1)],
            vec![category(1, "Fuerza")],
        );
        let details = lookups.assemble(training(vec![1], vec![slot(10, 12, 1)]));

        assert_eq!(details.categories.len(), 1);
        assert_eq!(details.categories[0].name, "Fuerza");
        let resolved = details.exercises[0].exercise.as_ref().unwrap();
        assert_eq!(resolved.exercise.name, "Sentadillas");
        assert_eq!(resolved.category.as_ref().unwrap().name, "Fuerza");
        assert_eq!(details.total_time, 12);
    }

    #[test]
    fn missing_references_degrade_gracefully() {
        let lookups = Lookups::from_parts(vec![], vec![category(1, "Fuerza")]);
        let details = lookups.assemble(training(vec![1, 99], vec![slot(42, 7, 1)]));

        let names: Vec<&str> = details.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Fuerza"]);
        assert_eq!(details.exercises.len(), 1);
        assert_eq!(details.exercises[0].exercise_id, 42);
        assert!(details.exercises[0].exercise.is_none());
        assert_eq!(details.total_time, 7);
    }

    #[test]
    fn unique_sorts_and_dedups() {
        assert_eq!(unique([3, 1, 3, 2, 1].into_iter()), vec![1, 2, 3]);
    }
}
