use std::collections::BTreeMap;

use chrono::NaiveDate;
use gymlog_domain as domain;

pub static USER: std::sync::LazyLock<domain::User> = std::sync::LazyLock::new(|| domain::User {
    id: 1.into(),
    username: String::from("alice"),
    email: String::from("alice@example.com"),
    full_name: Some(String::from("Alice")),
    training_goal: Some(domain::TrainingGoal::Strength),
});

pub static EXERCISES: std::sync::LazyLock<Vec<domain::Exercise>> =
    std::sync::LazyLock::new(|| vec![EXERCISE.clone(), EXERCISE_2.clone()]);

pub static EXERCISE: std::sync::LazyLock<domain::Exercise> =
    std::sync::LazyLock::new(|| domain::Exercise {
        id: 1.into(),
        name: domain::Name::new("Bench Press").unwrap(),
        muscle_coefficients: BTreeMap::from([
            (String::from("Chest"), 0.7),
            (String::from("Triceps"), 0.3),
        ])
        .into(),
        equipment: Some(domain::Equipment {
            id: 1,
            name: String::from("Barbell"),
        }),
        default_sets: Some(3),
        default_reps: Some(8),
    });

pub static EXERCISE_2: std::sync::LazyLock<domain::Exercise> =
    std::sync::LazyLock::new(|| domain::Exercise {
        id: 2.into(),
        name: domain::Name::new("Squat").unwrap(),
        muscle_coefficients: BTreeMap::from([(String::from("Quadriceps"), 1.0)]).into(),
        equipment: None,
        default_sets: None,
        default_reps: None,
    });

pub static WORKOUT: std::sync::LazyLock<domain::Workout> =
    std::sync::LazyLock::new(|| domain::Workout {
        id: 1.into(),
        name: String::from("Push"),
        notes: String::from("Felt strong"),
        duration_minutes: Some(55),
        goal: domain::TrainingGoal::Hypertrophy,
        date: NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap(),
        total_volume: Some(1320.0),
        exercises: vec![domain::WorkoutExercise {
            id: 10.into(),
            exercise: EXERCISE.clone(),
            order: 0,
            target_rir: Some(2.0),
            sets: vec![
                domain::SetValues {
                    set_number: 1,
                    weight_kg: Some(60.0),
                    reps: Some(10),
                    rir: Some(2.0),
                },
                domain::SetValues {
                    set_number: 2,
                    weight_kg: Some(60.0),
                    reps: Some(8),
                    rir: Some(1.0),
                },
            ],
        }],
    });
