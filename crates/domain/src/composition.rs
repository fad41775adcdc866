//! Editing operations of a [`WorkoutDraft`].
//!
//! Each operation consumes the draft and returns the changed draft. Exercise entries keep
//! `order` equal to their position and sets keep `set_number` equal to their position plus one.
//! Indices out of range are programming errors and cause a panic.

use crate::{
    DEFAULT_RIR, DEFAULT_WEIGHT, EntryKey, Exercise, RecommendedSet, SetEntry, SetField, SetPatch,
    TempID, TrainingGoal, WorkoutDraft, WorkoutExerciseEntry, validate,
};

const CARRY_FORWARD_FALLBACK_REPS: i32 = 10;

/// Move of an entry as reported by the drag-and-drop layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderIntent {
    pub moved_entry: EntryKey,
    pub from_index: usize,
    pub to_index: usize,
}

impl WorkoutDraft {
    #[must_use]
    pub fn set_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    #[must_use]
    pub fn set_goal(mut self, goal: TrainingGoal) -> Self {
        self.goal = goal;
        self
    }

    #[must_use]
    pub fn set_notes(mut self, notes: &str) -> Self {
        self.notes = notes.to_string();
        self
    }

    #[must_use]
    pub fn set_duration_minutes(mut self, duration_minutes: u32) -> Self {
        self.duration_minutes = duration_minutes;
        self
    }

    #[must_use]
    pub fn set_exercise_notes(mut self, exercise_index: usize, notes: &str) -> Self {
        self.entry_mut(exercise_index).notes = notes.to_string();
        self
    }

    #[must_use]
    pub fn set_target_rir(mut self, exercise_index: usize, target_rir: Option<f32>) -> Self {
        self.entry_mut(exercise_index).target_rir = target_rir;
        self
    }

    /// Insert a new entry for `exercise` prefilled with its default sets.
    ///
    /// The entry is appended if `at_index` is `None`. Larger indices are clamped to the end.
    #[must_use]
    pub fn add_exercise(mut self, exercise: Exercise, at_index: Option<usize>) -> Self {
        #[allow(clippy::cast_possible_wrap)]
        let reps = exercise.default_reps() as i32;
        let sets = (1..=exercise.default_sets())
            .map(|set_number| {
                SetEntry::new(set_number, Some(DEFAULT_WEIGHT), Some(reps), Some(DEFAULT_RIR))
            })
            .collect();
        let index = at_index
            .unwrap_or(self.exercises.len())
            .min(self.exercises.len());
        self.exercises.insert(
            index,
            WorkoutExerciseEntry {
                key: EntryKey::Temporary(TempID::new()),
                exercise,
                order: index,
                notes: String::new(),
                target_rir: None,
                sets,
            },
        );
        self.renumber_exercises();
        self
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn remove_exercise(mut self, index: usize) -> Self {
        self.assert_exercise_index(index);
        self.exercises.remove(index);
        self.renumber_exercises();
        self
    }

    /// # Panics
    ///
    /// Panics if `from_index` or `to_index` is out of range.
    #[must_use]
    pub fn reorder_exercises(mut self, from_index: usize, to_index: usize) -> Self {
        self.assert_exercise_index(from_index);
        self.assert_exercise_index(to_index);
        let entry = self.exercises.remove(from_index);
        self.exercises.insert(to_index, entry);
        self.renumber_exercises();
        self
    }

    /// Bring the entries into the given order.
    ///
    /// # Panics
    ///
    /// Panics if `ordering` is not a permutation of the keys of the current entries.
    #[must_use]
    pub fn reorder_exercises_by_keys(mut self, ordering: &[EntryKey]) -> Self {
        assert!(
            ordering.len() == self.exercises.len(),
            "ordering contains {} keys, but draft contains {} exercises",
            ordering.len(),
            self.exercises.len()
        );
        let mut remaining = std::mem::take(&mut self.exercises);
        for key in ordering {
            let Some(position) = remaining.iter().position(|e| e.key == *key) else {
                panic!("ordering contains unknown or duplicate key {key:?}");
            };
            self.exercises.push(remaining.swap_remove(position));
        }
        self.renumber_exercises();
        self
    }

    /// # Panics
    ///
    /// Panics if the moved entry is not located at `from_index` or `to_index` is out of range.
    #[must_use]
    pub fn apply(self, intent: ReorderIntent) -> Self {
        self.assert_exercise_index(intent.from_index);
        assert!(
            self.exercises[intent.from_index].key == intent.moved_entry,
            "entry {:?} is not located at index {}",
            intent.moved_entry,
            intent.from_index
        );
        self.reorder_exercises(intent.from_index, intent.to_index)
    }

    /// Replace the given fields of a set and record their validity.
    ///
    /// Values outside of the valid range are stored anyway.
    ///
    /// # Panics
    ///
    /// Panics if `exercise_index` or `set_index` is out of range.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn update_set(mut self, exercise_index: usize, set_index: usize, patch: SetPatch) -> Self {
        let set = self.set_mut(exercise_index, set_index);
        if let Some(weight_kg) = patch.weight_kg {
            set.weight_kg = weight_kg;
            set.validity
                .record(SetField::Weight, validate(SetField::Weight, weight_kg));
        }
        if let Some(reps) = patch.reps {
            set.reps = reps;
            set.validity
                .record(SetField::Reps, validate(SetField::Reps, reps.map(|r| r as f32)));
        }
        if let Some(rir) = patch.rir {
            set.rir = rir;
            set.validity.record(SetField::RIR, validate(SetField::RIR, rir));
        }
        self
    }

    /// Append a set that takes over weight and reps of the previous last set.
    ///
    /// # Panics
    ///
    /// Panics if `exercise_index` is out of range.
    #[must_use]
    pub fn add_set(mut self, exercise_index: usize) -> Self {
        let sets = &mut self.entry_mut(exercise_index).sets;
        let (weight_kg, reps) = sets.last().map_or(
            (Some(DEFAULT_WEIGHT), Some(CARRY_FORWARD_FALLBACK_REPS)),
            |last| {
                (
                    last.weight_kg.or(Some(DEFAULT_WEIGHT)),
                    last.reps.or(Some(CARRY_FORWARD_FALLBACK_REPS)),
                )
            },
        );
        #[allow(clippy::cast_possible_truncation)]
        let set_number = sets.len() as u32 + 1;
        sets.push(SetEntry::new(set_number, weight_kg, reps, Some(DEFAULT_RIR)));
        self
    }

    /// # Panics
    ///
    /// Panics if `exercise_index` or `set_index` is out of range.
    #[must_use]
    pub fn remove_set(mut self, exercise_index: usize, set_index: usize) -> Self {
        let entry = self.entry_mut(exercise_index);
        assert_set_index(entry, exercise_index, set_index);
        entry.sets.remove(set_index);
        renumber_sets(&mut entry.sets);
        self
    }

    /// Append the recommended sets after the existing sets of an exercise.
    ///
    /// # Panics
    ///
    /// Panics if `sets` is not empty and `exercise_index` is out of range.
    #[must_use]
    pub fn apply_recommendation(mut self, exercise_index: usize, sets: &[RecommendedSet]) -> Self {
        if sets.is_empty() {
            return self;
        }
        let entry = self.entry_mut(exercise_index);
        entry.sets.extend(sets.iter().map(|s| {
            SetEntry::new(
                0,
                Some(s.weight_kg),
                Some(s.reps),
                Some(s.target_rir.unwrap_or(DEFAULT_RIR)),
            )
        }));
        renumber_sets(&mut entry.sets);
        self
    }

    fn renumber_exercises(&mut self) {
        for (order, entry) in self.exercises.iter_mut().enumerate() {
            entry.order = order;
        }
    }

    fn assert_exercise_index(&self, index: usize) {
        assert!(
            index < self.exercises.len(),
            "exercise index {index} out of range (draft contains {} exercises)",
            self.exercises.len()
        );
    }

    fn entry_mut(&mut self, exercise_index: usize) -> &mut WorkoutExerciseEntry {
        self.assert_exercise_index(exercise_index);
        &mut self.exercises[exercise_index]
    }

    fn set_mut(&mut self, exercise_index: usize, set_index: usize) -> &mut SetEntry {
        let entry = self.entry_mut(exercise_index);
        assert_set_index(entry, exercise_index, set_index);
        &mut entry.sets[set_index]
    }
}

fn assert_set_index(entry: &WorkoutExerciseEntry, exercise_index: usize, set_index: usize) {
    assert!(
        set_index < entry.sets.len(),
        "set index {set_index} out of range (exercise {exercise_index} contains {} sets)",
        entry.sets.len()
    );
}

fn renumber_sets(sets: &mut [SetEntry]) {
    for (set_number, set) in (1..).zip(sets.iter_mut()) {
        set.set_number = set_number;
    }
}
