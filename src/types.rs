use serde::{Deserialize, Serialize};

pub const DEFAULT_REST_SECS: u32 = 60;
pub const DEFAULT_REPS: u32 = 10;

/// A routine as the backend returns it. `fecha` is an ISO `YYYY-MM-DD` date.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Routine {
    #[serde(rename = "id_rutina")]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "fecha", default)]
    pub date: Option<String>,
}

/// Catalog entry. Referenced by sets, never owned by a routine.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    #[serde(rename = "id_ejercicio")]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "grupo_muscular", default)]
    pub muscle_group: Option<String>,
}

impl Exercise {
    pub fn muscle_label(&self) -> &str {
        self.muscle_group.as_deref().unwrap_or("General")
    }
}

/// One logged set ("serie") of an exercise within a routine, as joined by
/// `GET /rutinas/{id}`. `set_number` is 1-based and unique per
/// (routine, exercise).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SetEntry {
    #[serde(rename = "id_serie")]
    pub id: i64,
    #[serde(rename = "id_ejercicio")]
    pub exercise_id: i64,
    #[serde(rename = "ejercicio_nombre", default)]
    pub exercise_name: String,
    #[serde(rename = "grupo_muscular", default)]
    pub muscle_group: Option<String>,
    #[serde(rename = "numero_serie")]
    pub set_number: u32,
    #[serde(rename = "repeticiones")]
    pub reps: u32,
    #[serde(rename = "peso_usado", default)]
    pub weight: Option<f64>,
    #[serde(rename = "descanso_segundos", default)]
    pub rest_secs: Option<u32>,
}

impl SetEntry {
    pub fn rest_or_default(&self) -> u32 {
        self.rest_secs.unwrap_or(DEFAULT_REST_SECS)
    }
}

/// Response shape of `GET /rutinas/{id}`.
#[derive(Clone, Debug, Deserialize)]
pub struct RoutineDetail {
    #[serde(rename = "rutina")]
    pub routine: Routine,
    #[serde(rename = "series", default)]
    pub sets: Vec<SetEntry>,
}

/// `user` record in localStorage. The backend stores more, we only need the
/// display name.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct AuthUser {
    #[serde(rename = "nombre", default)]
    pub name: String,
}

/// Local record produced when a session ends. Server persistence is an
/// extension point, see `session::SummarySink`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct WorkoutSummary {
    #[serde(rename = "id_rutina")]
    pub routine_id: i64,
    #[serde(rename = "fecha")]
    pub finished_at: String,
    #[serde(rename = "duracion_segundos")]
    pub duration_secs: i64,
    #[serde(rename = "series_completadas")]
    pub completed_sets: usize,
    #[serde(rename = "series_totales")]
    pub total_sets: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AppView {
    Editor,
    Session,
}

/// Sets of one exercise, in routine order.
#[derive(Clone, Debug, PartialEq)]
pub struct ExerciseGroup {
    pub exercise_id: i64,
    pub name: String,
    pub muscle_group: Option<String>,
    pub sets: Vec<SetEntry>,
}

impl ExerciseGroup {
    pub fn muscle_label(&self) -> &str {
        self.muscle_group.as_deref().unwrap_or("General")
    }
}

/// Group a routine's sets by exercise, preserving first-appearance order.
pub fn group_by_exercise(sets: &[SetEntry]) -> Vec<ExerciseGroup> {
    let mut groups: Vec<ExerciseGroup> = Vec::new();
    for set in sets {
        match groups.iter_mut().find(|g| g.exercise_id == set.exercise_id) {
            Some(group) => group.sets.push(set.clone()),
            None => groups.push(ExerciseGroup {
                exercise_id: set.exercise_id,
                name: set.exercise_name.clone(),
                muscle_group: set.muscle_group.clone(),
                sets: vec![set.clone()],
            }),
        }
    }
    groups
}

/// Sequence number for a new set: existing sets for that exercise + 1.
pub fn next_set_number(sets: &[SetEntry], exercise_id: i64) -> u32 {
    sets.iter().filter(|s| s.exercise_id == exercise_id).count() as u32 + 1
}

/// Remove exactly one set by id. Returns true if something was removed.
pub fn remove_set(sets: &mut Vec<SetEntry>, set_id: i64) -> bool {
    let before = sets.len();
    sets.retain(|s| s.id != set_id);
    sets.len() != before
}

/// Client-side catalog filter: case-insensitive substring on the name plus
/// equality on muscle group (empty filter matches everything).
pub fn filter_catalog<'a>(
    catalog: &'a [Exercise],
    search: &str,
    muscle: &str,
) -> Vec<&'a Exercise> {
    let needle = search.to_lowercase();
    catalog
        .iter()
        .filter(|e| e.name.to_lowercase().contains(&needle))
        .filter(|e| muscle.is_empty() || e.muscle_label() == muscle)
        .collect()
}

/// Distinct muscle-group labels, in catalog order, for the filter dropdown.
pub fn muscle_groups(catalog: &[Exercise]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for e in catalog {
        let label = e.muscle_label().to_string();
        if !out.contains(&label) {
            out.push(label);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(id: i64, exercise_id: i64, number: u32) -> SetEntry {
        SetEntry {
            id,
            exercise_id,
            exercise_name: format!("Ejercicio {}", exercise_id),
            muscle_group: None,
            set_number: number,
            reps: DEFAULT_REPS,
            weight: None,
            rest_secs: Some(DEFAULT_REST_SECS),
        }
    }

    #[test]
    fn grouping_preserves_first_appearance_order() {
        let sets = vec![set(1, 10, 1), set(2, 20, 1), set(3, 10, 2)];
        let groups = group_by_exercise(&sets);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].exercise_id, 10);
        assert_eq!(groups[0].sets.len(), 2);
        assert_eq!(groups[1].exercise_id, 20);
        assert_eq!(groups[1].sets.len(), 1);
    }

    #[test]
    fn next_set_number_is_count_plus_one() {
        let sets = vec![set(1, 10, 1), set(2, 10, 2), set(3, 20, 1)];
        assert_eq!(next_set_number(&sets, 10), 3);
        assert_eq!(next_set_number(&sets, 20), 2);
        assert_eq!(next_set_number(&sets, 30), 1);
    }

    #[test]
    fn remove_set_removes_exactly_one_id() {
        let mut sets = vec![set(1, 10, 1), set(2, 10, 2), set(3, 20, 1)];
        assert!(remove_set(&mut sets, 2));
        assert_eq!(sets.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 3]);
        assert!(!remove_set(&mut sets, 2));
        assert_eq!(sets.len(), 2);
    }

    #[test]
    fn catalog_filter_matches_substring_and_muscle() {
        let catalog = vec![
            Exercise { id: 1, name: "Press banca".into(), muscle_group: Some("Pecho".into()) },
            Exercise { id: 2, name: "Press militar".into(), muscle_group: Some("Hombros".into()) },
            Exercise { id: 3, name: "Sentadilla".into(), muscle_group: None },
        ];

        let all = filter_catalog(&catalog, "", "");
        assert_eq!(all.len(), 3);

        let press = filter_catalog(&catalog, "PRESS", "");
        assert_eq!(press.len(), 2);

        let chest = filter_catalog(&catalog, "press", "Pecho");
        assert_eq!(chest.len(), 1);
        assert_eq!(chest[0].id, 1);

        let general = filter_catalog(&catalog, "", "General");
        assert_eq!(general.len(), 1);
        assert_eq!(general[0].id, 3);
    }

    #[test]
    fn wire_names_map_to_spanish_fields() {
        let json = r#"{
            "id_serie": 7,
            "id_ejercicio": 3,
            "ejercicio_nombre": "Sentadilla",
            "grupo_muscular": "Piernas",
            "numero_serie": 2,
            "repeticiones": 8,
            "peso_usado": 62.5,
            "descanso_segundos": 90
        }"#;
        let entry: SetEntry = serde_json::from_str(json).expect("valid serie json");
        assert_eq!(entry.id, 7);
        assert_eq!(entry.set_number, 2);
        assert_eq!(entry.weight, Some(62.5));
        assert_eq!(entry.rest_or_default(), 90);

        let sparse: SetEntry = serde_json::from_str(
            r#"{"id_serie":1,"id_ejercicio":1,"numero_serie":1,"repeticiones":10}"#,
        )
        .expect("sparse serie json");
        assert_eq!(sparse.rest_or_default(), DEFAULT_REST_SECS);
        assert_eq!(sparse.weight, None);
    }
}
