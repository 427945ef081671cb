use leptos::*;

use crate::api;
use crate::app::{format_weight, redirect, show_message, Toast};
use crate::types::{
    filter_catalog, group_by_exercise, muscle_groups, next_set_number, remove_set, Exercise,
    SetEntry, DEFAULT_REPS, DEFAULT_REST_SECS,
};

#[derive(Clone, Copy, PartialEq)]
enum SetField {
    Reps,
    Weight,
    Rest,
}

#[component]
pub fn RoutineEditor(routine_id: i64, set_toast: WriteSignal<Option<Toast>>) -> impl IntoView {
    let (loading, set_loading) = create_signal(true);
    let (routine_name, set_routine_name) = create_signal(String::new());
    let (routine_date, set_routine_date) = create_signal(String::new());
    let (sets, set_sets) = create_signal(Vec::<SetEntry>::new());
    let (catalog, set_catalog) = create_signal(Vec::<Exercise>::new());
    let (search_query, set_search_query) = create_signal(String::new());
    let (muscle_filter, set_muscle_filter) = create_signal(String::new());
    let (pending_delete, set_pending_delete) = create_signal(None::<i64>);
    let (saving, set_saving) = create_signal(false);

    create_effect(move |_| {
        spawn_local(async move {
            match api::fetch_routine(routine_id).await {
                Ok(detail) => {
                    set_routine_name.set(detail.routine.name);
                    // Date inputs want YYYY-MM-DD, which is what the backend stores.
                    set_routine_date.set(detail.routine.date.unwrap_or_default());
                    set_sets.set(detail.sets);
                    set_loading.set(false);
                }
                Err(e) => {
                    show_message(set_toast, e, "error");
                    gloo_timers::callback::Timeout::new(2000, || redirect("dashboard.html"))
                        .forget();
                }
            }
        });
        spawn_local(async move {
            match api::fetch_exercises().await {
                Ok(list) => set_catalog.set(list),
                Err(e) => show_message(set_toast, e, "error"),
            }
        });
    });

    // Create a set; local state is patched from the payload plus the
    // returned id, never from a re-fetch.
    let add_set = move |exercise_id: i64, exercise_name: String, muscle_group: Option<String>| {
        let set_number = next_set_number(&sets.get(), exercise_id);
        let new_set = api::NewSet {
            routine_id,
            exercise_id,
            set_number,
            reps: DEFAULT_REPS,
            weight: None,
            rest_secs: DEFAULT_REST_SECS,
        };
        spawn_local(async move {
            match api::create_set(&new_set).await {
                Ok(id) => {
                    set_sets.update(|s| {
                        s.push(SetEntry {
                            id,
                            exercise_id,
                            exercise_name,
                            muscle_group,
                            set_number,
                            reps: DEFAULT_REPS,
                            weight: None,
                            rest_secs: Some(DEFAULT_REST_SECS),
                        });
                    });
                    let msg = if set_number == 1 {
                        "Ejercicio agregado exitosamente"
                    } else {
                        "Serie agregada exitosamente"
                    };
                    show_message(set_toast, msg, "success");
                }
                Err(e) => show_message(set_toast, e, "error"),
            }
        });
    };

    let update_field = move |set_id: i64, field: SetField, value: String| {
        let current = sets.get();
        let Some(entry) = current.iter().find(|s| s.id == set_id) else {
            return;
        };
        let mut updated = entry.clone();
        match field {
            SetField::Reps => updated.reps = value.parse().unwrap_or(entry.reps),
            SetField::Weight => updated.weight = value.parse().ok(),
            SetField::Rest => {
                updated.rest_secs = Some(value.parse().unwrap_or(entry.rest_or_default()))
            }
        }
        let payload = api::SetUpdate::from_entry(&updated);
        spawn_local(async move {
            match api::update_set(set_id, &payload).await {
                Ok(()) => {
                    set_sets.update(|s| {
                        if let Some(existing) = s.iter_mut().find(|x| x.id == set_id) {
                            *existing = updated;
                        }
                    });
                    show_message(set_toast, "Serie actualizada", "success");
                }
                Err(e) => show_message(set_toast, e, "error"),
            }
        });
    };

    let confirm_delete = move |_| {
        let Some(set_id) = pending_delete.get() else {
            return;
        };
        spawn_local(async move {
            match api::delete_set(set_id).await {
                Ok(()) => {
                    set_sets.update(|s| {
                        remove_set(s, set_id);
                    });
                    show_message(set_toast, "Serie eliminada exitosamente", "success");
                }
                Err(e) => show_message(set_toast, e, "error"),
            }
            set_pending_delete.set(None);
        });
    };

    let save_routine = move |_| {
        let name = routine_name.get().trim().to_string();
        if name.is_empty() {
            show_message(set_toast, "El nombre de la rutina es obligatorio", "error");
            return;
        }
        let date = routine_date.get();
        let date = if date.is_empty() { None } else { Some(date) };
        set_saving.set(true);
        spawn_local(async move {
            match api::update_routine(routine_id, &name, date).await {
                Ok(()) => {
                    show_message(set_toast, "Rutina actualizada exitosamente", "success");
                    gloo_timers::callback::Timeout::new(1500, || redirect("dashboard.html"))
                        .forget();
                }
                Err(e) => {
                    show_message(set_toast, e, "error");
                    set_saving.set(false);
                }
            }
        });
    };

    let cancel_edit = move |_| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(
                    "¿Estás seguro de que quieres cancelar? Los cambios no guardados se perderán.",
                )
                .ok()
            })
            .unwrap_or(false);
        if confirmed {
            redirect("dashboard.html");
        }
    };

    view! {
        <div class="routine-editor">
            <header class="editor-header">
                <button class="back-btn" on:click=cancel_edit>"← Cancelar"</button>
                <h1>"Editar Rutina"</h1>
                <button class="save-routine-btn" on:click=save_routine disabled=saving>
                    {move || if saving.get() { "Guardando..." } else { "Guardar Cambios" }}
                </button>
            </header>

            {move || if loading.get() {
                view! { <p class="loading-text">"Cargando..."</p> }.into_view()
            } else {
                view! {
                    <div class="editor-content">
                        <div class="routine-meta">
                            <input
                                type="text"
                                class="routine-name-input"
                                placeholder="Nombre de la rutina"
                                prop:value=routine_name
                                on:input=move |e| set_routine_name.set(event_target_value(&e))
                            />
                            <input
                                type="date"
                                class="routine-date-input"
                                prop:value=routine_date
                                on:input=move |e| set_routine_date.set(event_target_value(&e))
                            />
                        </div>

                        <section class="current-exercises">
                            <h2>"Ejercicios de la rutina"</h2>
                            {move || {
                                let current = sets.get();
                                if current.is_empty() {
                                    view! {
                                        <div class="empty-exercises">
                                            <p>"No hay ejercicios en esta rutina aún. Agrega algunos desde la sección de abajo."</p>
                                        </div>
                                    }.into_view()
                                } else {
                                    group_by_exercise(&current).into_iter().map(|group| {
                                        let exercise_id = group.exercise_id;
                                        let group_name = group.name.clone();
                                        let group_muscle = group.muscle_group.clone();
                                        let muscle_label = group.muscle_label().to_string();
                                        view! {
                                            <div class="exercise-card">
                                                <div class="exercise-header">
                                                    <h4>{group.name.clone()}</h4>
                                                    <span class="exercise-muscle">{muscle_label}</span>
                                                </div>
                                                <div class="set-list">
                                                    {group.sets.iter().map(|entry| {
                                                        let set_id = entry.id;
                                                        let weight_value = entry.weight
                                                            .map(format_weight)
                                                            .unwrap_or_default();
                                                        view! {
                                                            <div class="set-item">
                                                                <span class="set-number">
                                                                    {format!("Serie {}", entry.set_number)}
                                                                </span>
                                                                <div class="set-fields">
                                                                    <input
                                                                        type="number"
                                                                        class="set-input"
                                                                        placeholder="Reps"
                                                                        value=entry.reps.to_string()
                                                                        on:change=move |e| update_field(
                                                                            set_id,
                                                                            SetField::Reps,
                                                                            event_target_value(&e),
                                                                        )
                                                                    />
                                                                    <span>"reps"</span>
                                                                    <input
                                                                        type="number"
                                                                        step="0.5"
                                                                        class="set-input"
                                                                        placeholder="Peso"
                                                                        value=weight_value
                                                                        on:change=move |e| update_field(
                                                                            set_id,
                                                                            SetField::Weight,
                                                                            event_target_value(&e),
                                                                        )
                                                                    />
                                                                    <span>"kg"</span>
                                                                    <input
                                                                        type="number"
                                                                        class="set-input"
                                                                        placeholder="Descanso"
                                                                        value=entry.rest_or_default().to_string()
                                                                        on:change=move |e| update_field(
                                                                            set_id,
                                                                            SetField::Rest,
                                                                            event_target_value(&e),
                                                                        )
                                                                    />
                                                                    <span>"seg"</span>
                                                                </div>
                                                                <button
                                                                    class="btn-delete-set"
                                                                    title="Eliminar serie"
                                                                    on:click=move |_| set_pending_delete.set(Some(set_id))
                                                                >
                                                                    "🗑️"
                                                                </button>
                                                            </div>
                                                        }
                                                    }).collect_view()}
                                                </div>
                                                <button class="btn-add-set" on:click=move |_| {
                                                    add_set(exercise_id, group_name.clone(), group_muscle.clone());
                                                }>
                                                    "➕ Agregar Serie"
                                                </button>
                                            </div>
                                        }
                                    }).collect_view()
                                }
                            }}
                        </section>

                        <section class="available-exercises">
                            <h2>"Agregar ejercicios"</h2>
                            <div class="catalog-filters">
                                <input
                                    type="search"
                                    class="catalog-search"
                                    placeholder="Buscar ejercicio..."
                                    prop:value=search_query
                                    on:input=move |e| set_search_query.set(event_target_value(&e))
                                />
                                <select
                                    class="muscle-filter"
                                    on:change=move |e| set_muscle_filter.set(event_target_value(&e))
                                >
                                    <option value="">"Todos los grupos"</option>
                                    {move || muscle_groups(&catalog.get()).into_iter().map(|g| {
                                        view! { <option value=g.clone()>{g}</option> }
                                    }).collect_view()}
                                </select>
                            </div>
                            <div class="exercises-grid">
                                {move || {
                                    let all = catalog.get();
                                    let filtered = filter_catalog(
                                        &all,
                                        &search_query.get(),
                                        &muscle_filter.get(),
                                    );
                                    if filtered.is_empty() {
                                        view! {
                                            <div class="empty-state">
                                                <p>"No se encontraron ejercicios"</p>
                                            </div>
                                        }.into_view()
                                    } else {
                                        let current = sets.get();
                                        filtered.into_iter().map(|exercise| {
                                            let already_added = current.iter()
                                                .any(|s| s.exercise_id == exercise.id);
                                            let ex_id = exercise.id;
                                            let ex_name = exercise.name.clone();
                                            let ex_muscle = exercise.muscle_group.clone();
                                            view! {
                                                <div class="catalog-item">
                                                    <div class="catalog-info">
                                                        <h4>{exercise.name.clone()}</h4>
                                                        <span class="exercise-muscle">
                                                            {exercise.muscle_label().to_string()}
                                                        </span>
                                                    </div>
                                                    <button
                                                        class="btn-add-exercise"
                                                        disabled=already_added
                                                        on:click=move |_| {
                                                            add_set(ex_id, ex_name.clone(), ex_muscle.clone());
                                                        }
                                                    >
                                                        {if already_added { "Agregado ✓" } else { "Agregar" }}
                                                    </button>
                                                </div>
                                            }
                                        }).collect_view()
                                    }
                                }}
                            </div>
                        </section>
                    </div>
                }.into_view()
            }}

            {move || pending_delete.get().map(|_| view! {
                <div class="modal-overlay">
                    <div class="confirm-dialog">
                        <div class="confirm-title">"¿Eliminar serie?"</div>
                        <div class="confirm-text">"Esta acción no se puede deshacer."</div>
                        <div class="confirm-buttons">
                            <button
                                class="confirm-cancel"
                                on:click=move |_| set_pending_delete.set(None)
                            >
                                "Cancelar"
                            </button>
                            <button class="confirm-ok" on:click=confirm_delete>
                                "Eliminar"
                            </button>
                        </div>
                    </div>
                </div>
            })}
        </div>
    }
}
