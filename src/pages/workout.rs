use leptos::*;

use crate::api;
use crate::app::{format_time, format_weight, redirect, show_message, Toast};
use crate::session::{ConsoleSink, RestTick, SessionState, SummarySink, REST_EXTEND_SECS};
use crate::types::group_by_exercise;

/// Short sine beep when the rest countdown expires. Playback failures are
/// swallowed, a silent timer is not an error.
fn play_beep() {
    let _ = try_play_beep();
}

fn try_play_beep() -> Result<(), wasm_bindgen::JsValue> {
    let ctx = web_sys::AudioContext::new()?;
    let oscillator = ctx.create_oscillator()?;
    let gain = ctx.create_gain()?;

    oscillator.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;

    oscillator.frequency().set_value(800.0);
    oscillator.set_type(web_sys::OscillatorType::Sine);

    let now = ctx.current_time();
    gain.gain().set_value_at_time(0.3, now)?;
    gain.gain().exponential_ramp_to_value_at_time(0.01, now + 0.5)?;

    oscillator.start()?;
    oscillator.stop_with_when(now + 0.5)?;
    Ok(())
}

#[component]
pub fn WorkoutSession(routine_id: i64, set_toast: WriteSignal<Option<Toast>>) -> impl IntoView {
    let (routine_name, set_routine_name) = create_signal(String::new());
    let (session, set_session) = create_signal(None::<SessionState>);
    let (elapsed, set_elapsed) = create_signal(0i64);
    let (start_time, _) = create_signal(js_sys::Date::now() as i64 / 1000);
    let (finished, set_finished) = create_signal(false);
    let (show_end_confirm, set_show_end_confirm) = create_signal(false);

    // Rest countdown interval, one per rest period. Replacing the stored
    // handle drops (and cancels) the previous one.
    let rest_interval = store_value(None::<gloo_timers::callback::Interval>);

    create_effect(move |_| {
        spawn_local(async move {
            match api::fetch_routine(routine_id).await {
                Ok(detail) => {
                    set_routine_name.set(detail.routine.name);
                    set_session.set(Some(SessionState::new(routine_id, detail.sets)));
                }
                Err(e) => {
                    show_message(set_toast, e, "error");
                    gloo_timers::callback::Timeout::new(2000, || redirect("dashboard.html"))
                        .forget();
                }
            }
        });
    });

    // Session clock, page lifetime.
    create_effect(move |_| {
        let handle = gloo_timers::callback::Interval::new(1000, move || {
            if !finished.get() {
                let now = js_sys::Date::now() as i64 / 1000;
                set_elapsed.set(now - start_time.get());
            }
        });
        on_cleanup(move || drop(handle));
    });

    let start_rest_interval = move || {
        rest_interval.set_value(Some(gloo_timers::callback::Interval::new(1000, move || {
            let mut tick = RestTick::Idle;
            set_session.update(|s| {
                if let Some(s) = s {
                    tick = s.tick_rest();
                }
            });
            match tick {
                RestTick::Running => {}
                RestTick::Finished => {
                    rest_interval.set_value(None);
                    play_beep();
                }
                RestTick::Idle => rest_interval.set_value(None),
            }
        })));
    };

    let toggle_set = move |set_id: i64| {
        let mut rest_started = false;
        set_session.update(|s| {
            if let Some(s) = s {
                rest_started = s.toggle_set(set_id);
            }
        });
        if rest_started {
            start_rest_interval();
        }
    };

    let skip_rest = move |_| {
        set_session.update(|s| {
            if let Some(s) = s {
                s.skip_rest();
            }
        });
        rest_interval.set_value(None);
    };

    let extend_rest = move |_| {
        set_session.update(|s| {
            if let Some(s) = s {
                s.extend_rest(REST_EXTEND_SECS);
            }
        });
    };

    let finish_workout = move |_| {
        set_show_end_confirm.set(false);
        set_finished.set(true);
        rest_interval.set_value(None);

        let duration = js_sys::Date::now() as i64 / 1000 - start_time.get();
        set_session.update(|s| {
            if let Some(s) = s {
                let summary = s.finish(chrono::Utc::now().to_rfc3339(), duration);
                ConsoleSink.record(&summary);
            }
        });

        show_message(set_toast, "¡Entrenamiento completado! 💪", "success");
        gloo_timers::callback::Timeout::new(2000, || redirect("dashboard.html")).forget();
    };

    view! {
        <div class="workout">
            <header class="workout-header">
                <h1 class="workout-title">{routine_name}</h1>
                <div class="workout-progress">
                    {move || session.with(|s| {
                        let (done, total) = s.as_ref().map(|s| s.progress()).unwrap_or((0, 0));
                        format!("{} / {} series", done, total)
                    })}
                </div>
                <div class="workout-timer">{move || format_time(elapsed.get())}</div>
            </header>

            {move || session.with(|s| s.as_ref().and_then(|s| s.rest.clone())).map(|rest| {
                view! {
                    <div class="rest-timer">
                        <div class="rest-label">"DESCANSO"</div>
                        <div class="rest-display">{format_time(rest.remaining as i64)}</div>
                        <div class="rest-next">
                            {rest.next_up.unwrap_or_else(|| "Último ejercicio".to_string())}
                        </div>
                        <div class="rest-actions">
                            <button class="rest-extend-btn" on:click=extend_rest>
                                {format!("+{} s", REST_EXTEND_SECS)}
                            </button>
                            <button class="rest-skip-btn" on:click=skip_rest>"Saltar"</button>
                        </div>
                    </div>
                }
            })}

            <div class="exercises-container">
                {move || session.with(|state| match state {
                    None => view! { <div class="loading">"Cargando rutina..."</div> }.into_view(),
                    Some(state) if state.sets.is_empty() => view! {
                        <div class="empty-state">
                            <div class="empty-state-icon">"💪"</div>
                            <h3>"Esta rutina no tiene ejercicios"</h3>
                            <p>"Edita la rutina para agregar ejercicios"</p>
                            <button class="btn-primary" on:click=move |_| redirect("dashboard.html")>
                                "Volver al Dashboard"
                            </button>
                        </div>
                    }.into_view(),
                    Some(state) => {
                        let entries: Vec<_> = state.sets.iter().map(|s| s.entry.clone()).collect();
                        group_by_exercise(&entries).into_iter().enumerate().map(|(i, group)| {
                            let exercise_done = state.exercise_complete(group.exercise_id);
                            let card_class = if exercise_done {
                                "exercise-card completed"
                            } else {
                                "exercise-card"
                            };
                            view! {
                                <div class=card_class>
                                    <div class="exercise-header">
                                        <div class="exercise-info">
                                            <h3>{group.name.clone()}</h3>
                                            <span class="exercise-muscle">
                                                {group.muscle_label().to_string()}
                                            </span>
                                        </div>
                                        <div class="exercise-number">{i + 1}</div>
                                    </div>
                                    <div class="set-list">
                                        {group.sets.iter().map(|entry| {
                                            let set_id = entry.id;
                                            let completed = state
                                                .get(set_id)
                                                .map(|s| s.completed)
                                                .unwrap_or(false);
                                            let item_class = if completed {
                                                "session-set completed"
                                            } else {
                                                "session-set"
                                            };
                                            let reps = entry.reps;
                                            let weight = entry.weight;
                                            let weight_value = weight
                                                .map(format_weight)
                                                .unwrap_or_default();
                                            view! {
                                                <div class=item_class>
                                                    <span class="set-number">
                                                        {format!("Serie {}", entry.set_number)}
                                                    </span>
                                                    <div class="set-fields">
                                                        <input
                                                            type="number"
                                                            class="set-input"
                                                            placeholder="Reps"
                                                            value=reps.to_string()
                                                            on:change=move |e| {
                                                                let new_reps = event_target_value(&e)
                                                                    .parse()
                                                                    .unwrap_or(reps);
                                                                set_session.update(|s| {
                                                                    if let Some(s) = s {
                                                                        s.update_set_values(set_id, new_reps, weight);
                                                                    }
                                                                });
                                                            }
                                                        />
                                                        <span>"reps"</span>
                                                        <input
                                                            type="number"
                                                            step="0.5"
                                                            class="set-input"
                                                            placeholder="Peso"
                                                            value=weight_value
                                                            on:change=move |e| {
                                                                let new_weight = event_target_value(&e).parse().ok();
                                                                set_session.update(|s| {
                                                                    if let Some(s) = s {
                                                                        s.update_set_values(set_id, reps, new_weight);
                                                                    }
                                                                });
                                                            }
                                                        />
                                                        <span>"kg"</span>
                                                    </div>
                                                    <label class="set-check">
                                                        <input
                                                            type="checkbox"
                                                            prop:checked=completed
                                                            on:change=move |_| toggle_set(set_id)
                                                        />
                                                        "Completar"
                                                    </label>
                                                </div>
                                            }
                                        }).collect_view()}
                                    </div>
                                </div>
                            }
                        }).collect_view()
                    }
                })}
            </div>

            <footer class="workout-footer">
                <button class="end-workout-btn" on:click=move |_| set_show_end_confirm.set(true)>
                    "Finalizar Entrenamiento"
                </button>
            </footer>

            {move || show_end_confirm.get().then(|| view! {
                <div class="modal-overlay">
                    <div class="confirm-dialog">
                        <div class="confirm-title">"¿Finalizar entrenamiento?"</div>
                        <div class="confirm-text">
                            {move || session.with(|s| {
                                let (done, total) = s.as_ref().map(|s| s.progress()).unwrap_or((0, 0));
                                format!("Has completado {} de {} series.", done, total)
                            })}
                        </div>
                        <div class="confirm-buttons">
                            <button
                                class="confirm-cancel"
                                on:click=move |_| set_show_end_confirm.set(false)
                            >
                                "Seguir entrenando"
                            </button>
                            <button class="confirm-ok" on:click=finish_workout>
                                "Finalizar"
                            </button>
                        </div>
                    </div>
                </div>
            })}
        </div>
    }
}
