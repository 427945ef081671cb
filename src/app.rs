use leptos::*;

use crate::pages::{RoutineEditor, WorkoutSession};
use crate::storage;
use crate::types::AppView;

/// Transient on-screen notification, auto-dismissed after 3 s.
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub text: String,
    pub kind: &'static str, // "success" | "error"
}

pub fn show_message(set_toast: WriteSignal<Option<Toast>>, text: impl Into<String>, kind: &'static str) {
    set_toast.set(Some(Toast { text: text.into(), kind }));
    gloo_timers::callback::Timeout::new(3000, move || {
        set_toast.set(None);
    })
    .forget();
}

pub fn redirect(href: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(href);
    }
}

pub fn format_time(secs: i64) -> String {
    let mins = secs / 60;
    let s = secs % 60;
    format!("{:02}:{:02}", mins, s)
}

pub fn format_weight(w: f64) -> String {
    if w.fract() == 0.0 { format!("{:.0}", w) } else { format!("{:.1}", w) }
}

/// Which controller to mount. The session runner lives on workout.html,
/// everything else is the editor.
fn view_from_url() -> AppView {
    let path = web_sys::window()
        .map(|w| w.location().pathname().unwrap_or_default())
        .unwrap_or_default();
    if path.contains("workout") {
        AppView::Session
    } else {
        AppView::Editor
    }
}

/// `?id=` query parameter, the routine to edit or run.
fn routine_id_from_url() -> Option<i64> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get("id")?.parse().ok()
}

#[component]
pub fn App() -> impl IntoView {
    let (toast, set_toast) = create_signal(None::<Toast>);
    let view = view_from_url();
    let routine_id = routine_id_from_url();
    let user_name = storage::display_name().unwrap_or_default();

    if routine_id.is_none() {
        let text = match view {
            AppView::Editor => "No se especificó una rutina para editar",
            AppView::Session => "No se especificó una rutina para iniciar",
        };
        show_message(set_toast, text, "error");
        gloo_timers::callback::Timeout::new(2000, || redirect("dashboard.html")).forget();
    }

    view! {
        <div class="app">
            <header class="topbar">
                <a class="app-logo" href="dashboard.html">"RUSTINA"</a>
                <div class="topbar-user">
                    <span class="user-name">{user_name}</span>
                    <button class="logout-btn" on:click=move |_| {
                        storage::clear_session();
                        redirect("index.html");
                    }>
                        "Cerrar sesión"
                    </button>
                </div>
            </header>

            {move || toast.get().map(|t| view! {
                <div class=format!("message {} show", t.kind)>{t.text}</div>
            })}

            {match routine_id {
                Some(id) => match view {
                    AppView::Editor => view! {
                        <RoutineEditor routine_id=id set_toast=set_toast/>
                    }.into_view(),
                    AppView::Session => view! {
                        <WorkoutSession routine_id=id set_toast=set_toast/>
                    }.into_view(),
                },
                None => view! { <div class="loading">"Redirigiendo..."</div> }.into_view(),
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_pads_minutes_and_seconds() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(3599), "59:59");
        assert_eq!(format_time(3660), "61:00");
    }

    #[test]
    fn format_weight_drops_trailing_zero() {
        assert_eq!(format_weight(60.0), "60");
        assert_eq!(format_weight(62.5), "62.5");
    }
}
