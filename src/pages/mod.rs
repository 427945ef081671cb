mod editor;
mod workout;

pub use editor::RoutineEditor;
pub use workout::WorkoutSession;
