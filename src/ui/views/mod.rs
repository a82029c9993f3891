mod movie_detail;
mod movies;
mod note_form;
mod notes;

pub use movie_detail::MovieDetailView;
pub use movies::MoviesView;
pub use note_form::NoteFormView;
pub use notes::NotesView;
