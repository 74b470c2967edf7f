pub(crate) mod actions;
pub(crate) mod components;
pub(crate) mod state;
mod view;

pub use view::GradeView;
