mod grade;

#[cfg(test)]
mod view_smoke;

pub use grade::GradeView;
