mod escape;
mod row_vm;

pub use escape::escape_text;
pub use row_vm::{ErrorRowVm, ResultRowVm, RowVm, map_row_entry};
