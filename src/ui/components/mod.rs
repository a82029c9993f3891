mod command_input;
mod input;
mod key_result;
mod modal;
mod pagination;
mod search_input;
mod toast;

pub use command_input::{CommandEvent, CommandInput};
pub use input::{InputResult, TextInput};
pub use key_result::KeyResult;
pub use modal::draw_modal_frame;
pub use pagination::draw_pagination;
pub use search_input::{SearchEvent, SearchInput};
pub use toast::{Toast, ToastKind};
