// Services layer for business logic
// Services own ownership checks and call storage through the store traits

pub mod board;
pub mod sticky_note;
pub mod user;

pub use board::BoardService;
pub use sticky_note::StickyNoteService;
pub use user::UserService;
