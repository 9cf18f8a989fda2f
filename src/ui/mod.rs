// User Interface
// Terminal menu over a session

pub mod app;

pub use app::App;
