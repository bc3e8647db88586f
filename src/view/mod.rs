pub mod controller;
pub mod debounce;

pub use controller::ViewController;
pub use debounce::Debouncer;
