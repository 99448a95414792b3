//! Widget controllers: input in, fetch, state out, view on demand.
//!
//! Widgets are single-threaded. Their async methods borrow the widget and
//! may be interleaved on one task, but not sent across threads.

pub mod excuse;
pub mod weather;

pub use excuse::ExcuseWidget;
pub use weather::WeatherWidget;
