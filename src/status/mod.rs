//! The caret status indicator.
//!
//! - [`snapshot`]: value types read from the editor
//! - [`format`]: snapshot → status line
//! - [`timer`]: single-threaded timer queue
//! - [`debounce`]: trailing-edge [`DelayedCall`]
//! - [`source`]: traits an observed editor implements
//! - [`indicator`]: the [`StatusIndicator`] widget

pub mod debounce;
pub mod format;
pub mod indicator;
pub mod snapshot;
pub mod source;
pub mod timer;

pub use debounce::{DelayedCall, WeakDelayedCall};
pub use format::{FormatOptions, RangeCountPolicy, format_status};
pub use indicator::{DEFAULT_DELAY, IndicatorOptions, StatusIndicator};
pub use snapshot::{EditorSnapshot, Point, Range};
pub use source::{EditorEvent, Handler, ListenerId, Notifier, StatusSource};
pub use timer::{Clock, ManualClock, MonotonicClock, TimerId, Timers};
