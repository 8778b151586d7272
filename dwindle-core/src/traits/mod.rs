//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and device-specific implementations.

pub mod haptics;
pub mod presentation;
pub mod sensor;
pub mod storage;

pub use haptics::{HapticPattern, Haptics};
pub use presentation::{
    format_tenths, LayerVisibility, Presentation, PresentationExt, Screen, VALUE_TEXT_LEN,
};
pub use sensor::MotionSensor;
pub use storage::{RecordStorage, StorageError};
