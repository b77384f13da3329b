pub mod configuration;
pub mod foundation;
pub mod process;
pub mod startup;

pub use configuration::*;
pub use foundation::storage::*;
pub use process::{DirectoryScanner, DEFAULT_AUDIO_SUFFIX};
pub use startup::{run, Task};
