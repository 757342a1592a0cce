// Interface adapters: backend client, wire protocol, local storage and console ports.

pub mod clients;
pub mod console;
pub mod protocol;
pub mod storage;

pub use clients::BackendClient;
pub use console::{ConsoleNavigator, ConsoleNotifier, ConsoleTheme};
pub use storage::{FileStorage, MemoryStorage};
