//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements  | Connects to                      |
//! |-------------|-------------|----------------------------------|
//! | `hardware`  | PinPort     | `embedded-hal` input/output pins |
//! | `sim`       | PinPort     | In-memory board for host runs    |
//! | `time`      | TickSource  | Host monotonic clock             |
//! | `log_sink`  | EventSink   | `log` facade                     |
//! | `eeprom`    | ConfigPort  | 256-byte data EEPROM image       |
//! | `json_file` | ConfigPort  | JSON file on the host            |

pub mod eeprom;
pub mod hardware;
pub mod json_file;
pub mod log_sink;
pub mod sim;
pub mod time;
