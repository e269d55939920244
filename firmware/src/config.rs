//! Compile-time mission selection and timing.

use embassy_time::Duration;
use flight_core::{MissionId, MissionRequest, PidGains};

/// Mission submitted when the mission button is pressed.
pub const MISSION_REQUEST: MissionRequest =
    MissionRequest::new(MissionId(1), 1.2, PidGains::new(0.6, 0.0, 0.25));

/// Ignore further edges for this long after a button press.
pub const DEBOUNCE: Duration = Duration::from_millis(50);

/// How often the parser task logs its counters.
pub const STATS_PERIOD: Duration = Duration::from_secs(10);
