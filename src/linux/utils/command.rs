use tracing::{debug, warn};

use crate::utils::command::CommandUtils;

impl CommandUtils {
    /// Terminates the provisioner when the build tool that spawned it dies,
    /// so an aborted build never leaves a download or a task running.
    pub fn set_death_signal() {
        // SIGTERM
        match prctl::set_death_signal(15) {
            Ok(_) => debug!("Parent death signal set to SIGTERM"),
            Err(err) => warn!("Could not set parent death signal: {}", err),
        }
    }
}
