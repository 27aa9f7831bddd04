//! Classifies a source project by directory fingerprints.

use std::fs;
use std::path::Path;

use crate::core::generation::Generation;

/// Token the CodeIgniter 2 bootstrap defines.
const CI2_MARKER: &[u8] = b"CI_VERSION";

/// Rules are checked in order and the first match wins:
///
/// 1. `system/core` without `system/core/compat`, and
///    `system/core/CodeIgniter.php` contains `CI_VERSION`: CodeIgniter 2
/// 2. `system/core` with `system/core/compat`: CodeIgniter 3
/// 3. `system/bootstrap.php` without `system/core`: CodeIgniter 4
/// 4. otherwise unknown
///
/// The marker check is a plain substring search. A CodeIgniter 2 bootstrap
/// that lost the constant falls through to the later rules.
pub fn detect_generation(root: &Path) -> Generation {
    let system = root.join("system");
    let core = system.join("core");
    let has_core = core.is_dir();
    let has_compat = core.join("compat").is_dir();

    let generation = if has_core && !has_compat && has_ci2_marker(&core.join("CodeIgniter.php")) {
        Generation::Ci2
    } else if has_core && has_compat {
        Generation::Ci3
    } else if system.join("bootstrap.php").is_file() && !has_core {
        Generation::Ci4
    } else {
        Generation::Unknown
    };

    tracing::debug!(
        "Detected {} for {}",
        generation.short_label(),
        root.display()
    );
    generation
}

fn has_ci2_marker(bootstrap: &Path) -> bool {
    match fs::read(bootstrap) {
        Ok(bytes) => bytes.windows(CI2_MARKER.len()).any(|w| w == CI2_MARKER),
        Err(e) => {
            tracing::debug!("Cannot read {}: {}", bootstrap.display(), e);
            false
        }
    }
}
